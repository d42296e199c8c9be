use crate::enums::CommandOptionType;
use crate::option::{ArgumentLimits, CommandOption, CommandOptionChoice};
use crate::parse::Parse;

/// A command argument.
///
/// The schema of an argument (wire type, required flag, choices, limits) is
/// taken from the [`Parse`] implementation of the declared type, so the
/// declaration site only provides the name and description:
///
/// ```rust,no_run
/// # use parley::argument::CommandArgument;
/// // an optional integer option named "number"
/// let arg = CommandArgument::<()>::new::<Option<i64>>("number", "The number to square");
/// ```
pub struct CommandArgument<D> {
    /// Argument name.
    pub name: &'static str,
    /// Description of the argument.
    pub description: &'static str,
    /// Whether the argument is required.
    pub required: bool,
    /// The type this argument has.
    pub kind: CommandOptionType,
    /// The input options allowed to choose from in this argument, only valid if it is [Some](Some)
    pub choices: Option<Vec<CommandOptionChoice>>,
    /// The input limits of this argument.
    pub limits: Option<ArgumentLimits>,
    /// Whether the platform should issue autocomplete requests while the user
    /// types this argument.
    pub autocomplete: bool,
    _marker: std::marker::PhantomData<D>,
}

impl<D: Send + Sync> CommandArgument<D> {
    pub fn new<T: Parse<D>>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: T::required(),
            kind: T::kind(),
            choices: T::choices(),
            limits: T::limits(),
            autocomplete: false,
            _marker: std::marker::PhantomData,
        }
    }

    /// Marks the argument as autocompleted; the hook answering the requests
    /// is registered per command on the framework builder.
    pub fn autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = autocomplete;
        self
    }
}

impl<D> CommandArgument<D> {
    /// Dumps this argument as the platform option it registers as.
    pub fn as_option(&self) -> CommandOption {
        let limits = self.limits.unwrap_or_default();

        CommandOption {
            kind: self.kind,
            name: self.name.to_string(),
            description: self.description.to_string(),
            required: self.required,
            choices: self.choices.clone().unwrap_or_default(),
            options: Vec::new(),
            autocomplete: self.autocomplete,
            min_value: limits.min,
            max_value: limits.max,
        }
    }
}

use crate::interaction::{OptionValue, ResolvedData};
use crate::option::{ArgumentLimits, CommandOptionChoice};
use crate::enums::CommandOptionType;
use async_trait::async_trait;
use std::error::Error;

/// The core trait of this framework, it is used to parse all command arguments.
///
/// An implementation of this trait is the type descriptor of one option: it
/// knows its wire type, whether it is required, its choices and limits, and
/// how to turn the incoming value into the native type, dereferencing the
/// resolved maps where the value is a resource reference.
#[async_trait]
pub trait Parse<T: Send + Sync>: Sized {
    /// Parses the option into the argument.
    async fn parse(
        _data: &T,
        _value: Option<&OptionValue>,
        _resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError>;

    /// Returns the option type this argument has.
    fn kind() -> CommandOptionType;

    /// Sets if the argument is required, by default is true.
    fn required() -> bool {
        true
    }

    /// Adds the possible choices to the argument, this is normally provided
    /// by the [`command_choices!`](crate::command_choices) macro, but can be
    /// overridden manually.
    fn choices() -> Option<Vec<CommandOptionChoice>> {
        None
    }

    /// The numeric limits this argument imposes, if any.
    fn limits() -> Option<ArgumentLimits> {
        None
    }
}

/// The errors which can be returned from [Parse](self::Parse)
/// [parse](self::Parse::parse) function.
#[derive(Debug)]
pub enum ParseError {
    /// The command arguments do not match with the framework ones.
    StructureMismatch(String),
    /// An argument failed parsing.
    Parsing {
        /// The name of the argument that failed to parse.
        argument_name: String,
        /// Whether if the argument is required or not.
        required: bool,
        /// The type of the argument.
        argument_type: String,
        /// The error message as a string.
        error: String,
    },
    /// Other error occurred.
    Other(Box<dyn Error + Send + Sync>),
}

impl ParseError {
    pub(crate) fn with_name(mut self, name: &str) -> Self {
        if let ParseError::Parsing { argument_name, .. } = &mut self {
            *argument_name = name.to_string();
        }
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StructureMismatch(why) => write!(f, "Structure mismatch: {}", why),
            Self::Parsing {
                argument_name,
                required,
                argument_type,
                error,
            } => {
                write!(
                    f,
                    "Failed to parse {}({}required {}): {}",
                    argument_name,
                    if !required { "not " } else { "" },
                    argument_type,
                    error
                )
            }
            Self::Other(why) => write!(f, "Other: {}", why),
        }
    }
}
impl Error for ParseError {}

impl From<Box<dyn Error + Send + Sync>> for ParseError {
    fn from(e: Box<dyn Error + Send + Sync>) -> Self {
        Self::Other(e)
    }
}

impl From<&'static str> for ParseError {
    fn from(why: &'static str) -> Self {
        Self::StructureMismatch(why.to_string())
    }
}

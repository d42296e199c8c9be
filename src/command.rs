use crate::argument::CommandArgument;
use crate::context::SlashContext;
use crate::enums::ApplicationCommandType;
use crate::option::CommandSpec;
use crate::parse::Parse;
use crate::response::Reply;
use crate::BoxFuture;
use std::collections::HashMap;

/// A pointer to a command function.
pub type CommandFn<D, E> = for<'a> fn(&'a SlashContext<'a, D>) -> BoxFuture<'a, Result<Reply, E>>;
/// A map of [commands](self::Command).
pub type CommandMap<D, E> = HashMap<&'static str, Command<D, E>>;

/// A command executed by the framework.
pub struct Command<D, E> {
    /// The name of the command.
    pub name: &'static str,
    /// The description of the command. Empty for context-menu commands.
    pub description: &'static str,
    pub kind: ApplicationCommandType,
    /// All the arguments the command requires.
    pub arguments: Vec<CommandArgument<D>>,
    /// A pointer to this command function.
    pub fun: CommandFn<D, E>,
    /// The permission integer a member must have to see this command.
    pub default_member_permissions: Option<String>,
    /// Whether the command is available in direct messages.
    pub dm_permission: Option<bool>,
    pub name_localizations: HashMap<String, String>,
    pub description_localizations: HashMap<String, String>,
}

impl<D, E> Command<D, E> {
    /// Creates a new chat-input command.
    pub fn new(fun: CommandFn<D, E>) -> Self {
        Self {
            name: Default::default(),
            description: Default::default(),
            kind: ApplicationCommandType::ChatInput,
            arguments: Default::default(),
            fun,
            default_member_permissions: None,
            dm_permission: None,
            name_localizations: Default::default(),
            description_localizations: Default::default(),
        }
    }

    /// Sets the command name.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Sets the command description.
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the command kind; context-menu commands carry no description and
    /// no options.
    pub fn kind(mut self, kind: ApplicationCommandType) -> Self {
        self.kind = kind;
        self
    }

    /// Adds an argument to the command.
    pub fn add_argument(mut self, arg: CommandArgument<D>) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn default_member_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.default_member_permissions = Some(permissions.into());
        self
    }

    pub fn dm_permission(mut self, allow: bool) -> Self {
        self.dm_permission = Some(allow);
        self
    }

    pub fn localized_name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.name_localizations.insert(locale.into(), name.into());
        self
    }

    pub fn localized_description(
        mut self,
        locale: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.description_localizations
            .insert(locale.into(), description.into());
        self
    }

    /// Dumps this command as the wire definition the registration API
    /// expects.
    pub fn dump(&self) -> CommandSpec {
        CommandSpec {
            id: None,
            kind: self.kind,
            name: self.name.to_string(),
            description: self.description.to_string(),
            options: self.arguments.iter().map(|a| a.as_option()).collect(),
            default_member_permissions: self.default_member_permissions.clone(),
            dm_permission: self.dm_permission,
            name_localizations: if self.name_localizations.is_empty() {
                None
            } else {
                Some(self.name_localizations.clone())
            },
            description_localizations: if self.description_localizations.is_empty() {
                None
            } else {
                Some(self.description_localizations.clone())
            },
        }
    }
}

impl<D: Send + Sync, E> Command<D, E> {
    /// Shortcut declaring an argument whose schema is inferred from `T`'s
    /// [`Parse`] implementation.
    pub fn argument<T: Parse<D>>(self, name: &'static str, description: &'static str) -> Self {
        self.add_argument(CommandArgument::new::<T>(name, description))
    }
}

use crate::command::{Command, CommandMap};
use crate::enums::{ApplicationCommandType, CommandOptionType};
use crate::option::{CommandOption, CommandSpec};
use std::collections::HashMap;

/// A map of [parent groups](self::GroupParent).
pub type GroupParentMap<D, E> = HashMap<&'static str, GroupParent<D, E>>;
/// A map of [command groups](self::CommandGroup).
pub type CommandGroupMap<D, E> = HashMap<&'static str, CommandGroup<D, E>>;

/// Types a [group parent](self::GroupParent) can be.
pub enum ParentType<D, E> {
    /// Simple, the group only has subcommands.
    Simple(CommandMap<D, E>),
    /// Group, the group has other groups inside of it.
    Group(CommandGroupMap<D, E>),
}

impl<D, E> ParentType<D, E> {
    /// Tries to get the [`map`](crate::command::CommandMap) of the given
    /// [parent type](self::ParentType), returning `Some` if the parent
    /// variant is [`simple`](self::ParentType::Simple).
    pub fn as_simple(&self) -> Option<&CommandMap<D, E>> {
        match self {
            Self::Simple(map) => Some(map),
            _ => None,
        }
    }

    /// Tries to get the [`group`](self::CommandGroupMap) of the given
    /// [parent type](self::ParentType), returning `Some` if the parent
    /// variant is a [`group`](self::ParentType::Group).
    pub fn as_group(&self) -> Option<&CommandGroupMap<D, E>> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// A parent of a group of sub commands, either a map of
/// [commands](crate::command::Command) registered as `SubCommand`s or a map
/// of [groups](self::CommandGroup) registered as `SubCommandGroup`s.
pub struct GroupParent<D, E> {
    /// The name of the upper command
    ///
    /// e.g.: /parent <subcommand..>
    ///
    /// where `parent` is `name`.
    pub name: &'static str,
    /// The description of the upper command.
    pub description: &'static str,
    /// This parent group child commands.
    pub kind: ParentType<D, E>,
    /// The permission integer a member must have to see this group.
    pub default_member_permissions: Option<String>,
    /// Whether the group is available in direct messages.
    pub dm_permission: Option<bool>,
}

/// A group of commands, registered as `SubCommandGroup`.
pub struct CommandGroup<D, E> {
    /// The upper command
    ///
    /// e.g.: /parent command <subcommand..> <options..>
    ///
    /// where `command` is `name`.
    pub name: &'static str,
    /// The description of this group.
    pub description: &'static str,
    /// The commands this group has as children.
    pub subcommands: CommandMap<D, E>,
}

impl<D, E> GroupParent<D, E> {
    /// Dumps this group as the wire definition the registration API expects.
    ///
    /// The option list is computed from the live children on every call, so
    /// it can never go stale.
    pub fn dump(&self) -> CommandSpec {
        CommandSpec {
            id: None,
            kind: ApplicationCommandType::ChatInput,
            name: self.name.to_string(),
            description: self.description.to_string(),
            options: self.get_options(),
            default_member_permissions: self.default_member_permissions.clone(),
            dm_permission: self.dm_permission,
            name_localizations: None,
            description_localizations: None,
        }
    }

    /// The `SubCommand`/`SubCommandGroup` options of this parent.
    pub fn get_options(&self) -> Vec<CommandOption> {
        match &self.kind {
            ParentType::Group(groups) => {
                let mut subgroups = Vec::new();

                for group in groups.values() {
                    let mut option = CommandOption::new(
                        CommandOptionType::SubCommandGroup,
                        group.name,
                        group.description,
                    );
                    option.options = group
                        .subcommands
                        .values()
                        .map(Self::create_subcommand)
                        .collect();

                    subgroups.push(option);
                }

                subgroups
            }
            ParentType::Simple(commands) => {
                commands.values().map(Self::create_subcommand).collect()
            }
        }
    }

    /// Creates a subcommand option at the given scope.
    fn create_subcommand(cmd: &Command<D, E>) -> CommandOption {
        let mut option =
            CommandOption::new(CommandOptionType::SubCommand, cmd.name, cmd.description);
        option.options = cmd.arguments.iter().map(|a| a.as_option()).collect();
        option
    }
}

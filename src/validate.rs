//! Naming and length constraints the platform imposes on command metadata.
//!
//! All checks run at registration time so violations abort startup instead of
//! surfacing per request.

use crate::enums::ApplicationCommandType;
use crate::error::BuildError;
use crate::option::{CommandOption, CommandSpec};

/// Maximum length of a command or option name.
pub const NAME_LENGTH_MAX: usize = 32;
/// Maximum length of a command or option description.
pub const DESCRIPTION_LENGTH_MAX: usize = 100;
/// Maximum number of options a command or subcommand can declare.
pub const OPTIONS_MAX: usize = 25;
/// Maximum number of choices an option can declare.
pub const CHOICES_MAX: usize = 25;
/// Maximum length of a choice name.
pub const CHOICE_NAME_LENGTH_MAX: usize = 100;
/// Maximum length of a component or modal custom id.
pub const CUSTOM_ID_LENGTH_MAX: usize = 100;

/// Validates the name of a chat-input command, subcommand or option: 1-32
/// characters, lowercase, word characters and dashes only.
pub fn chat_input_name(name: &str) -> Result<(), BuildError> {
    let invalid = |reason| BuildError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let length = name.chars().count();
    if length == 0 || length > NAME_LENGTH_MAX {
        return Err(invalid("must be between 1 and 32 characters"));
    }

    for c in name.chars() {
        if c.is_uppercase() {
            return Err(invalid("must be lowercase"));
        }
        if !(c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(invalid("may only contain word characters and dashes"));
        }
    }

    Ok(())
}

/// Validates the name of a context-menu command: 1-32 characters, any case.
pub fn command_name(name: &str) -> Result<(), BuildError> {
    let length = name.chars().count();
    if length == 0 || length > NAME_LENGTH_MAX {
        return Err(BuildError::InvalidName {
            name: name.to_string(),
            reason: "must be between 1 and 32 characters",
        });
    }
    Ok(())
}

/// Validates a chat-input description: 1-100 characters.
pub fn description(description: &str) -> Result<(), BuildError> {
    let length = description.chars().count();
    if length == 0 || length > DESCRIPTION_LENGTH_MAX {
        return Err(BuildError::InvalidDescription {
            description: description.to_string(),
            reason: "must be between 1 and 100 characters",
        });
    }
    Ok(())
}

fn option(opt: &CommandOption) -> Result<(), BuildError> {
    chat_input_name(&opt.name)?;
    description(&opt.description)?;

    if opt.choices.len() > CHOICES_MAX {
        return Err(BuildError::TooManyChoices {
            count: opt.choices.len(),
            limit: CHOICES_MAX,
        });
    }

    for choice in &opt.choices {
        if choice.name.chars().count() > CHOICE_NAME_LENGTH_MAX {
            return Err(BuildError::ChoiceNameTooLong(choice.name.clone()));
        }
    }

    if opt.options.len() > OPTIONS_MAX {
        return Err(BuildError::TooManyOptions {
            count: opt.options.len(),
            limit: OPTIONS_MAX,
        });
    }

    for nested in &opt.options {
        option(nested)?;
    }

    Ok(())
}

/// Validates a full command definition before it is accepted into the
/// registry.
pub fn command(spec: &CommandSpec) -> Result<(), BuildError> {
    match spec.kind {
        ApplicationCommandType::ChatInput => {
            chat_input_name(&spec.name)?;
            description(&spec.description)?;
        }
        ApplicationCommandType::User | ApplicationCommandType::Message => {
            command_name(&spec.name)?;
            if !spec.description.is_empty() {
                return Err(BuildError::InvalidDescription {
                    description: spec.description.clone(),
                    reason: "context-menu commands cannot have a description",
                });
            }
        }
    }

    if spec.options.len() > OPTIONS_MAX {
        return Err(BuildError::TooManyOptions {
            count: spec.options.len(),
            limit: OPTIONS_MAX,
        });
    }

    for opt in &spec.options {
        option(opt)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::CommandOptionType;
    use crate::option::CommandOptionChoice;

    #[test]
    fn chat_input_names() {
        assert!(chat_input_name("ping").is_ok());
        assert!(chat_input_name("with-dash_and_underscore").is_ok());
        assert!(chat_input_name("Uppercase").is_err());
        assert!(chat_input_name("has space").is_err());
        assert!(chat_input_name("").is_err());
        assert!(chat_input_name(&"a".repeat(33)).is_err());
    }

    #[test]
    fn descriptions() {
        assert!(description("Responds with pong").is_ok());
        assert!(description("").is_err());
        assert!(description(&"d".repeat(101)).is_err());
    }

    #[test]
    fn context_menu_commands_reject_descriptions() {
        let mut spec = CommandSpec::new(crate::enums::ApplicationCommandType::User, "High Five");
        assert!(command(&spec).is_ok());

        spec.description = "nope".to_string();
        assert!(command(&spec).is_err());
    }

    #[test]
    fn choice_limits() {
        let mut opt = CommandOption::new(CommandOptionType::String, "animal", "An animal");
        opt.choices = (0..26)
            .map(|i| CommandOptionChoice::new(format!("c{}", i), i))
            .collect();

        let mut spec = CommandSpec::new(crate::enums::ApplicationCommandType::ChatInput, "pets");
        spec.description = "Pet commands".to_string();
        spec.options = vec![opt];
        assert!(matches!(
            command(&spec),
            Err(BuildError::TooManyChoices { count: 26, .. })
        ));
    }
}

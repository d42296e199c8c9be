use std::convert::TryFrom;
use std::fmt;

/// Error returned when an incoming payload carries a type code this library
/// does not know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} code: {}", self.kind, self.code)
    }
}

impl std::error::Error for UnknownCode {}

macro_rules! wire_enum {
    ($($(#[$meta:meta])* $vis:vis enum $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal),* $(,)? })*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value,)*
        }

        impl $name {
            /// The integer code this variant has on the wire.
            pub fn value(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownCode;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)*
                    other => Err(UnknownCode { kind: stringify!($name), code: other }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(*self as u8)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = u8::deserialize(deserializer)?;
                TryFrom::try_from(value).map_err(serde::de::Error::custom)
            }
        }
    )*};
}

wire_enum! {
    /// The kind of an incoming interaction.
    pub enum InteractionType {
        Ping = 1,
        ApplicationCommand = 2,
        MessageComponent = 3,
        ApplicationCommandAutocomplete = 4,
        ModalSubmit = 5,
    }

    /// The kind of an application command.
    pub enum ApplicationCommandType {
        /// A slash command, invoked by typing in the chat input.
        ChatInput = 1,
        /// A context-menu command invoked on a user.
        User = 2,
        /// A context-menu command invoked on a message.
        Message = 3,
    }

    /// The type of a single command option.
    pub enum CommandOptionType {
        SubCommand = 1,
        SubCommandGroup = 2,
        String = 3,
        Integer = 4,
        Boolean = 5,
        User = 6,
        Channel = 7,
        Role = 8,
        Mentionable = 9,
        Number = 10,
        Attachment = 11,
    }

    /// The type code of an outgoing interaction response.
    pub enum ResponseType {
        Pong = 1,
        ChannelMessageWithSource = 4,
        DeferredChannelMessageWithSource = 5,
        DeferredUpdateMessage = 6,
        UpdateMessage = 7,
        ApplicationCommandAutocompleteResult = 8,
        Modal = 9,
    }

    /// The kind of a message component.
    pub enum ComponentType {
        ActionRow = 1,
        Button = 2,
        SelectMenu = 3,
        TextInput = 4,
    }

    /// The visual style of a button component.
    pub enum ButtonStyle {
        Primary = 1,
        Secondary = 2,
        Success = 3,
        Danger = 4,
        Link = 5,
    }

    /// The input style of a text input component.
    pub enum TextInputStyle {
        Short = 1,
        Paragraph = 2,
    }

    /// The kind of a resolved channel record.
    pub enum ChannelType {
        GuildText = 0,
        Dm = 1,
        GuildVoice = 2,
        GroupDm = 3,
        GuildCategory = 4,
        GuildNews = 5,
        GuildStore = 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        assert_eq!(InteractionType::try_from(1).unwrap(), InteractionType::Ping);
        assert_eq!(CommandOptionType::SubCommandGroup.value(), 2);
        assert_eq!(ResponseType::ChannelMessageWithSource.value(), 4);
        assert!(InteractionType::try_from(9).is_err());
    }

    #[test]
    fn serde_uses_integer_codes() {
        let json = serde_json::to_string(&ResponseType::Modal).unwrap();
        assert_eq!(json, "9");
        let kind: InteractionType = serde_json::from_str("3").unwrap();
        assert_eq!(kind, InteractionType::MessageComponent);
    }
}

use crate::enums::ResponseType;
use crate::message::{Message, MessageData};
use crate::modal::Modal;
use crate::option::{ChoiceValue, CommandOptionChoice};
use serde::Serialize;

/// Maximum number of choices an autocomplete response may carry.
pub const AUTOCOMPLETE_CHOICES_MAX: usize = 25;

/// What a command or component handler hands back to the dispatcher.
///
/// Plain strings convert into message content; an explicit [`Message`] or
/// [`Modal`] passes through unchanged; [`Reply::Ack`] is the empty
/// acknowledgement, encoded as a bodyless deferred response.
pub enum Reply {
    Ack,
    Message(Message),
    Modal(Modal),
}

impl Reply {
    /// The empty acknowledgement.
    pub fn ack() -> Self {
        Self::Ack
    }
}

impl From<Message> for Reply {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<Modal> for Reply {
    fn from(modal: Modal) -> Self {
        Self::Modal(modal)
    }
}

impl From<String> for Reply {
    fn from(content: String) -> Self {
        Self::Message(Message::from(content))
    }
}

impl From<&str> for Reply {
    fn from(content: &str) -> Self {
        Self::Message(Message::from(content))
    }
}

/// The outcome of an autocomplete hook: a bounded list of (display, value)
/// choice pairs.
#[derive(Clone, Debug, Default)]
pub struct AutocompleteResult {
    pub choices: Vec<CommandOptionChoice>,
}

impl AutocompleteResult {
    pub(crate) fn dump(mut self) -> AutocompleteData {
        self.choices.truncate(AUTOCOMPLETE_CHOICES_MAX);
        AutocompleteData {
            choices: self.choices,
        }
    }
}

impl From<Vec<CommandOptionChoice>> for AutocompleteResult {
    fn from(choices: Vec<CommandOptionChoice>) -> Self {
        Self { choices }
    }
}

/// A list of plain values auto-pairs each value with its string form as the
/// display name.
impl From<Vec<String>> for AutocompleteResult {
    fn from(values: Vec<String>) -> Self {
        Self {
            choices: values
                .into_iter()
                .map(|value| CommandOptionChoice::new(value.clone(), value))
                .collect(),
        }
    }
}

impl From<Vec<&str>> for AutocompleteResult {
    fn from(values: Vec<&str>) -> Self {
        values
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<i64>> for AutocompleteResult {
    fn from(values: Vec<i64>) -> Self {
        Self {
            choices: values
                .into_iter()
                .map(|value| CommandOptionChoice::new(value.to_string(), value))
                .collect(),
        }
    }
}

impl From<Vec<(String, ChoiceValue)>> for AutocompleteResult {
    fn from(pairs: Vec<(String, ChoiceValue)>) -> Self {
        Self {
            choices: pairs
                .into_iter()
                .map(|(name, value)| CommandOptionChoice { name, value })
                .collect(),
        }
    }
}

/// The serialized reply to one interaction.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl InteractionResponse {
    /// The acknowledgement of a ping.
    pub fn pong() -> Self {
        Self {
            kind: ResponseType::Pong,
            data: None,
        }
    }

    /// A bodyless deferred acknowledgement.
    pub fn ack() -> Self {
        Self {
            kind: ResponseType::DeferredChannelMessageWithSource,
            data: None,
        }
    }

    pub fn message(kind: ResponseType, data: MessageData) -> Self {
        Self {
            kind,
            data: Some(ResponseData::Message(data)),
        }
    }

    pub fn modal(modal: Modal) -> Self {
        Self {
            kind: ResponseType::Modal,
            data: Some(ResponseData::Modal(modal)),
        }
    }

    pub fn autocomplete(result: AutocompleteResult) -> Self {
        Self {
            kind: ResponseType::ApplicationCommandAutocompleteResult,
            data: Some(ResponseData::Autocomplete(result.dump())),
        }
    }
}

/// The `data` object of an interaction response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Message(MessageData),
    Autocomplete(AutocompleteData),
    Modal(Modal),
}

/// The `data` object of an autocomplete response.
#[derive(Clone, Debug, Serialize)]
pub struct AutocompleteData {
    pub choices: Vec<CommandOptionChoice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pong_has_no_data() {
        let json = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": 1 }));
    }

    #[test]
    fn plain_values_auto_pair() {
        let result = AutocompleteResult::from(vec!["red", "green"]);
        assert_eq!(result.choices.len(), 2);
        assert_eq!(result.choices[0].name, "red");
        assert_eq!(result.choices[0].value, ChoiceValue::String("red".to_string()));
    }

    #[test]
    fn autocomplete_choices_are_bounded() {
        let values: Vec<String> = (0..40).map(|i| i.to_string()).collect();
        let data = AutocompleteResult::from(values).dump();
        assert_eq!(data.choices.len(), AUTOCOMPLETE_CHOICES_MAX);
    }
}

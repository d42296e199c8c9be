use crate::component::ActionRow;
use crate::embed::Embed;
use crate::enums::ResponseType;
use crate::error::MessageError;
use serde::Serialize;

/// Flag bit marking a response as ephemeral.
const EPHEMERAL_FLAG: u64 = 64;

/// Controls which mentions inside a message actually ping.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
}

impl Default for AllowedMentions {
    fn default() -> Self {
        Self {
            parse: vec![
                "roles".to_string(),
                "users".to_string(),
                "everyone".to_string(),
            ],
        }
    }
}

impl AllowedMentions {
    /// Suppresses all mentions.
    pub fn none() -> Self {
        Self { parse: Vec::new() }
    }
}

/// A file attached to an outgoing followup message.
#[derive(Clone, Debug, PartialEq)]
pub struct FileAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// A message, either the response to an interaction or an outgoing followup.
///
/// The `deferred`, `ephemeral` and `update` flags select the response type
/// code and the message flags; see [`response_type`](Self::response_type).
#[derive(Clone, Debug, Default)]
pub struct Message {
    /// The message body.
    pub content: Option<String>,
    /// Whether the message should be sent with text-to-speech.
    pub tts: bool,
    pub embeds: Vec<Embed>,
    pub allowed_mentions: AllowedMentions,
    /// Defer the real content to a later followup, displaying a loading state
    /// meanwhile. Only valid on interaction responses.
    pub deferred: bool,
    /// Show the message only to the invoking user. Only valid on interaction
    /// responses.
    pub ephemeral: bool,
    /// Update the message the activated component is attached to instead of
    /// sending a new one. Only valid when answering component and modal
    /// interactions.
    pub update: bool,
    pub components: Vec<ActionRow>,
    /// Files to attach. Only valid on followup messages.
    pub files: Vec<FileAttachment>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn deferred(mut self, deferred: bool) -> Self {
        self.deferred = deferred;
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn component_row(mut self, row: ActionRow) -> Self {
        self.components.push(row);
        self
    }

    pub fn file(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }

    /// The flags sent with this message, determined by whether it is
    /// ephemeral.
    pub fn flags(&self) -> u64 {
        if self.ephemeral {
            EPHEMERAL_FLAG
        } else {
            0
        }
    }

    /// The response type code selected by the `update` and `deferred` flags.
    pub fn response_type(&self) -> ResponseType {
        match (self.update, self.deferred) {
            (true, true) => ResponseType::DeferredUpdateMessage,
            (true, false) => ResponseType::UpdateMessage,
            (false, true) => ResponseType::DeferredChannelMessageWithSource,
            (false, false) => ResponseType::ChannelMessageWithSource,
        }
    }

    fn is_empty(&self) -> bool {
        self.content.is_none() && self.embeds.is_empty() && self.files.is_empty() && !self.deferred
    }

    fn check_files_initial(&self) -> Result<(), MessageError> {
        if !self.files.is_empty() {
            if self.ephemeral {
                return Err(MessageError::EphemeralFiles);
            }
            return Err(MessageError::FilesNotAllowed);
        }
        Ok(())
    }

    /// Encodes this message as the data of an initial command response.
    pub fn dump(&self) -> Result<(ResponseType, MessageData), MessageError> {
        if self.is_empty() {
            return Err(MessageError::EmptyResponse);
        }
        self.check_files_initial()?;
        if self.update {
            return Err(MessageError::UpdateNotAllowed);
        }

        Ok((self.response_type(), self.dump_data()))
    }

    /// Encodes this message as the reply to a component or modal-submit
    /// interaction, where `update` is meaningful and a bodyless update is
    /// legal.
    pub fn dump_handler(&self) -> Result<(ResponseType, MessageData), MessageError> {
        self.check_files_initial()?;

        Ok((self.response_type(), self.dump_data()))
    }

    /// Encodes this message as an outgoing followup body. Files travel
    /// separately as multipart form parts.
    pub fn dump_followup(&self) -> Result<FollowupBody, MessageError> {
        if self.is_empty() {
            return Err(MessageError::EmptyResponse);
        }
        if self.ephemeral {
            return Err(MessageError::InvalidFollowup("ephemeral"));
        }
        if self.deferred {
            return Err(MessageError::InvalidFollowup("deferred"));
        }
        if self.update {
            return Err(MessageError::InvalidFollowup("update"));
        }

        Ok(FollowupBody {
            content: self.content.clone(),
            tts: self.tts,
            embeds: self.embeds.clone(),
            allowed_mentions: self.allowed_mentions.clone(),
            components: self.components.clone(),
        })
    }

    fn dump_data(&self) -> MessageData {
        MessageData {
            content: self.content.clone(),
            tts: self.tts,
            embeds: self.embeds.clone(),
            allowed_mentions: self.allowed_mentions.clone(),
            flags: self.flags(),
            components: self.components.clone(),
        }
    }
}

impl From<&str> for Message {
    fn from(content: &str) -> Self {
        Self::new().content(content)
    }
}

impl From<String> for Message {
    fn from(content: String) -> Self {
        Self::new().content(content)
    }
}

/// The `data` object of a message interaction response.
#[derive(Clone, Debug, Serialize)]
pub struct MessageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub tts: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    pub allowed_mentions: AllowedMentions,
    pub flags: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
}

/// The body of a followup message sent to the webhook URL.
#[derive(Clone, Debug, Serialize)]
pub struct FollowupBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub tts: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    pub allowed_mentions: AllowedMentions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_type_table() {
        let plain = Message::from("hi");
        assert_eq!(plain.response_type(), ResponseType::ChannelMessageWithSource);

        let deferred = Message::new().deferred(true);
        assert_eq!(
            deferred.response_type(),
            ResponseType::DeferredChannelMessageWithSource
        );

        let update = Message::from("hi").update(true);
        assert_eq!(update.response_type(), ResponseType::UpdateMessage);

        let deferred_update = Message::new().deferred(true).update(true);
        assert_eq!(
            deferred_update.response_type(),
            ResponseType::DeferredUpdateMessage
        );
    }

    #[test]
    fn empty_messages_are_rejected() {
        assert_eq!(Message::new().dump().unwrap_err(), MessageError::EmptyResponse);
        // deferred carries no body and is still valid
        assert!(Message::new().deferred(true).dump().is_ok());
    }

    #[test]
    fn files_are_rejected_on_initial_responses() {
        let message = Message::from("hi").file(FileAttachment::new("a.txt", b"hello".to_vec()));
        assert_eq!(message.dump().unwrap_err(), MessageError::FilesNotAllowed);

        let ephemeral = Message::from("hi")
            .ephemeral(true)
            .file(FileAttachment::new("a.txt", b"hello".to_vec()));
        assert_eq!(ephemeral.dump().unwrap_err(), MessageError::EphemeralFiles);
    }

    #[test]
    fn update_is_rejected_outside_handlers() {
        let message = Message::from("hi").update(true);
        assert_eq!(message.dump().unwrap_err(), MessageError::UpdateNotAllowed);
        assert!(message.dump_handler().is_ok());
    }

    #[test]
    fn followups_reject_response_flags() {
        let message = Message::from("hi").ephemeral(true);
        assert_eq!(
            message.dump_followup().unwrap_err(),
            MessageError::InvalidFollowup("ephemeral")
        );

        // files are fine in followups
        let message = Message::from("hi").file(FileAttachment::new("a.txt", b"x".to_vec()));
        assert!(message.dump_followup().is_ok());
    }

    #[test]
    fn ephemeral_sets_the_flag_bit() {
        let message = Message::from("secret").ephemeral(true);
        let (_, data) = message.dump().unwrap();
        assert_eq!(data.flags, 64);
    }
}

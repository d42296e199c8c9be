use crate::parse::ParseError;
use thiserror::Error;

/// Errors raised while declaring commands, components or modals.
///
/// These are configuration errors: they surface while the application is being
/// assembled, before any webhook traffic is accepted, and are fatal to
/// startup.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("command name \"{name}\" is invalid: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("description \"{description}\" is invalid: {reason}")]
    InvalidDescription {
        description: String,
        reason: &'static str,
    },
    #[error("a command can have at most {limit} options, got {count}")]
    TooManyOptions { count: usize, limit: usize },
    #[error("an option can have at most {limit} choices, got {count}")]
    TooManyChoices { count: usize, limit: usize },
    #[error("choice name \"{0}\" exceeds the 100 character limit")]
    ChoiceNameTooLong(String),
    #[error("custom id exceeds the 100 character limit ({0} characters)")]
    CustomIdTooLong(usize),
    #[error("custom id state tokens cannot contain the separator character")]
    SeparatorInToken,
    #[error("invalid component: {0}")]
    InvalidComponent(&'static str),
    #[error("invalid modal: {0}")]
    InvalidModal(&'static str),
}

/// Errors raised when a [`Message`](crate::message::Message) cannot be encoded
/// for the interaction it answers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("supply at least one of content, embeds, files, or deferred")]
    EmptyResponse,
    #[error("files are not allowed in an initial interaction response")]
    FilesNotAllowed,
    #[error("ephemeral messages cannot include files")]
    EphemeralFiles,
    #[error("update is only valid when responding to a component or modal interaction")]
    UpdateNotAllowed,
    #[error("{0} is not valid in a followup message")]
    InvalidFollowup(&'static str),
}

/// Errors raised while dispatching a single incoming interaction.
///
/// All of these are fatal for the request that produced them; the HTTP
/// boundary is expected to turn them into an error status rather than retry.
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("no handler registered for custom id \"{0}\"")]
    UnknownHandler(String),
    #[error("malformed interaction: {0}")]
    MalformedInteraction(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid custom id handler state: {0}")]
    InvalidHandlerState(String),
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error("a modal cannot be returned to this interaction type")]
    ModalNotAllowed,
    #[error("the handler returned an error: {0}")]
    Handler(E),
}

/// Errors raised when sending, editing or deleting a followup message.
///
/// Followups run outside the request cycle, so these propagate to whichever
/// task or thread performed the call; handling or logging them is that
/// caller's responsibility.
#[derive(Debug, Error)]
pub enum FollowupError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Message(#[from] MessageError),
}

/// Errors raised while synchronizing the declared command set with the remote
/// platform.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote api rejected command {command:?}: status {status}: {body}")]
    Failed {
        command: Option<String>,
        status: u16,
        body: String,
    },
}

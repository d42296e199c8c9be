#![doc = include_str!("../README.md")]

mod parse_impl;

pub mod argument;
pub mod builder;
pub mod command;
pub mod component;
pub mod component_handler;
pub mod context;
pub mod custom_id;
pub mod embed;
pub mod entity;
pub mod enums;
pub mod error;
pub mod followup;
pub mod framework;
pub mod group;
pub mod hook;
pub mod http;
pub mod interaction;
pub mod message;
pub mod modal;
pub mod option;
pub mod parse;
pub mod response;
pub mod sync;
pub mod validate;

pub use async_trait::async_trait;
pub use parse_impl::{AttachmentId, ChannelId, MentionableId, RoleId, UserId};

/// The boxed future produced by every handler function.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Useful exports to get started quickly
pub mod prelude {
    pub use crate::argument::CommandArgument;
    pub use crate::builder::{Blueprint, FrameworkBuilder};
    pub use crate::command::Command;
    pub use crate::component::{ActionRow, Button, SelectMenu, SelectOption, TextInput};
    pub use crate::component_handler::ComponentHandler;
    pub use crate::context::{AutocompleteContext, Focused, SlashContext};
    pub use crate::embed::Embed;
    pub use crate::enums::{ApplicationCommandType, ButtonStyle, ResponseType};
    pub use crate::error::{BuildError, DispatchError, FollowupError, MessageError, RegisterError};
    pub use crate::followup::{BlockingFollowup, Followup};
    pub use crate::framework::{DefaultCommandResult, DefaultError, Framework};
    pub use crate::http::{CommandScope, DiscordHttp};
    pub use crate::interaction::{Interaction, ResolvedTarget};
    pub use crate::message::{FileAttachment, Message};
    pub use crate::modal::Modal;
    pub use crate::option::{ChoiceValue, CommandOptionChoice};
    pub use crate::parse::{Parse, ParseError};
    pub use crate::response::{AutocompleteResult, InteractionResponse, Reply};
    pub use crate::BoxFuture;
    pub use async_trait::async_trait;
}

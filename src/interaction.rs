use crate::entity::{Attachment, Channel, Member, PartialMessage, Role, User};
use crate::enums::{ApplicationCommandType, CommandOptionType, ComponentType, InteractionType};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// One inbound webhook event representing a user action.
#[derive(Clone, Debug, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub user: Option<User>,
    pub token: String,
    #[serde(default)]
    pub message: Option<PartialMessage>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl Interaction {
    /// The invoking actor: the guild member, or a member wrapper around the
    /// bare user in DM context.
    pub fn author(&self) -> Option<Member> {
        if let Some(member) = &self.member {
            Some(member.clone())
        } else {
            self.user.clone().map(Member::from_user)
        }
    }
}

/// The `data` object of an interaction.
///
/// The platform only populates the fields relevant to the interaction type,
/// so everything here is optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<ApplicationCommandType>,
    #[serde(default)]
    pub options: Vec<DataOption>,
    #[serde(default)]
    pub resolved: Option<ResolvedData>,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub components: Vec<SubmittedRow>,
}

/// A single option of an invocation, possibly nesting further options when it
/// names a subcommand or subcommand group.
#[derive(Clone, Debug, Deserialize)]
pub struct DataOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    #[serde(default)]
    pub value: Option<OptionValue>,
    #[serde(default)]
    pub options: Vec<DataOption>,
    #[serde(default)]
    pub focused: bool,
}

/// A scalar option value as it appears on the wire.
///
/// Resource references (users, channels, roles, attachments) arrive as string
/// snowflakes and are dereferenced through the [`ResolvedData`] maps.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl OptionValue {
    /// Returns the value as a resource-reference id, if it is one.
    pub fn as_id(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Full records for every user, channel, role, message and attachment
/// referenced by id elsewhere in the interaction.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ResolvedData {
    #[serde(default)]
    pub users: HashMap<String, User>,
    #[serde(default)]
    pub members: HashMap<String, Member>,
    #[serde(default)]
    pub channels: HashMap<String, Channel>,
    #[serde(default)]
    pub roles: HashMap<String, Role>,
    #[serde(default)]
    pub messages: HashMap<String, PartialMessage>,
    #[serde(default)]
    pub attachments: HashMap<String, Attachment>,
}

impl ResolvedData {
    /// Looks up a member record for the given id, grafting in its user record
    /// the way the platform splits them. Falls back to a bare user wrapper in
    /// DM context, where no member map is present.
    pub fn member(&self, id: &str) -> Option<Member> {
        if let Some(member) = self.members.get(id) {
            let mut member = member.clone();
            if member.user.is_none() {
                member.user = self.users.get(id).cloned();
            }
            Some(member)
        } else {
            self.users.get(id).cloned().map(Member::from_user)
        }
    }
}

/// The target record of a context-menu invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedTarget {
    Member(Member),
    User(User),
    Message(PartialMessage),
}

/// An action row as it comes back in a modal submission.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmittedRow {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default)]
    pub components: Vec<SubmittedField>,
}

/// A single submitted modal field.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmittedField {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub custom_id: String,
    #[serde(default)]
    pub value: Option<String>,
}

use crate::enums::{ApplicationCommandType, CommandOptionType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The value of a choice, either a string or an integer depending on the
/// option type it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Integer(i64),
    String(String),
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// A single selectable choice of a string or integer option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandOptionChoice {
    pub name: String,
    pub value: ChoiceValue,
}

impl CommandOptionChoice {
    pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Numeric limits imposed on an integer or number option.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArgumentLimits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// A command option as the platform sees it.
///
/// `SubCommand` and `SubCommandGroup` options carry nested `options` and never
/// a value; every other kind describes a single scalar or resource-reference
/// parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<CommandOptionChoice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub autocomplete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl CommandOption {
    /// Creates an option of the given kind with empty metadata.
    pub fn new(kind: CommandOptionType, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
            choices: Vec::new(),
            options: Vec::new(),
            autocomplete: false,
            min_value: None,
            max_value: None,
        }
    }
}

/// A full command definition as exchanged with the registration API.
///
/// This is both what gets created/overwritten remotely and what the remote
/// catalog returns; [`structurally_eq`](Self::structurally_eq) is the equality
/// the registration diff uses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ApplicationCommandType,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<HashMap<String, String>>,
}

impl CommandSpec {
    pub fn new(kind: ApplicationCommandType, name: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
            default_member_permissions: None,
            dm_permission: None,
            name_localizations: None,
            description_localizations: None,
        }
    }

    /// Whether two definitions describe the same remote state, ignoring the
    /// remote-assigned id.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.description == other.description
            && self.options == other.options
            && self.default_member_permissions == other.default_member_permissions
            && self.dm_permission == other.dm_permission
            && self.name_localizations == other.name_localizations
            && self.description_localizations == other.description_localizations
    }
}

use crate::enums::{ApplicationCommandType, CommandOptionType};
use crate::followup::Followup;
use crate::interaction::{DataOption, Interaction, ResolvedData, ResolvedTarget};
use crate::parse::{Parse, ParseError};
use std::collections::HashMap;

/// The value the user is providing to the argument being autocompleted.
#[derive(Debug, Clone)]
pub struct Focused {
    /// The name of the focused option.
    pub name: String,
    /// The user input so far.
    pub input: String,
    pub kind: CommandOptionType,
}

/// Context given to all functions used to autocomplete arguments.
pub struct AutocompleteContext<'a, D> {
    /// The data shared across the framework.
    pub data: &'a D,
    /// The user input.
    pub user_input: Focused,
    /// The sibling options of the invocation, focused option included.
    pub options: &'a [DataOption],
    /// The interaction itself.
    pub interaction: &'a Interaction,
}

/// Framework context given to command and component functions, this struct
/// contains all the necessary items to read the invocation and respond to
/// the interaction.
pub struct SlashContext<'a, D> {
    /// The data shared across the framework.
    pub data: &'a D,
    /// The application id provided to the framework.
    pub application_id: &'a str,
    /// The interaction itself.
    pub interaction: Interaction,
    /// The chain of invoked subcommand names, at most two segments deep.
    pub command_path: Vec<String>,
    /// The leaf options of the invocation.
    pub options: Vec<DataOption>,
    /// The decoded custom-id state tokens of a component or modal
    /// interaction.
    pub state: Vec<String>,
    followup: Followup,
}

impl<'a, D> SlashContext<'a, D> {
    pub(crate) fn new(
        data: &'a D,
        application_id: &'a str,
        followup: Followup,
        interaction: Interaction,
        command_path: Vec<String>,
        options: Vec<DataOption>,
        state: Vec<String>,
    ) -> Self {
        Self {
            data,
            application_id,
            interaction,
            command_path,
            options,
            state,
            followup,
        }
    }

    /// Returns an owned followup handle for this interaction.
    ///
    /// The handle captured the followup token when the context was built and
    /// can outlive it, so deferred work can move it into a task or thread and
    /// edit the response later.
    pub fn followup(&self) -> Followup {
        self.followup.clone()
    }

    /// The invoking actor: the guild member, or a member wrapper around the
    /// bare user in DM context.
    pub fn author(&self) -> Option<crate::entity::Member> {
        self.interaction.author()
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.interaction.channel_id.as_deref()
    }

    pub fn guild_id(&self) -> Option<&str> {
        self.interaction.guild_id.as_deref()
    }

    fn resolved(&self) -> Option<&ResolvedData> {
        self.interaction.data.as_ref().and_then(|d| d.resolved.as_ref())
    }

    /// The values selected in a select menu interaction.
    pub fn values(&self) -> &[String] {
        self.interaction
            .data
            .as_ref()
            .map(|d| d.values.as_slice())
            .unwrap_or_default()
    }

    /// The submitted fields of a modal interaction, keyed by their custom id.
    pub fn modal_values(&self) -> HashMap<&str, &str> {
        let mut values = HashMap::new();
        if let Some(data) = &self.interaction.data {
            for row in &data.components {
                for field in &row.components {
                    if let Some(value) = &field.value {
                        values.insert(field.custom_id.as_str(), value.as_str());
                    }
                }
            }
        }
        values
    }

    /// The target record of a context-menu invocation, the single positional
    /// argument these commands bind.
    ///
    /// A target id missing from the resolved maps means the platform broke
    /// its contract and is reported as a structure mismatch.
    pub fn target(&self) -> Result<ResolvedTarget, ParseError> {
        let data = self
            .interaction
            .data
            .as_ref()
            .ok_or_else(|| ParseError::StructureMismatch("no interaction data".to_string()))?;

        let target_id = data
            .target_id
            .as_deref()
            .ok_or_else(|| ParseError::StructureMismatch("no target id".to_string()))?;
        let resolved = data.resolved.as_ref();

        match data.kind {
            Some(ApplicationCommandType::User) => {
                if let Some(member) = resolved.and_then(|r| r.members.get(target_id)) {
                    let mut member = member.clone();
                    if member.user.is_none() {
                        member.user = resolved.and_then(|r| r.users.get(target_id)).cloned();
                    }
                    Ok(ResolvedTarget::Member(member))
                } else if let Some(user) = resolved.and_then(|r| r.users.get(target_id)) {
                    Ok(ResolvedTarget::User(user.clone()))
                } else {
                    Err(ParseError::StructureMismatch(format!(
                        "target user {} not present in resolved data",
                        target_id
                    )))
                }
            }
            Some(ApplicationCommandType::Message) => resolved
                .and_then(|r| r.messages.get(target_id))
                .cloned()
                .map(ResolvedTarget::Message)
                .ok_or_else(|| {
                    ParseError::StructureMismatch(format!(
                        "target message {} not present in resolved data",
                        target_id
                    ))
                }),
            _ => Err(ParseError::StructureMismatch(
                "not a context-menu invocation".to_string(),
            )),
        }
    }
}

impl<'a, D: Send + Sync> SlashContext<'a, D> {
    /// Parses the leaf option with the given name into `T`, the keyword half
    /// of argument binding.
    ///
    /// Missing options are only an error when `T` is required; resource
    /// references are dereferenced through the resolved maps.
    pub async fn named_parse<T>(&self, name: &str) -> Result<T, ParseError>
    where
        T: Parse<D>,
    {
        let option = self.options.iter().find(|opt| opt.name == name);
        if option.is_none() && T::required() {
            Err(ParseError::StructureMismatch(format!("{} not found", name)))
        } else {
            T::parse(self.data, option.and_then(|opt| opt.value.as_ref()), self.resolved())
                .await
                .map_err(|err| err.with_name(name))
        }
    }
}

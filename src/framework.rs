use crate::builder::FrameworkBuilder;
use crate::command::{Command, CommandMap};
use crate::component_handler::ComponentHandlerMap;
use crate::context::{AutocompleteContext, Focused, SlashContext};
use crate::custom_id;
use crate::enums::{ApplicationCommandType, CommandOptionType, InteractionType};
use crate::error::{DispatchError, RegisterError};
use crate::followup::Followup;
use crate::group::GroupParentMap;
use crate::hook::{AfterHook, AutocompleteHook, BeforeHook};
use crate::http::{CommandScope, CommandsApi, DiscordHttp};
use crate::interaction::{DataOption, Interaction};
use crate::option::CommandSpec;
use crate::response::{InteractionResponse, Reply};
use crate::sync::{self, SyncReport};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// The default error used by the framework.
pub type DefaultError = Box<dyn std::error::Error + Send + Sync>;

/// A generic return type for commands provided by the framework.
pub type DefaultCommandResult = Result<Reply, DefaultError>;

/// Which interaction a reply is answering, deciding how it may be encoded.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ReplyScope {
    Command,
    Component,
    ModalSubmit,
}

/// The framework used to dispatch incoming interactions.
///
/// Built once at startup and immutable afterwards; [`process`](Self::process)
/// turns one inbound webhook payload into the response body the HTTP layer
/// should answer with.
pub struct Framework<D, E = DefaultError> {
    /// The http client used to reach the registration API.
    pub http: DiscordHttp,
    /// The application id of the client.
    pub application_id: String,
    /// Data shared across all command and hook invocations.
    pub data: D,
    /// A map of simple commands.
    pub commands: CommandMap<D, E>,
    /// A map of command groups including all children.
    pub groups: GroupParentMap<D, E>,
    /// Handlers for component activations and modal submissions.
    pub components: ComponentHandlerMap<D, E>,
    /// Autocomplete hooks keyed by command name.
    pub autocompletes: HashMap<&'static str, AutocompleteHook<D>>,
    /// A hook executed before the command.
    pub before: Option<BeforeHook<D>>,
    /// A hook executed after command's execution.
    pub after: Option<AfterHook<D, E>>,
    command_ids: Mutex<HashMap<String, String>>,
}

impl<D, E> Framework<D, E> {
    pub(crate) fn from_builder(builder: FrameworkBuilder<D, E>) -> Self {
        Self {
            http: builder.http,
            application_id: builder.application_id,
            data: builder.data,
            commands: builder.registry.commands,
            groups: builder.registry.groups,
            components: builder.registry.components,
            autocompletes: builder.registry.autocompletes,
            before: builder.before,
            after: builder.after,
            command_ids: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a new framework builder, this is a shortcut to
    /// [new](crate::builder::FrameworkBuilder::new).
    pub fn builder(
        http: DiscordHttp,
        application_id: impl Into<String>,
        data: D,
    ) -> FrameworkBuilder<D, E> {
        FrameworkBuilder::new(http, application_id, data)
    }

    /// The remote id of a registered command, populated by a successful sync.
    pub fn command_id(&self, name: &str) -> Option<String> {
        self.command_ids.lock().get(name).cloned()
    }

    /// Processes one incoming interaction, producing the response the HTTP
    /// layer should serialize back.
    pub async fn process(
        &self,
        interaction: Interaction,
    ) -> Result<InteractionResponse, DispatchError<E>> {
        match interaction.kind {
            InteractionType::Ping => Ok(InteractionResponse::pong()),
            InteractionType::ApplicationCommand => self.execute_command(interaction).await,
            InteractionType::MessageComponent => self.execute_handler(interaction, true).await,
            InteractionType::ModalSubmit => self.execute_handler(interaction, false).await,
            InteractionType::ApplicationCommandAutocomplete => {
                self.execute_autocomplete(interaction).await
            }
        }
    }

    fn context<'a>(
        &'a self,
        interaction: Interaction,
        command_path: Vec<String>,
        options: Vec<DataOption>,
        state: Vec<String>,
    ) -> SlashContext<'a, D> {
        // the followup credentials are captured by value here so the handle
        // stays valid when moved to another task or thread
        let followup = Followup::new(
            self.http.client().clone(),
            self.http.api_base_url().to_string(),
            self.application_id.clone(),
            interaction.token.clone(),
        );

        SlashContext::new(
            &self.data,
            &self.application_id,
            followup,
            interaction,
            command_path,
            options,
            state,
        )
    }

    async fn execute_command(
        &self,
        interaction: Interaction,
    ) -> Result<InteractionResponse, DispatchError<E>> {
        let data = interaction
            .data
            .clone()
            .ok_or(DispatchError::MalformedInteraction("missing interaction data"))?;
        let name = data
            .name
            .clone()
            .ok_or(DispatchError::MalformedInteraction("missing command name"))?;

        let (command, path, options) = match data.kind.unwrap_or(ApplicationCommandType::ChatInput)
        {
            ApplicationCommandType::ChatInput => self.resolve(&name, &data.options)?,
            // context-menu commands have no option tree, their single
            // argument is the resolved target
            ApplicationCommandType::User | ApplicationCommandType::Message => {
                let command = self
                    .commands
                    .get(name.as_str())
                    .ok_or_else(|| DispatchError::UnknownCommand(name.clone()))?;
                (command, Vec::new(), Vec::new())
            }
        };

        let context = self.context(interaction, path, options, Vec::new());

        let execute = if let Some(before) = &self.before {
            (before.0)(&context, command.name).await
        } else {
            true
        };

        if !execute {
            return Ok(InteractionResponse::ack());
        }

        debug!("Executing command [{}]", command.name);
        let result = (command.fun)(&context).await;

        if let Some(after) = &self.after {
            (after.0)(&context, command.name, &result).await;
        }

        let reply = result.map_err(DispatchError::Handler)?;
        encode_reply(reply, ReplyScope::Command)
    }

    /// Resolves the invoked command and the positional subcommand path of a
    /// chat-input invocation.
    fn resolve(
        &self,
        name: &str,
        options: &[DataOption],
    ) -> Result<(&Command<D, E>, Vec<String>, Vec<DataOption>), DispatchError<E>> {
        let unknown = |path: &str| DispatchError::UnknownCommand(path.to_string());

        if let Some(next) = get_next(options) {
            let group = self.groups.get(name).ok_or_else(|| unknown(name))?;
            match next.kind {
                CommandOptionType::SubCommand => {
                    let subcommands = group
                        .kind
                        .as_simple()
                        .ok_or_else(|| unknown(&format!("{} {}", name, next.name)))?;
                    let command = subcommands
                        .get(next.name.as_str())
                        .ok_or_else(|| unknown(&format!("{} {}", name, next.name)))?;

                    Ok((command, vec![next.name.clone()], next.options.clone()))
                }
                CommandOptionType::SubCommandGroup => {
                    let subcommand = get_next(&next.options).ok_or(
                        DispatchError::MalformedInteraction(
                            "subcommand group invoked without a subcommand",
                        ),
                    )?;
                    let subgroups = group
                        .kind
                        .as_group()
                        .ok_or_else(|| unknown(&format!("{} {}", name, next.name)))?;
                    let subgroup = subgroups
                        .get(next.name.as_str())
                        .ok_or_else(|| unknown(&format!("{} {}", name, next.name)))?;
                    let command = subgroup.subcommands.get(subcommand.name.as_str()).ok_or_else(
                        || unknown(&format!("{} {} {}", name, next.name, subcommand.name)),
                    )?;

                    Ok((
                        command,
                        vec![next.name.clone(), subcommand.name.clone()],
                        subcommand.options.clone(),
                    ))
                }
                _ => unreachable!(),
            }
        } else {
            let command = self.commands.get(name).ok_or_else(|| unknown(name))?;
            Ok((command, Vec::new(), options.to_vec()))
        }
    }

    async fn execute_handler(
        &self,
        interaction: Interaction,
        allow_modal: bool,
    ) -> Result<InteractionResponse, DispatchError<E>> {
        let custom_id = interaction
            .data
            .as_ref()
            .and_then(|data| data.custom_id.clone())
            .ok_or(DispatchError::MalformedInteraction("missing custom id"))?;

        let (primary, state) = custom_id::decode(&custom_id);
        let handler = self
            .components
            .get(primary)
            .ok_or_else(|| DispatchError::UnknownHandler(primary.to_string()))?;
        let state = state.into_iter().map(str::to_string).collect();

        debug!("Executing custom id handler [{}]", primary);
        let context = self.context(interaction, Vec::new(), Vec::new(), state);
        let future = handler
            .call(&context)
            .map_err(|why| DispatchError::InvalidHandlerState(why.to_string()))?;
        let reply = future.await.map_err(DispatchError::Handler)?;

        let scope = if allow_modal {
            ReplyScope::Component
        } else {
            ReplyScope::ModalSubmit
        };
        encode_reply(reply, scope)
    }

    async fn execute_autocomplete(
        &self,
        interaction: Interaction,
    ) -> Result<InteractionResponse, DispatchError<E>> {
        let data = interaction
            .data
            .as_ref()
            .ok_or(DispatchError::MalformedInteraction("missing interaction data"))?;
        let name = data
            .name
            .as_deref()
            .ok_or(DispatchError::MalformedInteraction("missing command name"))?;

        let hook = self
            .autocompletes
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        let (siblings, focused) = find_focused(&data.options)
            .ok_or(DispatchError::MalformedInteraction("no focused option"))?;
        let user_input = Focused {
            name: focused.name.clone(),
            input: focused
                .value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            kind: focused.kind,
        };

        debug!("Command [{}] executing autocomplete hook", name);
        let context = AutocompleteContext {
            data: &self.data,
            user_input,
            options: siblings,
            interaction: &interaction,
        };
        let result = (hook.0)(context).await;

        Ok(InteractionResponse::autocomplete(result))
    }

    /// Dumps every registered command and group as the wire definitions the
    /// registration API expects.
    pub fn dump_commands(&self) -> Vec<CommandSpec> {
        let mut specs: Vec<CommandSpec> = self
            .commands
            .values()
            .map(Command::dump)
            .chain(self.groups.values().map(|group| group.dump()))
            .collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Reconciles the remote catalog at `scope` with the registered command
    /// set through the given API boundary, recording the resulting remote
    /// ids.
    pub async fn sync_commands_with<A>(
        &self,
        api: &A,
        scope: &CommandScope,
    ) -> Result<SyncReport, RegisterError>
    where
        A: CommandsApi + ?Sized,
    {
        let report = sync::run(api, scope, &self.dump_commands()).await?;
        self.command_ids.lock().extend(report.ids.clone());
        Ok(report)
    }

    /// Reconciles the remote catalog at `scope` with the registered command
    /// set, diffing per command so unchanged commands keep their remote ids.
    pub async fn sync_commands(&self, scope: &CommandScope) -> Result<SyncReport, RegisterError> {
        self.sync_commands_with(&self.http, scope).await
    }

    /// Replaces the whole remote catalog at `scope` with the registered
    /// command set in a single call.
    pub async fn overwrite_commands(
        &self,
        scope: &CommandScope,
    ) -> Result<SyncReport, RegisterError> {
        let report = sync::overwrite(&self.http, scope, &self.dump_commands()).await?;
        self.command_ids.lock().extend(report.ids.clone());
        Ok(report)
    }
}

/// Gets the next [option](DataOption) only if it corresponds to a subcommand
/// or a subcommand group.
fn get_next(options: &[DataOption]) -> Option<&DataOption> {
    options.first().filter(|option| {
        option.kind == CommandOptionType::SubCommand
            || option.kind == CommandOptionType::SubCommandGroup
    })
}

/// Locates the focused option, descending through subcommand levels, and
/// returns it along with its sibling leaf options.
fn find_focused(options: &[DataOption]) -> Option<(&[DataOption], &DataOption)> {
    if let Some(next) = get_next(options) {
        return find_focused(&next.options);
    }

    options
        .iter()
        .find(|option| option.focused)
        .map(|focused| (options, focused))
}

fn encode_reply<E>(
    reply: Reply,
    scope: ReplyScope,
) -> Result<InteractionResponse, DispatchError<E>> {
    match reply {
        Reply::Ack => Ok(InteractionResponse::ack()),
        Reply::Message(message) => {
            let (kind, data) = if scope == ReplyScope::Command {
                message.dump()?
            } else {
                message.dump_handler()?
            };
            Ok(InteractionResponse::message(kind, data))
        }
        Reply::Modal(modal) => {
            if scope == ReplyScope::ModalSubmit {
                Err(DispatchError::ModalNotAllowed)
            } else {
                Ok(InteractionResponse::modal(modal))
            }
        }
    }
}

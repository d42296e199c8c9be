use crate::command::{Command, CommandMap};
use crate::component_handler::{ComponentHandler, ComponentHandlerMap};
use crate::framework::{DefaultError, Framework};
use crate::group::*;
use crate::hook::{AfterFn, AfterHook, AutocompleteFn, AutocompleteHook, BeforeFn, BeforeHook};
use crate::http::DiscordHttp;
use crate::validate;
use std::collections::HashMap;

/// An http-less registry of commands and handlers, mergeable into a
/// [`FrameworkBuilder`]. Useful for splitting a bot across multiple files.
///
/// Name collisions are rejected: registering or merging a duplicate
/// top-level command name, custom id or autocomplete target is a
/// configuration error and panics at startup.
pub struct Blueprint<D, E = DefaultError> {
    /// The actual commands, only the simple ones.
    pub commands: CommandMap<D, E>,
    /// All groups containing commands.
    pub groups: GroupParentMap<D, E>,
    /// Handlers for component activations and modal submissions, keyed by
    /// the leading custom-id token.
    pub components: ComponentHandlerMap<D, E>,
    /// Autocomplete hooks keyed by command name.
    pub autocompletes: HashMap<&'static str, AutocompleteHook<D>>,
}

impl<D, E> Default for Blueprint<D, E> {
    fn default() -> Self {
        Self {
            commands: Default::default(),
            groups: Default::default(),
            components: Default::default(),
            autocompletes: Default::default(),
        }
    }
}

impl<D, E> Blueprint<D, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new command, validating its metadata eagerly.
    pub fn command(mut self, command: Command<D, E>) -> Self {
        if let Err(why) = validate::command(&command.dump()) {
            panic!("invalid command: {}", why);
        }
        if self.commands.contains_key(command.name) || self.groups.contains_key(command.name) {
            panic!("{} already registered", command.name);
        }
        self.commands.insert(command.name, command);
        self
    }

    /// Registers a new group of commands.
    pub fn group<F>(mut self, fun: F) -> Self
    where
        F: FnOnce(&mut GroupParentBuilder<D, E>) -> &mut GroupParentBuilder<D, E>,
    {
        let mut builder = GroupParentBuilder::new();
        fun(&mut builder);
        let group = builder.build();

        if let Err(why) = validate::command(&group.dump()) {
            panic!("invalid group: {}", why);
        }
        if self.commands.contains_key(group.name) || self.groups.contains_key(group.name) {
            panic!("{} already registered", group.name);
        }
        self.groups.insert(group.name, group);

        self
    }

    /// Registers a handler for components carrying the given leading
    /// custom-id token.
    pub fn component(mut self, custom_id: &'static str, handler: ComponentHandler<D, E>) -> Self {
        if self.components.contains_key(custom_id) {
            panic!("component handler {} already registered", custom_id);
        }
        self.components.insert(custom_id, handler);
        self
    }

    /// Registers the autocomplete hook answering requests for the given
    /// command.
    pub fn autocomplete(mut self, command_name: &'static str, fun: AutocompleteFn<D>) -> Self {
        if self.autocompletes.contains_key(command_name) {
            panic!("autocomplete hook for {} already registered", command_name);
        }
        self.autocompletes.insert(command_name, AutocompleteHook(fun));
        self
    }

    /// Merges another blueprint into this one, panicking on any name
    /// collision.
    pub fn merge(&mut self, other: Blueprint<D, E>) {
        for (name, command) in other.commands {
            if self.commands.contains_key(name) || self.groups.contains_key(name) {
                panic!("{} already registered", name);
            }
            self.commands.insert(name, command);
        }
        for (name, group) in other.groups {
            if self.commands.contains_key(name) || self.groups.contains_key(name) {
                panic!("{} already registered", name);
            }
            self.groups.insert(name, group);
        }
        for (custom_id, handler) in other.components {
            if self.components.contains_key(custom_id) {
                panic!("component handler {} already registered", custom_id);
            }
            self.components.insert(custom_id, handler);
        }
        for (name, hook) in other.autocompletes {
            if self.autocompletes.contains_key(name) {
                panic!("autocomplete hook for {} already registered", name);
            }
            self.autocompletes.insert(name, hook);
        }
    }
}

/// A builder used to set all options before framework initialization.
pub struct FrameworkBuilder<D, E = DefaultError> {
    /// The http client used by the framework.
    pub http: DiscordHttp,
    /// The application id of the client.
    pub application_id: String,
    /// Data that will be available to all commands.
    pub data: D,
    /// Everything registered so far.
    pub registry: Blueprint<D, E>,
    /// A hook executed before any command.
    pub before: Option<BeforeHook<D>>,
    /// A hook executed after command's completion.
    pub after: Option<AfterHook<D, E>>,
}

impl<D, E> FrameworkBuilder<D, E> {
    /// Creates a new [Builder](self::FrameworkBuilder).
    pub fn new(http: DiscordHttp, application_id: impl Into<String>, data: D) -> Self {
        Self {
            http,
            application_id: application_id.into(),
            data,
            registry: Blueprint::new(),
            before: None,
            after: None,
        }
    }

    /// Set the hook that will be executed before commands.
    pub fn before(mut self, fun: BeforeFn<D>) -> Self {
        self.before = Some(BeforeHook(fun));
        self
    }

    /// Set the hook that will be executed after command's completion.
    pub fn after(mut self, fun: AfterFn<D, E>) -> Self {
        self.after = Some(AfterHook(fun));
        self
    }

    /// Registers a new command in the framework.
    ///
    /// ```rust,no_run
    /// use parley::prelude::*;
    ///
    /// fn ping<'a>(_ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    ///     Box::pin(async move { Ok(Reply::from("Pong!")) })
    /// }
    ///
    /// let http = DiscordHttp::new("client id", "client secret");
    /// let framework = Framework::<()>::builder(http, "application id", ())
    ///     .command(Command::new(ping).name("ping").description("Responds with pong"))
    ///     .build();
    /// ```
    pub fn command(mut self, command: Command<D, E>) -> Self {
        self.registry = self.registry.command(command);
        self
    }

    /// Registers a new group of commands.
    pub fn group<F>(mut self, fun: F) -> Self
    where
        F: FnOnce(&mut GroupParentBuilder<D, E>) -> &mut GroupParentBuilder<D, E>,
    {
        self.registry = self.registry.group(fun);
        self
    }

    /// Registers a handler for components carrying the given leading
    /// custom-id token.
    pub fn component(mut self, custom_id: &'static str, handler: ComponentHandler<D, E>) -> Self {
        self.registry = self.registry.component(custom_id, handler);
        self
    }

    /// Registers the autocomplete hook answering requests for the given
    /// command.
    pub fn autocomplete(mut self, command_name: &'static str, fun: AutocompleteFn<D>) -> Self {
        self.registry = self.registry.autocomplete(command_name, fun);
        self
    }

    /// Merges a [`Blueprint`] into this builder.
    pub fn blueprint(mut self, blueprint: Blueprint<D, E>) -> Self {
        self.registry.merge(blueprint);
        self
    }

    /// Builds the framework, returning a [Framework](crate::framework::Framework).
    pub fn build(self) -> Framework<D, E> {
        Framework::from_builder(self)
    }
}

/// A builder of a [group parent](crate::group::GroupParent), see it for
/// documentation.
pub struct GroupParentBuilder<D, E> {
    name: Option<&'static str>,
    description: Option<&'static str>,
    kind: ParentType<D, E>,
    default_member_permissions: Option<String>,
    dm_permission: Option<bool>,
}

impl<D, E> GroupParentBuilder<D, E> {
    pub(crate) fn new() -> Self {
        Self {
            name: None,
            description: None,
            kind: ParentType::Group(Default::default()),
            default_member_permissions: None,
            dm_permission: None,
        }
    }

    /// Sets the name of this parent group.
    pub fn name(&mut self, name: &'static str) -> &mut Self {
        self.name = Some(name);
        self
    }

    /// Sets the description of this parent group.
    pub fn description(&mut self, description: &'static str) -> &mut Self {
        self.description = Some(description);
        self
    }

    pub fn default_member_permissions(&mut self, permissions: impl Into<String>) -> &mut Self {
        self.default_member_permissions = Some(permissions.into());
        self
    }

    pub fn dm_permission(&mut self, allow: bool) -> &mut Self {
        self.dm_permission = Some(allow);
        self
    }

    /// Sets this parent group as a [group](crate::group::ParentType::Group),
    /// allowing to create subcommand groups inside of it.
    pub fn group<F>(&mut self, fun: F) -> &mut Self
    where
        F: FnOnce(&mut CommandGroupBuilder<D, E>) -> &mut CommandGroupBuilder<D, E>,
    {
        let mut builder = CommandGroupBuilder::new();
        fun(&mut builder);
        let built = builder.build();

        if let ParentType::Group(map) = &mut self.kind {
            assert!(!map.contains_key(built.name), "{} already registered", built.name);
            map.insert(built.name, built);
        } else {
            let mut map = CommandGroupMap::new();
            map.insert(built.name, built);
            self.kind = ParentType::Group(map);
        }
        self
    }

    /// Sets this parent group as [simple](crate::group::ParentType::Simple),
    /// only allowing subcommands.
    pub fn command(&mut self, command: Command<D, E>) -> &mut Self {
        if let ParentType::Simple(map) = &mut self.kind {
            assert!(!map.contains_key(command.name), "{} already registered", command.name);
            map.insert(command.name, command);
        } else {
            let mut map = CommandMap::new();
            map.insert(command.name, command);
            self.kind = ParentType::Simple(map);
        }
        self
    }

    /// Builds this parent group, returning a
    /// [group parent](crate::group::GroupParent).
    pub fn build(self) -> GroupParent<D, E> {
        assert!(self.name.is_some() && self.description.is_some());
        GroupParent {
            name: self.name.unwrap(),
            description: self.description.unwrap(),
            kind: self.kind,
            default_member_permissions: self.default_member_permissions,
            dm_permission: self.dm_permission,
        }
    }
}

/// A builder for a [command group](crate::group::CommandGroup), see it for
/// documentation.
pub struct CommandGroupBuilder<D, E> {
    name: Option<&'static str>,
    description: Option<&'static str>,
    subcommands: CommandMap<D, E>,
}

impl<D, E> CommandGroupBuilder<D, E> {
    pub(crate) fn new() -> Self {
        Self {
            name: None,
            description: None,
            subcommands: Default::default(),
        }
    }

    /// Sets the upper command of this group.
    pub fn name(&mut self, name: &'static str) -> &mut Self {
        self.name = Some(name);
        self
    }

    /// Sets the description of this group.
    pub fn description(&mut self, description: &'static str) -> &mut Self {
        self.description = Some(description);
        self
    }

    /// Adds a command to this group.
    pub fn command(&mut self, command: Command<D, E>) -> &mut Self {
        self.subcommands.insert(command.name, command);
        self
    }

    /// Builds the builder into a [group](crate::group::CommandGroup).
    pub(crate) fn build(self) -> CommandGroup<D, E> {
        assert!(self.name.is_some() && self.description.is_some());

        CommandGroup {
            name: self.name.unwrap(),
            description: self.description.unwrap(),
            subcommands: self.subcommands,
        }
    }
}

use crate::context::{AutocompleteContext, SlashContext};
use crate::response::{AutocompleteResult, Reply};
use crate::BoxFuture;

/// A pointer to a function used by [before hook](BeforeHook).
pub type BeforeFn<D> = for<'a> fn(&'a SlashContext<'a, D>, &'a str) -> BoxFuture<'a, bool>;

/// A hook executed before a command.
///
/// The function receives the context and the name of the command about to
/// execute; returning `false` skips the command and answers the interaction
/// with an empty acknowledgement.
pub struct BeforeHook<D>(pub BeforeFn<D>);

/// A pointer to a function used by [after hook](AfterHook).
pub type AfterFn<D, E> =
    for<'a> fn(&'a SlashContext<'a, D>, &'a str, &'a Result<Reply, E>) -> BoxFuture<'a, ()>;

/// A hook executed after a command, receiving the command's name and a
/// reference to its output.
pub struct AfterHook<D, E>(pub AfterFn<D, E>);

/// A pointer to a function used by [autocomplete hook](AutocompleteHook).
pub type AutocompleteFn<D> =
    for<'a> fn(AutocompleteContext<'a, D>) -> BoxFuture<'a, AutocompleteResult>;

/// A hook used to suggest inputs to the command caller.
///
/// Hooks are registered per command name; the context carries the focused
/// option and its sibling values.
pub struct AutocompleteHook<D>(pub AutocompleteFn<D>);

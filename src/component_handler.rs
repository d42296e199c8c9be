use crate::context::SlashContext;
use crate::custom_id::{ParseToken, TokenError};
use crate::response::Reply;
use crate::BoxFuture;
use std::collections::HashMap;

/// A map of [component handlers](self::ComponentHandler) keyed by the leading
/// token of the custom ids they answer.
pub type ComponentHandlerMap<D, E> = HashMap<&'static str, ComponentHandler<D, E>>;

/// A pointer to a component handler without state parameters.
pub type ComponentFn<D, E> = for<'a> fn(&'a SlashContext<'a, D>) -> BoxFuture<'a, Result<Reply, E>>;
/// A pointer to a component handler with one state parameter.
pub type ComponentFn1<D, E, T1> =
    for<'a> fn(&'a SlashContext<'a, D>, T1) -> BoxFuture<'a, Result<Reply, E>>;
/// A pointer to a component handler with two state parameters.
pub type ComponentFn2<D, E, T1, T2> =
    for<'a> fn(&'a SlashContext<'a, D>, T1, T2) -> BoxFuture<'a, Result<Reply, E>>;
/// A pointer to a component handler with three state parameters.
pub type ComponentFn3<D, E, T1, T2, T3> =
    for<'a> fn(&'a SlashContext<'a, D>, T1, T2, T3) -> BoxFuture<'a, Result<Reply, E>>;
/// A pointer to a component handler with four state parameters.
pub type ComponentFn4<D, E, T1, T2, T3, T4> =
    for<'a> fn(&'a SlashContext<'a, D>, T1, T2, T3, T4) -> BoxFuture<'a, Result<Reply, E>>;

/// Object-safe form of a component handler: coerce the context's state
/// tokens, then call the wrapped function.
trait ErasedComponent<D, E>: Send + Sync {
    fn call<'a>(
        &'a self,
        ctx: &'a SlashContext<'a, D>,
    ) -> Result<BoxFuture<'a, Result<Reply, E>>, TokenError>;
}

/// A handler for component activations and modal submissions.
///
/// The constructors take plain `fn` pointers whose trailing parameters are
/// coerced from the decoded custom-id state tokens before the call, so a
/// handler declares the state it expects as ordinary typed parameters:
///
/// ```rust,no_run
/// use parley::prelude::*;
///
/// fn click<'a>(_ctx: &'a SlashContext<'a, ()>, count: i64) -> BoxFuture<'a, DefaultCommandResult> {
///     Box::pin(async move {
///         let next = parley::custom_id::encode("click", [count + 1])?;
///         Ok(Reply::from(format!("clicked {} times ({})", count, next)))
///     })
/// }
///
/// let handler = ComponentHandler::new1(click);
/// ```
pub struct ComponentHandler<D, E> {
    inner: Box<dyn ErasedComponent<D, E>>,
}

impl<D, E> ComponentHandler<D, E> {
    pub(crate) fn call<'a>(
        &'a self,
        ctx: &'a SlashContext<'a, D>,
    ) -> Result<BoxFuture<'a, Result<Reply, E>>, TokenError> {
        self.inner.call(ctx)
    }
}

struct Arity0<D, E> {
    fun: ComponentFn<D, E>,
}

impl<D, E> ErasedComponent<D, E> for Arity0<D, E> {
    fn call<'a>(
        &'a self,
        ctx: &'a SlashContext<'a, D>,
    ) -> Result<BoxFuture<'a, Result<Reply, E>>, TokenError> {
        Ok((self.fun)(ctx))
    }
}

impl<D: 'static, E: 'static> ComponentHandler<D, E> {
    /// Wraps a handler that carries no custom-id state.
    pub fn new(fun: ComponentFn<D, E>) -> Self {
        Self {
            inner: Box::new(Arity0 { fun }),
        }
    }
}

macro_rules! impl_component_arity {
    ($(#[$meta:meta])* $method:ident, $wrapper:ident, $alias:ident $(, $ty:ident)*) => {
        struct $wrapper<D, E $(, $ty)*> {
            fun: $alias<D, E $(, $ty)*>,
        }

        impl<D, E $(, $ty)*> ErasedComponent<D, E> for $wrapper<D, E $(, $ty)*>
        where
            $($ty: ParseToken + Send + Sync + 'static,)*
        {
            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call<'a>(
                &'a self,
                ctx: &'a SlashContext<'a, D>,
            ) -> Result<BoxFuture<'a, Result<Reply, E>>, TokenError> {
                let mut tokens = ctx.state.iter().map(String::as_str);
                $(let $ty = <$ty as ParseToken>::parse_token(tokens.next())?;)*
                Ok((self.fun)(ctx $(, $ty)*))
            }
        }

        impl<D: 'static, E: 'static> ComponentHandler<D, E> {
            $(#[$meta])*
            pub fn $method<$($ty),*>(fun: $alias<D, E $(, $ty)*>) -> Self
            where
                $($ty: ParseToken + Send + Sync + 'static,)*
            {
                Self {
                    inner: Box::new($wrapper { fun }),
                }
            }
        }
    };
}

impl_component_arity! {
    /// Wraps a handler with one state parameter.
    new1, Arity1, ComponentFn1, T1
}
impl_component_arity! {
    /// Wraps a handler with two state parameters.
    new2, Arity2, ComponentFn2, T1, T2
}
impl_component_arity! {
    /// Wraps a handler with three state parameters.
    new3, Arity3, ComponentFn3, T1, T2, T3
}
impl_component_arity! {
    /// Wraps a handler with four state parameters.
    new4, Arity4, ComponentFn4, T1, T2, T3, T4
}

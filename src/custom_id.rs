//! The stateful custom-id codec.
//!
//! A custom id packs a handler routing key plus zero or more small state
//! tokens into the single bounded string the platform round-trips on
//! component activation. Tokens are joined with a newline, which is therefore
//! forbidden inside any individual token.

use crate::error::BuildError;
use crate::validate::CUSTOM_ID_LENGTH_MAX;
use std::fmt;

/// The reserved token separator.
pub const SEPARATOR: char = '\n';

/// Encodes a handler id and its state tokens into one custom id.
///
/// Keep encoded state small (ids, counters); the total length is capped at
/// 100 characters. Boolean state must be written as the literals `True`,
/// `False` or `None`, which is what [`ParseToken`] coerces back.
///
/// ```rust
/// # use parley::custom_id;
/// let id = custom_id::encode("click", [1]).unwrap();
/// assert_eq!(id, "click\n1");
/// ```
pub fn encode<I>(handler_id: &str, state: I) -> Result<String, BuildError>
where
    I: IntoIterator,
    I::Item: ToString,
{
    if handler_id.contains(SEPARATOR) {
        return Err(BuildError::SeparatorInToken);
    }

    let mut encoded = handler_id.to_string();
    for token in state {
        let token = token.to_string();
        if token.contains(SEPARATOR) {
            return Err(BuildError::SeparatorInToken);
        }
        encoded.push(SEPARATOR);
        encoded.push_str(&token);
    }

    if encoded.chars().count() > CUSTOM_ID_LENGTH_MAX {
        return Err(BuildError::CustomIdTooLong(encoded.chars().count()));
    }

    Ok(encoded)
}

/// Splits a custom id back into its handler routing key and state tokens.
pub fn decode(custom_id: &str) -> (&str, Vec<&str>) {
    let mut parts = custom_id.split(SEPARATOR);
    let primary = parts.next().unwrap_or_default();
    (primary, parts.collect())
}

/// Error produced when a state token cannot be coerced to a handler
/// parameter's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenError {
    pub token: Option<String>,
    pub expected: &'static str,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "cannot coerce token {:?} to {}", token, self.expected),
            None => write!(f, "missing state token for a {} parameter", self.expected),
        }
    }
}

impl std::error::Error for TokenError {}

/// Coercion of one custom-id state token to a handler parameter type.
///
/// Integers parse from their decimal form; booleans use the three-way
/// literal mapping `True`/`False`/`None`, of which `None` is only legal for
/// an `Option` parameter.
pub trait ParseToken: Sized {
    fn parse_token(token: Option<&str>) -> Result<Self, TokenError>;
}

impl ParseToken for String {
    fn parse_token(token: Option<&str>) -> Result<Self, TokenError> {
        token.map(str::to_string).ok_or(TokenError {
            token: None,
            expected: "String",
        })
    }
}

impl ParseToken for bool {
    fn parse_token(token: Option<&str>) -> Result<Self, TokenError> {
        match token {
            Some("True") => Ok(true),
            Some("False") => Ok(false),
            other => Err(TokenError {
                token: other.map(str::to_string),
                expected: "bool",
            }),
        }
    }
}

impl<T: ParseToken> ParseToken for Option<T> {
    fn parse_token(token: Option<&str>) -> Result<Self, TokenError> {
        match token {
            None | Some("None") => Ok(None),
            some => T::parse_token(some).map(Some),
        }
    }
}

macro_rules! impl_parse_token {
    ($($ty:ty),* $(,)?) => {$(
        impl ParseToken for $ty {
            fn parse_token(token: Option<&str>) -> Result<Self, TokenError> {
                token
                    .ok_or(TokenError { token: None, expected: stringify!($ty) })?
                    .parse()
                    .map_err(|_| TokenError {
                        token: token.map(str::to_string),
                        expected: stringify!($ty),
                    })
            }
        }
    )*};
}

impl_parse_token! {
    i8, i16, i32, i64, isize,
    u8, u16, u32, u64, usize,
    f32, f64,
}

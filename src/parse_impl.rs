use crate::entity::{Attachment, Channel, Member, Role, User};
use crate::enums::CommandOptionType;
use crate::interaction::{OptionValue, ResolvedData};
use crate::option::ArgumentLimits;
use crate::prelude::*;
use std::ops::{Deref, DerefMut};

const NUMBER_MAX_VALUE: i64 = 9007199254740991;

pub(crate) fn error(type_name: &str, required: bool, why: &str) -> ParseError {
    ParseError::Parsing {
        argument_name: String::new(),
        required,
        argument_type: type_name.to_string(),
        error: why.to_string(),
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for String {
    async fn parse(
        _: &T,
        value: Option<&OptionValue>,
        _: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        if let Some(OptionValue::String(s)) = value {
            return Ok(s.to_owned());
        }
        Err(error("String", true, "String expected"))
    }

    fn kind() -> CommandOptionType {
        CommandOptionType::String
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for i64 {
    async fn parse(
        _: &T,
        value: Option<&OptionValue>,
        _: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        if let Some(OptionValue::Integer(i)) = value {
            return Ok(*i);
        }
        Err(error("i64", true, "Integer expected"))
    }

    fn kind() -> CommandOptionType {
        CommandOptionType::Integer
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for u64 {
    async fn parse(
        _: &T,
        value: Option<&OptionValue>,
        _: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        if let Some(OptionValue::Integer(i)) = value {
            if *i < 0 {
                return Err(error("u64", true, "Input out of range"));
            }
            return Ok(*i as u64);
        }
        Err(error("Integer", true, "Integer expected"))
    }

    fn kind() -> CommandOptionType {
        CommandOptionType::Integer
    }

    fn limits() -> Option<ArgumentLimits> {
        Some(ArgumentLimits {
            min: Some(0.0),
            max: None,
        })
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for f64 {
    async fn parse(
        _: &T,
        value: Option<&OptionValue>,
        _: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        match value {
            Some(OptionValue::Number(n)) => Ok(*n),
            // the platform sends whole numbers without a decimal point
            Some(OptionValue::Integer(i)) => Ok(*i as f64),
            _ => Err(error("f64", true, "Number expected")),
        }
    }

    fn kind() -> CommandOptionType {
        CommandOptionType::Number
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for f32 {
    async fn parse(
        data: &T,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        let n = f64::parse(data, value, resolved).await?;
        if n > f32::MAX as f64 || n < f32::MIN as f64 {
            return Err(error("f32", true, "Input out of range"));
        }
        Ok(n as f32)
    }

    fn kind() -> CommandOptionType {
        CommandOptionType::Number
    }

    fn limits() -> Option<ArgumentLimits> {
        Some(ArgumentLimits {
            min: Some(f32::MIN as f64),
            max: Some(f32::MAX as f64),
        })
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for bool {
    async fn parse(
        _: &T,
        value: Option<&OptionValue>,
        _: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        if let Some(OptionValue::Boolean(b)) = value {
            return Ok(*b);
        }
        Err(error("Boolean", true, "Boolean expected"))
    }

    fn kind() -> CommandOptionType {
        CommandOptionType::Boolean
    }
}

macro_rules! newtype_id {
    ($($(#[$meta:meta])* $v:vis struct $name:ident => $kind:expr, $expected:literal),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        $v struct $name(pub String);

        impl Deref for $name {
            type Target = String;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        #[async_trait]
        impl<T: Send + Sync> Parse<T> for $name {
            async fn parse(
                _: &T,
                value: Option<&OptionValue>,
                _: Option<&ResolvedData>,
            ) -> Result<Self, ParseError> {
                value
                    .and_then(OptionValue::as_id)
                    .map(|id| Self(id.to_string()))
                    .ok_or_else(|| error(stringify!($name), true, concat!($expected, " expected")))
            }

            fn kind() -> CommandOptionType {
                $kind
            }
        }
    )*};
}

newtype_id! {
    /// The raw id of a user passed as an option.
    pub struct UserId => CommandOptionType::User, "User",
    /// The raw id of a channel passed as an option.
    pub struct ChannelId => CommandOptionType::Channel, "Channel",
    /// The raw id of a role passed as an option.
    pub struct RoleId => CommandOptionType::Role, "Role",
    /// The raw id of an attachment passed as an option.
    pub struct AttachmentId => CommandOptionType::Attachment, "Attachment",
    /// The raw id of a user or role passed as a mentionable option.
    pub struct MentionableId => CommandOptionType::Mentionable, "Mentionable",
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for User {
    async fn parse(
        data: &T,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        let id = UserId::parse(data, value, None).await?;

        resolved
            .and_then(|items| items.users.get(&*id))
            .cloned()
            .ok_or_else(|| error("User", true, "User expected"))
    }

    fn kind() -> CommandOptionType {
        <UserId as Parse<T>>::kind()
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for Member {
    async fn parse(
        data: &T,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        let id = UserId::parse(data, value, None).await?;

        resolved
            .and_then(|items| items.member(&id))
            .ok_or_else(|| error("Member", true, "Member expected"))
    }

    fn kind() -> CommandOptionType {
        <UserId as Parse<T>>::kind()
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for Channel {
    async fn parse(
        data: &T,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        let id = ChannelId::parse(data, value, None).await?;

        resolved
            .and_then(|items| items.channels.get(&*id))
            .cloned()
            .ok_or_else(|| error("Channel", true, "Channel expected"))
    }

    fn kind() -> CommandOptionType {
        <ChannelId as Parse<T>>::kind()
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for Role {
    async fn parse(
        data: &T,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        let id = RoleId::parse(data, value, None).await?;

        resolved
            .and_then(|items| items.roles.get(&*id))
            .cloned()
            .ok_or_else(|| error("Role", true, "Role expected"))
    }

    fn kind() -> CommandOptionType {
        <RoleId as Parse<T>>::kind()
    }
}

#[async_trait]
impl<T: Send + Sync> Parse<T> for Attachment {
    async fn parse(
        data: &T,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        let id = AttachmentId::parse(data, value, None).await?;

        resolved
            .and_then(|items| items.attachments.get(&*id))
            .cloned()
            .ok_or_else(|| error("Attachment", true, "Attachment expected"))
    }

    fn kind() -> CommandOptionType {
        <AttachmentId as Parse<T>>::kind()
    }
}

#[async_trait]
impl<T: Parse<E>, E: Send + Sync> Parse<E> for Option<T> {
    async fn parse(
        data: &E,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        match T::parse(data, value, resolved).await {
            Ok(parsed) => Ok(Some(parsed)),
            Err(mut why) => {
                if value.is_some() {
                    if let ParseError::Parsing { required, .. } = &mut why {
                        *required = false;
                    }

                    Err(why)
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn kind() -> CommandOptionType {
        T::kind()
    }

    fn required() -> bool {
        false
    }

    fn choices() -> Option<Vec<CommandOptionChoice>> {
        T::choices()
    }

    fn limits() -> Option<ArgumentLimits> {
        T::limits()
    }
}

#[async_trait]
impl<T, E, C> Parse<C> for Result<T, E>
where
    T: Parse<C>,
    E: From<ParseError>,
    C: Send + Sync,
{
    async fn parse(
        data: &C,
        value: Option<&OptionValue>,
        resolved: Option<&ResolvedData>,
    ) -> Result<Self, ParseError> {
        // as we want to return the error if occurs, we'll map the error and always return Ok
        Ok(T::parse(data, value, resolved).await.map_err(From::from))
    }

    fn kind() -> CommandOptionType {
        T::kind()
    }

    fn required() -> bool {
        T::required()
    }

    fn choices() -> Option<Vec<CommandOptionChoice>> {
        T::choices()
    }

    fn limits() -> Option<ArgumentLimits> {
        T::limits()
    }
}

macro_rules! impl_derived_parse {
    ($([$($derived:ty),+] from $prim:ty),* $(,)?) => {
        $($(
            #[async_trait]
            impl<T: Send + Sync> Parse<T> for $derived {
                async fn parse(
                    data: &T,
                    value: Option<&OptionValue>,
                    resolved: Option<&ResolvedData>,
                ) -> Result<Self, ParseError> {
                    let p = <$prim>::parse(data, value, resolved).await?;

                    if p > <$derived>::MAX as $prim {
                        Err(error(
                            stringify!($derived),
                            true,
                            concat!(
                                "Failed to parse to ",
                                stringify!($derived),
                                ": the value is greater than ",
                                stringify!($derived),
                                "'s ",
                                "range of values"
                            )
                        ))
                    } else if p < <$derived>::MIN as $prim {
                        Err(error(
                            stringify!($derived),
                            true,
                            concat!(
                                "Failed to parse to ",
                                stringify!($derived),
                                ": the value is less than ",
                                stringify!($derived),
                                "'s ",
                                "range of values"
                            )
                        ))
                    } else {
                        Ok(p as $derived)
                    }
                }

                fn kind() -> CommandOptionType {
                    <$prim as Parse<T>>::kind()
                }

                fn limits() -> Option<ArgumentLimits> {
                    Some(ArgumentLimits {
                        min: Some(<$derived>::MIN as f64),
                        max: Some({
                            if <$derived>::MAX as i64 > NUMBER_MAX_VALUE {
                                NUMBER_MAX_VALUE as f64
                            } else {
                                <$derived>::MAX as f64
                            }
                        }),
                    })
                }
            }
        )*)*
    };
}

impl_derived_parse! {
    [i8, i16, i32, isize] from i64,
    [u8, u16, u32, usize] from u64,
}

/// Declares a closed-choice option type.
///
/// The generated enum parses from a `String` or `Integer` option whose wire
/// value must be one of the declared members, and exposes the member list as
/// the option's choices:
///
/// ```rust
/// use parley::command_choices;
///
/// command_choices! {
///     pub enum Animal: String {
///         Dog: "Dog" => "dog",
///         Cat: "Cat" => "cat",
///     }
///
///     pub enum Priority: Integer {
///         Low: "Low" => 1,
///         High: "High" => 2,
///     }
/// }
/// ```
#[macro_export]
macro_rules! command_choices {
    () => {};
    ($(#[$meta:meta])* $vis:vis enum $name:ident: String { $($variant:ident: $label:literal => $value:literal),* $(,)? } $($rest:tt)*) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            /// The wire value of this choice.
            pub fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)*
                }
            }
        }

        #[$crate::async_trait]
        impl<T: Send + Sync> $crate::parse::Parse<T> for $name {
            async fn parse(
                _: &T,
                value: Option<&$crate::interaction::OptionValue>,
                _: Option<&$crate::interaction::ResolvedData>,
            ) -> Result<Self, $crate::parse::ParseError> {
                match value {
                    $(Some($crate::interaction::OptionValue::String(s)) if s == $value => Ok(Self::$variant),)*
                    _ => Err($crate::parse::ParseError::StructureMismatch(
                        concat!("invalid choice for ", stringify!($name)).to_string(),
                    )),
                }
            }

            fn kind() -> $crate::enums::CommandOptionType {
                $crate::enums::CommandOptionType::String
            }

            fn choices() -> Option<Vec<$crate::option::CommandOptionChoice>> {
                Some(vec![
                    $($crate::option::CommandOptionChoice::new($label, $value),)*
                ])
            }
        }

        $crate::command_choices!($($rest)*);
    };
    ($(#[$meta:meta])* $vis:vis enum $name:ident: Integer { $($variant:ident: $label:literal => $value:literal),* $(,)? } $($rest:tt)*) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            /// The wire value of this choice.
            pub fn value(self) -> i64 {
                match self {
                    $(Self::$variant => $value,)*
                }
            }
        }

        #[$crate::async_trait]
        impl<T: Send + Sync> $crate::parse::Parse<T> for $name {
            async fn parse(
                _: &T,
                value: Option<&$crate::interaction::OptionValue>,
                _: Option<&$crate::interaction::ResolvedData>,
            ) -> Result<Self, $crate::parse::ParseError> {
                match value {
                    $(Some($crate::interaction::OptionValue::Integer(i)) if *i == $value => Ok(Self::$variant),)*
                    _ => Err($crate::parse::ParseError::StructureMismatch(
                        concat!("invalid choice for ", stringify!($name)).to_string(),
                    )),
                }
            }

            fn kind() -> $crate::enums::CommandOptionType {
                $crate::enums::CommandOptionType::Integer
            }

            fn choices() -> Option<Vec<$crate::option::CommandOptionChoice>> {
                Some(vec![
                    $($crate::option::CommandOptionChoice::new($label, $value as i64),)*
                ])
            }
        }

        $crate::command_choices!($($rest)*);
    };
}

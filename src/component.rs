use crate::enums::{ButtonStyle, ComponentType, TextInputStyle};
use crate::error::BuildError;
use crate::validate::CUSTOM_ID_LENGTH_MAX;
use serde::Serialize;

fn check_custom_id(custom_id: &str) -> Result<(), BuildError> {
    if custom_id.chars().count() > CUSTOM_ID_LENGTH_MAX {
        return Err(BuildError::CustomIdTooLong(custom_id.chars().count()));
    }
    Ok(())
}

/// A message component other than an action row.
///
/// Rows cannot nest, which this enum encodes by simply not having an
/// `ActionRow` variant.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Component {
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
}

impl Component {
    fn kind(&self) -> ComponentType {
        match self {
            Self::Button(_) => ComponentType::Button,
            Self::SelectMenu(_) => ComponentType::SelectMenu,
            Self::TextInput(_) => ComponentType::TextInput,
        }
    }
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<SelectMenu> for Component {
    fn from(menu: SelectMenu) -> Self {
        Self::SelectMenu(menu)
    }
}

impl From<TextInput> for Component {
    fn from(input: TextInput) -> Self {
        Self::TextInput(input)
    }
}

/// A horizontal row of components: up to five buttons, or exactly one select
/// menu.
#[derive(Clone, Debug, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Result<Self, BuildError> {
        if components.is_empty() || components.len() > 5 {
            return Err(BuildError::InvalidComponent(
                "an action row holds between 1 and 5 components",
            ));
        }

        if components
            .iter()
            .any(|c| c.kind() == ComponentType::SelectMenu)
            && components.len() > 1
        {
            return Err(BuildError::InvalidComponent(
                "a select menu must be the only child of its action row",
            ));
        }

        Ok(Self {
            kind: ComponentType::ActionRow,
            components,
        })
    }

    /// A row holding a single component.
    pub fn single(component: impl Into<Component>) -> Self {
        Self {
            kind: ComponentType::ActionRow,
            components: vec![component.into()],
        }
    }
}

/// A clickable button.
#[derive(Clone, Debug, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Button {
    /// A button carrying a custom id, routed back to a registered handler on
    /// click.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>) -> Result<Self, BuildError> {
        let custom_id = custom_id.into();
        check_custom_id(&custom_id)?;

        Ok(Self {
            kind: ComponentType::Button,
            style: ButtonStyle::Primary,
            label: Some(label.into()),
            custom_id: Some(custom_id),
            url: None,
            disabled: false,
        })
    }

    /// A link button; link buttons carry a url instead of a custom id and
    /// never reach a handler.
    pub fn link(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: ComponentType::Button,
            style: ButtonStyle::Link,
            label: Some(label.into()),
            custom_id: None,
            url: Some(url.into()),
            disabled: false,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// One option of a select menu.
#[derive(Clone, Debug, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            default: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

/// A dropdown menu; selected values reach the handler through the
/// interaction's `values`.
#[derive(Clone, Debug, Serialize)]
pub struct SelectMenu {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub custom_id: String,
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub min_values: u8,
    pub max_values: u8,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl SelectMenu {
    pub fn new(
        custom_id: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Result<Self, BuildError> {
        let custom_id = custom_id.into();
        check_custom_id(&custom_id)?;

        if options.is_empty() || options.len() > 25 {
            return Err(BuildError::InvalidComponent(
                "a select menu holds between 1 and 25 options",
            ));
        }

        Ok(Self {
            kind: ComponentType::SelectMenu,
            custom_id,
            options,
            placeholder: None,
            min_values: 1,
            max_values: 1,
            disabled: false,
        })
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn values(mut self, min: u8, max: u8) -> Result<Self, BuildError> {
        if min > max || max > 25 {
            return Err(BuildError::InvalidComponent(
                "select menu values must satisfy min <= max <= 25",
            ));
        }
        self.min_values = min;
        self.max_values = max;
        Ok(self)
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A free-form text field, only usable inside modals.
#[derive(Clone, Debug, Serialize)]
pub struct TextInput {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub custom_id: String,
    pub style: TextInputStyle,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl TextInput {
    /// A single-line text input.
    pub fn short(custom_id: impl Into<String>, label: impl Into<String>) -> Result<Self, BuildError> {
        Self::styled(custom_id, label, TextInputStyle::Short)
    }

    /// A multi-line text input.
    pub fn paragraph(
        custom_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Self::styled(custom_id, label, TextInputStyle::Paragraph)
    }

    fn styled(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: TextInputStyle,
    ) -> Result<Self, BuildError> {
        let custom_id = custom_id.into();
        check_custom_id(&custom_id)?;

        Ok(Self {
            kind: ComponentType::TextInput,
            custom_id,
            style,
            label: label.into(),
            placeholder: None,
            value: None,
            required: true,
        })
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl ActionRow {
    pub(crate) fn is_text_input_row(&self) -> bool {
        self.components.len() == 1
            && matches!(self.components.first(), Some(Component::TextInput(_)))
    }
}

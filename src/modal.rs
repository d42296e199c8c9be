use crate::component::ActionRow;
use crate::error::BuildError;
use crate::validate::CUSTOM_ID_LENGTH_MAX;
use serde::Serialize;

/// A modal form window, returnable from command and component handlers.
///
/// Submission comes back as a `ModalSubmit` interaction routed through the
/// custom-id handler registry, which may not answer with another modal.
#[derive(Clone, Debug, Serialize)]
pub struct Modal {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<ActionRow>,
}

impl Modal {
    /// Creates a modal; `components` must be between one and five rows each
    /// holding a single text input.
    pub fn new(
        custom_id: impl Into<String>,
        title: impl Into<String>,
        components: Vec<ActionRow>,
    ) -> Result<Self, BuildError> {
        let custom_id = custom_id.into();
        if custom_id.chars().count() > CUSTOM_ID_LENGTH_MAX {
            return Err(BuildError::CustomIdTooLong(custom_id.chars().count()));
        }

        if components.is_empty() || components.len() > 5 {
            return Err(BuildError::InvalidModal(
                "a modal holds between 1 and 5 component rows",
            ));
        }

        if !components.iter().all(ActionRow::is_text_input_row) {
            return Err(BuildError::InvalidModal(
                "only text input components are supported in modals",
            ));
        }

        Ok(Self {
            custom_id,
            title: title.into(),
            components,
        })
    }
}

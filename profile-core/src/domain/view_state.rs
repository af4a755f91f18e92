//! Observable profile screen state.

use super::{User, ValidationErrors};

/// The single externally observable mode of the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch or save is in flight.
    Loading,
    /// Last known good record.
    Success(User),
    /// The last operation failed.
    Error(String),
}

impl ViewState {
    /// The displayed record when in [`ViewState::Success`].
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Success(user) => Some(user),
            _ => None,
        }
    }

    /// The failure message when in [`ViewState::Error`].
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Everything a presentation adapter renders, published as one value.
///
/// ## Invariants
/// - `edit_buffer` is only ever populated from a [`ViewState::Success`] record.
/// - `validation_errors` is the validator output for the buffer at the last
///   save attempt, or empty after editing starts or is cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub(crate) view_state: ViewState,
    pub(crate) edit_buffer: Option<User>,
    pub(crate) validation_errors: ValidationErrors,
}

impl ProfileSnapshot {
    /// Current view state.
    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Working copy being edited, if editing.
    pub fn edit_buffer(&self) -> Option<&User> {
        self.edit_buffer.as_ref()
    }

    /// Errors from the last save attempt.
    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.validation_errors
    }

    /// Whether an edit buffer is present.
    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }
}

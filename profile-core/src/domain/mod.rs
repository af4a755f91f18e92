//! Domain primitives and the profile editing workflow.
//!
//! Purpose: Define the user profile entity, its validation rules, and the
//! state machine that drives the profile screen. Adapters reach the outside
//! world only through the traits in [`ports`].
//!
//! Public surface:
//! - User (alias to `user::User`): the profile record.
//! - ValidationErrors (alias to `profile_validation::ValidationErrors`):
//!   per-field messages from [`validate`].
//! - ProfileEditor (alias to `profile_editor::ProfileEditor`): load, edit,
//!   and save orchestration publishing [`ProfileSnapshot`] values.

pub mod field_update;
pub mod ports;
pub mod profile_editor;
pub mod profile_validation;
pub mod user;
pub mod view_state;

pub use self::field_update::FieldUpdate;
pub use self::profile_editor::{
    LOAD_FAILED_MESSAGE, LoadOutcome, ProfileEditor, SAVE_FAILED_MESSAGE, SaveOutcome,
};
pub use self::profile_validation::{
    BIO_MAX_CHARS, FieldError, ProfileField, UnknownProfileField, ValidationErrors,
    is_not_blank, is_valid_email, meets_max_length, meets_min_length, validate,
};
pub use self::user::{User, UserBuilder, UserId, UserValidationError};
pub use self::view_state::{ProfileSnapshot, ViewState};

//! Edit commands for the profile edit buffer.

use super::{ProfileField, User};

/// Replacement of one editable field.
///
/// The set of variants is the set of editable fields; adapters holding a
/// field name parse it into a [`ProfileField`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replace the display name.
    SetName(String),
    /// Replace the email address.
    SetEmail(String),
    /// Replace the biography.
    SetBio(String),
}

impl FieldUpdate {
    /// Pair a parsed field with its new value.
    pub fn new(field: ProfileField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            ProfileField::Name => Self::SetName(value),
            ProfileField::Email => Self::SetEmail(value),
            ProfileField::Bio => Self::SetBio(value),
        }
    }

    /// The field this update targets.
    pub fn field(&self) -> ProfileField {
        match self {
            Self::SetName(_) => ProfileField::Name,
            Self::SetEmail(_) => ProfileField::Email,
            Self::SetBio(_) => ProfileField::Bio,
        }
    }

    /// Return a fresh copy of `user` with this update applied.
    ///
    /// # Examples
    /// ```
    /// use profile_core::domain::{FieldUpdate, User};
    ///
    /// let user = User::placeholder();
    /// let edited = FieldUpdate::SetBio("Hello".into()).apply(&user);
    ///
    /// assert_eq!(edited.bio(), "Hello");
    /// assert_eq!(user.bio(), "");
    /// ```
    #[must_use]
    pub fn apply(&self, user: &User) -> User {
        let copy = user.clone();
        match self {
            Self::SetName(name) => copy.with_name(name.as_str()),
            Self::SetEmail(email) => copy.with_email(email.as_str()),
            Self::SetBio(bio) => copy.with_bio(bio.as_str()),
        }
    }
}

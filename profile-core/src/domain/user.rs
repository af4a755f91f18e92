//! User record entity.
//!
//! The record is plain data: name, email, and bio may hold any string while a
//! profile is being edited. Input rules live in
//! [`profile_validation`](super::profile_validation) and are applied to the
//! edit buffer on save, never at construction time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

const PLACEHOLDER_ID: &str = "placeholder";
const PREVIEW_ID: &str = "preview-123";
const PREVIEW_AVATAR: &str = "https://example.com/avatar.jpg";

/// Validation errors returned when building a [`User`] from raw parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier carried leading or trailing whitespace.
    InvalidId,
    /// The avatar reference was not an absolute URL.
    InvalidAvatarUrl {
        /// The rejected input.
        value: String,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain surrounding whitespace"),
            Self::InvalidAvatarUrl { value } => {
                write!(f, "avatar url must be an absolute URL: {value}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier assigned by the user data service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Examples
    /// ```
    /// use profile_core::domain::UserId;
    ///
    /// let id = UserId::new("user-123").expect("valid id");
    /// assert_eq!(id.as_ref(), "user-123");
    /// assert!(UserId::new("").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    fn from_static(id: &'static str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A user's profile record.
///
/// ## Invariants
/// - `id` and `created_at` never change once the record exists; the `with_*`
///   methods only replace editable fields.
/// - Editable fields are unconstrained here; see
///   [`validate`](super::profile_validation::validate).
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use profile_core::domain::{User, UserId};
///
/// let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().expect("time");
/// let user = User::builder(UserId::new("user-1").expect("id"), created_at)
///     .name("Ada")
///     .email("ada@example.com")
///     .build();
/// let renamed = user.clone().with_name("Ada Lovelace");
///
/// assert_eq!(user.name(), "Ada");
/// assert_eq!(renamed.name(), "Ada Lovelace");
/// assert_eq!(renamed.id(), user.id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    bio: String,
    avatar_url: Option<Url>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a builder for a record with the given identity.
    pub fn builder(id: UserId, created_at: DateTime<Utc>) -> UserBuilder {
        UserBuilder::new(id, created_at)
    }

    /// Blank record used while nothing has been loaded yet.
    pub fn placeholder() -> Self {
        UserBuilder::new(
            UserId::from_static(PLACEHOLDER_ID),
            DateTime::<Utc>::UNIX_EPOCH,
        )
        .build()
    }

    /// Sample record for previews and development fixtures.
    pub fn preview(created_at: DateTime<Utc>) -> Self {
        UserBuilder::new(UserId::from_static(PREVIEW_ID), created_at)
            .name("Jane Developer")
            .email("jane@example.com")
            .bio("Mobile developer enthusiast building great apps.")
            .avatar_url(Url::parse(PREVIEW_AVATAR).ok())
            .build()
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Free-form biography.
    pub fn bio(&self) -> &str {
        self.bio.as_str()
    }

    /// Avatar image reference, if any.
    pub fn avatar_url(&self) -> Option<&Url> {
        self.avatar_url.as_ref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Return a copy with the name replaced.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Return a copy with the email replaced.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Return a copy with the bio replaced.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }
}

/// Builder for constructing [`User`] records incrementally.
#[derive(Debug, Clone)]
pub struct UserBuilder {
    id: UserId,
    name: String,
    email: String,
    bio: String,
    avatar_url: Option<Url>,
    created_at: DateTime<Utc>,
}

impl UserBuilder {
    /// Create a builder with empty editable fields.
    pub fn new(id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            bio: String::new(),
            avatar_url: None,
            created_at,
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the biography.
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Set or clear the avatar reference.
    pub fn avatar_url(mut self, avatar_url: Option<Url>) -> Self {
        self.avatar_url = avatar_url;
        self
    }

    /// Build the final [`User`].
    pub fn build(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            bio: self.bio,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    bio: String,
    #[serde(default, alias = "avatarURL", skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            bio,
            avatar_url,
            created_at,
        } = value;
        Self {
            id: id.into(),
            name,
            email,
            bio,
            avatar_url: avatar_url.map(String::from),
            created_at,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            name,
            email,
            bio,
            avatar_url,
            created_at,
        } = value;

        let avatar_url = avatar_url
            .map(|raw| {
                Url::parse(&raw).map_err(|_| UserValidationError::InvalidAvatarUrl { value: raw })
            })
            .transpose()?;

        Ok(UserBuilder::new(UserId::try_from(id)?, created_at)
            .name(name)
            .email(email)
            .bio(bio)
            .avatar_url(avatar_url)
            .build())
    }
}

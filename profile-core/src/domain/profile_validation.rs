//! Profile input validation.
//!
//! Validation is pure and total: the same record always yields the same
//! [`ValidationErrors`], and an empty result means every rule passed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::User;

/// Maximum bio length, counted in characters.
pub const BIO_MAX_CHARS: usize = 500;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Editable profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    /// Display name.
    Name,
    /// Email address.
    Email,
    /// Biography.
    Bio,
}

impl ProfileField {
    /// Every editable field, in display order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Bio];

    /// Wire name used by presentation adapters.
    ///
    /// # Examples
    /// ```
    /// use profile_core::domain::ProfileField;
    ///
    /// assert_eq!(ProfileField::Email.as_str(), "email");
    /// assert_eq!("bio".parse::<ProfileField>(), Ok(ProfileField::Bio));
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Bio => "bio",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a field name that is not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfileField {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for UnknownProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown profile field: {}", self.input)
    }
}

impl std::error::Error for UnknownProfileField {}

impl FromStr for ProfileField {
    type Err = UnknownProfileField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "bio" => Ok(Self::Bio),
            _ => Err(UnknownProfileField {
                input: s.to_owned(),
            }),
        }
    }
}

/// A single failed rule. `Display` renders the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Name is empty or whitespace only.
    NameRequired,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
    /// Bio exceeds the character limit.
    BioTooLong {
        /// Maximum permitted characters.
        max: usize,
    },
}

impl FieldError {
    /// The field this error belongs to.
    pub fn field(&self) -> ProfileField {
        match self {
            Self::NameRequired => ProfileField::Name,
            Self::InvalidEmail => ProfileField::Email,
            Self::BioTooLong { .. } => ProfileField::Bio,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required"),
            Self::InvalidEmail => write!(f, "Please enter a valid email address"),
            Self::BioTooLong { max } => write!(f, "Bio must be {max} characters or less"),
        }
    }
}

/// Field-scoped validation failures keyed by [`ProfileField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<ProfileField, FieldError>);

impl ValidationErrors {
    /// True when every rule passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `field` has an error.
    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains_key(&field)
    }

    /// The error recorded for `field`, if any.
    pub fn get(&self, field: ProfileField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Iterate errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// Render as `field name -> message`, the shape string-keyed adapters expect.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, error)| (field.as_str(), error.to_string()))
            .collect()
    }

    fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field(), error);
    }
}

/// Validate every editable field of `user`.
///
/// # Examples
/// ```
/// use profile_core::domain::{ProfileField, User, validate};
///
/// let user = User::placeholder().with_name(" ").with_email("invalid-email");
/// let errors = validate(&user);
///
/// assert!(errors.contains(ProfileField::Name));
/// assert!(errors.contains(ProfileField::Email));
/// assert!(!errors.contains(ProfileField::Bio));
/// ```
pub fn validate(user: &User) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if !is_not_blank(user.name()) {
        errors.insert(FieldError::NameRequired);
    }
    if !is_valid_email(user.email()) {
        errors.insert(FieldError::InvalidEmail);
    }
    if !meets_max_length(user.bio(), BIO_MAX_CHARS) {
        errors.insert(FieldError::BioTooLong { max: BIO_MAX_CHARS });
    }

    errors
}

/// Whether `email` matches `local-part@domain.tld`. No deliverability check.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Whether `value` has any non-whitespace character.
pub fn is_not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Whether `value` has at least `min` characters.
pub fn meets_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Whether `value` has at most `max` characters.
pub fn meets_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

#[cfg(test)]
mod tests;

//! Driven port for fetching and persisting the current user's profile.
//!
//! The profile editor only sees this trait. Transport, storage, and decoding
//! live in outbound adapters, which report failures as
//! [`UserDataServiceError`] values whose `Display` text is what the profile
//! screen shows.

use async_trait::async_trait;

use crate::domain::User;

/// Failures reported by user data service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDataServiceError {
    /// The service answered but the response could not be used.
    #[error("Failed to fetch user data")]
    InvalidResponse,
    /// The service refused or failed to apply an update.
    #[error("Failed to update profile")]
    UpdateFailed,
    /// The request never completed at the transport level.
    #[error("Network error: {message}")]
    Network {
        /// Transport failure detail.
        message: String,
    },
    /// The request exceeded the adapter's time budget.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Timeout detail.
        message: String,
    },
    /// The payload could not be decoded into a user record.
    #[error("Failed to decode user data: {message}")]
    Decode {
        /// Decoding failure detail.
        message: String,
    },
    /// Adapter-specific failure described verbatim.
    #[error("{message}")]
    Other {
        /// Human-readable failure description.
        message: String,
    },
}

impl UserDataServiceError {
    /// Transport-level failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Time budget exceeded.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Undecodable payload.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Free-form failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// User-facing description, or `fallback` when the adapter gave none.
    ///
    /// # Examples
    /// ```
    /// use profile_core::domain::ports::UserDataServiceError;
    ///
    /// let blank = UserDataServiceError::other("  ");
    /// assert_eq!(blank.message_or("Failed to load profile"), "Failed to load profile");
    ///
    /// let described = UserDataServiceError::other("Network error");
    /// assert_eq!(described.message_or("Failed to load profile"), "Network error");
    /// ```
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_owned()
        } else {
            message
        }
    }
}

/// Port for the durable copy of the current user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDataService: Send + Sync {
    /// Fetch the signed-in user's record.
    async fn fetch_current_user(&self) -> Result<User, UserDataServiceError>;

    /// Persist `user` wholesale and return the service's canonical copy,
    /// which may differ from the request (for example, normalised fields).
    async fn update_user(&self, user: &User) -> Result<User, UserDataServiceError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UserDataServiceError::InvalidResponse, "Failed to fetch user data")]
    #[case(UserDataServiceError::UpdateFailed, "Failed to update profile")]
    #[case(UserDataServiceError::network("offline"), "Network error: offline")]
    #[case(UserDataServiceError::timeout("after 10s"), "Request timed out: after 10s")]
    #[case(UserDataServiceError::decode("missing id"), "Failed to decode user data: missing id")]
    #[case(UserDataServiceError::other("Network error"), "Network error")]
    fn errors_render_user_facing_messages(
        #[case] error: UserDataServiceError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn blank_messages_fall_back() {
        let error = UserDataServiceError::other("");
        assert_eq!(error.message_or("Failed to save profile"), "Failed to save profile");
    }
}

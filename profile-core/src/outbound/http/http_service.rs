//! Reqwest-backed user data service adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain users.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::domain::User;
use crate::domain::ports::{UserDataService, UserDataServiceError};

const CURRENT_USER_SEGMENT: &str = "me";
const USERS_SEGMENT: &str = "users";

/// User data service adapter talking JSON to one profile API.
///
/// `GET {base}/users/me` fetches the signed-in user and
/// `PUT {base}/users/{id}` replaces a record, returning the canonical copy.
#[derive(Debug, Clone)]
pub struct HttpUserDataService {
    client: Client,
    base_url: Url,
}

impl HttpUserDataService {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let service = HttpUserDataService::new(base_url, Duration::from_secs(10));
    /// assert!(service.is_ok() || service.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UserDataServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                UserDataServiceError::other(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl UserDataService for HttpUserDataService {
    async fn fetch_current_user(&self) -> Result<User, UserDataServiceError> {
        let url = self.endpoint(&[USERS_SEGMENT, CURRENT_USER_SEGMENT])?;
        debug!(%url, "fetching current user");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            log_status(status, body.as_ref());
            return Err(UserDataServiceError::InvalidResponse);
        }
        parse_user(body.as_ref())
    }

    async fn update_user(&self, user: &User) -> Result<User, UserDataServiceError> {
        let url = self.endpoint(&[USERS_SEGMENT, user.id().as_ref()])?;
        debug!(%url, user_id = %user.id(), "updating user");
        let response = self
            .client
            .put(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(user)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            log_status(status, body.as_ref());
            return Err(UserDataServiceError::UpdateFailed);
        }
        parse_user(body.as_ref())
    }
}

fn parse_user(body: &[u8]) -> Result<User, UserDataServiceError> {
    serde_json::from_slice(body).map_err(|error| {
        UserDataServiceError::decode(format!("invalid user JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> UserDataServiceError {
    if error.is_timeout() {
        UserDataServiceError::timeout(error.to_string())
    } else {
        UserDataServiceError::network(error.to_string())
    }
}

fn log_status(status: StatusCode, body: &[u8]) {
    let preview = body_preview(body);
    warn!(
        status = status.as_u16(),
        body = %preview,
        "profile API returned an error status"
    );
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

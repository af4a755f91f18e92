//! In-memory user data service for development, previews, and tests.
//!
//! Holds a single user record. Failures can be switched on and off at runtime,
//! and an optional delay simulates network latency.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{UserDataService, UserDataServiceError};

/// Failure description used by [`InMemoryUserDataService::fail`].
pub const DEFAULT_FAILURE_MESSAGE: &str = "Network error";

/// User data service backed by process memory.
///
/// # Examples
/// ```
/// use profile_core::domain::ports::UserDataService;
/// use profile_core::outbound::memory::InMemoryUserDataService;
///
/// # let runtime = tokio::runtime::Builder::new_current_thread()
/// #     .enable_all()
/// #     .build()
/// #     .expect("runtime");
/// # runtime.block_on(async {
/// let service = InMemoryUserDataService::default();
/// let user = service.fetch_current_user().await.expect("preview user");
/// assert_eq!(user.name(), "Jane Developer");
///
/// service.fail();
/// let error = service.fetch_current_user().await.expect_err("switched to failing");
/// assert_eq!(error.to_string(), "Network error");
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryUserDataService {
    user: Mutex<User>,
    failure: Mutex<Option<UserDataServiceError>>,
    delay: Duration,
}

impl Default for InMemoryUserDataService {
    fn default() -> Self {
        Self::with_clock(&DefaultClock)
    }
}

impl InMemoryUserDataService {
    /// Serve `user` with no delay and no failure.
    pub fn new(user: User) -> Self {
        Self {
            user: Mutex::new(user),
            failure: Mutex::new(None),
            delay: Duration::ZERO,
        }
    }

    /// Serve the preview user, created at the clock's current time.
    pub fn with_clock(clock: &dyn Clock) -> Self {
        Self::new(User::preview(clock.utc()))
    }

    /// Wait `delay` before answering each request.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every request fail with [`DEFAULT_FAILURE_MESSAGE`].
    pub fn fail(&self) {
        self.fail_with(UserDataServiceError::other(DEFAULT_FAILURE_MESSAGE));
    }

    /// Make every request fail with `error`.
    pub fn fail_with(&self, error: UserDataServiceError) {
        *lock(&self.failure) = Some(error);
    }

    /// Answer requests normally again.
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// The stored record.
    pub fn current_user(&self) -> User {
        lock(&self.user).clone()
    }

    async fn respond(&self) -> Result<(), UserDataServiceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match lock(&self.failure).clone() {
            Some(error) => {
                debug!(%error, "in-memory user data service failing on request");
                Err(error)
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserDataService for InMemoryUserDataService {
    async fn fetch_current_user(&self) -> Result<User, UserDataServiceError> {
        self.respond().await?;
        Ok(self.current_user())
    }

    async fn update_user(&self, user: &User) -> Result<User, UserDataServiceError> {
        self.respond().await?;
        *lock(&self.user) = user.clone();
        Ok(user.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> InMemoryUserDataService {
        let created_at = Utc
            .with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
            .single()
            .expect("valid fixed time");
        let mut clock = MockClock::new();
        clock.expect_utc().times(1).return_const(created_at);
        InMemoryUserDataService::with_clock(&clock)
    }

    #[rstest]
    #[tokio::test]
    async fn serves_the_preview_user_stamped_by_the_clock(service: InMemoryUserDataService) {
        let user = service.fetch_current_user().await.expect("fetch succeeds");

        assert_eq!(user.name(), "Jane Developer");
        assert_eq!(user.email(), "jane@example.com");
        assert_eq!(user.created_at().to_rfc3339(), "2024-03-01T08:00:00+00:00");
    }

    #[rstest]
    #[tokio::test]
    async fn updates_are_stored_and_echoed(service: InMemoryUserDataService) {
        let edited = service.current_user().with_bio("Rustacean");

        let echoed = service.update_user(&edited).await.expect("update succeeds");

        assert_eq!(echoed, edited);
        assert_eq!(service.current_user(), edited);
    }

    #[rstest]
    #[tokio::test]
    async fn failures_can_be_switched_on_and_off(service: InMemoryUserDataService) {
        service.fail();
        let error = service
            .update_user(&service.current_user().with_name("Lost"))
            .await
            .expect_err("failing");
        assert_eq!(error, UserDataServiceError::other(DEFAULT_FAILURE_MESSAGE));
        assert_eq!(service.current_user().name(), "Jane Developer");

        service.recover();
        assert!(service.fetch_current_user().await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn custom_failures_are_returned_verbatim(service: InMemoryUserDataService) {
        service.fail_with(UserDataServiceError::timeout("after 10ms"));

        let error = service.fetch_current_user().await.expect_err("failing");

        assert_eq!(error.to_string(), "Request timed out: after 10ms");
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn delay_holds_the_response(service: InMemoryUserDataService) {
        let service = service.with_delay(Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        service.fetch_current_user().await.expect("fetch succeeds");

        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}

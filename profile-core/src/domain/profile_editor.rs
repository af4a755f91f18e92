//! Profile load/edit/save state machine.
//!
//! [`ProfileEditor`] owns the profile screen's [`ProfileSnapshot`]: the view
//! state, the edit buffer, and the validation errors from the last save
//! attempt. It is the only writer of that snapshot and publishes every change
//! through a `tokio::sync::watch` channel.
//!
//! The user data service call is the only suspension point. Every load or save
//! starts a new request generation; a response is applied only while its
//! generation is still the latest, so a slow response can never overwrite the
//! result of a request issued after it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::ports::UserDataService;
use crate::domain::{
    FieldUpdate, ProfileField, ProfileSnapshot, User, ValidationErrors, ViewState, validate,
};

/// Message shown when a failed fetch carries no description.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load profile";
/// Message shown when a failed update carries no description.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save profile";

/// Result of [`ProfileEditor::load_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The record was fetched and is now displayed.
    Loaded(User),
    /// The fetch failed; the view shows this message.
    Failed(String),
    /// A request was already in flight, so no fetch was issued.
    AlreadyLoading,
    /// A newer request started before this one resolved; its response was
    /// discarded.
    Superseded,
}

/// Result of [`ProfileEditor::save_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// There was no edit buffer to save.
    NotEditing,
    /// The edit buffer failed validation and was not sent.
    Invalid(ValidationErrors),
    /// Another save was still in flight, so nothing was sent.
    AlreadySaving,
    /// The service persisted the buffer and returned this canonical copy.
    Saved(User),
    /// The service rejected or failed the update; the buffer is kept.
    Failed(String),
    /// A newer request started before this one resolved; its response was
    /// discarded.
    Superseded,
}

impl SaveOutcome {
    /// Whether the save passed validation and was handed to the service.
    ///
    /// This is the boolean older callers relied on: it says nothing about
    /// whether persistence succeeded.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Saved(_) | Self::Failed(_) | Self::Superseded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestGeneration(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Load,
    Save,
}

#[derive(Debug, Default)]
struct EditorState {
    snapshot: ProfileSnapshot,
    generation: u64,
    in_flight: Option<RequestKind>,
}

impl EditorState {
    fn begin_request(&mut self, kind: RequestKind) -> RequestGeneration {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = Some(kind);
        RequestGeneration(self.generation)
    }

    fn is_current(&self, request: RequestGeneration) -> bool {
        self.generation == request.0
    }

    /// Returns whether `request` is still the latest, clearing the in-flight
    /// marker when it is.
    fn finish_request(&mut self, request: RequestGeneration) -> bool {
        let current = self.is_current(request);
        if current {
            self.in_flight = None;
        }
        current
    }

    fn is_saving(&self) -> bool {
        self.in_flight == Some(RequestKind::Save)
    }
}

/// Profile screen state machine.
///
/// Shareable behind an [`Arc`]; every operation takes `&self`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use profile_core::domain::{ProfileEditor, ViewState};
/// use profile_core::outbound::memory::InMemoryUserDataService;
///
/// # let runtime = tokio::runtime::Builder::new_current_thread()
/// #     .enable_all()
/// #     .build()
/// #     .expect("runtime");
/// # runtime.block_on(async {
/// let editor = ProfileEditor::new(Arc::new(InMemoryUserDataService::default()));
/// assert_eq!(editor.snapshot().view_state(), &ViewState::Idle);
///
/// editor.load_profile().await;
/// editor.start_editing();
/// editor.update_named_field("name", "Updated Name");
///
/// let outcome = editor.save_profile().await;
/// assert!(outcome.is_accepted());
/// assert_eq!(
///     editor.snapshot().view_state().user().map(|user| user.name().to_owned()),
///     Some("Updated Name".to_owned())
/// );
/// # });
/// ```
pub struct ProfileEditor {
    service: Arc<dyn UserDataService>,
    state: Mutex<EditorState>,
    snapshots: watch::Sender<ProfileSnapshot>,
}

impl ProfileEditor {
    /// Create an editor in the [`ViewState::Idle`] state.
    pub fn new(service: Arc<dyn UserDataService>) -> Self {
        let (snapshots, _initial) = watch::channel(ProfileSnapshot::default());
        Self {
            service,
            state: Mutex::new(EditorState::default()),
            snapshots,
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ProfileSnapshot {
        self.lock().snapshot.clone()
    }

    /// Subscribe to snapshot changes.
    ///
    /// The receiver starts at the current snapshot and is notified after every
    /// change; unchanged operations (for example, editing while not loaded)
    /// publish nothing.
    pub fn subscribe(&self) -> watch::Receiver<ProfileSnapshot> {
        self.snapshots.subscribe()
    }

    /// Fetch the current user and display it.
    ///
    /// Ignored with [`LoadOutcome::AlreadyLoading`] while any request is in
    /// flight.
    pub async fn load_profile(&self) -> LoadOutcome {
        let request = self.mutate(|state| {
            if state.snapshot.view_state.is_loading() {
                return None;
            }
            state.snapshot.view_state = ViewState::Loading;
            Some(state.begin_request(RequestKind::Load))
        });
        let Some(request) = request else {
            debug!("profile load ignored; a request is already in flight");
            return LoadOutcome::AlreadyLoading;
        };

        debug!(generation = request.0, "loading profile");
        let result = self.service.fetch_current_user().await;

        let outcome = self.mutate(|state| {
            if !state.finish_request(request) {
                return LoadOutcome::Superseded;
            }
            match result {
                Ok(user) => {
                    state.snapshot.view_state = ViewState::Success(user.clone());
                    LoadOutcome::Loaded(user)
                }
                Err(error) => {
                    let message = error.message_or(LOAD_FAILED_MESSAGE);
                    state.snapshot.view_state = ViewState::Error(message.clone());
                    LoadOutcome::Failed(message)
                }
            }
        });

        match &outcome {
            LoadOutcome::Loaded(user) => debug!(user_id = %user.id(), "profile loaded"),
            LoadOutcome::Failed(message) => warn!(error = %message, "profile load failed"),
            LoadOutcome::Superseded => {
                warn!(generation = request.0, "discarding stale profile load response");
            }
            LoadOutcome::AlreadyLoading => {}
        }
        outcome
    }

    /// Copy the displayed record into the edit buffer.
    ///
    /// Does nothing unless the view is [`ViewState::Success`].
    pub fn start_editing(&self) {
        self.mutate(|state| {
            let Some(user) = state.snapshot.view_state.user().cloned() else {
                return;
            };
            state.snapshot.edit_buffer = Some(user);
            state.snapshot.validation_errors = ValidationErrors::default();
        });
    }

    /// Apply `update` to a fresh copy of the edit buffer.
    ///
    /// Does nothing when not editing. Validation waits for the next save.
    pub fn update_field(&self, update: FieldUpdate) {
        self.mutate(|state| {
            if let Some(buffer) = state.snapshot.edit_buffer.as_ref() {
                state.snapshot.edit_buffer = Some(update.apply(buffer));
            }
        });
    }

    /// Update a field addressed by its wire name (`name`, `email`, or `bio`).
    ///
    /// Unknown names are ignored.
    pub fn update_named_field(&self, field: &str, value: impl Into<String>) {
        match field.parse::<ProfileField>() {
            Ok(field) => self.update_field(FieldUpdate::new(field, value)),
            Err(error) => debug!(%error, "ignoring update for unknown profile field"),
        }
    }

    /// Discard the edit buffer and any validation errors.
    pub fn cancel_editing(&self) {
        self.mutate(|state| {
            state.snapshot.edit_buffer = None;
            state.snapshot.validation_errors = ValidationErrors::default();
        });
    }

    /// Validate the edit buffer and, when valid, persist it.
    ///
    /// Ignored with [`SaveOutcome::AlreadySaving`] while an earlier save is
    /// awaiting the service; a save issued during a load supersedes the load.
    /// Resolves once the service has answered. Use
    /// [`SaveOutcome::is_accepted`] for the "validation passed" boolean and
    /// the view state for the persistence result.
    pub async fn save_profile(&self) -> SaveOutcome {
        let prepared = self.mutate(|state| {
            let Some(buffer) = state.snapshot.edit_buffer.clone() else {
                return Err(SaveOutcome::NotEditing);
            };
            if state.is_saving() {
                return Err(SaveOutcome::AlreadySaving);
            }
            let errors = validate(&buffer);
            state.snapshot.validation_errors = errors.clone();
            if !errors.is_empty() {
                return Err(SaveOutcome::Invalid(errors));
            }
            state.snapshot.view_state = ViewState::Loading;
            Ok((state.begin_request(RequestKind::Save), buffer))
        });
        let (request, buffer) = match prepared {
            Ok(prepared) => prepared,
            Err(outcome) => {
                debug!(?outcome, "profile save rejected before reaching the service");
                return outcome;
            }
        };

        debug!(generation = request.0, user_id = %buffer.id(), "saving profile");
        let result = self.service.update_user(&buffer).await;

        let outcome = self.mutate(|state| {
            if !state.finish_request(request) {
                return SaveOutcome::Superseded;
            }
            match result {
                Ok(updated) => {
                    state.snapshot.view_state = ViewState::Success(updated.clone());
                    state.snapshot.edit_buffer = None;
                    SaveOutcome::Saved(updated)
                }
                Err(error) => {
                    let message = error.message_or(SAVE_FAILED_MESSAGE);
                    state.snapshot.view_state = ViewState::Error(message.clone());
                    SaveOutcome::Failed(message)
                }
            }
        });

        match &outcome {
            SaveOutcome::Saved(user) => info!(user_id = %user.id(), "profile saved"),
            SaveOutcome::Failed(message) => warn!(error = %message, "profile save failed"),
            SaveOutcome::Superseded => {
                warn!(generation = request.0, "discarding stale profile save response");
            }
            SaveOutcome::NotEditing | SaveOutcome::Invalid(_) | SaveOutcome::AlreadySaving => {}
        }
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<R>(&self, apply: impl FnOnce(&mut EditorState) -> R) -> R {
        let mut state = self.lock();
        let before = state.snapshot.clone();
        let result = apply(&mut state);
        if state.snapshot != before {
            self.snapshots.send_replace(state.snapshot.clone());
        }
        result
    }
}

impl std::fmt::Debug for ProfileEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileEditor")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

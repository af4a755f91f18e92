//! Behavioural tests for loading, editing, and saving a profile.

use std::sync::Arc;

use profile_core::domain::{ProfileEditor, ProfileField, SaveOutcome};
use profile_core::outbound::memory::InMemoryUserDataService;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

struct ProfileWorld {
    runtime: Runtime,
    service: Arc<InMemoryUserDataService>,
    editor: ProfileEditor,
    last_save: Option<SaveOutcome>,
}

impl ProfileWorld {
    fn load(&self) {
        self.runtime.block_on(self.editor.load_profile());
    }
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"')
}

#[fixture]
fn world() -> ProfileWorld {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime should initialise");
    let service = Arc::new(InMemoryUserDataService::default());
    let editor = ProfileEditor::new(service.clone());
    ProfileWorld {
        runtime,
        service,
        editor,
        last_save: None,
    }
}

#[given("a profile service holding the preview user")]
fn a_profile_service_holding_the_preview_user(world: &mut ProfileWorld) {
    world.service.recover();
}

#[given("a profile service that fails")]
fn a_profile_service_that_fails(world: &mut ProfileWorld) {
    world.service.fail();
}

#[given("a loaded profile")]
fn a_loaded_profile(world: &mut ProfileWorld) {
    world.load();
    assert!(
        world.editor.snapshot().view_state().user().is_some(),
        "profile should load"
    );
}

#[when("the profile is loaded")]
fn the_profile_is_loaded(world: &mut ProfileWorld) {
    world.load();
}

#[when("the user edits the {field} to {value}")]
fn the_user_edits_the_field(world: &mut ProfileWorld, field: String, value: String) {
    if !world.editor.snapshot().is_editing() {
        world.editor.start_editing();
    }
    world.editor.update_named_field(field.trim(), unquote(&value));
}

#[when("the user saves the profile")]
fn the_user_saves_the_profile(world: &mut ProfileWorld) {
    let outcome = world.runtime.block_on(world.editor.save_profile());
    world.last_save = Some(outcome);
}

#[when("the user cancels editing")]
fn the_user_cancels_editing(world: &mut ProfileWorld) {
    world.editor.cancel_editing();
}

#[when("the service starts failing")]
fn the_service_starts_failing(world: &mut ProfileWorld) {
    world.service.fail();
}

#[then("the profile shows the name {name}")]
fn the_profile_shows_the_name(world: &mut ProfileWorld, name: String) {
    let snapshot = world.editor.snapshot();
    let user = snapshot
        .view_state()
        .user()
        .expect("profile should be displayed");
    assert_eq!(user.name(), unquote(&name));
}

#[then("the view shows the error {message}")]
fn the_view_shows_the_error(world: &mut ProfileWorld, message: String) {
    assert_eq!(
        world.editor.snapshot().view_state().error_message(),
        Some(unquote(&message))
    );
}

#[then("the save is accepted")]
fn the_save_is_accepted(world: &mut ProfileWorld) {
    let outcome = world.last_save.as_ref().expect("save should have run");
    assert!(
        matches!(outcome, SaveOutcome::Saved(_)),
        "expected a saved profile, got {outcome:?}"
    );
}

#[then("the save is rejected")]
fn the_save_is_rejected(world: &mut ProfileWorld) {
    let outcome = world.last_save.as_ref().expect("save should have run");
    assert!(!outcome.is_accepted(), "expected rejection, got {outcome:?}");
}

#[then("the {field} field shows {message}")]
fn the_field_shows(world: &mut ProfileWorld, field: String, message: String) {
    let field = field
        .trim()
        .parse::<ProfileField>()
        .expect("feature should name an editable field");
    let snapshot = world.editor.snapshot();
    let error = snapshot
        .validation_errors()
        .get(field)
        .expect("field should carry an error");
    assert_eq!(error.to_string(), unquote(&message));
}

#[then("the service stores the name {name}")]
fn the_service_stores_the_name(world: &mut ProfileWorld, name: String) {
    assert_eq!(world.service.current_user().name(), unquote(&name));
}

#[then("the editor is not editing")]
fn the_editor_is_not_editing(world: &mut ProfileWorld) {
    assert!(!world.editor.snapshot().is_editing());
}

#[then("the editor is still editing")]
fn the_editor_is_still_editing(world: &mut ProfileWorld) {
    assert!(world.editor.snapshot().is_editing());
}

#[scenario(
    path = "tests/features/profile_editing.feature",
    name = "Loading shows the stored profile"
)]
fn loading_shows_the_stored_profile(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_editing.feature",
    name = "A failing service surfaces an error"
)]
fn a_failing_service_surfaces_an_error(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_editing.feature",
    name = "Saving a valid edit updates the profile"
)]
fn saving_a_valid_edit_updates_the_profile(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_editing.feature",
    name = "Invalid edits never reach the service"
)]
fn invalid_edits_never_reach_the_service(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_editing.feature",
    name = "Cancelling discards the working copy"
)]
fn cancelling_discards_the_working_copy(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_editing.feature",
    name = "A failed save keeps the working copy"
)]
fn a_failed_save_keeps_the_working_copy(world: ProfileWorld) {
    drop(world);
}

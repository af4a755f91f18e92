//! Plain-text rendering of profile snapshots.
//!
//! Terminal front ends print one rendering per published snapshot.

use std::fmt;

use crate::domain::{BIO_MAX_CHARS, ProfileField, ProfileSnapshot, User, ViewState};

/// Status line shown while a request is in flight.
pub const LOADING_LINE: &str = "Loading profile...";
/// Hint printed under load and save failures.
pub const RETRY_HINT: &str = "Retry to try again.";

/// Render `snapshot` as text.
///
/// # Examples
/// ```
/// use profile_core::domain::ProfileSnapshot;
/// use profile_core::inbound::render::render_snapshot;
///
/// assert_eq!(render_snapshot(&ProfileSnapshot::default()), "Profile not loaded.\n");
/// ```
pub fn render_snapshot(snapshot: &ProfileSnapshot) -> String {
    ProfileView(snapshot).to_string()
}

/// [`fmt::Display`] adapter over a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ProfileView<'a>(pub &'a ProfileSnapshot);

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        match snapshot.view_state() {
            ViewState::Idle if !snapshot.is_editing() => writeln!(f, "Profile not loaded.")?,
            ViewState::Idle | ViewState::Success(_) => {}
            ViewState::Loading => writeln!(f, "{LOADING_LINE}")?,
            ViewState::Error(message) => {
                writeln!(f, "Error: {message}")?;
                writeln!(f, "{RETRY_HINT}")?;
            }
        }

        if let Some(buffer) = snapshot.edit_buffer() {
            write_form(f, snapshot, buffer)
        } else if let Some(user) = snapshot.view_state().user() {
            write_card(f, user)
        } else {
            Ok(())
        }
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, user: &User) -> fmt::Result {
    writeln!(f, "{}", user.name())?;
    writeln!(f, "{}", user.email())?;
    if !user.bio().is_empty() {
        writeln!(f, "{}", user.bio())?;
    }
    if let Some(avatar) = user.avatar_url() {
        writeln!(f, "Avatar: {avatar}")?;
    }
    writeln!(f, "Member since {}", user.created_at().format("%Y-%m-%d"))
}

fn write_form(
    f: &mut fmt::Formatter<'_>,
    snapshot: &ProfileSnapshot,
    buffer: &User,
) -> fmt::Result {
    writeln!(f, "Editing profile")?;
    for field in ProfileField::ALL {
        let value = match field {
            ProfileField::Name => buffer.name(),
            ProfileField::Email => buffer.email(),
            ProfileField::Bio => buffer.bio(),
        };
        if field == ProfileField::Bio {
            let count = value.chars().count();
            writeln!(f, "  {field}: {value} ({count}/{BIO_MAX_CHARS} characters)")?;
        } else {
            writeln!(f, "  {field}: {value}")?;
        }
        if let Some(error) = snapshot.validation_errors().get(field) {
            writeln!(f, "    ! {error}")?;
        }
    }
    Ok(())
}

//! User profile loading, editing, and saving.
//!
//! The [`domain`] module holds the profile record, its validation rules, and
//! the [`domain::ProfileEditor`] state machine. Adapters for the user data
//! service live in [`outbound`]; text presentation lives in [`inbound`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

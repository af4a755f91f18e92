//! Show or edit the signed-in user's profile from the terminal.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use profile_core::config::ProfileServiceSettings;
use profile_core::domain::ports::UserDataService;
use profile_core::domain::{FieldUpdate, LoadOutcome, ProfileEditor, ProfileField, SaveOutcome};
use profile_core::inbound::render::render_snapshot;
use profile_core::outbound::http::HttpUserDataService;
use profile_core::outbound::memory::InMemoryUserDataService;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `profile-cli` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "profile-cli",
    about = "Show or edit the signed-in user's profile",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Load and print the profile.
    Show,
    /// Load the profile, apply field changes, and save.
    Edit {
        /// Field assignment such as `name=Ada`; repeatable.
        #[arg(
            long = "set",
            value_name = "field=value",
            required = true,
            value_parser = parse_assignment
        )]
        assignments: Vec<FieldUpdate>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let settings = ProfileServiceSettings::load_from_iter([OsString::from("profile-cli")])
        .map_err(|error| eyre!("failed to load profile service settings: {error}"))?;
    init_tracing(settings.json_logs);

    let service = build_service(&settings)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build profile-cli runtime")?;
    runtime.block_on(run(args.command, service))
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn build_service(settings: &ProfileServiceSettings) -> Result<Arc<dyn UserDataService>> {
    if settings.use_fixture {
        info!("serving the preview profile from memory");
        let service = InMemoryUserDataService::default().with_delay(settings.fixture_delay());
        return Ok(Arc::new(service));
    }

    let base_url = settings.base_url()?;
    info!(%base_url, "using the profile API");
    let service = HttpUserDataService::new(base_url, settings.timeout())
        .wrap_err("failed to build HTTP client")?;
    Ok(Arc::new(service))
}

async fn run(command: Command, service: Arc<dyn UserDataService>) -> Result<()> {
    let editor = ProfileEditor::new(service);
    let mut snapshots = editor.subscribe();
    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            print!("{}", render_snapshot(&snapshots.borrow_and_update()));
        }
    });

    let result = drive(&editor, command).await;
    drop(editor);
    printer.await.wrap_err("snapshot printer panicked")?;
    result
}

async fn drive(editor: &ProfileEditor, command: Command) -> Result<()> {
    match editor.load_profile().await {
        LoadOutcome::Loaded(_) => {}
        LoadOutcome::Failed(message) => return Err(eyre!("profile load failed: {message}")),
        other => return Err(eyre!("profile load did not complete: {other:?}")),
    }

    let Command::Edit { assignments } = command else {
        return Ok(());
    };

    editor.start_editing();
    for update in assignments {
        editor.update_field(update);
    }
    match editor.save_profile().await {
        SaveOutcome::Saved(_) => Ok(()),
        SaveOutcome::Invalid(errors) => {
            let details = errors
                .iter()
                .map(|(field, error)| format!("{field}: {error}"))
                .collect::<Vec<_>>()
                .join("; ");
            Err(eyre!("profile not saved: {details}"))
        }
        SaveOutcome::Failed(message) => Err(eyre!("profile save failed: {message}")),
        other => Err(eyre!("profile save did not complete: {other:?}")),
    }
}

fn parse_assignment(raw: &str) -> Result<FieldUpdate, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got `{raw}`"))?;
    let field = field
        .trim()
        .parse::<ProfileField>()
        .map_err(|error| error.to_string())?;
    Ok(FieldUpdate::new(field, value))
}

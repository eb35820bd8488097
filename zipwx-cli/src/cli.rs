use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::InquireError;
use zipwx_core::{
    Config, Credential, CredentialStore, LookupController, LookupOutcome,
    provider::client_from_config,
};

use crate::terminal::{TerminalOperator, TerminalSurface};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "zipwx", version, about = "Current weather for a US zip code")]
pub struct Cli {
    /// Path to a config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GeoNames username; prompted for on first lookup when absent.
    #[arg(long, global = true, env = "ZIPWX_USERNAME")]
    pub username: Option<String>,

    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current weather for one zip code.
    Show {
        /// US zip code, e.g. 10001.
        zip: String,
    },

    /// Prompt for zip codes until cancelled; Enter runs a lookup.
    Interactive,

    /// Print the effective configuration and where it was read from.
    Settings,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()?,
        };
        let config = Config::load_from(&config_path)?;
        tracing::debug!(path = %config_path.display(), "Configuration loaded");

        match self.command {
            Command::Settings => {
                println!("# {}", config_path.display());
                print!("{}", config.to_toml_string()?);
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { ref zip } => {
                let mut controller = build_controller(&config, self.username.as_deref())?;
                controller.set_zip_input(zip.as_str());

                // Failures are reported by the operator alert, only the exit code is left.
                match controller.request().await {
                    LookupOutcome::Displayed { .. } | LookupOutcome::Skipped => {
                        Ok(ExitCode::SUCCESS)
                    }
                    LookupOutcome::Failed(_) => Ok(ExitCode::FAILURE),
                }
            }
            Command::Interactive => {
                let mut controller = build_controller(&config, self.username.as_deref())?;
                interactive_loop(&mut controller).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn build_controller(
    config: &Config,
    username: Option<&str>,
) -> anyhow::Result<LookupController<TerminalSurface>> {
    let credentials = match username.and_then(Credential::new) {
        Some(credential) => CredentialStore::with_credential(credential),
        None => CredentialStore::new(),
    };

    let geonames = Arc::new(
        client_from_config(&config.api).context("Failed to build the GeoNames HTTP client")?,
    );

    Ok(LookupController::new(
        config.display,
        Arc::new(credentials),
        geonames.clone(),
        geonames,
        Arc::new(TerminalOperator),
        TerminalSurface::new(),
    ))
}

async fn interactive_loop(
    controller: &mut LookupController<TerminalSurface>,
) -> anyhow::Result<()> {
    loop {
        let initial = controller.zip_input().to_string();
        let answer = tokio::task::spawn_blocking(move || {
            inquire::Text::new("Zip code:")
                .with_initial_value(&initial)
                .with_help_message("Enter to look up, Esc to quit")
                .prompt_skippable()
        })
        .await
        .context("Zip prompt task failed")?;

        let zip = match answer {
            Ok(Some(zip)) => zip,
            Ok(None) | Err(InquireError::OperationInterrupted) => return Ok(()),
            Err(err) => return Err(err).context("Failed to read zip code"),
        };

        controller.set_zip_input(zip);
        // Failures were already shown to the operator; the loop keeps going.
        controller.request().await;
    }
}

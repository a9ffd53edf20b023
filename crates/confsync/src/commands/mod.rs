//! CLI command implementations.
//!
//! Each subcommand builds one typed [`Request`], runs it through the
//! engine against an HTTP client assembled from config + CLI overrides,
//! and reports the [`Outcome`].

mod absent;
mod augment;
mod labels;
mod present;
mod query;
mod read;
mod relocate;

pub(crate) use absent::AbsentArgs;
pub(crate) use augment::{AppendArgs, PrependArgs};
pub(crate) use labels::{AddLabelsArgs, RemoveLabelsArgs};
pub(crate) use present::PresentArgs;
pub(crate) use query::CqlArgs;
pub(crate) use read::PageArgs;
pub(crate) use relocate::MoveArgs;

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use confsync_client::{HttpContentClient, Page};
use confsync_config::{CliSettings, Config};
use confsync_core::{Outcome, Payload, Reconciler, Request};

use crate::error::CliError;
use crate::output::Output;

/// Connection arguments shared by every subcommand.
#[derive(Args)]
pub(crate) struct ConnectionArgs {
    /// Path to configuration file (default: auto-discover confsync.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Confluence base URL (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Confluence username (overrides config).
    #[arg(long)]
    username: Option<String>,

    /// Confluence API token (overrides config).
    #[arg(long, env = "CONFLUENCE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

impl ConnectionArgs {
    /// Assemble the HTTP client from config file + CLI overrides.
    fn client(&self) -> Result<HttpContentClient, CliError> {
        let settings = CliSettings {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            api_token: self.api_token.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        let conf = config.require_confluence()?;

        Ok(HttpContentClient::new(
            &conf.base_url,
            &conf.username,
            &conf.api_token,
            Duration::from_secs(conf.timeout_secs),
        ))
    }
}

/// Run a request through the engine and report its outcome.
pub(crate) fn run_request(
    connection: &ConnectionArgs,
    request: &Request,
    output: &Output,
) -> Result<(), CliError> {
    let client = connection.client()?;
    let reconciler = Reconciler::new(&client);
    let outcome = reconciler.run(request);
    report(output, &outcome)
}

/// Print an outcome; a failure outcome becomes the process error.
fn report(output: &Output, outcome: &Outcome) -> Result<(), CliError> {
    if let Some(kind) = outcome.failure {
        return Err(CliError::Reconcile(format!(
            "{} ({kind:?})",
            outcome.message
        )));
    }

    if outcome.changed {
        output.success(&outcome.message);
    } else {
        output.info(&outcome.message);
    }

    match &outcome.payload {
        Some(Payload::Page(page)) => print_page(output, page),
        Some(Payload::Pages(pages)) => {
            for page in pages {
                print_page_line(output, page);
            }
        }
        Some(Payload::Labels(labels)) if !labels.is_empty() => {
            output.info(&format!("Labels: {}", labels.join(", ")));
        }
        _ => {}
    }

    Ok(())
}

fn print_page(output: &Output, page: &Page) {
    output.info(&format!("ID: {}", page.id));
    output.info(&format!("Title: {}", page.title));
    if let Some(version) = &page.version {
        output.info(&format!("Version: {}", version.number));
    }
}

fn print_page_line(output: &Output, page: &Page) {
    output.info(&format!("  [{}] {}", page.id, page.title));
}

//! `confsync present` command implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use confsync_core::{DesiredPage, PageRef, Request};

use super::{ConnectionArgs, run_request};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the present command.
#[derive(Args)]
pub(crate) struct PresentArgs {
    /// Space key.
    #[arg(short, long)]
    space: String,

    /// Page title.
    #[arg(short, long)]
    title: String,

    /// Page body in wiki markup.
    #[arg(short, long, conflicts_with = "body_file")]
    body: Option<String>,

    /// Read the page body from a file.
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Title of the parent page.
    #[arg(short, long)]
    parent: Option<String>,

    /// Rewrite the page if it already exists.
    #[arg(long)]
    overwrite: bool,

    /// Label to apply after the write (repeatable).
    #[arg(short, long = "label")]
    labels: Vec<String>,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl PresentArgs {
    /// Execute the present command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let body = match (&self.body, &self.body_file) {
            (Some(body), _) => Some(body.clone()),
            (None, Some(path)) => Some(std::fs::read_to_string(path)?),
            (None, None) => None,
        };

        let request = Request::Present(DesiredPage {
            page: PageRef::new(self.space.as_str(), self.title.as_str()),
            body,
            parent: self
                .parent
                .as_deref()
                .map(|parent| PageRef::new(self.space.as_str(), parent)),
            overwrite: self.overwrite,
            labels: self.labels.iter().cloned().collect::<BTreeSet<_>>(),
        });

        run_request(&self.connection, &request, output)
    }
}

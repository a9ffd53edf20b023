//! `confsync add-labels` / `confsync remove-labels` command implementations.

use std::collections::BTreeSet;

use clap::Args;
use confsync_core::{PageRef, Request};

use super::{ConnectionArgs, run_request};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the add-labels command.
#[derive(Args)]
pub(crate) struct AddLabelsArgs {
    /// Space key.
    #[arg(short, long)]
    space: String,

    /// Page title.
    #[arg(short, long)]
    title: String,

    /// Label to attach (repeatable).
    #[arg(short, long = "label", required = true)]
    labels: Vec<String>,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl AddLabelsArgs {
    /// Execute the add-labels command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::AddLabels {
            page: PageRef::new(self.space.as_str(), self.title.as_str()),
            labels: to_set(&self.labels),
        };

        run_request(&self.connection, &request, output)
    }
}

/// Arguments for the remove-labels command.
#[derive(Args)]
pub(crate) struct RemoveLabelsArgs {
    /// Space key.
    #[arg(short, long)]
    space: String,

    /// Page title.
    #[arg(short, long)]
    title: String,

    /// Label to detach (repeatable).
    #[arg(short, long = "label", required = true)]
    labels: Vec<String>,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl RemoveLabelsArgs {
    /// Execute the remove-labels command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::RemoveLabels {
            page: PageRef::new(self.space.as_str(), self.title.as_str()),
            labels: to_set(&self.labels),
        };

        run_request(&self.connection, &request, output)
    }
}

fn to_set(labels: &[String]) -> BTreeSet<String> {
    labels.iter().cloned().collect()
}

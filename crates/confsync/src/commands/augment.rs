//! `confsync append` / `confsync prepend` command implementations.

use std::path::PathBuf;

use clap::Args;
use confsync_core::{PageRef, Request};

use super::{ConnectionArgs, run_request};
use crate::error::CliError;
use crate::output::Output;

/// Shared arguments for the content-splice commands.
#[derive(Args)]
pub(crate) struct SpliceArgs {
    /// Space key.
    #[arg(short, long)]
    space: String,

    /// Page title.
    #[arg(short, long)]
    title: String,

    /// Content to splice, in wiki markup.
    #[arg(
        short,
        long,
        conflicts_with = "body_file",
        required_unless_present = "body_file"
    )]
    body: Option<String>,

    /// Read the content from a file.
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Title of a new parent page (optional re-parenting).
    #[arg(short, long)]
    parent: Option<String>,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl SpliceArgs {
    fn body(&self) -> Result<String, CliError> {
        match (&self.body, &self.body_file) {
            (Some(body), _) => Ok(body.clone()),
            (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
            // clap enforces one of the two
            (None, None) => Ok(String::new()),
        }
    }

    fn page(&self) -> PageRef {
        PageRef::new(self.space.as_str(), self.title.as_str())
    }

    fn parent(&self) -> Option<PageRef> {
        self.parent
            .as_deref()
            .map(|parent| PageRef::new(self.space.as_str(), parent))
    }
}

/// Arguments for the append command.
#[derive(Args)]
pub(crate) struct AppendArgs {
    #[command(flatten)]
    inner: SpliceArgs,
}

impl AppendArgs {
    /// Execute the append command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::Append {
            page: self.inner.page(),
            body: self.inner.body()?,
            parent: self.inner.parent(),
        };

        run_request(&self.inner.connection, &request, output)
    }
}

/// Arguments for the prepend command.
#[derive(Args)]
pub(crate) struct PrependArgs {
    #[command(flatten)]
    inner: SpliceArgs,
}

impl PrependArgs {
    /// Execute the prepend command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::Prepend {
            page: self.inner.page(),
            body: self.inner.body()?,
            parent: self.inner.parent(),
        };

        run_request(&self.inner.connection, &request, output)
    }
}

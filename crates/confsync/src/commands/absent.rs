//! `confsync absent` command implementation.

use clap::Args;
use confsync_core::{PageRef, Request};

use super::{ConnectionArgs, run_request};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the absent command.
#[derive(Args)]
pub(crate) struct AbsentArgs {
    /// Space key.
    #[arg(short, long)]
    space: String,

    /// Page title.
    #[arg(short, long)]
    title: String,

    /// Also delete child pages.
    #[arg(short, long)]
    recursive: bool,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl AbsentArgs {
    /// Execute the absent command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::Absent {
            page: PageRef::new(self.space.as_str(), self.title.as_str()),
            recursive: self.recursive,
        };

        run_request(&self.connection, &request, output)
    }
}

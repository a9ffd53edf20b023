//! `confsync page` command implementation.

use clap::Args;
use confsync_core::{PageRef, Request};

use super::{ConnectionArgs, run_request};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Space key.
    #[arg(short, long)]
    space: String,

    /// Page title.
    #[arg(short, long)]
    title: String,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl PageArgs {
    /// Execute the page command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::Read {
            page: PageRef::new(self.space.as_str(), self.title.as_str()),
        };

        run_request(&self.connection, &request, output)
    }
}

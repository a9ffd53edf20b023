//! `confsync move` command implementation.

use clap::Args;
use confsync_core::Request;

use super::{ConnectionArgs, run_request};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the move command.
#[derive(Args)]
pub(crate) struct MoveArgs {
    /// Space key containing both pages.
    #[arg(short, long)]
    space: String,

    /// Title of the page to move.
    #[arg(long = "from")]
    source: String,

    /// Title of the new parent; the page is appended as its last child.
    #[arg(long = "to")]
    target: String,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl MoveArgs {
    /// Execute the move command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::Move {
            space_key: self.space.clone(),
            source_title: self.source.clone(),
            target_title: self.target.clone(),
        };

        run_request(&self.connection, &request, output)
    }
}

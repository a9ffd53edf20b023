//! `confsync cql` command implementation.

use clap::Args;
use confsync_client::QueryOptions;
use confsync_core::Request;

use super::{ConnectionArgs, run_request};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the cql command.
#[derive(Args)]
pub(crate) struct CqlArgs {
    /// CQL query string, forwarded verbatim to the remote.
    cql: String,

    /// Result offset.
    #[arg(long)]
    start: Option<u32>,

    /// Maximum number of results.
    #[arg(long)]
    limit: Option<u32>,

    /// Sub-resources to expand on each result.
    #[arg(long)]
    expand: Option<String>,

    /// Include content from archived spaces.
    #[arg(long)]
    include_archived: bool,

    /// Excerpt strategy for each result.
    #[arg(long)]
    excerpt: Option<String>,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl CqlArgs {
    /// Execute the cql command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = Request::Query {
            cql: self.cql.clone(),
            options: QueryOptions {
                start: self.start,
                limit: self.limit,
                expand: self.expand.clone(),
                include_archived: self.include_archived,
                excerpt: self.excerpt.clone(),
            },
        };

        run_request(&self.connection, &request, output)
    }
}

//! confsync CLI - declarative Confluence page reconciliation.
//!
//! Provides one subcommand per operation kind:
//! - `present` / `absent`: converge page existence and content
//! - `move`: reposition a page under a new parent
//! - `add-labels` / `remove-labels`: converge the label set
//! - `append` / `prepend`: splice content onto an existing page
//! - `page` / `cql`: read-only lookup and search

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AbsentArgs, AddLabelsArgs, AppendArgs, CqlArgs, MoveArgs, PageArgs, PrependArgs, PresentArgs,
    RemoveLabelsArgs,
};
use error::CliError;
use output::Output;

/// confsync - declare the page you want; confsync makes it so.
#[derive(Parser)]
#[command(name = "confsync", version, about)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Converge a page to its declared state, creating it if absent.
    Present(PresentArgs),
    /// Ensure a page does not exist.
    Absent(AbsentArgs),
    /// Move a page under a new parent.
    Move(MoveArgs),
    /// Attach labels to a page.
    AddLabels(AddLabelsArgs),
    /// Detach labels from a page.
    RemoveLabels(RemoveLabelsArgs),
    /// Append content to an existing page.
    Append(AppendArgs),
    /// Prepend content to an existing page.
    Prepend(PrependArgs),
    /// Read a page without mutating anything.
    Page(PageArgs),
    /// Run a CQL query.
    Cql(CqlArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Present(args) => args.execute(&output),
        Commands::Absent(args) => args.execute(&output),
        Commands::Move(args) => args.execute(&output),
        Commands::AddLabels(args) => args.execute(&output),
        Commands::RemoveLabels(args) => args.execute(&output),
        Commands::Append(args) => args.execute(&output),
        Commands::Prepend(args) => args.execute(&output),
        Commands::Page(args) => args.execute(&output),
        Commands::Cql(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        // Config/usage problems exit 2, reconciliation failures exit 1.
        let code = match err {
            CliError::Config(_) => 2,
            CliError::Io(_) | CliError::Reconcile(_) => 1,
        };
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_present() {
        let cli = Cli::try_parse_from([
            "confsync",
            "present",
            "--space",
            "DOC",
            "--title",
            "Spec",
            "--body",
            "<p>v1</p>",
            "--overwrite",
            "--label",
            "draft",
            "--label",
            "api",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Present(_)));
    }

    #[test]
    fn test_parse_rejects_body_and_body_file_together() {
        let result = Cli::try_parse_from([
            "confsync",
            "present",
            "--space",
            "DOC",
            "--title",
            "Spec",
            "--body",
            "x",
            "--body-file",
            "page.txt",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add_labels_requires_label() {
        let result =
            Cli::try_parse_from(["confsync", "add-labels", "--space", "DOC", "--title", "Spec"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_move() {
        let cli = Cli::try_parse_from([
            "confsync", "move", "--space", "DOC", "--from", "Child", "--to", "Parent",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Move(_)));
    }

    #[test]
    fn test_parse_append_requires_body() {
        let result =
            Cli::try_parse_from(["confsync", "append", "--space", "DOC", "--title", "Spec"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_cql_with_paging() {
        let cli = Cli::try_parse_from([
            "confsync",
            "cql",
            "type=page and space=DOC",
            "--limit",
            "10",
            "--include-archived",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Cql(_)));
    }

    #[test]
    fn test_parse_unknown_subcommand_rejected() {
        let result = Cli::try_parse_from(["confsync", "upsert", "--space", "DOC"]);

        assert!(result.is_err());
    }
}

//! CLI command definitions and handlers.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod commands;

/// Inspect project comment snapshots and replay command journals
#[derive(Parser, Debug)]
#[command(name = "remark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// User to render reactions and authorship for
    /// (default: $REMARK_VIEWER or $REMARK_USER, else anonymous)
    #[arg(long, global = true)]
    pub viewer: Option<String>,

    /// Log store operations at debug level (overridden by $REMARK_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where comment state comes from: a snapshot, optionally advanced by a journal.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Snapshot file (JSON object of project id -> root comments)
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Command journal (JSON Lines) replayed on top of the snapshot
    #[arg(long)]
    pub journal: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a project's comments newest first, replies beneath
    View {
        #[command(flatten)]
        source: SourceArgs,

        /// Project ID
        #[arg(long)]
        project: String,
    },

    /// Show one comment and its replies
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Project ID
        #[arg(long)]
        project: String,

        /// Comment ID
        comment_id: String,
    },

    /// Show comment and reaction counts for every project
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Validate a command journal and count its commands
    Check {
        /// Journal file
        journal: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_view_with_globals() {
        let cli = Cli::try_parse_from([
            "remark",
            "--json",
            "view",
            "--snapshot",
            "snap.json",
            "--project",
            "P1",
            "--viewer",
            "u1",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.viewer.as_deref(), Some("u1"));
        match cli.command {
            Commands::View { source, project } => {
                assert_eq!(project, "P1");
                assert_eq!(source.snapshot, PathBuf::from("snap.json"));
                assert!(source.journal.is_none());
            }
            other => panic!("Expected View, got {other:?}"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["remark", "check", "journal.jsonl", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.json);
    }

    #[test]
    fn test_show_requires_comment_id() {
        let result = Cli::try_parse_from([
            "remark",
            "show",
            "--snapshot",
            "snap.json",
            "--project",
            "P1",
        ]);
        assert!(result.is_err());
    }
}

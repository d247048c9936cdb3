//! remark - inspect project comment snapshots and replay command journals

use anyhow::Result;
use clap::Parser;

use remark_cli::cli::commands::helpers::resolve_viewer;
use remark_cli::cli::commands::{run_check, run_show, run_stats, run_view};
use remark_cli::cli::{Cli, Commands};
use remark_cli::logging;
use remark_cli::output::OutputFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let viewer = resolve_viewer(cli.viewer.as_deref());

    match cli.command {
        Commands::View { source, project } => {
            run_view(&source, &project, viewer.as_deref(), format)?;
        }

        Commands::Show {
            source,
            project,
            comment_id,
        } => {
            run_show(&source, &project, &comment_id, viewer.as_deref(), format)?;
        }

        Commands::Stats { source } => {
            run_stats(&source, format)?;
        }

        Commands::Check { journal } => {
            run_check(&journal, format)?;
        }
    }

    Ok(())
}

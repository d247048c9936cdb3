//! Implementation of `remark stats`.

use anyhow::Result;

use crate::cli::commands::helpers::open_store;
use crate::cli::SourceArgs;
use crate::output::{Formatter, OutputFormat};
use remark_core::view::ForestStats;
use remark_core::CommentStore;

/// Show comment and reaction counts for every project in the snapshot.
#[tracing::instrument(skip(source, format))]
pub fn run_stats(source: &SourceArgs, format: OutputFormat) -> Result<()> {
    let store = open_store(source)?;
    let stats = collect_stats(&store);

    let formatter = Formatter::new(format);
    formatter.print_list(&stats, "No projects in snapshot", "projects")?;

    Ok(())
}

fn collect_stats(store: &CommentStore) -> Vec<ForestStats> {
    let mut projects: Vec<&str> = store.projects().collect();
    projects.sort_unstable();
    projects
        .into_iter()
        .map(|project_id| ForestStats::compute(project_id, store.roots(project_id)))
        .collect()
}

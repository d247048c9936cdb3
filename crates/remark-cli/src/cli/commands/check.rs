//! Implementation of `remark check`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::output::{Formatter, OutputFormat};
use remark_core::command::{read_journal, CommandEnvelope};

/// Summary of a validated journal.
#[derive(Debug, Serialize)]
pub struct JournalReport {
    pub commands: usize,
    pub actors: usize,
    pub projects: usize,
    pub by_kind: BTreeMap<&'static str, usize>,
}

/// Parse a journal and report what it contains.
#[tracing::instrument(skip(format))]
pub fn run_check(journal: &Path, format: OutputFormat) -> Result<()> {
    let entries = read_journal(journal)
        .with_context(|| format!("Invalid journal {}", journal.display()))?;

    let formatter = Formatter::new(format);
    formatter.print(&summarize_journal(&entries))?;

    Ok(())
}

fn summarize_journal(entries: &[CommandEnvelope]) -> JournalReport {
    let mut by_kind = BTreeMap::new();
    let mut actors = Vec::new();
    let mut projects = Vec::new();

    for entry in entries {
        *by_kind.entry(entry.command.kind()).or_insert(0) += 1;
        actors.push(entry.actor.as_str());
        projects.push(entry.command.project_id());
    }
    actors.sort_unstable();
    actors.dedup();
    projects.sort_unstable();
    projects.dedup();

    JournalReport {
        commands: entries.len(),
        actors: actors.len(),
        projects: projects.len(),
        by_kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::fixtures::{write, JOURNAL};
    use remark_core::command::parse_journal;

    #[test]
    fn test_summarize_journal() {
        let entries = parse_journal(JOURNAL).unwrap();
        let report = summarize_journal(&entries);
        assert_eq!(report.commands, 2);
        assert_eq!(report.actors, 2);
        assert_eq!(report.projects, 1);
        assert_eq!(report.by_kind.get("ToggleDislike"), Some(&1));
        assert_eq!(report.by_kind.get("Delete"), Some(&1));
    }

    #[test]
    fn test_run_check_rejects_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "journal.jsonl", "\n{\"ts\":1}\n");
        let err = run_check(&path, OutputFormat::Text).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}

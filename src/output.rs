//! Summary formatting and export.
//!
//! Supports console lines, a pretty-printed JSON report, and a CSV export
//! with one row per interface.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::{QuestionnaireAggregate, Summary, TaskAggregate};
use crate::config::DisplayNames;

/// `<DisplayName> <time>s <accuracy>%`
pub fn format_task_line(name: &str, aggregate: &TaskAggregate) -> String {
    format!(
        "{} {:.2}s {:.2}%",
        name, aggregate.avg_time_s, aggregate.avg_accuracy
    )
}

/// `<DisplayName>: satisfaction=<x>/5 effort=<y>/5`, with `n/a` for a score nobody gave.
pub fn format_questionnaire_line(name: &str, aggregate: &QuestionnaireAggregate) -> String {
    format!(
        "{}: satisfaction={}/5 effort={}/5",
        name,
        format_score(aggregate.satisfaction),
        format_score(aggregate.effort)
    )
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

/// Writes the task summary heading and one line per interface.
pub fn write_task_summary<W: Write>(
    out: &mut W,
    groups: &[TaskAggregate],
    names: &DisplayNames,
) -> Result<()> {
    writeln!(out, "Summary per input method:")?;
    for aggregate in groups {
        writeln!(out, "{}", format_task_line(&names.resolve(&aggregate.interface), aggregate))?;
    }
    Ok(())
}

/// Writes the questionnaire heading and one line per interface.
pub fn write_questionnaire_summary<W: Write>(
    out: &mut W,
    groups: &[QuestionnaireAggregate],
    names: &DisplayNames,
) -> Result<()> {
    writeln!(out, "Mean satisfaction and effort per input method:")?;
    for aggregate in groups {
        writeln!(
            out,
            "{}",
            format_questionnaire_line(&names.resolve(&aggregate.interface), aggregate)
        )?;
    }
    Ok(())
}

/// Writes the full summary as pretty-printed JSON.
pub fn write_json<A: Serialize>(path: &Path, summary: &Summary<A>) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    info!(path = %path.display(), "JSON report written");
    Ok(())
}

/// Writes one CSV row per aggregate, replacing any existing file.
pub fn write_csv<A: Serialize>(path: &Path, groups: &[A]) -> Result<()> {
    debug!(path = %path.display(), rows = groups.len(), "Writing CSV export");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for aggregate in groups {
        writer.serialize(aggregate)?;
    }
    writer.flush()?;

    info!(path = %path.display(), "CSV export written");
    Ok(())
}

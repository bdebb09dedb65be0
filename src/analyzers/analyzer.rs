use crate::analyzers::aggregate::{aggregate_questionnaires, aggregate_tasks};
use crate::analyzers::schema::{QuestionnaireSchema, TaskSchema};
use crate::analyzers::types::{QuestionnaireSummary, Summary, TaskSummary};
use crate::error::SummaryError;
use crate::loader::{discover_csv_files, load_records};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Loads every task CSV in `dir` and averages time and accuracy per interface.
///
/// # Errors
///
/// Fails when the directory is missing or has no CSV files, or when no
/// interface ends up with valid data.
#[tracing::instrument(skip(dir), fields(dir = %dir.display()))]
pub fn analyze_tasks(dir: &Path) -> Result<TaskSummary, SummaryError> {
    let files = discover_csv_files(dir)?;
    let (records, load) = load_records(&TaskSchema, &files);
    info!(valid_tasks = records.len(), "Task rows loaded");

    let groups = aggregate_tasks(&records);
    if groups.is_empty() {
        return Err(SummaryError::NoValidAggregates);
    }

    Ok(Summary {
        generated_at: Utc::now(),
        load,
        groups,
    })
}

/// Loads every CSV in `dir`, keeps questionnaire rows and averages their
/// satisfaction (`q1`) and effort (`q2`) scores per interface.
///
/// # Errors
///
/// Same fatal conditions as [`analyze_tasks`].
#[tracing::instrument(skip(dir), fields(dir = %dir.display()))]
pub fn analyze_questionnaires(dir: &Path) -> Result<QuestionnaireSummary, SummaryError> {
    let files = discover_csv_files(dir)?;
    let schema = QuestionnaireSchema::new();
    let (records, load) = load_records(&schema, &files);
    info!(responses = records.len(), "Questionnaire rows loaded");

    let groups = aggregate_questionnaires(&records);
    if groups.is_empty() {
        return Err(SummaryError::NoValidAggregates);
    }

    Ok(Summary {
        generated_at: Utc::now(),
        load,
        groups,
    })
}

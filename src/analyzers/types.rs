//! Data types used by the aggregation pipelines.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A validated row of the task pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub interface: String,
    pub time_s: f64,
    pub accuracy: f64,
}

/// A questionnaire row with its extracted scores.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireRecord {
    pub interface: String,
    /// `q1`, 0–5 by convention.
    pub satisfaction: Option<u32>,
    /// `q2`, 0–5 by convention.
    pub effort: Option<u32>,
}

/// Mean task time and accuracy for one interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskAggregate {
    pub interface: String,
    pub samples: usize,
    pub avg_time_s: f64,
    pub avg_accuracy: f64,
    pub time_stddev: f64,
    pub accuracy_stddev: f64,
}

/// Mean questionnaire scores for one interface.
///
/// A score with no answers in the group is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireAggregate {
    pub interface: String,
    pub responses: usize,
    pub satisfaction: Option<f64>,
    pub effort: Option<f64>,
}

/// Counters describing what a load pass accepted and skipped.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub files_found: usize,
    pub files_read: usize,
    pub files_skipped: usize,
    pub rows_accepted: usize,
    pub rows_skipped: usize,
    /// Rows that parsed but do not belong to the pipeline (e.g. non-questionnaire tasks).
    pub rows_ignored: usize,
}

/// Result of a full pipeline run, serialized as the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct Summary<A> {
    pub generated_at: DateTime<Utc>,
    pub load: LoadReport,
    pub groups: Vec<A>,
}

pub type TaskSummary = Summary<TaskAggregate>;
pub type QuestionnaireSummary = Summary<QuestionnaireAggregate>;

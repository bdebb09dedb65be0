//! Per-pipeline row schemas: which columns a file must have and how a row
//! becomes a record.

use csv::StringRecord;

use crate::analyzers::types::{QuestionnaireRecord, TaskRecord};
use crate::error::RowError;
use crate::extract::{EFFORT_KEY, SATISFACTION_KEY, ScoreExtractor};
use crate::parser::{Header, normalize_interface, parse_decimal};

/// Binds a normalized header to column indices and turns rows into records.
pub trait RowSchema {
    type Columns;
    type Record;

    fn name(&self) -> &'static str;

    /// Column names (normalized) a file must contain to be read at all.
    fn required_columns(&self) -> &'static [&'static str];

    /// `None` if any required column is missing.
    fn bind(&self, header: &Header) -> Option<Self::Columns>;

    /// `Ok(None)` means the row is valid but not relevant to this pipeline.
    fn parse_row(
        &self,
        columns: &Self::Columns,
        row: &StringRecord,
    ) -> Result<Option<Self::Record>, RowError>;
}

fn check_len(row: &StringRecord, needed: usize) -> Result<(), RowError> {
    if row.len() < needed {
        return Err(RowError::ShortRow {
            len: row.len(),
            needed,
        });
    }
    Ok(())
}

pub struct TaskSchema;

#[derive(Debug, Clone, Copy)]
pub struct TaskColumns {
    interface: usize,
    time_s: usize,
    accuracy: usize,
}

impl TaskColumns {
    fn needed(&self) -> usize {
        self.interface.max(self.time_s).max(self.accuracy) + 1
    }
}

impl RowSchema for TaskSchema {
    type Columns = TaskColumns;
    type Record = TaskRecord;

    fn name(&self) -> &'static str {
        "tasks"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["interface", "time_s", "accuracy"]
    }

    fn bind(&self, header: &Header) -> Option<TaskColumns> {
        Some(TaskColumns {
            interface: header.position("interface")?,
            time_s: header.position("time_s")?,
            accuracy: header.position("accuracy")?,
        })
    }

    fn parse_row(
        &self,
        columns: &TaskColumns,
        row: &StringRecord,
    ) -> Result<Option<TaskRecord>, RowError> {
        check_len(row, columns.needed())?;

        let interface = normalize_interface(&row[columns.interface])?;
        let time_s = parse_decimal("time_s", &row[columns.time_s])?;
        let accuracy = parse_decimal("accuracy", &row[columns.accuracy])?;

        Ok(Some(TaskRecord {
            interface,
            time_s,
            accuracy,
        }))
    }
}

const QUESTIONNAIRE_TASK_TYPE: &str = "questionnaire";

/// Questionnaire rows: `tasktype == questionnaire`, scores pulled out of `task`.
pub struct QuestionnaireSchema {
    satisfaction: ScoreExtractor,
    effort: ScoreExtractor,
}

impl QuestionnaireSchema {
    pub fn new() -> Self {
        Self {
            satisfaction: ScoreExtractor::new(SATISFACTION_KEY),
            effort: ScoreExtractor::new(EFFORT_KEY),
        }
    }
}

impl Default for QuestionnaireSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionnaireColumns {
    interface: usize,
    task: usize,
    task_type: usize,
}

impl QuestionnaireColumns {
    fn needed(&self) -> usize {
        self.interface.max(self.task).max(self.task_type) + 1
    }
}

impl RowSchema for QuestionnaireSchema {
    type Columns = QuestionnaireColumns;
    type Record = QuestionnaireRecord;

    fn name(&self) -> &'static str {
        "questionnaire"
    }

    // `taskType` and `tasktype` both normalize to `tasktype`.
    fn required_columns(&self) -> &'static [&'static str] {
        &["interface", "task", "tasktype"]
    }

    fn bind(&self, header: &Header) -> Option<QuestionnaireColumns> {
        Some(QuestionnaireColumns {
            interface: header.position("interface")?,
            task: header.position("task")?,
            task_type: header.position("tasktype")?,
        })
    }

    fn parse_row(
        &self,
        columns: &QuestionnaireColumns,
        row: &StringRecord,
    ) -> Result<Option<QuestionnaireRecord>, RowError> {
        check_len(row, columns.needed())?;

        if !row[columns.task_type]
            .trim()
            .eq_ignore_ascii_case(QUESTIONNAIRE_TASK_TYPE)
        {
            return Ok(None);
        }

        let interface = normalize_interface(&row[columns.interface])?;
        let task = &row[columns.task];

        Ok(Some(QuestionnaireRecord {
            interface,
            satisfaction: self.satisfaction.extract(task),
            effort: self.effort.extract(task),
        }))
    }
}

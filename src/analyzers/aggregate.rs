use crate::analyzers::types::{
    QuestionnaireAggregate, QuestionnaireRecord, TaskAggregate, TaskRecord,
};
use crate::analyzers::utility::{mean, stddev};
use std::collections::HashMap;

/// Insertion-ordered grouping keyed by interface name.
///
/// Iteration yields groups in the order their key was first seen.
#[derive(Debug)]
pub struct Grouped<T> {
    index: HashMap<String, usize>,
    groups: Vec<(String, T)>,
}

impl<T> Default for Grouped<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<T: Default> Grouped<T> {
    pub fn entry(&mut self, key: &str) -> &mut T {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.groups.push((key.to_string(), T::default()));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[slot].1
    }
}

impl<T> Grouped<T> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Default)]
struct TaskSeries {
    times: Vec<f64>,
    accuracies: Vec<f64>,
}

#[derive(Debug, Default)]
struct QuestionnaireSeries {
    responses: usize,
    satisfaction: Vec<f64>,
    effort: Vec<f64>,
}

/// Averages task time and accuracy per interface.
///
/// Groups come out in first-seen order. A group lacking either series is
/// dropped.
pub fn aggregate_tasks(records: &[TaskRecord]) -> Vec<TaskAggregate> {
    let mut grouped: Grouped<TaskSeries> = Grouped::default();

    for record in records {
        let series = grouped.entry(&record.interface);
        series.times.push(record.time_s);
        series.accuracies.push(record.accuracy);
    }

    grouped
        .iter()
        .filter_map(|(interface, series)| {
            let avg_time_s = mean(&series.times)?;
            let avg_accuracy = mean(&series.accuracies)?;

            Some(TaskAggregate {
                interface: interface.to_string(),
                samples: series.times.len(),
                avg_time_s,
                avg_accuracy,
                time_stddev: stddev(&series.times, avg_time_s),
                accuracy_stddev: stddev(&series.accuracies, avg_accuracy),
            })
        })
        .collect()
}

/// Averages questionnaire scores per interface, sorted by interface key.
///
/// Each score is averaged over the answers present for it; a score nobody
/// answered stays `None` without affecting the other.
pub fn aggregate_questionnaires(records: &[QuestionnaireRecord]) -> Vec<QuestionnaireAggregate> {
    let mut grouped: Grouped<QuestionnaireSeries> = Grouped::default();

    for record in records {
        let series = grouped.entry(&record.interface);
        series.responses += 1;
        if let Some(score) = record.satisfaction {
            series.satisfaction.push(score as f64);
        }
        if let Some(score) = record.effort {
            series.effort.push(score as f64);
        }
    }

    let mut aggregates: Vec<_> = grouped
        .iter()
        .map(|(interface, series)| QuestionnaireAggregate {
            interface: interface.to_string(),
            responses: series.responses,
            satisfaction: mean(&series.satisfaction),
            effort: mean(&series.effort),
        })
        .collect();

    aggregates.sort_by(|a, b| a.interface.cmp(&b.interface));
    aggregates
}

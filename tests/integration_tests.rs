use hci_rater::analyzers::analyzer::{analyze_questionnaires, analyze_tasks};
use hci_rater::chart::{Chart, ChartSink, render_all, task_charts};
use hci_rater::config::DisplayNames;
use hci_rater::error::SummaryError;
use hci_rater::output::write_task_summary;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[derive(Default)]
struct CountingSink {
    rendered: usize,
}

impl ChartSink for CountingSink {
    fn render(&mut self, _chart: &Chart) -> anyhow::Result<()> {
        self.rendered += 1;
        Ok(())
    }
}

#[test]
fn test_task_pipeline_end_to_end() {
    let summary = analyze_tasks(&fixture("tasks")).expect("tasks fixture should aggregate");

    assert_eq!(summary.groups.len(), 2);

    let keyboard = &summary.groups[0];
    assert_eq!(keyboard.interface, "keyboard");
    assert_eq!(keyboard.avg_time_s, 3.75);
    assert_eq!(keyboard.avg_accuracy, 92.5);

    let voice = &summary.groups[1];
    assert_eq!(voice.interface, "voice");
    assert_eq!(voice.avg_time_s, 5.0);
    assert_eq!(voice.avg_accuracy, 80.0);

    // session2.csv has no accuracy column
    assert_eq!(summary.load.files_found, 2);
    assert_eq!(summary.load.files_read, 1);
    assert_eq!(summary.load.files_skipped, 1);
    assert!(summary.groups.iter().all(|g| g.interface != "touch"));
}

#[test]
fn test_task_pipeline_text_output() {
    let summary = analyze_tasks(&fixture("tasks")).unwrap();

    let mut out = Vec::new();
    write_task_summary(&mut out, &summary.groups, &DisplayNames::default()).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Keyboard 3.75s 92.50%"));
    assert!(text.contains("Voice 5.00s 80.00%"));
}

#[test]
fn test_comma_decimals_and_bad_rows() {
    let summary = analyze_tasks(&fixture("decimals")).unwrap();

    assert_eq!(summary.groups.len(), 1);
    assert_eq!(summary.groups[0].interface, "touch");
    assert_eq!(summary.groups[0].avg_time_s, 3.0);
    assert_eq!(summary.groups[0].avg_accuracy, 90.0);
    assert_eq!(summary.load.rows_skipped, 1);
}

#[test]
fn test_corrupt_header_skips_only_that_file() {
    let summary = analyze_tasks(&fixture("corrupt")).unwrap();

    // a_bad_header.csv starts with bytes that are not UTF-8
    assert_eq!(summary.load.files_found, 2);
    assert_eq!(summary.load.files_read, 1);
    assert_eq!(summary.load.files_skipped, 1);

    assert_eq!(summary.groups.len(), 1);
    assert_eq!(summary.groups[0].interface, "voice");
    assert_eq!(summary.groups[0].avg_time_s, 6.0);
    assert_eq!(summary.groups[0].avg_accuracy, 85.0);
}

#[test]
fn test_questionnaire_pipeline_end_to_end() {
    let summary = analyze_questionnaires(&fixture("questionnaire")).unwrap();

    let keys: Vec<_> = summary.groups.iter().map(|g| g.interface.as_str()).collect();
    assert_eq!(keys, vec!["keyboard", "touch", "voice"]);

    let keyboard = &summary.groups[0];
    assert_eq!(keyboard.satisfaction, Some(4.5));
    assert_eq!(keyboard.effort, Some(2.5));

    let touch = &summary.groups[1];
    assert_eq!(touch.satisfaction, Some(2.0));
    assert_eq!(touch.effort, Some(4.0));

    let voice = &summary.groups[2];
    assert_eq!(voice.responses, 2);
    assert_eq!(voice.satisfaction, Some(4.0));
    assert_eq!(voice.effort, None);

    assert_eq!(summary.load.rows_ignored, 2);
}

#[test]
fn test_empty_directory_stops_before_charts() {
    let dir = std::env::temp_dir().join("hci_rater_it_empty");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let mut sink = CountingSink::default();
    let result = analyze_tasks(&dir).map(|summary| {
        render_all(&mut sink, &task_charts(&summary.groups, &DisplayNames::default())).unwrap();
    });

    let err = result.unwrap_err();
    assert!(matches!(err, SummaryError::NoFilesFound(_)));
    assert!(err.is_fatal());
    assert_eq!(sink.rendered, 0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_directory_is_fatal() {
    let err = analyze_tasks(&fixture("no_such_dir")).unwrap_err();
    assert!(matches!(err, SummaryError::MissingDirectory(_)));
}

#[test]
fn test_no_valid_rows_is_fatal() {
    let err = analyze_tasks(&fixture("questionnaire")).unwrap_err();
    assert!(matches!(err, SummaryError::NoValidAggregates));

    let err = analyze_questionnaires(&fixture("tasks")).unwrap_err();
    assert!(matches!(err, SummaryError::NoValidAggregates));
}

#[test]
fn test_charts_follow_group_order() {
    let summary = analyze_tasks(&fixture("tasks")).unwrap();

    let mut sink = CountingSink::default();
    let charts = task_charts(&summary.groups, &DisplayNames::default());
    render_all(&mut sink, &charts).unwrap();

    assert_eq!(sink.rendered, 3);
    let Chart::Bar(time) = &charts[0] else {
        panic!("expected bar chart");
    };
    assert_eq!(time.labels, vec!["Keyboard", "Voice"]);
    assert_eq!(time.values, vec![3.75, 5.0]);
}

//! Chart data handed to a rendering collaborator.
//!
//! The summary side only builds [`Chart`] values: a title, axis labels and
//! parallel label/value sequences in group order. A [`ChartSink`] decides how
//! they are drawn. [`SvgChartSink`] writes one SVG file per chart using
//! `plotters`.

use anyhow::Result;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::{QuestionnaireAggregate, TaskAggregate};
use crate::config::DisplayNames;

const INPUT_METHOD_LABEL: &str = "Input method";
const TIME_LABEL: &str = "Time (seconds)";
const ACCURACY_LABEL: &str = "Accuracy (%)";

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Bars on the primary axis with a line over them on a secondary axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboChart {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub labels: Vec<String>,
    pub bar_label: String,
    pub bars: Vec<f64>,
    pub line_label: String,
    pub line: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChart),
    Combo(ComboChart),
}

impl Chart {
    pub fn id(&self) -> &str {
        match self {
            Chart::Bar(c) => &c.id,
            Chart::Combo(c) => &c.id,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Chart::Bar(c) => c.labels.is_empty(),
            Chart::Combo(c) => c.labels.is_empty(),
        }
    }
}

/// Something that can draw charts.
pub trait ChartSink {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

/// Hands every non-empty chart to `sink`, in order.
pub fn render_all<S: ChartSink + ?Sized>(sink: &mut S, charts: &[Chart]) -> Result<()> {
    for chart in charts {
        if chart.is_empty() {
            debug!(chart = chart.id(), "Chart has no data, skipped");
            continue;
        }
        sink.render(chart)?;
    }
    Ok(())
}

/// Mean time, mean accuracy, and the two combined.
pub fn task_charts(groups: &[TaskAggregate], names: &DisplayNames) -> Vec<Chart> {
    let labels = names.resolve_all(groups.iter().map(|g| g.interface.as_str()));
    let times: Vec<f64> = groups.iter().map(|g| g.avg_time_s).collect();
    let accuracies: Vec<f64> = groups.iter().map(|g| g.avg_accuracy).collect();

    vec![
        Chart::Bar(BarChart {
            id: "avg_time".into(),
            title: "Mean time per input method".into(),
            x_label: INPUT_METHOD_LABEL.into(),
            y_label: TIME_LABEL.into(),
            labels: labels.clone(),
            values: times.clone(),
        }),
        Chart::Bar(BarChart {
            id: "avg_accuracy".into(),
            title: "Mean accuracy per input method".into(),
            x_label: INPUT_METHOD_LABEL.into(),
            y_label: ACCURACY_LABEL.into(),
            labels: labels.clone(),
            values: accuracies.clone(),
        }),
        Chart::Combo(ComboChart {
            id: "time_and_accuracy".into(),
            title: "Time and accuracy per input method".into(),
            x_label: INPUT_METHOD_LABEL.into(),
            labels,
            bar_label: TIME_LABEL.into(),
            bars: times,
            line_label: ACCURACY_LABEL.into(),
            line: accuracies,
        }),
    ]
}

/// Mean satisfaction and mean effort. Interfaces without a score are left
/// out of that score's chart.
pub fn questionnaire_charts(groups: &[QuestionnaireAggregate], names: &DisplayNames) -> Vec<Chart> {
    vec![
        score_chart(
            groups,
            names,
            ("satisfaction", "Mean satisfaction per input method"),
            "Satisfaction (0-5)",
            |g| g.satisfaction,
        ),
        score_chart(
            groups,
            names,
            ("effort", "Mean effort per input method"),
            "Effort (0-5)",
            |g| g.effort,
        ),
    ]
}

fn score_chart(
    groups: &[QuestionnaireAggregate],
    names: &DisplayNames,
    (id, title): (&str, &str),
    y_label: &str,
    score: fn(&QuestionnaireAggregate) -> Option<f64>,
) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = groups
        .iter()
        .filter_map(|g| score(g).map(|v| (names.resolve(&g.interface), v)))
        .unzip();

    Chart::Bar(BarChart {
        id: id.into(),
        title: title.into(),
        x_label: INPUT_METHOD_LABEL.into(),
        y_label: y_label.into(),
        labels,
        values,
    })
}

const SVG_SIZE: (u32, u32) = (900, 600);

/// Renders each chart to `<dir>/<id>.svg`.
pub struct SvgChartSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgChartSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ChartSink for SvgChartSink {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        let path = self.dir.join(format!("{}.svg", chart.id()));
        match chart {
            Chart::Bar(c) => draw_bar(&path, c)?,
            Chart::Combo(c) => draw_combo(&path, c)?,
        }
        info!(path = %path.display(), "Chart written");
        self.written.push(path);
        Ok(())
    }
}

fn value_range(values: &[f64]) -> Range<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let min = values.iter().copied().fold(0.0_f64, f64::min);
    let top = if max > 0.0 { max * 1.15 } else { 1.0 };
    min * 1.15..top
}

fn segment_label(labels: &[String], x: &SegmentValue<u32>) -> String {
    match x {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn bar(i: usize, value: f64) -> Rectangle<(SegmentValue<u32>, f64)> {
    let x = i as u32;
    let mut rect = Rectangle::new(
        [(SegmentValue::Exact(x), 0.0), (SegmentValue::Exact(x + 1), value)],
        Palette99::pick(i).filled(),
    );
    rect.set_margin(0, 0, 20, 20);
    rect
}

fn draw_bar(path: &Path, chart: &BarChart) -> Result<()> {
    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = chart.labels.len() as u32;
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), value_range(&chart.values))?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_label_formatter(&|x| segment_label(&chart.labels, x))
        .draw()?;

    ctx.draw_series(chart.values.iter().enumerate().map(|(i, v)| bar(i, *v)))?;

    root.present()?;
    Ok(())
}

fn draw_combo(path: &Path, chart: &ComboChart) -> Result<()> {
    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = chart.labels.len() as u32;
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), value_range(&chart.bars))?
        .set_secondary_coord((0u32..n).into_segmented(), value_range(&chart.line));

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.bar_label.as_str())
        .x_label_formatter(&|x| segment_label(&chart.labels, x))
        .draw()?;
    ctx.configure_secondary_axes()
        .y_desc(chart.line_label.as_str())
        .draw()?;

    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, v)| bar(i, *v)))?;

    let points = || {
        chart
            .line
            .iter()
            .enumerate()
            .map(|(i, v)| (SegmentValue::CenterOf(i as u32), *v))
    };
    ctx.draw_secondary_series(LineSeries::new(points(), RED.stroke_width(2)))?;
    ctx.draw_secondary_series(points().map(|p| Circle::new(p, 4, RED.filled())))?;

    root.present()?;
    Ok(())
}

//! Output Module: Visualization Sinks
//!
//! Integration results are handed to a [`VisualizationSink`] together
//! with a [`ChartSpec`] (title, axis labels, legend). The sinks here are
//! headless:
//!
//! - **Table**: fixed-width `(t, microbiota, serotonin, brain_activity)` rows
//! - **CSV**: one record per sample, tagged with the scenario
//! - **JSON**: one document per run (JSON Lines)
//! - **Chart**: text line chart with axes and legend

mod chart;
mod csv_sink;
mod json;
mod table;

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;
use crate::scenario::ScenarioRun;
use crate::series::TimeSeries;

pub use chart::ChartSink;
pub use csv_sink::CsvSink;
pub use json::JsonSink;
pub use table::TableSink;

/// Legend labels for the three cascade variables
pub const SERIES_LABELS: [&str; 3] = ["Gut Microbiota", "Serotonin", "Brain Activity"];

/// Presentation metadata for one rendered run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    /// Scenario tag (perturbation name)
    pub scenario: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend entries, one per state variable
    pub series_labels: Vec<String>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scenario: scenario.into(),
            x_label: "Time".to_string(),
            y_label: "Concentration/Activity".to_string(),
            series_labels: SERIES_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn for_run(run: &ScenarioRun) -> Self {
        Self::new(run.title(), run.perturbation.name())
    }
}

/// Consumer of integrated time series
pub trait VisualizationSink {
    /// Render one series
    fn render(&mut self, chart: &ChartSpec, series: &TimeSeries) -> Result<()>;

    /// Flush anything buffered
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Selectable sink kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
    Chart,
}

/// Build the sink for `format` writing to `writer`
pub fn sink_for<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
    stride: usize,
) -> Box<dyn VisualizationSink + 'w> {
    match format {
        OutputFormat::Table => Box::new(TableSink::new(writer).with_stride(stride)),
        OutputFormat::Csv => Box::new(CsvSink::new(writer)),
        OutputFormat::Json => Box::new(JsonSink::new(writer)),
        OutputFormat::Chart => Box::new(ChartSink::new(writer)),
    }
}

/// Render every run through `sink`, then finish it
pub fn render_runs(sink: &mut dyn VisualizationSink, runs: &[ScenarioRun]) -> Result<()> {
    for run in runs {
        sink.render(&ChartSpec::for_run(run), &run.series)?;
    }
    sink.finish()
}

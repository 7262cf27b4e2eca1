//! JSON Lines sink: one document per rendered run.

use std::io::Write;

use serde::Serialize;

use super::{ChartSpec, VisualizationSink};
use crate::error::Result;
use crate::series::{TimeSeries, VariableSummary};

#[derive(Serialize)]
struct NamedSeries<'a> {
    label: &'a str,
    variable: &'a str,
    values: Vec<f64>,
}

#[derive(Serialize)]
struct RunDocument<'a> {
    #[serde(flatten)]
    chart: &'a ChartSpec,
    time: Vec<f64>,
    series: Vec<NamedSeries<'a>>,
    summary: Vec<VariableSummary>,
}

pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> VisualizationSink for JsonSink<W> {
    fn render(&mut self, chart: &ChartSpec, series: &TimeSeries) -> Result<()> {
        let named = series
            .labels()
            .iter()
            .enumerate()
            .map(|(idx, &variable)| NamedSeries {
                label: chart
                    .series_labels
                    .get(idx)
                    .map(String::as_str)
                    .unwrap_or(variable),
                variable,
                values: series.column(idx).to_vec(),
            })
            .collect();

        let doc = RunDocument {
            chart,
            time: series.time().to_vec(),
            series: named,
            summary: series.summary(),
        };

        serde_json::to_writer(&mut self.writer, &doc)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::{integrate, IntegratorConfig};
    use crate::systems::GutBrainAxis;

    #[test]
    fn test_document_shape() {
        let series = integrate(&GutBrainAxis::default(), &IntegratorConfig::new(2.0, 5)).unwrap();
        let mut buf = Vec::new();
        {
            let mut sink = JsonSink::new(&mut buf);
            sink.render(&ChartSpec::new("Gut-Brain Axis Simulation", "none"), &series)
                .unwrap();
        }

        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["title"], "Gut-Brain Axis Simulation");
        assert_eq!(doc["x_label"], "Time");
        assert_eq!(doc["time"].as_array().unwrap().len(), 5);
        assert_eq!(doc["series"][0]["label"], "Gut Microbiota");
        assert_eq!(doc["series"][2]["variable"], "brain_activity");
        assert_eq!(doc["series"][0]["values"][0], 100.0);
        assert_eq!(doc["summary"][1]["initial"], 50.0);
    }
}

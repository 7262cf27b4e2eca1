//! CSV export sink.
//!
//! Columns: `scenario,t,<variables…>`. The header is written once, so
//! several runs can share one stream.

use std::io::Write;

use super::{ChartSpec, VisualizationSink};
use crate::error::Result;
use crate::series::TimeSeries;

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
        }
    }
}

impl<W: Write> VisualizationSink for CsvSink<W> {
    fn render(&mut self, chart: &ChartSpec, series: &TimeSeries) -> Result<()> {
        if !self.header_written {
            let mut header = vec!["scenario", "t"];
            header.extend(series.labels().iter().copied());
            self.writer.write_record(&header)?;
            self.header_written = true;
        }

        for (t, state) in series.samples() {
            let mut record = Vec::with_capacity(2 + state.len());
            record.push(chart.scenario.clone());
            record.push(t.to_string());
            record.extend(state.iter().map(|v| v.to_string()));
            self.writer.write_record(&record)?;
        }
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
    fn test_single_header_for_multiple_runs() {
        let series = integrate(&GutBrainAxis::default(), &IntegratorConfig::new(1.0, 3)).unwrap();
        let mut buf = Vec::new();
        {
            let mut sink = CsvSink::new(&mut buf);
            sink.render(&ChartSpec::new("a", "none"), &series).unwrap();
            sink.render(&ChartSpec::new("b", "stress"), &series).unwrap();
            sink.finish().unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "scenario,t,microbiota,serotonin,brain_activity");
        assert_eq!(lines.len(), 1 + 2 * 3);
        assert_eq!(lines[1], "none,0,100,50,10");
        assert!(lines[4].starts_with("stress,0,"));
    }
}

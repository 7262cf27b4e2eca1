//! Fixed-width table sink.

use std::io::Write;

use super::{ChartSpec, VisualizationSink};
use crate::error::Result;
use crate::series::TimeSeries;

/// Prints `(t, values…)` rows under a title banner
pub struct TableSink<W: Write> {
    writer: W,
    /// Print every `stride`-th sample (the last sample is always printed)
    stride: usize,
}

impl<W: Write> TableSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, stride: 1 }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride.max(1);
        self
    }

    fn write_row(&mut self, t: f64, values: impl Iterator<Item = f64>) -> Result<()> {
        write!(self.writer, "{:>12.4}", t)?;
        for v in values {
            write!(self.writer, " {:>18.6}", v)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> VisualizationSink for TableSink<W> {
    fn render(&mut self, chart: &ChartSpec, series: &TimeSeries) -> Result<()> {
        let rule = "─".repeat(12 + 19 * series.dimension());

        writeln!(self.writer, "{}", rule)?;
        writeln!(self.writer, "  {}", chart.title)?;
        writeln!(self.writer, "{}", rule)?;

        write!(self.writer, "{:>12}", "t")?;
        for label in series.labels() {
            write!(self.writer, " {:>18}", label)?;
        }
        writeln!(self.writer)?;

        let last = series.len() - 1;
        for (i, (t, state)) in series.samples().enumerate() {
            if i % self.stride == 0 || i == last {
                self.write_row(t, state.iter().copied())?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

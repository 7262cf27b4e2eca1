//! Text line chart sink.
//!
//! Each variable is drawn with its own glyph on a character grid; later
//! series overwrite earlier ones where they collide. The y range covers
//! all variables so relative magnitudes stay visible.

use std::io::Write;

use super::{ChartSpec, VisualizationSink};
use crate::error::Result;
use crate::series::TimeSeries;

const GLYPHS: [char; 6] = ['*', '+', 'o', 'x', '#', '@'];

pub struct ChartSink<W: Write> {
    writer: W,
    width: usize,
    height: usize,
}

impl<W: Write> ChartSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            width: 72,
            height: 20,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width.max(2);
        self.height = height.max(2);
        self
    }

    /// Character grid, row 0 at the top
    fn plot(&self, series: &TimeSeries, lo: f64, hi: f64) -> Vec<Vec<char>> {
        let mut grid = vec![vec![' '; self.width]; self.height];
        let n = series.len();
        let span = hi - lo;

        for var in 0..series.dimension() {
            let glyph = GLYPHS[var % GLYPHS.len()];
            let col = series.column(var);

            for x in 0..self.width {
                let idx = x * (n - 1) / (self.width - 1);
                let level = if span > 0.0 {
                    ((col[idx] - lo) / span * (self.height - 1) as f64).round() as usize
                } else {
                    self.height / 2
                };
                let row = self.height - 1 - level.min(self.height - 1);
                grid[row][x] = glyph;
            }
        }
        grid
    }
}

impl<W: Write> VisualizationSink for ChartSink<W> {
    fn render(&mut self, chart: &ChartSpec, series: &TimeSeries) -> Result<()> {
        let (lo, hi) = series.value_range();
        let grid = self.plot(series, lo, hi);

        writeln!(self.writer, "{}", chart.title)?;
        writeln!(self.writer, "{}", chart.y_label)?;

        for (r, row) in grid.iter().enumerate() {
            let tick = if r == 0 {
                format!("{:>12.2}", hi)
            } else if r == self.height - 1 {
                format!("{:>12.2}", lo)
            } else {
                " ".repeat(12)
            };
            let line: String = row.iter().collect();
            writeln!(self.writer, "{} │{}", tick, line.trim_end())?;
        }

        writeln!(self.writer, "{} └{}", " ".repeat(12), "─".repeat(self.width))?;

        let t_end = format!("{:.1}", series.final_time());
        let gap = self.width.saturating_sub(1 + t_end.len());
        writeln!(self.writer, "{}  0{}{}", " ".repeat(12), " ".repeat(gap), t_end)?;

        let pad = (self.width.saturating_sub(chart.x_label.len())) / 2;
        writeln!(self.writer, "{}  {}{}", " ".repeat(12), " ".repeat(pad), chart.x_label)?;

        writeln!(self.writer)?;
        for (var, label) in chart.series_labels.iter().enumerate().take(series.dimension()) {
            writeln!(self.writer, "  {} {}", GLYPHS[var % GLYPHS.len()], label)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

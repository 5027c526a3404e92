//! Theta and dzA trace file writers.
//!
//! Both writers flush after every data row so a killed run leaves a
//! consistent prefix, per the concurrency model's "no partial line" guarantee.

use std::io::{self, Write};

use crate::estimation::{DzaTraceRow, ThetaTraceRow};

/// Writes the theta trace format: header `t <label...> AcceptanceRate`, then
/// one space-separated data row per iteration.
#[derive(Debug)]
pub struct ThetaTraceWriter<W: Write> {
    writer: W,
}

impl<W: Write> ThetaTraceWriter<W> {
    /// Creates a writer and immediately writes the header row.
    ///
    /// # Errors
    /// Propagates any I/O error from writing the header.
    pub fn new(mut writer: W, labels: &[&str]) -> io::Result<Self> {
        write!(writer, "t")?;
        for label in labels {
            write!(writer, " {label}")?;
        }
        writeln!(writer, " AcceptanceRate")?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Writes and flushes one data row.
    ///
    /// # Errors
    /// Propagates any I/O error from writing or flushing the row.
    pub fn write_row(&mut self, row: &ThetaTraceRow) -> io::Result<()> {
        write!(self.writer, "{}", row.t)?;
        for value in &row.theta {
            write!(self.writer, " {value}")?;
        }
        writeln!(self.writer, " {}", row.acceptance_rate)?;
        self.writer.flush()
    }
}

/// Writes the dzA trace format: header `t <label...>`, then one
/// space-separated data row per Algorithm EE inner iteration.
#[derive(Debug)]
pub struct DzaTraceWriter<W: Write> {
    writer: W,
}

impl<W: Write> DzaTraceWriter<W> {
    /// Creates a writer and immediately writes the header row.
    ///
    /// # Errors
    /// Propagates any I/O error from writing the header.
    pub fn new(mut writer: W, labels: &[&str]) -> io::Result<Self> {
        write!(writer, "t")?;
        for label in labels {
            write!(writer, " {label}")?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Writes and flushes one data row.
    ///
    /// # Errors
    /// Propagates any I/O error from writing or flushing the row.
    pub fn write_row(&mut self, row: &DzaTraceRow) -> io::Result<()> {
        write!(self.writer, "{}", row.t)?;
        for value in &row.dz_a {
            write!(self.writer, " {value}")?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theta_trace_header_and_row_format() {
        let mut buf = Vec::new();
        {
            let mut writer = ThetaTraceWriter::new(&mut buf, &["Arc", "Reciprocity"])
                .expect("header write succeeds");
            writer
                .write_row(&ThetaTraceRow {
                    t: -3,
                    theta: vec![0.1, -0.2],
                    acceptance_rate: 0.5,
                })
                .expect("row write succeeds");
        }
        let text = String::from_utf8(buf).expect("writer output is utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("t Arc Reciprocity AcceptanceRate"));
        assert_eq!(lines.next(), Some("-3 0.1 -0.2 0.5"));
    }

    #[test]
    fn dza_trace_header_and_row_format() {
        let mut buf = Vec::new();
        {
            let mut writer =
                DzaTraceWriter::new(&mut buf, &["Arc"]).expect("header write succeeds");
            writer
                .write_row(&DzaTraceRow {
                    t: 0,
                    dz_a: vec![1.5],
                })
                .expect("row write succeeds");
        }
        let text = String::from_utf8(buf).expect("writer output is utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("t Arc"));
        assert_eq!(lines.next(), Some("0 1.5"));
    }
}

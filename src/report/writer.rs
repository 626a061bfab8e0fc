//! Report output for the CLI frontend.
//!
//! Writes rendered reports to any `io::Write` sink, stdout by default.

use std::io::{self, BufWriter, Write};

use crate::error::{Result, SimError};

use super::Report;

/// How reports are rendered on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width text tables
    #[default]
    Text,
    /// One pretty-printed JSON array of reports
    Json,
}

/// Buffered report writer.
pub struct ReportWriter<W: Write> {
    sink: BufWriter<W>,
    format: OutputFormat,
}

impl ReportWriter<io::Stdout> {
    /// Create a writer to stdout.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> ReportWriter<W> {
    /// Create a writer around an arbitrary sink.
    pub fn new(sink: W, format: OutputFormat) -> Self {
        Self {
            sink: BufWriter::new(sink),
            format,
        }
    }

    /// Write a batch of reports in the configured format.
    pub fn write_all(&mut self, reports: &[Report]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                for (i, report) in reports.iter().enumerate() {
                    if i > 0 {
                        self.write_str("\n")?;
                    }
                    self.write_str(&report.to_string())?;
                }
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(reports)?;
                self.write_str(&json)?;
                self.write_str("\n")?;
            }
        }
        Ok(())
    }

    /// Flush the output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.sink
            .flush()
            .map_err(|e| SimError::output(e.to_string()))
    }

    /// Recover the inner sink, flushing buffered output.
    pub fn into_inner(self) -> Result<W> {
        self.sink
            .into_inner()
            .map_err(|e| SimError::output(e.error().to_string()))
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.sink
            .write_all(text.as_bytes())
            .map_err(|e| SimError::output(e.to_string()))
    }
}

/// Write reports to stdout in the given format.
pub fn write_reports(reports: &[Report], format: OutputFormat) -> Result<()> {
    let mut writer = ReportWriter::stdout(format);
    writer.write_all(reports)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output_separates_reports() {
        let reports = vec![Report::new("A"), Report::new("B")];
        let mut writer = ReportWriter::new(Vec::new(), OutputFormat::Text);
        writer.write_all(&reports).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("A\n"));
        assert!(text.contains("\n\nB\n"));
    }

    #[test]
    fn test_json_output_is_array() {
        let reports = vec![Report::new("A")];
        let mut writer = ReportWriter::new(Vec::new(), OutputFormat::Json);
        writer.write_all(&reports).unwrap();
        let bytes = writer.into_inner().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value[0]["title"], "A");
    }
}

//! Incremental printing of a report while its tests run.
//!
//! The banner goes out first and every section is written as soon as its
//! test returns, so a test that fails part way leaves the finished sections
//! on screen. The returned [`TestReport`] displays as exactly the text written.

use super::{Conclusions, Section, TestReport, format_float};
use crate::stats::{StatsError, StatsResult, TestResult};
use std::io::{self, Write};
use tracing::debug;

/// Standard output, written through `print!`.
pub(crate) struct Console;

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        print!("{}", String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

fn write_failed(err: io::Error) -> StatsError {
    StatsError::Io {
        path: "stdout".to_string(),
        message: err.to_string(),
    }
}

pub(crate) struct ReportWriter<W: Write> {
    out: W,
    report: TestReport,
}

impl<W: Write> ReportWriter<W> {
    /// Prints the banner line.
    pub(crate) fn begin(mut out: W, title: impl Into<String>) -> StatsResult<Self> {
        let report = TestReport::new(title, Vec::new());
        writeln!(out, "{}", report.title).map_err(write_failed)?;
        out.flush().map_err(write_failed)?;
        Ok(Self { out, report })
    }

    /// Prints `heading` and `notes`, runs `test`, then prints its p-value and
    /// conclusion.
    pub(crate) fn section<F>(
        &mut self,
        heading: Option<&str>,
        notes: Vec<String>,
        alpha: f64,
        conclusions: &Conclusions,
        test: F,
    ) -> StatsResult<()>
    where
        F: FnOnce() -> StatsResult<TestResult>,
    {
        if let Some(heading) = heading {
            writeln!(self.out, "{}", heading).map_err(write_failed)?;
        }
        for note in &notes {
            writeln!(self.out, "{}", note).map_err(write_failed)?;
        }
        self.out.flush().map_err(write_failed)?;

        let result = test()?;
        let mut section = Section::new(result, alpha, conclusions);
        section.heading = heading.map(str::to_string);
        section.notes = notes;

        writeln!(self.out, "p-value: {}", format_float(result.pvalue)).map_err(write_failed)?;
        writeln!(self.out, "{}", section.verdict.conclusion).map_err(write_failed)?;
        self.out.flush().map_err(write_failed)?;

        debug!(
            title = %self.report.title,
            heading = heading.unwrap_or(""),
            statistic = result.statistic,
            pvalue = result.pvalue,
            decision = ?section.verdict.decision,
            "hypothesis test"
        );
        self.report.sections.push(section);
        Ok(())
    }

    /// Prints the closing blank line and hands back the report.
    pub(crate) fn finish(mut self) -> StatsResult<TestReport> {
        writeln!(self.out).map_err(write_failed)?;
        self.out.flush().map_err(write_failed)?;
        Ok(self.report)
    }
}

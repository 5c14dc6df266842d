//! Structured outcome of a catalog test and its printed form.

use crate::stats::TestResult;
use serde::Serialize;
use std::fmt;

/// Outcome of comparing a p-value with the significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    FailToReject,
    Reject,
}

impl Decision {
    /// `FailToReject` iff `pvalue > alpha`. A NaN p-value compares false and
    /// therefore rejects.
    pub fn from_pvalue(pvalue: f64, alpha: f64) -> Self {
        if pvalue > alpha {
            Decision::FailToReject
        } else {
            Decision::Reject
        }
    }

    pub fn is_reject(self) -> bool {
        self == Decision::Reject
    }
}

/// Pair of fixed conclusion lines, one per decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conclusions {
    pub fail_to_reject: &'static str,
    pub reject: &'static str,
}

impl Conclusions {
    pub fn pick(&self, decision: Decision) -> &'static str {
        match decision {
            Decision::FailToReject => self.fail_to_reject,
            Decision::Reject => self.reject,
        }
    }
}

pub const GAUSSIAN: Conclusions = Conclusions {
    fail_to_reject: "sample looks Gaussian (fail to reject H0)",
    reject: "sample does not look Gaussian (reject H0)",
};

pub const EQUAL_VARIANCES: Conclusions = Conclusions {
    fail_to_reject: "variances are equal (fail to reject H0)",
    reject: "variances are significantly different (reject H0)",
};

pub const ZERO_SKEWNESS: Conclusions = Conclusions {
    fail_to_reject: "skewness is not significantly different from zero (fail to reject H0)",
    reject: "skewness is significantly different from zero (reject H0)",
};

pub const ZERO_KURTOSIS: Conclusions = Conclusions {
    fail_to_reject: "kurtosis is not significantly different from zero (fail to reject H0)",
    reject: "kurtosis is significantly different from zero (reject H0)",
};

pub const EQUAL_SAMPLES: Conclusions = Conclusions {
    fail_to_reject: "samples are equal (fail to reject H0)",
    reject: "samples are significantly different (reject H0)",
};

pub const ZERO_MEDIAN_DIFFERENCE: Conclusions = Conclusions {
    fail_to_reject: "not enough evidence to conclude a significant median difference between the paired observations (fail to reject H0)",
    reject: "significant difference in the median of the paired differences (reject H0)",
};

/// Decision together with the line printed for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub decision: Decision,
    pub conclusion: &'static str,
}

impl Verdict {
    pub fn new(pvalue: f64, alpha: f64, conclusions: &Conclusions) -> Self {
        let decision = Decision::from_pvalue(pvalue, alpha);
        Self {
            decision,
            conclusion: conclusions.pick(decision),
        }
    }
}

/// One test inside a report.
///
/// Printed as the optional heading, the notes, `p-value: {p}`, then the
/// conclusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub result: TestResult,
    pub verdict: Verdict,
}

impl Section {
    pub fn new(result: TestResult, alpha: f64, conclusions: &Conclusions) -> Self {
        Self {
            heading: None,
            notes: Vec::new(),
            verdict: Verdict::new(result.pvalue, alpha, conclusions),
            result,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Everything a catalog function computed and printed.
///
/// Serializes to JSON for export next to the printed text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub title: String,
    pub sections: Vec<Section>,
}

impl TestReport {
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    pub fn single(title: impl Into<String>, section: Section) -> Self {
        Self::new(title, vec![section])
    }

    /// p-value of the first (for most reports the only) test.
    pub fn pvalue(&self) -> f64 {
        self.sections
            .first()
            .map_or(f64::NAN, |s| s.result.pvalue)
    }

    /// Decision of the first test.
    pub fn decision(&self) -> Option<Decision> {
        self.sections.first().map(|s| s.verdict.decision)
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for section in &self.sections {
            if let Some(heading) = &section.heading {
                writeln!(f, "{}", heading)?;
            }
            for note in &section.notes {
                writeln!(f, "{}", note)?;
            }
            writeln!(f, "p-value: {}", format_float(section.result.pvalue))?;
            writeln!(f, "{}", section.verdict.conclusion)?;
        }
        writeln!(f)
    }
}

/// Shortest round-trip decimal form: positional for exponents in [-4, 16),
/// scientific with a signed two-digit exponent otherwise (`1.5e-05`), and a
/// trailing `.0` on integral values.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..16).contains(&exp) {
        let s = format!("{}", v);
        if s.contains('.') { s } else { format!("{}.0", s) }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}

//! Tests for equality of variances across groups.
//!
//! # Bartlett
//!
//! ```text
//! s²ₚ = Σ (nᵢ-1) s²ᵢ / (N-k)
//! T   = [(N-k) ln s²ₚ - Σ (nᵢ-1) ln s²ᵢ] / [1 + (Σ 1/(nᵢ-1) - 1/(N-k)) / (3(k-1))]
//! ```
//!
//! T ~ χ²(k-1) under H₀. Sensitive to departures from normality.
//!
//! # Levene / Brown-Forsythe
//!
//! One-way ANOVA on the absolute deviations Zᵢⱼ = |Yᵢⱼ - cᵢ| from a group centre
//! cᵢ (mean, median or trimmed mean):
//!
//! ```text
//! W = (N-k) Σ nᵢ (Z̄ᵢ - Z̄)² / [(k-1) Σᵢ Σⱼ (Zᵢⱼ - Z̄ᵢ)²]
//! ```
//!
//! W ~ F(k-1, N-k) under H₀.
//!
//! A NaN in any group yields a NaN statistic and p-value.

use crate::stats::descriptive::{mean, median, trimmed_mean, var};
use crate::stats::distribution::ContinuousDistribution;
use crate::stats::error::{StatsError, StatsResult, ensure_len};
use crate::stats::helpers::contains_nan;
use crate::stats::types::{LeveneCenter, TestResult};
use crate::stats::{ChiSquared, FDistribution};

/// Proportion cut from each tail for [`LeveneCenter::TrimmedMean`].
const LEVENE_TRIM: f64 = 0.05;

fn ensure_groups(groups: &[&[f64]], context: &str) -> StatsResult<()> {
    if groups.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            got: groups.len(),
            context: format!("{} (groups)", context),
        });
    }
    for g in groups {
        ensure_len(g.len(), 2, context)?;
    }
    Ok(())
}

/// Bartlett's test that all groups share one variance.
///
/// Each group needs at least two observations and a nonzero variance.
pub fn bartlett(groups: &[&[f64]]) -> StatsResult<TestResult> {
    ensure_groups(groups, "Bartlett test")?;
    if contains_nan(groups) {
        return Ok(TestResult::nan());
    }

    let k = groups.len() as f64;
    let mut n_total = 0.0;
    let mut pooled = 0.0;
    let mut sum_log = 0.0;
    let mut sum_inv = 0.0;
    for g in groups {
        let ni = g.len() as f64;
        let s2 = var(g, 1)?;
        if s2 == 0.0 {
            return Err(StatsError::DegenerateData {
                context: "Bartlett test: group has zero variance".to_string(),
            });
        }
        n_total += ni;
        pooled += (ni - 1.0) * s2;
        sum_log += (ni - 1.0) * s2.ln();
        sum_inv += 1.0 / (ni - 1.0);
    }
    let dof = n_total - k;
    let sp2 = pooled / dof;

    let numer = dof * sp2.ln() - sum_log;
    let denom = 1.0 + (sum_inv - 1.0 / dof) / (3.0 * (k - 1.0));
    let t = numer / denom;

    let chi2 = ChiSquared::new(k - 1.0)?;
    Ok(TestResult::new(t, chi2.sf(t)))
}

/// Levene's test that all groups share one variance.
///
/// `center` selects the group centre; [`LeveneCenter::Median`] gives the
/// Brown-Forsythe variant.
pub fn levene(groups: &[&[f64]], center: LeveneCenter) -> StatsResult<TestResult> {
    ensure_groups(groups, "Levene test")?;
    if contains_nan(groups) {
        return Ok(TestResult::nan());
    }

    let k = groups.len() as f64;
    let mut deviations = Vec::with_capacity(groups.len());
    for g in groups {
        let c = match center {
            LeveneCenter::Mean => mean(g),
            LeveneCenter::Median => median(g)?,
            LeveneCenter::TrimmedMean => trimmed_mean(g, LEVENE_TRIM)?,
        };
        deviations.push(g.iter().map(|&v| (v - c).abs()).collect::<Vec<_>>());
    }

    let n_total: f64 = deviations.iter().map(|z| z.len() as f64).sum();
    let group_means: Vec<f64> = deviations.iter().map(|z| mean(z)).collect();
    let grand_mean = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, zm)| z.len() as f64 * zm)
        .sum::<f64>()
        / n_total;

    let between: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, zm)| z.len() as f64 * (zm - grand_mean).powi(2))
        .sum();
    let within: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, zm)| z.iter().map(|v| (v - zm).powi(2)).sum::<f64>())
        .sum();
    if within == 0.0 {
        return Err(StatsError::DegenerateData {
            context: "Levene test: no spread within groups".to_string(),
        });
    }

    let w = (n_total - k) * between / ((k - 1.0) * within);
    let f = FDistribution::new(k - 1.0, n_total - k)?;
    Ok(TestResult::new(w, f.sf(w)))
}

//! Normality and shape tests.
//!
//! # Shapiro-Wilk
//!
//! W statistic with Royston's (1992, AS R94) approximation of the coefficients
//! and of the null distribution. Valid for 3 ≤ n ≤ 5000; larger samples are
//! still evaluated but the p-value is an extrapolation.
//!
//! # D'Agostino skewness test
//!
//! Transforms the sample skewness √b₁ into an approximately standard normal Z:
//!
//! ```text
//! Y  = √b₁ · √((n+1)(n+3) / (6(n-2)))   (Y = 0 is replaced by 1)
//! β₂ = 3(n²+27n-70)(n+1)(n+3) / ((n-2)(n+5)(n+7)(n+9))
//! W² = -1 + √(2(β₂-1)),  δ = 1/√(ln W),  α = √(2/(W²-1))
//! Z  = δ · asinh(Y/α)
//! ```
//!
//! # Anscombe-Glynn kurtosis test
//!
//! Standardises Pearson's b₂ by its exact null mean and variance, then applies
//! the Wilson-Hilferty cube-root transform.
//!
//! # D'Agostino-Pearson omnibus
//!
//! K² = Z_skew² + Z_kurt², referred to χ²(2).
//!
//! # Kolmogorov-Smirnov against a fitted normal
//!
//! D = sup |Fₙ(x) - Φ((x - x̄)/s)| with s the population standard deviation.
//! The two-sided p-value P(Dₙ ≥ D) is computed by [`ks_pvalue`]:
//!
//! - twice Smirnov's exact one-sided tail when D ≥ 0.5 (where it is exact)
//!   or when that tail is below 1%;
//! - the Marsaglia-Tsang-Wang matrix form of the exact distribution for
//!   n ≤ 140;
//! - otherwise the Kolmogorov limit with Stephens' correction
//!   λ = (√n + 0.12 + 0.11/√n) D.
//!
//! # Missing values
//!
//! Every test here returns a NaN statistic and p-value when the sample holds NaN.

use crate::stats::descriptive::{central_moment, kurtosis, mean, skewness, std};
use crate::stats::distribution::ContinuousDistribution;
use crate::stats::error::{StatsError, StatsResult, ensure_len};
use crate::stats::helpers::{contains_nan, sorted};
use crate::stats::special::ln_choose;
use crate::stats::types::TestResult;
use crate::stats::{ChiSquared, Normal};
use tracing::warn;

/// Largest sample size the Shapiro-Wilk approximation is calibrated for.
pub const SHAPIRO_MAX_N: usize = 5000;

// Royston polynomial coefficients (AS R94)
const SW_C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const SW_C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const SW_C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const SW_C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const SW_C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const SW_C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const SW_G: [f64; 2] = [-2.273, 0.459];

/// Largest sample size for which the exact KS distribution is evaluated.
pub const KS_EXACT_MAX_N: usize = 140;

// Doubled one-sided tails below this are used directly as the two-sided p-value
const KS_TAIL_CUTOFF: f64 = 0.01;

// Rescaling step for the matrix power, 1e140 per unit of exponent
const KS_SCALE: f64 = 1e140;

fn require_spread(x: &[f64], context: &str) -> StatsResult<()> {
    if central_moment(x, 2) == 0.0 {
        return Err(StatsError::DegenerateData {
            context: format!("{}: sample has zero variance", context),
        });
    }
    Ok(())
}

/// Shapiro-Wilk test for normality.
///
/// Returns W as the statistic.
pub fn shapiro(x: &[f64]) -> StatsResult<TestResult> {
    let n = x.len();
    ensure_len(n, 3, "Shapiro-Wilk test")?;
    if contains_nan(&[x]) {
        return Ok(TestResult::nan());
    }
    if n > SHAPIRO_MAX_N {
        warn!(n, "Shapiro-Wilk p-value may be inaccurate for n > {}", SHAPIRO_MAX_N);
    }

    let x = sorted(x);
    let range = x[n - 1] - x[0];
    if range <= 0.0 || range.is_nan() {
        return Err(StatsError::DegenerateData {
            context: "Shapiro-Wilk test: sample has zero range".to_string(),
        });
    }

    if n == 3 {
        return Ok(shapiro_n3(&x));
    }

    let a = sw_coefficients(n)?;
    let w = sw_statistic(&x, &a).min(1.0);
    Ok(TestResult::new(w, sw_pvalue(w, n)))
}

// Exact null distribution for n = 3
fn shapiro_n3(x: &[f64]) -> TestResult {
    let m = mean(x);
    let ss: f64 = x.iter().map(|&v| (v - m) * (v - m)).sum();
    let num = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = (num * num / ss).clamp(0.75, 1.0);
    let p = 1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos();
    TestResult::new(w, p)
}

// Horner evaluation of c[0] + c[1]x + c[2]x² + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

// Upper-half coefficients a[0..n/2] (positive, largest first)
fn sw_coefficients(n: usize) -> StatsResult<Vec<f64>> {
    let nn2 = n / 2;
    let std_normal = Normal::standard();

    // Blom's approximation of expected normal order statistics
    let mut m = Vec::with_capacity(nn2);
    for i in 0..nn2 {
        let p = (i as f64 + 1.0 - 0.375) / (n as f64 + 0.25);
        m.push(std_normal.ppf(p)?);
    }
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = poly(&SW_C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; nn2];

    let (corrected, fac_sq, one_minus) = if n <= 5 {
        a[0] = a1;
        (1, summ2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1)
    } else {
        let a2 = -m[1] / ssumm2 + poly(&SW_C2, rsn);
        a[0] = a1;
        a[1] = a2;
        (
            2,
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
        )
    };
    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(StatsError::NumericalError {
            message: format!("Shapiro-Wilk coefficients undefined for n = {}", n),
        });
    }
    let fac = (fac_sq / one_minus).sqrt();
    for (ai, mi) in a.iter_mut().zip(&m).skip(corrected) {
        *ai = -mi / fac;
    }
    Ok(a)
}

fn sw_statistic(x: &[f64], a: &[f64]) -> f64 {
    let n = x.len();
    let sa: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    let m = mean(x);
    let ss: f64 = x.iter().map(|&v| (v - m) * (v - m)).sum();
    sa * sa / ss
}

fn sw_pvalue(w: f64, n: usize) -> f64 {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let z = if n <= 11 {
        let gamma = poly(&SW_G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y = -(gamma - y).ln();
        let m = poly(&SW_C3, nf);
        let s = poly(&SW_C4, nf).exp();
        (y - m) / s
    } else {
        let ln_n = nf.ln();
        let m = poly(&SW_C5, ln_n);
        let s = poly(&SW_C6, ln_n).exp();
        (y - m) / s
    };
    Normal::standard().sf(z)
}

/// D'Agostino test that the population skewness is zero.
///
/// Requires n ≥ 8. A sample with exactly zero skewness has its Y replaced by 1
/// before the transform, so it does not score Z = 0.
pub fn skewtest(x: &[f64]) -> StatsResult<TestResult> {
    let n = x.len();
    ensure_len(n, 8, "skew test")?;
    if contains_nan(&[x]) {
        return Ok(TestResult::nan());
    }
    require_spread(x, "skew test")?;

    let nf = n as f64;
    let b2 = skewness(x)?;
    let y = b2 * ((nf + 1.0) * (nf + 3.0) / (6.0 * (nf - 2.0))).sqrt();
    let y = if y == 0.0 { 1.0 } else { y };
    let beta2 = 3.0 * (nf * nf + 27.0 * nf - 70.0) * (nf + 1.0) * (nf + 3.0)
        / ((nf - 2.0) * (nf + 5.0) * (nf + 7.0) * (nf + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    let z = delta * (y / alpha).asinh();

    Ok(TestResult::new(z, 2.0 * Normal::standard().sf(z.abs())))
}

/// Anscombe-Glynn test that the population excess kurtosis is zero.
///
/// Requires n ≥ 5; the normal approximation is poor below n = 20.
pub fn kurtosistest(x: &[f64]) -> StatsResult<TestResult> {
    let n = x.len();
    ensure_len(n, 5, "kurtosis test")?;
    if contains_nan(&[x]) {
        return Ok(TestResult::nan());
    }
    require_spread(x, "kurtosis test")?;
    if n < 20 {
        warn!(n, "kurtosis test is only valid for n >= 20");
    }

    let nf = n as f64;
    let b2 = kurtosis(x)? + 3.0;
    let e = 3.0 * (nf - 1.0) / (nf + 1.0);
    let varb2 = 24.0 * nf * (nf - 2.0) * (nf - 3.0)
        / ((nf + 1.0) * (nf + 1.0) * (nf + 3.0) * (nf + 5.0));
    let xs = (b2 - e) / varb2.sqrt();
    let sqrtbeta1 = 6.0 * (nf * nf - 5.0 * nf + 2.0) / ((nf + 7.0) * (nf + 9.0))
        * (6.0 * (nf + 3.0) * (nf + 5.0) / (nf * (nf - 2.0) * (nf - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrtbeta1 * (2.0 / sqrtbeta1 + (1.0 + 4.0 / (sqrtbeta1 * sqrtbeta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + xs * (2.0 / (a - 4.0)).sqrt();
    let term2 = if denom == 0.0 {
        f64::NAN
    } else {
        denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt()
    };
    let z = (term1 - term2) / (2.0 / (9.0 * a)).sqrt();

    Ok(TestResult::new(z, 2.0 * Normal::standard().sf(z.abs())))
}

/// D'Agostino-Pearson omnibus test for normality.
///
/// Requires n ≥ 8.
pub fn normaltest(x: &[f64]) -> StatsResult<TestResult> {
    ensure_len(x.len(), 8, "normality test")?;
    if contains_nan(&[x]) {
        return Ok(TestResult::nan());
    }
    let s = skewtest(x)?;
    let k = kurtosistest(x)?;
    let k2 = s.statistic * s.statistic + k.statistic * k.statistic;
    let chi2 = ChiSquared::new(2.0)?;
    Ok(TestResult::new(k2, chi2.sf(k2)))
}

/// One-sample Kolmogorov-Smirnov test against N(x̄, s), where s is the
/// population (ddof = 0) standard deviation of the sample.
pub fn kstest_normal(x: &[f64]) -> StatsResult<TestResult> {
    let n = x.len();
    ensure_len(n, 1, "Kolmogorov-Smirnov test")?;
    if contains_nan(&[x]) {
        return Ok(TestResult::nan());
    }
    let sigma = std(x, 0)?;
    if sigma == 0.0 {
        return Err(StatsError::DegenerateData {
            context: "Kolmogorov-Smirnov test: sample has zero variance".to_string(),
        });
    }
    let reference = Normal::new(mean(x), sigma)?;

    let nf = n as f64;
    let mut d = 0.0_f64;
    for (i, &v) in sorted(x).iter().enumerate() {
        let f = reference.cdf(v);
        let d_plus = (i as f64 + 1.0) / nf - f;
        let d_minus = f - i as f64 / nf;
        d = d.max(d_plus).max(d_minus);
    }

    Ok(TestResult::new(d, ks_pvalue(n, d)))
}

/// Two-sided p-value P(Dₙ ≥ d) of the one-sample Kolmogorov-Smirnov statistic.
pub fn ks_pvalue(n: usize, d: f64) -> f64 {
    if n == 0 || d.is_nan() {
        return f64::NAN;
    }
    if d >= 1.0 {
        return 0.0;
    }
    let nf = n as f64;
    if nf * d <= 0.5 {
        return 1.0;
    }

    let tail = 2.0 * smirnov_sf(n, d);
    if d >= 0.5 || tail <= KS_TAIL_CUTOFF {
        return tail.min(1.0);
    }
    if n <= KS_EXACT_MAX_N {
        return (1.0 - kolmogorov_cdf(n, d)).clamp(0.0, 1.0);
    }
    let sqrt_n = nf.sqrt();
    kolmogorov_sf((sqrt_n + 0.12 + 0.11 / sqrt_n) * d)
}

// Smirnov's exact one-sided tail P(Dₙ⁺ ≥ d)
fn smirnov_sf(n: usize, d: f64) -> f64 {
    let nf = n as f64;
    let last = ((nf * (1.0 - d)).floor() as usize).min(n);
    let total: f64 = (0..=last)
        .filter_map(|j| {
            let jf = j as f64;
            let rest = 1.0 - d - jf / nf;
            (rest > 0.0).then(|| {
                (ln_choose(n as u64, j as u64)
                    + (nf - jf) * rest.ln()
                    + (jf - 1.0) * (d + jf / nf).ln())
                .exp()
            })
        })
        .sum();
    d * total
}

// Exact P(Dₙ < d), Marsaglia, Tsang and Wang (2003)
fn kolmogorov_cdf(n: usize, d: f64) -> f64 {
    let nf = n as f64;
    let k = (nf * d).floor() as usize + 1;
    let m = 2 * k - 1;
    let h = k as f64 - nf * d;

    let mut hm = vec![0.0; m * m];
    for (idx, v) in hm.iter_mut().enumerate() {
        let (i, j) = (idx / m, idx % m);
        if i + 1 >= j {
            *v = 1.0;
        }
    }
    for i in 0..m {
        hm[i * m] -= h.powi(i as i32 + 1);
        hm[(m - 1) * m + i] -= h.powi((m - i) as i32);
    }
    if 2.0 * h - 1.0 > 0.0 {
        hm[(m - 1) * m] += (2.0 * h - 1.0).powi(m as i32);
    }
    for (idx, v) in hm.iter_mut().enumerate() {
        let (i, j) = (idx / m, idx % m);
        if i + 1 > j {
            let factorial: f64 = (1..=i + 1 - j).map(|g| g as f64).product();
            *v /= factorial;
        }
    }

    let (q, mut exponent) = matrix_power(&hm, m, n);
    let mut s = q[(k - 1) * m + k - 1];
    for i in 1..=n {
        s = s * i as f64 / nf;
        if s != 0.0 && s < 1.0 / KS_SCALE {
            s *= KS_SCALE;
            exponent -= 1;
        }
    }
    while exponent > 0 {
        s *= KS_SCALE;
        exponent -= 1;
    }
    while exponent < 0 {
        s /= KS_SCALE;
        exponent += 1;
    }
    s
}

// Square matrix power by repeated squaring; the true value is
// result · KS_SCALE^exponent
fn matrix_power(base: &[f64], m: usize, mut power: usize) -> (Vec<f64>, i32) {
    let mut result: Vec<f64> = (0..m * m)
        .map(|idx| if idx / m == idx % m { 1.0 } else { 0.0 })
        .collect();
    let mut result_exp = 0;
    let mut square = base.to_vec();
    let mut square_exp = 0;
    while power > 0 {
        if power & 1 == 1 {
            result = matrix_mul(&result, &square, m);
            result_exp += square_exp;
            rescale(&mut result, &mut result_exp);
        }
        power >>= 1;
        if power > 0 {
            square = matrix_mul(&square, &square, m);
            square_exp *= 2;
            rescale(&mut square, &mut square_exp);
        }
    }
    (result, result_exp)
}

fn matrix_mul(a: &[f64], b: &[f64], m: usize) -> Vec<f64> {
    let mut out = vec![0.0; m * m];
    for (out_row, a_row) in out.chunks_mut(m).zip(a.chunks(m)) {
        for (&a_it, b_row) in a_row.iter().zip(b.chunks(m)) {
            for (o, &b_tj) in out_row.iter_mut().zip(b_row) {
                *o += a_it * b_tj;
            }
        }
    }
    out
}

fn rescale(a: &mut [f64], exponent: &mut i32) {
    while a.iter().any(|v| v.is_finite() && v.abs() > KS_SCALE) {
        for v in a.iter_mut() {
            *v /= KS_SCALE;
        }
        *exponent += 1;
    }
}

/// Survival function of the Kolmogorov distribution, Q(λ) = P(K > λ).
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda.is_nan() {
        return f64::NAN;
    }
    if lambda <= 0.0 {
        return 1.0;
    }
    if lambda < 1.18 {
        // Jacobi theta form converges fast for small λ
        let y = (-std::f64::consts::PI.powi(2) / (8.0 * lambda * lambda)).exp();
        let cdf = (2.0 * std::f64::consts::PI).sqrt() / lambda
            * (y + y.powi(9) + y.powi(25) + y.powi(49));
        1.0 - cdf
    } else {
        let x = (-2.0 * lambda * lambda).exp();
        2.0 * (x - x.powi(4) + x.powi(9))
    }
}

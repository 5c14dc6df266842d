//! Ranking and ordering helpers shared by the nonparametric tests.

use std::cmp::Ordering;

/// Return a sorted copy of `x`. NaN values sort last.
pub fn sorted(x: &[f64]) -> Vec<f64> {
    let mut v = x.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or_else(|| nan_last(*a, *b)));
    v
}

fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Assign 1-based ranks to `x`, giving tied values the average of the ranks
/// they span.
pub fn rankdata(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        x[i].partial_cmp(&x[j])
            .unwrap_or_else(|| nan_last(x[i], x[j]))
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && x[order[j]] == x[order[i]] {
            j += 1;
        }
        // positions i..j share ranks i+1..=j
        let avg = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg;
        }
        i = j;
    }
    ranks
}

/// Sizes of every group of tied values (groups of one included).
pub fn tie_counts(x: &[f64]) -> Vec<usize> {
    let s = sorted(x);
    let mut counts = Vec::new();
    let mut i = 0;
    while i < s.len() {
        let mut j = i + 1;
        while j < s.len() && s[j] == s[i] {
            j += 1;
        }
        counts.push(j - i);
        i = j;
    }
    counts
}

/// Σ (t³ - t) over tie groups, the usual tie-correction term.
pub fn tie_term(x: &[f64]) -> f64 {
    tie_counts(x)
        .into_iter()
        .map(|t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum()
}

/// Whether any of the samples holds a NaN.
pub fn contains_nan(samples: &[&[f64]]) -> bool {
    samples.iter().any(|s| s.iter().any(|v| v.is_nan()))
}

/// Whether any value occurs more than once.
pub fn has_ties(x: &[f64]) -> bool {
    tie_counts(x).into_iter().any(|t| t > 1)
}

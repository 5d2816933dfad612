//! Acceptance policy for newly reported volume amounts.
//!
//! Pure decision function, no I/O. Branches are evaluated in order and the
//! first match decides; a rejection always names the failed check.

use crate::stats::{
    average, coefficient_of_variation, frequency_distribution_table, interquartile_range,
    is_in_highest_frequency_bucket, percentage, standard_deviation, Limits,
};
use serde::Serialize;

/// Coefficient-of-variation cutoff (percent) between the quartile check and
/// the frequency-table check.
pub const CV_THRESHOLD: i64 = 25;

/// Minimum history length before any statistical check applies.
pub const MIN_HISTORY: usize = 3;

/// Outcome of validating a candidate amount against a publication's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected { reason: String },
}

impl Verdict {
    /// Whether the candidate was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Decide whether `candidate` is statistically consistent with `history`.
///
/// 1. Fewer than 3 historical amounts: accept, insufficient history.
/// 2. Candidate within the `[80%, 120%]` band around the historical mean:
///    accept.
/// 3. Otherwise branch on the coefficient of variation of the
///    candidate-inclusive pool, computed against the historical-only mean:
///    - high dispersion (cv > 25): accept iff the candidate is at or above
///      Q1 of the pool;
///    - low dispersion: accept iff the candidate lands in the highest
///      frequency bucket of the history (candidate excluded from the table).
///
/// Degenerate data always resolves to acceptance; this function never
/// panics on data shape.
pub fn validate(candidate: i64, history: &[i64]) -> Verdict {
    if history.len() < MIN_HISTORY {
        return Verdict::Accepted;
    }

    let avg = average(history, Limits::NONE);
    if percentage(80, avg) <= candidate && candidate <= percentage(120, avg) {
        return Verdict::Accepted;
    }

    let mut pool = history.to_vec();
    pool.push(candidate);

    // Historical-only mean over the candidate-inclusive pool, on purpose.
    let stddev = standard_deviation(&pool, Some(avg), Limits::NONE);
    let cv = coefficient_of_variation(stddev, avg);

    if cv > CV_THRESHOLD {
        let (q1, _q3) = interquartile_range(&pool);
        if candidate as f64 >= q1 {
            Verdict::Accepted
        } else {
            Verdict::Rejected {
                reason: "below first quartile".to_string(),
            }
        }
    } else {
        match frequency_distribution_table(history, Limits::NONE, None) {
            // Unreachable with the MIN_HISTORY guard above, but a missing
            // table is inconclusive, not a rejection.
            None => Verdict::Accepted,
            Some(table) => {
                if is_in_highest_frequency_bucket(candidate, &table) {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected {
                        reason: "not in the highest-frequency category".to_string(),
                    }
                }
            }
        }
    }
}

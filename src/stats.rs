//! Dispersion and position measures for volume series.
//!
//! Every result is floored to an integer before being returned, with one
//! deliberate exception: quartiles stay fractional. Callers compare floored
//! integers, so the rounding policy is part of the contract, not a detail.

use serde::Serialize;

/// Optional inclusive `[lower, upper]` filter applied before computing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Limits {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl Limits {
    /// No filtering.
    pub const NONE: Limits = Limits {
        lower: None,
        upper: None,
    };

    fn contains(&self, value: i64) -> bool {
        self.lower.map_or(true, |lo| value >= lo) && self.upper.map_or(true, |hi| value <= hi)
    }
}

fn filtered(values: &[i64], limits: Limits) -> Vec<i64> {
    values
        .iter()
        .copied()
        .filter(|&v| limits.contains(v))
        .collect()
}

/// Floored mean of the filtered values. `0` for an empty filtered set.
pub fn average(values: &[i64], limits: Limits) -> i64 {
    let vals = filtered(values, limits);
    if vals.is_empty() {
        return 0;
    }
    let sum: i64 = vals.iter().sum();
    sum.div_euclid(vals.len() as i64)
}

/// Floored sample variance (divisor `n - 1`). `0` when fewer than 2 filtered
/// values remain.
///
/// A supplied `mean` is used as-is, even when it was computed over a
/// different value set than `values`. The validation engine relies on this:
/// it pools the candidate into the variance set while keeping the
/// historical-only mean.
pub fn variance(values: &[i64], mean: Option<i64>, limits: Limits) -> i64 {
    let vals = filtered(values, limits);
    if vals.len() < 2 {
        return 0;
    }
    let mean = mean.unwrap_or_else(|| average(&vals, Limits::NONE));
    let sum_sq: i64 = vals.iter().map(|&v| (v - mean).pow(2)).sum();
    sum_sq.div_euclid(vals.len() as i64 - 1)
}

/// `floor(sqrt(variance))`.
pub fn standard_deviation(values: &[i64], mean: Option<i64>, limits: Limits) -> i64 {
    (variance(values, mean, limits) as f64).sqrt().floor() as i64
}

/// Standard deviation as a floored percentage of the mean. `0` when the mean
/// is `0`; never divides by zero.
pub fn coefficient_of_variation(stddev: i64, mean: i64) -> i64 {
    if mean == 0 {
        return 0;
    }
    (stddev * 100).div_euclid(mean)
}

/// `floor(pct * value / 100)`.
pub fn percentage(pct: i64, value: i64) -> i64 {
    (pct * value).div_euclid(100)
}

/// Q1 and Q3 of `values`.
///
/// Sorts ascending and splits at `mid = n / 2`; for odd `n` the middle
/// element belongs to neither half. Each half's median is returned
/// unfloored (it may be fractional for even-length halves). Fewer than 2
/// values yield `(0.0, 0.0)`.
pub fn interquartile_range(values: &[i64]) -> (f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    let mid = n / 2;
    let lower_half = &sorted[..mid];
    let upper_half = &sorted[mid + n % 2..];
    (median(lower_half), median(upper_half))
}

fn median(values: &[i64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        (values[mid - 1] + values[mid]) as f64 / 2.0
    } else {
        values[mid] as f64
    }
}

/// One bin of an equal-width frequency histogram. Upper bound exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyBucket {
    pub lower_limit: i64,
    pub upper_limit: i64,
    pub count: u64,
    pub relative_pct: i64,
}

/// Equal-width frequency histogram over the filtered values.
///
/// `None` when fewer than 2 filtered values remain or the interval count
/// `m = sqrt(interval_hint or n)` drops below 1. Builds `ceil(m)` contiguous
/// buckets of width `floor((max - min) / m)` starting at the minimum; the
/// last bucket's upper bound is not clamped to the true maximum, so the
/// maximum itself may fall outside every bucket.
pub fn frequency_distribution_table(
    values: &[i64],
    limits: Limits,
    interval_hint: Option<usize>,
) -> Option<Vec<FrequencyBucket>> {
    let mut vals = filtered(values, limits);
    if vals.len() < 2 {
        return None;
    }
    vals.sort_unstable();

    let n = vals.len();
    let m = (interval_hint.unwrap_or(n) as f64).sqrt();
    if m < 1.0 {
        return None;
    }

    let width = ((vals[n - 1] - vals[0]) as f64 / m).floor() as i64;
    let bucket_count = m.ceil() as usize;
    let mut buckets = Vec::with_capacity(bucket_count);
    let mut lower = vals[0];
    for _ in 0..bucket_count {
        let upper = lower + width;
        let count = vals.iter().filter(|&&v| v >= lower && v < upper).count() as u64;
        buckets.push(FrequencyBucket {
            lower_limit: lower,
            upper_limit: upper,
            count,
            relative_pct: (count as i64 * 100).div_euclid(n as i64),
        });
        lower = upper;
    }
    Some(buckets)
}

/// Whether `value` lands in the bucket with the strictly largest relative
/// frequency. Ties keep the leftmost bucket. An empty table never matches.
pub fn is_in_highest_frequency_bucket(value: i64, table: &[FrequencyBucket]) -> bool {
    let Some(first) = table.first() else {
        return false;
    };
    let mut best = first;
    for bucket in &table[1..] {
        if bucket.relative_pct > best.relative_pct {
            best = bucket;
        }
    }
    value >= best.lower_limit && value < best.upper_limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_basic_and_empty() {
        assert_eq!(average(&[10, 20, 30], Limits::NONE), 20);
        assert_eq!(average(&[], Limits::NONE), 0);
    }

    #[test]
    fn test_average_floors() {
        assert_eq!(average(&[1, 2], Limits::NONE), 1);
        assert_eq!(average(&[0, 0, 5], Limits::NONE), 1);
    }

    #[test]
    fn test_average_respects_limits() {
        let limits = Limits {
            lower: Some(10),
            upper: Some(30),
        };
        assert_eq!(average(&[5, 10, 20, 30, 100], limits), 20);
        // Filter leaves nothing behind.
        assert_eq!(average(&[1, 2, 3], Limits { lower: Some(50), upper: None }), 0);
    }

    #[test]
    fn test_variance_sample_divisor() {
        // Deviations from mean 20: -10, 0, 10 -> 200 / 2.
        assert_eq!(variance(&[10, 20, 30], None, Limits::NONE), 100);
        assert_eq!(variance(&[10], None, Limits::NONE), 0);
        assert_eq!(variance(&[], None, Limits::NONE), 0);
    }

    #[test]
    fn test_variance_uses_supplied_mean_as_is() {
        // Mean 0 supplied explicitly must not be recomputed.
        assert_eq!(variance(&[10, 20, 30], Some(0), Limits::NONE), 700);
        // Historical mean over a candidate-inclusive pool.
        assert_eq!(variance(&[100, 100, 100, 200], Some(100), Limits::NONE), 3333);
    }

    #[test]
    fn test_standard_deviation_floors_sqrt() {
        // variance 3333 -> sqrt ~ 57.73 -> 57
        assert_eq!(
            standard_deviation(&[100, 100, 100, 200], Some(100), Limits::NONE),
            57
        );
    }

    #[test]
    fn test_coefficient_of_variation_zero_mean() {
        assert_eq!(coefficient_of_variation(57, 0), 0);
        assert_eq!(coefficient_of_variation(0, 0), 0);
        assert_eq!(coefficient_of_variation(57, 100), 57);
        assert_eq!(coefficient_of_variation(14, 101), 13);
    }

    #[test]
    fn test_percentage_floors() {
        assert_eq!(percentage(80, 100), 80);
        assert_eq!(percentage(120, 100), 120);
        assert_eq!(percentage(80, 14), 11);
        assert_eq!(percentage(80, 0), 0);
    }

    #[test]
    fn test_interquartile_even_length() {
        let (q1, q3) = interquartile_range(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(q1, 2.5);
        assert_eq!(q3, 6.5);
    }

    #[test]
    fn test_interquartile_odd_length_excludes_middle() {
        let (q1, q3) = interquartile_range(&[1, 2, 3, 4, 5]);
        assert_eq!(q1, 1.5);
        assert_eq!(q3, 4.5);
    }

    #[test]
    fn test_interquartile_unsorted_input() {
        let (q1, q3) = interquartile_range(&[200, 100, 100, 100]);
        assert_eq!(q1, 100.0);
        assert_eq!(q3, 150.0);
    }

    #[test]
    fn test_interquartile_degenerate() {
        assert_eq!(interquartile_range(&[]), (0.0, 0.0));
        // n = 1: the middle element belongs to neither half.
        assert_eq!(interquartile_range(&[7]), (0.0, 0.0));
    }

    #[test]
    fn test_frequency_table_too_few_values() {
        assert!(frequency_distribution_table(&[], Limits::NONE, None).is_none());
        assert!(frequency_distribution_table(&[5], Limits::NONE, None).is_none());
    }

    #[test]
    fn test_frequency_table_four_values() {
        // n = 4, m = 2, width = floor(3 / 2) = 1.
        let table =
            frequency_distribution_table(&[100, 101, 102, 103], Limits::NONE, None).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].lower_limit, 100);
        assert_eq!(table[0].upper_limit, 101);
        assert_eq!(table[0].count, 1);
        assert_eq!(table[0].relative_pct, 25);
        assert_eq!(table[1].lower_limit, 101);
        assert_eq!(table[1].upper_limit, 102);
    }

    #[test]
    fn test_frequency_table_last_bucket_not_clamped() {
        // n = 5, m ~ 2.236, width = floor(8 / 2.236) = 3, ceil(m) = 3 buckets.
        let table = frequency_distribution_table(&[1, 3, 5, 7, 9], Limits::NONE, None).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[2].upper_limit, 10);
        let total: u64 = table.iter().map(|b| b.count).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_frequency_table_zero_width_range() {
        // max == min: every bucket is empty [v, v).
        let table = frequency_distribution_table(&[100, 100, 100], Limits::NONE, None).unwrap();
        assert!(table.iter().all(|b| b.count == 0));
        assert!(!is_in_highest_frequency_bucket(100, &table));
    }

    #[test]
    fn test_highest_frequency_bucket_first_wins_ties() {
        let table =
            frequency_distribution_table(&[100, 101, 102, 103], Limits::NONE, None).unwrap();
        assert_eq!(table[0].relative_pct, table[1].relative_pct);
        assert!(is_in_highest_frequency_bucket(100, &table));
        assert!(!is_in_highest_frequency_bucket(101, &table));
    }

    #[test]
    fn test_highest_frequency_bucket_midpoint_roundtrip() {
        // n = 9, m = 3, width = 6: buckets [1,7) x5, [7,13) x3, [13,19) x0.
        let table =
            frequency_distribution_table(&[1, 2, 2, 2, 3, 9, 10, 11, 20], Limits::NONE, None)
                .unwrap();
        assert_eq!(table[0].relative_pct, 55);
        let midpoint = (table[0].lower_limit + table[0].upper_limit) / 2;
        assert!(is_in_highest_frequency_bucket(midpoint, &table));
        assert!(!is_in_highest_frequency_bucket(9, &table));
    }

    #[test]
    fn test_highest_frequency_bucket_empty_table() {
        assert!(!is_in_highest_frequency_bucket(5, &[]));
    }
}

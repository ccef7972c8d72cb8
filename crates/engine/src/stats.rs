// ABOUTME: Small numeric helpers used across the analysis modules.
// ABOUTME: Mean, median, population standard deviation, rounding, frequency tables and view tiers.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; 0.0 for an empty slice. Even lengths average the middle pair.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation (divides by n, not n - 1).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Rounds to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole * 100`, or 0.0 when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// `part / whole * 1000`, or 0.0 when `whole` is zero.
pub fn per_thousand(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 1000.0
}

/// Counts occurrences and returns them by descending count, ties in
/// first-seen order.
pub fn frequency_table<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut table: Vec<(K, usize)> = Vec::new();
    for value in values {
        match index.get(&value) {
            Some(&slot) => table[slot].1 += 1,
            None => {
                index.insert(value.clone(), table.len());
                table.push((value, 1));
            }
        }
    }
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// Performance tier of an item relative to the catalog's view counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    High,
    Medium,
    Low,
}

/// Sorts by views descending (stable) and assigns thirds by integer
/// division on the sorted index: the first `n / 3` are High, up to
/// `2n / 3` Medium, the rest Low.
pub fn tier_by_views<T, F>(items: &[T], views: F) -> Vec<(Tier, &T)>
where
    F: Fn(&T) -> u64,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| views(b).cmp(&views(a)));

    let n = sorted.len();
    let high_end = n / 3;
    let medium_end = 2 * n / 3;
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let tier = if idx < high_end {
                Tier::High
            } else if idx < medium_end {
                Tier::Medium
            } else {
                Tier::Low
            };
            (tier, item)
        })
        .collect()
}

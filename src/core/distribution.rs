use crate::domain::model::{BucketCount, RankedList};

const MILLION: f64 = 1_000_000.0;

/// Salary ranges, lowest first. Each lower bound is inclusive.
const SALARY_RANGES: &[(f64, &str)] = &[
    (0.0, "Under $10M"),
    (10.0 * MILLION, "$10M-$15M"),
    (15.0 * MILLION, "$15M-$20M"),
    (20.0 * MILLION, "$20M-$25M"),
    (25.0 * MILLION, "$25M-$30M"),
    (30.0 * MILLION, "$30M+"),
];

const SALARY_TIERS: &[(f64, &str)] = &[
    (0.0, "Mid-Tier (under $15M)"),
    (15.0 * MILLION, "High Earners ($15M-$25M)"),
    (25.0 * MILLION, "Elite ($25M+)"),
];

fn bucketize(ranked: &RankedList, bounds: &[(f64, &str)]) -> Vec<BucketCount> {
    let mut counts = vec![0usize; bounds.len()];
    for record in ranked.entries() {
        let idx = bounds
            .iter()
            .rposition(|(lower, _)| record.salary >= *lower)
            .unwrap_or(0);
        counts[idx] += 1;
    }

    bounds
        .iter()
        .zip(counts)
        .map(|((_, label), count)| BucketCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// Player counts per salary range, in ascending range order.
pub fn salary_ranges(ranked: &RankedList) -> Vec<BucketCount> {
    bucketize(ranked, SALARY_RANGES)
}

/// Player counts per tier, from mid-tier up to elite.
pub fn salary_tiers(ranked: &RankedList) -> Vec<BucketCount> {
    bucketize(ranked, SALARY_TIERS)
}

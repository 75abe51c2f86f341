use crate::core::validator::parse_salary;
use crate::domain::model::{PercentileResult, RankedList};

/// Where `query_salary` would land against the ranked list.
///
/// Only entries strictly above the query count against it, so an exact match
/// ranks ahead of incumbents with the same salary. `percentile` is the share
/// of entries that do not exceed the query, in `[0, 100]`; a query under
/// every entry scores 0.
///
/// Returns `None` for a non-positive or non-finite query and for an empty list.
pub fn lookup(ranked: &RankedList, query_salary: f64) -> Option<PercentileResult> {
    if !query_salary.is_finite() || query_salary <= 0.0 || ranked.is_empty() {
        return None;
    }

    let n = ranked.len();
    let higher_count = ranked
        .entries()
        .iter()
        .filter(|r| r.salary > query_salary)
        .count();

    Some(PercentileResult {
        rank: higher_count + 1,
        percentile: (n - higher_count) as f64 / n as f64 * 100.0,
    })
}

/// Same as [`lookup`], for user-typed input like `"$27,000,000"`.
pub fn lookup_str(ranked: &RankedList, query: &str) -> Option<PercentileResult> {
    lookup(ranked, parse_salary(query)?)
}

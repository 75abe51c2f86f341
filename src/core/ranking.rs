use crate::domain::model::{RankedList, SalaryRecord, QUALIFYING_POOL_SIZE};

/// Ranks the top [`QUALIFYING_POOL_SIZE`] salaries.
pub fn rank(valid_records: Vec<SalaryRecord>) -> RankedList {
    rank_top(valid_records, QUALIFYING_POOL_SIZE)
}

/// Stable descending sort by salary, truncated to `limit` entries.
///
/// Fewer than `limit` records is not an error; the list is simply shorter.
pub fn rank_top(mut valid_records: Vec<SalaryRecord>, limit: usize) -> RankedList {
    // sort_by is stable: equal salaries keep input order
    valid_records.sort_by(|a, b| b.salary.total_cmp(&a.salary));
    valid_records.truncate(limit);
    RankedList(valid_records)
}

// Keeps the length; a report may have been ranked with a custom pool size.
impl From<Vec<SalaryRecord>> for RankedList {
    fn from(records: Vec<SalaryRecord>) -> Self {
        let len = records.len();
        rank_top(records, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player: &str, salary: f64) -> SalaryRecord {
        SalaryRecord {
            player: player.to_string(),
            salary,
        }
    }

    #[test]
    fn test_rank_sorts_descending_and_numbers_from_one() {
        let ranked = rank(vec![
            record("C", 20_000_000.0),
            record("A", 30_000_000.0),
            record("B", 25_000_000.0),
        ]);

        let ranks: Vec<(usize, &str)> = ranked
            .iter_ranked()
            .map(|(rank, r)| (rank, r.player.as_str()))
            .collect();
        assert_eq!(ranks, vec![(1, "A"), (2, "B"), (3, "C")]);
    }

    #[test]
    fn test_rank_keeps_input_order_for_ties() {
        let ranked = rank(vec![
            record("first", 10.0),
            record("top", 50.0),
            record("second", 10.0),
            record("third", 10.0),
        ]);

        let players: Vec<&str> = ranked.entries().iter().map(|r| r.player.as_str()).collect();
        assert_eq!(players, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_truncates_to_pool_size() {
        let records = (1..=200)
            .map(|i| record(&format!("P{}", i), i as f64 * 1000.0))
            .collect();

        let ranked = rank(records);

        assert_eq!(ranked.len(), QUALIFYING_POOL_SIZE);
        assert_eq!(ranked.first().unwrap().salary, 200_000.0);
        assert_eq!(ranked.last().unwrap().salary, 76_000.0);
    }

    #[test]
    fn test_rank_top_with_custom_limit() {
        let ranked = rank_top(vec![record("A", 3.0), record("B", 2.0), record("C", 1.0)], 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked.last().unwrap().player, "B");
    }

    #[test]
    fn test_deserialize_resorts_unsorted_array() {
        let json = r#"[
            {"player": "low", "salary": 1000000.0},
            {"player": "high", "salary": 30000000.0},
            {"player": "mid", "salary": 5000000.0},
            {"player": "mid-tie", "salary": 5000000.0}
        ]"#;

        let ranked: RankedList = serde_json::from_str(json).unwrap();

        let players: Vec<&str> = ranked.entries().iter().map(|r| r.player.as_str()).collect();
        assert_eq!(players, vec!["high", "mid", "mid-tie", "low"]);
        assert_eq!(serde_json::to_value(&ranked).unwrap()[0]["player"], "high");
    }
}

use crate::domain::model::{RankedList, StatisticsResult};
use crate::utils::error::{QoError, Result};

/// Derives the qualifying offer and its companion figures from a ranked list.
///
/// `valid_salaries` and `invalid_salaries` are carried through from
/// validation. Values are exact; rounding belongs to whoever formats them.
pub fn aggregate(
    ranked: RankedList,
    valid_salaries: usize,
    invalid_salaries: usize,
) -> Result<StatisticsResult> {
    let (highest, cutoff) = match (ranked.first(), ranked.last()) {
        (Some(highest), Some(cutoff)) => (highest.clone(), cutoff.clone()),
        _ => {
            return Err(QoError::InsufficientData {
                valid: valid_salaries,
                invalid: invalid_salaries,
            })
        }
    };

    let salaries: Vec<f64> = ranked.entries().iter().map(|r| r.salary).collect();
    let qualifying_offer = salaries.iter().sum::<f64>() / salaries.len() as f64;

    Ok(StatisticsResult {
        qualifying_offer,
        median_salary: median(&salaries),
        salary_spread: highest.salary - cutoff.salary,
        top_125: ranked,
        valid_salaries,
        invalid_salaries,
        highest_salary: highest,
        cutoff_salary: cutoff,
    })
}

// Input is already sorted descending.
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranking::rank;
    use crate::domain::model::SalaryRecord;

    fn ranked(salaries: &[(&str, f64)]) -> RankedList {
        rank(
            salaries
                .iter()
                .map(|(player, salary)| SalaryRecord {
                    player: player.to_string(),
                    salary: *salary,
                })
                .collect(),
        )
    }

    #[test]
    fn test_aggregate_three_players() {
        let list = ranked(&[("A", 30_000_000.0), ("B", 25_000_000.0), ("C", 20_000_000.0)]);

        let stats = aggregate(list, 3, 0).unwrap();

        assert_eq!(stats.qualifying_offer, 25_000_000.0);
        assert_eq!(stats.median_salary, 25_000_000.0);
        assert_eq!(stats.salary_spread, 10_000_000.0);
        assert_eq!(stats.highest_salary.player, "A");
        assert_eq!(stats.cutoff_salary.player, "C");
        assert_eq!(stats.top_125.len(), 3);
    }

    #[test]
    fn test_median_of_even_count_averages_middle_pair() {
        let list = ranked(&[("A", 40.0), ("B", 30.0), ("C", 20.0), ("D", 10.0)]);

        let stats = aggregate(list, 4, 1).unwrap();

        assert_eq!(stats.median_salary, 25.0);
        assert_eq!(stats.qualifying_offer, 25.0);
        assert_eq!(stats.invalid_salaries, 1);
    }

    #[test]
    fn test_single_entry_has_zero_spread() {
        let stats = aggregate(ranked(&[("Solo", 1_000_000.0)]), 1, 0).unwrap();

        assert_eq!(stats.salary_spread, 0.0);
        assert_eq!(stats.highest_salary, stats.cutoff_salary);
        assert_eq!(stats.median_salary, 1_000_000.0);
    }

    #[test]
    fn test_empty_list_is_insufficient_data() {
        let err = aggregate(RankedList::default(), 0, 7).unwrap_err();
        assert!(matches!(
            err,
            QoError::InsufficientData { valid: 0, invalid: 7 }
        ));
    }
}

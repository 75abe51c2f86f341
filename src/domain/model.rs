use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of salaries averaged into the qualifying offer.
pub const QUALIFYING_POOL_SIZE: usize = 125;

/// One unparsed row as delivered by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSalaryRecord {
    pub player: String,
    pub salary: String,
}

impl RawSalaryRecord {
    pub fn new(player: impl Into<String>, salary: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            salary: salary.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub player: String,
    pub salary: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: Vec<SalaryRecord>,
    pub invalid_count: usize,
}

/// Records sorted by salary descending, ties kept in input order.
///
/// Deserializing goes through `From<Vec<SalaryRecord>>`, which re-sorts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<SalaryRecord>", into = "Vec<SalaryRecord>")]
pub struct RankedList(pub(crate) Vec<SalaryRecord>);

impl From<RankedList> for Vec<SalaryRecord> {
    fn from(list: RankedList) -> Self {
        list.0
    }
}

impl RankedList {
    pub fn entries(&self) -> &[SalaryRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&SalaryRecord> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&SalaryRecord> {
        self.0.last()
    }

    /// `(rank, record)` pairs with 1-based ranks.
    pub fn iter_ranked(&self) -> impl Iterator<Item = (usize, &SalaryRecord)> {
        self.0.iter().enumerate().map(|(i, record)| (i + 1, record))
    }

    pub fn into_inner(self) -> Vec<SalaryRecord> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub qualifying_offer: f64,
    pub median_salary: f64,
    pub salary_spread: f64,
    pub top_125: RankedList,
    pub valid_salaries: usize,
    pub invalid_salaries: usize,
    pub highest_salary: SalaryRecord,
    pub cutoff_salary: SalaryRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileResult {
    pub rank: usize,
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub label: String,
    pub count: usize,
}

/// Everything one pipeline run hands to the load step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingOfferReport {
    #[serde(flatten)]
    pub statistics: StatisticsResult,
    pub total_rows: usize,
    pub distribution: Vec<BucketCount>,
    pub tiers: Vec<BucketCount>,
    pub generated_at: DateTime<Utc>,
}

impl QualifyingOfferReport {
    pub fn lookup(&self, query_salary: f64) -> Option<PercentileResult> {
        crate::core::percentile::lookup(&self.statistics.top_125, query_salary)
    }
}

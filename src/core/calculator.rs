use crate::core::{distribution, ranking, statistics, validator};
use crate::domain::model::{
    QualifyingOfferReport, RawSalaryRecord, StatisticsResult, QUALIFYING_POOL_SIZE,
};
use crate::utils::error::Result;

/// validate → rank → aggregate over the standard 125-salary pool.
///
/// Stateless: the same input always yields the same result.
pub fn compute(raw_records: Option<&[RawSalaryRecord]>) -> Result<StatisticsResult> {
    compute_top(raw_records, QUALIFYING_POOL_SIZE)
}

pub fn compute_top(raw_records: Option<&[RawSalaryRecord]>, top_n: usize) -> Result<StatisticsResult> {
    let validation = validator::validate(raw_records)?;
    let valid_count = validation.valid.len();
    let ranked = ranking::rank_top(validation.valid, top_n);
    statistics::aggregate(ranked, valid_count, validation.invalid_count)
}

/// [`compute_top`] plus the distribution data and bookkeeping the load step writes out.
pub fn build_report(raw_records: &[RawSalaryRecord], top_n: usize) -> Result<QualifyingOfferReport> {
    let statistics = compute_top(Some(raw_records), top_n)?;

    Ok(QualifyingOfferReport {
        total_rows: raw_records.len(),
        distribution: distribution::salary_ranges(&statistics.top_125),
        tiers: distribution::salary_tiers(&statistics.top_125),
        generated_at: chrono::Utc::now(),
        statistics,
    })
}

use crate::domain::model::{RawSalaryRecord, SalaryRecord, ValidationResult};
use crate::utils::error::{QoError, Result};

/// Parses a salary cell such as `$1,234,567` or `$$ 950000.50`.
///
/// Every character other than digits, `.` and `-` is stripped first, so
/// currency symbols, thousands separators and stray text disappear. The rest
/// must parse as a finite number strictly greater than zero.
pub fn parse_salary(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

fn parse_record(raw: &RawSalaryRecord) -> Option<SalaryRecord> {
    let player = raw.player.trim();
    if player.is_empty() {
        return None;
    }

    Some(SalaryRecord {
        player: player.to_string(),
        salary: parse_salary(&raw.salary)?,
    })
}

/// Splits raw rows into parsed records and a count of rejected ones.
///
/// `None` means the source produced nothing at all and fails with
/// [`QoError::InputMissing`]; an empty slice is a valid (if useless) input.
pub fn validate(raw_records: Option<&[RawSalaryRecord]>) -> Result<ValidationResult> {
    let raw_records = raw_records.ok_or_else(|| QoError::InputMissing {
        origin: "validator received no record sequence".to_string(),
    })?;

    let mut valid = Vec::with_capacity(raw_records.len());
    let mut invalid_count = 0;

    for raw in raw_records {
        match parse_record(raw) {
            Some(record) => valid.push(record),
            None => {
                tracing::trace!("Dropping malformed row: {:?}", raw);
                invalid_count += 1;
            }
        }
    }

    tracing::debug!(
        "Validated {} rows: {} valid, {} invalid",
        raw_records.len(),
        valid.len(),
        invalid_count
    );

    Ok(ValidationResult {
        valid,
        invalid_count,
    })
}

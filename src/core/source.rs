//! Turns fetched bytes into raw `(player, salary)` rows.
//!
//! The published salary page is an HTML table with `Player`, `Salary`, `Year`
//! and `Level` columns; CSV exports and JSON arrays of objects are accepted as
//! well. Only the player and salary cells are kept, unparsed.

use crate::domain::model::RawSalaryRecord;
use crate::domain::ports::SourceFormat;
use crate::utils::error::{QoError, Result};
use regex::Regex;

const PLAYER_COLUMN: &str = "player";
const SALARY_COLUMN: &str = "salary";

fn pattern(re: &str) -> Result<Regex> {
    Regex::new(re).map_err(|e| QoError::ParseError {
        message: format!("invalid pattern {}: {}", re, e),
    })
}

fn missing(origin: &str) -> QoError {
    QoError::InputMissing {
        origin: origin.to_string(),
    }
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Sniffs the payload when the format is [`SourceFormat::Auto`].
pub fn detect_format(payload: &str) -> SourceFormat {
    match payload.trim_start().chars().next() {
        Some('<') => SourceFormat::Html,
        Some('[') | Some('{') => SourceFormat::Json,
        _ => SourceFormat::Csv,
    }
}

pub fn decode_payload(bytes: &[u8], format: SourceFormat) -> Result<Vec<RawSalaryRecord>> {
    let payload = String::from_utf8_lossy(bytes);
    tracing::debug!("Decoding {} byte payload as {:?}", bytes.len(), format);

    match format {
        SourceFormat::Auto => decode_payload(bytes, detect_format(&payload)),
        SourceFormat::Html => decode_html(&payload),
        SourceFormat::Csv => decode_csv(&payload),
        SourceFormat::Json => decode_json(&payload),
    }
}

fn decode_html(payload: &str) -> Result<Vec<RawSalaryRecord>> {
    let table_re = pattern(r"(?is)<table[^>]*>(.*?)</table>")?;
    let row_re = pattern(r"(?is)<tr[^>]*>(.*?)</tr>")?;
    let cell_re = pattern(r"(?is)<t[hd][^>]*>(.*?)</t[hd]>")?;
    let tag_re = pattern(r"(?s)<[^>]+>")?;

    let table = table_re
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| missing("no <table> found in HTML payload"))?
        .as_str();

    let mut rows = row_re.captures_iter(table).map(|row| {
        cell_re
            .captures_iter(&row[1])
            .map(|cell| decode_entities(tag_re.replace_all(&cell[1], "").trim()))
            .collect::<Vec<String>>()
    });

    // First row carrying both Player and Salary headers
    let headers = rows
        .by_ref()
        .find(|cells| {
            column_index(cells, PLAYER_COLUMN).is_some()
                && column_index(cells, SALARY_COLUMN).is_some()
        })
        .ok_or_else(|| missing("HTML table has no Player/Salary header"))?;
    let player_idx = column_index(&headers, PLAYER_COLUMN).unwrap_or_default();
    let salary_idx = column_index(&headers, SALARY_COLUMN).unwrap_or_default();

    Ok(rows
        .filter(|cells| !cells.is_empty())
        .map(|cells| {
            RawSalaryRecord::new(
                cells.get(player_idx).cloned().unwrap_or_default(),
                cells.get(salary_idx).cloned().unwrap_or_default(),
            )
        })
        .collect())
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#36;", "$")
        .replace("&#44;", ",")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn decode_csv(payload: &str) -> Result<Vec<RawSalaryRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(payload.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let (player_idx, salary_idx) = match (
        column_index(&headers, PLAYER_COLUMN),
        column_index(&headers, SALARY_COLUMN),
    ) {
        (Some(p), Some(s)) => (p, s),
        _ => return Err(missing("CSV header has no Player/Salary columns")),
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(RawSalaryRecord::new(
            row.get(player_idx).unwrap_or_default(),
            row.get(salary_idx).unwrap_or_default(),
        ));
    }
    Ok(records)
}

fn json_field<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Option<&'a serde_json::Value> {
    obj.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

fn json_text(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn decode_json(payload: &str) -> Result<Vec<RawSalaryRecord>> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => return Err(missing("JSON payload is not an array of salary rows")),
    };

    Ok(items
        .iter()
        .map(|item| match item {
            serde_json::Value::Object(obj) => RawSalaryRecord::new(
                json_text(json_field(obj, PLAYER_COLUMN)),
                json_text(json_field(obj, SALARY_COLUMN)),
            ),
            // Non-object elements become invalid rows
            _ => RawSalaryRecord::new("", ""),
        })
        .collect())
}

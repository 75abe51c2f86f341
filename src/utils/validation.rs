use crate::utils::error::{QoError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> QoError {
    QoError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    if formats.is_empty() {
        return Err(invalid(field_name, "", "At least one output format is required"));
    }

    for format in formats {
        if !allowed.contains(&format.as_str()) {
            return Err(invalid(
                field_name,
                format,
                format!("Unsupported format. Valid formats: {}", allowed.join(", ")),
            ));
        }
    }
    Ok(())
}

/// Exactly one of the two optional source settings must be present.
pub fn validate_exclusive_source(
    endpoint: Option<&str>,
    file: Option<&str>,
) -> Result<()> {
    match (endpoint, file) {
        (Some(_), Some(_)) => Err(QoError::ConfigValidationError {
            field: "source".to_string(),
            message: "Specify either an endpoint or an input file, not both".to_string(),
        }),
        (None, None) => Err(QoError::MissingConfigError {
            field: "source endpoint or input file".to_string(),
        }),
        (Some(url), None) => validate_url("source.endpoint", url),
        (None, Some(path)) => validate_path("source.path", path),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.endpoint", "https://example.com").is_ok());
        assert!(validate_url("source.endpoint", "http://example.com").is_ok());
        assert!(validate_url("source.endpoint", "").is_err());
        assert!(validate_url("source.endpoint", "invalid-url").is_err());
        assert!(validate_url("source.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("ranking.top_n", 125, 1).is_ok());
        assert!(validate_positive_number("ranking.top_n", 0, 1).is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_output_formats("load.output_formats", &formats, &["json", "csv"]).is_ok());

        let unknown = vec!["xlsx".to_string()];
        assert!(validate_output_formats("load.output_formats", &unknown, &["json", "csv"]).is_err());
        assert!(validate_output_formats("load.output_formats", &[], &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_exclusive_source() {
        assert!(validate_exclusive_source(Some("https://example.com"), None).is_ok());
        assert!(validate_exclusive_source(None, Some("salaries.csv")).is_ok());
        assert!(matches!(
            validate_exclusive_source(None, None),
            Err(QoError::MissingConfigError { .. })
        ));
        assert!(validate_exclusive_source(Some("https://example.com"), Some("a.csv")).is_err());
    }
}

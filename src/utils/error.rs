use thiserror::Error;

#[derive(Error, Debug)]
pub enum QoError {
    #[error("No salary records supplied: {origin}")]
    InputMissing { origin: String },

    #[error("Insufficient data: {valid} valid salaries ({invalid} invalid), cannot compute the qualifying offer")]
    InsufficientData { valid: usize, invalid: usize },

    #[error("Source returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Payload parsing error: {message}")]
    ParseError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code; 2 marks a failure worth retrying.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl QoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QoError::InputMissing { .. } => ErrorCategory::Input,
            QoError::HttpStatus { .. } | QoError::ApiError(_) => ErrorCategory::Network,
            QoError::InsufficientData { .. }
            | QoError::CsvError(_)
            | QoError::SerializationError(_)
            | QoError::ParseError { .. } => ErrorCategory::Data,
            QoError::ConfigValidationError { .. }
            | QoError::InvalidConfigValueError { .. }
            | QoError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QoError::IoError(_) | QoError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QoError::InputMissing { .. } => {
                "Pass --source-url or --input-file pointing at a salary table"
            }
            QoError::InsufficientData { .. } => {
                "Check that the Salary column holds positive amounts such as $1,234,567"
            }
            QoError::HttpStatus { .. } | QoError::ApiError(_) => {
                "Check the source URL and network connectivity, then retry"
            }
            QoError::CsvError(_) | QoError::ParseError { .. } => {
                "Make sure the payload is a CSV, JSON or HTML table with Player and Salary columns"
            }
            QoError::SerializationError(_) => "Re-run with --verbose and inspect the payload",
            QoError::ConfigValidationError { .. }
            | QoError::InvalidConfigValueError { .. }
            | QoError::MissingConfigError { .. } => {
                "Fix the configuration value and run again"
            }
            QoError::IoError(_) | QoError::ZipError(_) => {
                "Check file permissions and free disk space under the output path"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QoError::InputMissing { .. } => {
                "No salary data was supplied, nothing to calculate.".to_string()
            }
            QoError::InsufficientData { valid, invalid } => format!(
                "Could not calculate the qualifying offer: {} valid and {} invalid salaries.",
                valid, invalid
            ),
            QoError::HttpStatus { status, .. } => {
                format!("The salary source answered with HTTP {}.", status)
            }
            QoError::ApiError(_) => "Failed to download the salary data.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QoError>;

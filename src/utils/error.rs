use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Invalid input for {field}: {value} ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RoiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RoiError::InvalidInput { .. } => ErrorCategory::Input,
            RoiError::InvalidConfigValueError { .. }
            | RoiError::MissingConfigError { .. }
            | RoiError::ConfigValidationError { .. }
            | RoiError::TomlError(_) => ErrorCategory::Configuration,
            RoiError::IoError(_) => ErrorCategory::Io,
            RoiError::CsvError(_) | RoiError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Serialization => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RoiError::InvalidInput { field, .. } => format!(
                "Provide a finite, non-negative number for '{}'",
                field
            ),
            RoiError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' in the configuration", field)
            }
            RoiError::MissingConfigError { field } => {
                format!("Add the required field '{}' to the configuration", field)
            }
            RoiError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' section of the configuration file", field)
            }
            RoiError::TomlError(_) => "Make sure the file is valid TOML".to_string(),
            RoiError::IoError(_) => {
                "Check that the path exists and is writable".to_string()
            }
            RoiError::CsvError(_) | RoiError::SerializationError(_) => {
                "Report this problem; the report could not be encoded".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RoiError::InvalidInput { field, reason, .. } => {
                format!("The value for '{}' is not usable: {}", field, reason)
            }
            RoiError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            RoiError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            RoiError::ConfigValidationError { message, .. } => {
                format!("Configuration problem: {}", message)
            }
            RoiError::TomlError(e) => format!("Could not read configuration: {}", e),
            RoiError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;

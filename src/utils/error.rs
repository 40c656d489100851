use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Location unavailable: {reason}")]
    LocationDenied { reason: String },

    #[error("Query is empty")]
    EmptyQuery,

    #[error("Advice request failed: {message}")]
    AdviceRequestFailed { message: String },

    #[error("Advice service returned HTTP {status}: {body}")]
    AdviceServiceError { status: u16, body: String },

    #[error("Malformed advice response: {message}")]
    MalformedAdviceResponse { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Location,
    Input,
    Advice,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LocatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LocatorError::LocationDenied { .. } => ErrorCategory::Location,
            LocatorError::EmptyQuery => ErrorCategory::Input,
            LocatorError::AdviceRequestFailed { .. }
            | LocatorError::AdviceServiceError { .. }
            | LocatorError::MalformedAdviceResponse { .. }
            | LocatorError::ApiError(_) => ErrorCategory::Advice,
            LocatorError::ConfigError { .. }
            | LocatorError::ConfigValidationError { .. }
            | LocatorError::InvalidConfigValueError { .. }
            | LocatorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LocatorError::IoError(_)
            | LocatorError::SerializationError(_)
            | LocatorError::ProcessingError { .. } => ErrorCategory::System,
        }
    }

    /// Location and advice failures never stop the tool; the registry stays usable.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Location | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Advice => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_advice_failure(&self) -> bool {
        self.category() == ErrorCategory::Advice
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LocatorError::LocationDenied { .. } => {
                "Location access denied. Please type your town or city.".to_string()
            }
            LocatorError::EmptyQuery => "Please enter a location to search for.".to_string(),
            LocatorError::AdviceServiceError { status, .. } => {
                format!("The travel advice service rejected the request (HTTP {})", status)
            }
            e if e.is_advice_failure() => {
                "Travel advice is unavailable right now; the branch list is still accurate."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Location => {
                "Pass --query with the patient's town, or supply --lat and --lng".to_string()
            }
            ErrorCategory::Input => "Provide a non-empty --query".to_string(),
            ErrorCategory::Advice => {
                "Check the API key, endpoint and network connectivity, then retry".to_string()
            }
            ErrorCategory::Configuration => {
                "Review the command-line flags or the TOML configuration file".to_string()
            }
            ErrorCategory::System => {
                "Check file permissions and free disk space for the output path".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_and_advice_failures_are_not_fatal() {
        let denied = LocatorError::LocationDenied {
            reason: "permission denied".to_string(),
        };
        assert_eq!(denied.category(), ErrorCategory::Location);
        assert_eq!(denied.severity(), ErrorSeverity::Low);
        assert!(denied.user_friendly_message().contains("type your town"));

        let failed = LocatorError::AdviceServiceError {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert!(failed.is_advice_failure());
        assert_eq!(failed.severity(), ErrorSeverity::Medium);
        assert!(failed.user_friendly_message().contains("503"));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = LocatorError::MissingConfigError {
            field: "advice.api_key".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.severity() > ErrorSeverity::Medium);
        assert_eq!(
            err.to_string(),
            "Missing required configuration field: advice.api_key"
        );
    }
}

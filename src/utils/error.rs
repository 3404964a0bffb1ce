use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{field} not set in environment variables.")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed event: {message}")]
    MalformedEvent { message: String },

    #[error("S3 {operation} failed for bucket {bucket}: {message}")]
    S3 {
        operation: &'static str,
        bucket: String,
        message: String,
    },

    #[error("Webhook request failed: {0}")]
    WebhookError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Storage,
    Notification,
    System,
}

impl GuardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GuardError::ConfigError { .. }
            | GuardError::MissingConfigError { .. }
            | GuardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GuardError::MalformedEvent { .. } | GuardError::SerializationError(_) => {
                ErrorCategory::Input
            }
            GuardError::S3 { .. } => ErrorCategory::Storage,
            GuardError::WebhookError(_) => ErrorCategory::Notification,
            GuardError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("The event could not be read: {}", self),
            ErrorCategory::Storage => format!("The bucket could not be checked or fixed: {}", self),
            ErrorCategory::Notification => {
                format!("Versioning was enabled but the alert was not sent: {}", self)
            }
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        GuardError::MalformedEvent {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GuardError>;

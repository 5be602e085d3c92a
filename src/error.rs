// src/error.rs - Error model shared by the API client, configuration and UI

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Configuration {
        key: Option<String>,
        validation_errors: Vec<String>,
    },
    Validation {
        field: Option<String>,
        rules: Vec<String>,
    },
    Network {
        status_code: Option<u16>,
        endpoint: Option<String>,
        error_code: Option<String>,
    },
    Upload {
        file_name: Option<String>,
    },
    Authentication {
        reason: String,
    },
    Cancelled {
        operation: String,
    },
    Application,
    Io,
    Serialization,
    Timeout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub id: Uuid,
    pub kind: ErrorKind,
    pub message: String,
    pub severity: ErrorSeverity,
    pub source: String,
    pub correlation_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    pub metadata: crate::types::Metadata,
    pub causes: Vec<String>,
}

impl Error {
    /// Creates a new error with the specified kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            severity: ErrorSeverity::Medium,
            source: "unknown".to_string(),
            correlation_id: None,
            timestamp: Utc::now(),
            metadata: std::collections::HashMap::new(),
            causes: Vec::new(),
        }
    }

    /// Sets the error severity
    pub fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the error source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the correlation ID
    pub fn correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Adds metadata to the error
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Adds a cause to the error chain
    pub fn caused_by(mut self, cause: impl fmt::Display) -> Self {
        self.causes.push(cause.to_string());
        self
    }

    /// Whether the request was dropped because its owner went away
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled { .. })
    }

    /// Backend error code carried by a network error, if any
    pub fn error_code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Network { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// Message suitable for a toast: translated for API errors, raw otherwise
    pub fn user_message(&self) -> String {
        match &self.kind {
            ErrorKind::Network { error_code, .. } => {
                translate_error_code(error_code.as_deref()).to_string()
            }
            _ => self.message.clone(),
        }
    }

    /// Creates a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Configuration {
                key: None,
                validation_errors: Vec::new(),
            },
            message,
        )
        .severity(ErrorSeverity::High)
    }

    /// Creates a configuration error listing every failed rule
    pub fn config_invalid(validation_errors: Vec<String>) -> Self {
        let message = format!("Invalid configuration: {}", validation_errors.join("; "));
        Self::new(
            ErrorKind::Configuration {
                key: None,
                validation_errors,
            },
            message,
        )
        .severity(ErrorSeverity::High)
    }

    /// Creates a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorKind::Validation {
                field: Some(field.into()),
                rules: vec![message.clone()],
            },
            message,
        )
        .severity(ErrorSeverity::Low)
    }

    /// Creates a network error for a failed API call
    pub fn network(
        endpoint: impl Into<String>,
        status_code: Option<u16>,
        error_code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorKind::Network {
                status_code,
                endpoint: Some(endpoint.into()),
                error_code,
            },
            message,
        )
    }

    /// Creates an image upload error
    pub fn upload(file_name: Option<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upload { file_name }, message).severity(ErrorSeverity::Low)
    }

    /// Creates an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self::new(ErrorKind::Authentication { reason: msg.clone() }, msg)
            .severity(ErrorSeverity::High)
    }

    /// Creates a cancellation error
    pub fn cancelled(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        let message = format!("{} was cancelled", operation);
        Self::new(ErrorKind::Cancelled { operation }, message).severity(ErrorSeverity::Low)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.source, self.id, self.message
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let mut error = Error::new(ErrorKind::Io, err.to_string());
        error.source = "std::io::Error".to_string();
        error.severity = ErrorSeverity::High;
        error
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err.url().map(|url| url.path().to_string());
        let status_code = err.status().map(|status| status.as_u16());
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else {
            ErrorKind::Network {
                status_code,
                endpoint,
                error_code: None,
            }
        };
        Error::new(kind, err.to_string()).source("reqwest")
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::Serialization, err.to_string()).source("serde_json")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::new(ErrorKind::Serialization, err.to_string()).source("serde_yaml")
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorKind::Serialization, err.to_string()).source("toml")
    }
}

/// Extension trait for Results to add context
pub trait ResultExt<T> {
    /// Adds context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::new(ErrorKind::Application, f()).caused_by(e))
    }
}

/// Error codes returned by the backend in `{ "errorCode": ... }` bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmailAlreadyRegistered,
    EmailNoAuthenticated,
    IncorrectPassword,
    UserNotFound,
    OtpInvalid,
    MissingInput,
    InvalidLinkEmailVerification,
    EmailDeactivated,
    InvitationNotFound,
    CategoryAlreadyExist,
    CategoryNotFound,
    DiscountAlreadyExist,
    DiscountNotFound,
    BlogAlreadyExists,
}

/// Shown when the backend code is missing or unknown
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please check and try again.";

impl ErrorCode {
    pub fn parse(code: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(code.to_string())).ok()
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::EmailAlreadyRegistered => "Email is already registered!",
            Self::EmailNoAuthenticated => "Email has not been verified!",
            Self::IncorrectPassword => "Incorrect password!",
            Self::UserNotFound => "Email is not registered!",
            Self::OtpInvalid => "OTP has expired or is invalid!",
            Self::MissingInput => "Missing input information!",
            Self::InvalidLinkEmailVerification => "Invalid verification link!",
            Self::EmailDeactivated => "Email has been deactivated!",
            Self::InvitationNotFound => "Invitation not found!",
            Self::CategoryAlreadyExist => "Category already exists!",
            Self::CategoryNotFound => "Category not found!",
            Self::DiscountAlreadyExist => "This product already has a discount!",
            Self::DiscountNotFound => "No discount found for this product!",
            Self::BlogAlreadyExists => "Blog already exists",
        }
    }
}

/// Maps a backend error code to the message shown to the user
pub fn translate_error_code(code: Option<&str>) -> &'static str {
    code.and_then(ErrorCode::parse)
        .map(ErrorCode::message)
        .unwrap_or(GENERIC_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::config("Invalid configuration value")
            .source("config")
            .metadata("key", serde_json::Value::String("api.base_url".to_string()));

        assert_eq!(error.severity, ErrorSeverity::High);
        assert_eq!(error.source, "config");
        assert!(matches!(error.kind, ErrorKind::Configuration { .. }));
        assert!(error.metadata.contains_key("key"));
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation("category", "Please select a category");
        assert_eq!(error.severity, ErrorSeverity::Low);
        match error.kind {
            ErrorKind::Validation { field, rules } => {
                assert_eq!(field.as_deref(), Some("category"));
                assert_eq!(rules, vec!["Please select a category".to_string()]);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_known_error_code_is_translated() {
        let error = Error::network(
            "/category/create",
            Some(409),
            Some("CATEGORY_ALREADY_EXIST".to_string()),
            "conflict",
        );
        assert_eq!(error.error_code(), Some("CATEGORY_ALREADY_EXIST"));
        assert_eq!(error.user_message(), "Category already exists!");
    }

    #[test]
    fn test_unknown_error_code_falls_back() {
        assert_eq!(translate_error_code(Some("SOMETHING_NEW")), GENERIC_ERROR_MESSAGE);
        assert_eq!(translate_error_code(None), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_cancelled_error() {
        let error = Error::cancelled("createProduct");
        assert!(error.is_cancelled());
        assert_eq!(error.message, "createProduct was cancelled");
    }
}

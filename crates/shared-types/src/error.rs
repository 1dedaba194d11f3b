use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    /// Rejected before dispatch (incomplete filter pair, bad hour range, form input).
    Validation,
    /// Transport-level failure — DNS, connection refused, TLS.
    Network,
    /// The client-side request timeout elapsed.
    Timeout,
    /// HTTP 401 — drives the refresh-and-retry path.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404 on a single-record lookup.
    NotFound,
    /// Any other HTTP error status; the code is preserved.
    Server(u16),
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::Validation => write!(f, "Validation"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::Timeout => write!(f, "Timeout"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::Server(code) => write!(f, "Server({code})"),
        }
    }
}

/// Structured application error shared by the client layer and the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Validation,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation_fields(
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        Self {
            kind: AppErrorKind::Validation,
            message: message.into(),
            field_errors,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Network,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: AppErrorKind::Timeout,
            message: "The request timed out".to_string(),
            field_errors: HashMap::new(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Unauthorized,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::NotFound,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Map an HTTP error status (plus the backend's `detail` text, when it
    /// sent one) into the matching error kind.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let kind = match status {
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            code => AppErrorKind::Server(code),
        };
        let message = match (&kind, detail) {
            (_, Some(detail)) if !detail.is_empty() => detail,
            (AppErrorKind::Unauthorized, _) => "Authentication required".to_string(),
            (AppErrorKind::Forbidden, _) => "You do not have permission for this action".to_string(),
            (AppErrorKind::NotFound, _) => "Record not found".to_string(),
            (_, _) => format!("The server returned status {status}"),
        };
        Self {
            kind,
            message,
            field_errors: HashMap::new(),
        }
    }

    /// Message suitable for an inline alert. Transport failures collapse to a
    /// generic retry suggestion; everything else surfaces its own message,
    /// prefixed with the status code for server errors.
    pub fn user_message(&self) -> String {
        match self.kind {
            AppErrorKind::Network | AppErrorKind::Timeout => {
                "Could not reach the server. Please try again.".to_string()
            }
            AppErrorKind::Server(code) => format!("Error {code}: {}", self.message),
            _ => self.message.clone(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation_fields("Validation failed", field_errors)
    }
}

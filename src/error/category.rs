//! Error category classification.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or invalid settings. Fatal at startup.
    Configuration,

    /// Connection, timeout and transport status errors.
    /// Generally transient.
    Network,

    /// The stream carried data this client cannot interpret.
    Protocol,

    /// The backend answered but refused or garbled a request.
    Service,

    /// Local storage errors.
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    ///
    /// Nothing retries automatically; this only shapes the message shown.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Service)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Network => "network",
            ErrorCategory::Protocol => "protocol",
            ErrorCategory::Service => "service",
            ErrorCategory::System => "system",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "Check the CHAT_* environment variables",
            ErrorCategory::Network => "Check your connection and send the message again",
            ErrorCategory::Protocol => "The server sent an unexpected response. Try again",
            ErrorCategory::Service => "The chat service may be unavailable. Try again later",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Service.is_retryable());
        assert!(!ErrorCategory::Protocol.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(ErrorCategory::Configuration.as_str(), "configuration");
    }

    #[test]
    fn test_recovery_hint() {
        assert!(ErrorCategory::Configuration.recovery_hint().contains("CHAT_"));
    }
}

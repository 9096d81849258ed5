//! Error types for the Banter application
//!
//! This module defines custom error types used across the session panel.

use thiserror::Error;

/// Banter application errors
#[derive(Error, Debug, Clone)]
pub enum BanterError {
    /// Voice roster payload could not be parsed
    #[error("Roster error: {0}")]
    RosterError(String),

    /// Channel communication error
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BanterError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors allow the application to continue running,
    /// while non-recoverable errors may require user intervention or restart.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A bad roster announcement only affects the next announcement
            BanterError::RosterError(_) => true,
            // Channel errors indicate internal issues
            BanterError::ChannelError(_) => false,
            // Config errors require user intervention
            BanterError::ConfigError(_) => false,
        }
    }

    /// Get a user-friendly description of the error
    ///
    /// Returns a message suitable for display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            BanterError::RosterError(_) => {
                "Voice list could not be read. Keeping the previous voices.".to_string()
            }
            BanterError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            BanterError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
        }
    }
}

/// Result type alias for Banter operations
pub type Result<T> = std::result::Result<T, BanterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_error_is_recoverable() {
        let err = BanterError::RosterError("bad json".to_string());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_channel_error_is_not_recoverable() {
        let err = BanterError::ChannelError("disconnected".to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_user_messages_are_not_empty() {
        let errors = [
            BanterError::RosterError("x".to_string()),
            BanterError::ChannelError("x".to_string()),
            BanterError::ConfigError("x".to_string()),
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_display_includes_detail() {
        let err = BanterError::RosterError("expected a list".to_string());
        assert!(err.to_string().contains("expected a list"));
    }
}

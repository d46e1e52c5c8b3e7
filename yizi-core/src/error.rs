//! Structured error types for yizi-core.
//!
//! Library consumers get `thiserror` enums; the `yizi` binary wraps them in
//! `anyhow` for reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Shown when a failed query carries no message of its own.
pub const GENERIC_QUERY_FAILURE: &str = "查詢時發生錯誤";

/// A query against the character store failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("{message}")]
    Transport { message: String },

    /// The store answered with a non-success status
    #[error("store returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded into character records
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// The store rejected the query, possibly without saying why
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_QUERY_FAILURE))]
    Rejected { message: Option<String> },
}

impl QueryError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a rejection carrying a message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// The message to surface verbatim to the user, if the failure has one.
    ///
    /// Blank messages count as absent.
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            QueryError::Transport { message } => Some(message.as_str()),
            QueryError::Decode { message } => Some(message.as_str()),
            QueryError::Status { message, .. } | QueryError::Rejected { message } => {
                message.as_deref()
            }
        };
        message.filter(|m| !m.trim().is_empty())
    }

    /// The message to show the user, falling back to the generic one
    pub fn user_message(&self) -> String {
        self.message().unwrap_or(GENERIC_QUERY_FAILURE).to_string()
    }
}

/// Loading configuration failed
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting has no value anywhere
    #[error("Missing required setting '{key}' (set it in the environment or a .env file)")]
    Missing { key: String },

    /// A setting has a value that cannot be used
    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },

    /// The config file exists but could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for our schema
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create a missing-setting error
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    /// Create an invalid-value error
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

//! Error types for wb-catalog
//!
//! Errors carry locale-neutral, machine-readable codes (see [`Error::error_code`])
//! together with the identifying context: which item or seller, and which
//! endpoint failed.

use crate::endpoints::EndpointLabel;
use crate::types::{ItemId, OwnerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wb-catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wb-catalog
#[derive(Debug, Error)]
pub enum Error {
    /// A required product sub-resource was unavailable (non-200 status,
    /// transport failure or unparsable body)
    #[error("item {item_id} not found: {label} unavailable")]
    ItemNotFound {
        /// The product whose fetch failed
        item_id: ItemId,
        /// The sub-resource that failed
        label: EndpointLabel,
    },

    /// A seller endpoint was unavailable
    #[error("seller {owner_id} not found: {label} unavailable")]
    OwnerNotFound {
        /// The seller id that was requested
        owner_id: OwnerId,
        /// The endpoint that failed
        label: EndpointLabel,
    },

    /// Caller-supplied argument rejected before any request was made
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable description of the violated limit
        message: String,
        /// The offending parameter (e.g., "max_items")
        field: Option<String>,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "concurrency")
        key: Option<String>,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The fetch was abandoned because the aggregator shut down mid-flight
    #[error("fetch cancelled")]
    Cancelled,

    /// Shutdown in progress - not accepting new fetches
    #[error("shutdown in progress: not accepting new fetches")]
    ShuttingDown,

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ItemNotFound { .. } => "item_not_found",
            Error::OwnerNotFound { .. } => "owner_not_found",
            Error::Validation { .. } => "validation_error",
            Error::Config { .. } => "config_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::Cancelled => "cancelled",
            Error::ShuttingDown => "shutting_down",
            Error::Other(_) => "internal_error",
        }
    }

    /// True for the "not found" classification (item or seller)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ItemNotFound { .. } | Error::OwnerNotFound { .. })
    }
}

/// Serializable error description, suitable for reporting batch failures
///
/// # Example JSON
///
/// ```json
/// {
///   "code": "item_not_found",
///   "message": "item 8056582 not found: seller unavailable",
///   "details": { "item_id": 8056582, "label": "seller" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "item_not_found", "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional identifying context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for ErrorDetail {
    fn from(error: &Error) -> Self {
        let details = match error {
            Error::ItemNotFound { item_id, label } => Some(serde_json::json!({
                "item_id": item_id,
                "label": label,
            })),
            Error::OwnerNotFound { owner_id, label } => Some(serde_json::json!({
                "owner_id": owner_id,
                "label": label,
            })),
            Error::Validation {
                field: Some(field), ..
            } => Some(serde_json::json!({ "field": field })),
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({ "key": key })),
            _ => None,
        };

        ErrorDetail {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<Error> for ErrorDetail {
    fn from(error: Error) -> Self {
        ErrorDetail::from(&error)
    }
}

//! # Service Error Types
//!
//! Orchestration-level outcomes.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (officine-core)                                       │
//! │       │                          CoreError (officine-core)             │
//! │       ▼                               │                                 │
//! │  ServiceError (this module) ◄─────────┘                                │
//! │       │        adds registry outcomes: DuplicateKey, NotFound,         │
//! │       │        InvalidRange                                            │
//! │       ▼                                                                 │
//! │  Caller pattern-matches business outcomes                              │
//! │  (LedgerError never reaches here — it degrades to a warning)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business outcomes (`DuplicateKey`, `NotFound`, `InsufficientStock`
//! inside `Core`) are expected and matchable; `InvalidTransaction` inside
//! `Core` signals a defensive invariant check that should never fire.

use chrono::{DateTime, Utc};
use thiserror::Error;

use officine_core::{CoreError, ValidationError};

/// Orchestration errors returned by the pharmacy service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Registration conflict: the business key is already taken.
    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: &'static str, key: String },

    /// Lookup miss used as a precondition failure (e.g. selling to an
    /// unknown client). Plain `find_*` lookups return `Option` instead.
    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    /// A statistics query with start after end.
    #[error("Invalid range: {start} is after {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Business-rule failure from the core (stock, expiry, transaction
    /// invariants).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Field validation failure (malformed key or input).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ServiceError {
    pub fn duplicate(kind: &'static str, key: impl Into<String>) -> Self {
        ServiceError::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        ServiceError::NotFound {
            kind,
            key: key.into(),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ServiceError::duplicate("client", "CL001");
        assert_eq!(err.to_string(), "client 'CL001' already exists");

        let err = ServiceError::not_found("medication", "Aspirine");
        assert_eq!(err.to_string(), "medication 'Aspirine' not found");
    }

    #[test]
    fn test_core_errors_pass_through_transparently() {
        let core = CoreError::InsufficientStock {
            name: "Aspirine".to_string(),
            available: 75,
            requested: 1000,
        };
        let err: ServiceError = core.into();
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Aspirine: available 75, requested 1000"
        );
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::InsufficientStock { .. })
        ));
    }
}

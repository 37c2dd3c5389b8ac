//! # Error Types
//!
//! Domain-specific error types for officine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  officine-core errors (this file)                                      │
//! │  ├── CoreError        - Business-rule violations                       │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  officine-store errors (separate crate)                                │
//! │  └── LedgerError      - Durable ledger append/query failures           │
//! │                                                                         │
//! │  officine-service errors (separate crate)                              │
//! │  └── ServiceError     - Orchestration outcomes (duplicate, not found)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → Caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (medication name, counts, dates)
//! 3. Errors are enum variants, never String
//! 4. Callers pattern-match on expected business outcomes

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business-rule violations raised by entities and the transaction engine.
///
/// These are expected outcomes a caller handles, not programming errors.
/// The one exception is [`CoreError::InvalidTransaction`], which should be
/// unreachable when the validators are composed correctly but is checked
/// defensively on every basket recomputation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough stock on hand to honour the requested quantity.
    ///
    /// ## When This Occurs
    /// - A sale line requests more units than the medication holds
    /// - Carries both counts for user messaging ("only 3 left")
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    /// Restocking would push the quantity past the representable maximum.
    #[error("Stock overflow for {name}: {current} + {requested} exceeds {max}")]
    StockOverflow {
        name: String,
        current: u32,
        requested: u32,
        max: u32,
    },

    /// A medication past its expiry date was offered for sale.
    #[error("Medication {name} expired on {expired_on}")]
    ExpiredMedication { name: String, expired_on: NaiveDate },

    /// A monetary or basket invariant was violated after recomputation.
    ///
    /// Should be unreachable if validators are correctly composed;
    /// checked on every basket mutation regardless.
    #[error("Invalid transaction: {reason}")]
    InvalidTransaction { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
///
/// Raised by the validators in [`crate::validation`] before any entity or
/// transaction is allowed to exist. Construction fails atomically: no
/// entity can be observed in a partially valid state.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Floating-point value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (pattern mismatch).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A date that must lie strictly in the future does not.
    #[error("{field} must be strictly after {today}")]
    DateNotInFuture { field: String, today: NaiveDate },

    /// Two dates violate their required ordering.
    #[error("{earlier_field} ({earlier}) must be strictly before {later_field} ({later})")]
    DateOrder {
        earlier_field: String,
        earlier: NaiveDate,
        later_field: String,
        later: NaiveDate,
    },

    /// A collection that must carry at least one element is empty.
    #[error("{field} must not be empty")]
    EmptyCollection { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # officine-core: Pure Business Logic for the Pharmacy Back-Office
//!
//! This crate is the **heart** of the system. It contains all business
//! logic as pure functions and invariant-holding types with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Officine Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 officine-service (orchestration)                │   │
//! │  │   registries ──► sale workflows ──► statistics ──► reconcile   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              officine-store (Store / Ledger / Clock)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ officine-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌─────────┐ ┌────────────┐ ┌─────────────────┐ │   │
//! │  │  │ validation │ │  money  │ │  entities  │ │   transaction   │ │   │
//! │  │  │   rules    │ │ Amount  │ │ Client ... │ │ Basket/Purchase │ │   │
//! │  │  │   checks   │ │  Rate   │ │ Medication │ │  Prescription   │ │   │
//! │  │  └────────────┘ └─────────┘ └────────────┘ └─────────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO WALL CLOCK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`validation`] - Field validators (patterns, ranges, dates, masking)
//! - [`money`] - Monetary amounts and reimbursement rates
//! - [`error`] - Domain error types
//! - [`person`] - Client / Doctor / Pharmacist entities
//! - [`insurer`] - Health-insurance mutual funds
//! - [`medication`] - Medication records and the stock guard
//! - [`transaction`] - Baskets, purchases, prescription documents
//!
//! ## Design Principles
//!
//! 1. **Validated at birth**: no entity can exist in an invalid state;
//!    constructors fail atomically on the first bad field
//! 2. **No I/O and no clock**: "today"/"now" are always injected
//! 3. **Explicit errors**: all errors are typed enums, never strings or
//!    panics
//! 4. **Snapshots over references**: sale lines freeze prices, purchases
//!    freeze the insurer rate
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use officine_core::medication::{Category, Medication};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
//! let mut doliprane = Medication::new(
//!     "Doliprane",
//!     Category::Analgesic,
//!     5.99,
//!     100,
//!     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
//!     today,
//! ).unwrap();
//!
//! doliprane.reduce_stock(10).unwrap();
//! assert_eq!(doliprane.stock(), 90);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod insurer;
pub mod medication;
pub mod money;
pub mod person;
pub mod transaction;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use officine_core::Medication` instead of
// `use officine_core::medication::Medication`

pub use error::{CoreError, CoreResult, ValidationError};
pub use insurer::Insurer;
pub use medication::{Category, Medication};
pub use money::{Amount, Rate};
pub use person::{Client, ContactInfo, Doctor, Pharmacist};
pub use transaction::{Basket, BasketLine, Prescription, Purchase, SaleKind};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unit price for a medication, in euros.
pub const MAX_UNIT_PRICE: f64 = 10_000.0;

/// Maximum quantity on hand for a single medication.
///
/// ## Business Reason
/// An increase past this bound is a data-entry error, not a delivery;
/// `increase_stock` fails with `StockOverflow` instead of accepting it.
pub const MAX_STOCK: u32 = 100_000;

/// Maximum quantity of a single medication per sale line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 1_000;

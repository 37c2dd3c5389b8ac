//! # Medication
//!
//! Medication records and the guarded stock mutation protocol.
//!
//! ## Stock Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stock Mutation Protocol                             │
//! │                                                                         │
//! │  reduce_stock(qty)                    increase_stock(qty)               │
//! │       │                                    │                            │
//! │       ├── qty ∉ [1,1000]? → Validation     ├── qty ∉ [1,100000]? → Val. │
//! │       │                                    │                            │
//! │       ├── qty > stock?                     ├── stock+qty > 100 000?     │
//! │       │      → InsufficientStock           │      → StockOverflow       │
//! │       │        (stock UNCHANGED)           │        (stock UNCHANGED)   │
//! │       │                                    │                            │
//! │       └── stock -= qty                     └── stock += qty             │
//! │                                                                         │
//! │  Mutation lives on Medication itself so no caller can bypass the       │
//! │  bounds check. Failure never leaves a partial mutation behind.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dates
//! "Today" is always injected (the service resolves it through the Clock
//! seam), so expiry logic stays pure. At creation the expiry date must be
//! strictly after today AND strictly after the service-start date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Amount;
use crate::validation::{self, ValidationResult};
use crate::MAX_STOCK;

// =============================================================================
// Category
// =============================================================================

/// Therapeutic category of a medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Analgesic,
    Antibiotic,
    AntiInflammatory,
    Antiseptic,
    Vitamin,
    Other,
}

// =============================================================================
// Medication
// =============================================================================

/// A medication in the pharmacy inventory.
///
/// The name is the unique business key, compared case-insensitively by the
/// inventory (see [`Medication::key`]). Price and stock are re-validated
/// on every mutation; medications are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    name: String,
    category: Category,
    unit_price: Amount,
    stock: u32,
    service_start: NaiveDate,
    expiry: NaiveDate,
}

impl Medication {
    /// Creates a medication with its initial stock.
    ///
    /// ## Invariants enforced
    /// - name matches the medication-name pattern
    /// - unit price ∈ [0, 10 000], finite
    /// - stock ∈ [0, 100 000]
    /// - expiry strictly after `today` and strictly after `service_start`
    pub fn new(
        name: &str,
        category: Category,
        unit_price: f64,
        initial_stock: u32,
        service_start: NaiveDate,
        expiry: NaiveDate,
        today: NaiveDate,
    ) -> ValidationResult<Self> {
        let name = validation::validate_medication_name(name)?;
        let unit_price = validation::validate_unit_price(unit_price)?;
        let stock = validation::validate_stock_level(initial_stock)?;
        validation::validate_future_date("expiry date", expiry, today)?;
        validation::validate_date_order("service start", service_start, "expiry date", expiry)?;

        Ok(Medication {
            name,
            category,
            // validate_unit_price already rejected NaN/∞/negatives
            unit_price: Amount::new(unit_price).expect("validated price"),
            stock,
            service_start,
            expiry,
        })
    }

    /// The display name (verbatim as registered).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The case-insensitive inventory key.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn service_start(&self) -> NaiveDate {
        self.service_start
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    /// Whether the medication is expired on the given date.
    ///
    /// Mirrors the creation invariant (expiry strictly in the future):
    /// on its expiry date a medication is already expired.
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        self.expiry <= on
    }

    /// Updates the unit price, re-validating the [0, 10 000] bound.
    pub fn set_unit_price(&mut self, unit_price: f64) -> ValidationResult<()> {
        let validated = validation::validate_unit_price(unit_price)?;
        self.unit_price = Amount::new(validated).expect("validated price");
        Ok(())
    }

    // =========================================================================
    // Stock guard
    // =========================================================================

    /// Checks whether `qty` units can be served from stock.
    ///
    /// Validates qty ∈ [1, 1000] first; an out-of-range quantity is a
    /// validation error, not "unavailable".
    pub fn is_available(&self, qty: u32) -> CoreResult<bool> {
        let qty = validation::validate_quantity(qty)?;
        Ok(self.stock >= qty)
    }

    /// Decrements stock by `qty`.
    ///
    /// ## Errors
    /// [`CoreError::InsufficientStock`] if `qty > stock`; the stock is
    /// left unchanged (no partial mutation on failure).
    pub fn reduce_stock(&mut self, qty: u32) -> CoreResult<()> {
        let qty = validation::validate_quantity(qty)?;

        if qty > self.stock {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.stock,
                requested: qty,
            });
        }

        self.stock -= qty;
        Ok(())
    }

    /// Increments stock by `qty`.
    ///
    /// Deliveries use the restock bound (up to shelf capacity per call),
    /// not the [1, 1000] sale-line bound.
    ///
    /// ## Errors
    /// [`CoreError::StockOverflow`] if the result would exceed the
    /// 100 000-unit bound; the stock is left unchanged.
    pub fn increase_stock(&mut self, qty: u32) -> CoreResult<()> {
        let qty = validation::validate_restock_quantity(qty)?;

        let new_stock = self.stock.saturating_add(qty);
        if new_stock > MAX_STOCK {
            return Err(CoreError::StockOverflow {
                name: self.name.clone(),
                current: self.stock,
                requested: qty,
                max: MAX_STOCK,
            });
        }

        self.stock = new_stock;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Transaction Engine
//!
//! Baskets, purchases, and prescription documents.
//!
//! ## Purchase Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Purchase Recomputation                               │
//! │                                                                         │
//! │  add_line / remove_line                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = Σ (unit_price × quantity)        ← over every basket line     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reimbursed = total × rate / 100          ← rate frozen at creation    │
//! │             = 0                           ← client has no insurer      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check 0 ≤ reimbursed ≤ total             ← defensive; violation is    │
//! │                                             InvalidTransaction         │
//! │                                                                         │
//! │  Recomputed after EVERY basket mutation, never only at construction.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A basket line freezes the medication name and unit price at add time.
//! A later price change in the inventory never alters a recorded sale.
//! Likewise the insurer rate is frozen into the purchase at construction;
//! historical statistics are not recomputed when an insurer changes its
//! rate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::medication::Medication;
use crate::money::{Amount, Rate, MONEY_EPSILON};
use crate::validation::{self, ValidationResult};
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Sale Kind
// =============================================================================

/// How a purchase was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    /// Over-the-counter sale.
    Direct,
    /// Sale backed by a doctor's prescription.
    OnPrescription,
}

// =============================================================================
// Basket
// =============================================================================

/// A priced line in a basket.
///
/// Name and unit price are frozen at add time (snapshot pattern).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketLine {
    medication: String,
    unit_price: Amount,
    quantity: u32,
}

impl BasketLine {
    /// The medication name as registered.
    pub fn medication(&self) -> &str {
        &self.medication
    }

    /// The unit price frozen at add time.
    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// unit price × quantity.
    pub fn line_total(&self) -> Amount {
        self.unit_price.mul_quantity(self.quantity)
    }
}

/// The ordered collection of (medication, quantity) pairs under a
/// purchase or prescription.
///
/// ## Invariants
/// - Lines are unique by medication name (case-insensitive); adding the
///   same medication again merges quantities
/// - Every quantity stays within [1, 1000], including after a merge
/// - Insertion order is preserved
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    pub fn new() -> Self {
        Basket { lines: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    /// Quantity currently held for a medication, if present.
    pub fn quantity_of(&self, medication_name: &str) -> Option<u32> {
        let key = medication_name.to_lowercase();
        self.lines
            .iter()
            .find(|l| l.medication.to_lowercase() == key)
            .map(|l| l.quantity)
    }

    /// Adds a line, snapshotting the medication's current price.
    ///
    /// If the medication is already present the quantities merge; the
    /// merged quantity is re-validated against the [1, 1000] bound.
    pub fn add(&mut self, medication: &Medication, quantity: u32) -> ValidationResult<()> {
        let quantity = validation::validate_quantity(quantity)?;

        let key = medication.key();
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.medication.to_lowercase() == key)
        {
            let merged = line.quantity.saturating_add(quantity);
            if merged > MAX_LINE_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_LINE_QUANTITY as i64,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        self.lines.push(BasketLine {
            medication: medication.name().to_string(),
            unit_price: medication.unit_price(),
            quantity,
        });
        Ok(())
    }

    /// Removes a line by medication name. Returns whether one was removed.
    pub fn remove(&mut self, medication_name: &str) -> bool {
        let key = medication_name.to_lowercase();
        let before = self.lines.len();
        self.lines.retain(|l| l.medication.to_lowercase() != key);
        self.lines.len() != before
    }

    /// Σ (unit price × quantity) over every line.
    pub fn total(&self) -> Amount {
        self.lines.iter().map(BasketLine::line_total).sum()
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A priced sale transaction (direct or prescription-backed).
///
/// ## Rate Snapshot
/// `insurer_rate` is the client's insurer rate read ONCE at construction
/// and frozen in. A later rate change does not rewrite this purchase —
/// a documented product-level behavior, not a bug to fix here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    reference: String,
    kind: SaleKind,
    recorded_at: DateTime<Utc>,
    client: String,
    pharmacist: Option<String>,
    insurer_rate: Option<Rate>,
    basket: Basket,
    total: Amount,
    reimbursed: Amount,
}

impl Purchase {
    /// Creates an empty purchase for a client.
    ///
    /// `insurer_rate` is the rate snapshot (None when the client carries
    /// no insurer). The basket starts empty with zero totals.
    pub fn new(
        reference: &str,
        kind: SaleKind,
        recorded_at: DateTime<Utc>,
        client_identifier: &str,
        pharmacist: Option<&str>,
        insurer_rate: Option<Rate>,
    ) -> CoreResult<Self> {
        let pharmacist = match pharmacist {
            Some(number) => Some(validation::validate_practitioner_number(number)?),
            None => None,
        };

        Ok(Purchase {
            reference: validation::validate_reference(reference)?,
            kind,
            recorded_at,
            client: validation::validate_identifier(client_identifier)?,
            pharmacist,
            insurer_rate,
            basket: Basket::new(),
            total: Amount::zero(),
            reimbursed: Amount::zero(),
        })
    }

    /// The unique transaction reference (`[A-Z0-9]{3,15}`).
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn kind(&self) -> SaleKind {
        self.kind
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn pharmacist(&self) -> Option<&str> {
        self.pharmacist.as_deref()
    }

    /// The frozen rate snapshot, if the client carried an insurer.
    pub fn insurer_rate(&self) -> Option<Rate> {
        self.insurer_rate
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn reimbursed(&self) -> Amount {
        self.reimbursed
    }

    /// What the client pays out of pocket: total − reimbursed.
    pub fn net_payable(&self) -> Amount {
        self.total - self.reimbursed
    }

    /// Adds a basket line and recomputes the totals.
    ///
    /// ## Errors
    /// - [`CoreError::ExpiredMedication`] if the medication is expired on
    ///   `today` (the sale workflows pre-check this as well)
    /// - Validation errors for an out-of-range quantity
    pub fn add_line(
        &mut self,
        medication: &Medication,
        quantity: u32,
        today: NaiveDate,
    ) -> CoreResult<()> {
        if medication.is_expired(today) {
            return Err(CoreError::ExpiredMedication {
                name: medication.name().to_string(),
                expired_on: medication.expiry(),
            });
        }

        self.basket.add(medication, quantity)?;
        self.recompute()
    }

    /// Removes a basket line and recomputes. Returns whether a line was
    /// removed.
    pub fn remove_line(&mut self, medication_name: &str) -> CoreResult<bool> {
        let removed = self.basket.remove(medication_name);
        if removed {
            self.recompute()?;
        }
        Ok(removed)
    }

    /// Recomputes total and reimbursed from the basket, then re-checks the
    /// monetary invariant `0 ≤ reimbursed ≤ total`.
    ///
    /// The invariant should be unreachable with validated inputs; the
    /// check stays because a violated total must never be recorded.
    fn recompute(&mut self) -> CoreResult<()> {
        let total = self.basket.total();
        if !total.value().is_finite() {
            return Err(CoreError::InvalidTransaction {
                reason: "total is not a finite number".to_string(),
            });
        }

        let reimbursed = match self.insurer_rate {
            Some(rate) => total.apply_rate(rate),
            None => Amount::zero(),
        };

        if reimbursed.value() < -MONEY_EPSILON
            || reimbursed.value() > total.value() + MONEY_EPSILON
        {
            return Err(CoreError::InvalidTransaction {
                reason: format!(
                    "reimbursed amount {} outside [0, {}]",
                    reimbursed, total
                ),
            });
        }

        self.total = total;
        self.reimbursed = reimbursed;
        Ok(())
    }
}

// =============================================================================
// Prescription
// =============================================================================

/// A non-monetary prescription document: the order-to-fulfill record tying
/// a doctor, a patient, and a basket of medications.
///
/// Carries its own unique reference, distinct from any purchase reference.
/// It has a total (for reporting) but no reimbursement field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    reference: String,
    recorded_at: DateTime<Utc>,
    doctor: String,
    client: String,
    basket: Basket,
    total: Amount,
}

impl Prescription {
    pub fn new(
        reference: &str,
        recorded_at: DateTime<Utc>,
        doctor_identifier: &str,
        client_identifier: &str,
    ) -> CoreResult<Self> {
        Ok(Prescription {
            reference: validation::validate_reference(reference)?,
            recorded_at,
            doctor: validation::validate_practitioner_number(doctor_identifier)?,
            client: validation::validate_identifier(client_identifier)?,
            basket: Basket::new(),
            total: Amount::zero(),
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn doctor(&self) -> &str {
        &self.doctor
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// Adds a line; expired medications cannot be prescribed either.
    pub fn add_line(
        &mut self,
        medication: &Medication,
        quantity: u32,
        today: NaiveDate,
    ) -> CoreResult<()> {
        if medication.is_expired(today) {
            return Err(CoreError::ExpiredMedication {
                name: medication.name().to_string(),
                expired_on: medication.expiry(),
            });
        }

        self.basket.add(medication, quantity)?;
        self.total = self.basket.total();
        Ok(())
    }

    /// Removes a line. Returns whether one was removed.
    pub fn remove_line(&mut self, medication_name: &str) -> bool {
        let removed = self.basket.remove(medication_name);
        if removed {
            self.total = self.basket.total();
        }
        removed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medication::Category;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 29)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 29, 10, 0, 0).unwrap()
    }

    fn medication(name: &str, price: f64, stock: u32) -> Medication {
        Medication::new(
            name,
            Category::Analgesic,
            price,
            stock,
            date(2026, 1, 1),
            date(2027, 6, 30),
            today(),
        )
        .unwrap()
    }

    fn purchase(rate: Option<f64>) -> Purchase {
        Purchase::new(
            "V2608290001",
            SaleKind::Direct,
            now(),
            "CL001",
            None,
            rate.map(|r| Rate::new(r).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_basket_preserves_order_and_merges() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let aspirine = medication("Aspirine", 3.20, 75);

        let mut basket = Basket::new();
        basket.add(&doliprane, 2).unwrap();
        basket.add(&aspirine, 1).unwrap();
        basket.add(&doliprane, 3).unwrap(); // merges into the first line

        assert_eq!(basket.len(), 2);
        assert_eq!(basket.lines()[0].medication(), "Doliprane");
        assert_eq!(basket.quantity_of("doliprane"), Some(5));
        assert_eq!(basket.quantity_of("Aspirine"), Some(1));
    }

    #[test]
    fn test_basket_merge_respects_quantity_bound() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let mut basket = Basket::new();
        basket.add(&doliprane, 600).unwrap();
        assert!(basket.add(&doliprane, 500).is_err());
        assert_eq!(basket.quantity_of("Doliprane"), Some(600));
    }

    #[test]
    fn test_basket_line_snapshot_survives_price_change() {
        let mut doliprane = medication("Doliprane", 5.99, 100);
        let mut basket = Basket::new();
        basket.add(&doliprane, 10).unwrap();

        doliprane.set_unit_price(9.99).unwrap();

        // The basket still carries the price frozen at add time.
        assert!(basket.total().approx_eq(Amount::new(59.90).unwrap()));
    }

    #[test]
    fn test_purchase_totals_without_insurer() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let mut p = purchase(None);
        p.add_line(&doliprane, 10, today()).unwrap();

        assert!(p.total().approx_eq(Amount::new(59.90).unwrap()));
        assert!(p.reimbursed().is_zero());
        assert!(p.net_payable().approx_eq(Amount::new(59.90).unwrap()));
    }

    #[test]
    fn test_purchase_totals_with_insurer() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let mut p = purchase(Some(70.0));
        p.add_line(&doliprane, 10, today()).unwrap();

        assert!(p.total().approx_eq(Amount::new(59.90).unwrap()));
        assert!(p.reimbursed().approx_eq(Amount::new(41.93).unwrap()));
        assert!(p.net_payable().approx_eq(Amount::new(17.97).unwrap()));
    }

    #[test]
    fn test_purchase_recomputes_after_every_mutation() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let aspirine = medication("Aspirine", 3.20, 75);
        let mut p = purchase(Some(70.0));

        p.add_line(&doliprane, 10, today()).unwrap();
        p.add_line(&aspirine, 5, today()).unwrap();

        let expected = Amount::new(5.99 * 10.0 + 3.20 * 5.0).unwrap();
        assert!(p.total().approx_eq(expected));
        assert!(p.reimbursed().approx_eq(expected.apply_rate(Rate::new(70.0).unwrap())));

        assert!(p.remove_line("Aspirine").unwrap());
        assert!(p.total().approx_eq(Amount::new(59.90).unwrap()));
        assert!(p.reimbursed().approx_eq(Amount::new(41.93).unwrap()));

        assert!(!p.remove_line("Aspirine").unwrap());
    }

    #[test]
    fn test_purchase_rejects_expired_medication() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let mut p = purchase(None);

        // Adding on a date past the expiry fails and leaves the basket empty.
        let err = p.add_line(&doliprane, 1, date(2027, 7, 1)).unwrap_err();
        assert!(matches!(err, CoreError::ExpiredMedication { .. }));
        assert!(p.basket().is_empty());
        assert!(p.total().is_zero());
    }

    #[test]
    fn test_purchase_validates_reference_and_client() {
        assert!(Purchase::new("x", SaleKind::Direct, now(), "CL001", None, None).is_err());
        assert!(Purchase::new("V26082901", SaleKind::Direct, now(), "c", None, None).is_err());
        assert!(
            Purchase::new("V26082901", SaleKind::Direct, now(), "CL001", Some("123"), None)
                .is_err()
        );
    }

    #[test]
    fn test_prescription_document() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let mut rx = Prescription::new("P2608290001", now(), "10101234567", "CL001").unwrap();

        rx.add_line(&doliprane, 2, today()).unwrap();
        assert_eq!(rx.doctor(), "10101234567");
        assert!(rx.total().approx_eq(Amount::new(11.98).unwrap()));

        assert!(rx.remove_line("Doliprane"));
        assert!(rx.total().is_zero());
    }

    #[test]
    fn test_prescription_rejects_expired() {
        let doliprane = medication("Doliprane", 5.99, 100);
        let mut rx = Prescription::new("P2608290001", now(), "10101234567", "CL001").unwrap();
        assert!(rx.add_line(&doliprane, 1, date(2028, 1, 1)).is_err());
        assert!(rx.basket().is_empty());
    }
}

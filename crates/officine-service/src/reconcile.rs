//! # Prescription Reconciliation
//!
//! Diagnostic pass correlating prescription documents with recorded
//! purchases.
//!
//! ## Correlation Heuristic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A prescription is "fulfilled" when SOME on-prescription purchase       │
//! │  exists for the SAME client on the SAME calendar date (UTC).            │
//! │                                                                         │
//! │  prescription ──┬── client matches? ──┬── date matches? ──► fulfilled  │
//! │                 └── otherwise ────────┴──────────────────► unmatched   │
//! │                                                                         │
//! │  Purchases carry no prescription reference, so this is a heuristic     │
//! │  by construction: two same-day prescriptions for one client both       │
//! │  correlate with a single purchase. Good enough for a daily             │
//! │  back-office check, not an audit trail.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use officine_core::{Prescription, Purchase, SaleKind};

/// A prescription with no correlated purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedPrescription {
    pub reference: String,
    pub client: String,
    pub prescribed_on: NaiveDate,
}

/// Whether a purchase plausibly fulfills a prescription: same client,
/// same calendar date, and backed by a prescription workflow.
fn fulfills(purchase: &Purchase, prescription: &Prescription) -> bool {
    purchase.kind() == SaleKind::OnPrescription
        && purchase.client() == prescription.client()
        && purchase.recorded_at().date_naive() == prescription.recorded_at().date_naive()
}

/// Returns every prescription with no correlated purchase, in recording
/// order.
pub fn unmatched_prescriptions(
    prescriptions: &[Prescription],
    purchases: &[Purchase],
) -> Vec<UnmatchedPrescription> {
    prescriptions
        .iter()
        .filter(|rx| !purchases.iter().any(|p| fulfills(p, rx)))
        .map(|rx| UnmatchedPrescription {
            reference: rx.reference().to_string(),
            client: rx.client().to_string(),
            prescribed_on: rx.recorded_at().date_naive(),
        })
        .collect()
}

/// Returns the purchases correlated with any of a doctor's prescriptions,
/// deduplicated by reference, in recording order.
pub fn purchases_for_doctor<'a>(
    doctor_identifier: &str,
    prescriptions: &[Prescription],
    purchases: &'a [Purchase],
) -> Vec<&'a Purchase> {
    let doctor_rx: Vec<&Prescription> = prescriptions
        .iter()
        .filter(|rx| rx.doctor() == doctor_identifier)
        .collect();

    purchases
        .iter()
        .filter(|p| doctor_rx.iter().any(|rx| fulfills(p, rx)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use officine_core::{Category, Medication};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    fn doliprane() -> Medication {
        Medication::new(
            "Doliprane",
            Category::Analgesic,
            5.99,
            100,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
            today(),
        )
        .unwrap()
    }

    fn prescription(reference: &str, recorded_at: DateTime<Utc>, client: &str) -> Prescription {
        let mut rx = Prescription::new(reference, recorded_at, "10101234567", client).unwrap();
        rx.add_line(&doliprane(), 2, today()).unwrap();
        rx
    }

    fn purchase(reference: &str, recorded_at: DateTime<Utc>, client: &str, kind: SaleKind) -> Purchase {
        let mut p = Purchase::new(reference, kind, recorded_at, client, None, None).unwrap();
        p.add_line(&doliprane(), 2, today()).unwrap();
        p
    }

    #[test]
    fn test_same_client_same_day_correlates() {
        let rx = vec![prescription("P001", at(10, 9), "CL001")];
        let sales = vec![purchase("V001", at(10, 17), "CL001", SaleKind::OnPrescription)];

        assert!(unmatched_prescriptions(&rx, &sales).is_empty());
    }

    #[test]
    fn test_different_day_or_client_does_not_correlate() {
        let rx = vec![
            prescription("P001", at(10, 9), "CL001"),
            prescription("P002", at(10, 9), "CL002"),
        ];
        // Right client, next day.
        let sales = vec![purchase("V001", at(11, 9), "CL001", SaleKind::OnPrescription)];

        let unmatched = unmatched_prescriptions(&rx, &sales);
        assert_eq!(unmatched.len(), 2);
        assert_eq!(unmatched[0].reference, "P001");
        assert_eq!(unmatched[0].prescribed_on, NaiveDate::from_ymd_opt(2026, 8, 10).unwrap());
        assert_eq!(unmatched[1].client, "CL002");
    }

    #[test]
    fn test_direct_sales_never_fulfill() {
        let rx = vec![prescription("P001", at(10, 9), "CL001")];
        let sales = vec![purchase("V001", at(10, 9), "CL001", SaleKind::Direct)];

        assert_eq!(unmatched_prescriptions(&rx, &sales).len(), 1);
    }

    #[test]
    fn test_one_purchase_satisfies_two_same_day_prescriptions() {
        // Known heuristic limit: both correlate with the single purchase.
        let rx = vec![
            prescription("P001", at(10, 9), "CL001"),
            prescription("P002", at(10, 11), "CL001"),
        ];
        let sales = vec![purchase("V001", at(10, 17), "CL001", SaleKind::OnPrescription)];

        assert!(unmatched_prescriptions(&rx, &sales).is_empty());
    }

    #[test]
    fn test_purchases_for_doctor() {
        let rx = vec![
            prescription("P001", at(10, 9), "CL001"),
            // Different doctor.
            {
                let mut other =
                    Prescription::new("P002", at(10, 9), "20202345678", "CL002").unwrap();
                other.add_line(&doliprane(), 1, today()).unwrap();
                other
            },
        ];
        let sales = vec![
            purchase("V001", at(10, 17), "CL001", SaleKind::OnPrescription),
            purchase("V002", at(10, 17), "CL002", SaleKind::OnPrescription),
            purchase("V003", at(12, 17), "CL001", SaleKind::OnPrescription),
        ];

        let hits = purchases_for_doctor("10101234567", &rx, &sales);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reference(), "V001");
    }
}

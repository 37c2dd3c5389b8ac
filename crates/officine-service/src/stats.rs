//! # Statistics
//!
//! Date-range revenue aggregation and the inventory health snapshot.
//!
//! ## Aggregation Source
//! Reports aggregate the in-memory purchase records, not the ledger: the
//! ledger is the durable copy and may be degraded (failed appends are
//! warnings, not aborts), so the in-memory registry is the authoritative
//! view of what this process actually sold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use officine_core::{Amount, Medication, Purchase};

/// Aggregated figures over an inclusive `[start, end]` time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Σ purchase totals in range.
    pub revenue: Amount,
    /// Σ insurer-reimbursed amounts in range.
    pub reimbursed: Amount,
    /// revenue − reimbursed: what clients paid out of pocket.
    pub net: Amount,
    /// Number of purchases in range.
    pub sale_count: usize,
    /// Units currently on the shelves, across every medication.
    pub total_stock: u64,
    /// Medications currently at zero stock.
    pub stockout_count: usize,
}

/// Builds a report from the purchases falling inside the range (both
/// bounds inclusive) and the current inventory snapshot.
pub fn build_report<'a, P, M>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    purchases: P,
    inventory: M,
) -> StatisticsReport
where
    P: IntoIterator<Item = &'a Purchase>,
    M: IntoIterator<Item = &'a Medication>,
{
    let mut revenue = Amount::zero();
    let mut reimbursed = Amount::zero();
    let mut sale_count = 0usize;

    for purchase in purchases {
        let at = purchase.recorded_at();
        if at >= start && at <= end {
            revenue += purchase.total();
            reimbursed += purchase.reimbursed();
            sale_count += 1;
        }
    }

    let mut total_stock = 0u64;
    let mut stockout_count = 0usize;
    for medication in inventory {
        total_stock += u64::from(medication.stock());
        if medication.stock() == 0 {
            stockout_count += 1;
        }
    }

    StatisticsReport {
        start,
        end,
        revenue,
        reimbursed,
        net: revenue - reimbursed,
        sale_count,
        total_stock,
        stockout_count,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use officine_core::{Category, Rate, SaleKind};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 29, hour, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn medication(name: &str, price: f64, stock: u32) -> Medication {
        Medication::new(
            name,
            Category::Analgesic,
            price,
            stock,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
            today(),
        )
        .unwrap()
    }

    fn purchase(reference: &str, hour: u32, price: f64, qty: u32, rate: Option<f64>) -> Purchase {
        let m = medication("Doliprane", price, 100_000);
        let mut p = Purchase::new(
            reference,
            SaleKind::Direct,
            at(hour),
            "CL001",
            None,
            rate.map(|r| Rate::new(r).unwrap()),
        )
        .unwrap();
        p.add_line(&m, qty, today()).unwrap();
        p
    }

    #[test]
    fn test_report_sums_only_in_range_purchases() {
        let purchases = vec![
            purchase("V001", 8, 5.99, 10, None),
            purchase("V002", 12, 3.20, 5, None),
            purchase("V003", 20, 10.00, 1, None),
        ];

        let report = build_report(at(8), at(12), purchases.iter(), std::iter::empty());

        assert_eq!(report.sale_count, 2);
        assert!(report
            .revenue
            .approx_eq(Amount::new(59.90 + 16.00).unwrap()));
        assert!(report.reimbursed.is_zero());
        assert!(report.net.approx_eq(report.revenue));
    }

    #[test]
    fn test_report_bounds_are_inclusive() {
        let purchases = vec![purchase("V001", 8, 5.99, 10, None)];

        let hit = build_report(at(8), at(8), purchases.iter(), std::iter::empty());
        assert_eq!(hit.sale_count, 1);

        let miss = build_report(at(9), at(12), purchases.iter(), std::iter::empty());
        assert_eq!(miss.sale_count, 0);
        assert!(miss.revenue.is_zero());
    }

    #[test]
    fn test_report_carries_reimbursements() {
        let purchases = vec![purchase("V001", 10, 5.99, 10, Some(70.0))];

        let report = build_report(at(0), at(23), purchases.iter(), std::iter::empty());
        assert!(report.revenue.approx_eq(Amount::new(59.90).unwrap()));
        assert!(report.reimbursed.approx_eq(Amount::new(41.93).unwrap()));
        assert!(report.net.approx_eq(Amount::new(17.97).unwrap()));
    }

    #[test]
    fn test_inventory_snapshot() {
        let inventory = vec![
            medication("Doliprane", 5.99, 90),
            medication("Aspirine", 3.20, 0),
            medication("Spasfon", 4.50, 10),
        ];

        let report = build_report(at(0), at(23), std::iter::empty(), inventory.iter());
        assert_eq!(report.total_stock, 100);
        assert_eq!(report.stockout_count, 1);
    }
}

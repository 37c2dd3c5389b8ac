//! # Sale Ledger
//!
//! The durable append-only record of completed sales.
//!
//! ## Degrade Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Ledger Append Flow                                  │
//! │                                                                         │
//! │  Sale committed in memory                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger.append(entry) ── Ok ──► durable record written                  │
//! │       │                                                                 │
//! │       └── Err(LedgerError) ──► tracing::warn! and CONTINUE              │
//! │                                (the in-memory sale already stands;      │
//! │                                 external I/O failure never aborts it)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use officine_core::{Amount, SaleKind};

// =============================================================================
// Ledger Error
// =============================================================================

/// Durable ledger failures.
///
/// These degrade to a logged warning at the service layer; they never
/// fail an in-memory operation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The backing medium rejected the append.
    #[error("Ledger append failed: {0}")]
    AppendFailed(String),

    /// The backing medium could not serve a range query.
    #[error("Ledger query failed: {0}")]
    QueryFailed(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Ledger Entry
// =============================================================================

/// One completed-sale record: `(timestamp, total, reimbursed, kind)`.
///
/// Deliberately flat and serializable so any durable backend (SQL table,
/// append-only file) can carry it unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub recorded_at: DateTime<Utc>,
    pub total: Amount,
    pub reimbursed: Amount,
    pub kind: SaleKind,
}

// =============================================================================
// Sale Ledger Trait
// =============================================================================

/// Append-only sale log, queryable by inclusive time range.
pub trait SaleLedger: Send + Sync {
    /// Appends a record. Failure is surfaced so the caller can degrade
    /// gracefully — it must NOT abort the in-memory sale.
    fn append(&self, entry: LedgerEntry) -> LedgerResult<()>;

    /// All records with `start <= recorded_at <= end`, oldest first.
    fn between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> LedgerResult<Vec<LedgerEntry>>;
}

// =============================================================================
// In-Memory Ledger
// =============================================================================

/// The in-memory reference ledger (also the fallback when a durable
/// backend misbehaves).
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: std::sync::RwLock<Vec<LedgerEntry>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        MemoryLedger {
            entries: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("ledger lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SaleLedger for MemoryLedger {
    fn append(&self, entry: LedgerEntry) -> LedgerResult<()> {
        let mut entries = self.entries.write().expect("ledger lock poisoned");
        entries.push(entry);
        Ok(())
    }

    fn between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> LedgerResult<Vec<LedgerEntry>> {
        let entries = self.entries.read().expect("ledger lock poisoned");
        Ok(entries
            .iter()
            .filter(|e| e.recorded_at >= start && e.recorded_at <= end)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 29, hour, 0, 0).unwrap()
    }

    fn entry(hour: u32, total: f64) -> LedgerEntry {
        LedgerEntry {
            recorded_at: at(hour),
            total: Amount::new(total).unwrap(),
            reimbursed: Amount::zero(),
            kind: SaleKind::Direct,
        }
    }

    #[test]
    fn test_between_is_inclusive_on_both_bounds() {
        let ledger = MemoryLedger::new();
        ledger.append(entry(8, 10.0)).unwrap();
        ledger.append(entry(12, 20.0)).unwrap();
        ledger.append(entry(18, 30.0)).unwrap();

        let hits = ledger.between(at(8), at(12)).unwrap();
        assert_eq!(hits.len(), 2);

        let all = ledger.between(at(0), at(23)).unwrap();
        assert_eq!(all.len(), 3);

        let none = ledger.between(at(19), at(23)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_entry_serialized_shape() {
        // Durable backends depend on these field names staying stable.
        let json = serde_json::to_value(entry(8, 59.90)).unwrap();
        assert!(json.get("recorded_at").is_some());
        assert!(json.get("total").is_some());
        assert!(json.get("reimbursed").is_some());
        assert_eq!(json["kind"], "direct");
    }
}

//! # officine-store: Storage Seams
//!
//! The narrow interfaces the pharmacy core consumes from its persistence
//! collaborators, plus in-memory reference implementations:
//!
//! - [`store::Store`] — entity registry keyed by business identifier
//! - [`ledger::SaleLedger`] — durable append-only sale log
//! - [`clock::Clock`] — injectable time source
//!
//! Persistence *mechanics* (SQL, CSV, pooling) are out of scope by design;
//! a real backend implements these traits without touching the core.
//! The in-memory implementations here are both the test fakes and the
//! graceful-degradation fallback.

pub mod clock;
pub mod ledger;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::{LedgerEntry, LedgerError, LedgerResult, MemoryLedger, SaleLedger};
pub use store::{MemoryStore, Store};

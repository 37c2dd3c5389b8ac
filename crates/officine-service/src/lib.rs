//! # officine-service: Back-Office Orchestration
//!
//! The facade tying the pure core to its storage seams: entity
//! registries, the medication inventory, the two sale workflows,
//! identifier/reference generation, date-range statistics, and the
//! prescription reconciliation diagnostic.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      officine-service                                   │
//! │                                                                         │
//! │   pharmacy ──► PharmacyService (registries, inventory, sales)          │
//! │   identifier ─► client codes & sale references                         │
//! │   stats ──────► date-range revenue / inventory reports                 │
//! │   reconcile ──► prescription ↔ purchase correlation                    │
//! │   error ──────► ServiceError (orchestration outcomes)                  │
//! │                                                                         │
//! │   consumes: officine-core (pure logic)                                 │
//! │             officine-store (Store / SaleLedger / Clock seams)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod identifier;
pub mod pharmacy;
pub mod reconcile;
pub mod stats;

pub use error::{ServiceError, ServiceResult};
pub use pharmacy::{PharmacyService, SaleLine};
pub use reconcile::UnmatchedPrescription;
pub use stats::StatisticsReport;

//! # Pharmacy Service
//!
//! The orchestration facade: entity registries, the medication inventory,
//! and the two sale workflows.
//!
//! ## Sale Workflow (both kinds)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Validate-All-Then-Commit                               │
//! │                                                                         │
//! │  1. resolve client (and doctor)          ── NotFound                   │
//! │  2. merge + validate requested lines     ── Validation                 │
//! │  3. resolve every medication             ── NotFound                   │
//! │  4. generate document references         ── before any guard is taken  │
//! │  5. LOCK touched medications             ── sorted-name order,         │
//! │                                             held through step 8        │
//! │  6. build the priced documents           ── ExpiredMedication          │
//! │  7. check availability for EVERY line    ── InsufficientStock          │
//! │  8. commit every reduce_stock            ── cannot fail after 7        │
//! │  9. record purchase (+ prescription)     ── in-memory, both or neither │
//! │ 10. append durable ledger entry          ── failure degrades to warn!  │
//! │                                                                         │
//! │  Any failure before step 8 leaves every stock level untouched.         │
//! │  Sorted lock order makes concurrent multi-line sales deadlock-free;    │
//! │  holding the guards across validate+commit closes the interleaving     │
//! │  race where two sales both pass validation against the same stock.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Order
//! Medication guards come FIRST, the purchase/prescription registries
//! second; no path acquires a medication guard while holding a registry
//! lock. Reference generation reads the registries, so it runs before
//! step 5; `statistics_for` snapshots the inventory before touching the
//! purchase registry for the same reason.
//!
//! ## Weak Reference Degradation
//! A client's insurer link is a name, resolved here at sale time. A
//! dangling name (insurer deleted after affiliation) degrades to "no
//! reimbursement" with a warning; it never fails the sale.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use officine_core::{
    validation, Client, CoreError, Doctor, Insurer, Medication, Prescription, Purchase, Rate,
    SaleKind,
};
use officine_store::{
    Clock, LedgerEntry, MemoryLedger, MemoryStore, SaleLedger, Store, SystemClock,
};

use crate::error::{ServiceError, ServiceResult};
use crate::identifier;
use crate::reconcile::{self, UnmatchedPrescription};
use crate::stats::{self, StatisticsReport};

/// A requested sale line: (medication name, quantity).
pub type SaleLine<'a> = (&'a str, u32);

// =============================================================================
// Pharmacy Service
// =============================================================================

/// The back-office facade. Cheap to share behind an `Arc`; every method
/// takes `&self`.
pub struct PharmacyService {
    clients: Arc<dyn Store<Client>>,
    doctors: Arc<dyn Store<Doctor>>,
    insurers: Arc<dyn Store<Insurer>>,
    /// Inventory keyed by lower-cased medication name. Each medication
    /// sits behind its own `Mutex` so a sale locks only what it touches.
    inventory: RwLock<HashMap<String, Arc<Mutex<Medication>>>>,
    purchases: RwLock<Vec<Purchase>>,
    prescriptions: RwLock<Vec<Prescription>>,
    ledger: Arc<dyn SaleLedger>,
    clock: Arc<dyn Clock>,
}

impl PharmacyService {
    /// Wires the service to its collaborators.
    pub fn new(
        clients: Arc<dyn Store<Client>>,
        doctors: Arc<dyn Store<Doctor>>,
        insurers: Arc<dyn Store<Insurer>>,
        ledger: Arc<dyn SaleLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        PharmacyService {
            clients,
            doctors,
            insurers,
            inventory: RwLock::new(HashMap::new()),
            purchases: RwLock::new(Vec::new()),
            prescriptions: RwLock::new(Vec::new()),
            ledger,
            clock,
        }
    }

    /// Fully in-memory wiring with the system clock.
    pub fn in_memory() -> Self {
        PharmacyService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryLedger::new()),
            Arc::new(SystemClock),
        )
    }

    // =========================================================================
    // Client registry
    // =========================================================================

    /// Registers a client; `DuplicateKey` when the identifier is taken.
    pub fn add_client(&self, client: Client) -> ServiceResult<()> {
        let key = client.identifier().to_string();
        debug!(client = %key, "registering client");
        if self.clients.insert_new(&key, client) {
            Ok(())
        } else {
            Err(ServiceError::duplicate("client", key))
        }
    }

    /// Looks up a client. Errors only on a malformed identifier.
    pub fn find_client(&self, identifier: &str) -> ServiceResult<Option<Client>> {
        let key = validation::validate_identifier(identifier)?;
        Ok(self.clients.get(&key))
    }

    /// Removes a client. Returns whether one was removed.
    pub fn remove_client(&self, identifier: &str) -> ServiceResult<bool> {
        let key = validation::validate_identifier(identifier)?;
        Ok(self.clients.delete(&key))
    }

    /// Writes an updated client record back (setters are re-validating,
    /// so the record is trusted).
    pub fn update_client(&self, client: Client) -> ServiceResult<()> {
        let key = client.identifier().to_string();
        if !self.clients.contains(&key) {
            return Err(ServiceError::not_found("client", key));
        }
        self.clients.put(&key, client);
        Ok(())
    }

    /// Generates a free client identifier from the person's names.
    ///
    /// Deterministic and idempotent against the current registry state;
    /// the actual reservation happens at [`PharmacyService::add_client`]
    /// through the store's atomic insert.
    pub fn generate_client_identifier(&self, first_name: &str, last_name: &str) -> String {
        identifier::generate_client_identifier(first_name, last_name, |key| {
            self.clients.contains(key)
        })
    }

    // =========================================================================
    // Doctor registry
    // =========================================================================

    pub fn add_doctor(&self, doctor: Doctor) -> ServiceResult<()> {
        let key = doctor.identifier().to_string();
        debug!(doctor = %key, "registering doctor");
        if self.doctors.insert_new(&key, doctor) {
            Ok(())
        } else {
            Err(ServiceError::duplicate("doctor", key))
        }
    }

    pub fn find_doctor(&self, practitioner_number: &str) -> ServiceResult<Option<Doctor>> {
        let key = validation::validate_practitioner_number(practitioner_number)?;
        Ok(self.doctors.get(&key))
    }

    pub fn remove_doctor(&self, practitioner_number: &str) -> ServiceResult<bool> {
        let key = validation::validate_practitioner_number(practitioner_number)?;
        Ok(self.doctors.delete(&key))
    }

    // =========================================================================
    // Insurer registry
    // =========================================================================

    pub fn add_insurer(&self, insurer: Insurer) -> ServiceResult<()> {
        let key = insurer.name().to_string();
        debug!(insurer = %key, "registering insurer");
        if self.insurers.insert_new(&key, insurer) {
            Ok(())
        } else {
            Err(ServiceError::duplicate("insurer", key))
        }
    }

    pub fn find_insurer(&self, name: &str) -> ServiceResult<Option<Insurer>> {
        let key = validation::validate_organization_name(name)?;
        Ok(self.insurers.get(&key))
    }

    pub fn remove_insurer(&self, name: &str) -> ServiceResult<bool> {
        let key = validation::validate_organization_name(name)?;
        Ok(self.insurers.delete(&key))
    }

    /// Writes an updated insurer record back (e.g. after `set_rate`).
    /// Recorded purchases keep their frozen rate snapshot.
    pub fn update_insurer(&self, insurer: Insurer) -> ServiceResult<()> {
        let key = insurer.name().to_string();
        if !self.insurers.contains(&key) {
            return Err(ServiceError::not_found("insurer", key));
        }
        self.insurers.put(&key, insurer);
        Ok(())
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Adds a medication to the inventory; `DuplicateKey` on a
    /// case-insensitive name conflict.
    pub fn add_medication(&self, medication: Medication) -> ServiceResult<()> {
        let key = medication.key();
        debug!(medication = %medication.name(), stock = medication.stock(), "adding medication");

        let mut inventory = self.inventory.write().expect("inventory lock poisoned");
        if inventory.contains_key(&key) {
            return Err(ServiceError::duplicate("medication", medication.name()));
        }
        inventory.insert(key, Arc::new(Mutex::new(medication)));
        Ok(())
    }

    /// Snapshot of a medication's current state, by case-insensitive name.
    pub fn find_medication(&self, name: &str) -> Option<Medication> {
        let handle = self.medication_handle(name)?;
        let guard = handle.lock().expect("medication lock poisoned");
        Some(guard.clone())
    }

    /// Records a stock delivery.
    pub fn restock(&self, name: &str, quantity: u32) -> ServiceResult<u32> {
        let handle = self
            .medication_handle(name)
            .ok_or_else(|| ServiceError::not_found("medication", name))?;

        let mut guard = handle.lock().expect("medication lock poisoned");
        guard.increase_stock(quantity)?;
        info!(medication = %guard.name(), stock = guard.stock(), "restocked");
        Ok(guard.stock())
    }

    fn medication_handle(&self, name: &str) -> Option<Arc<Mutex<Medication>>> {
        let inventory = self.inventory.read().expect("inventory lock poisoned");
        inventory.get(&name.trim().to_lowercase()).map(Arc::clone)
    }

    /// Current inventory snapshot, cloned out medication by medication.
    fn inventory_snapshot(&self) -> Vec<Medication> {
        let inventory = self.inventory.read().expect("inventory lock poisoned");
        inventory
            .values()
            .map(|handle| handle.lock().expect("medication lock poisoned").clone())
            .collect()
    }

    // =========================================================================
    // Sale workflows
    // =========================================================================

    /// Records an over-the-counter sale.
    ///
    /// Atomic over the whole line set: either every line passes expiry and
    /// availability checks and every stock decrement commits, or nothing
    /// changes.
    pub fn sell_direct(&self, client_identifier: &str, lines: &[SaleLine]) -> ServiceResult<Purchase> {
        debug!(client = %client_identifier, lines = lines.len(), "direct sale requested");

        let client = self.require_client(client_identifier)?;
        let purchase = self.execute_sale(&client, SaleKind::Direct, lines)?;

        info!(
            reference = %purchase.reference(),
            total = %purchase.total(),
            "direct sale recorded"
        );
        Ok(purchase)
    }

    /// Records a prescription-backed sale.
    ///
    /// On success the prescription document and the purchase are recorded
    /// together (both or neither), and the client joins the doctor's
    /// patient set.
    pub fn sell_on_prescription(
        &self,
        client_identifier: &str,
        doctor_identifier: &str,
        lines: &[SaleLine],
    ) -> ServiceResult<Purchase> {
        debug!(
            client = %client_identifier,
            doctor = %doctor_identifier,
            lines = lines.len(),
            "prescription sale requested"
        );

        let client = self.require_client(client_identifier)?;
        let doctor = self
            .find_doctor(doctor_identifier)?
            .ok_or_else(|| ServiceError::not_found("doctor", doctor_identifier))?;

        let merged = merge_lines(lines)?;
        let handles = self.resolve_handles(&merged)?;
        let now = self.clock.now();
        let today = now.date_naive();

        // References read the registries, so take them before any guard.
        let rx_reference = self.fresh_reference('P');
        let reference = self.fresh_reference('V');
        let mut guards = lock_sorted(&handles);

        // Build the prescription document first: it runs the same expiry
        // and quantity checks as the purchase, against the same guards.
        let mut prescription =
            Prescription::new(&rx_reference, now, doctor.identifier(), client.identifier())?;
        for (key, quantity) in &merged {
            let guard = guards.get(key).expect("guard for resolved medication");
            prescription.add_line(guard, *quantity, today)?;
        }

        let purchase = self.priced_purchase(
            &client,
            SaleKind::OnPrescription,
            now,
            &reference,
            &merged,
            &mut guards,
        )?;

        // Past this point nothing can fail: record both documents.
        drop(guards);
        self.prescriptions
            .write()
            .expect("prescription lock poisoned")
            .push(prescription);
        self.record_purchase(purchase.clone());

        self.doctors.update(doctor.identifier(), &mut |d| {
            // Identifier comes from a validated client record; duplicate
            // additions are no-ops.
            let _ = d.add_patient(client.identifier());
        });

        info!(
            reference = %purchase.reference(),
            prescription = %rx_reference,
            total = %purchase.total(),
            "prescription sale recorded"
        );
        Ok(purchase)
    }

    fn require_client(&self, identifier: &str) -> ServiceResult<Client> {
        self.find_client(identifier)?
            .ok_or_else(|| ServiceError::not_found("client", identifier))
    }

    /// Shared sale body for the direct workflow.
    fn execute_sale(
        &self,
        client: &Client,
        kind: SaleKind,
        lines: &[SaleLine],
    ) -> ServiceResult<Purchase> {
        let merged = merge_lines(lines)?;
        let handles = self.resolve_handles(&merged)?;
        let reference = self.fresh_reference('V');
        let mut guards = lock_sorted(&handles);

        let purchase =
            self.priced_purchase(client, kind, self.clock.now(), &reference, &merged, &mut guards)?;

        drop(guards);
        self.record_purchase(purchase.clone());
        Ok(purchase)
    }

    /// Builds the priced purchase and commits the stock decrements, with
    /// the medication guards held by the caller.
    ///
    /// Order of checks: expiry (while building the basket), then
    /// availability for every line, then the decrements. A failure at any
    /// check returns before the first decrement.
    fn priced_purchase(
        &self,
        client: &Client,
        kind: SaleKind,
        now: DateTime<Utc>,
        reference: &str,
        merged: &[(String, u32)],
        guards: &mut HashMap<String, MutexGuard<'_, Medication>>,
    ) -> ServiceResult<Purchase> {
        let today = now.date_naive();
        let rate = self.resolve_rate(client);

        let mut purchase =
            Purchase::new(reference, kind, now, client.identifier(), None, rate)?;

        for (key, quantity) in merged {
            let guard = guards.get(key).expect("guard for resolved medication");
            purchase.add_line(guard, *quantity, today)?;
        }

        for (key, quantity) in merged {
            let guard = guards.get(key).expect("guard for resolved medication");
            if !guard.is_available(*quantity)? {
                return Err(CoreError::InsufficientStock {
                    name: guard.name().to_string(),
                    available: guard.stock(),
                    requested: *quantity,
                }
                .into());
            }
        }

        for (key, quantity) in merged {
            let guard = guards.get_mut(key).expect("guard for resolved medication");
            guard.reduce_stock(*quantity)?;
        }

        Ok(purchase)
    }

    /// Resolves the client's insurer link to a rate snapshot. A dangling
    /// name degrades to no reimbursement.
    fn resolve_rate(&self, client: &Client) -> Option<Rate> {
        let name = client.insurer()?;
        match self.insurers.get(name) {
            Some(insurer) => Some(insurer.rate()),
            None => {
                warn!(
                    client = %client.identifier(),
                    insurer = %name,
                    "client references an unknown insurer; selling without reimbursement"
                );
                None
            }
        }
    }

    /// Resolves every merged line to its inventory handle.
    fn resolve_handles(
        &self,
        merged: &[(String, u32)],
    ) -> ServiceResult<Vec<(String, Arc<Mutex<Medication>>)>> {
        let inventory = self.inventory.read().expect("inventory lock poisoned");
        let mut handles = Vec::with_capacity(merged.len());
        for (key, _) in merged {
            let handle = inventory
                .get(key)
                .map(Arc::clone)
                .ok_or_else(|| ServiceError::not_found("medication", key.clone()))?;
            handles.push((key.clone(), handle));
        }
        Ok(handles)
    }

    /// A reference not yet carried by any recorded document.
    ///
    /// Reads the purchase and prescription registries; callers must not
    /// hold any medication guard (lock order: guards before registries).
    fn fresh_reference(&self, prefix: char) -> String {
        let purchases = self.purchases.read().expect("purchase lock poisoned");
        let prescriptions = self.prescriptions.read().expect("prescription lock poisoned");
        loop {
            let candidate = identifier::generate_reference(prefix);
            let taken = purchases.iter().any(|p| p.reference() == candidate)
                || prescriptions.iter().any(|rx| rx.reference() == candidate);
            if !taken {
                return candidate;
            }
        }
    }

    /// Appends the purchase in memory, then fire-and-forgets the durable
    /// ledger entry.
    fn record_purchase(&self, purchase: Purchase) {
        let entry = LedgerEntry {
            recorded_at: purchase.recorded_at(),
            total: purchase.total(),
            reimbursed: purchase.reimbursed(),
            kind: purchase.kind(),
        };

        self.purchases
            .write()
            .expect("purchase lock poisoned")
            .push(purchase);

        if let Err(err) = self.ledger.append(entry) {
            warn!(error = %err, "durable ledger append failed; sale stands in memory");
        }
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Revenue and inventory figures over an inclusive time range.
    pub fn statistics_for(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<StatisticsReport> {
        if start > end {
            return Err(ServiceError::InvalidRange { start, end });
        }

        // Inventory first, purchases second: the same medication-then-
        // registry order the sale paths use.
        let inventory = self.inventory_snapshot();
        let purchases = self.purchases.read().expect("purchase lock poisoned");
        Ok(stats::build_report(
            start,
            end,
            purchases.iter(),
            inventory.iter(),
        ))
    }

    /// Prescriptions with no correlated purchase (same client, same
    /// calendar date). Best-effort diagnostic.
    pub fn unmatched_prescriptions(&self) -> Vec<UnmatchedPrescription> {
        let prescriptions = self.prescriptions.read().expect("prescription lock poisoned");
        let purchases = self.purchases.read().expect("purchase lock poisoned");
        reconcile::unmatched_prescriptions(&prescriptions, &purchases)
    }

    /// Purchases correlated with a doctor's prescriptions.
    pub fn purchases_for_doctor(&self, practitioner_number: &str) -> ServiceResult<Vec<Purchase>> {
        if self.find_doctor(practitioner_number)?.is_none() {
            return Err(ServiceError::not_found("doctor", practitioner_number));
        }

        let prescriptions = self.prescriptions.read().expect("prescription lock poisoned");
        let purchases = self.purchases.read().expect("purchase lock poisoned");
        Ok(
            reconcile::purchases_for_doctor(practitioner_number, &prescriptions, &purchases)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    /// All recorded purchases, oldest first.
    pub fn purchases(&self) -> Vec<Purchase> {
        self.purchases
            .read()
            .expect("purchase lock poisoned")
            .clone()
    }

    /// All recorded prescription documents, oldest first.
    pub fn prescriptions(&self) -> Vec<Prescription> {
        self.prescriptions
            .read()
            .expect("prescription lock poisoned")
            .clone()
    }
}

// =============================================================================
// Line merging & lock ordering
// =============================================================================

/// Merges requested lines by case-insensitive name, preserving first-seen
/// order; validates each quantity and every merged sum against [1, 1000].
fn merge_lines(lines: &[SaleLine]) -> ServiceResult<Vec<(String, u32)>> {
    validation::validate_non_empty("sale lines", lines)?;

    let mut merged: Vec<(String, u32)> = Vec::with_capacity(lines.len());
    for (name, quantity) in lines {
        let quantity = validation::validate_quantity(*quantity)?;
        let key = name.trim().to_lowercase();

        if let Some(entry) = merged.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = validation::validate_quantity(entry.1.saturating_add(quantity))?;
        } else {
            merged.push((key, quantity));
        }
    }
    Ok(merged)
}

/// Locks the handles in sorted-key order (deadlock avoidance) and returns
/// the guards keyed for per-line access. The handle slice must outlive
/// the guards.
fn lock_sorted<'a>(
    handles: &'a [(String, Arc<Mutex<Medication>>)],
) -> HashMap<String, MutexGuard<'a, Medication>> {
    let mut order: Vec<&(String, Arc<Mutex<Medication>>)> = handles.iter().collect();
    order.sort_by(|a, b| a.0.cmp(&b.0));

    let mut guards = HashMap::with_capacity(order.len());
    for (key, handle) in order {
        guards.insert(
            key.clone(),
            handle.lock().expect("medication lock poisoned"),
        );
    }
    guards
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use officine_core::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn medication(name: &str, stock: u32) -> Medication {
        Medication::new(
            name,
            Category::Analgesic,
            5.99,
            stock,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
            today(),
        )
        .unwrap()
    }

    #[test]
    fn test_merge_lines_merges_case_insensitively() {
        let merged = merge_lines(&[("Doliprane", 2), ("Aspirine", 1), ("doliprane", 3)]).unwrap();
        assert_eq!(
            merged,
            vec![("doliprane".to_string(), 5), ("aspirine".to_string(), 1)]
        );
    }

    #[test]
    fn test_merge_lines_rejects_empty_and_bad_quantities() {
        assert!(merge_lines(&[]).is_err());
        assert!(merge_lines(&[("Doliprane", 0)]).is_err());
        assert!(merge_lines(&[("Doliprane", 600), ("doliprane", 500)]).is_err());
    }

    #[test]
    fn test_lock_sorted_allows_any_request_order() {
        let handles = vec![
            ("doliprane".to_string(), Arc::new(Mutex::new(medication("Doliprane", 10)))),
            ("aspirine".to_string(), Arc::new(Mutex::new(medication("Aspirine", 10)))),
        ];

        let guards = lock_sorted(&handles);
        assert_eq!(guards.len(), 2);
        assert_eq!(guards.get("aspirine").unwrap().name(), "Aspirine");
        assert_eq!(guards.get("doliprane").unwrap().name(), "Doliprane");
    }

    #[test]
    fn test_medication_registry_is_case_insensitive() {
        let service = PharmacyService::in_memory();
        service.add_medication(medication("Doliprane", 100)).unwrap();

        let dup = service.add_medication(medication("DOLIPRANE", 5));
        assert!(matches!(dup, Err(ServiceError::DuplicateKey { kind: "medication", .. })));

        assert_eq!(
            service.find_medication("  doliprane ").unwrap().stock(),
            100
        );
        assert!(service.find_medication("Aspirine").is_none());
    }

    #[test]
    fn test_restock() {
        let service = PharmacyService::in_memory();
        service.add_medication(medication("Doliprane", 100)).unwrap();

        assert_eq!(service.restock("Doliprane", 50).unwrap(), 150);
        assert!(matches!(
            service.restock("Aspirine", 50),
            Err(ServiceError::NotFound { .. })
        ));
    }
}

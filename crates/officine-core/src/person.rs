//! # Person Entities
//!
//! Client, doctor, and pharmacist records.
//!
//! ## Composition Over Inheritance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Person Family                                     │
//! │                                                                         │
//! │            ┌──────────────────────┐                                     │
//! │            │     ContactInfo      │  shared, fully validated            │
//! │            │  names, address,     │                                     │
//! │            │  phone, email        │                                     │
//! │            └──────────┬───────────┘                                     │
//! │            embedded by│                                                 │
//! │      ┌────────────────┼─────────────────┐                               │
//! │      ▼                ▼                 ▼                               │
//! │  ┌────────┐      ┌─────────┐      ┌────────────┐                       │
//! │  │ Client │      │ Doctor  │      │ Pharmacist │                       │
//! │  │ SSN,   │      │ patient │      │ specialty, │                       │
//! │  │ refs   │      │ set     │      │ hire date  │                       │
//! │  └────────┘      └─────────┘      └────────────┘                       │
//! │                                                                         │
//! │  No trait objects, no virtual dispatch: each variant is a plain        │
//! │  struct embedding the shared contact value.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Equality and hashing use the business identifier ONLY. Two records with
//! the same identifier are equal for registry purposes even if other
//! fields differ. This is a deliberate simplification for lookups.
//!
//! ## Weak References
//! A client points at its insurer by name and at its treating doctor by
//! practitioner number. Resolution happens at the service layer; a
//! dangling reference degrades to "no insurer" / "no doctor", it never
//! fails a sale.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use crate::validation::{
    self, mask_social_security, ValidationResult,
};

// =============================================================================
// Contact Info
// =============================================================================

/// Validated contact details shared by every person variant.
///
/// All fields are normalized at construction (trimmed, email lower-cased)
/// and re-validated by every setter. No field is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    last_name: String,
    first_name: String,
    address: String,
    postal_code: String,
    city: String,
    phone: String,
    email: String,
}

impl ContactInfo {
    /// Builds contact info from raw strings, validating every field.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        last_name: &str,
        first_name: &str,
        address: &str,
        postal_code: &str,
        city: &str,
        phone: &str,
        email: &str,
    ) -> ValidationResult<Self> {
        Ok(ContactInfo {
            last_name: validation::validate_person_name("last name", last_name)?,
            first_name: validation::validate_person_name("first name", first_name)?,
            address: validation::validate_address(address)?,
            postal_code: validation::validate_postal_code(postal_code)?,
            city: validation::validate_city(city)?,
            phone: validation::validate_phone(phone)?,
            email: validation::validate_email(email)?,
        })
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// "First Last" display form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_address(&mut self, address: &str) -> ValidationResult<()> {
        self.address = validation::validate_address(address)?;
        Ok(())
    }

    pub fn set_postal_code(&mut self, postal_code: &str) -> ValidationResult<()> {
        self.postal_code = validation::validate_postal_code(postal_code)?;
        Ok(())
    }

    pub fn set_city(&mut self, city: &str) -> ValidationResult<()> {
        self.city = validation::validate_city(city)?;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: &str) -> ValidationResult<()> {
        self.phone = validation::validate_phone(phone)?;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> ValidationResult<()> {
        self.email = validation::validate_email(email)?;
        Ok(())
    }
}

// =============================================================================
// Client
// =============================================================================

/// A pharmacy client.
///
/// ## Social Security Number
/// Stored validated but exposed ONLY in masked form
/// (`1*************6`) through [`Client::masked_social_security`].
/// Serialization keeps the raw value because the persistence seam needs
/// it back; display layers must go through the mask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    identifier: String,
    contact: ContactInfo,
    social_security: String,
    /// Insurer name (weak reference, resolved at the service layer).
    insurer: Option<String>,
    /// Treating doctor's practitioner number (weak reference).
    doctor: Option<String>,
}

impl Client {
    /// Creates a client. Fails atomically on the first invalid field.
    pub fn new(
        identifier: &str,
        contact: ContactInfo,
        social_security: &str,
    ) -> ValidationResult<Self> {
        Ok(Client {
            identifier: validation::validate_identifier(identifier)?,
            contact,
            social_security: validation::validate_social_security(social_security)?,
            insurer: None,
            doctor: None,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactInfo {
        &mut self.contact
    }

    /// The masked social security number: first digit, 13 asterisks, last
    /// digit. Never exposes the raw value.
    pub fn masked_social_security(&self) -> String {
        mask_social_security(&self.social_security)
    }

    pub fn insurer(&self) -> Option<&str> {
        self.insurer.as_deref()
    }

    pub fn doctor(&self) -> Option<&str> {
        self.doctor.as_deref()
    }

    /// Affiliates the client with an insurer by name, or clears the link.
    pub fn set_insurer(&mut self, insurer: Option<&str>) -> ValidationResult<()> {
        self.insurer = match insurer {
            Some(name) => Some(validation::validate_organization_name(name)?),
            None => None,
        };
        Ok(())
    }

    /// Sets the treating doctor by practitioner number, or clears the link.
    pub fn set_doctor(&mut self, doctor: Option<&str>) -> ValidationResult<()> {
        self.doctor = match doctor {
            Some(number) => Some(validation::validate_practitioner_number(number)?),
            None => None,
        };
        Ok(())
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Client {}

impl Hash for Client {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

// =============================================================================
// Doctor
// =============================================================================

/// A prescribing doctor.
///
/// The national practitioner number (11 digits) doubles as the business
/// identifier: it is the registry key and the only equality field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    practitioner_number: String,
    contact: ContactInfo,
    /// Client identifiers of associated patients (set semantics).
    patients: BTreeSet<String>,
}

impl Doctor {
    pub fn new(practitioner_number: &str, contact: ContactInfo) -> ValidationResult<Self> {
        Ok(Doctor {
            practitioner_number: validation::validate_practitioner_number(practitioner_number)?,
            contact,
            patients: BTreeSet::new(),
        })
    }

    pub fn practitioner_number(&self) -> &str {
        &self.practitioner_number
    }

    /// Business identifier (alias for the practitioner number).
    pub fn identifier(&self) -> &str {
        &self.practitioner_number
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactInfo {
        &mut self.contact
    }

    pub fn patients(&self) -> impl Iterator<Item = &str> {
        self.patients.iter().map(String::as_str)
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Associates a patient. Adding the same identifier twice is a no-op.
    ///
    /// ## Returns
    /// `true` if the patient was newly added, `false` if already present.
    pub fn add_patient(&mut self, client_identifier: &str) -> ValidationResult<bool> {
        let id = validation::validate_identifier(client_identifier)?;
        Ok(self.patients.insert(id))
    }

    /// Removes a patient association. Returns whether one was removed.
    pub fn remove_patient(&mut self, client_identifier: &str) -> bool {
        self.patients.remove(client_identifier)
    }
}

impl PartialEq for Doctor {
    fn eq(&self, other: &Self) -> bool {
        self.practitioner_number == other.practitioner_number
    }
}

impl Eq for Doctor {}

impl Hash for Doctor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.practitioner_number.hash(state);
    }
}

// =============================================================================
// Pharmacist
// =============================================================================

/// A dispensing pharmacist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pharmacist {
    practitioner_number: String,
    contact: ContactInfo,
    specialty: String,
    hired_on: NaiveDate,
}

impl Pharmacist {
    pub fn new(
        practitioner_number: &str,
        contact: ContactInfo,
        specialty: &str,
        hired_on: NaiveDate,
    ) -> ValidationResult<Self> {
        let specialty = specialty.trim();
        if specialty.is_empty() {
            return Err(crate::error::ValidationError::Required {
                field: "specialty".to_string(),
            });
        }

        Ok(Pharmacist {
            practitioner_number: validation::validate_practitioner_number(practitioner_number)?,
            contact,
            specialty: specialty.to_string(),
            hired_on,
        })
    }

    pub fn practitioner_number(&self) -> &str {
        &self.practitioner_number
    }

    pub fn identifier(&self) -> &str {
        &self.practitioner_number
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn hired_on(&self) -> NaiveDate {
        self.hired_on
    }
}

impl PartialEq for Pharmacist {
    fn eq(&self, other: &Self) -> bool {
        self.practitioner_number == other.practitioner_number
    }
}

impl Eq for Pharmacist {}

impl Hash for Pharmacist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.practitioner_number.hash(state);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Insurer
//!
//! Health-insurance mutual funds ("mutuelles") that reimburse a percentage
//! of a purchase total for affiliated clients.
//!
//! The name is the unique business key: clients reference their insurer by
//! name, and the service registry is keyed by it.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::money::Rate;
use crate::validation::{self, ValidationResult};

/// An insurer record.
///
/// ## Rate Snapshot Caveat
/// The reimbursement rate read through [`Insurer::rate`] is the CURRENT
/// rate. Purchases freeze the rate at construction time; changing it here
/// never recomputes recorded transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insurer {
    name: String,
    address: String,
    postal_code: String,
    city: String,
    phone: String,
    email: String,
    rate: Rate,
}

impl Insurer {
    /// Creates an insurer from raw fields, validating every one.
    pub fn new(
        name: &str,
        address: &str,
        postal_code: &str,
        city: &str,
        phone: &str,
        email: &str,
        rate_percent: f64,
    ) -> ValidationResult<Self> {
        Ok(Insurer {
            name: validation::validate_organization_name(name)?,
            address: validation::validate_address(address)?,
            postal_code: validation::validate_postal_code(postal_code)?,
            city: validation::validate_city(city)?,
            phone: validation::validate_phone(phone)?,
            email: validation::validate_email(email)?,
            rate: Rate::new(rate_percent)?,
        })
    }

    /// The unique business key.
    pub fn name(&self) -> &str {
        &self.name
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

    /// The current reimbursement rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Updates the reimbursement rate, re-validating the [0, 100] bound.
    pub fn set_rate(&mut self, rate_percent: f64) -> ValidationResult<()> {
        self.rate = Rate::new(rate_percent)?;
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

impl PartialEq for Insurer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Insurer {}

impl Hash for Insurer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn insurer(rate: f64) -> ValidationResult<Insurer> {
        Insurer::new(
            "Mutuelle Plus",
            "3 avenue de la Santé",
            "69002",
            "Lyon",
            "0478123456",
            "contact@mutuelleplus.fr",
            rate,
        )
    }

    #[test]
    fn test_construction_validates_rate() {
        assert!(insurer(70.0).is_ok());
        assert!(insurer(0.0).is_ok());
        assert!(insurer(100.0).is_ok());

        assert!(insurer(-5.0).is_err());
        assert!(insurer(101.0).is_err());
        assert!(insurer(f64::NAN).is_err());
    }

    #[test]
    fn test_set_rate_revalidates() {
        let mut m = insurer(70.0).unwrap();
        assert!(m.set_rate(55.0).is_ok());
        assert_eq!(m.rate().percent(), 55.0);

        assert!(m.set_rate(120.0).is_err());
        assert_eq!(m.rate().percent(), 55.0);
    }

    #[test]
    fn test_name_is_trimmed_and_required() {
        let m = Insurer::new(
            "  Mutuelle Plus  ",
            "3 avenue de la Santé",
            "69002",
            "Lyon",
            "0478123456",
            "contact@mutuelleplus.fr",
            70.0,
        )
        .unwrap();
        assert_eq!(m.name(), "Mutuelle Plus");

        assert!(Insurer::new(
            "   ",
            "3 avenue de la Santé",
            "69002",
            "Lyon",
            "0478123456",
            "contact@mutuelleplus.fr",
            70.0,
        )
        .is_err());
    }

    #[test]
    fn test_equality_by_name_only() {
        let a = insurer(70.0).unwrap();
        let b = insurer(30.0).unwrap();
        assert_eq!(a, b);
    }
}

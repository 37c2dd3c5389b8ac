//! # Validation Module
//!
//! Field validators for the pharmacy back-office.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Entity constructors                                          │
//! │  ├── Every raw field runs through THIS MODULE                          │
//! │  └── No entity can exist in an invalid state                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Mutation paths                                               │
//! │  ├── Setters re-validate                                               │
//! │  └── Stock / basket changes re-check bounds                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Service preconditions                                        │
//! │  └── Keys validated before registry lookups                            │
//! │                                                                         │
//! │  Defense in depth: construction fails atomically on the first          │
//! │  invalid field, and nothing downstream re-trusts raw input.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! Every validator is pure: it trims/normalizes, checks a fixed rule, and
//! either returns the normalized value or fails with a descriptive
//! [`ValidationError`] naming the field. Callers never catch these —
//! the failure propagates and the construction never happens.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_LINE_QUANTITY, MAX_STOCK, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shown instead of a social security number that failed validation.
pub const MASKED_SSN_PLACEHOLDER: &str = "***************";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person name field (last name, first name).
///
/// ## Rules
/// - Trimmed, must not be empty
/// - 2 to 30 characters
/// - Letters, spaces, hyphens, and apostrophes only
///   (accented letters are letters — "Hélène" and "O'Brien" are valid)
///
/// ## Returns
/// The trimmed name.
pub fn validate_person_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let len = value.chars().count();
    if len < 2 {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: 2,
        });
    }
    if len > 30 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 30,
        });
    }

    if !value
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, spaces, hyphens, and apostrophes".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a postal address line.
///
/// ## Rules
/// - Trimmed, must not be empty
/// - At most 100 characters
pub fn validate_address(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if value.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: 100,
        });
    }

    Ok(value.to_string())
}

/// Validates a city name (same character class as person names, 1-50 chars).
pub fn validate_city(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "city".to_string(),
        });
    }

    if value.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "city".to_string(),
            max: 50,
        });
    }

    if !value
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
    {
        return Err(ValidationError::InvalidFormat {
            field: "city".to_string(),
            reason: "must contain only letters, spaces, hyphens, and apostrophes".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a French postal code.
///
/// ## Rules
/// - Exactly 5 ASCII digits
/// - Department part must not be "00"
///
/// ## Example
/// ```rust
/// use officine_core::validation::validate_postal_code;
///
/// assert!(validate_postal_code("75011").is_ok());
/// assert!(validate_postal_code("00100").is_err());
/// assert!(validate_postal_code("7501").is_err());
/// ```
pub fn validate_postal_code(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "postal code".to_string(),
        });
    }

    if value.len() != 5 || !value.chars().all(|c| c.is_ascii_digit()) || value.starts_with("00") {
        return Err(ValidationError::InvalidFormat {
            field: "postal code".to_string(),
            reason: "must be 5 digits with a non-zero department".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a French phone number: `0` + non-zero digit + 8 digits.
///
/// ## Example
/// ```rust
/// use officine_core::validation::validate_phone;
///
/// assert!(validate_phone("0612345678").is_ok());
/// assert!(validate_phone("0012345678").is_err()); // second digit must be 1-9
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[0] == b'0'
        && (b'1'..=b'9').contains(&bytes[1])
        && bytes[2..].iter().all(|b| b.is_ascii_digit());

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be 10 digits starting with 0 then 1-9".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates an email address and normalizes it to lowercase.
///
/// ## Rules
/// - Trimmed, must not be empty
/// - Exactly one `@`
/// - Non-empty local part of `a-z 0-9 . _ % + -`
/// - Domain of dot-separated, non-empty labels of `a-z 0-9 -`,
///   with at least one dot
///
/// ## Returns
/// The lower-cased address (case-normalized on store).
pub fn validate_email(value: &str) -> ValidationResult<String> {
    let value = value.trim().to_lowercase();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like local@domain.tld".to_string(),
    };

    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid()),
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._%+-".contains(c))
    {
        return Err(invalid());
    }

    if !domain.contains('.')
        || !domain.split('.').all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
    {
        return Err(invalid());
    }

    Ok(value)
}

/// Validates a French social security number.
///
/// ## Rules
/// - Exactly 15 ASCII digits
/// - First digit is 1 or 2 (sex indicator)
pub fn validate_social_security(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "social security number".to_string(),
        });
    }

    let well_formed = value.len() == 15
        && value.chars().all(|c| c.is_ascii_digit())
        && matches!(value.as_bytes()[0], b'1' | b'2');

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "social security number".to_string(),
            reason: "must be 15 digits starting with 1 or 2".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a national practitioner number (11 digits).
pub fn validate_practitioner_number(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "practitioner number".to_string(),
        });
    }

    if value.len() != 11 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "practitioner number".to_string(),
            reason: "must be exactly 11 digits".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a business identifier (client code, insurer key...).
///
/// ## Rules
/// - 3 to 20 characters
/// - ASCII letters, digits, hyphens, underscores
///
/// ## Example
/// ```rust
/// use officine_core::validation::validate_identifier;
///
/// assert!(validate_identifier("CL001").is_ok());
/// assert!(validate_identifier("cl").is_err());        // too short
/// assert!(validate_identifier("CL 001").is_err());    // no spaces
/// ```
pub fn validate_identifier(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "identifier".to_string(),
        });
    }

    if value.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "identifier".to_string(),
            min: 3,
        });
    }
    if value.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "identifier".to_string(),
            max: 20,
        });
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "identifier".to_string(),
            reason: "must contain only letters, digits, hyphens, and underscores".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a transaction reference and normalizes it to uppercase.
///
/// ## Rules
/// - 3 to 15 characters after trimming
/// - Uppercase ASCII letters and digits only (input is upper-cased first)
pub fn validate_reference(value: &str) -> ValidationResult<String> {
    let value = value.trim().to_ascii_uppercase();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "reference".to_string(),
        });
    }

    if value.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "reference".to_string(),
            min: 3,
        });
    }
    if value.len() > 15 {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: 15,
        });
    }

    if !value.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "reference".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(value)
}

/// Validates a medication name.
///
/// ## Rules
/// - Trimmed, 2 to 50 characters
/// - Letters, digits, spaces, and hyphens
///
/// Stored verbatim; the inventory compares names case-insensitively.
pub fn validate_medication_name(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "medication name".to_string(),
        });
    }

    let len = value.chars().count();
    if len < 2 {
        return Err(ValidationError::TooShort {
            field: "medication name".to_string(),
            min: 2,
        });
    }
    if len > 50 {
        return Err(ValidationError::TooLong {
            field: "medication name".to_string(),
            max: 50,
        });
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "medication name".to_string(),
            reason: "must contain only letters, digits, spaces, and hyphens".to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates an organization name (insurer key).
///
/// ## Rules
/// - Trimmed, must not be empty
/// - At most 50 characters
///
/// Unlike person names, digits and punctuation are allowed
/// ("Mutuelle 2000" is a valid insurer).
pub fn validate_organization_name(value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "organization name".to_string(),
        });
    }

    if value.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "organization name".to_string(),
            max: 50,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price in euros.
///
/// ## Rules
/// - Must be a finite number (NaN and ±∞ rejected)
/// - Must be in [0, 10 000]
///
/// ## Example
/// ```rust
/// use officine_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(5.99).is_ok());
/// assert!(validate_unit_price(0.0).is_ok());
/// assert!(validate_unit_price(-1.0).is_err());
/// assert!(validate_unit_price(f64::NAN).is_err());
/// ```
pub fn validate_unit_price(value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "unit price".to_string(),
        });
    }

    if !(0.0..=MAX_UNIT_PRICE).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE as i64,
        });
    }

    Ok(value)
}

/// Validates a stock level (0 to 100 000 units).
pub fn validate_stock_level(value: u32) -> ValidationResult<u32> {
    if value > MAX_STOCK {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK as i64,
        });
    }

    Ok(value)
}

/// Validates a sale line quantity (1 to 1 000 units).
pub fn validate_quantity(value: u32) -> ValidationResult<u32> {
    if value < 1 || value > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(value)
}

/// Validates a restock delivery quantity (1 to 100 000 units).
///
/// Deliveries are bounded by the shelf capacity, not by the per-sale-line
/// limit: a 5 000-unit delivery is routine, a 5 000-unit sale line is a
/// typo.
pub fn validate_restock_quantity(value: u32) -> ValidationResult<u32> {
    if value < 1 || value > MAX_STOCK {
        return Err(ValidationError::OutOfRange {
            field: "restock quantity".to_string(),
            min: 1,
            max: MAX_STOCK as i64,
        });
    }

    Ok(value)
}

/// Validates a reimbursement rate as a percentage.
///
/// ## Rules
/// - Must be a finite number (NaN and ±∞ rejected)
/// - Must be in [0, 100]
pub fn validate_reimbursement_rate(value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "reimbursement rate".to_string(),
        });
    }

    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "reimbursement rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(value)
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a date lies strictly in the future.
///
/// "Today" is injected by the caller (the service resolves it through the
/// Clock seam) so the check stays pure and testable.
pub fn validate_future_date(
    field: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> ValidationResult<NaiveDate> {
    if date <= today {
        return Err(ValidationError::DateNotInFuture {
            field: field.to_string(),
            today,
        });
    }

    Ok(date)
}

/// Validates that `earlier` is strictly before `later`.
///
/// Used for (service-start, expiry) pairs.
pub fn validate_date_order(
    earlier_field: &str,
    earlier: NaiveDate,
    later_field: &str,
    later: NaiveDate,
) -> ValidationResult<()> {
    if earlier >= later {
        return Err(ValidationError::DateOrder {
            earlier_field: earlier_field.to_string(),
            earlier,
            later_field: later_field.to_string(),
            later,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that a collection carries at least one element.
///
/// Generic over the element type; used for sale line maps.
pub fn validate_non_empty<T>(field: &str, items: &[T]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::EmptyCollection {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Masking
// =============================================================================

/// Masks a social security number for display.
///
/// ## Behavior
/// - Valid 15-digit number → first digit + 13 asterisks + last digit
/// - Anything else → the constant [`MASKED_SSN_PLACEHOLDER`]
///
/// Never fails: masking is display-side and must not raise on bad data.
///
/// ## Example
/// ```rust
/// use officine_core::validation::mask_social_security;
///
/// assert_eq!(
///     mask_social_security("185057800608536"),
///     "1*************6"
/// );
/// assert_eq!(mask_social_security(""), "***************");
/// ```
pub fn mask_social_security(raw: &str) -> String {
    match validate_social_security(raw) {
        Ok(ssn) => {
            let bytes = ssn.as_bytes();
            format!(
                "{}{}{}",
                bytes[0] as char,
                "*".repeat(13),
                bytes[14] as char
            )
        }
        Err(_) => MASKED_SSN_PLACEHOLDER.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_person_name() {
        assert_eq!(validate_person_name("last name", "  Dupont ").unwrap(), "Dupont");
        assert!(validate_person_name("last name", "Jean-Marie").is_ok());
        assert!(validate_person_name("last name", "O'Brien").is_ok());
        assert!(validate_person_name("last name", "Hélène").is_ok());

        assert!(validate_person_name("last name", "").is_err());
        assert!(validate_person_name("last name", "A").is_err());
        assert!(validate_person_name("last name", &"A".repeat(31)).is_err());
        assert!(validate_person_name("last name", "Dupont3").is_err());
    }

    #[test]
    fn test_validate_postal_code() {
        assert!(validate_postal_code("75011").is_ok());
        assert!(validate_postal_code("01000").is_ok());

        assert!(validate_postal_code("").is_err());
        assert!(validate_postal_code("00100").is_err());
        assert!(validate_postal_code("7501").is_err());
        assert!(validate_postal_code("750111").is_err());
        assert!(validate_postal_code("7501A").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0612345678").is_ok());
        assert!(validate_phone("0145678901").is_ok());

        assert!(validate_phone("0012345678").is_err());
        assert!(validate_phone("1612345678").is_err());
        assert!(validate_phone("061234567").is_err());
        assert!(validate_phone("06123456789").is_err());
        assert!(validate_phone("06 12 34 56").is_err());
    }

    #[test]
    fn test_validate_email_normalizes_case() {
        assert_eq!(
            validate_email("  Marie.Curie@Example.FR ").unwrap(),
            "marie.curie@example.fr"
        );

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.fr").is_err());
        assert!(validate_email("@example.fr").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@exam..ple.fr").is_err());
    }

    #[test]
    fn test_validate_social_security() {
        assert!(validate_social_security("185057800608536").is_ok());
        assert!(validate_social_security("285057800608536").is_ok());

        assert!(validate_social_security("385057800608536").is_err());
        assert!(validate_social_security("18505780060853").is_err());
        assert!(validate_social_security("1850578006085361").is_err());
        assert!(validate_social_security("").is_err());
    }

    #[test]
    fn test_validate_practitioner_number() {
        assert!(validate_practitioner_number("10101234567").is_ok());
        assert!(validate_practitioner_number("1010123456").is_err());
        assert!(validate_practitioner_number("10101234A67").is_err());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("CL001").is_ok());
        assert!(validate_identifier("doc_75-a").is_ok());

        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("CL").is_err());
        assert!(validate_identifier(&"X".repeat(21)).is_err());
        assert!(validate_identifier("CL 001").is_err());
    }

    #[test]
    fn test_validate_reference_uppercases() {
        assert_eq!(validate_reference("v2408a").unwrap(), "V2408A");
        assert!(validate_reference("AB").is_err());
        assert!(validate_reference(&"A".repeat(16)).is_err());
        assert!(validate_reference("REF-01").is_err());
    }

    #[test]
    fn test_validate_organization_name() {
        assert_eq!(validate_organization_name(" Mutuelle 2000 ").unwrap(), "Mutuelle 2000");
        assert!(validate_organization_name("").is_err());
        assert!(validate_organization_name("   ").is_err());
        assert!(validate_organization_name(&"M".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_medication_name() {
        assert!(validate_medication_name("Doliprane").is_ok());
        assert!(validate_medication_name("Doliprane 1000").is_ok());
        assert!(validate_medication_name("Co-Doliprane").is_ok());

        assert!(validate_medication_name("").is_err());
        assert!(validate_medication_name("D").is_err());
        assert!(validate_medication_name(&"D".repeat(51)).is_err());
        assert!(validate_medication_name("Doliprane!").is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(5.99).is_ok());
        assert!(validate_unit_price(10_000.0).is_ok());

        assert!(validate_unit_price(-0.01).is_err());
        assert!(validate_unit_price(10_000.01).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
        assert!(validate_unit_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_stock_and_quantity() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(100_000).is_ok());
        assert!(validate_stock_level(100_001).is_err());

        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1_000).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1_001).is_err());

        // Deliveries go past the sale-line bound, up to shelf capacity.
        assert!(validate_restock_quantity(1).is_ok());
        assert!(validate_restock_quantity(5_000).is_ok());
        assert!(validate_restock_quantity(100_000).is_ok());
        assert!(validate_restock_quantity(0).is_err());
        assert!(validate_restock_quantity(100_001).is_err());
    }

    #[test]
    fn test_validate_reimbursement_rate() {
        assert!(validate_reimbursement_rate(0.0).is_ok());
        assert!(validate_reimbursement_rate(70.0).is_ok());
        assert!(validate_reimbursement_rate(100.0).is_ok());

        assert!(validate_reimbursement_rate(-1.0).is_err());
        assert!(validate_reimbursement_rate(100.5).is_err());
        assert!(validate_reimbursement_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_future_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        assert!(validate_future_date("expiry date", tomorrow, today).is_ok());
        assert!(validate_future_date("expiry date", today, today).is_err());
        assert!(matches!(
            validate_future_date("expiry date", today.pred_opt().unwrap(), today),
            Err(ValidationError::DateNotInFuture { .. })
        ));
    }

    #[test]
    fn test_validate_date_order() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();

        assert!(validate_date_order("service start", start, "expiry date", end).is_ok());
        assert!(validate_date_order("service start", end, "expiry date", start).is_err());
        assert!(validate_date_order("service start", start, "expiry date", start).is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("lines", &[1, 2]).is_ok());
        assert!(matches!(
            validate_non_empty::<u32>("lines", &[]),
            Err(ValidationError::EmptyCollection { .. })
        ));
    }

    #[test]
    fn test_mask_social_security() {
        assert_eq!(mask_social_security("185057800608536"), "1*************6");
        assert_eq!(mask_social_security("285057800608531"), "2*************1");

        // Invalid input masks to the constant placeholder, never panics.
        assert_eq!(mask_social_security(""), MASKED_SSN_PLACEHOLDER);
        assert_eq!(mask_social_security("12345"), MASKED_SSN_PLACEHOLDER);
        assert_eq!(mask_social_security("3850578006085AB"), MASKED_SSN_PLACEHOLDER);
    }
}

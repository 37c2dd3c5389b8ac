//! # Identifier & Reference Generation
//!
//! Deterministic client codes and unique sale references.
//!
//! ## Client Identifier Scheme
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generate_client_identifier("Marie", "Dupont")                          │
//! │                                                                         │
//! │  base = first 2 letters of first name  → "MA"                          │
//! │       + first 3 letters of last name   → "DUP"                         │
//! │       upper-cased, alphanumeric only   → "MADUP"                       │
//! │       (empty base falls back to "CL")                                   │
//! │                                                                         │
//! │  "MADUP" free?        → "MADUP"                                         │
//! │  taken?               → "MADUP01", "MADUP02", ... first free wins      │
//! │                                                                         │
//! │  Idempotent under retry: same inputs + same registry state             │
//! │  → same candidate. Registration itself goes through the store's        │
//! │  atomic insert_new, which closes the check-then-insert race.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use uuid::Uuid;

/// Derives the deterministic identifier base from a person's names.
///
/// Upper-cases, keeps ASCII alphanumerics only (accented letters are
/// dropped rather than transliterated), and falls back to "CL" when
/// nothing survives the filter.
fn identifier_base(first_name: &str, last_name: &str) -> String {
    let take_letters = |s: &str, n: usize| -> String {
        s.chars()
            .flat_map(char::to_uppercase)
            .filter(char::is_ascii_alphanumeric)
            .take(n)
            .collect()
    };

    let base = format!(
        "{}{}",
        take_letters(first_name, 2),
        take_letters(last_name, 3)
    );

    if base.is_empty() {
        "CL".to_string()
    } else {
        base
    }
}

/// Generates a free client identifier.
///
/// `is_taken` answers "is this key registered right now"; the caller owns
/// the registry. On collision a zero-padded two-digit suffix is appended
/// starting at 01 and incremented until free (three digits past 99).
///
/// Bases shorter than 3 characters get a suffix immediately: a bare "CL"
/// or "AB" would not satisfy the 3-character identifier minimum.
pub fn generate_client_identifier<F>(first_name: &str, last_name: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = identifier_base(first_name, last_name);

    if base.len() >= 3 && !is_taken(&base) {
        return base;
    }

    let mut suffix = 1u32;
    loop {
        let candidate = format!("{}{:02}", base, suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Generates a sale/prescription reference: a prefix letter plus 12
/// uppercase hex characters from a fresh UUID v4.
///
/// Matches the `[A-Z0-9]{3,15}` reference pattern (13 characters).
/// Collisions are astronomically unlikely but the service still verifies
/// uniqueness against its records before use.
pub fn generate_reference(prefix: char) -> String {
    debug_assert!(prefix.is_ascii_uppercase());
    let token = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
    format!("{}{}", prefix, &token[..12])
}

// =============================================================================
// Unit Tests
// =============================================================================

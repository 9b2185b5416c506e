//! Phone number normalization.
//!
//! Structured platforms store contact numbers in E.164; the canonical
//! profile carries whatever the owner typed (`010-1234-5678`). Numbers that
//! do not look Korean pass through unchanged.

/// Normalize a Korean phone number to E.164 (`+82...`).
///
/// Returns an empty string for empty input and the original text for
/// anything that is neither a domestic (`0...`) nor an international
/// (`82...`) Korean number.
pub fn normalize_phone(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }

    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix('0') {
        format!("+82{rest}")
    } else if digits.starts_with("82") {
        format!("+{digits}")
    } else {
        phone.to_string()
    }
}

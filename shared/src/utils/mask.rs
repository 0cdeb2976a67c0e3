//! Log-safe rendering of OTP identifiers
//!
//! Identifiers are email addresses or phone numbers. Neither should appear in
//! logs in full, so every log line that names an identifier goes through
//! [`mask_identifier`].

/// Number of trailing characters left visible on non-email identifiers
const VISIBLE_SUFFIX: usize = 4;

/// Mask an identifier for logging
///
/// - Emails keep the first character of the local part and the domain: `a***@b.com`
/// - Anything else keeps the last four characters: `********5678`
/// - Identifiers of four characters or fewer are fully masked
pub fn mask_identifier(identifier: &str) -> String {
    if let Some((local, domain)) = identifier.split_once('@') {
        if let Some(first) = local.chars().next() {
            return format!("{}***@{}", first, domain);
        }
        return format!("***@{}", domain);
    }

    let chars: Vec<char> = identifier.chars().collect();
    if chars.len() <= VISIBLE_SUFFIX {
        return "*".repeat(chars.len());
    }

    let hidden = chars.len() - VISIBLE_SUFFIX;
    let suffix: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), suffix)
}

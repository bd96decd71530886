//! Input checks for guest contact details.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidateEmail;

lazy_static! {
    // +7 (123) 456-7890, 71234567890, 123.456.7890, ...
    static ref PHONE_RE: Option<Regex> =
        Regex::new(r"^\+?7?\s?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").ok();
}

/// Accepts `local@domain.tld`: an address `validator` accepts whose domain
/// also has a dot with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Accepts Kazakhstan style phone numbers such as `+7 (123) 456-7890`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.as_ref().is_some_and(|re| re.is_match(phone))
}

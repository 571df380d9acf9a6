//! Built-in shape predicates.
//!
//! Structural checks only: "looks like an email" rather than "is a
//! deliverable address". All predicates are pure and never panic.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// `local@domain.tld`: one `@`, no whitespace, a dot-separated domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Symbols accepted as the "special character" of a strong password.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum password length for [`is_strong_password`].
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum digit count for [`is_phone_shape`].
pub const MIN_PHONE_DIGITS: usize = 10;

pub fn is_email_shape(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Whether `value` parses as an absolute URL with a host.
///
/// Hostless schemes such as `mailto:` or `javascript:` are rejected.
pub fn is_url_shape(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| url.has_host())
}

/// Digits, spaces, `+`, `-` and parentheses only, with at least
/// [`MIN_PHONE_DIGITS`] digits.
pub fn is_phone_shape(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= MIN_PHONE_DIGITS
}

/// At least [`MIN_PASSWORD_LENGTH`] characters with a lowercase letter, an
/// uppercase letter, a digit and one of [`PASSWORD_SYMBOLS`].
pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LENGTH
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

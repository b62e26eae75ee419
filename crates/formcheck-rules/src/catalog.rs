//! Rule catalog
//!
//! Constructors for the rules a sign-up style form needs. Every constructor
//! is pure; the returned [`Rule`] carries its own failure message.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::Rule;

/// Label used by length rules when the caller has no better name
pub const DEFAULT_LABEL: &str = "Field";

/// Characters accepted as "special" by the password rule and scorer
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PASSWORD_MESSAGE: &str = "Password must contain at least 8 characters, including uppercase, lowercase, number, and special character";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const URL_MESSAGE: &str = "Please enter a valid URL";

const PASSWORD_MIN_LENGTH: usize = 8;

// Single @, non-empty local part, dot somewhere after the @
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// Optional leading +, then 10 or more digits, spaces, hyphens or parentheses
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern compiles"));

/// Valid iff the trimmed value is non-empty
///
/// Trimming follows [`str::trim`], so U+FEFF counts as content.
pub fn required(label: &str) -> Rule {
    Rule::new(format!("{} is required", label), |value| {
        !value.trim().is_empty()
    })
}

/// Valid iff the value has at least `min` characters
///
/// Characters are Unicode scalar values: "😀" is one character, not two
/// UTF-16 units.
pub fn min_length(min: usize, label: &str) -> Rule {
    Rule::new(
        format!("{} must be at least {} characters long", label, min),
        move |value| value.chars().count() >= min,
    )
}

/// Valid iff the value has at most `max` characters, counted as in
/// [`min_length`]
pub fn max_length(max: usize, label: &str) -> Rule {
    Rule::new(
        format!("{} must be no more than {} characters long", label, max),
        move |value| value.chars().count() <= max,
    )
}

/// Basic `local@domain.tld` shape check, not full RFC 5322
pub fn email() -> Rule {
    Rule::new(EMAIL_MESSAGE, is_valid_email)
}

/// Lowercase, uppercase, digit and special character, 8+ long, nothing else
pub fn password() -> Rule {
    Rule::new(PASSWORD_MESSAGE, is_valid_password)
}

pub fn phone() -> Rule {
    Rule::new(PHONE_MESSAGE, is_valid_phone)
}

/// Empty passes (optional field); anything else must parse as an absolute URL
pub fn url() -> Rule {
    Rule::new(URL_MESSAGE, |value| value.is_empty() || is_valid_url(value))
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

pub fn is_valid_url(value: &str) -> bool {
    ::url::Url::parse(value).is_ok()
}

pub fn is_password_special(c: char) -> bool {
    PASSWORD_SPECIALS.contains(c)
}

/// Whole-string check: only letters, digits and the special set are allowed
pub fn is_valid_password(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_password_special(c));

    allowed
        && value.chars().count() >= PASSWORD_MIN_LENGTH
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(is_password_special)
}

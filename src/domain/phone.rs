//! Phone value object and input formatting.

use serde::{Serialize, Serializer};
use std::fmt;

/// Text recorded when the submitter leaves the phone field empty.
pub const PHONE_PLACEHOLDER: &str = "Не указан";

/// The submitter's phone number as typed.
///
/// Unlike the other fields the phone is never rejected: any text is kept
/// verbatim, and a blank field becomes [`PHONE_PLACEHOLDER`].
///
/// # Example
///
/// ```
/// use dve_contact_form::domain::Phone;
///
/// assert_eq!(Phone::from_input(None).as_str(), "Не указан");
/// assert_eq!(Phone::from_input(Some("+7 999 123 4567")).as_str(), "+7 999 123 4567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Build a Phone from an optional raw field value.
    pub fn from_input(phone: Option<&str>) -> Self {
        match phone.map(str::trim) {
            Some(value) if !value.is_empty() => Self(value.to_string()),
            _ => Self(PHONE_PLACEHOLDER.to_string()),
        }
    }

    /// Whether the submitter left the field empty.
    pub fn is_placeholder(&self) -> bool {
        self.0 == PHONE_PLACEHOLDER
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

impl Serialize for Phone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reformat partially typed input as a Russian number, `+7 (XXX) XXX-XX-XX`.
///
/// Non-digits are dropped and a leading country/trunk digit (`7` or `8`) is
/// replaced by `+7`. Digits past the tenth are discarded. Called on every
/// keystroke, so partial numbers produce partial masks.
pub fn format_phone_input(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.as_bytes().first() {
        Some(b'7') | Some(b'8') => &digits[1..],
        _ => digits.as_str(),
    };

    let len = digits.len();
    match len {
        0 => String::new(),
        1..=3 => format!("+7 ({}", digits),
        4..=6 => format!("+7 ({}) {}", &digits[..3], &digits[3..]),
        7..=8 => format!("+7 ({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "+7 ({}) {}-{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..8],
            &digits[8..len.min(10)]
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_kept_verbatim() {
        let phone = Phone::from_input(Some("+7 999 123 4567"));
        assert_eq!(phone.as_str(), "+7 999 123 4567");
        assert!(!phone.is_placeholder());
    }

    #[test]
    fn test_phone_never_rejected() {
        let phone = Phone::from_input(Some("call me maybe"));
        assert_eq!(phone.as_str(), "call me maybe");
    }

    #[test]
    fn test_phone_placeholder_for_missing_or_blank() {
        assert!(Phone::from_input(None).is_placeholder());
        assert!(Phone::from_input(Some("")).is_placeholder());
        assert!(Phone::from_input(Some("   ")).is_placeholder());
    }

    #[test]
    fn test_phone_digits_only() {
        let phone = Phone::from_input(Some("+7 (999) 123-45-67"));
        assert_eq!(phone.digits_only(), "79991234567");
    }

    #[test]
    fn test_format_phone_input_progressive() {
        assert_eq!(format_phone_input(""), "");
        assert_eq!(format_phone_input("9"), "+7 (9");
        assert_eq!(format_phone_input("999"), "+7 (999");
        assert_eq!(format_phone_input("99912"), "+7 (999) 12");
        assert_eq!(format_phone_input("9991234"), "+7 (999) 123-4");
        assert_eq!(format_phone_input("999123456"), "+7 (999) 123-45-6");
        assert_eq!(format_phone_input("9991234567"), "+7 (999) 123-45-67");
    }

    #[test]
    fn test_format_phone_input_strips_country_code() {
        assert_eq!(format_phone_input("+7 999 123 4567"), "+7 (999) 123-45-67");
        assert_eq!(format_phone_input("8 (999) 123-45-67"), "+7 (999) 123-45-67");
        assert_eq!(format_phone_input("7"), "");
    }

    #[test]
    fn test_format_phone_input_truncates_extra_digits() {
        assert_eq!(format_phone_input("999123456789"), "+7 (999) 123-45-67");
    }

    #[test]
    fn test_format_phone_input_is_stable_on_formatted_text() {
        let once = format_phone_input("9991234567");
        assert_eq!(format_phone_input(&once), once);
    }
}

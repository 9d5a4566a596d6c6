//! Email address value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A syntactically valid email address.
///
/// Only the shape is checked: a local part, a single '@', a domain containing
/// a dot, and no whitespace anywhere. Deliverability is the provider's problem.
///
/// # Example
///
/// ```
/// use dentobridge_leads::domain::EmailAddress;
///
/// let email = EmailAddress::new("contact@dentobridge.com").unwrap();
/// assert_eq!(email.as_str(), "contact@dentobridge.com");
/// assert!(!EmailAddress::is_valid("contact@dentobridge"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    ///
    /// `ValidationError::InvalidEmail` when [`is_valid`](Self::is_valid) fails.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        if Self::is_valid(&email) {
            Ok(Self(email))
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }

    /// Check a candidate without allocating. Surrounding whitespace fails.
    pub fn is_valid(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

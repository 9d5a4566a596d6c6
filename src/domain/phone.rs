//! PhoneNumber value object.

use super::errors::ValidationError;

/// A French national phone number: exactly ten ASCII digits, no formatting.
///
/// # Example
///
/// ```
/// use dentobridge_leads::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("0612345678").unwrap();
/// assert_eq!(phone.as_str(), "0612345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits a phone number must have.
    pub const DIGITS: usize = 10;

    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` unless the input is exactly
    /// [`PhoneNumber::DIGITS`] ASCII digits.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !Self::is_valid(&phone) {
            return Err(ValidationError::InvalidPhone);
        }

        Ok(Self(phone))
    }

    /// Check a candidate without allocating.
    pub fn is_valid(phone: &str) -> bool {
        phone.len() == Self::DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

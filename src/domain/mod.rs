//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the values a lead carries:
//! email addresses, phone numbers, the contact subject taxonomy and the
//! pricing package tiers. Value objects validate at construction time.

pub mod email;
pub mod errors;
pub mod package;
pub mod phone;
pub mod subject;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use package::PackageTier;
pub use phone::PhoneNumber;
pub use subject::ContactSubject;

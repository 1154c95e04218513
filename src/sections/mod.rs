//! Password validation sections
//!
//! Each section checks one constraint of a [`Configuration`](crate::Configuration).

mod classes;
mod length;

pub use classes::{lowercase_section, number_section, special_section, uppercase_section};
pub use length::{exact_length_section, length_bounds_section};

/// Result type for section check functions.
/// - `Some(reason)` - Section failed with reason
/// - `None` - Section passed
pub type SectionResult = Option<String>;

/// Signature shared by every section.
pub type Section = fn(&secrecy::SecretString, &crate::Configuration) -> SectionResult;

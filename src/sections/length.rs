//! Length section - checks password length against the configuration.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::Configuration;

/// Checks that the password length falls within `[minlen, maxlen]`.
///
/// # Returns
/// - `Some(reason)` if password is too short or too long
/// - `None` if password length is within bounds
pub fn length_bounds_section(password: &SecretString, config: &Configuration) -> SectionResult {
    let len = password.expose_secret().chars().count();
    if len < config.minlen {
        return Some(format!(
            "Password must be at least {} characters",
            config.minlen
        ));
    }
    if len > config.maxlen {
        return Some(format!(
            "Password must be at most {} characters",
            config.maxlen
        ));
    }
    None
}

/// Checks that the password is exactly `config.length` characters.
pub fn exact_length_section(password: &SecretString, config: &Configuration) -> SectionResult {
    let len = password.expose_secret().chars().count();
    if len != config.length {
        return Some(format!(
            "Password must be exactly {} characters (got {})",
            config.length, len
        ));
    }
    None
}

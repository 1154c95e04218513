//! Password validator - runs every section against a configuration.

use secrecy::SecretString;

use crate::config::{ConfigError, Configuration};
use crate::sections::{
    exact_length_section, length_bounds_section, lowercase_section, number_section, Section,
    special_section, uppercase_section,
};

/// How the length of a candidate is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthRule {
    /// Free-form candidate: length must fall within `[minlen, maxlen]`.
    #[default]
    Bounds,
    /// Generation target: length must equal `length`.
    Exact,
}

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    /// One message per unmet constraint, length first, then classes.
    pub violations: Vec<String>,
}

/// Validates a free-form candidate against `config`.
///
/// # Errors
///
/// Returns error only if `config` itself violates its invariants.
pub fn validate(
    password: &SecretString,
    config: &Configuration,
) -> Result<ValidationResult, ConfigError> {
    validate_with(password, config, LengthRule::Bounds)
}

/// Validates `password` against `config` with an explicit length rule.
pub fn validate_with(
    password: &SecretString,
    config: &Configuration,
    rule: LengthRule,
) -> Result<ValidationResult, ConfigError> {
    config.validate()?;

    let length: Section = match rule {
        LengthRule::Bounds => length_bounds_section,
        LengthRule::Exact => exact_length_section,
    };

    // Orchestrator: execute sections in sequence
    let sections: [(&str, Section); 5] = [
        ("length", length),
        ("uppercase", uppercase_section),
        ("lowercase", lowercase_section),
        ("number", number_section),
        ("special", special_section),
    ];

    let mut violations = Vec::new();
    for (_section_name, section_fn) in sections {
        if let Some(reason) = section_fn(password, config) {
            #[cfg(feature = "tracing")]
            tracing::trace!(section = _section_name, "validation section failed");
            violations.push(reason);
        }
    }

    Ok(ValidationResult {
        valid: violations.is_empty(),
        violations,
    })
}

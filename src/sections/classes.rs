//! Character class sections - check per-class minimum counts.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::charset::{CharClass, ClassCounts};
use crate::Configuration;

fn describe(class: CharClass, count: usize) -> &'static str {
    match (class, count == 1) {
        (CharClass::Uppercase, true) => "uppercase letter",
        (CharClass::Uppercase, false) => "uppercase letters",
        (CharClass::Lowercase, true) => "lowercase letter",
        (CharClass::Lowercase, false) => "lowercase letters",
        (CharClass::Number, true) => "number",
        (CharClass::Number, false) => "numbers",
        (CharClass::Special, true) => "special character",
        (CharClass::Special, false) => "special characters",
    }
}

/// Checks that `class` appears at least `required` times.
fn class_minimum(password: &SecretString, class: CharClass, required: usize) -> SectionResult {
    let found = ClassCounts::tally(password.expose_secret()).get(class);
    if found < required {
        return Some(format!(
            "Password must contain at least {} {} (found {})",
            required,
            describe(class, required),
            found
        ));
    }
    None
}

pub fn uppercase_section(password: &SecretString, config: &Configuration) -> SectionResult {
    class_minimum(password, CharClass::Uppercase, config.minuchars)
}

pub fn lowercase_section(password: &SecretString, config: &Configuration) -> SectionResult {
    class_minimum(password, CharClass::Lowercase, config.minlchars)
}

pub fn number_section(password: &SecretString, config: &Configuration) -> SectionResult {
    class_minimum(password, CharClass::Number, config.minnumbers)
}

pub fn special_section(password: &SecretString, config: &Configuration) -> SectionResult {
    class_minimum(password, CharClass::Special, config.minschars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_missing_uppercase() {
        let result = uppercase_section(&secret("lowercase123!"), &Configuration::default());
        assert_eq!(
            result,
            Some("Password must contain at least 1 uppercase letter (found 0)".to_string())
        );
    }

    #[test]
    fn test_missing_lowercase() {
        let result = lowercase_section(&secret("UPPERCASE123!"), &Configuration::default());
        assert!(matches!(result, Some(ref r) if r.contains("lowercase")));
    }

    #[test]
    fn test_missing_numbers_plural() {
        let config = Configuration { minnumbers: 3, ..Default::default() };
        let result = number_section(&secret("Abc12!"), &config);
        assert_eq!(
            result,
            Some("Password must contain at least 3 numbers (found 2)".to_string())
        );
    }

    #[test]
    fn test_special_only_counts_registry_members() {
        // '~' and ' ' are not in the special set
        let result = special_section(&secret("Abc 123~"), &Configuration::default());
        assert!(matches!(result, Some(ref r) if r.contains("special")));
        assert_eq!(special_section(&secret("Abc 123?"), &Configuration::default()), None);
    }

    #[test]
    fn test_zero_minimum_always_passes() {
        let config = Configuration { minschars: 0, ..Default::default() };
        assert_eq!(special_section(&secret(""), &config), None);
    }

    #[test]
    fn test_all_categories() {
        let pwd = secret("HasAll123!@#");
        let config = Configuration::default();
        assert_eq!(uppercase_section(&pwd, &config), None);
        assert_eq!(lowercase_section(&pwd, &config), None);
        assert_eq!(number_section(&pwd, &config), None);
        assert_eq!(special_section(&pwd, &config), None);
    }
}

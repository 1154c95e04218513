//! Configuration resolution.
//!
//! A [`Configuration`] is built from three layers, lowest priority first:
//!
//! 1. Built-in defaults ([`Configuration::default`])
//! 2. Environment variables (`PWDGEN_LENGTH`, `PWDGEN_MINLEN`, ...)
//! 3. Explicit caller overrides
//!
//! Each layer is a [`ConfigOverrides`] value. A field set in a layer replaces
//! the value from every layer below it. Resolution never mutates global state.

use std::fmt;
use thiserror::Error;

/// Prefix shared by every recognized environment variable.
pub const ENV_PREFIX: &str = "PWDGEN_";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field}: '{value}' is not a valid integer")]
    InvalidInteger { field: Field, value: String },
    #[error("{field}: value {value} must not be negative")]
    Negative { field: Field, value: i64 },
    #[error("Unknown configuration field: {0}")]
    UnknownField(String),
    #[error("minlen ({minlen}) cannot be greater than maxlen ({maxlen})")]
    MinLenExceedsMaxLen { minlen: usize, maxlen: usize },
    #[error("length ({length}) is below minlen ({minlen})")]
    LengthBelowMin { length: usize, minlen: usize },
    #[error("length ({length}) exceeds maxlen ({maxlen})")]
    LengthAboveMax { length: usize, maxlen: usize },
    #[error("character minimums require {required} characters but length is {length}")]
    MinimaExceedLength { required: usize, length: usize },
}

/// One configurable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Length,
    MinLen,
    MaxLen,
    MinUChars,
    MinLChars,
    MinNumbers,
    MinSChars,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Length,
        Field::MinLen,
        Field::MaxLen,
        Field::MinUChars,
        Field::MinLChars,
        Field::MinNumbers,
        Field::MinSChars,
    ];

    /// Key used in override mappings.
    pub fn name(self) -> &'static str {
        match self {
            Field::Length => "length",
            Field::MinLen => "minlen",
            Field::MaxLen => "maxlen",
            Field::MinUChars => "minuchars",
            Field::MinLChars => "minlchars",
            Field::MinNumbers => "minnumbers",
            Field::MinSChars => "minschars",
        }
    }

    /// Environment variable bound to this field.
    pub fn env_var(self) -> &'static str {
        match self {
            Field::Length => "PWDGEN_LENGTH",
            Field::MinLen => "PWDGEN_MINLEN",
            Field::MaxLen => "PWDGEN_MAXLEN",
            Field::MinUChars => "PWDGEN_MINUCHARS",
            Field::MinLChars => "PWDGEN_MINLCHARS",
            Field::MinNumbers => "PWDGEN_MINNUMBERS",
            Field::MinSChars => "PWDGEN_MINSCHARS",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn from_env_var(var: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.env_var() == var)
    }

    /// Parses a decimal integer for this field, rejecting negatives.
    pub fn parse(self, raw: &str) -> Result<usize, ConfigError> {
        let trimmed = raw.trim();
        let value: i64 = trimmed.parse().map_err(|_| ConfigError::InvalidInteger {
            field: self,
            value: raw.to_string(),
        })?;
        if value < 0 {
            return Err(ConfigError::Negative { field: self, value });
        }
        usize::try_from(value).map_err(|_| ConfigError::InvalidInteger {
            field: self,
            value: raw.to_string(),
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved password constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub length: usize,
    pub minlen: usize,
    pub maxlen: usize,
    pub minuchars: usize,
    pub minlchars: usize,
    pub minnumbers: usize,
    pub minschars: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            length: 12,
            minlen: 6,
            maxlen: 128,
            minuchars: 1,
            minlchars: 1,
            minnumbers: 1,
            minschars: 1,
        }
    }
}

impl Configuration {
    pub fn get(&self, field: Field) -> usize {
        match field {
            Field::Length => self.length,
            Field::MinLen => self.minlen,
            Field::MaxLen => self.maxlen,
            Field::MinUChars => self.minuchars,
            Field::MinLChars => self.minlchars,
            Field::MinNumbers => self.minnumbers,
            Field::MinSChars => self.minschars,
        }
    }

    fn set(&mut self, field: Field, value: usize) {
        match field {
            Field::Length => self.length = value,
            Field::MinLen => self.minlen = value,
            Field::MaxLen => self.maxlen = value,
            Field::MinUChars => self.minuchars = value,
            Field::MinLChars => self.minlchars = value,
            Field::MinNumbers => self.minnumbers = value,
            Field::MinSChars => self.minschars = value,
        }
    }

    /// Sum of all per-class minimums, saturating at `usize::MAX` so an
    /// oversized sum still exceeds every possible length.
    pub fn required_chars(&self) -> usize {
        self.minuchars
            .saturating_add(self.minlchars)
            .saturating_add(self.minnumbers)
            .saturating_add(self.minschars)
    }

    /// Returns a copy with every field set in `overrides` replaced.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Configuration {
        let mut next = *self;
        for field in Field::ALL {
            if let Some(value) = overrides.get(field) {
                next.set(field, value);
            }
        }
        next
    }

    /// Checks the cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minlen > self.maxlen {
            return Err(ConfigError::MinLenExceedsMaxLen {
                minlen: self.minlen,
                maxlen: self.maxlen,
            });
        }
        if self.length < self.minlen {
            return Err(ConfigError::LengthBelowMin {
                length: self.length,
                minlen: self.minlen,
            });
        }
        if self.length > self.maxlen {
            return Err(ConfigError::LengthAboveMax {
                length: self.length,
                maxlen: self.maxlen,
            });
        }
        let required = self.required_chars();
        if required > self.length {
            return Err(ConfigError::MinimaExceedLength {
                required,
                length: self.length,
            });
        }
        Ok(())
    }
}

/// A single override layer. `None` leaves the lower layer's value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub length: Option<usize>,
    pub minlen: Option<usize>,
    pub maxlen: Option<usize>,
    pub minuchars: Option<usize>,
    pub minlchars: Option<usize>,
    pub minnumbers: Option<usize>,
    pub minschars: Option<usize>,
}

impl ConfigOverrides {
    pub fn get(&self, field: Field) -> Option<usize> {
        match field {
            Field::Length => self.length,
            Field::MinLen => self.minlen,
            Field::MaxLen => self.maxlen,
            Field::MinUChars => self.minuchars,
            Field::MinLChars => self.minlchars,
            Field::MinNumbers => self.minnumbers,
            Field::MinSChars => self.minschars,
        }
    }

    pub fn set(&mut self, field: Field, value: usize) -> &mut Self {
        let slot = match field {
            Field::Length => &mut self.length,
            Field::MinLen => &mut self.minlen,
            Field::MaxLen => &mut self.maxlen,
            Field::MinUChars => &mut self.minuchars,
            Field::MinLChars => &mut self.minlchars,
            Field::MinNumbers => &mut self.minnumbers,
            Field::MinSChars => &mut self.minschars,
        };
        *slot = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_none())
    }

    /// Builds a layer from a field-name keyed mapping, e.g. `("minlen", "8")`.
    ///
    /// # Errors
    ///
    /// Returns error if a key is not a known field or a value is not a
    /// non-negative integer.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = ConfigOverrides::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let field =
                Field::from_name(key).ok_or_else(|| ConfigError::UnknownField(key.to_string()))?;
            overrides.set(field, field.parse(value.as_ref())?);
        }
        Ok(overrides)
    }

    /// Builds the environment layer from an arbitrary variable set.
    ///
    /// Only the variables returned by [`Field::env_var`] are read; everything
    /// else, including unknown `PWDGEN_` variables, is ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = ConfigOverrides::default();
        for (name, value) in vars {
            let name = name.as_ref();
            if !name.starts_with(ENV_PREFIX) {
                continue;
            }
            if let Some(field) = Field::from_env_var(name) {
                overrides.set(field, field.parse(value.as_ref())?);
            }
        }
        Ok(overrides)
    }

    /// Builds the environment layer from the process environment.
    ///
    /// # Errors
    ///
    /// A recognized variable whose value is not valid UTF-8 is malformed and
    /// fails like any other unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = Vec::new();
        // vars_os: a non-UTF-8 variable elsewhere in the environment must not panic
        for (name, value) in std::env::vars_os() {
            let Ok(name) = name.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => vars.push((name, value)),
                Err(raw) => {
                    if let Some(field) = Field::from_env_var(&name) {
                        return Err(ConfigError::InvalidInteger {
                            field,
                            value: raw.to_string_lossy().into_owned(),
                        });
                    }
                }
            }
        }
        Self::from_vars(vars)
    }
}

/// Applies `layers` over `base` in order and validates the result.
pub fn resolve_layers(
    base: &Configuration,
    layers: &[&ConfigOverrides],
) -> Result<Configuration, ConfigError> {
    let config = layers
        .iter()
        .fold(*base, |config, layer| config.with_overrides(layer));
    config.validate()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        length = config.length,
        minlen = config.minlen,
        maxlen = config.maxlen,
        required = config.required_chars(),
        "configuration resolved"
    );

    Ok(config)
}

/// Resolves defaults, then the process environment, then `overrides`.
///
/// # Errors
///
/// Returns error if an environment variable cannot be parsed or the merged
/// configuration violates an invariant.
///
/// # Example
///
/// ```rust
/// use pwd_generator::{resolve, ConfigOverrides};
///
/// let overrides = ConfigOverrides { length: Some(20), ..Default::default() };
/// let config = resolve(Some(&overrides)).expect("valid configuration");
/// assert_eq!(config.length, 20);
/// ```
pub fn resolve(overrides: Option<&ConfigOverrides>) -> Result<Configuration, ConfigError> {
    let env = ConfigOverrides::from_env()?;
    let caller = overrides.copied().unwrap_or_default();
    resolve_layers(&Configuration::default(), &[&env, &caller])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: only called from #[serial] tests
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: only called from #[serial] tests
        unsafe { std::env::remove_var(key); }
    }

    fn clear_env() {
        for field in Field::ALL {
            remove_env(field.env_var());
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Configuration::default();
        assert_eq!(config.length, 12);
        assert_eq!(config.minlen, 6);
        assert_eq!(config.maxlen, 128);
        assert_eq!(config.required_chars(), 4);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Field::Length.parse("twelve"),
            Err(ConfigError::InvalidInteger { field: Field::Length, .. })
        ));
        assert!(matches!(
            Field::Length.parse("12.5"),
            Err(ConfigError::InvalidInteger { .. })
        ));
        assert!(matches!(Field::Length.parse(""), Err(ConfigError::InvalidInteger { .. })));
        assert_eq!(
            Field::MinUChars.parse("-1"),
            Err(ConfigError::Negative { field: Field::MinUChars, value: -1 })
        );
        assert_eq!(Field::MaxLen.parse(" 64 "), Ok(64));
    }

    #[test]
    fn test_later_layers_win() {
        let env = ConfigOverrides { length: Some(20), minlen: Some(10), ..Default::default() };
        let caller = ConfigOverrides { length: Some(16), ..Default::default() };

        let config = resolve_layers(&Configuration::default(), &[&env, &caller]).unwrap();
        assert_eq!(config.length, 16);
        assert_eq!(config.minlen, 10);
        assert_eq!(config.maxlen, 128);
    }

    #[test]
    fn test_with_overrides_does_not_touch_base() {
        let base = Configuration::default();
        let next = base.with_overrides(&ConfigOverrides { minschars: Some(0), ..Default::default() });
        assert_eq!(base.minschars, 1);
        assert_eq!(next.minschars, 0);
    }

    #[test]
    fn test_invariants() {
        let base = Configuration::default();

        let c = Configuration { minlen: 20, maxlen: 10, ..base };
        assert_eq!(c.validate(), Err(ConfigError::MinLenExceedsMaxLen { minlen: 20, maxlen: 10 }));

        let c = Configuration { length: 4, ..base };
        assert_eq!(c.validate(), Err(ConfigError::LengthBelowMin { length: 4, minlen: 6 }));

        let c = Configuration { length: 200, ..base };
        assert_eq!(c.validate(), Err(ConfigError::LengthAboveMax { length: 200, maxlen: 128 }));

        let c = Configuration { length: 8, minuchars: 4, minlchars: 4, minnumbers: 1, minschars: 1, ..base };
        assert_eq!(c.validate(), Err(ConfigError::MinimaExceedLength { required: 10, length: 8 }));

        let c = Configuration { length: 10, minuchars: 4, minlchars: 4, minnumbers: 1, minschars: 1, ..base };
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn test_oversized_minimums_exceed_length() {
        let huge = i64::MAX.to_string();
        let overrides = ConfigOverrides::from_pairs([
            ("minuchars", huge.as_str()),
            ("minlchars", huge.as_str()),
            ("minnumbers", "2"),
        ])
        .unwrap();

        let result = resolve_layers(&Configuration::default(), &[&overrides]);
        assert!(matches!(result, Err(ConfigError::MinimaExceedLength { length: 12, .. })));

        let config = Configuration { minuchars: usize::MAX, ..Default::default() };
        assert_eq!(config.required_chars(), usize::MAX);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinimaExceedLength { required: usize::MAX, length: 12 })
        );
    }

    #[test]
    fn test_from_pairs() {
        let overrides = ConfigOverrides::from_pairs([("minlen", "8"), ("maxlen", "12")]).unwrap();
        assert_eq!(overrides.minlen, Some(8));
        assert_eq!(overrides.maxlen, Some(12));
        assert_eq!(overrides.length, None);

        let err = ConfigOverrides::from_pairs([("colour", "blue")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownField("colour".to_string()));
    }

    #[test]
    fn test_from_vars_ignores_unrelated() {
        let overrides = ConfigOverrides::from_vars([
            ("PWD", "/home/user"),
            ("PWDGEN_UNKNOWN", "garbage"),
            ("PWDGEN_MINSCHARS", "3"),
        ])
        .unwrap();
        assert_eq!(overrides, ConfigOverrides { minschars: Some(3), ..Default::default() });
    }

    #[test]
    fn test_from_vars_rejects_malformed() {
        let err = ConfigOverrides::from_vars([("PWDGEN_LENGTH", "abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInteger { field: Field::Length, .. }));
    }

    #[test]
    #[serial]
    fn test_resolve_defaults() {
        clear_env();
        assert_eq!(resolve(None), Ok(Configuration::default()));
    }

    #[test]
    #[serial]
    fn test_resolve_env_maxlen_below_default_length() {
        clear_env();
        set_env("PWDGEN_MAXLEN", "8");

        let result = resolve(None);
        assert_eq!(result, Err(ConfigError::LengthAboveMax { length: 12, maxlen: 8 }));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_resolve_caller_overrides_env() {
        clear_env();
        set_env("PWDGEN_MAXLEN", "8");
        set_env("PWDGEN_MINLEN", "4");

        let caller = ConfigOverrides { length: Some(8), ..Default::default() };
        let config = resolve(Some(&caller)).unwrap();
        assert_eq!(config.length, 8);
        assert_eq!(config.maxlen, 8);
        assert_eq!(config.minlen, 4);

        clear_env();
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_resolve_env_non_utf8_value() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        clear_env();
        // SAFETY: only called from #[serial] tests
        unsafe { std::env::set_var("PWDGEN_MAXLEN", OsStr::from_bytes(b"8\xff")); }

        let result = resolve(None);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidInteger { field: Field::MaxLen, .. })
        ));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_resolve_env_unparsable() {
        clear_env();
        set_env("PWDGEN_MINNUMBERS", "-2");

        let result = resolve(None);
        assert_eq!(result, Err(ConfigError::Negative { field: Field::MinNumbers, value: -2 }));

        clear_env();
    }
}

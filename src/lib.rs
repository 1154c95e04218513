//! Password generation, validation and strength rating
//!
//! This library generates passwords that satisfy per-class character
//! minimums, validates candidates against the same constraints, and rates
//! strength from an entropy estimate.
//!
//! # Features
//!
//! - `async` (default): Enables async rating with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the `pwdgen` binary
//!
//! # Environment Variables
//!
//! Each variable holds a decimal integer and overrides the built-in default:
//!
//! - `PWDGEN_LENGTH` (default: 12)
//! - `PWDGEN_MINLEN` (default: 6), `PWDGEN_MAXLEN` (default: 128)
//! - `PWDGEN_MINUCHARS`, `PWDGEN_MINLCHARS`, `PWDGEN_MINNUMBERS`,
//!   `PWDGEN_MINSCHARS` (default: 1 each)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_generator::{detailed_rating, generate, resolve, validate, ConfigOverrides};
//! use secrecy::ExposeSecret;
//!
//! let overrides = ConfigOverrides { length: Some(16), minschars: Some(2), ..Default::default() };
//! let config = resolve(Some(&overrides)).expect("Invalid configuration");
//!
//! let password = generate(&config).expect("Unsatisfiable configuration");
//! assert!(validate(&password, &config).unwrap().valid);
//!
//! let rating = detailed_rating(&password);
//! println!("{} ({:.1} bits, {})", rating.strength, rating.entropy, rating.crack_time_formatted);
//! # let _ = password.expose_secret();
//! ```

// Internal modules
mod charset;
mod config;
mod error;
mod generator;
mod rating;
mod sections;
mod validator;

#[cfg(feature = "cli")]
pub mod cli;

// Public API
pub use charset::{
    all_chars, is_shell_sensitive, CharClass, ClassCounts, DIGITS, LOWERCASE, SPECIAL, UPPERCASE,
};
pub use config::{
    resolve, resolve_layers, ConfigError, ConfigOverrides, Configuration, Field, ENV_PREFIX,
};
pub use error::{Error, Result};
pub use generator::{generate, generate_batch, generate_with, GenerationError};
pub use rating::{
    detailed_rating, detailed_rating_with, entropy_bits, format_crack_time, rating, rating_with,
    RatingPolicy, RatingResult, Strength,
};
pub use validator::{validate, validate_with, LengthRule, ValidationResult};

#[cfg(feature = "async")]
pub use rating::detailed_rating_tx;

pub use secrecy::{ExposeSecret, SecretString};

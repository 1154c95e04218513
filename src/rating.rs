//! Password strength rating based on entropy estimation.
//!
//! The character-set size counts only the classes a password actually uses:
//! an all-lowercase password draws from 26 characters, not from the whole
//! alphabet. Entropy is `length * log2(character_set_size)`.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::charset::{CharClass, ClassCounts};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.25 * DAY;

/// Ordered strength labels, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    Weak,
    Fair,
    Strong,
    Excellent,
}

impl Strength {
    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Fair => "fair",
            Strength::Strong => "strong",
            Strength::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy constants for rating: label cutoffs in bits (inclusive lower
/// bounds) and the attacker's guess rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingPolicy {
    pub fair_bits: f64,
    pub strong_bits: f64,
    pub excellent_bits: f64,
    pub guesses_per_second: f64,
}

impl RatingPolicy {
    pub const DEFAULT: RatingPolicy = RatingPolicy {
        fair_bits: 36.0,
        strong_bits: 60.0,
        excellent_bits: 128.0,
        guesses_per_second: 1e10,
    };

    /// Maps entropy bits to a label.
    pub fn strength(&self, entropy: f64) -> Strength {
        if entropy >= self.excellent_bits {
            Strength::Excellent
        } else if entropy >= self.strong_bits {
            Strength::Strong
        } else if entropy >= self.fair_bits {
            Strength::Fair
        } else {
            Strength::Weak
        }
    }

    /// Average-case seconds to exhaust half of `2^entropy` guesses.
    pub fn crack_time_seconds(&self, entropy: f64) -> f64 {
        2f64.powf(entropy - 1.0) / self.guesses_per_second
    }
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Detailed rating of a single password.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingResult {
    pub entropy: f64,
    pub strength: Strength,
    pub character_set_size: usize,
    /// Length in characters.
    pub length: usize,
    /// Classes present in the password.
    pub classes: Vec<CharClass>,
    pub crack_time_seconds: f64,
    pub crack_time_formatted: String,
}

/// Entropy in bits for `length` characters drawn from `charset_size`.
pub fn entropy_bits(length: usize, charset_size: usize) -> f64 {
    if charset_size == 0 {
        return 0.0;
    }
    length as f64 * (charset_size as f64).log2()
}

/// Formats a duration in the largest unit that keeps the value at or above one.
pub fn format_crack_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "effectively forever".to_string();
    }
    if seconds < 1.0 {
        return "less than a second".to_string();
    }
    if seconds < MINUTE {
        return format!("{:.1} seconds", seconds);
    }
    if seconds < HOUR {
        return format!("{:.1} minutes", seconds / MINUTE);
    }
    if seconds < DAY {
        return format!("{:.1} hours", seconds / HOUR);
    }
    if seconds < YEAR {
        return format!("{:.1} days", seconds / DAY);
    }
    let years = seconds / YEAR;
    if years < 1000.0 {
        format!("{:.1} years", years)
    } else {
        format!("{:.2e} years", years)
    }
}

/// Rates `password` with an explicit policy.
pub fn detailed_rating_with(password: &SecretString, policy: &RatingPolicy) -> RatingResult {
    let pwd = password.expose_secret();
    let counts = ClassCounts::tally(pwd);
    let classes = counts.present();
    let character_set_size: usize = classes.iter().map(|c| c.size()).sum();
    let length = pwd.chars().count();

    let entropy = entropy_bits(length, character_set_size);
    let crack_time_seconds = policy.crack_time_seconds(entropy);

    #[cfg(feature = "tracing")]
    tracing::trace!(entropy, character_set_size, "password rated");

    RatingResult {
        entropy,
        strength: policy.strength(entropy),
        character_set_size,
        length,
        classes,
        crack_time_seconds,
        crack_time_formatted: format_crack_time(crack_time_seconds),
    }
}

/// Rates `password` with [`RatingPolicy::DEFAULT`].
///
/// # Example
///
/// ```rust
/// use pwd_generator::{detailed_rating, Strength};
/// use secrecy::SecretString;
///
/// let result = detailed_rating(&SecretString::new("password".to_string().into()));
/// assert_eq!(result.character_set_size, 26);
/// assert_eq!(result.strength, Strength::Fair);
/// ```
pub fn detailed_rating(password: &SecretString) -> RatingResult {
    detailed_rating_with(password, &RatingPolicy::DEFAULT)
}

pub fn rating_with(password: &SecretString, policy: &RatingPolicy) -> Strength {
    detailed_rating_with(password, policy).strength
}

/// Strength label of `password` under the default policy.
pub fn rating(password: &SecretString) -> Strength {
    rating_with(password, &RatingPolicy::DEFAULT)
}

/// Async version that sends the rating via channel.
///
/// Nothing is sent if `token` is already cancelled.
#[cfg(feature = "async")]
pub async fn detailed_rating_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<RatingResult>,
) {
    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::debug!("rating cancelled before start");
        return;
    }

    let result = detailed_rating(password);

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password rating result: {}", _e);
    }
}

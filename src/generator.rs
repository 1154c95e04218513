//! Password generator - constraint-satisfying generation.
//!
//! Generation runs in two phases followed by a permutation:
//!
//! 1. [`draw_minima`] draws exactly the configured minimum from each class.
//! 2. [`fill_remainder`] tops the draft up to the target length from the
//!    combined alphabet.
//! 3. [`shuffle`] applies a uniform Fisher-Yates permutation, so the
//!    class-grouped characters from the first phase land in random positions.
//!
//! Every draw and the shuffle use the same cryptographically secure RNG.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use secrecy::SecretString;
use thiserror::Error;
use zeroize::Zeroize;

use crate::charset::{all_chars, CharClass, ClassCounts};
use crate::config::Configuration;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("cannot satisfy character minimums: {required} characters required but length is {length}")]
    Unsatisfiable { required: usize, length: usize },
}

/// Draft of a password under construction. Wiped on drop.
#[derive(Default)]
pub(crate) struct GeneratedPassword {
    chars: Vec<char>,
    counts: ClassCounts,
}

impl GeneratedPassword {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            counts: ClassCounts::default(),
        }
    }

    fn push(&mut self, ch: char) {
        self.counts.record(ch);
        self.chars.push(ch);
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    #[cfg(test)]
    pub(crate) fn counts(&self) -> &ClassCounts {
        &self.counts
    }

    fn satisfies(&self, config: &Configuration) -> bool {
        CharClass::ALL
            .into_iter()
            .all(|class| self.counts.get(class) >= minimum(config, class))
    }

    #[cfg(test)]
    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }

    fn into_secret(self) -> SecretString {
        // ASCII only: one byte per char, so the boxed str never reallocates
        let mut password = String::with_capacity(self.chars.len());
        password.extend(self.chars.iter());
        SecretString::new(password.into_boxed_str())
    }
}

impl Drop for GeneratedPassword {
    fn drop(&mut self) {
        self.chars.zeroize();
    }
}

fn minimum(config: &Configuration, class: CharClass) -> usize {
    match class {
        CharClass::Uppercase => config.minuchars,
        CharClass::Lowercase => config.minlchars,
        CharClass::Number => config.minnumbers,
        CharClass::Special => config.minschars,
    }
}

fn draw<R: Rng + CryptoRng>(set: &[char], rng: &mut R) -> char {
    set[rng.random_range(0..set.len())]
}

/// Phase one: exactly `min*` characters from each class, grouped by class.
pub(crate) fn draw_minima<R: Rng + CryptoRng>(
    config: &Configuration,
    rng: &mut R,
) -> GeneratedPassword {
    let mut draft = GeneratedPassword::with_capacity(config.length);
    for class in CharClass::ALL {
        let set = class.chars();
        for _ in 0..minimum(config, class) {
            draft.push(draw(set, rng));
        }
    }
    draft
}

/// Phase two: independent uniform draws from the combined alphabet until the
/// draft reaches `length`. A draft already at or past `length` is returned as is.
pub(crate) fn fill_remainder<R: Rng + CryptoRng>(
    mut draft: GeneratedPassword,
    length: usize,
    rng: &mut R,
) -> GeneratedPassword {
    let alphabet = all_chars();
    while draft.len() < length {
        draft.push(draw(alphabet, rng));
    }
    draft
}

/// Uniform random permutation of the draft.
pub(crate) fn shuffle<R: Rng + CryptoRng>(
    mut draft: GeneratedPassword,
    rng: &mut R,
) -> GeneratedPassword {
    draft.chars.shuffle(rng);
    draft
}

/// Generates a password with the supplied RNG.
///
/// # Errors
///
/// Returns [`GenerationError::Unsatisfiable`] if the per-class minimums add up
/// to more than `config.length`. Minimums are never shrunk to fit.
pub fn generate_with<R: Rng + CryptoRng>(
    config: &Configuration,
    rng: &mut R,
) -> Result<SecretString, GenerationError> {
    let required = config.required_chars();
    if config.length < required {
        #[cfg(feature = "tracing")]
        tracing::debug!(required, length = config.length, "generation rejected");
        return Err(GenerationError::Unsatisfiable {
            required,
            length: config.length,
        });
    }

    let draft = draw_minima(config, rng);
    let draft = fill_remainder(draft, config.length, rng);
    let draft = shuffle(draft, rng);
    debug_assert!(draft.len() == config.length && draft.satisfies(config));

    #[cfg(feature = "tracing")]
    tracing::trace!(
        length = draft.len(),
        fixed = required,
        filler = draft.len() - required,
        "password generated"
    );

    Ok(draft.into_secret())
}

/// Generates a password using the thread-local CSPRNG.
///
/// # Example
///
/// ```rust
/// use pwd_generator::{generate, Configuration};
/// use secrecy::ExposeSecret;
///
/// let config = Configuration { length: 16, minuchars: 2, minlchars: 2, minnumbers: 2, minschars: 2, ..Default::default() };
/// let password = generate(&config).expect("satisfiable configuration");
/// assert_eq!(password.expose_secret().len(), 16);
/// ```
pub fn generate(config: &Configuration) -> Result<SecretString, GenerationError> {
    generate_with(config, &mut rand::rng())
}

/// Generates `count` independent passwords, stopping at the first error.
pub fn generate_batch(
    config: &Configuration,
    count: usize,
) -> Result<Vec<SecretString>, GenerationError> {
    let mut rng = rand::rng();
    (0..count).map(|_| generate_with(config, &mut rng)).collect()
}

//! Character set registry.
//!
//! Defines the four character classes used by the generator, the validator
//! and the rating engine. All sets are static and never change at runtime.

use std::fmt;
use std::sync::LazyLock;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Special characters that carry meaning for a POSIX shell (globbing,
/// expansion, redirection, job control, history).
const SHELL_SENSITIVE: &str = "!#$&*()[]{}|;<>?^";

static UPPERCASE_CHARS: LazyLock<Vec<char>> = LazyLock::new(|| UPPERCASE.chars().collect());
static LOWERCASE_CHARS: LazyLock<Vec<char>> = LazyLock::new(|| LOWERCASE.chars().collect());
static DIGIT_CHARS: LazyLock<Vec<char>> = LazyLock::new(|| DIGITS.chars().collect());
static SPECIAL_CHARS: LazyLock<Vec<char>> = LazyLock::new(|| SPECIAL.chars().collect());

static ALL_CHARS: LazyLock<Vec<char>> = LazyLock::new(|| {
    CharClass::ALL
        .iter()
        .flat_map(|class| class.chars().iter().copied())
        .collect()
});

/// A named category of characters with a fixed membership set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Number,
    Special,
}

impl CharClass {
    /// Every class, in the order violations and counts are reported.
    pub const ALL: [CharClass; 4] = [
        CharClass::Uppercase,
        CharClass::Lowercase,
        CharClass::Number,
        CharClass::Special,
    ];

    /// Member characters of this class.
    pub fn chars(self) -> &'static [char] {
        match self {
            CharClass::Uppercase => UPPERCASE_CHARS.as_slice(),
            CharClass::Lowercase => LOWERCASE_CHARS.as_slice(),
            CharClass::Number => DIGIT_CHARS.as_slice(),
            CharClass::Special => SPECIAL_CHARS.as_slice(),
        }
    }

    pub fn size(self) -> usize {
        self.chars().len()
    }

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Uppercase => "uppercase",
            CharClass::Lowercase => "lowercase",
            CharClass::Number => "number",
            CharClass::Special => "special",
        }
    }

    /// Whether every member can be passed unquoted as a shell argument.
    pub fn is_shell_safe(self) -> bool {
        !matches!(self, CharClass::Special)
    }

    pub fn contains(self, ch: char) -> bool {
        match self {
            CharClass::Uppercase => ch.is_ascii_uppercase(),
            CharClass::Lowercase => ch.is_ascii_lowercase(),
            CharClass::Number => ch.is_ascii_digit(),
            CharClass::Special => SPECIAL.contains(ch),
        }
    }

    /// Returns the class `ch` belongs to, if any.
    pub fn of(ch: char) -> Option<CharClass> {
        CharClass::ALL.into_iter().find(|class| class.contains(ch))
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Union of all four classes.
pub fn all_chars() -> &'static [char] {
    ALL_CHARS.as_slice()
}

/// Returns `true` if `ch` has a special meaning to the shell.
pub fn is_shell_sensitive(ch: char) -> bool {
    SHELL_SENSITIVE.contains(ch)
}

/// Per-class character tally of a sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub uppercase: usize,
    pub lowercase: usize,
    pub number: usize,
    pub special: usize,
    /// Characters outside every class.
    pub other: usize,
}

impl ClassCounts {
    pub fn tally(password: &str) -> Self {
        let mut counts = ClassCounts::default();
        for ch in password.chars() {
            counts.record(ch);
        }
        counts
    }

    pub fn record(&mut self, ch: char) {
        match CharClass::of(ch) {
            Some(class) => *self.get_mut(class) += 1,
            None => self.other += 1,
        }
    }

    pub fn get(&self, class: CharClass) -> usize {
        match class {
            CharClass::Uppercase => self.uppercase,
            CharClass::Lowercase => self.lowercase,
            CharClass::Number => self.number,
            CharClass::Special => self.special,
        }
    }

    fn get_mut(&mut self, class: CharClass) -> &mut usize {
        match class {
            CharClass::Uppercase => &mut self.uppercase,
            CharClass::Lowercase => &mut self.lowercase,
            CharClass::Number => &mut self.number,
            CharClass::Special => &mut self.special,
        }
    }

    /// Classes with at least one character.
    pub fn present(&self) -> Vec<CharClass> {
        CharClass::ALL
            .into_iter()
            .filter(|class| self.get(*class) > 0)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.uppercase + self.lowercase + self.number + self.special + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_class_sizes() {
        assert_eq!(CharClass::Uppercase.size(), 26);
        assert_eq!(CharClass::Lowercase.size(), 26);
        assert_eq!(CharClass::Number.size(), 10);
        assert_eq!(CharClass::Special.size(), 26);
    }

    #[test]
    fn test_all_chars_is_disjoint_union() {
        let unique: HashSet<char> = all_chars().iter().copied().collect();
        let expected: usize = CharClass::ALL.iter().map(|c| c.size()).sum();
        assert_eq!(all_chars().len(), expected);
        assert_eq!(unique.len(), expected);
    }

    #[test]
    fn test_only_special_is_shell_unsafe() {
        assert!(CharClass::Uppercase.is_shell_safe());
        assert!(CharClass::Lowercase.is_shell_safe());
        assert!(CharClass::Number.is_shell_safe());
        assert!(!CharClass::Special.is_shell_safe());
    }

    #[test]
    fn test_shell_sensitive_chars_are_special() {
        for ch in SHELL_SENSITIVE.chars() {
            assert_eq!(CharClass::of(ch), Some(CharClass::Special), "{ch}");
        }
        assert!(is_shell_sensitive('$'));
        assert!(!is_shell_sensitive('_'));
        assert!(!is_shell_sensitive('a'));
    }

    #[test]
    fn test_classify() {
        assert_eq!(CharClass::of('Q'), Some(CharClass::Uppercase));
        assert_eq!(CharClass::of('q'), Some(CharClass::Lowercase));
        assert_eq!(CharClass::of('7'), Some(CharClass::Number));
        assert_eq!(CharClass::of('?'), Some(CharClass::Special));
        assert_eq!(CharClass::of(' '), None);
        assert_eq!(CharClass::of('é'), None);
        assert_eq!(CharClass::of('~'), None);
    }

    #[test]
    fn test_tally() {
        let counts = ClassCounts::tally("aA1!aA1! é");
        assert_eq!(counts.uppercase, 2);
        assert_eq!(counts.lowercase, 2);
        assert_eq!(counts.number, 2);
        assert_eq!(counts.special, 2);
        assert_eq!(counts.other, 2);
        assert_eq!(counts.total(), 10);
        assert_eq!(counts.present(), CharClass::ALL.to_vec());
    }

    #[test]
    fn test_tally_empty() {
        let counts = ClassCounts::tally("");
        assert_eq!(counts, ClassCounts::default());
        assert!(counts.present().is_empty());
    }
}

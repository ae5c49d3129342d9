//! Password analysis sections
//!
//! Each section checks one rule of a policy. Sections run in a fixed
//! order and the first failing one decides the violation.

mod complexity;
mod length;
mod username;
mod words;

pub use complexity::complexity_section;
pub use length::length_section;
pub use username::username_section;
pub use words::{dictionary_section, split_words};

use crate::dictionary::Dictionary;
use crate::policy::PasswordCharacteristics;
use crate::violation::ViolationKind;

/// Result type for section functions.
/// - `Ok(())` - Section passed
/// - `Err(kind)` - Section failed with the given violation
pub type SectionResult = Result<(), ViolationKind>;

/// Per-class character counts of a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub digits: usize,
    pub lower: usize,
    pub upper: usize,
    pub symbols: usize,
    pub unmatched: usize,
}

impl ClassCounts {
    /// Puts every character in exactly one class. Digits win over letter
    /// case, and letter case wins over symbol membership.
    ///
    /// Only ASCII `0`-`9` count as digits. Other numeric characters such as
    /// superscripts or roman numerals fall through to the remaining classes.
    pub fn tally(password: &[char], symbols: &[char]) -> Self {
        let mut counts = Self::default();
        for &ch in password {
            if ch.is_ascii_digit() {
                counts.digits += 1;
            } else if ch.is_lowercase() {
                counts.lower += 1;
            } else if ch.is_uppercase() {
                counts.upper += 1;
            } else if symbols.contains(&ch) {
                counts.symbols += 1;
            } else {
                counts.unmatched += 1;
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.digits + self.lower + self.upper + self.symbols + self.unmatched
    }
}

/// Everything a section may look at.
pub struct SectionInput<'a> {
    pub locale: &'a str,
    pub username: Option<&'a str>,
    pub password: &'a [char],
    pub counts: ClassCounts,
    pub policy: &'a dyn PasswordCharacteristics,
    pub dictionary: Option<&'a dyn Dictionary>,
}

impl<'a> SectionInput<'a> {
    pub fn new(
        locale: &'a str,
        username: Option<&'a str>,
        password: &'a [char],
        policy: &'a dyn PasswordCharacteristics,
    ) -> Self {
        Self {
            locale,
            username,
            password,
            counts: ClassCounts::tally(password, policy.symbols()),
            policy,
            dictionary: None,
        }
    }

    pub fn with_dictionary(mut self, dictionary: Option<&'a dyn Dictionary>) -> Self {
        self.dictionary = dictionary;
        self
    }
}

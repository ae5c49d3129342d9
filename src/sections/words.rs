//! Dictionary section - rejects passwords built around known words.

use super::{SectionInput, SectionResult};
use crate::violation::ViolationKind;

/// Alphabetic runs shorter than this are never looked up.
const MIN_WORD_LEN: usize = 4;

/// Splits a password into its maximal runs of alphabetic characters.
pub fn split_words(password: &[char]) -> Vec<String> {
    password
        .split(|c| !c.is_alphabetic())
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().collect())
        .collect()
}

/// Looks every word of four or more letters up in the dictionary.
///
/// # Returns
/// - `Err(ContainsDictionaryWords)` on the first word the dictionary knows
/// - `Ok(())` if words are allowed, no dictionary is configured, or none match
pub fn dictionary_section(input: &SectionInput<'_>) -> SectionResult {
    if input.policy.dictionary_words_allowed() {
        return Ok(());
    }
    let Some(dictionary) = input.dictionary else {
        return Ok(());
    };

    let found = split_words(input.password)
        .iter()
        .filter(|word| word.chars().count() >= MIN_WORD_LEN)
        .any(|word| dictionary.contains_word(input.locale, word));

    if found {
        return Err(ViolationKind::ContainsDictionaryWords);
    }
    Ok(())
}

//! Password analyser - scores a password and checks it against a policy.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::dictionary::Dictionary;
use crate::policy::PasswordCharacteristics;
use crate::sections::{
    ClassCounts, SectionInput, SectionResult, complexity_section, dictionary_section,
    length_section, username_section,
};
use crate::violation::{AnalysisResult, PolicyViolation};

/// Checks passwords against policies.
///
/// Holds an optional dictionary for the word check. Without one, no word
/// is ever reported. Cloning is cheap.
#[derive(Clone, Default)]
pub struct PasswordAnalyser {
    dictionary: Option<Arc<dyn Dictionary>>,
}

impl fmt::Debug for PasswordAnalyser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordAnalyser")
            .field("dictionary", &self.dictionary.is_some())
            .finish()
    }
}

impl PasswordAnalyser {
    /// Creates an analyser without a dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            dictionary: Some(dictionary),
        }
    }

    /// Scores `password` and checks it against `policy`.
    ///
    /// Checks run in order: length, username, dictionary words, character
    /// classes. The first failing check is returned together with the
    /// strength, which is computed before any check runs.
    ///
    /// # Arguments
    /// * `locale` - Passed through to the dictionary lookup
    /// * `username` - Account name the password must not contain
    /// * `password` - The password to analyse
    /// * `policy` - The policy to check against
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyViolation`] naming the first rule the password
    /// breaks.
    pub fn analyse(
        &self,
        locale: &str,
        username: Option<&str>,
        password: &[char],
        policy: &dyn PasswordCharacteristics,
    ) -> AnalysisResult {
        let input = SectionInput::new(locale, username, password, policy)
            .with_dictionary(self.dictionary.as_deref());
        let strength = strength(&input.counts, policy);

        // Orchestrator: execute sections in sequence
        let sections: [fn(&SectionInput<'_>) -> SectionResult; 4] = [
            length_section,
            username_section,
            dictionary_section,
            complexity_section,
        ];

        for section_fn in sections {
            if let Err(kind) = section_fn(&input) {
                #[cfg(feature = "tracing")]
                tracing::debug!(violation = kind.as_str(), strength, "password rejected by policy");
                return Err(PolicyViolation::new(kind, strength));
            }
        }

        Ok(strength)
    }

    /// Same as [`PasswordAnalyser::analyse`] for a password held in a
    /// [`SecretString`].
    ///
    /// # Errors
    ///
    /// See [`PasswordAnalyser::analyse`].
    pub fn analyse_secret(
        &self,
        locale: &str,
        username: Option<&str>,
        password: &SecretString,
        policy: &dyn PasswordCharacteristics,
    ) -> AnalysisResult {
        let chars: Vec<char> = password.expose_secret().chars().collect();
        self.analyse(locale, username, &chars, policy)
    }
}

/// Strength of a password with the given class counts, in `[0, 1]`.
///
/// The ideal is the minimum size plus every enabled class minimum, scaled
/// by the policy's very strong factor and never below one. Every character
/// counts towards the actual value, including ones outside all classes,
/// and the actual value is capped at the ideal.
pub fn strength(counts: &ClassCounts, policy: &dyn PasswordCharacteristics) -> f32 {
    let minimums: i64 = [
        policy.minimum_digits(),
        policy.minimum_lower(),
        policy.minimum_upper(),
        policy.minimum_symbols(),
    ]
    .into_iter()
    .map(|m| i64::from(m.max(0)))
    .sum();

    let base = (i64::from(policy.minimum_size()) + minimums) as f32;
    let ideal = (base * policy.very_strong_factor().max(0.0)).max(1.0);
    let actual = (counts.total() as f32).min(ideal);

    actual / ideal
}

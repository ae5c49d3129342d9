//! Reasons a password can fail policy analysis.

use std::fmt;
use thiserror::Error;

/// The nine ways a password can violate a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    TooShort,
    TooLong,
    NotEnoughLowerCase,
    NotEnoughUpperCase,
    NotEnoughSymbols,
    NotEnoughDigits,
    ContainsDictionaryWords,
    ContainsUsername,
    DoesNotMatchComplexity,
}

impl ViolationKind {
    /// Stable identifier, suitable for message catalogue lookups.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TooShort => "tooShort",
            Self::TooLong => "tooLong",
            Self::NotEnoughLowerCase => "notEnoughLowerCase",
            Self::NotEnoughUpperCase => "notEnoughUpperCase",
            Self::NotEnoughSymbols => "notEnoughSymbols",
            Self::NotEnoughDigits => "notEnoughDigits",
            Self::ContainsDictionaryWords => "containsDictionaryWords",
            Self::ContainsUsername => "containsUsername",
            Self::DoesNotMatchComplexity => "doesNotMatchComplexity",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed analysis.
///
/// `strength` is the score computed before the failing check ran, so a
/// strength meter can still be drawn for a rejected password.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("password policy violation: {kind} (strength {strength:.2})")]
pub struct PolicyViolation {
    pub kind: ViolationKind,
    pub strength: f32,
}

impl PolicyViolation {
    pub const fn new(kind: ViolationKind, strength: f32) -> Self {
        Self { kind, strength }
    }
}

/// Outcome of analysing one password: its strength, or why it failed.
pub type AnalysisResult = Result<f32, PolicyViolation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_identifiers() {
        assert_eq!(ViolationKind::TooShort.as_str(), "tooShort");
        assert_eq!(
            ViolationKind::ContainsDictionaryWords.to_string(),
            "containsDictionaryWords"
        );
    }

    #[test]
    fn test_violation_display() {
        let violation = PolicyViolation::new(ViolationKind::NotEnoughDigits, 0.25);
        assert_eq!(
            violation.to_string(),
            "password policy violation: notEnoughDigits (strength 0.25)"
        );
    }
}

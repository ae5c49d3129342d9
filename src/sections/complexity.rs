//! Complexity section - checks per-class minimums.

use super::{SectionInput, SectionResult};
use crate::violation::ViolationKind;

/// A class minimum holds when it is disabled (`-1`) or met.
fn satisfied(count: usize, minimum: i32) -> bool {
    minimum == -1 || i64::try_from(count).unwrap_or(i64::MAX) >= i64::from(minimum)
}

/// Checks the character class minimums.
///
/// With `required_matches == 4` the classes are checked in the order
/// digits, lower, upper, symbols and the first shortfall is reported.
/// Otherwise the satisfied classes are counted and compared with
/// `required_matches`. An empty symbol set always satisfies the symbol
/// class.
pub fn complexity_section(input: &SectionInput<'_>) -> SectionResult {
    let policy = input.policy;
    let counts = &input.counts;

    let checks = [
        (
            ViolationKind::NotEnoughDigits,
            satisfied(counts.digits, policy.minimum_digits()),
        ),
        (
            ViolationKind::NotEnoughLowerCase,
            satisfied(counts.lower, policy.minimum_lower()),
        ),
        (
            ViolationKind::NotEnoughUpperCase,
            satisfied(counts.upper, policy.minimum_upper()),
        ),
        (
            ViolationKind::NotEnoughSymbols,
            policy.symbols().is_empty() || satisfied(counts.symbols, policy.minimum_symbols()),
        ),
    ];

    if policy.required_matches() >= 4 {
        if let Some((kind, _)) = checks.iter().find(|(_, ok)| !ok) {
            return Err(*kind);
        }
        return Ok(());
    }

    let matches = checks.iter().filter(|(_, ok)| *ok).count();
    if matches < usize::from(policy.required_matches()) {
        return Err(ViolationKind::DoesNotMatchComplexity);
    }
    Ok(())
}

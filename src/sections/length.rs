//! Length section - checks the password against the policy size bounds.

use super::{SectionInput, SectionResult};
use crate::violation::ViolationKind;

/// Checks the password length.
///
/// # Returns
/// - `Err(TooShort)` if shorter than the minimum size
/// - `Err(TooLong)` if the maximum size is bounded and exceeded
/// - `Ok(())` otherwise
pub fn length_section(input: &SectionInput<'_>) -> SectionResult {
    let len = input.password.len() as i64;
    let minimum = i64::from(input.policy.minimum_size());
    let maximum = i64::from(input.policy.maximum_size());

    if len < minimum {
        return Err(ViolationKind::TooShort);
    }
    if maximum > 0 && len > maximum {
        return Err(ViolationKind::TooLong);
    }
    Ok(())
}

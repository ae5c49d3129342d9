//! Username section - rejects passwords that embed the account name.

use super::{SectionInput, SectionResult};
use crate::violation::ViolationKind;

/// Checks that the password does not contain the username, ignoring case.
///
/// Skipped when no username is known, when it is empty, or when the policy
/// allows it.
pub fn username_section(input: &SectionInput<'_>) -> SectionResult {
    let Some(username) = input.username.filter(|u| !u.is_empty()) else {
        return Ok(());
    };
    if input.policy.contain_username_allowed() {
        return Ok(());
    }

    let password: String = input.password.iter().collect::<String>().to_lowercase();
    if password.contains(&username.to_lowercase()) {
        return Err(ViolationKind::ContainsUsername);
    }
    Ok(())
}

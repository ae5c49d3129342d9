//! Property-based tests for the analyser and generator.
//!
//! These tests use proptest to verify that:
//! - Passwords meeting every rule of a policy are accepted with a strength in (0, 1]
//! - Analysis is deterministic
//! - Generated passwords are always accepted by the analyser, for bounded
//!   and unbounded policies, with or without a username and overrides

use crate::analyser::PasswordAnalyser;
use crate::config::GeneratorConfig;
use crate::generator::PasswordGenerator;
use crate::policy::{PasswordCharacteristics, PolicyModel};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for a class minimum: disabled or a small requirement.
fn arb_minimum() -> impl Strategy<Value = i32> {
    prop_oneof![Just(-1), 0i32..=2]
}

/// Strategy for the maximum size: unbounded (`0` or `-1`), or some
/// headroom above the larger of the minimum size and the class minimums.
fn arb_bound() -> impl Strategy<Value = Result<i32, i32>> {
    prop_oneof![
        prop_oneof![Just(0), Just(-1)].prop_map(Err),
        (0i32..=8).prop_map(Ok),
    ]
}

/// Strategy for satisfiable policies. The minimum size may be below the
/// sum of the class minimums and the maximum may be unbounded.
fn arb_policy() -> impl Strategy<Value = PolicyModel> {
    (
        0i32..=12,
        arb_bound(),
        arb_minimum(),
        arb_minimum(),
        arb_minimum(),
        arb_minimum(),
        1u8..=4,
        prop_oneof![Just(1.0f32), Just(2.0f32), Just(3.5f32)],
    )
        .prop_map(
            |(min, bound, lower, upper, digits, symbols, matches, factor)| {
                let required: i32 = [lower, upper, digits, symbols]
                    .into_iter()
                    .map(|m| m.max(0))
                    .sum();
                let max = match bound {
                    Ok(headroom) => min.max(required).max(1) + headroom,
                    Err(unbounded) => unbounded,
                };
                PolicyModel::new()
                    .with_size(min, max)
                    .with_minimum_lower(lower)
                    .with_minimum_upper(upper)
                    .with_minimum_digits(digits)
                    .with_minimum_symbols(symbols)
                    .with_required_matches(matches)
                    .with_very_strong_factor(factor)
            },
        )
}

/// Strategy for an account name, absent or one the generator rarely hits.
fn arb_username() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(Just("zq"))
}

/// Strategy for generator overrides: headroom above the class minimum for
/// the upper case, digit and symbol maximums (`None` leaves the class
/// unbounded), and an optional order that emits every class.
fn arb_overrides() -> impl Strategy<Value = ([Option<i32>; 3], Option<&'static str>)> {
    (
        prop::array::uniform3(prop::option::of(0i32..=2)),
        prop::option::of(prop::sample::select(vec!["DULS", "ULDS", "LDUS", "SDUL", "uLdS"])),
    )
}

/// Builds a generator configuration consistent with `policy`. Lower case
/// is always left unbounded so the repair loop has a class to append.
fn config_for(
    policy: &PolicyModel,
    headroom: [Option<i32>; 3],
    order: Option<&str>,
) -> GeneratorConfig {
    let [upper, digits, symbols] = headroom;
    let cap = |headroom: Option<i32>, minimum: i32| headroom.map_or(-1, |h| minimum.max(0) + h);
    let mut config = GeneratorConfig::new()
        .with_max_upper(cap(upper, policy.minimum_upper()))
        .with_max_digits(cap(digits, policy.minimum_digits()))
        .with_max_symbols(cap(symbols, policy.minimum_symbols()));

    let total: i32 = [config.max_upper, config.max_digits, config.max_symbols]
        .into_iter()
        .map(|m| m.max(0))
        .sum();
    if policy.maximum_size() > 0 && total > policy.maximum_size() {
        config = GeneratorConfig::new();
    }
    if let Some(order) = order {
        config = config.with_order(order.parse().expect("valid order"));
    }
    config
}

/// Builds a password that meets every class minimum of `policy`, padded
/// with lower case letters to `len` characters.
fn compliant_password(policy: &PolicyModel, len: usize) -> Vec<char> {
    let mut password = Vec::new();
    let repeat = |n: i32| n.max(0) as usize;
    password.extend(std::iter::repeat_n('7', repeat(policy.minimum_digits())));
    password.extend(std::iter::repeat_n('Q', repeat(policy.minimum_upper())));
    password.extend(std::iter::repeat_n('#', repeat(policy.minimum_symbols())));
    password.extend(std::iter::repeat_n('x', repeat(policy.minimum_lower())));
    while password.len() < len {
        password.push('x');
    }
    password
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn compliant_passwords_are_accepted(
        policy in arb_policy(),
        username in arb_username(),
        pad in 1usize..=8,
    ) {
        let mut len = policy.minimum_size().max(0) as usize + pad;
        if policy.maximum_size() > 0 {
            len = len.min(policy.maximum_size() as usize);
        }
        let password = compliant_password(&policy, len);
        let analyser = PasswordAnalyser::new();

        let strength = analyser.analyse("en", username, &password, &policy);
        prop_assert!(strength.is_ok(), "{:?} rejected: {:?}", password, strength);
        let strength = strength.unwrap_or_default();
        prop_assert!(strength > 0.0 && strength <= 1.0, "strength {}", strength);
    }

    #[test]
    fn analysis_is_deterministic(
        policy in arb_policy(),
        username in arb_username(),
        password in "[a-zA-Z0-9#!?]{0,20}",
    ) {
        let chars: Vec<char> = password.chars().collect();
        let analyser = PasswordAnalyser::new();

        let first = analyser.analyse("en", username, &chars, &policy);
        let second = analyser.analyse("en", username, &chars, &policy);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn generated_passwords_are_accepted(
        policy in arb_policy(),
        username in arb_username(),
        (headroom, order) in arb_overrides(),
        seed in any::<u64>(),
    ) {
        let generator = PasswordGenerator::default();
        let config = config_for(&policy, headroom, order);
        let mut rng = StdRng::seed_from_u64(seed);

        let password = generator.generate("en", username, &policy, &config, &mut rng);
        prop_assert!(password.is_ok(), "{:?} {:?}: {:?}", policy, config, password);
        let password = password.unwrap_or_default();
        prop_assert!(!password.is_empty());
        if policy.maximum_size() > 0 {
            prop_assert!(password.len() <= policy.maximum_size() as usize);
        }
        prop_assert!(generator.analyser().analyse("en", username, &password, &policy).is_ok());
    }
}

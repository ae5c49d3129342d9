//! Password generator - builds a password from a policy, then repairs it
//! until the analyser accepts it.

use rand::Rng;
use secrecy::SecretString;
use thiserror::Error;

use crate::analyser::PasswordAnalyser;
use crate::config::{CharClass, ConfigError, Directive, GeneratorConfig, class_minimum};
use crate::policy::PasswordCharacteristics;
use crate::violation::ViolationKind;

/// Upper bound on analyse-and-repair rounds for one password.
pub const MAX_REPAIR_ITERATIONS: u32 = 10_000;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

const DIGITS_FIRST: [Directive; 4] = [
    Directive::Batch(CharClass::Digit),
    Directive::Batch(CharClass::Upper),
    Directive::Batch(CharClass::Lower),
    Directive::Batch(CharClass::Symbol),
];

const UPPER_FIRST: [Directive; 4] = [
    Directive::Batch(CharClass::Upper),
    Directive::Batch(CharClass::Lower),
    Directive::Batch(CharClass::Digit),
    Directive::Batch(CharClass::Symbol),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(
        "password generator gave up after {attempts} repair iterations, \
         the policy is probably unsatisfiable (last violation: {last:?})"
    )]
    Unsatisfiable {
        attempts: u32,
        last: Option<ViolationKind>,
    },
}

/// Generates passwords that satisfy a policy.
#[derive(Debug, Clone, Default)]
pub struct PasswordGenerator {
    analyser: PasswordAnalyser,
}

impl PasswordGenerator {
    pub fn new(analyser: PasswordAnalyser) -> Self {
        Self { analyser }
    }

    pub fn analyser(&self) -> &PasswordAnalyser {
        &self.analyser
    }

    /// Generates a password accepted by `policy`.
    ///
    /// A first draft is built following the configured order (or one of the
    /// two canonical batch orders), then analysed and repaired one character
    /// at a time until the analyser accepts it and it reaches the target
    /// length.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::Config`] if the policy and overrides contradict
    ///   each other; nothing is generated.
    /// - [`GeneratorError::Unsatisfiable`] if no acceptable password was
    ///   found within [`MAX_REPAIR_ITERATIONS`] rounds.
    pub fn generate<R: Rng>(
        &self,
        locale: &str,
        username: Option<&str>,
        policy: &dyn PasswordCharacteristics,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Vec<char>, GeneratorError> {
        config.validate(policy)?;

        let target = target_length(policy, rng);
        let repair = RepairClasses::new(policy, config);
        let mut draft = Draft::new(policy.symbols());

        let directives: &[Directive] = match &config.order {
            Some(order) => order.directives(),
            None if rng.random_bool(0.5) => &DIGITS_FIRST,
            None => &UPPER_FIRST,
        };
        for &directive in directives {
            draft.apply(directive, policy, config, target, rng);
        }

        let mut last = None;
        for _attempt in 1..=MAX_REPAIR_ITERATIONS {
            match self.analyser.analyse(locale, username, &draft.chars, policy) {
                Ok(_strength) if draft.chars.len() >= target => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        attempts = _attempt,
                        length = draft.chars.len(),
                        strength = _strength,
                        "password generated"
                    );
                    return Ok(draft.chars);
                }
                Ok(_) => {
                    last = None;
                    draft.append(&repair, rng);
                }
                Err(violation) => {
                    last = Some(violation.kind);
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        attempt = _attempt,
                        violation = violation.kind.as_str(),
                        length = draft.chars.len(),
                        "repairing generated password"
                    );
                    match violation.kind {
                        ViolationKind::TooLong => draft.remove_random(rng),
                        ViolationKind::TooShort => draft.append(&repair, rng),
                        // appending alone never removes an embedded word
                        ViolationKind::ContainsUsername
                        | ViolationKind::ContainsDictionaryWords => {
                            draft.remove_random(rng);
                            draft.append(&repair, rng);
                        }
                        _ => {
                            if draft.is_full(policy) {
                                draft.remove_random(rng);
                            }
                            draft.append(&repair, rng);
                        }
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::error!(
            attempts = MAX_REPAIR_ITERATIONS,
            last_violation = ?last,
            "password generator is looping, the policy may be unsatisfiable"
        );
        Err(GeneratorError::Unsatisfiable {
            attempts: MAX_REPAIR_ITERATIONS,
            last,
        })
    }

    /// Same as [`PasswordGenerator::generate`], returning the password as a
    /// [`SecretString`].
    ///
    /// # Errors
    ///
    /// See [`PasswordGenerator::generate`].
    pub fn generate_secret<R: Rng>(
        &self,
        locale: &str,
        username: Option<&str>,
        policy: &dyn PasswordCharacteristics,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<SecretString, GeneratorError> {
        let chars = self.generate(locale, username, policy, config, rng)?;
        let password: String = chars.into_iter().collect();
        Ok(SecretString::new(password.into()))
    }
}

/// Picks a length between the policy's bounds, or the minimum when the
/// maximum is unbounded. Never zero.
fn target_length<R: Rng>(policy: &dyn PasswordCharacteristics, rng: &mut R) -> usize {
    let minimum = policy.minimum_size().max(1);
    let maximum = policy.maximum_size();
    if maximum <= 0 {
        return minimum as usize;
    }

    let spread = f64::from((maximum - minimum).max(0));
    let offset = (rng.random::<f64>() * spread).round() as i32;
    (minimum + offset).min(maximum).max(1) as usize
}

/// Number of characters a batch directive emits.
///
/// A maximum of `0` suppresses the class and a negative one means "up to
/// the target length". A minimum of zero or less becomes a tenth of the
/// target length.
fn batch_size<R: Rng>(minimum: i32, maximum: i32, target: usize, rng: &mut R) -> usize {
    if maximum == 0 {
        return 0;
    }

    let target = target as i64;
    let maximum = if maximum < 0 {
        target
    } else {
        i64::from(maximum)
    };
    let floor = if minimum <= 0 {
        (target as f64 * 0.1).round() as i64
    } else {
        i64::from(minimum)
    };

    if floor >= maximum {
        return maximum.max(0) as usize;
    }
    rng.random_range(floor..=maximum) as usize
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !VOWELS.contains(&c.to_ascii_lowercase())
}

/// Classes the repair loop may append, with their relative weights.
struct RepairClasses(Vec<(CharClass, u32)>);

impl RepairClasses {
    fn new(policy: &dyn PasswordCharacteristics, config: &GeneratorConfig) -> Self {
        let classes = CharClass::ALL
            .into_iter()
            .filter(|&class| config.order.as_ref().is_none_or(|o| o.uses(class)))
            .filter(|&class| config.max_for(class) != 0)
            .filter(|&class| class != CharClass::Symbol || !policy.symbols().is_empty())
            .map(|class| {
                let weight = match class {
                    CharClass::Lower => 5,
                    CharClass::Digit | CharClass::Upper | CharClass::Symbol => 1,
                };
                (class, weight)
            })
            .collect();
        Self(classes)
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> Option<CharClass> {
        let total: u32 = self.0.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return None;
        }

        let mut roll = rng.random_range(0..total);
        for &(class, weight) in &self.0 {
            if roll < weight {
                return Some(class);
            }
            roll -= weight;
        }
        None
    }
}

/// Password under construction.
struct Draft<'p> {
    chars: Vec<char>,
    prev: Option<char>,
    symbols: &'p [char],
}

impl<'p> Draft<'p> {
    fn new(symbols: &'p [char]) -> Self {
        Self {
            chars: Vec::new(),
            prev: None,
            symbols,
        }
    }

    fn apply<R: Rng>(
        &mut self,
        directive: Directive,
        policy: &dyn PasswordCharacteristics,
        config: &GeneratorConfig,
        target: usize,
        rng: &mut R,
    ) {
        match directive {
            Directive::Single(class) => self.push(class, rng),
            Directive::Batch(class) => {
                let minimum = class_minimum(policy, class);
                if class == CharClass::Symbol && minimum == -1 {
                    return;
                }
                for _ in 0..batch_size(minimum, config.max_for(class), target, rng) {
                    self.push(class, rng);
                }
            }
        }
    }

    fn push<R: Rng>(&mut self, class: CharClass, rng: &mut R) {
        let ch = match class {
            CharClass::Digit => char::from(b'0' + rng.random_range(0..10u8)),
            CharClass::Upper => char::from(b'A' + rng.random_range(0..26u8)),
            CharClass::Lower => self.next_lower(rng),
            CharClass::Symbol => {
                if self.symbols.is_empty() {
                    return;
                }
                self.symbols[rng.random_range(0..self.symbols.len())]
            }
        };
        self.chars.push(ch);
        self.prev = Some(ch);
    }

    /// A vowel after a consonant, any lower case letter otherwise.
    fn next_lower<R: Rng>(&self, rng: &mut R) -> char {
        if self.prev.is_some_and(is_consonant) {
            VOWELS[rng.random_range(0..VOWELS.len())]
        } else {
            char::from(b'a' + rng.random_range(0..26u8))
        }
    }

    fn append<R: Rng>(&mut self, repair: &RepairClasses, rng: &mut R) {
        if let Some(class) = repair.pick(rng) {
            self.push(class, rng);
        }
    }

    /// Whether the draft is at the policy's maximum size. Never true for
    /// unbounded policies.
    fn is_full(&self, policy: &dyn PasswordCharacteristics) -> bool {
        let maximum = policy.maximum_size();
        maximum > 0 && self.chars.len() as i64 >= i64::from(maximum)
    }

    fn remove_random<R: Rng>(&mut self, rng: &mut R) {
        if !self.chars.is_empty() {
            let index = rng.random_range(0..self.chars.len());
            self.chars.remove(index);
        }
    }
}

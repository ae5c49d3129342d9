//! Generator configuration: per-class maximums and construction order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::policy::PasswordCharacteristics;

/// A policy or generator configuration that can never be satisfied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maximum size {maximum} must be < 1 or >= minimum size {minimum}")]
    MaximumBelowMinimum { minimum: i32, maximum: i32 },
    #[error("total of minimum character class sizes ({total}) exceeds maximum size {maximum}")]
    MinimumsExceedMaximum { total: i64, maximum: i32 },
    #[error("total of maximum character class sizes ({total}) exceeds maximum size {maximum}")]
    MaximumsExceedMaximum { total: i64, maximum: i32 },
    #[error("{class:?} maximum {maximum} is below the policy minimum {minimum}")]
    ClassMaximumBelowMinimum {
        class: CharClass,
        minimum: i32,
        maximum: i32,
    },
    #[error("unknown generation directive '{0}', expected one of u l d s U L D S")]
    InvalidDirective(char),
    #[error("generation order is empty")]
    EmptyOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Digit,
    Lower,
    Upper,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [Self::Digit, Self::Lower, Self::Upper, Self::Symbol];
}

/// One step of a generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Emit exactly one character of the class.
    Single(CharClass),
    /// Emit a batch sized from the class minimum and maximum.
    Batch(CharClass),
}

impl Directive {
    pub const fn class(self) -> CharClass {
        match self {
            Self::Single(class) | Self::Batch(class) => class,
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Single(CharClass::Upper) => 'u',
            Self::Single(CharClass::Lower) => 'l',
            Self::Single(CharClass::Digit) => 'd',
            Self::Single(CharClass::Symbol) => 's',
            Self::Batch(CharClass::Upper) => 'U',
            Self::Batch(CharClass::Lower) => 'L',
            Self::Batch(CharClass::Digit) => 'D',
            Self::Batch(CharClass::Symbol) => 'S',
        }
    }
}

impl TryFrom<char> for Directive {
    type Error = ConfigError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let directive = match c {
            'u' => Self::Single(CharClass::Upper),
            'l' => Self::Single(CharClass::Lower),
            'd' => Self::Single(CharClass::Digit),
            's' => Self::Single(CharClass::Symbol),
            'U' => Self::Batch(CharClass::Upper),
            'L' => Self::Batch(CharClass::Lower),
            'D' => Self::Batch(CharClass::Digit),
            'S' => Self::Batch(CharClass::Symbol),
            other => return Err(ConfigError::InvalidDirective(other)),
        };
        Ok(directive)
    }
}

/// Explicit construction order, e.g. `"uLLdS"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOrder(Vec<Directive>);

impl GenerationOrder {
    pub fn directives(&self) -> &[Directive] {
        &self.0
    }

    /// Whether any directive, single or batch, emits `class`.
    pub fn uses(&self, class: CharClass) -> bool {
        self.0.iter().any(|d| d.class() == class)
    }
}

impl FromStr for GenerationOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::EmptyOrder);
        }
        s.chars()
            .map(Directive::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for GenerationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|d| write!(f, "{}", d.symbol()))
    }
}

/// Generator overrides.
///
/// Class maximums use `-1` for unbounded and `0` to suppress the class.
/// Without an order, one of the two canonical batch orders is picked at
/// random for each password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub max_lower: i32,
    pub max_upper: i32,
    pub max_digits: i32,
    pub max_symbols: i32,
    pub order: Option<GenerationOrder>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_lower: -1,
            max_upper: -1,
            max_digits: -1,
            max_symbols: -1,
            order: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_lower(mut self, n: i32) -> Self {
        self.max_lower = n;
        self
    }

    #[must_use]
    pub fn with_max_upper(mut self, n: i32) -> Self {
        self.max_upper = n;
        self
    }

    #[must_use]
    pub fn with_max_digits(mut self, n: i32) -> Self {
        self.max_digits = n;
        self
    }

    #[must_use]
    pub fn with_max_symbols(mut self, n: i32) -> Self {
        self.max_symbols = n;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: GenerationOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Maximum for `class`, `-1` when unbounded.
    pub const fn max_for(&self, class: CharClass) -> i32 {
        match class {
            CharClass::Digit => self.max_digits,
            CharClass::Lower => self.max_lower,
            CharClass::Upper => self.max_upper,
            CharClass::Symbol => self.max_symbols,
        }
    }

    /// Rejects policy and override combinations no password can meet.
    ///
    /// Class overrides are always checked against the class minimums, the
    /// size checks only apply to bounded policies (`maximum_size > 0`).
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - a class maximum override is below that class's required minimum
    /// - the maximum size is below the minimum size
    /// - the enabled class minimums add up to more than the maximum size
    /// - the class maximum overrides add up to more than the maximum size
    pub fn validate(&self, policy: &dyn PasswordCharacteristics) -> Result<(), ConfigError> {
        for class in CharClass::ALL {
            // an empty symbol set makes the symbol minimum vacuous
            if class == CharClass::Symbol && policy.symbols().is_empty() {
                continue;
            }
            let minimum = class_minimum(policy, class);
            let maximum = self.max_for(class);
            if minimum > 0 && (0..minimum).contains(&maximum) {
                return Err(ConfigError::ClassMaximumBelowMinimum {
                    class,
                    minimum,
                    maximum,
                });
            }
        }

        let maximum = policy.maximum_size();
        if maximum <= 0 {
            return Ok(());
        }

        let minimum = policy.minimum_size();
        if maximum < minimum {
            return Err(ConfigError::MaximumBelowMinimum { minimum, maximum });
        }

        let minimums = sum_enabled([
            policy.minimum_lower(),
            policy.minimum_upper(),
            policy.minimum_symbols(),
            policy.minimum_digits(),
        ]);
        if minimums > i64::from(maximum) {
            return Err(ConfigError::MinimumsExceedMaximum {
                total: minimums,
                maximum,
            });
        }

        let maximums = sum_enabled([
            self.max_lower,
            self.max_upper,
            self.max_symbols,
            self.max_digits,
        ]);
        if maximums > i64::from(maximum) {
            return Err(ConfigError::MaximumsExceedMaximum {
                total: maximums,
                maximum,
            });
        }

        Ok(())
    }
}

/// Required count for `class`; `-1` disables the class.
pub(crate) fn class_minimum(policy: &dyn PasswordCharacteristics, class: CharClass) -> i32 {
    match class {
        CharClass::Digit => policy.minimum_digits(),
        CharClass::Lower => policy.minimum_lower(),
        CharClass::Upper => policy.minimum_upper(),
        CharClass::Symbol => policy.minimum_symbols(),
    }
}

fn sum_enabled(values: [i32; 4]) -> i64 {
    values.into_iter().map(|v| i64::from(v.max(0))).sum()
}

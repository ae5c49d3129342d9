//! Password policy model.
//!
//! A policy describes the allowed shape of a password: size bounds,
//! per-class minimums, the symbol alphabet and a few flags. The analyser
//! and generator only see policies through [`PasswordCharacteristics`],
//! so connector-specific policy types can implement it directly instead
//! of converting into a [`PolicyModel`].

use std::collections::BTreeMap;

/// Characters treated as symbols when a policy does not supply its own.
pub const DEFAULT_SYMBOLS: &[char] = &[
    '!', '"', '$', '\u{a3}', '%', '^', '&', '*', '(', ')', '_', '-', '=', '+', '[', '{', ']', '}',
    ':', ';', '\'', '@', '~', '#', ',', '<', '.', '>', '|', '\\', '?',
];

/// Read-only view of a password policy.
///
/// Class minimums use `-1` for "requirement disabled". A `maximum_size`
/// of zero or less means the size is unbounded.
pub trait PasswordCharacteristics {
    fn minimum_size(&self) -> i32;

    fn maximum_size(&self) -> i32;

    fn minimum_lower(&self) -> i32;

    fn minimum_upper(&self) -> i32;

    fn minimum_digits(&self) -> i32;

    fn minimum_symbols(&self) -> i32;

    /// How many of the four character classes must satisfy their minimum.
    /// At `4` every class is checked individually.
    fn required_matches(&self) -> u8;

    fn very_strong_factor(&self) -> f32;

    /// Characters that count as the symbol class.
    fn symbols(&self) -> &[char];

    fn dictionary_words_allowed(&self) -> bool;

    fn contain_username_allowed(&self) -> bool;

    /// Number of previous passwords the backend remembers. Not used by the
    /// analyser.
    fn history_size(&self) -> u32;

    /// Backend specific values that have no dedicated field.
    fn attributes(&self) -> &BTreeMap<String, String>;

    /// UNIX specific settings, if this is a UNIX-flavoured policy.
    fn unix(&self) -> Option<&UnixExtension> {
        None
    }
}

/// Settings carried only by UNIX-flavoured policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixExtension {
    pub auth_token: String,
    pub use_external_checker: bool,
}

impl Default for UnixExtension {
    fn default() -> Self {
        Self {
            auth_token: "UNIX".to_string(),
            use_external_checker: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PolicyVariant {
    #[default]
    Generic,
    Unix(UnixExtension),
}

/// Owned, immutable password policy.
///
/// Built once with the `with_*` methods and then shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyModel {
    minimum_size: i32,
    maximum_size: i32,
    minimum_lower: i32,
    minimum_upper: i32,
    minimum_digits: i32,
    minimum_symbols: i32,
    required_matches: u8,
    very_strong_factor: f32,
    symbols: Vec<char>,
    dictionary_words_allowed: bool,
    contain_username_allowed: bool,
    history_size: u32,
    attributes: BTreeMap<String, String>,
    variant: PolicyVariant,
}

impl Default for PolicyModel {
    fn default() -> Self {
        Self {
            minimum_size: 8,
            maximum_size: 255,
            minimum_lower: 0,
            minimum_upper: 0,
            minimum_digits: 0,
            minimum_symbols: 0,
            required_matches: 4,
            very_strong_factor: 2.0,
            symbols: DEFAULT_SYMBOLS.to_vec(),
            dictionary_words_allowed: false,
            contain_username_allowed: false,
            history_size: 0,
            attributes: BTreeMap::new(),
            variant: PolicyVariant::Generic,
        }
    }
}

impl PolicyModel {
    /// Creates a generic policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies any policy implementation into an owned model.
    #[must_use]
    pub fn snapshot(source: &dyn PasswordCharacteristics) -> Self {
        Self {
            minimum_size: source.minimum_size(),
            maximum_size: source.maximum_size(),
            minimum_lower: source.minimum_lower(),
            minimum_upper: source.minimum_upper(),
            minimum_digits: source.minimum_digits(),
            minimum_symbols: source.minimum_symbols(),
            required_matches: source.required_matches().min(4),
            very_strong_factor: source.very_strong_factor(),
            symbols: source.symbols().to_vec(),
            dictionary_words_allowed: source.dictionary_words_allowed(),
            contain_username_allowed: source.contain_username_allowed(),
            history_size: source.history_size(),
            attributes: source.attributes().clone(),
            variant: source
                .unix()
                .cloned()
                .map_or(PolicyVariant::Generic, PolicyVariant::Unix),
        }
    }

    #[must_use]
    pub fn with_size(mut self, minimum: i32, maximum: i32) -> Self {
        self.minimum_size = minimum;
        self.maximum_size = maximum;
        self
    }

    #[must_use]
    pub fn with_minimum_lower(mut self, n: i32) -> Self {
        self.minimum_lower = n;
        self
    }

    #[must_use]
    pub fn with_minimum_upper(mut self, n: i32) -> Self {
        self.minimum_upper = n;
        self
    }

    #[must_use]
    pub fn with_minimum_digits(mut self, n: i32) -> Self {
        self.minimum_digits = n;
        self
    }

    #[must_use]
    pub fn with_minimum_symbols(mut self, n: i32) -> Self {
        self.minimum_symbols = n;
        self
    }

    /// Sets the number of classes that must match, clamped to at most 4.
    #[must_use]
    pub fn with_required_matches(mut self, n: u8) -> Self {
        self.required_matches = n.min(4);
        self
    }

    #[must_use]
    pub fn with_very_strong_factor(mut self, factor: f32) -> Self {
        self.very_strong_factor = factor;
        self
    }

    #[must_use]
    pub fn with_symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.symbols = symbols.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_dictionary_words_allowed(mut self, allowed: bool) -> Self {
        self.dictionary_words_allowed = allowed;
        self
    }

    #[must_use]
    pub fn with_contain_username_allowed(mut self, allowed: bool) -> Self {
        self.contain_username_allowed = allowed;
        self
    }

    #[must_use]
    pub fn with_history_size(mut self, n: u32) -> Self {
        self.history_size = n;
        self
    }

    /// Turns this into a UNIX-flavoured policy.
    #[must_use]
    pub fn with_unix(mut self, extension: UnixExtension) -> Self {
        self.variant = PolicyVariant::Unix(extension);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn variant(&self) -> &PolicyVariant {
        &self.variant
    }
}

impl PasswordCharacteristics for PolicyModel {
    fn minimum_size(&self) -> i32 {
        self.minimum_size
    }

    fn maximum_size(&self) -> i32 {
        self.maximum_size
    }

    fn minimum_lower(&self) -> i32 {
        self.minimum_lower
    }

    fn minimum_upper(&self) -> i32 {
        self.minimum_upper
    }

    fn minimum_digits(&self) -> i32 {
        self.minimum_digits
    }

    fn minimum_symbols(&self) -> i32 {
        self.minimum_symbols
    }

    fn required_matches(&self) -> u8 {
        self.required_matches
    }

    fn very_strong_factor(&self) -> f32 {
        self.very_strong_factor
    }

    fn symbols(&self) -> &[char] {
        &self.symbols
    }

    fn dictionary_words_allowed(&self) -> bool {
        self.dictionary_words_allowed
    }

    fn contain_username_allowed(&self) -> bool {
        self.contain_username_allowed
    }

    fn history_size(&self) -> u32 {
        self.history_size
    }

    fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    fn unix(&self) -> Option<&UnixExtension> {
        match &self.variant {
            PolicyVariant::Unix(ext) => Some(ext),
            PolicyVariant::Generic => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal connector-side policy, the way a backend adapter would
    /// expose its native settings.
    struct ComplexityFlag {
        complex: bool,
        attributes: BTreeMap<String, String>,
    }

    impl PasswordCharacteristics for ComplexityFlag {
        fn minimum_size(&self) -> i32 {
            7
        }
        fn maximum_size(&self) -> i32 {
            127
        }
        fn minimum_lower(&self) -> i32 {
            i32::from(self.complex)
        }
        fn minimum_upper(&self) -> i32 {
            i32::from(self.complex)
        }
        fn minimum_digits(&self) -> i32 {
            i32::from(self.complex)
        }
        fn minimum_symbols(&self) -> i32 {
            i32::from(self.complex)
        }
        fn required_matches(&self) -> u8 {
            if self.complex { 3 } else { 0 }
        }
        fn very_strong_factor(&self) -> f32 {
            2.0
        }
        fn symbols(&self) -> &[char] {
            DEFAULT_SYMBOLS
        }
        fn dictionary_words_allowed(&self) -> bool {
            true
        }
        fn contain_username_allowed(&self) -> bool {
            false
        }
        fn history_size(&self) -> u32 {
            24
        }
        fn attributes(&self) -> &BTreeMap<String, String> {
            &self.attributes
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = PolicyModel::new();
        assert_eq!(policy.minimum_size(), 8);
        assert_eq!(policy.maximum_size(), 255);
        assert_eq!(policy.required_matches(), 4);
        assert_eq!(policy.very_strong_factor(), 2.0);
        assert_eq!(policy.symbols().len(), 31);
        assert!(policy.symbols().contains(&'\u{a3}'));
        assert!(!policy.dictionary_words_allowed());
        assert!(!policy.contain_username_allowed());
        assert!(policy.unix().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let policy = PolicyModel::new()
            .with_size(10, 20)
            .with_minimum_digits(2)
            .with_minimum_symbols(-1)
            .with_required_matches(9)
            .with_symbols("#!".chars())
            .with_attribute("as400.QPWDRQDDIF", "1");

        assert_eq!(policy.minimum_size(), 10);
        assert_eq!(policy.maximum_size(), 20);
        assert_eq!(policy.minimum_digits(), 2);
        assert_eq!(policy.minimum_symbols(), -1);
        assert_eq!(policy.required_matches(), 4);
        assert_eq!(policy.symbols(), &['#', '!']);
        assert_eq!(
            policy.attributes().get("as400.QPWDRQDDIF").map(String::as_str),
            Some("1")
        );
    }

    #[test]
    fn test_unix_variant() {
        let policy = PolicyModel::new().with_unix(UnixExtension {
            use_external_checker: true,
            ..UnixExtension::default()
        });
        let ext = policy.unix().expect("unix extension");
        assert_eq!(ext.auth_token, "UNIX");
        assert!(ext.use_external_checker);
        assert!(matches!(policy.variant(), PolicyVariant::Unix(_)));
    }

    #[test]
    fn test_snapshot_copies_foreign_policy() {
        let mut attributes = BTreeMap::new();
        attributes.insert("activeDirectory.cn".to_string(), "Default".to_string());
        let native = ComplexityFlag {
            complex: true,
            attributes,
        };

        let policy = PolicyModel::snapshot(&native);
        assert_eq!(policy.minimum_size(), 7);
        assert_eq!(policy.maximum_size(), 127);
        assert_eq!(policy.minimum_lower(), 1);
        assert_eq!(policy.required_matches(), 3);
        assert_eq!(policy.history_size(), 24);
        assert!(policy.dictionary_words_allowed());
        assert_eq!(policy.attributes().len(), 1);
        assert_eq!(policy.variant(), &PolicyVariant::Generic);
    }

    #[test]
    fn test_snapshot_keeps_unix_extension() {
        let original = PolicyModel::new()
            .with_size(6, 0)
            .with_unix(UnixExtension {
                auth_token: "passwd".to_string(),
                use_external_checker: false,
            });
        let copy = PolicyModel::snapshot(&original);
        assert_eq!(copy, original);
    }
}

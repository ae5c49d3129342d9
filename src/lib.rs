//! Password policy engine
//!
//! This library checks passwords against backend password policies,
//! scores their strength, and generates passwords that satisfy a policy.
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_DICTIONARY_PATH`: Word list used by [`WordList::from_env`]
//!   (default: `./assets/dictionary.txt`)
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::{GeneratorConfig, PasswordAnalyser, PasswordGenerator, PolicyModel};
//!
//! let policy = PolicyModel::new()
//!     .with_size(8, 16)
//!     .with_minimum_digits(1)
//!     .with_minimum_upper(1);
//!
//! // Check a user supplied password
//! let analyser = PasswordAnalyser::new();
//! let password: Vec<char> = "Tr0ub4dor&3".chars().collect();
//! match analyser.analyse("en", Some("alice"), &password, &policy) {
//!     Ok(strength) => println!("Accepted, strength {strength:.2}"),
//!     Err(violation) => println!("Rejected: {}", violation.kind),
//! }
//!
//! // Or generate one
//! let generator = PasswordGenerator::new(analyser);
//! let generated = generator
//!     .generate("en", Some("alice"), &policy, &GeneratorConfig::new(), &mut rand::rng())
//!     .expect("policy is satisfiable");
//! assert!(generated.len() >= 8);
//! ```

// Internal modules
mod analyser;
mod config;
mod dictionary;
mod generator;
mod policy;
mod sections;
mod violation;

#[cfg(test)]
mod proptests;

// Public API
pub use analyser::{PasswordAnalyser, strength};
pub use config::{CharClass, ConfigError, Directive, GenerationOrder, GeneratorConfig};
pub use dictionary::{
    DICTIONARY_PATH_ENV, Dictionary, DictionaryError, WordList, dictionary_path,
};
pub use generator::{GeneratorError, MAX_REPAIR_ITERATIONS, PasswordGenerator};
pub use policy::{
    DEFAULT_SYMBOLS, PasswordCharacteristics, PolicyModel, PolicyVariant, UnixExtension,
};
pub use sections::{ClassCounts, split_words};
pub use violation::{AnalysisResult, PolicyViolation, ViolationKind};

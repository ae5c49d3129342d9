//! Dictionary lookup used by the analyser's word check.
//!
//! The analyser only needs [`Dictionary::contains_word`]. [`WordList`] is a
//! simple in-memory implementation loaded from a newline-delimited file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the word list location.
pub const DICTIONARY_PATH_ENV: &str = "PWD_DICTIONARY_PATH";

const DEFAULT_DICTIONARY_PATH: &str = "./assets/dictionary.txt";

/// Word lookup service.
///
/// Implementations must answer quickly and synchronously; slow or async
/// backends belong behind an adapter that blocks.
pub trait Dictionary: Send + Sync {
    fn contains_word(&self, locale: &str, word: &str) -> bool;
}

impl<F> Dictionary for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn contains_word(&self, locale: &str, word: &str) -> bool {
        self(locale, word)
    }
}

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary file is empty")]
    EmptyFile,
}

/// Returns the word list path.
///
/// Priority:
/// 1. Environment variable `PWD_DICTIONARY_PATH`
/// 2. Default path `./assets/dictionary.txt`
pub fn dictionary_path() -> PathBuf {
    std::env::var(DICTIONARY_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DICTIONARY_PATH))
}

/// Case-insensitive set of words, shared by every locale.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Builds a word list from an iterator. Blank entries are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Loads the word list from the location given by [`dictionary_path`].
    ///
    /// # Errors
    ///
    /// Same as [`WordList::from_path`].
    pub fn from_env() -> Result<Self, DictionaryError> {
        Self::from_path(dictionary_path())
    }

    /// Loads a newline-delimited word list.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File holds no words
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Dictionary load FAILED: FileNotFound {}", path.display());
            return Err(DictionaryError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let list = Self::from_words(content.lines());

        if list.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Dictionary load FAILED: Empty file {}", path.display());
            return Err(DictionaryError::EmptyFile);
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Dictionary loaded: {} words from {:?}", list.len(), path);

        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains_word(&self, _locale: &str, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

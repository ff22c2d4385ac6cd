use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words, unique_non_empty};
use std::collections::BTreeSet;

/// Immutable set of words excluded from the index and from queries.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from a space-delimited string, e.g. `"a an the"`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(split_into_words(text))
    }

    /// Build from already split words. Empty strings are ignored, duplicates collapse.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = unique_non_empty(words);
        if let Some(bad) = words.iter().find(|w| !is_valid_word(w)) {
            return Err(SearchError::InvalidWord(bad.clone()));
        }
        Ok(Self { words })
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stop words in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

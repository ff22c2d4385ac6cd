use crate::config::WORD_SEPARATOR;
use std::collections::BTreeSet;

/// Split text into words on ASCII space only. Runs of spaces produce no empty words;
/// tabs, newlines and punctuation stay inside the word they touch.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(WORD_SEPARATOR).filter(|w| !w.is_empty()).collect()
}

/// A word is valid unless it contains a control character (code point 0..=31).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}

/// Deduplicate words, dropping empty strings.
pub fn unique_non_empty<I, S>(words: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .filter(|w| !w.as_ref().is_empty())
        .map(|w| w.as_ref().to_string())
        .collect()
}

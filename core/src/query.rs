use crate::config::MINUS_WORD_MARKER;
use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// A parsed query: words that must match and words that disqualify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    plus_words: BTreeSet<String>,
    minus_words: BTreeSet<String>,
}

/// One token after marker stripping.
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match token.strip_prefix(MINUS_WORD_MARKER) {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if is_minus && (data.is_empty() || data.starts_with(MINUS_WORD_MARKER)) {
        return Err(SearchError::MalformedMinusWord(token.to_string()));
    }
    if !is_valid_word(data) {
        return Err(SearchError::InvalidWord(token.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

impl Query {
    /// Parse a raw query. Stop words are dropped whether written as plus or minus words.
    /// A word given both ways is kept as a minus-word only.
    pub fn parse(raw_query: &str, stop_words: &StopWords) -> Result<Self> {
        if !is_valid_word(raw_query) {
            return Err(SearchError::InvalidWord(raw_query.to_string()));
        }
        let mut query = Query::default();
        for token in split_into_words(raw_query) {
            let word = parse_query_word(token)?;
            if stop_words.is_stop_word(word.data) {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        let minus_words = &query.minus_words;
        query.plus_words.retain(|w| !minus_words.contains(w));
        tracing::trace!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            "parsed query"
        );
        Ok(query)
    }

    pub fn plus_words(&self) -> &BTreeSet<String> {
        &self.plus_words
    }

    pub fn minus_words(&self) -> &BTreeSet<String> {
        &self.minus_words
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

use crate::document::{compute_average_rating, Document, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::{DocumentStore, InvertedIndex};
use crate::query::Query;
use crate::ranker::{find_all_documents, sort_and_truncate, with_status, DocumentPredicate};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use crate::DocId;

/// In-memory TF-IDF search engine.
///
/// Documents are added once and never change. Searches and matches are read-only,
/// so a shared reference is enough for any number of queries.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    /// Create an engine with space-separated stop words.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        StopWords::from_text(stop_words_text).map(Self::from_stop_words)
    }

    /// Create an engine from already split stop words.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWords::from_words(stop_words).map(Self::from_stop_words)
    }

    pub fn from_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    /// Index a document. Fails without touching the index on a negative or repeated id,
    /// or when any word contains a control character.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidDocumentId(id));
        }
        if self.documents.contains(id) {
            return Err(SearchError::DuplicateDocumentId(id));
        }
        let words = self.split_into_words_no_stop(text)?;
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in &words {
                self.index.add_term(word, id, inv_word_count);
            }
        }
        let rating = compute_average_rating(ratings);
        self.documents.insert(id, DocumentData { rating, status });
        tracing::debug!(id, words = words.len(), rating, %status, "indexed document");
        Ok(())
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, &with_status(status))
    }

    /// Top documents accepted by `predicate`, at most `MAX_RESULT_DOCUMENT_COUNT`,
    /// by descending relevance and then descending rating.
    pub fn find_top_documents_with(
        &self,
        raw_query: &str,
        predicate: &DocumentPredicate<'_>,
    ) -> Result<Vec<Document>> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let matched = find_all_documents(&self.index, &self.documents, &query, predicate);
        Ok(sort_and_truncate(matched))
    }

    /// Plus-words of the query found in the document, ascending, together with its status.
    /// The word list is empty if any minus-word is found in the document.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let status = self
            .documents
            .get(id)
            .map(|data| data.status)
            .ok_or(SearchError::UnknownDocument(id))?;
        let vetoed = query
            .minus_words()
            .iter()
            .any(|word| self.index.contains(word, id));
        if vetoed {
            return Ok((Vec::new(), status));
        }
        let matched: Vec<String> = query
            .plus_words()
            .iter()
            .filter(|word| self.index.contains(word, id))
            .cloned()
            .collect();
        Ok((matched, status))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Id of the `position`-th added document.
    pub fn document_id_at(&self, position: usize) -> Result<DocId> {
        self.documents
            .id_at(position)
            .ok_or(SearchError::PositionOutOfRange { position, count: self.documents.len() })
    }

    /// Document ids in the order they were added.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.documents.ids()
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Validate every word before returning, so a rejected document leaves no trace.
    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            if !self.stop_words.is_stop_word(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

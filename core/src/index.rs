//! Inverted index and document store owned by the engine.
//!
//! Both use ordered maps so that iteration, and therefore floating-point
//! accumulation order during ranking, is the same on every call.

use crate::document::DocumentData;
use crate::DocId;
use std::collections::BTreeMap;

/// Term frequency of one word per document.
pub type Postings = BTreeMap<DocId, f64>;

/// Maps each indexed word to its postings.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `increment` to the term frequency of `word` in `doc_id`.
    pub fn add_term(&mut self, word: &str, doc_id: DocId, increment: f64) {
        // avoid allocating a key for words that are already indexed
        if let Some(postings) = self.postings.get_mut(word) {
            *postings.entry(doc_id).or_insert(0.0) += increment;
        } else {
            self.postings
                .entry(word.to_string())
                .or_default()
                .insert(doc_id, increment);
        }
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.postings.get(word)
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings.get(word).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, word: &str, doc_id: DocId) -> bool {
        self.postings
            .get(word)
            .is_some_and(|p| p.contains_key(&doc_id))
    }

    /// Number of distinct indexed words.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Document metadata plus the order documents were added in.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, DocumentData>,
    order: Vec<DocId>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callers check `contains` first; a repeated id would break the order sequence.
    pub fn insert(&mut self, id: DocId, data: DocumentData) {
        debug_assert!(!self.documents.contains_key(&id));
        self.documents.insert(id, data);
        self.order.push(id);
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Id of the document added `position`-th (0-based).
    pub fn id_at(&self, position: usize) -> Option<DocId> {
        self.order.get(position).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    #[test]
    fn increments_accumulate() {
        let mut index = InvertedIndex::new();
        index.add_term("fluffy", 1, 0.25);
        index.add_term("fluffy", 1, 0.25);
        index.add_term("fluffy", 2, 0.5);
        let postings = index.postings("fluffy").unwrap();
        assert_eq!(postings[&1], 0.5);
        assert_eq!(index.document_frequency("fluffy"), 2);
        assert_eq!(index.document_frequency("cat"), 0);
        assert!(index.contains("fluffy", 2));
        assert!(!index.contains("fluffy", 3));
        assert!(index.postings("cat").is_none());
    }

    #[test]
    fn store_keeps_insertion_order() {
        let mut store = DocumentStore::new();
        let data = DocumentData { rating: 1, status: DocumentStatus::Actual };
        store.insert(42, data);
        store.insert(7, data);
        assert_eq!(store.id_at(0), Some(42));
        assert_eq!(store.id_at(1), Some(7));
        assert_eq!(store.id_at(2), None);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![42, 7]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(7), Some(&data));
    }
}

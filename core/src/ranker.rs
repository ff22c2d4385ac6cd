//! TF-IDF relevance over the inverted index.

use crate::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use crate::document::{Document, DocumentStatus};
use crate::index::{DocumentStore, InvertedIndex};
use crate::query::Query;
use crate::DocId;
use std::collections::BTreeMap;

/// Filter applied to every candidate before it is scored: `(id, status, rating) -> keep?`.
pub type DocumentPredicate<'a> = dyn Fn(DocId, DocumentStatus, i32) -> bool + 'a;

/// Predicate accepting only documents with the given status.
pub fn with_status(status: DocumentStatus) -> impl Fn(DocId, DocumentStatus, i32) -> bool {
    move |_, document_status, _| document_status == status
}

/// Inverse document frequency `ln(N / df)`. Only called for indexed words, so `df > 0`.
fn inverse_document_freq(index: &InvertedIndex, store: &DocumentStore, word: &str) -> f64 {
    (store.len() as f64 / index.document_frequency(word) as f64).ln()
}

/// Score every document matching a plus-word and passing `predicate`, then drop every
/// document containing a minus-word. The result is unsorted.
pub fn find_all_documents(
    index: &InvertedIndex,
    store: &DocumentStore,
    query: &Query,
    predicate: &DocumentPredicate<'_>,
) -> Vec<Document> {
    let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for word in query.plus_words() {
        let Some(postings) = index.postings(word) else { continue };
        let idf = inverse_document_freq(index, store, word);
        for (&doc_id, &term_freq) in postings {
            let Some(data) = store.get(doc_id) else { continue };
            if predicate(doc_id, data.status, data.rating) {
                *document_to_relevance.entry(doc_id).or_insert(0.0) += term_freq * idf;
            }
        }
    }
    for word in query.minus_words() {
        let Some(postings) = index.postings(word) else { continue };
        for doc_id in postings.keys() {
            document_to_relevance.remove(doc_id);
        }
    }
    tracing::trace!(candidates = document_to_relevance.len(), "ranked documents");
    document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            store.get(id).map(|data| Document::new(id, relevance, data.rating))
        })
        .collect()
}

/// Descending relevance. Runs of relevances within `RELEVANCE_EPSILON` of the first
/// relevance in the run are reordered by descending rating, keeping ties stable.
pub fn sort_and_truncate(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let mut start = 0;
    while start < documents.len() {
        let head = documents[start].relevance;
        let end = documents[start + 1..]
            .iter()
            .position(|d| !((head - d.relevance).abs() < RELEVANCE_EPSILON))
            .map_or(documents.len(), |offset| start + 1 + offset);
        documents[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        start = end;
    }
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentData;
    use crate::stop_words::StopWords;

    fn fixture() -> (InvertedIndex, DocumentStore) {
        let mut index = InvertedIndex::new();
        let mut store = DocumentStore::new();
        // doc 1: "cat dog", doc 2: "cat cat", doc 3: "bird"
        index.add_term("cat", 1, 0.5);
        index.add_term("dog", 1, 0.5);
        index.add_term("cat", 2, 1.0);
        index.add_term("bird", 3, 1.0);
        store.insert(1, DocumentData { rating: 3, status: DocumentStatus::Actual });
        store.insert(2, DocumentData { rating: 1, status: DocumentStatus::Banned });
        store.insert(3, DocumentData { rating: 2, status: DocumentStatus::Actual });
        (index, store)
    }

    fn ids(docs: &[Document]) -> Vec<DocId> {
        docs.iter().map(|d| d.id).collect()
    }

    #[test]
    fn relevance_is_tf_times_idf() {
        let (index, store) = fixture();
        let query = Query::parse("cat", &StopWords::default()).unwrap();
        let docs = sort_and_truncate(find_all_documents(&index, &store, &query, &|_, _, _| true));
        let idf = (3.0f64 / 2.0).ln();
        assert_eq!(ids(&docs), vec![2, 1]);
        assert!((docs[0].relevance - idf).abs() < 1e-12);
        assert!((docs[1].relevance - 0.5 * idf).abs() < 1e-12);
    }

    #[test]
    fn predicate_filters_before_scoring() {
        let (index, store) = fixture();
        let query = Query::parse("cat bird", &StopWords::default()).unwrap();
        let predicate = with_status(DocumentStatus::Actual);
        let docs = find_all_documents(&index, &store, &query, &predicate);
        assert_eq!(ids(&docs), vec![1, 3]);
    }

    #[test]
    fn minus_word_ignores_predicate() {
        let (index, store) = fixture();
        let query = Query::parse("cat -dog", &StopWords::default()).unwrap();
        let docs = find_all_documents(&index, &store, &query, &|_, _, _| true);
        assert_eq!(ids(&docs), vec![2]);
    }

    #[test]
    fn ties_break_by_rating() {
        let docs = vec![
            Document::new(1, 0.5, 1),
            Document::new(2, 0.5, 9),
            Document::new(3, 0.7, -5),
            Document::new(4, 0.5 + f64::EPSILON / 4.0, 4),
        ];
        assert_eq!(ids(&sort_and_truncate(docs)), vec![3, 2, 4, 1]);
    }

    #[test]
    fn truncates_to_cap() {
        let docs = (0..12).map(|i| Document::new(i, f64::from(i), 0)).collect();
        let top = sort_and_truncate(docs);
        assert_eq!(top.len(), MAX_RESULT_DOCUMENT_COUNT);
        assert_eq!(ids(&top), vec![11, 10, 9, 8, 7]);
    }

    fn chained_relevances(count: i32) -> Vec<Document> {
        (0..count)
            .map(|k| {
                let relevance = 0.1 + f64::from(k % 50) * 0.6 * f64::EPSILON;
                Document::new(k, relevance, (k * 7919) % 13 - 6)
            })
            .collect()
    }

    #[test]
    fn near_equal_chain_groups_from_the_top() {
        let top = sort_and_truncate(chained_relevances(40));
        assert_eq!(top.len(), MAX_RESULT_DOCUMENT_COUNT);
        let mut leading: Vec<DocId> = ids(&top[..4]);
        leading.sort();
        assert_eq!(leading, vec![36, 37, 38, 39]);
        // each pair is one run, ordered by rating
        assert!(top[0].rating >= top[1].rating);
        assert!(top[2].rating >= top[3].rating);
        assert!(top[1].relevance > top[2].relevance);
    }

    #[test]
    fn large_near_equal_chain_sorts_without_panicking() {
        let docs = chained_relevances(400);
        let first = sort_and_truncate(docs.clone());
        let second = sort_and_truncate(docs);
        assert_eq!(first.len(), MAX_RESULT_DOCUMENT_COUNT);
        assert_eq!(first, second);
        let max = 0.1 + 49.0 * 0.6 * f64::EPSILON;
        assert!((first[0].relevance - max).abs() < f64::EPSILON);
    }
}

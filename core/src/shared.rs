use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::ranker::DocumentPredicate;
use crate::search_server::SearchServer;
use crate::DocId;
use parking_lot::RwLock;
use std::sync::Arc;

/// A [`SearchServer`] that can be shared between threads.
///
/// One lock guards the whole engine: ingestion takes it for writing, searches and
/// matches for reading, so a query never sees a half-indexed document.
#[derive(Debug, Clone, Default)]
pub struct SharedSearchServer {
    inner: Arc<RwLock<SearchServer>>,
}

impl SharedSearchServer {
    pub fn new(server: SearchServer) -> Self {
        Self { inner: Arc::new(RwLock::new(server)) }
    }

    pub fn add_document(
        &self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.inner.write().add_document(id, text, status, ratings)
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.inner.read().find_top_documents(raw_query)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.inner.read().find_top_documents_by_status(raw_query, status)
    }

    pub fn find_top_documents_with(
        &self,
        raw_query: &str,
        predicate: &DocumentPredicate<'_>,
    ) -> Result<Vec<Document>> {
        self.inner.read().find_top_documents_with(raw_query, predicate)
    }

    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.inner.read().match_document(raw_query, id)
    }

    pub fn document_count(&self) -> usize {
        self.inner.read().document_count()
    }

    pub fn document_id_at(&self, position: usize) -> Result<DocId> {
        self.inner.read().document_id_at(position)
    }

    /// Run `f` against one consistent snapshot, e.g. to feed a [`crate::RequestQueue`].
    pub fn with_read<R>(&self, f: impl FnOnce(&SearchServer) -> R) -> R {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn readers_and_writer_share_one_engine() {
        let shared = SharedSearchServer::new(SearchServer::new("the").unwrap());
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for id in 0..50 {
                    shared
                        .add_document(id, "the quick fox", DocumentStatus::Actual, &[id])
                        .unwrap();
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let top = shared.find_top_documents("fox").unwrap();
                        assert!(top.len() <= 5);
                    }
                })
            })
            .collect();
        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(shared.document_count(), 50);
        assert_eq!(shared.document_id_at(49).unwrap(), 49);
        let top = shared.find_top_documents("quick").unwrap();
        // every document has relevance ln(50/50) = 0, so rating decides
        assert_eq!(top[0].id, 49);
        let (words, _) = shared.match_document("fox -dog", 3).unwrap();
        assert_eq!(words, vec!["fox"]);
        let banned = shared.find_top_documents_by_status("fox", DocumentStatus::Banned).unwrap();
        assert!(banned.is_empty());
        let count = shared.with_read(|server| server.document_ids().count());
        assert_eq!(count, 50);
        let odd = shared.find_top_documents_with("fox", &|id, _, _| id % 2 == 1).unwrap();
        assert_eq!(odd[0].id, 49);
    }
}

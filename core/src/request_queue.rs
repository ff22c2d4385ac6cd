//! Sliding-window statistics over searches.

use crate::config::REQUEST_WINDOW;
use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::ranker::DocumentPredicate;
use crate::search_server::SearchServer;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    timestamp: u64,
    results: usize,
}

/// Wraps a [`SearchServer`] and remembers how many results each of the last
/// [`REQUEST_WINDOW`] searches returned. Every recorded search advances the clock by one.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    search_server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
    current_time: u64,
}

impl<'a> RequestQueue<'a> {
    pub fn new(search_server: &'a SearchServer) -> Self {
        Self {
            search_server,
            requests: VecDeque::new(),
            no_result_requests: 0,
            current_time: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self.search_server.find_top_documents(raw_query)?;
        self.add_request(result.len());
        Ok(result)
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let result = self.search_server.find_top_documents_by_status(raw_query, status)?;
        self.add_request(result.len());
        Ok(result)
    }

    pub fn add_find_request_with(
        &mut self,
        raw_query: &str,
        predicate: &DocumentPredicate<'_>,
    ) -> Result<Vec<Document>> {
        let result = self.search_server.find_top_documents_with(raw_query, predicate)?;
        self.add_request(result.len());
        Ok(result)
    }

    /// Searches in the current window that found nothing.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Searches currently held in the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn add_request(&mut self, results: usize) {
        self.current_time += 1;
        while let Some(oldest) = self.requests.front() {
            if self.current_time - oldest.timestamp < REQUEST_WINDOW {
                break;
            }
            if oldest.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }
        self.requests.push_back(QueryResult { timestamp: self.current_time, results });
        if results == 0 {
            self.no_result_requests += 1;
        }
    }
}

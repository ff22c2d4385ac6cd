pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod ranker;
pub mod request_queue;
pub mod search_server;
pub mod shared;
pub mod stop_words;
pub mod tokenizer;

pub use document::{Document, DocumentData, DocumentStatus};
pub use error::{Result, SearchError};
pub use paginator::{paginate, Page, Paginator};
pub use ranker::{with_status, DocumentPredicate};
pub use request_queue::RequestQueue;
pub use search_server::SearchServer;
pub use shared::SharedSearchServer;
pub use stop_words::StopWords;

pub type DocId = i32;

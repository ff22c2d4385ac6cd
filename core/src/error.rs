use crate::DocId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Every way an engine call can fail. A failed call leaves the engine unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("document id {0} is negative")]
    InvalidDocumentId(DocId),
    #[error("document id {0} is already indexed")]
    DuplicateDocumentId(DocId),
    #[error("word {0:?} contains a control character")]
    InvalidWord(String),
    #[error("malformed minus-word {0:?}")]
    MalformedMinusWord(String),
    #[error("document id {0} is not indexed")]
    UnknownDocument(DocId),
    #[error("position {position} is out of range for {count} documents")]
    PositionOutOfRange { position: usize, count: usize },
}

impl SearchError {
    /// True for both rejected-id variants raised by `add_document`.
    pub fn is_invalid_document_id(&self) -> bool {
        matches!(self, Self::InvalidDocumentId(_) | Self::DuplicateDocumentId(_))
    }
}

//! Engine-wide constants.
//!
//! There is no runtime configuration in the library; the CLI exposes the
//! knobs that make sense per invocation (stop words, status, page size).

/// Maximum number of documents returned by a single search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Two relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = f64::EPSILON;

/// Prefix that turns a query token into a minus-word.
pub const MINUS_WORD_MARKER: char = '-';

/// The only character words are split on.
pub const WORD_SEPARATOR: char = ' ';

/// Width of the request statistics window, in requests (one per minute of a day).
pub const REQUEST_WINDOW: u64 = 1440;

//! Error module
//!
use thiserror::Error;

/// Data model errors, mostly raised while validating a freshly read stream.
///
#[derive(Debug, Error)]
pub enum Status {
    #[error("Stream {0} has no usable timestamp column.")]
    MissingTimestamp(String),
    #[error("Stream {0} is empty.")]
    EmptyStream(String),
    #[error("Stream {0} timestamps are not in order.")]
    UnsortedTimestamps(String),
    #[error("Stream {0} columns do not all match the timestamp count.")]
    RaggedColumns(String),
    #[error("Box has not been set.")]
    NoZone,
}

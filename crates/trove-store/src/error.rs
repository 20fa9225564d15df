//! # Error Types — Persistence Failures
//!
//! Defines the error type shared by the item repository and the image
//! store. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Every failure is a distinct variant so callers can react per case;
//!   nothing is swallowed or collapsed into a catch-all.
//! - Rejected image paths carry the offending name for logging.
//! - A validated image path with no file behind it is deliberately NOT an
//!   error; see [`crate::images::ResolvedImage::Missing`].

use thiserror::Error;

/// Top-level error type for the persistence core.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required item field was empty.
    #[error("{field} is required")]
    MissingField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// An underlying read or write could not complete.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// The item document exists but is not parseable.
    #[error("item document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// No item document exists yet.
    #[error("no items have been stored yet")]
    Empty,

    /// A positional lookup fell outside the stored collection.
    #[error("no item at index {index} (store holds {len})")]
    IndexOutOfRange {
        /// The requested 0-based position.
        index: usize,
        /// Collection size at the time of the lookup.
        len: usize,
    },

    /// A requested image name escapes the image root.
    #[error("image path escapes the image directory: {name}")]
    ForbiddenPath {
        /// The name as requested, before normalization.
        name: String,
    },

    /// A requested image name does not end in an allowed suffix.
    #[error("image path must end in .jpg or .jpeg: {name}")]
    InvalidSuffix {
        /// The name as requested.
        name: String,
    },
}

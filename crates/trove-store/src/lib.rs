//! # trove-store — Persistence Core for the Trove Item Catalog
//!
//! This crate holds everything that touches disk: the JSON-document item
//! repository, the content-addressed image store, and the traversal-safe
//! resolver for requested image names. The API layer depends on it and
//! contains no persistence logic of its own.
//!
//! ## Key Design Principles
//!
//! 1. **One JSON document, rewritten whole.** The item collection lives
//!    in a single JSON array file. Inserts read everything, append one
//!    record, and rewrite the document through a temp file + rename, so
//!    readers never observe a torn document. Concurrent writers are not
//!    serialized; the last rename wins.
//!
//! 2. **Content-addressed images.** Image files are named by the SHA-256
//!    hex of their bytes. Identical uploads collapse to one file, and a
//!    name can be handed to clients without leaking any path structure.
//!
//! 3. **Untrusted names never become paths directly.** Every requested
//!    image name flows through [`ImageStore::resolve`], which normalizes
//!    lexically and rejects anything that escapes the image root or
//!    carries a non-JPEG suffix. The missing-file case is a value, not
//!    an error, so callers must decide on the fallback explicitly.
//!
//! ## Crate Policy
//!
//! - No async; all I/O is small, local, and synchronous.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All fallible operations return [`StoreError`].

pub mod error;
pub mod images;
pub mod item;
pub mod repository;

// Re-export primary types for ergonomic imports.
pub use error::StoreError;
pub use images::{ImageStore, ResolvedImage, DEFAULT_IMAGE, IMAGE_SUFFIXES};
pub use item::Item;
pub use repository::{ItemRepository, DEFAULT_ITEMS_FILE};

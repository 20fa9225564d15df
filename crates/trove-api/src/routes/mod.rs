//! # API Route Modules
//!
//! Route modules for the Trove catalog API surface:
//!
//! - `items` — Item submission (multipart), full listing, and positional
//!   lookup over the JSON-document repository.
//! - `images` — Content-addressed image serving with traversal-safe name
//!   resolution and the default-image fallback.

pub mod images;
pub mod items;

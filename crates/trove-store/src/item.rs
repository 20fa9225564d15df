//! # Item — Catalog Record
//!
//! The single record type of the catalog: a named, categorized item with
//! a reference to its stored image.
//!
//! ## Identity
//!
//! Items carry no identifier field. An item's id is its 0-based position
//! in the stored collection, assigned implicitly by insertion order and
//! never serialized. The position is only meaningful against the listing
//! it came from; it is not stable across future mutations of the store.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A catalog record.
///
/// All three fields are required and non-empty, enforced by
/// [`Item::new`]. A constructed `Item` therefore always satisfies the
/// persistence invariant and can be inserted without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Content-derived file name of the item's image, as assigned by
    /// [`crate::images::ImageStore::store`].
    pub image: String,
}

impl Item {
    /// Create a validated item.
    ///
    /// Returns [`StoreError::MissingField`] naming the first empty field.
    /// Whitespace is not trimmed; a blank-but-nonempty field passes.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let item = Self {
            name: name.into(),
            category: category.into(),
            image: image.into(),
        };
        if item.name.is_empty() {
            return Err(StoreError::MissingField { field: "name" });
        }
        if item.category.is_empty() {
            return Err(StoreError::MissingField { field: "category" });
        }
        if item.image.is_empty() {
            return Err(StoreError::MissingField { field: "image" });
        }
        Ok(item)
    }
}

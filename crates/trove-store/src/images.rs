//! # Image Store — Content-Addressed Files and Safe Resolution
//!
//! Two concerns over one configured image root:
//!
//! - **Storing.** [`ImageStore::store`] names incoming bytes by their
//!   SHA-256 digest and writes them under the root. Identical bytes map
//!   to identical names, so a repeat upload rewrites the same file with
//!   the same content and the store never accumulates duplicates.
//! - **Resolving.** [`ImageStore::resolve`] turns an untrusted requested
//!   name into a validated path inside the root, refusing traversal and
//!   non-JPEG suffixes. A validated path with no file behind it is a
//!   recoverable outcome, not an error; callers substitute
//!   [`ImageStore::default_image`] for it.
//!
//! ## Security Invariant
//!
//! Every path handed out by `resolve` lies inside the image root.
//! Normalization is lexical (`.` drops, `..` pops, popping past the
//! start is an escape), so no request string can name a file outside
//! the root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::StoreError;

/// File name served when a validated image path has no file behind it.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Suffixes accepted by [`ImageStore::resolve`], case-sensitive.
pub const IMAGE_SUFFIXES: [&str; 2] = [".jpg", ".jpeg"];

/// Outcome of resolving an untrusted image name that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// A file exists at this path inside the image root.
    Found(PathBuf),
    /// Validation passed but no file exists at this path.
    Missing(PathBuf),
}

/// Content-addressed image storage under a single root directory.
///
/// Holds only the root path; clones share nothing but it. The store
/// owns the root's namespace and never touches files outside it.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Image store over the given root directory.
    ///
    /// The directory is expected to exist and to contain
    /// [`DEFAULT_IMAGE`]; neither is created here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured image root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // -- Content-addressed writes --------------------------------------

    /// Persist `bytes` under their content-derived name and return it.
    ///
    /// The name is the lowercase SHA-256 hex of the bytes plus `.jpg`.
    /// Identical content always lands on the same file; an existing file
    /// of that name is overwritten with the same bytes, so the write is
    /// idempotent. Callers are responsible for rejecting empty uploads;
    /// this method hashes whatever it is given.
    pub fn store(&self, bytes: &[u8]) -> Result<String, StoreError> {
        let name = content_name(bytes);
        fs::write(self.root.join(&name), bytes)?;
        Ok(name)
    }

    // -- Untrusted-name resolution -------------------------------------

    /// Resolve an untrusted requested name to a validated path.
    ///
    /// Rejections, checked in order:
    ///
    /// - [`StoreError::ForbiddenPath`] if the name is absolute or its
    ///   lexical normalization escapes the image root;
    /// - [`StoreError::InvalidSuffix`] if the normalized path does not
    ///   end in `.jpg` or `.jpeg` (case-sensitive).
    ///
    /// A surviving path is [`ResolvedImage::Found`] when a file exists
    /// there and [`ResolvedImage::Missing`] otherwise. Existence is
    /// checked here so callers get the tri-state in one call.
    pub fn resolve(&self, name: &str) -> Result<ResolvedImage, StoreError> {
        let requested = Path::new(name);
        if requested.is_absolute() {
            return Err(StoreError::ForbiddenPath {
                name: name.to_string(),
            });
        }

        let mut kept: Vec<&std::ffi::OsStr> = Vec::new();
        let mut escapes = false;
        for component in requested.components() {
            match component {
                Component::Normal(part) => kept.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if kept.pop().is_none() {
                        escapes = true;
                    }
                }
                Component::RootDir | Component::Prefix(_) => escapes = true,
            }
        }
        if escapes {
            return Err(StoreError::ForbiddenPath {
                name: name.to_string(),
            });
        }

        let path = kept
            .iter()
            .fold(self.root.clone(), |path, part| path.join(part));
        let path_str = path.to_string_lossy();
        if !IMAGE_SUFFIXES
            .iter()
            .any(|suffix| path_str.ends_with(suffix))
        {
            return Err(StoreError::InvalidSuffix {
                name: name.to_string(),
            });
        }

        if path.is_file() {
            Ok(ResolvedImage::Found(path))
        } else {
            Ok(ResolvedImage::Missing(path))
        }
    }

    /// Path of the universal fallback image under the root.
    pub fn default_image(&self) -> PathBuf {
        self.root.join(DEFAULT_IMAGE)
    }
}

/// Content-derived file name for `bytes`: lowercase SHA-256 hex + `.jpg`.
fn content_name(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("{hex}.jpg")
}

//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the two persistence handles (item
//! repository, image store) and the service configuration. Handlers own
//! no paths of their own; everything disk-related comes from here.

use std::path::PathBuf;

use trove_store::{ImageStore, ItemRepository, DEFAULT_ITEMS_FILE};

/// Directory holding content-addressed images, relative to the working
/// directory, unless overridden by `IMAGE_DIR`.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Front-end origin admitted by CORS unless overridden by `FRONT_URL`.
pub const DEFAULT_FRONT_URL: &str = "http://localhost:3000";

/// Port the server binds unless overridden by `PORT`.
pub const DEFAULT_PORT: u16 = 9000;

/// Application configuration.
///
/// Read once at startup; handlers see it through [`AppState`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Front-end origin allowed by CORS.
    pub front_url: String,
    /// Directory holding content-addressed images and `default.jpg`.
    pub image_dir: PathBuf,
    /// Path of the item document.
    pub items_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            front_url: DEFAULT_FRONT_URL.to_string(),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            items_path: PathBuf::from(DEFAULT_ITEMS_FILE),
        }
    }
}

impl AppConfig {
    /// Build configuration from the environment, falling back to the
    /// defaults for anything unset or unparseable: `PORT`, `FRONT_URL`,
    /// `IMAGE_DIR`, `ITEMS_FILE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.port),
            front_url: std::env::var("FRONT_URL").unwrap_or(defaults.front_url),
            image_dir: std::env::var("IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.image_dir),
            items_path: std::env::var("ITEMS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.items_path),
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Cloning is cheap: the persistence handles carry only paths.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The JSON-document item collection.
    pub items: ItemRepository,
    /// Content-addressed image storage and resolution.
    pub images: ImageStore,
    /// Startup configuration.
    pub config: AppConfig,
}

impl AppState {
    /// State with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State over the stores named by `config`.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            items: ItemRepository::at(&config.items_path),
            images: ImageStore::new(&config.image_dir),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

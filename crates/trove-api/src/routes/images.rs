//! # Image API
//!
//! Serves stored images by their content-derived file name:
//!
//! - `GET /images/:file_name` — image bytes as `image/jpeg`.
//!
//! The requested name is untrusted input and flows through the store's
//! resolver before any file is touched. A validated name with no file
//! behind it serves the default image rather than failing; a name that
//! escapes the image root or carries the wrong suffix is rejected.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use trove_store::ResolvedImage;

use crate::error::AppError;
use crate::state::AppState;

/// Build the images router.
pub fn router() -> Router<AppState> {
    Router::new().route("/images/:file_name", get(get_image))
}

/// GET /images/:file_name — Image bytes, or the default image when the
/// requested one does not exist.
async fn get_image(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if file_name.is_empty() {
        return Err(AppError::Validation("filename is required".to_string()));
    }

    let path = match state.images.resolve(&file_name)? {
        ResolvedImage::Found(path) => path,
        ResolvedImage::Missing(path) => {
            tracing::debug!(path = %path.display(), "image not found, serving default");
            state.images.default_image()
        }
    };

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to read image");
        AppError::Internal(format!("failed to read image {}: {e}", path.display()))
    })?;

    tracing::info!(path = %path.display(), "serving image");
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

//! # Item API
//!
//! Catalog item endpoints over the JSON-document repository:
//!
//! - `GET /` and `GET /items` — full listing, insertion order.
//! - `POST /items` — multipart submission (`name`, `category`, `image`);
//!   stores the image first, then appends the item referencing it.
//! - `GET /items/:item_id` — single item by 0-based position.
//!
//! Submission is two-phase: the image is stored before the item is
//! appended, so a failed append can leave an orphaned image file
//! behind. A retried upload rewrites the same content-addressed file.

use axum::extract::{Multipart, Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use trove_store::Item;

use crate::error::AppError;
use crate::state::AppState;

/// Parsed and validated POST /items payload.
#[derive(Debug)]
struct AddItemRequest {
    name: String,
    category: String,
    image: Vec<u8>,
}

/// Listing response: every stored item, in insertion order.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListItemsResponse {
    pub items: Vec<Item>,
}

/// Submission acknowledgment.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddItemResponse {
    pub message: String,
}

/// Build the items router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items))
        .route("/items", get(list_items).post(add_item))
        .route("/items/:item_id", get(get_item))
}

/// GET / and GET /items — List all items in insertion order.
///
/// A store with no readable document is a client-visible error, not an
/// empty listing.
async fn list_items(State(state): State<AppState>) -> Result<Json<ListItemsResponse>, AppError> {
    let items = state.items.get_all()?;
    Ok(Json(ListItemsResponse { items }))
}

/// POST /items — Store the image, then append the item referencing it.
async fn add_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AddItemResponse>, AppError> {
    let req = parse_add_item(multipart).await?;

    let file_name = state.images.store(&req.image).map_err(|e| {
        tracing::error!(error = %e, "failed to store image");
        AppError::Internal(e.to_string())
    })?;

    let item = Item::new(req.name, req.category, file_name)?;
    let message = format!("item received: {}", item.name);
    tracing::info!(name = %item.name, category = %item.category, "item received");

    state.items.insert(item).map_err(|e| {
        tracing::error!(error = %e, "failed to store item");
        AppError::Internal(e.to_string())
    })?;

    Ok(Json(AddItemResponse { message }))
}

/// GET /items/:item_id — One item by its 0-based position in the listing.
async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let index: usize = item_id.parse().map_err(|_| {
        AppError::BadRequest(format!("item_id must be a non-negative integer: {item_id}"))
    })?;
    let item = state.items.get_by_index(index)?;
    Ok(Json(item))
}

/// Read and validate the multipart payload for POST /items.
///
/// Text fields `name` and `category` plus a file field `image` are all
/// required non-empty; unknown fields are ignored. Validation runs
/// before any storage call happens.
async fn parse_add_item(mut multipart: Multipart) -> Result<AddItemRequest, AppError> {
    let mut name = String::new();
    let mut category = String::new();
    let mut image = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart payload: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read name field: {e}")))?;
            }
            Some("category") => {
                category = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("failed to read category field: {e}"))
                })?;
            }
            Some("image") => {
                image = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read image file: {e}")))?
                    .to_vec();
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if category.is_empty() {
        return Err(AppError::Validation("category is required".to_string()));
    }
    if image.is_empty() {
        return Err(AppError::Validation("image is required".to_string()));
    }

    Ok(AddItemRequest {
        name,
        category,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(dir: &tempfile::TempDir) -> Router {
        let image_dir = dir.path().join("images");
        std::fs::create_dir(&image_dir).unwrap();
        let config = AppConfig {
            image_dir,
            items_path: dir.path().join("items.json"),
            ..AppConfig::default()
        };
        router().with_state(AppState::with_config(config))
    }

    fn seed_items(dir: &tempfile::TempDir, names: &[&str]) {
        let items: Vec<Item> = names
            .iter()
            .map(|n| Item::new(*n, "seeded", "ab12cd34.jpg").unwrap())
            .collect();
        let json = serde_json::to_string(&items).unwrap();
        std::fs::write(dir.path().join("items.json"), json).unwrap();
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn list_returns_seeded_items_in_order() {
        let dir = tempfile::tempdir().unwrap();
        seed_items(&dir, &["mug", "lamp"]);
        let resp = test_app(&dir).oneshot(get("/items")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let listing: ListItemsResponse = body_json(resp).await;
        let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["mug", "lamp"]);
    }

    #[tokio::test]
    async fn root_serves_the_same_listing() {
        let dir = tempfile::tempdir().unwrap();
        seed_items(&dir, &["mug"]);
        let resp = test_app(&dir).oneshot(get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let listing: ListItemsResponse = body_json(resp).await;
        assert_eq!(listing.items.len(), 1);
    }

    #[tokio::test]
    async fn list_without_document_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let resp = test_app(&dir).oneshot(get("/items")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_with_empty_collection_is_ok() {
        // An existing document holding `[]` lists cleanly; only a
        // missing or unreadable document is an error.
        let dir = tempfile::tempdir().unwrap();
        seed_items(&dir, &[]);
        let resp = test_app(&dir).oneshot(get("/items")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let listing: ListItemsResponse = body_json(resp).await;
        assert!(listing.items.is_empty());
    }

    #[tokio::test]
    async fn get_item_returns_bare_record() {
        let dir = tempfile::tempdir().unwrap();
        seed_items(&dir, &["mug", "lamp"]);
        let resp = test_app(&dir).oneshot(get("/items/1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let item: Item = body_json(resp).await;
        assert_eq!(item.name, "lamp");
    }

    #[tokio::test]
    async fn get_item_out_of_range_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        seed_items(&dir, &["mug"]);
        let resp = test_app(&dir).oneshot(get("/items/9")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_item_with_non_numeric_id_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        seed_items(&dir, &["mug"]);
        let resp = test_app(&dir).oneshot(get("/items/mug")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn router_builds() {
        let _r = router();
    }

    #[test]
    fn responses_serialize_round_trip() {
        let listing = ListItemsResponse {
            items: vec![Item::new("mug", "kitchen", "ab.jpg").unwrap()],
        };
        let json = serde_json::to_string(&listing).unwrap();
        let deser: ListItemsResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.items.len(), 1);

        let ack = AddItemResponse {
            message: "item received: mug".to_string(),
        };
        let json = serde_json::to_string(&ack).unwrap();
        assert!(json.contains("item received: mug"));
    }
}

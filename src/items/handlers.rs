//! HTTP handlers for the `/items` resource.
//!
//! Each handler receives the shared store explicitly; [`routes`] captures it
//! in the registered closures.

use std::num::IntErrorKind;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::request::Request;
use crate::response::Json;
use crate::router::Router;

use super::error::ApiError;
use super::model::{FieldError, Item, ItemInput, ValidationError};
use super::store::ItemStore;

const ITEM_ID: &str = "item_id";

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: String,
}

/// Registers the five item routes on `router`, all sharing `store`.
pub fn routes(router: Router, store: Arc<ItemStore>) -> Router {
    let (s1, s2, s3, s4, s5) = (
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        store,
    );

    router
        .get("/items", move |req: Request| list_items(Arc::clone(&s1), req))
        .post("/items", move |req: Request| create_item(Arc::clone(&s2), req))
        .get("/items/{item_id}", move |req: Request| get_item(Arc::clone(&s3), req))
        .put("/items/{item_id}", move |req: Request| update_item(Arc::clone(&s4), req))
        .delete("/items/{item_id}", move |req: Request| delete_item(Arc::clone(&s5), req))
}

/// `GET /items`
pub async fn list_items(store: Arc<ItemStore>, _req: Request) -> Json<Vec<Item>> {
    Json(store.list_all())
}

/// `POST /items`
pub async fn create_item(store: Arc<ItemStore>, req: Request) -> Result<Json<Item>, ApiError> {
    let input = ItemInput::from_json(req.body())?;
    let item = store.create(input);
    info!(id = item.id, "item created");
    Ok(Json(item))
}

/// `GET /items/{item_id}`
pub async fn get_item(store: Arc<ItemStore>, req: Request) -> Result<Json<Item>, ApiError> {
    let id = item_id(&req)?;
    store.get(id).map(Json).ok_or(ApiError::NotFound)
}

/// `PUT /items/{item_id}`
///
/// The body is validated before the lookup, so an invalid body is a 422
/// even when the item does not exist.
pub async fn update_item(store: Arc<ItemStore>, req: Request) -> Result<Json<Item>, ApiError> {
    let id = item_id(&req);
    let input = ItemInput::from_json(req.body());

    let (id, input) = match (id, input) {
        (Ok(id), Ok(input)) => (id, input),
        (Err(mut a), Err(b)) => {
            a.detail.extend(b.detail);
            return Err(a.into());
        }
        (Err(e), _) | (_, Err(e)) => return Err(e.into()),
    };

    let item = store.update(id, input).ok_or(ApiError::NotFound)?;
    info!(id, "item updated");
    Ok(Json(item))
}

/// `DELETE /items/{item_id}`
pub async fn delete_item(store: Arc<ItemStore>, req: Request) -> Result<Json<Deleted>, ApiError> {
    let id = item_id(&req)?;
    let item = store.remove(id).ok_or(ApiError::NotFound)?;
    info!(id, "item deleted");
    Ok(Json(Deleted { message: format!("{} deleted successfully", item.name) }))
}

/// Parses the `item_id` path parameter.
///
/// Anything that is not an integer is a validation error. A negative
/// integer, or one too large for any id, is well-formed but can never match,
/// so it maps to id 0, which the store never assigns.
fn item_id(req: &Request) -> Result<u64, ValidationError> {
    let raw = req.param(ITEM_ID).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) => Ok(u64::try_from(id).unwrap_or(0)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => Ok(0),
        Err(_) => Err(ValidationError::single(FieldError::path_int(ITEM_ID))),
    }
}

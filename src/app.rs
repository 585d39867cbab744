//! Application assembly: every route the service answers.

use std::sync::Arc;

use serde::Serialize;

use crate::items::{self, ItemStore};
use crate::{Json, Request, Router, docs, health};

pub const GREETING: &str = "Welcome to App Labs API";

#[derive(Debug, Serialize)]
pub struct Root {
    pub message: &'static str,
    pub version: &'static str,
}

/// `GET /`
pub async fn root(_req: Request) -> Json<Root> {
    Json(Root { message: GREETING, version: env!("CARGO_PKG_VERSION") })
}

/// Builds the router over `store`.
///
/// Tests build one per case with a fresh store; the binary builds one at
/// startup.
pub fn build(store: Arc<ItemStore>) -> Router {
    let router = Router::new()
        .get("/", root)
        .get("/health", health::health)
        .get(docs::OPENAPI_PATH, docs::openapi_json)
        .get("/docs", docs::swagger_ui)
        .get("/redoc", docs::redoc);

    items::routes(router, store)
}

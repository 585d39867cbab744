//! Health-check handler.
//!
//! `GET /health` answers `{"status": "healthy"}` whenever the process can
//! serve HTTP at all. It touches no state, so it doubles as a liveness check.

use serde::Serialize;

use crate::{Json, Request};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

pub async fn health(_req: Request) -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

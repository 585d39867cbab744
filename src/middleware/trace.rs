//! Per-request tracing span with method, path, status and latency.

use std::time::Instant;

use bytes::Bytes;
use tracing::{Instrument, info, info_span, warn};

use crate::response::Response;
use crate::router::Router;

/// Dispatches `req` through `router` inside a `request` span and logs the
/// outcome once the response is ready.
///
/// 5xx responses log at `warn`; everything else at `info`.
pub async fn traced(router: &Router, req: http::Request<Bytes>) -> Response {
    let span = info_span!("request", method = %req.method(), path = %req.uri().path());
    let started = Instant::now();

    async move {
        let res = router.handle(req).await;
        let status = res.status_code();
        let latency_us = started.elapsed().as_micros() as u64;
        if status >= 500 {
            warn!(status, latency_us, "request failed");
        } else {
            info!(status, latency_us, "request completed");
        }
        res
    }
    .instrument(span)
    .await
}

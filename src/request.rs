//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;

/// An incoming HTTP request as a handler sees it: the fully buffered body
/// and the path parameters resolved by the router.
///
/// Method and path have already been consumed by routing, and the tracing
/// middleware records them on the request span.
pub struct Request {
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(body: Bytes, params: HashMap<String, String>) -> Self {
        Self { body, params }
    }

    pub fn body(&self) -> &[u8] { &self.body }

    /// Returns a named path parameter.
    ///
    /// For a route `/items/{item_id}`, `req.param("item_id")` on `/items/42`
    /// returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

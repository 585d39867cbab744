//! Handler trait and type erasure.
//!
//! # How item handlers are stored
//!
//! Every route closure in [`items::routes`](crate::items::routes) has its own
//! anonymous type, and each returns a different future. The router keeps one
//! `matchit` tree per method, and a tree holds a single value type, so each
//! handler is hidden behind the trait object `dyn ErasedHandler`.
//!
//! From registration to a request:
//!
//! ```text
//! move |req: Request| get_item(Arc::clone(&store), req)   ← captures the store
//!        ↓ router.get("/items/{item_id}", …)
//! closure.into_boxed_handler()                            ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(closure))                            ← one allocation at startup
//!        ↓  stored in the GET tree as BoxedHandler
//! handler.call(req)                                       ← one vtable call per request
//!        ↓
//! Box::pin(async { get_item(..).await.into_response() })  ← BoxFuture
//! ```
//!
//! `get_item` returns `Result<Json<Item>, ApiError>`. The `IntoResponse`
//! conversion at the end of the chain turns both arms into a [`Response`],
//! so a handler never builds status codes by hand.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A boxed future resolving to a [`Response`].
///
/// Pinned because the runtime polls it in place. `Send + 'static` so a
/// multi-threaded tokio runtime can move it between workers.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)`: it appears in the return
/// type of [`Handler::into_boxed_handler`].
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A handler shared by every connection task.
///
/// Lookup clones the `Arc` out of the tree, so a request holds its handler
/// without borrowing the router.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Never implemented by hand. Any value with the shape
///
/// ```text
/// Fn(Request) -> impl Future<Output = impl IntoResponse>
/// ```
///
/// qualifies: plain `async fn` items like [`health`](crate::health::health),
/// and closures that clone captured state into the future they return.
///
/// Sealed through the private `Sealed` supertrait, so the blanket impl below
/// is the only one.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// `Sealed` cannot be named outside this module, which keeps `Handler`
/// closed to foreign types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

/// Any function or closure of the right shape is a handler.
impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds one concrete handler and implements [`ErasedHandler`] for it.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // The concrete future is converted and boxed to fit the trait signature.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;

    use super::*;
    use crate::items::ApiError;
    use crate::response::Json;

    async fn lookup(req: Request) -> Result<Json<&'static str>, ApiError> {
        match req.param("item_id") {
            Some("1") => Ok(Json("found")),
            _ => Err(ApiError::NotFound),
        }
    }

    fn request(id: &str) -> Request {
        let params = HashMap::from([("item_id".to_owned(), id.to_owned())]);
        Request::new(Bytes::new(), params)
    }

    #[tokio::test]
    async fn result_handlers_convert_both_arms() {
        let handler = lookup.into_boxed_handler();

        let ok = handler.call(request("1")).await;
        assert_eq!(ok.status_code(), 200);
        assert_eq!(ok.body(), br#""found""#);

        let missing = handler.call(request("2")).await;
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.body(), br#"{"detail":"Item not found"}"#);
    }
}

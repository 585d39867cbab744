//! # app-labs
//!
//! A small JSON API over one in-memory resource, `items`, served by a
//! minimal hyper-based router.
//!
//! | Method | Path | Answer |
//! |---|---|---|
//! | GET | `/` | greeting and version |
//! | GET | `/health` | `{"status":"healthy"}` |
//! | GET / POST | `/items` | list / create |
//! | GET / PUT / DELETE | `/items/{item_id}` | fetch / replace / remove |
//! | GET | `/openapi.json`, `/docs`, `/redoc` | API documentation |
//!
//! The item store is an explicit object injected into the router, so each
//! test (or each embedding) owns its own state:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use app_labs::{Config, ItemStore, Server, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), app_labs::Error> {
//!     let config = Config::default();
//!     let router = app::build(Arc::new(ItemStore::new()));
//!     Server::bind(config.socket_addr()?).await?.serve(router).await
//! }
//! ```
//!
//! Driving the router in-process, without a socket:
//!
//! ```rust
//! # use std::sync::Arc;
//! # use app_labs::{ItemStore, app};
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let router = app::build(Arc::new(ItemStore::new()));
//! let req = http::Request::get("/items").body(bytes::Bytes::new()).unwrap();
//! let res = router.handle(req).await;
//! assert_eq!(res.body(), b"[]");
//! # }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod config;
pub mod docs;
pub mod health;
pub mod items;
pub mod middleware;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use items::{Item, ItemInput, ItemStore};
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;

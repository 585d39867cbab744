//! The `items` resource: model, store, handlers.

pub mod error;
pub mod handlers;
pub mod model;
pub mod store;

pub use error::ApiError;
pub use handlers::routes;
pub use model::{FieldError, Item, ItemInput, ValidationError};
pub use store::ItemStore;

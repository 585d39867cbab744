//! Errors surfaced by the item handlers.

use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

use super::model::ValidationError;

/// A request-scoped failure. Neither variant touches store state.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Item not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => Response::detail(Status::NotFound, "Item not found"),
            Self::Validation(e) => Json(e).with_status(Status::UnprocessableContent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::model::FieldError;

    #[test]
    fn not_found_is_404_with_detail() {
        let res = ApiError::NotFound.into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), br#"{"detail":"Item not found"}"#);
    }

    #[test]
    fn validation_is_422_with_field_list() {
        let err = ValidationError::single(FieldError::path_int("item_id"));
        let res = ApiError::from(err).into_response();
        assert_eq!(res.status_code(), 422);

        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["detail"][0]["loc"], serde_json::json!(["path", "item_id"]));
    }
}

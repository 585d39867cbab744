//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()` or `Json::with_status()`.
//!
//! ```rust
//! use app_labs::{Response, Status};
//!
//! Response::status(Status::NotFound);
//!
//! Response::builder()
//!     .status(Status::UnprocessableContent)
//!     .json(br#"{"detail":[]}"#.to_vec());
//! ```

/// The status codes this service answers with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                   // 200
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnprocessableContent, // 422
    InternalServerError,  // 500
}

impl Status {
    /// Canonical reason phrase, used in `detail` bodies for framework errors.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                   => "OK",
            Self::BadRequest           => "Bad Request",
            Self::NotFound             => "Not Found",
            Self::MethodNotAllowed     => "Method Not Allowed",
            Self::UnprocessableContent => "Unprocessable Content",
            Self::InternalServerError  => "Internal Server Error",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::BadRequest           => 400,
            Status::NotFound             => 404,
            Status::MethodNotAllowed     => 405,
            Status::UnprocessableContent => 422,
            Status::InternalServerError  => 500,
        }
    }
}

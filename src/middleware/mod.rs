//! Middleware layer.
//!
//! Cross-cutting concerns applied around every routed request. The server
//! wraps each dispatch in [`trace::traced`].

pub mod trace;

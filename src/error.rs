//! Unified error type.

use std::net::AddrParseError;

/// The error type returned by the server's fallible operations.
///
/// Application-level errors (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: resolving the listen address, binding to a port
/// or accepting a connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: AddrParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_message() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken"));
        assert_eq!(err.to_string(), "io: taken");
    }

    #[test]
    fn addr_errors_name_the_address() {
        let source = "nope".parse::<std::net::SocketAddr>().unwrap_err();
        let err = Error::Addr { addr: "nope".into(), source };
        assert!(err.to_string().starts_with("invalid listen address `nope`"));
    }
}

//! Server configuration.
//!
//! Every option is a command-line flag with an environment fallback, so the
//! same binary runs unchanged locally and in a container.

use std::net::SocketAddr;

use clap::Parser;

use crate::error::Error;

#[derive(Debug, Clone, Parser)]
#[command(name = "app-labs", version, about = "In-memory items API")]
pub struct Config {
    /// Host to bind to
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(long, env = "APP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log filter used when RUST_LOG is unset (e.g. `info`, `app_labs=debug`)
    #[arg(long, env = "APP_LOG", default_value = "info")]
    pub log: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "APP_LOG_JSON")]
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8000,
            log: "info".to_owned(),
            log_json: false,
        }
    }
}

impl Config {
    /// The address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|source| Error::Addr { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn defaults_match_flag_defaults() {
        let parsed = Config::try_parse_from(["app-labs"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.host, default.host);
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.log, default.log);
    }

    #[test]
    fn flags_override_defaults() {
        let config =
            Config::try_parse_from(["app-labs", "--host", "127.0.0.1", "--port", "4000"]).unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:4000");
    }

    #[test]
    fn log_json_is_a_switch() {
        assert!(!Config::try_parse_from(["app-labs"]).unwrap().log_json);
        assert!(Config::try_parse_from(["app-labs", "--log-json"]).unwrap().log_json);
    }

    #[test]
    fn every_flag_reads_its_env_var() {
        let cmd = Config::command();
        let envs: Vec<_> = cmd
            .get_arguments()
            .filter_map(|arg| Some((arg.get_id().as_str(), arg.get_env()?.to_str()?)))
            .collect();
        assert_eq!(
            envs,
            [
                ("host", "APP_HOST"),
                ("port", "APP_PORT"),
                ("log", "APP_LOG"),
                ("log_json", "APP_LOG_JSON"),
            ]
        );
    }

    #[test]
    fn bad_host_is_an_error() {
        let config = Config { host: "not a host".into(), ..Config::default() };
        assert!(matches!(config.socket_addr(), Err(Error::Addr { .. })));
    }
}

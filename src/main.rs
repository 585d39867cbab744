//! Runs the items API.
//!
//! ```text
//! APP_PORT=4000 RUST_LOG=debug cargo run
//! curl -X POST localhost:4000/items -H 'content-type: application/json' \
//!      -d '{"name":"Lamp","price":12.5}'
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use app_labs::{Config, ItemStore, Server, app};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), app_labs::Error> {
    let addr = config.socket_addr()?;
    let router = app::build(Arc::new(ItemStore::new()));
    Server::bind(addr).await?.serve(router).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

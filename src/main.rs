use std::env;
use std::process;

use log::{debug, error};

use feature_hasher::config::ServerConfig;
use feature_hasher::server::hasher_server;

#[tokio::main]
async fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let config = ServerConfig::from_args(&args);
    debug!("config found = {config:?}");
    if let Err(e) = hasher_server::serve(config).await {
        error!("Server failed on {}: {e}", config.addr());
        process::exit(1);
    }
}

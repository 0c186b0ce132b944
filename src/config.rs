use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use log::warn;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

fn flag_value<T: FromStr>(args: &[String], flag: &str, default: T) -> T {
    match args.windows(2).find(|w| w[0] == flag) {
        Some(window) => window[1].parse().unwrap_or_else(|_| {
            warn!("ignoring invalid value {:?} for {flag}", window[1]);
            default
        }),
        None => default,
    }
}

impl ServerConfig {
    /// Reads `--p <port>` and `--host <ip>`; bad or missing values keep the defaults.
    pub fn from_args(args: &[String]) -> Self {
        Self {
            host: flag_value(args, "--host", DEFAULT_HOST),
            port: flag_value(args, "--p", DEFAULT_PORT),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

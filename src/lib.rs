//! Deterministic feature hashing exposed over HTTP.
//!
//! [`core::hash`] maps an identifier to a bucket in `[0, num_buckets)`;
//! [`server::hasher_server`] serves it on `GET /health` and `POST /predict`.

pub mod clients;
pub mod config;
pub mod core;
pub mod errors;
pub mod server;

use std::future;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reject::MethodNotAllowed;
use warp::{Filter, Rejection, Reply};

use crate::config::ServerConfig;
use crate::core::hash::FeatureHasher;
use crate::errors::request_body_error::RequestBodyError;

const HEALTHY: &str = "healthy";
const BODY_LIMIT: usize = 1024 * 16;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub user_id: String,
}

impl PredictRequest {
    pub fn new(user_id: String) -> Self {
        Self { user_id }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PredictResponse {
    pub user_id: String,
    pub hashed_feature: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: HEALTHY.to_string(),
            message: "Service is running".to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorResponse {
    pub detail: String,
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

fn decode_predict(
    content_type: Option<String>,
    body: Bytes,
) -> Result<PredictRequest, RequestBodyError> {
    if let Some(content_type) = content_type.filter(|ct| !is_json(ct)) {
        return Err(RequestBodyError::NotJson(content_type));
    }
    if body.len() > BODY_LIMIT {
        return Err(RequestBodyError::TooLarge { limit: BODY_LIMIT });
    }
    Ok(serde_json::from_slice(&body)?)
}

async fn check_declared_length(content_length: Option<u64>) -> Result<(), Rejection> {
    match content_length {
        Some(len) if len > BODY_LIMIT as u64 => {
            Err(warp::reject::custom(RequestBodyError::TooLarge { limit: BODY_LIMIT }))
        }
        _ => Ok(()),
    }
}

// Chunked bodies carry no content-length, so the limit is checked again on what was read.
fn json_body() -> impl Filter<Extract = (PredictRequest,), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(check_declared_length)
        .untuple_one()
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::body::bytes())
        .and_then(|content_type: Option<String>, body: Bytes| async move {
            decode_predict(content_type, body).map_err(warp::reject::custom)
        })
}

async fn handle_health() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&HealthResponse::healthy()))
}

async fn handle_predict(
    req: PredictRequest,
    hasher: FeatureHasher,
) -> Result<impl Reply, Rejection> {
    let hashed_feature = hasher.hash(&req.user_id);
    debug!("predict -> {:?} : {hashed_feature}", req);
    let resp = PredictResponse {
        user_id: req.user_id,
        hashed_feature,
    };
    Ok(warp::reply::json(&resp))
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    let (code, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<RequestBodyError>() {
        let code = match e {
            RequestBodyError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (code, e.to_string())
    } else if let Some(e) = err.find::<MethodNotAllowed>() {
        (StatusCode::METHOD_NOT_ALLOWED, e.to_string())
    } else {
        return Err(err);
    };
    warn!("request rejected -> {} : {detail}", code.as_u16());
    let body = warp::reply::json(&ErrorResponse { detail });
    Ok(warp::reply::with_status(body, code))
}

/// Route tree for the service. Predictions use the default bucket count.
pub fn routes() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let hasher = FeatureHasher::default();
    let hasher_filter = warp::any().map(move || hasher);

    // GET /health
    let route_health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handle_health);

    // POST /predict
    let route_predict = warp::path("predict")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(hasher_filter)
        .and_then(handle_predict);

    route_health
        .or(route_predict)
        .recover(handle_rejection)
        .with(warp::log("feature_hasher::access"))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Unable to listen for shutdown signal: {e}");
            future::pending::<()>().await
        }
    }
}

/// Serves the routes on `config.addr()` until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), warp::Error> {
    let (addr, server) = warp::serve(routes())
        .try_bind_with_graceful_shutdown(config.addr(), shutdown_signal())?;
    info!("Starting server at {addr}");
    server.await;
    info!("Server stopped");
    Ok(())
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestBodyError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("expected a JSON body, got content-type {0:?}")]
    NotJson(String),
    #[error("invalid request body: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl warp::reject::Reject for RequestBodyError {}

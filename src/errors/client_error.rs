use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request to hasher service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("hasher service replied with status {0}")]
    UnexpectedStatus(u16),
}

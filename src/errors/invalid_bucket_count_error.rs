use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("bucket count must be positive, got {num_buckets}")]
pub struct InvalidBucketCountError {
    num_buckets: u64,
}

impl InvalidBucketCountError {
    pub fn new(num_buckets: u64) -> Self {
        Self { num_buckets }
    }

    pub fn num_buckets(&self) -> u64 {
        self.num_buckets
    }
}

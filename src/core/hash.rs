//! Deterministic feature hashing.
//!
//! A key is hashed as `md5(utf8(key))`, the 16 digest bytes are read as one
//! big-endian `u128`, and the result is reduced modulo the bucket count.
//! Changing the digest or the byte order reassigns every key, so both are
//! fixed.

use std::num::NonZeroU64;

use crate::errors::invalid_bucket_count_error::InvalidBucketCountError;

pub const DEFAULT_NUM_BUCKETS: u64 = 1000;

const DEFAULT_BUCKETS: NonZeroU64 = match NonZeroU64::new(DEFAULT_NUM_BUCKETS) {
    Some(n) => n,
    None => panic!("default bucket count must be non-zero"),
};

/// Maps `input` to a bucket in `[0, num_buckets)`.
///
/// Returns an error when `num_buckets` is zero.
pub fn hash_feature(input: &str, num_buckets: u64) -> Result<u64, InvalidBucketCountError> {
    let hasher = FeatureHasher::new(num_buckets)?;
    Ok(hasher.hash(input))
}

/// Same as `hash_feature(input, DEFAULT_NUM_BUCKETS)`.
pub fn hash_feature_default(input: &str) -> u64 {
    FeatureHasher::default().hash(input)
}

fn digest_as_u128(input: &str) -> u128 {
    let digest = md5::compute(input.as_bytes());
    u128::from_be_bytes(digest.0)
}

/// A hasher bound to a validated, non-zero bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureHasher {
    num_buckets: NonZeroU64,
}

impl FeatureHasher {
    pub fn new(num_buckets: u64) -> Result<Self, InvalidBucketCountError> {
        match NonZeroU64::new(num_buckets) {
            Some(num_buckets) => Ok(Self { num_buckets }),
            None => Err(InvalidBucketCountError::new(num_buckets)),
        }
    }

    pub fn num_buckets(&self) -> u64 {
        self.num_buckets.get()
    }

    pub fn hash(&self, input: &str) -> u64 {
        let bucket = digest_as_u128(input) % u128::from(self.num_buckets.get());
        bucket as u64
    }
}

impl Default for FeatureHasher {
    fn default() -> Self {
        Self { num_buckets: DEFAULT_BUCKETS }
    }
}

pub mod client_error;
pub mod invalid_bucket_count_error;
pub mod request_body_error;

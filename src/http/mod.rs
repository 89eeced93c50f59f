//! HTTP transport with retry logic and error classification.

mod client;
mod error;
mod retry;

pub use client::HttpClient;
pub use error::{ApiError, classify_error, normalize, not_found_as};
pub use retry::{RetryPolicy, with_retry};

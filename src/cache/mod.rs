//! Response caching for backend API reads.

mod key;
mod store;

pub use key::cache_key;
pub use store::{DEFAULT_CAPACITY, DEFAULT_TTL, ResponseCache};

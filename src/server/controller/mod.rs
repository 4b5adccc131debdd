pub(crate) mod error;
pub(crate) mod index;
pub(crate) mod orders;

/// how long a request waits for the order book before giving up
pub(crate) const STORAGE_TIMEOUT_SECONDS: u64 = 5;

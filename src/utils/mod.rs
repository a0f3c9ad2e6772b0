pub mod logging;
pub mod retry;

pub use retry::{retry_when, RetryPolicy};

pub mod backoff;
pub mod config;
pub mod engine;
pub mod error;
pub mod process;

pub use backoff::Backoff;
pub use config::RetryConfig;
pub use error::{Error, Result};
pub use process::{AttemptOutcome, CommandLine, ExitStatus};

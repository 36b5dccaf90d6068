//! Shared utilities for ChainWallet.

pub mod logging;
pub mod time;

pub use logging::{init_logging, init_tracing, LogFormat, LoggingError};
pub use time::format_elapsed;

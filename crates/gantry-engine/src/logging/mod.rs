//! Logging setup.
//!
//! Library code only talks to the `log` facade; binaries call `init_logging` once.

mod init;

pub use init::{init_logging, LoggingConfig};

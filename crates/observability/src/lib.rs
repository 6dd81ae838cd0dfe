//! Logging setup shared by gala-ops binaries.

pub mod tracing;

pub use tracing::{LogFormat, init, init_with};

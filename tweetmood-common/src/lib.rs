//! Shared helpers for the tweetmood crates.
//!
//! Kept deliberately small so every crate in the workspace can depend on it:
//! today it only hosts the [`observability`] setup used by the binary and by
//! integration tests.
pub mod observability;

pub use observability::{init_logging, LogConfig, LogFormat};

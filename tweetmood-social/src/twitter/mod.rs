//! Twitter REST API v1.1 integration.
//!
//! `client` signs and sends the three calls behind [`crate::SocialApi`],
//! `types` mirrors the v1.1 JSON, and `extract` projects those payloads into
//! the page model. Rate limits (15 `friends/ids` calls and 900 `users/show`
//! calls per 15-minute window) are the caller's problem; nothing here queues.
pub mod client;
pub mod extract;
pub mod types;

pub use client::TwitterApi;

use async_trait::async_trait;
use std::fmt;

use crate::SocialError;
use crate::twitter::types::{Tweet, User};

/// How to address an account: by handle or by numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Handle(String),
    Id(u64),
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handle(handle) => write!(f, "@{handle}"),
            Self::Id(id) => write!(f, "#{id}"),
        }
    }
}

/// The three upstream operations the pages are built from.
///
/// Each call is a direct passthrough: no retries, no caching. Failures come
/// back as [`SocialError`] so the route layer can pick an HTTP status.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Profile of one account.
    async fn get_user(&self, user: &UserRef) -> Result<User, SocialError>;

    /// Up to `limit` most recent posts of `handle`, newest first.
    async fn get_recent_posts(&self, handle: &str, limit: u32) -> Result<Vec<Tweet>, SocialError>;

    /// Ids of the accounts `handle` follows.
    async fn get_friend_ids(&self, handle: &str) -> Result<Vec<u64>, SocialError>;
}

//! Minimal wrapper around the Twitter v1.1 REST API with tweetmood defaults.
//!
//! Every request is signed with OAuth 1.0a user-context keys and delegated to
//! the shared HTTP client. Errors are mapped into [`SocialError`] kinds; there
//! is no retry or backoff.
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;
use tweetmood_http::{Auth, HttpClient, OAuth1Keys, OAuth1Signer, RequestOpts};

use crate::api::{SocialApi, UserRef};
use crate::twitter::types::{FriendIds, Tweet, User};
use crate::SocialError;

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

// user_timeline refuses counts above this.
const MAX_TIMELINE_COUNT: u32 = 200;

#[derive(Clone)]
pub struct TwitterApi {
    http: HttpClient,
    signer: OAuth1Signer,
}

// Keys stay out of logs and panic messages.
impl fmt::Debug for TwitterApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterApi")
            .field("timeout", &self.http.default_timeout)
            .finish_non_exhaustive()
    }
}

impl TwitterApi {
    pub fn new(keys: OAuth1Keys) -> Result<Self, SocialError> {
        Self::with_base_url(DEFAULT_BASE_URL, keys)
    }

    /// Point the client at another host (a proxy, or a mock server in tests).
    pub fn with_base_url(base_url: &str, keys: OAuth1Keys) -> Result<Self, SocialError> {
        let http = HttpClient::new(base_url)?;
        Ok(Self {
            http,
            signer: OAuth1Signer::new(keys),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&str, Cow<'_, str>)>,
    ) -> Result<T, SocialError> {
        let resp = self
            .http
            .get_json(
                path,
                RequestOpts {
                    auth: Some(Auth::OAuth1(&self.signer)),
                    query: Some(query),
                },
            )
            .await?;
        Ok(resp)
    }
}

#[async_trait]
impl SocialApi for TwitterApi {
    async fn get_user(&self, user: &UserRef) -> Result<User, SocialError> {
        let query = match user {
            UserRef::Handle(handle) => vec![("screen_name", Cow::Borrowed(handle.as_str()))],
            UserRef::Id(id) => vec![("user_id", Cow::Owned(id.to_string()))],
        };
        let profile: User = self.get("1.1/users/show.json", query).await?;
        tracing::debug!(%user, screen_name = %profile.screen_name, "twitter.get_user");
        Ok(profile)
    }

    async fn get_recent_posts(&self, handle: &str, limit: u32) -> Result<Vec<Tweet>, SocialError> {
        let count = limit.clamp(1, MAX_TIMELINE_COUNT);
        let tweets: Vec<Tweet> = self
            .get(
                "1.1/statuses/user_timeline.json",
                vec![
                    ("screen_name", handle.into()),
                    ("count", count.to_string().into()),
                    ("tweet_mode", "extended".into()),
                ],
            )
            .await?;
        tracing::debug!(handle, count, returned = tweets.len(), "twitter.get_recent_posts");
        Ok(tweets)
    }

    async fn get_friend_ids(&self, handle: &str) -> Result<Vec<u64>, SocialError> {
        // First cursor page only (up to 5000 ids).
        let page: FriendIds = self
            .get("1.1/friends/ids.json", vec![("screen_name", handle.into())])
            .await?;
        if page.next_cursor != 0 {
            tracing::info!(handle, next_cursor = page.next_cursor, "twitter.friend_ids.truncated");
        }
        tracing::debug!(handle, returned = page.ids.len(), "twitter.get_friend_ids");
        Ok(page.ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_keys() {
        let api = TwitterApi::new(OAuth1Keys {
            consumer_key: "ck-public".into(),
            consumer_secret: "cs-very-secret".into(),
            token: "at-token".into(),
            token_secret: "ats-very-secret".into(),
        })
        .unwrap();
        let shown = format!("{api:?}");
        assert!(shown.starts_with("TwitterApi"));
        assert!(!shown.contains("very-secret"));
        assert!(!shown.contains("at-token"));
    }
}

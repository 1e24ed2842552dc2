//! Timeline and following-list assembly on top of [`SocialApi`].
use crate::SocialError;
use crate::api::{SocialApi, UserRef};
use crate::model::{FollowedAccount, TimelineResult};
use crate::sentiment::{SentimentScorer, VaderScorer};
use crate::twitter::extract::{account_from_user, post_from_tweet};
use crate::twitter::types::{Tweet, User};

/// Posts requested per timeline page.
pub const TIMELINE_LIMIT: u32 = 100;

const MAX_HANDLE_LEN: usize = 15;

/// Handles are 1 to 15 characters of ASCII letters, digits and `_`.
pub fn validate_handle(handle: &str) -> Result<(), SocialError> {
    let valid = !handle.is_empty()
        && handle.len() <= MAX_HANDLE_LEN
        && handle.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(SocialError::InvalidHandle(handle.to_string()))
    }
}

/// Recent posts of `handle`, each scored with a fresh VADER analyzer shared
/// across the whole timeline.
pub async fn fetch_tweets(api: &dyn SocialApi, handle: &str) -> Result<TimelineResult, SocialError> {
    let (user, tweets) = load_timeline(api, handle).await?;
    let scorer = VaderScorer::new();
    build_timeline(&user, &tweets, &scorer)
}

/// [`fetch_tweets`] with a caller-supplied scorer.
pub async fn fetch_tweets_with<S>(
    api: &dyn SocialApi,
    handle: &str,
    scorer: &S,
) -> Result<TimelineResult, SocialError>
where
    S: SentimentScorer + Sync + ?Sized,
{
    let (user, tweets) = load_timeline(api, handle).await?;
    build_timeline(&user, &tweets, scorer)
}

async fn load_timeline(api: &dyn SocialApi, handle: &str) -> Result<(User, Vec<Tweet>), SocialError> {
    validate_handle(handle)?;
    let user = api.get_user(&UserRef::Handle(handle.to_string())).await?;
    let tweets = api.get_recent_posts(handle, TIMELINE_LIMIT).await?;
    Ok((user, tweets))
}

/// Scores every post; the first malformed one fails the whole timeline.
pub fn build_timeline<S>(user: &User, tweets: &[Tweet], scorer: &S) -> Result<TimelineResult, SocialError>
where
    S: SentimentScorer + ?Sized,
{
    let posts = tweets
        .iter()
        .map(|tweet| post_from_tweet(tweet, scorer))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(user = %user.screen_name, count = posts.len(), "timeline.built");
    Ok(TimelineResult {
        user: user.screen_name.clone(),
        count: posts.len(),
        posts,
    })
}

/// Accounts `handle` follows, most-followed first.
///
/// One `get_user` call per friend id, issued sequentially.
pub async fn fetch_following(api: &dyn SocialApi, handle: &str) -> Result<Vec<FollowedAccount>, SocialError> {
    validate_handle(handle)?;
    let ids = api.get_friend_ids(handle).await?;
    tracing::info!(handle, friends = ids.len(), "following.fetch.start");

    let mut accounts = Vec::with_capacity(ids.len());
    for id in ids {
        let user = api.get_user(&UserRef::Id(id)).await?;
        accounts.push(account_from_user(&user)?);
    }
    sort_by_followers(&mut accounts);
    Ok(accounts)
}

/// Descending by follower count; ties keep their input order.
pub fn sort_by_followers(accounts: &mut [FollowedAccount]) {
    accounts.sort_by(|a, b| b.followers.cmp(&a.followers));
}

//! Projection of v1.1 payloads into [`Post`] and [`FollowedAccount`].
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::SocialError;
use crate::model::{FollowedAccount, Post};
use crate::sentiment::{SentimentScorer, clamp_score};
use crate::twitter::types::{Tweet, User};

// "Wed Oct 10 20:19:24 +0000 2018"
const CREATED_AT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
);

/// Calendar date of a v1.1 `created_at` timestamp.
pub fn parse_created_at(raw: &str) -> Result<Date, SocialError> {
    OffsetDateTime::parse(raw, CREATED_AT)
        .map(|ts| ts.date())
        .map_err(|e| SocialError::Malformed(format!("created_at {raw:?}: {e}")))
}

pub fn post_from_tweet<S: SentimentScorer + ?Sized>(
    tweet: &Tweet,
    scorer: &S,
) -> Result<Post, SocialError> {
    let text = tweet
        .body()
        .ok_or_else(|| SocialError::Malformed(format!("post {} has no text", tweet.id)))?;
    let entities = &tweet.entities;
    Ok(Post {
        id: tweet.id,
        created: parse_created_at(&tweet.created_at)?,
        reposts: tweet.retweet_count,
        text: text.to_string(),
        hashtags: entities.hashtags.iter().map(|h| h.text.clone()).collect(),
        urls: entities.urls.iter().map(|u| u.url.clone()).collect(),
        mentions: entities
            .user_mentions
            .iter()
            .map(|m| m.screen_name.clone())
            .collect(),
        score: clamp_score(scorer.compound(text)),
        color: None,
    })
}

pub fn account_from_user(user: &User) -> Result<FollowedAccount, SocialError> {
    let image = user
        .profile_image_url
        .as_ref()
        .or(user.profile_image_url_https.as_ref())
        .cloned()
        .unwrap_or_default();
    Ok(FollowedAccount {
        name: user.name.clone(),
        handle: user.screen_name.clone(),
        followers: user.followers_count,
        created: parse_created_at(&user.created_at)?,
        image,
    })
}

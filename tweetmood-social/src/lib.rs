//! Social network access for tweetmood.
//!
//! [`api::SocialApi`] is the seam between route handlers and the upstream
//! network; [`twitter::TwitterApi`] implements it against the Twitter REST API
//! v1.1. The [`fetch`] module composes those calls into timelines and
//! following lists, scoring each post with a [`sentiment::SentimentScorer`].
pub mod api;
mod error;
pub mod fetch;
pub mod model;
pub mod sentiment;
pub mod twitter;

pub use api::{SocialApi, UserRef};
pub use error::SocialError;
pub use fetch::{fetch_following, fetch_tweets, fetch_tweets_with, sort_by_followers};
pub use model::{FollowedAccount, Post, TimelineResult};
pub use sentiment::{SentimentScorer, VaderScorer};

//! Page-facing records built from upstream payloads.
use serde::Serialize;
use time::Date;

time::serde::format_description!(ymd, Date, "[year]-[month]-[day]");

/// One scored post of a timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: u64,
    #[serde(with = "ymd")]
    pub created: Date,
    pub reposts: u64,
    pub text: String,
    pub hashtags: Vec<String>,
    pub urls: Vec<String>,
    pub mentions: Vec<String>,
    /// Compound sentiment in `[-1, 1]`.
    pub score: f64,
    /// `#rrggbb`, filled in by the color annotator.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineResult {
    pub user: String,
    pub count: usize,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowedAccount {
    pub name: String,
    pub handle: String,
    pub followers: u64,
    #[serde(with = "ymd")]
    pub created: Date,
    pub image: String,
}

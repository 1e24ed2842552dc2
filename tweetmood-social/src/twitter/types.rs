use serde::{Deserialize, Serialize};

/// `GET 1.1/users/show.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub followers_count: u64,
    /// e.g. `"Wed Oct 10 20:19:24 +0000 2018"`
    pub created_at: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

/// One element of `GET 1.1/statuses/user_timeline.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    pub created_at: String,

    // `tweet_mode=extended` fills `full_text`; compat mode fills `text`.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,

    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub entities: Entities,
}

impl Tweet {
    pub fn body(&self) -> Option<&str> {
        self.full_text.as_deref().or(self.text.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<HashTag>,
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub user_mentions: Vec<MentionEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashTag {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlEntity {
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionEntity {
    pub screen_name: String,
}

/// `GET 1.1/friends/ids.json` (one cursor page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendIds {
    pub ids: Vec<u64>,
    #[serde(default)]
    pub next_cursor: i64,
}

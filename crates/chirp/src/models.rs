use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never the plaintext.
    #[serde(skip_serializing)]
    pub password: String,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tweet {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub user_id: i64,
    pub status: Option<String>,
    pub created_at: OffsetDateTime,
}

/// `following_user_id` follows `followed_user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follow {
    pub id: i64,
    pub following_user_id: i64,
    pub followed_user_id: i64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub tweet_id: i64,
    pub created_at: OffsetDateTime,
}

/// A previous revision of a tweet body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EditHistory {
    pub id: i64,
    pub tweet_id: i64,
    pub previous_body: Option<String>,
    pub edited_at: OffsetDateTime,
}

/// Publication state of a tweet, stored as a free-form label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TweetStatus {
    Draft,
    Published,
}

impl TweetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TweetStatus::Draft => "draft",
            TweetStatus::Published => "published",
        }
    }
}

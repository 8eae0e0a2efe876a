//! The fixed sample dataset and its consistency checks.
//!
//! Users are referenced by username. Tweets have no natural key, so within a
//! dataset they carry a local `key` that likes and edits point at; the key is
//! never stored.

use std::collections::HashSet;

use chirp::models::TweetStatus;
use serde::{Deserialize, Serialize};

use crate::error::SeedError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub email: String,
    /// Plaintext; hashed before it reaches the store.
    pub password: String,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
}

impl SeedUser {
    /// A user with `<username>@example.com` and the default greeting bio.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
            bio: Some(format!("Hello, I'm {username}")),
            profile_pic: None,
        }
    }
}

/// `follower` follows `followed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFollow {
    pub follower: String,
    pub followed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTweet {
    pub key: String,
    pub author: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<TweetStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedLike {
    pub user: String,
    pub tweet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEdit {
    pub tweet: String,
    pub previous_body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub users: Vec<SeedUser>,
    pub follows: Vec<SeedFollow>,
    pub tweets: Vec<SeedTweet>,
    pub likes: Vec<SeedLike>,
    pub edits: Vec<SeedEdit>,
}

fn follow(follower: &str, followed: &str) -> SeedFollow {
    SeedFollow {
        follower: follower.to_string(),
        followed: followed.to_string(),
    }
}

fn published(key: &str, author: &str, title: &str, body: &str) -> SeedTweet {
    SeedTweet {
        key: key.to_string(),
        author: author.to_string(),
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        status: Some(TweetStatus::Published),
    }
}

fn like(user: &str, tweet: &str) -> SeedLike {
    SeedLike {
        user: user.to_string(),
        tweet: tweet.to_string(),
    }
}

impl Dataset {
    /// Three users who follow and like each other, one tweet each, and one edit.
    pub fn sample() -> Self {
        Self {
            users: ["lia", "joko", "nina"]
                .into_iter()
                .map(|name| SeedUser::new(name, "secret123"))
                .collect(),
            follows: vec![
                follow("lia", "joko"),
                follow("lia", "nina"),
                follow("joko", "lia"),
            ],
            tweets: vec![
                published("first-post", "lia", "First Post", "Halo dunia!"),
                published(
                    "go-tips",
                    "joko",
                    "Go Tips",
                    "Gunakan context untuk cancelable ops.",
                ),
                published(
                    "react-hooks",
                    "nina",
                    "React Hooks",
                    "SWR untuk data fetching elegan.",
                ),
            ],
            likes: vec![
                like("lia", "go-tips"),
                like("joko", "first-post"),
                like("nina", "first-post"),
            ],
            edits: vec![SeedEdit {
                tweet: "first-post".to_string(),
                previous_body: Some("Halo~".to_string()),
            }],
        }
    }

    pub fn usernames(&self) -> Vec<String> {
        self.users.iter().map(|u| u.username.clone()).collect()
    }

    /// Checks that the dataset is internally consistent before anything is written.
    pub fn validate(&self) -> Result<(), SeedError> {
        let invalid =
            |msg: String| -> Result<(), SeedError> { Err(SeedError::InvalidDataset(msg)) };

        let mut usernames = HashSet::new();
        let mut emails = HashSet::new();
        for user in &self.users {
            if user.username.trim().is_empty() {
                return invalid("user with empty username".to_string());
            }
            if user.username.chars().count() > 30 {
                return invalid(format!("username {:?} exceeds 30 characters", user.username));
            }
            if user.email.trim().is_empty() {
                return invalid(format!("user {:?} has no email", user.username));
            }
            if user.password.is_empty() {
                return invalid(format!("user {:?} has an empty password", user.username));
            }
            if !usernames.insert(user.username.as_str()) {
                return invalid(format!("duplicate username {:?}", user.username));
            }
            if !emails.insert(user.email.as_str()) {
                return invalid(format!("duplicate email {:?}", user.email));
            }
        }

        let known_user = |name: &str| usernames.contains(name);

        let mut follow_pairs = HashSet::new();
        for f in &self.follows {
            for name in [&f.follower, &f.followed] {
                if !known_user(name) {
                    return invalid(format!("follow references unknown user {name:?}"));
                }
            }
            if f.follower == f.followed {
                return invalid(format!("user {:?} follows themselves", f.follower));
            }
            if !follow_pairs.insert((f.follower.as_str(), f.followed.as_str())) {
                return invalid(format!(
                    "duplicate follow {:?} -> {:?}",
                    f.follower, f.followed
                ));
            }
        }

        let mut tweet_keys = HashSet::new();
        for t in &self.tweets {
            if !known_user(&t.author) {
                return invalid(format!(
                    "tweet {:?} has unknown author {:?}",
                    t.key, t.author
                ));
            }
            if !tweet_keys.insert(t.key.as_str()) {
                return invalid(format!("duplicate tweet key {:?}", t.key));
            }
        }

        let mut like_pairs = HashSet::new();
        for l in &self.likes {
            if !known_user(&l.user) {
                return invalid(format!("like references unknown user {:?}", l.user));
            }
            if !tweet_keys.contains(l.tweet.as_str()) {
                return invalid(format!("like references unknown tweet {:?}", l.tweet));
            }
            if !like_pairs.insert((l.user.as_str(), l.tweet.as_str())) {
                return invalid(format!("duplicate like {:?} -> {:?}", l.user, l.tweet));
            }
        }

        for e in &self.edits {
            if !tweet_keys.contains(e.tweet.as_str()) {
                return invalid(format!("edit references unknown tweet {:?}", e.tweet));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(dataset: &Dataset, fragment: &str) {
        match dataset.validate() {
            Err(SeedError::InvalidDataset(msg)) => {
                assert!(msg.contains(fragment), "unexpected message: {msg}")
            }
            other => panic!("expected InvalidDataset, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_is_valid() {
        let sample = Dataset::sample();
        sample.validate().unwrap();
        assert_eq!(sample.usernames(), vec!["lia", "joko", "nina"]);
        assert_eq!(sample.follows.len(), 3);
        assert_eq!(sample.tweets.len(), 3);
        assert_eq!(sample.likes.len(), 3);
        assert_eq!(sample.edits.len(), 1);
    }

    #[test]
    fn test_sample_gives_every_user_a_tweet() {
        let sample = Dataset::sample();
        for user in &sample.users {
            assert!(
                sample.tweets.iter().any(|t| t.author == user.username),
                "{} has no tweet",
                user.username
            );
        }
    }

    #[test]
    fn test_rejects_self_follow() {
        let mut dataset = Dataset::sample();
        dataset.follows.push(follow("nina", "nina"));
        assert_invalid(&dataset, "follows themselves");
    }

    #[test]
    fn test_rejects_duplicate_follow() {
        let mut dataset = Dataset::sample();
        dataset.follows.push(follow("lia", "joko"));
        assert_invalid(&dataset, "duplicate follow");
    }

    #[test]
    fn test_rejects_duplicate_email() {
        let mut dataset = Dataset::sample();
        let mut clone = SeedUser::new("lia2", "pw");
        clone.email = "lia@example.com".to_string();
        dataset.users.push(clone);
        assert_invalid(&dataset, "duplicate email");
    }

    #[test]
    fn test_rejects_unknown_references() {
        let mut dataset = Dataset::sample();
        dataset.likes.push(like("budi", "go-tips"));
        assert_invalid(&dataset, "unknown user");

        let mut dataset = Dataset::sample();
        dataset.edits.push(SeedEdit {
            tweet: "missing".to_string(),
            previous_body: None,
        });
        assert_invalid(&dataset, "unknown tweet");
    }

    #[test]
    fn test_rejects_duplicate_like() {
        let mut dataset = Dataset::sample();
        dataset.likes.push(like("lia", "go-tips"));
        assert_invalid(&dataset, "duplicate like");
    }

    #[test]
    fn test_rejects_empty_password() {
        let mut dataset = Dataset::sample();
        dataset.users[0].password.clear();
        assert_invalid(&dataset, "empty password");
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        Dataset::default().validate().unwrap();
    }
}

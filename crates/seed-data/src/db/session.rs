//! Store operations used by the seeder, all on one checked-out connection.

use chirp::database::Database;
use serde::Serialize;
use sqlx::{Postgres, pool::PoolConnection, postgres::PgQueryResult};

use crate::dataset::{SeedTweet, SeedUser};

/// Result of an upsert-or-skip insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertOutcome {
    Inserted,
    /// A row with the same unique key already existed.
    Skipped,
}

/// Folds uniqueness conflicts into [`InsertOutcome::Skipped`]; every other error passes through.
///
/// `ON CONFLICT ... DO NOTHING` covers the key it names. A second unique key
/// colliding, or a concurrent seeder winning the race, still surfaces as a
/// unique violation and is absorbed the same way.
pub(crate) fn absorb_conflict(
    result: Result<PgQueryResult, sqlx::Error>,
) -> Result<InsertOutcome, sqlx::Error> {
    match result {
        Ok(done) if done.rows_affected() == 0 => Ok(InsertOutcome::Skipped),
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Skipped),
        Err(e) => Err(e),
    }
}

/// A single pooled connection held for the duration of a seed run.
///
/// The connection returns to the pool when the session is dropped, which
/// also happens when the run is cancelled at its deadline.
pub struct SeedSession {
    conn: PoolConnection<Postgres>,
}

impl SeedSession {
    pub async fn begin(db: &Database) -> Result<Self, sqlx::Error> {
        Ok(Self {
            conn: db.acquire().await?,
        })
    }

    /// Inserts `user` unless the username is taken. An existing row is left untouched.
    pub async fn insert_user(
        &mut self,
        user: &SeedUser,
        password_hash: &str,
    ) -> Result<InsertOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password, bio, profile_pic)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.bio)
        .bind(&user.profile_pic)
        .execute(&mut *self.conn)
        .await;

        absorb_conflict(result)
    }

    /// Looks up a user's surrogate id by username.
    pub async fn user_id(&mut self, username: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *self.conn)
            .await
    }

    pub async fn insert_follow(
        &mut self,
        following_user_id: i64,
        followed_user_id: i64,
    ) -> Result<InsertOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (following_user_id, followed_user_id)
            VALUES ($1, $2)
            ON CONFLICT (following_user_id, followed_user_id) DO NOTHING
            "#,
        )
        .bind(following_user_id)
        .bind(followed_user_id)
        .execute(&mut *self.conn)
        .await;

        absorb_conflict(result)
    }

    /// Always inserts a new tweet and returns its id.
    pub async fn insert_tweet(
        &mut self,
        user_id: i64,
        tweet: &SeedTweet,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            INSERT INTO tweets (title, body, user_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&tweet.title)
        .bind(&tweet.body)
        .bind(user_id)
        .bind(tweet.status.map(|s| s.as_str()))
        .fetch_one(&mut *self.conn)
        .await
    }

    /// Id of the oldest tweet by `user_id` with the same title and body as `tweet`.
    ///
    /// Tweets are re-inserted on every run; likes point at this first copy so
    /// that the `(user_id, tweet_id)` pair is stable across runs.
    pub async fn anchor_tweet_id(
        &mut self,
        user_id: i64,
        tweet: &SeedTweet,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT MIN(id)
            FROM tweets
            WHERE user_id = $1
              AND title IS NOT DISTINCT FROM $2
              AND body IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(user_id)
        .bind(&tweet.title)
        .bind(&tweet.body)
        .fetch_one(&mut *self.conn)
        .await
    }

    pub async fn insert_like(
        &mut self,
        user_id: i64,
        tweet_id: i64,
    ) -> Result<InsertOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO likes (user_id, tweet_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, tweet_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(tweet_id)
        .execute(&mut *self.conn)
        .await;

        absorb_conflict(result)
    }

    /// Appends a revision to a tweet's edit history and returns the row id.
    pub async fn append_edit(
        &mut self,
        tweet_id: i64,
        previous_body: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            INSERT INTO edit_history (tweet_id, previous_body)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(tweet_id)
        .bind(previous_body)
        .fetch_one(&mut *self.conn)
        .await
    }
}

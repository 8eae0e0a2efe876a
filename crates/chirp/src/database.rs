use sqlx::{PgPool, Postgres, pool::PoolConnection, postgres::PgPoolOptions};

use crate::models::{EditHistory, Follow, Like, Tweet, User};
use crate::schema::Entity;

/// Shared handle to the store. Cloning is cheap; every clone uses the same pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Checks out a single connection. It goes back to the pool when dropped.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Trivial round trip against the store.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Number of rows currently stored for `entity`.
    pub async fn count(&self, entity: Entity) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM {}", entity.table_name());
        sqlx::query_scalar(&sql).fetch_one(&self.pool).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, username, email, password, bio, profile_pic, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_user_tweets(&self, user_id: i64) -> Result<Vec<Tweet>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, title, body, user_id, status, created_at
            FROM tweets
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Revisions of a tweet, oldest first.
    pub async fn get_edit_history(&self, tweet_id: i64) -> Result<Vec<EditHistory>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, tweet_id, previous_body, edited_at
            FROM edit_history
            WHERE tweet_id = $1
            ORDER BY edited_at, id
            "#,
        )
        .bind(tweet_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Users followed by `user_id`, oldest follow first.
    pub async fn get_follows_of(&self, user_id: i64) -> Result<Vec<Follow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, following_user_id, followed_user_id, created_at
            FROM follows
            WHERE following_user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_likes_by(&self, user_id: i64) -> Result<Vec<Like>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, tweet_id, created_at
            FROM likes
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Follow pairs between the given users, as `(following, followed)` usernames.
    pub async fn follows_among(
        &self,
        usernames: &[String],
    ) -> Result<Vec<(String, String)>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT a.username, b.username
            FROM follows f
            JOIN users a ON a.id = f.following_user_id
            JOIN users b ON b.id = f.followed_user_id
            WHERE a.username = ANY($1) AND b.username = ANY($1)
            ORDER BY a.username, b.username
            "#,
        )
        .bind(usernames)
        .fetch_all(&self.pool)
        .await
    }

    /// Number of likes given by any of the given users.
    pub async fn count_likes_by(&self, usernames: &[String]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM likes l
            JOIN users u ON u.id = l.user_id
            WHERE u.username = ANY($1)
            "#,
        )
        .bind(usernames)
        .fetch_one(&self.pool)
        .await
    }
}

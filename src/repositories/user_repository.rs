use crate::models::user::{NewUser, User, UserRow};
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Stored document is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Counts reported by an in-place update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &NewUser) -> RepositoryResult<String>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
    async fn set_role(&self, id: &str, role: &str) -> RepositoryResult<UpdateCounts>;
    async fn set_verified(&self, id: &str, verified: bool) -> RepositoryResult<UpdateCounts>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert_user(&self, user: &NewUser) -> RepositoryResult<String> {
        let id = Uuid::new_v4().to_string();
        let profile = serde_json::to_string(&user.profile)?;

        sqlx::query(
            "INSERT INTO users (id, email, role, is_verify, profile) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&user.email)
        .bind(&user.role)
        .bind(user.is_verify)
        .bind(profile)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, role, is_verify, profile
            FROM users
            WHERE email = ?
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::try_from).transpose()?)
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, role, is_verify, profile FROM users ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn set_role(&self, id: &str, role: &str) -> RepositoryResult<UpdateCounts> {
        let mut tx = self.pool.begin().await?;

        let matched: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let modified = sqlx::query("UPDATE users SET role = ? WHERE id = ? AND role IS NOT ?")
            .bind(role)
            .bind(id)
            .bind(role)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(UpdateCounts {
            matched: matched as u64,
            modified,
        })
    }

    async fn set_verified(&self, id: &str, verified: bool) -> RepositoryResult<UpdateCounts> {
        let mut tx = self.pool.begin().await?;

        let matched: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let modified =
            sqlx::query("UPDATE users SET is_verify = ? WHERE id = ? AND is_verify IS NOT ?")
                .bind(verified)
                .bind(id)
                .bind(verified)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        tx.commit().await?;

        Ok(UpdateCounts {
            matched: matched as u64,
            modified,
        })
    }
}

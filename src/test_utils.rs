pub mod test_helpers {
    use crate::{models::IdentityClaims, AppState};
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use uuid::Uuid;

    pub const TEST_SECRET: &str = "test-access-token-secret-0123456789abcdef";

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Application state over `pool`, signing with [`TEST_SECRET`]
    pub fn create_test_state(pool: SqlitePool) -> AppState {
        AppState::new(pool, Some(TEST_SECRET.to_string()))
    }

    /// Insert a user row directly, bypassing registration rules
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        role: Option<&str>,
    ) -> Result<String, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO users (id, email, role, is_verify, profile) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(email)
        .bind(role)
        .bind(false)
        .bind("{}")
        .execute(pool)
        .await?;

        Ok(id)
    }

    pub async fn count_users(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// `Authorization` header value carrying a fresh token for `email`
    pub fn bearer_for(state: &AppState, email: &str) -> String {
        match state.token_service.issue(&IdentityClaims::new(email)) {
            Ok(token) => format!("Bearer {}", token),
            Err(e) => panic!("Failed to issue test token: {}", e),
        }
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}

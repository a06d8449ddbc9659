pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<services::UserService>,
    pub role_service: Arc<services::RoleService>,
    pub token_service: Arc<services::TokenService>,
    pub document_service: Arc<services::DocumentService>,
}

impl AppState {
    /// Wire the SQLite repositories and services around one pool.
    pub fn new(pool: SqlitePool, access_token_secret: Option<String>) -> Self {
        let user_repository = Arc::new(repositories::SqliteUserRepository::new(pool.clone()));
        let document_repository =
            Arc::new(repositories::SqliteDocumentRepository::new(pool.clone()));

        AppState {
            user_service: Arc::new(services::UserService::new(user_repository.clone())),
            role_service: Arc::new(services::RoleService::new(user_repository)),
            token_service: Arc::new(services::TokenService::new(access_token_secret)),
            document_service: Arc::new(services::DocumentService::new(document_repository)),
        }
    }
}

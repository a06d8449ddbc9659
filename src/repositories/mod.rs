pub mod document_repository;
pub mod user_repository;

pub use document_repository::{DocumentRepository, SqliteDocumentRepository};
pub use user_repository::{
    RepositoryError, RepositoryResult, SqliteUserRepository, UpdateCounts, UserRepository,
};

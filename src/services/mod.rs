pub mod document_service;
pub mod role_service;
pub mod token_service;
pub mod user_service;

pub use document_service::DocumentService;
pub use role_service::{RoleService, RoleServiceError};
pub use token_service::{TokenError, TokenService, TOKEN_TTL_SECONDS};
pub use user_service::{UserService, UserServiceError};

pub mod claims;
pub mod document;
pub mod user;
pub mod write_result;

pub use claims::{ClaimsError, IdentityClaims, VerifiedIdentity};
pub use document::{Collection, Document};
pub use user::{NewUser, Role, User};
pub use write_result::{InsertResult, RegisterOutcome, UpdateResult};

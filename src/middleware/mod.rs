pub mod access_guard;

pub use access_guard::{extract_bearer_token, require_token};

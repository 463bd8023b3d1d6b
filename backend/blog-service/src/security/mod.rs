/// Security module
///
/// Password hashing lives here; token issue/verify is the shared
/// `token-core` crate.
pub mod password;

pub use password::{hash_password, verify_password, PasswordPolicy};

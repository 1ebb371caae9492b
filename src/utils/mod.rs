//! Utility functions

pub mod cookies;
pub mod crypto;
pub mod validation;

pub use cookies::{expired_cookie, read_cookie, session_cookie, transient_cookie};
pub use crypto::{generate_secure_token, hash_string};
pub use validation::{activity_label, parse_hours, parse_role, sanitize_string, validate_hours};

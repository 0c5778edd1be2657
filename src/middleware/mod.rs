pub mod auth;

pub use auth::{require_role, AccessGate, AllowList, AuthUser};

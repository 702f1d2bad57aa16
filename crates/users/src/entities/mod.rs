//! Domain entities for users.

pub mod user;

pub use user::{User, UserRole};

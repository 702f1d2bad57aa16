//! # Sitegate Users Crate
//!
//! User identity, roles, and the single signed-in session of a running site.
//!
//! ## Architecture
//!
//! - **Entities**: the persisted [`User`] record and its [`UserRole`]
//! - **Services**: [`SessionManager`], the only owner of the current user
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sitegate_store::MemoryStore;
//! use sitegate_users::{SessionManager, User, UserRole};
//!
//! # async fn demo() -> sitegate_store::StoreResult<()> {
//! let mut session = SessionManager::initialize(MemoryStore::new()).await?;
//! session.login(User::new("1", "rahim", UserRole::Member)).await?;
//! assert!(session.is_authenticated());
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod services;

pub use entities::{User, UserRole};
pub use services::SessionManager;

//! The signed-in session of a running site.

use crate::entities::User;
use sitegate_store::{
    read_json, remove_record, write_json, KeyValueStore, StoreError, StoreResult,
    CURRENT_USER_KEY,
};
use tracing::{info, warn};

/// Owns the current user and keeps it in step with the `current_user` record.
///
/// `login` and `logout` are the only ways to change the session. Both write to
/// the store before touching the in-memory value, so a failed write leaves the
/// session as it was.
pub struct SessionManager<S> {
    store: S,
    current: Option<User>,
    generation: u64,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Restore the session persisted by a previous run.
    ///
    /// Any stored JSON object restores a session. A record that is not a JSON
    /// object, `null` included, counts as no session.
    pub async fn initialize(store: S) -> StoreResult<Self> {
        let current = match read_json::<_, User>(&store, CURRENT_USER_KEY).await {
            Ok(user) => user,
            Err(StoreError::Malformed { source, .. }) => {
                warn!(error = %source, "ignoring malformed persisted session");
                None
            }
            Err(other) => return Err(other),
        };

        match &current {
            Some(user) => info!(user = %user.username, role = %user.role, "restored session"),
            None => info!("starting anonymous session"),
        }

        Ok(Self {
            store,
            current,
            generation: 0,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Bumped on every login or logout; views compare it to know they are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Make `user` the current session. Profile edits come through here too.
    pub async fn login(&mut self, user: User) -> StoreResult<()> {
        write_json(&self.store, CURRENT_USER_KEY, &user).await?;

        info!(user = %user.username, role = %user.role, "session started");
        self.current = Some(user);
        self.generation += 1;
        Ok(())
    }

    /// Return to an anonymous session. Calling it again is harmless.
    pub async fn logout(&mut self) -> StoreResult<()> {
        remove_record(&self.store, CURRENT_USER_KEY).await?;

        if let Some(user) = self.current.take() {
            info!(user = %user.username, "session ended");
        }
        self.generation += 1;
        Ok(())
    }
}

//! # Backend traits — the seam between recipe logic and the hosted service
//!
//! Two async traits describe everything the application needs from its
//! backend-as-a-service:
//!
//! | Trait | Methods |
//! |-------|---------|
//! | [`AuthBackend`] | `sign_up`, `sign_in_with_password`, `sign_out`, plus the synchronous `session` / `subscribe` pair for observing the current [`Session`]. |
//! | [`RecipeTable`] | `select_all` (newest first), `insert`, `update` and `delete` on the `recipes` table. |
//!
//! Implementations live in [`crate::memory`] (tests and offline demos) and in the
//! `api` crate (Supabase over HTTP). Both keep the session in a [`SessionState`],
//! a `tokio::sync::watch` channel, so that exactly one subscriber at the
//! application root can react to sign-in and sign-out.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::BackendError;
use crate::models::{NewRecipe, Recipe, RecipeChanges, RecipeId, Session, SignUpOutcome};

/// Receiving half of the session-change channel.
pub type SessionWatch = watch::Receiver<Option<Session>>;

/// Authentication operations.
pub trait AuthBackend {
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<SignUpOutcome, BackendError>>;
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, BackendError>>;
    fn sign_out(&self) -> impl Future<Output = Result<(), BackendError>>;

    /// The session currently held by the client, if any.
    fn session(&self) -> Option<Session>;
    /// A receiver that wakes on every session change.
    fn subscribe(&self) -> SessionWatch;
}

/// Row operations on the `recipes` table, scoped by the backend's access rules
/// to the signed-in user.
pub trait RecipeTable {
    /// Every visible row, ordered by `created_at` descending.
    fn select_all(&self) -> impl Future<Output = Result<Vec<Recipe>, BackendError>>;
    fn insert(&self, recipe: &NewRecipe) -> impl Future<Output = Result<Recipe, BackendError>>;
    fn update(
        &self,
        id: &RecipeId,
        changes: &RecipeChanges,
    ) -> impl Future<Output = Result<(), BackendError>>;
    fn delete(&self, id: &RecipeId) -> impl Future<Output = Result<(), BackendError>>;
}

/// Shared, observable session slot.
#[derive(Clone, Debug)]
pub struct SessionState {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionState {
    pub fn new(initial: Option<Session>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Replace the session and notify subscribers when it actually changed.
    pub fn set(&self, session: Option<Session>) {
        self.tx.send_if_modified(|slot| {
            if *slot == session {
                return false;
            }
            *slot = session;
            true
        });
    }

    pub fn subscribe(&self) -> SessionWatch {
        self.tx.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(None)
    }
}

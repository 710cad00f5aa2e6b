use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::backend::{AuthBackend, RecipeTable, SessionState, SessionWatch};
use crate::error::BackendError;
use crate::models::{
    NewRecipe, Recipe, RecipeChanges, RecipeId, Session, SessionUser, SignUpOutcome,
};

/// In-memory backend for the store's unit tests.
///
/// Mirrors the hosted service closely enough to exercise the UI logic: rows are
/// scoped to the signed-in owner, inserts for another owner are refused, and
/// `created_at` is strictly increasing so ordering is deterministic.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
    session: SessionState,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    rows: Vec<Recipe>,
    last_created_at: Option<DateTime<Utc>>,
    skip_confirmation: bool,
    offline: bool,
    table_requests: usize,
}

#[derive(Debug)]
struct Account {
    id: Uuid,
    password: String,
    confirmed: bool,
}

impl MemoryBackend {
    /// A backend that requires email confirmation after sign-up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign new users in immediately instead of asking them to confirm.
    pub fn without_confirmation(self) -> Self {
        self.lock().skip_confirmation = true;
        self
    }

    /// Mark a pending account as confirmed, as the emailed link would.
    pub fn confirm_email(&self, email: &str) {
        if let Some(account) = self.lock().accounts.get_mut(email) {
            account.confirmed = true;
        }
    }

    /// Make every table operation fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Number of table operations attempted so far.
    pub fn table_requests(&self) -> usize {
        self.lock().table_requests
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_session(&self, id: Uuid, email: &str) -> Session {
        let session = Session {
            access_token: format!("memory-{}", Uuid::new_v4()),
            refresh_token: String::new(),
            expires_at: None,
            user: SessionUser {
                id,
                email: email.to_string(),
            },
        };
        self.session.set(Some(session.clone()));
        session
    }

    /// Count the request and resolve the acting user.
    fn begin_table_request(&self, inner: &mut Inner) -> Result<Uuid, BackendError> {
        inner.table_requests += 1;
        if inner.offline {
            return Err(BackendError::Network("backend unreachable".to_string()));
        }
        self.session
            .current()
            .map(|s| s.user_id())
            .ok_or(BackendError::NotSignedIn)
    }
}

impl Inner {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created_at {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_created_at = Some(stamp);
        stamp
    }
}

impl AuthBackend for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BackendError> {
        let (id, confirmed) = {
            let mut inner = self.lock();
            if inner.accounts.contains_key(email) {
                return Err(BackendError::Auth("User already registered".to_string()));
            }
            let id = Uuid::new_v4();
            let confirmed = inner.skip_confirmation;
            inner.accounts.insert(
                email.to_string(),
                Account {
                    id,
                    password: password.to_string(),
                    confirmed,
                },
            );
            (id, confirmed)
        };
        if confirmed {
            Ok(SignUpOutcome::SignedIn(self.open_session(id, email)))
        } else {
            Ok(SignUpOutcome::ConfirmationRequired)
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let id = {
            let inner = self.lock();
            let account = inner
                .accounts
                .get(email)
                .filter(|a| a.password == password)
                .ok_or_else(|| BackendError::Auth("Invalid login credentials".to_string()))?;
            if !account.confirmed {
                return Err(BackendError::Auth("Email not confirmed".to_string()));
            }
            account.id
        };
        Ok(self.open_session(id, email))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.session.set(None);
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        self.session.current()
    }

    fn subscribe(&self) -> SessionWatch {
        self.session.subscribe()
    }
}

impl RecipeTable for MemoryBackend {
    async fn select_all(&self) -> Result<Vec<Recipe>, BackendError> {
        let mut inner = self.lock();
        let owner = self.begin_table_request(&mut inner)?;
        let mut rows: Vec<Recipe> = inner
            .rows
            .iter()
            .filter(|r| r.user_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, recipe: &NewRecipe) -> Result<Recipe, BackendError> {
        let mut inner = self.lock();
        let owner = self.begin_table_request(&mut inner)?;
        if recipe.user_id != owner {
            return Err(BackendError::Api {
                status: 403,
                message: "new row violates row-level security policy for table \"recipes\""
                    .to_string(),
            });
        }
        let row = Recipe {
            id: RecipeId(Uuid::new_v4()),
            user_id: recipe.user_id,
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            is_public: recipe.is_public,
            created_at: inner.next_timestamp(),
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &RecipeId, changes: &RecipeChanges) -> Result<(), BackendError> {
        let mut inner = self.lock();
        let owner = self.begin_table_request(&mut inner)?;
        // Rows outside the caller's scope are silently unmatched.
        if let Some(row) = inner
            .rows
            .iter_mut()
            .find(|r| r.id == *id && r.user_id == owner)
        {
            row.title = changes.title.clone();
            row.ingredients = changes.ingredients.clone();
            row.instructions = changes.instructions.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), BackendError> {
        let mut inner = self.lock();
        let owner = self.begin_table_request(&mut inner)?;
        inner.rows.retain(|r| !(r.id == *id && r.user_id == owner));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_recipe(owner: Uuid, title: &str) -> NewRecipe {
        NewRecipe::private(owner, title.into(), vec!["Salt".into()], "Season.".into())
    }

    #[tokio::test]
    async fn test_sign_up_requires_confirmation_by_default() {
        let backend = MemoryBackend::new();
        let outcome = backend.sign_up("a@example.com", "secret").await.unwrap();
        assert_eq!(outcome, SignUpOutcome::ConfirmationRequired);
        assert!(backend.session().is_none());

        let err = backend
            .sign_in_with_password("a@example.com", "secret")
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::Auth("Email not confirmed".into()));

        backend.confirm_email("a@example.com");
        let session = backend
            .sign_in_with_password("a@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(session.email(), "a@example.com");
        assert_eq!(backend.session(), Some(session));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let backend = MemoryBackend::new().without_confirmation();
        backend.sign_up("a@example.com", "secret").await.unwrap();
        backend.sign_out().await.unwrap();

        let err = backend
            .sign_in_with_password("a@example.com", "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(backend.session().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_fails() {
        let backend = MemoryBackend::new();
        backend.sign_up("a@example.com", "secret").await.unwrap();
        assert!(matches!(
            backend.sign_up("a@example.com", "other").await,
            Err(BackendError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_table_requires_session() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.select_all().await, Err(BackendError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_rows_are_scoped_to_owner() {
        let backend = MemoryBackend::new().without_confirmation();
        backend.sign_up("a@example.com", "secret").await.unwrap();
        let alice = backend.session().unwrap().user_id();
        backend.insert(&new_recipe(alice, "Alice's soup")).await.unwrap();

        backend.sign_up("b@example.com", "secret").await.unwrap();
        let bob = backend.session().unwrap().user_id();
        assert!(backend.select_all().await.unwrap().is_empty());

        let err = backend.insert(&new_recipe(alice, "Forged")).await.unwrap_err();
        assert!(matches!(err, BackendError::Api { status: 403, .. }));

        backend.insert(&new_recipe(bob, "Bob's stew")).await.unwrap();
        let titles: Vec<String> = backend
            .select_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Bob's stew"]);
    }

    #[tokio::test]
    async fn test_created_at_strictly_increases() {
        let backend = MemoryBackend::new().without_confirmation();
        backend.sign_up("a@example.com", "secret").await.unwrap();
        let owner = backend.session().unwrap().user_id();
        let first = backend.insert(&new_recipe(owner, "1")).await.unwrap();
        let second = backend.insert(&new_recipe(owner, "2")).await.unwrap();
        assert!(second.created_at > first.created_at);
    }

    #[tokio::test]
    async fn test_offline_counts_requests() {
        let backend = MemoryBackend::new().without_confirmation();
        backend.sign_up("a@example.com", "secret").await.unwrap();
        backend.set_offline(true);
        assert!(matches!(
            backend.select_all().await,
            Err(BackendError::Network(_))
        ));
        assert_eq!(backend.table_requests(), 1);
    }
}

//! # Supabase client — the hosted backend over HTTP
//!
//! [`SupabaseClient`] implements [`AuthBackend`] and [`RecipeTable`] with plain
//! `reqwest` calls against the project's GoTrue and PostgREST endpoints:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `sign_up` | `POST /auth/v1/signup` |
//! | `sign_in_with_password` | `POST /auth/v1/token?grant_type=password` |
//! | `sign_out` | `POST /auth/v1/logout` |
//! | token refresh | `POST /auth/v1/token?grant_type=refresh_token` |
//! | `select_all` | `GET /rest/v1/recipes?select=*&order=created_at.desc` |
//! | `insert` | `POST /rest/v1/recipes` (`Prefer: return=representation`) |
//! | `update` | `PATCH /rest/v1/recipes?id=eq.<id>` |
//! | `delete` | `DELETE /rest/v1/recipes?id=eq.<id>` |
//!
//! Every request carries the anon key as `apikey`; table requests authorise
//! with the session's access token, which is refreshed first when it is within
//! [`auth::REFRESH_MARGIN_SECS`] of expiring. A refresh the server rejects
//! signs the user out locally. The session lives in a [`SessionState`] and is
//! mirrored into browser storage so a reload stays signed in.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use store::{
    AuthBackend, BackendError, NewRecipe, Recipe, RecipeChanges, RecipeId, RecipeTable, Session,
    SessionState, SessionWatch, SignUpOutcome,
};

use crate::auth::{self, Credentials, RefreshGrant, SignUpResponse};
use crate::config::SupabaseConfig;
use crate::rest;

/// Shared handle to the backend. Cheap to clone.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: Arc<SupabaseConfig>,
    session: SessionState,
    refresh_lock: Arc<Mutex<()>>,
}

impl SupabaseClient {
    /// Build a client, restoring any session saved by a previous page load.
    pub fn new(config: SupabaseConfig) -> Self {
        let restored = auth::load_session();
        if let Some(ref session) = restored {
            tracing::info!("Restored session for {}", session.email());
        }
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
            session: SessionState::new(restored),
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    fn with_anon_key(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.config.anon_key)
    }

    /// Requests made before there is a session authorise with the anon key.
    fn anonymous(&self, builder: RequestBuilder) -> RequestBuilder {
        self.with_anon_key(builder).bearer_auth(&self.config.anon_key)
    }

    /// Attach `apikey` and a current bearer token.
    async fn authorised(&self, builder: RequestBuilder) -> Result<RequestBuilder, BackendError> {
        let session = self.fresh_session().await?;
        Ok(self
            .with_anon_key(builder)
            .bearer_auth(&session.access_token))
    }

    /// The current session, refreshed first when its access token is about to
    /// expire.
    ///
    /// Fails with [`BackendError::NotSignedIn`] without a session. When the
    /// server rejects the refresh token the session is cleared, which signs
    /// the user out everywhere that observes it.
    pub async fn fresh_session(&self) -> Result<Session, BackendError> {
        let session = self.session.current().ok_or(BackendError::NotSignedIn)?;
        if !auth::needs_refresh(&session, now()) {
            return Ok(session);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another request may have refreshed while this one waited.
        let session = self.session.current().ok_or(BackendError::NotSignedIn)?;
        if !auth::needs_refresh(&session, now()) {
            return Ok(session);
        }

        match self.refresh(&session).await {
            Ok(fresh) => Ok(fresh),
            Err(e @ BackendError::Auth(_)) => {
                tracing::warn!("Session refresh rejected, signing out: {e}");
                self.set_session(None);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    async fn refresh(&self, session: &Session) -> Result<Session, BackendError> {
        if session.refresh_token.is_empty() {
            return Err(BackendError::Auth("Session expired".to_string()));
        }
        let url = rest::refresh_url(&self.config.url)?;
        let request = self.anonymous(self.http.post(url)).json(&RefreshGrant {
            refresh_token: &session.refresh_token,
        });
        let response = check_auth(send(request).await?).await?;
        let fresh: Session = decode(response).await?;
        tracing::info!("Refreshed session for {}", fresh.email());
        self.set_session(Some(fresh.clone()));
        Ok(fresh)
    }

    fn set_session(&self, session: Option<Session>) {
        match session {
            Some(ref s) => auth::save_session(s),
            None => auth::clear_session(),
        }
        self.session.set(session);
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Two handles are equal when they share one underlying client.
impl PartialEq for SupabaseClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
    builder
        .send()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))
}

/// Map a non-success PostgREST response to [`BackendError::Api`].
async fn check_table(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Api {
        status: status.as_u16(),
        message: rest::error_message(status.as_u16(), &body),
    })
}

/// Map a non-success GoTrue response to [`BackendError::Auth`].
async fn check_auth(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Auth(rest::error_message(status.as_u16(), &body)))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

impl AuthBackend for SupabaseClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BackendError> {
        let url = rest::auth_url(&self.config.url, "signup")?;
        let request = self
            .anonymous(self.http.post(url))
            .json(&Credentials { email, password });
        let response = check_auth(send(request).await?).await?;
        let outcome = SignUpOutcome::from(decode::<SignUpResponse>(response).await?);
        if let SignUpOutcome::SignedIn(ref session) = outcome {
            tracing::info!("Signed up and signed in as {}", session.email());
            self.set_session(Some(session.clone()));
        } else {
            tracing::info!("Signed up {email}, confirmation pending");
        }
        Ok(outcome)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let url = rest::sign_in_url(&self.config.url)?;
        let request = self
            .anonymous(self.http.post(url))
            .json(&Credentials { email, password });
        let response = check_auth(send(request).await?).await?;
        let session: Session = decode(response).await?;
        tracing::info!("Signed in as {}", session.email());
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Clears the local session first, then revokes the token remotely.
    async fn sign_out(&self) -> Result<(), BackendError> {
        let Some(session) = self.session.current() else {
            return Ok(());
        };
        self.set_session(None);
        tracing::info!("Signed out {}", session.email());

        let url = rest::auth_url(&self.config.url, "logout")?;
        let request = self
            .with_anon_key(self.http.post(url))
            .bearer_auth(&session.access_token);
        check_auth(send(request).await?).await?;
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        self.session.current()
    }

    fn subscribe(&self) -> SessionWatch {
        self.session.subscribe()
    }
}

impl RecipeTable for SupabaseClient {
    async fn select_all(&self) -> Result<Vec<Recipe>, BackendError> {
        let url = rest::select_recipes_url(&self.config.url)?;
        let request = self.authorised(self.http.get(url)).await?;
        let response = check_table(send(request).await?).await?;
        decode(response).await
    }

    async fn insert(&self, recipe: &NewRecipe) -> Result<Recipe, BackendError> {
        let url = rest::insert_recipe_url(&self.config.url)?;
        let request = self
            .authorised(self.http.post(url))
            .await?
            .header("Prefer", "return=representation")
            .json(recipe);
        let response = check_table(send(request).await?).await?;
        let mut rows: Vec<Recipe> = decode(response).await?;
        if rows.is_empty() {
            return Err(BackendError::Decode("insert returned no row".to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update(&self, id: &RecipeId, changes: &RecipeChanges) -> Result<(), BackendError> {
        let url = rest::recipe_by_id_url(&self.config.url, id)?;
        let request = self
            .authorised(self.http.patch(url))
            .await?
            .header("Prefer", "return=minimal")
            .json(changes);
        check_table(send(request).await?).await?;
        Ok(())
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), BackendError> {
        let url = rest::recipe_by_id_url(&self.config.url, id)?;
        let request = self.authorised(self.http.delete(url)).await?;
        check_table(send(request).await?).await?;
        Ok(())
    }
}

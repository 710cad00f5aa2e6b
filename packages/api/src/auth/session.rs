//! Session persistence across page reloads.
//!
//! On the web the session is kept in `localStorage` under
//! [`SESSION_STORAGE_KEY`] as JSON. Native builds have no persistent slot and
//! start signed out. Storage failures are logged and otherwise ignored: losing
//! the saved session only means signing in again.
//!
//! A restored session whose access token has lapsed is kept as long as it
//! carries a refresh token; the client exchanges it on first use.

use store::Session;

/// Key for storing the serialised session.
pub const SESSION_STORAGE_KEY: &str = "recipe-vault.session";

/// Refresh this many seconds before the access token expires.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Restore the saved session, dropping it when it has expired and cannot be
/// refreshed.
pub fn load_session() -> Option<Session> {
    let raw = read()?;
    let session: Session = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Discarding unreadable saved session: {e}");
            clear_session();
            return None;
        }
    };
    if !restorable(&session, chrono::Utc::now().timestamp()) {
        tracing::debug!("Saved session expired");
        clear_session();
        return None;
    }
    Some(session)
}

pub fn save_session(session: &Session) {
    match serde_json::to_string(session) {
        Ok(raw) => write(&raw),
        Err(e) => tracing::warn!("Failed to serialise session: {e}"),
    }
}

pub fn clear_session() {
    remove();
}

pub(crate) fn is_expired(session: &Session, now: i64) -> bool {
    session.expires_at.is_some_and(|at| at <= now)
}

fn restorable(session: &Session, now: i64) -> bool {
    !is_expired(session, now) || !session.refresh_token.is_empty()
}

/// Whether the access token expires within [`REFRESH_MARGIN_SECS`] of `now`.
pub fn needs_refresh(session: &Session, now: i64) -> bool {
    session
        .expires_at
        .is_some_and(|at| at - now <= REFRESH_MARGIN_SECS)
}

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
fn read() -> Option<String> {
    storage()?.get_item(SESSION_STORAGE_KEY).ok()?
}

#[cfg(target_arch = "wasm32")]
fn write(raw: &str) {
    if let Some(storage) = storage() {
        if let Err(e) = storage.set_item(SESSION_STORAGE_KEY, raw) {
            tracing::warn!("Failed to save session: {e:?}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn remove() {
    if let Some(storage) = storage() {
        if let Err(e) = storage.remove_item(SESSION_STORAGE_KEY) {
            tracing::warn!("Failed to clear saved session: {e:?}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn write(_raw: &str) {}

#[cfg(not(target_arch = "wasm32"))]
fn remove() {}

//! Authentication payloads for the GoTrue endpoints.

mod session;

pub use session::{
    clear_session, load_session, needs_refresh, save_session, REFRESH_MARGIN_SECS,
    SESSION_STORAGE_KEY,
};

use serde::{Deserialize, Serialize};
use store::{Session, SessionUser, SignUpOutcome};

/// Body of `signup` and `token?grant_type=password`.
#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `token?grant_type=refresh_token`.
#[derive(Debug, Serialize)]
pub struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

/// `signup` answers with a full session when the project auto-confirms, and
/// with the bare user record when an email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(SessionUser),
}

impl From<SignUpResponse> for SignUpOutcome {
    fn from(response: SignUpResponse) -> Self {
        match response {
            SignUpResponse::Session(session) => SignUpOutcome::SignedIn(session),
            SignUpResponse::User(_) => SignUpOutcome::ConfirmationRequired,
        }
    }
}

//! # Domain models for recipes and sessions
//!
//! Defines the data structures exchanged with the backend's `recipes` table and
//! authentication endpoints. Every type here is `Serialize + Deserialize` and
//! matches the row shape on the wire, so the Supabase client can hand them to
//! `serde_json` directly.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Recipe`] | One persisted row: server-assigned `id` and `created_at`, the owning `user_id`, and the editable title / ingredients / instructions. |
//! | [`NewRecipe`] | The insert payload. Only built through [`NewRecipe::private`], which pins `is_public` to `false`. |
//! | [`RecipeChanges`] | The update payload. Carries only the mutable columns, so an update can never touch `id`, `user_id` or `created_at`. |
//! | [`Session`] | The authenticated user's tokens plus the [`SessionUser`] identity. |

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned recipe identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub Uuid);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A recipe row as stored in the `recipes` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    /// Owner; always the user who created the row.
    pub user_id: Uuid,
    pub title: String,
    /// Ordered ingredient lines, each non-empty after trimming.
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Written as `false` on insert and never read by the UI.
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new recipe row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub is_public: bool,
    pub user_id: Uuid,
}

impl NewRecipe {
    /// Build a private recipe owned by `owner`.
    pub fn private(
        owner: Uuid,
        title: String,
        ingredients: Vec<String>,
        instructions: String,
    ) -> Self {
        Self {
            title,
            ingredients,
            instructions,
            is_public: false,
            user_id: owner,
        }
    }
}

/// Update payload: the only columns an edit may change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecipeChanges {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// Identity of the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
}

/// An authenticated session as issued by the backend.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Unix timestamp (seconds) after which the access token is rejected.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Result of a successful sign-up.
#[derive(Clone, Debug, PartialEq)]
pub enum SignUpOutcome {
    /// The account exists but must be confirmed through the emailed link.
    ConfirmationRequired,
    /// The backend signed the new user in immediately.
    SignedIn(Session),
}

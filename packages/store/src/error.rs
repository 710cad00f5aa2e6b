//! Failure kinds shared by every backend implementation.

use thiserror::Error;

/// Why a backend call failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The authentication service rejected the request (bad credentials,
    /// duplicate account, unconfirmed email, ...).
    #[error("{0}")]
    Auth(String),
    /// A table operation needs a session and none is active.
    #[error("You must be signed in")]
    NotSignedIn,
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// A required form field was left empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Title is required")]
    MissingTitle,
    #[error("At least one ingredient is required")]
    MissingIngredients,
    #[error("Instructions are required")]
    MissingInstructions,
}

/// Why a create or edit submission did not go through.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] DraftError),
    /// A submission from the same form is still outstanding.
    #[error("A submission is already in progress")]
    InFlight,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

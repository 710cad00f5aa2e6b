//! Access to the shared Backend Client.

use dioxus::prelude::*;

/// The backend implementation the components talk to.
pub type Backend = api::SupabaseClient;

/// Get the Backend Client provided at the application root.
pub fn use_backend() -> Backend {
    use_context::<Backend>()
}

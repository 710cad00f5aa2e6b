use api::{SupabaseClient, SupabaseConfig};
use dioxus::prelude::*;
use store::AuthBackend;
use ui::views::DashboardView;
use ui::{AuthPanel, NoticeStack, Notices};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let client = use_hook(|| {
        SupabaseConfig::load()
            .map(SupabaseClient::new)
            .map_err(|e| e.to_string())
    });

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match client {
            Ok(client) => rsx! { Vault { client } },
            Err(message) => rsx! { ConfigError { message } },
        }
    }
}

/// Shown when the Supabase project URL or anon key is missing or malformed.
#[component]
fn ConfigError(message: String) -> Element {
    tracing::error!("Configuration error: {message}");
    rsx! {
        div {
            class: "auth-container",
            div {
                class: "auth-form",
                h1 { class: "auth-title", "Recipe Vault is not configured" }
                div { class: "auth-error", "{message}" }
                p {
                    "Set SUPABASE_URL and SUPABASE_ANON_KEY, or provide a recipe-vault.toml."
                }
            }
        }
    }
}

/// Owns the backend handle and the one session subscription, and picks the
/// screen for the current session.
#[component]
fn Vault(client: SupabaseClient) -> Element {
    use_context_provider(|| client.clone());
    use_context_provider(|| Signal::new(Notices::default()));
    let mut session = use_signal(|| client.session());

    use_hook(|| {
        let mut rx = client.subscribe();
        spawn(async move {
            while rx.changed().await.is_ok() {
                let current = rx.borrow_and_update().clone();
                tracing::debug!(signed_in = current.is_some(), "Session changed");
                session.set(current);
            }
        });

        // A restored session may hold a lapsed access token.
        if client.session().is_some() {
            let client = client.clone();
            spawn(async move {
                if let Err(e) = client.fresh_session().await {
                    tracing::warn!("Could not refresh restored session: {e}");
                }
            });
        }
    });

    rsx! {
        NoticeStack {}

        match session() {
            Some(session) => rsx! {
                DashboardView { key: "{session.user_id()}", session }
            },
            None => rsx! { AuthPanel {} },
        }
    }
}

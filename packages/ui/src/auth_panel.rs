//! Email/password sign-in and sign-up.

use dioxus::prelude::*;
use store::{AuthBackend, SignUpOutcome};

use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::use_backend;

/// Which request the panel's submit button sends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Login",
            AuthMode::SignUp => "Sign Up",
        }
    }

    /// Label of the link that switches to the other mode.
    pub fn switch_prompt(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Need an account? Sign up",
            AuthMode::SignUp => "Have an account? Login",
        }
    }
}

/// Sign-in / sign-up form.
///
/// A successful sign-in only changes the backend's session; the application
/// root observes that and swaps this panel for the dashboard.
#[component]
pub fn AuthPanel() -> Element {
    let backend = use_backend();
    let mut notices = use_notices();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut mode = use_signal(AuthMode::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_auth = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        loading.set(true);
        error.set(None);
        let backend = backend.clone();
        spawn(async move {
            let (e, p) = (email(), password());

            match mode() {
                AuthMode::SignIn => {
                    if let Err(err) = backend.sign_in_with_password(&e, &p).await {
                        error.set(Some(err.to_string()));
                    }
                }
                AuthMode::SignUp => match backend.sign_up(&e, &p).await {
                    Ok(SignUpOutcome::ConfirmationRequired) => push_notice(
                        &mut notices,
                        NoticeLevel::Info,
                        "Check your email for the confirmation link!",
                    ),
                    Ok(SignUpOutcome::SignedIn(_)) => {}
                    Err(err) => error.set(Some(err.to_string())),
                },
            }

            loading.set(false);
        });
    };

    let current = mode();

    rsx! {
        div {
            class: "auth-container",

            form {
                class: "auth-form",
                onsubmit: handle_auth,

                h1 { class: "auth-title", "{current.title()} to Recipe Vault" }

                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn--primary auth-submit",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Loading..." } else { "{current.title()}" }
                }

                button {
                    class: "auth-switch",
                    r#type: "button",
                    onclick: move |_| {
                        error.set(None);
                        mode.set(current.toggled());
                    },
                    "{current.switch_prompt()}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle_and_labels() {
        let mode = AuthMode::default();
        assert_eq!(mode, AuthMode::SignIn);
        assert_eq!(mode.title(), "Login");
        assert_eq!(mode.switch_prompt(), "Need an account? Sign up");

        let mode = mode.toggled();
        assert_eq!(mode, AuthMode::SignUp);
        assert_eq!(mode.title(), "Sign Up");
        assert_eq!(mode.toggled(), AuthMode::SignIn);
    }
}

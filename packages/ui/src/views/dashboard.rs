use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::{AuthBackend, Dashboard, Followup, Recipe, RecipeBook, RecipeEvent, RecipeId, Session};

use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::{use_backend, AddRecipeForm, Backend, ConfirmDialog, EditRecipeDialog, RecipeCard};
use crate::RECIPES_CSS;

/// Re-fetch the list and replace the dashboard's copy.
fn refresh(book: RecipeBook<Backend>, mut dashboard: Signal<Dashboard>) {
    spawn(async move {
        let fetched = book.fetch_all().await;
        dashboard.write().load(fetched);
    });
}

fn follow(book: RecipeBook<Backend>, dashboard: Signal<Dashboard>, followup: Followup) {
    match followup {
        Followup::Refresh => refresh(book, dashboard),
    }
}

/// The signed-in home screen: recipe grid, create form, edit dialog and
/// delete confirmation.
#[component]
pub fn DashboardView(session: Session) -> Element {
    let backend = use_backend();
    let book = RecipeBook::new(backend.clone());
    let mut dashboard = use_signal(Dashboard::new);
    let mut deleting = use_signal(|| false);
    let mut notices = use_notices();

    // Load recipes on mount
    let _loader = use_resource({
        let book = book.clone();
        move || {
            let book = book.clone();
            async move {
                let fetched = book.fetch_all().await;
                dashboard.write().load(fetched);
            }
        }
    });

    let on_sign_out = {
        let backend = backend.clone();
        move |_: MouseEvent| {
            let backend = backend.clone();
            // The dashboard unmounts as soon as the local session clears.
            spawn_forever(async move {
                if let Err(e) = backend.sign_out().await {
                    tracing::error!("Error signing out: {e}");
                }
            });
        }
    };

    let on_recipe_event = {
        let book = book.clone();
        move |event: RecipeEvent| {
            let followup = dashboard.write().apply(&event);
            follow(book.clone(), dashboard, followup);
        }
    };

    let on_close_edit = {
        let book = book.clone();
        move |_: ()| {
            let followup = dashboard.write().end_edit();
            if let Some(followup) = followup {
                follow(book.clone(), dashboard, followup);
            }
        }
    };

    let on_confirm_delete = {
        let book = book.clone();
        move |_: ()| {
            let Some(id) = dashboard.write().confirm_delete() else {
                return;
            };
            let book = book.clone();
            deleting.set(true);
            spawn(async move {
                match book.delete(id).await {
                    Ok(event) => {
                        let followup = dashboard.write().apply(&event);
                        follow(book, dashboard, followup);
                    }
                    Err(e) => {
                        tracing::error!("Error deleting recipe: {e}");
                        push_notice(&mut notices, NoticeLevel::Error, "Error deleting recipe");
                    }
                }
                deleting.set(false);
            });
        }
    };

    let recipes: Vec<Recipe> = dashboard.read().recipes().to_vec();
    let show_create_form = dashboard.read().is_create_form_shown();
    let create_locked = dashboard.read().is_create_form_locked();
    let editing: Option<Recipe> = dashboard.read().editing().cloned();
    let pending_delete: Option<RecipeId> = dashboard.read().pending_delete();

    rsx! {
        document::Stylesheet { href: RECIPES_CSS }

        div {
            class: "dashboard",

            div {
                class: "dashboard-header",
                h1 { "Welcome, {session.email()}" }
                button {
                    class: "btn btn--danger",
                    onclick: on_sign_out,
                    "Sign Out"
                }
            }

            button {
                class: "btn btn--success dashboard-toggle",
                disabled: create_locked,
                onclick: move |_| dashboard.write().toggle_create_form(),
                if show_create_form { "Hide Form" } else { "Add New Recipe" }
            }

            if show_create_form {
                div {
                    class: "dashboard-create",
                    AddRecipeForm {
                        session: session.clone(),
                        on_event: on_recipe_event.clone(),
                        on_busy: move |busy: bool| dashboard.write().set_create_busy(busy),
                    }
                }
            }

            div {
                class: "recipe-grid",
                for recipe in recipes {
                    RecipeCard {
                        key: "{recipe.id}",
                        recipe: recipe.clone(),
                        busy: deleting(),
                        on_edit: move |recipe: Recipe| dashboard.write().begin_edit(recipe),
                        on_delete: move |id: RecipeId| dashboard.write().request_delete(id),
                    }
                }
            }
        }

        if let Some(recipe) = editing {
            EditRecipeDialog {
                key: "{recipe.id}",
                recipe: recipe.clone(),
                on_event: on_recipe_event.clone(),
                on_busy: move |busy: bool| dashboard.write().set_edit_busy(busy),
                on_close: on_close_edit.clone(),
            }
        }

        if pending_delete.is_some() {
            ConfirmDialog {
                title: "Delete Recipe",
                message: "Are you sure you want to delete this recipe?",
                on_confirm: on_confirm_delete,
                on_cancel: move |_| dashboard.write().cancel_delete(),
            }
        }
    }
}

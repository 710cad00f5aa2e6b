//! # Dashboard state machine
//!
//! [`Dashboard`] owns the transient mirror of the recipe list and the three
//! pieces of UI state around it:
//!
//! - whether the create form is shown,
//! - which recipe (if any) is open in the edit dialog,
//! - which recipe (if any) is waiting for delete confirmation.
//!
//! It performs no I/O. Mutation results arrive as [`RecipeEvent`]s through
//! [`Dashboard::apply`], which updates the UI state and answers with a
//! [`Followup`] telling the caller what to do next. Fetch results arrive through
//! [`Dashboard::load`]; a failed fetch keeps whatever list was shown before.
//!
//! While a create or update request is in flight the form that sent it cannot
//! be hidden or closed, so its outcome always comes back through `apply`.

use crate::book::RecipeEvent;
use crate::error::BackendError;
use crate::models::{Recipe, RecipeId};

/// Work the caller should perform after a state transition.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Followup {
    /// Re-fetch the full list from the backend.
    Refresh,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dashboard {
    recipes: Vec<Recipe>,
    show_create_form: bool,
    editing: Option<Recipe>,
    pending_delete: Option<RecipeId>,
    create_busy: bool,
    edit_busy: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_create_form_shown(&self) -> bool {
        self.show_create_form
    }

    pub fn editing(&self) -> Option<&Recipe> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<RecipeId> {
        self.pending_delete
    }

    /// Replace the list wholesale with a fresh fetch.
    ///
    /// On error the previous list stays on screen and the failure is only logged.
    pub fn load(&mut self, fetched: Result<Vec<Recipe>, BackendError>) {
        match fetched {
            Ok(recipes) => self.recipes = recipes,
            Err(e) => tracing::error!("Error fetching recipes: {e}"),
        }
    }

    /// Flip the create form. Hiding is refused while its insert is in flight.
    pub fn toggle_create_form(&mut self) {
        if self.show_create_form && self.create_busy {
            return;
        }
        self.show_create_form = !self.show_create_form;
    }

    pub fn set_create_busy(&mut self, busy: bool) {
        self.create_busy = busy;
    }

    pub fn is_create_form_locked(&self) -> bool {
        self.show_create_form && self.create_busy
    }

    pub fn set_edit_busy(&mut self, busy: bool) {
        self.edit_busy = busy;
    }

    pub fn begin_edit(&mut self, recipe: Recipe) {
        self.editing = Some(recipe);
    }

    /// Close the edit dialog without saving.
    ///
    /// Returns `None` and keeps the dialog open while its update is in flight.
    pub fn end_edit(&mut self) -> Option<Followup> {
        if self.edit_busy {
            return None;
        }
        self.editing = None;
        Some(Followup::Refresh)
    }

    /// Ask for confirmation before deleting `id`. Nothing is sent yet.
    pub fn request_delete(&mut self, id: RecipeId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the confirmed delete target, if one is pending.
    pub fn confirm_delete(&mut self) -> Option<RecipeId> {
        self.pending_delete.take()
    }

    /// Fold a completed mutation into the UI state.
    pub fn apply(&mut self, event: &RecipeEvent) -> Followup {
        match event {
            RecipeEvent::Created(_) => {
                self.create_busy = false;
                self.show_create_form = false;
            }
            RecipeEvent::Updated(id) | RecipeEvent::Deleted(id) => {
                if self.editing.as_ref().is_some_and(|r| r.id == *id) {
                    self.edit_busy = false;
                    self.editing = None;
                }
            }
        }
        Followup::Refresh
    }
}

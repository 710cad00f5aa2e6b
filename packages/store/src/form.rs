//! Submission state for the create and edit forms.

use crate::book::RecipeEvent;
use crate::draft::RecipeDraft;
use crate::error::SubmitError;
use crate::models::{Recipe, RecipeId};

/// Which row a form writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(RecipeId),
}

/// Field values plus the in-flight flag that disables the submit control.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeForm {
    pub draft: RecipeDraft,
    target: FormTarget,
    submitting: bool,
}

impl RecipeForm {
    pub fn create() -> Self {
        Self {
            draft: RecipeDraft::new(),
            target: FormTarget::Create,
            submitting: false,
        }
    }

    pub fn edit(recipe: &Recipe) -> Self {
        Self {
            draft: RecipeDraft::from_recipe(recipe),
            target: FormTarget::Edit(recipe.id),
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mark the form busy and hand out the draft to submit.
    ///
    /// Fails without changing anything when a submission is already in flight
    /// or a required field is empty.
    pub fn begin_submit(&mut self) -> Result<RecipeDraft, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        self.draft.validate()?;
        self.submitting = true;
        Ok(self.draft.clone())
    }

    /// Settle an outstanding submission.
    ///
    /// A successful create clears the fields; every other outcome keeps them.
    pub fn finish_submit(&mut self, outcome: &Result<RecipeEvent, SubmitError>) {
        self.submitting = false;
        if outcome.is_ok() && self.target == FormTarget::Create {
            self.draft.clear();
        }
    }
}

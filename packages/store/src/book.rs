//! Recipe mutations over a [`RecipeTable`].
//!
//! Every mutating call returns a [`RecipeEvent`] describing what changed. The
//! caller feeds it to [`crate::Dashboard::apply`] and decides from the returned
//! followup whether to re-fetch; nothing here refreshes anything on its own.

use crate::backend::RecipeTable;
use crate::draft::RecipeDraft;
use crate::error::{BackendError, SubmitError};
use crate::models::{Recipe, RecipeId, Session};

/// A completed mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum RecipeEvent {
    Created(Recipe),
    Updated(RecipeId),
    Deleted(RecipeId),
}

/// Recipe operations bound to one backend.
#[derive(Clone, Debug)]
pub struct RecipeBook<B> {
    backend: B,
}

impl<B: RecipeTable> RecipeBook<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All recipes visible to the current session, newest first.
    pub async fn fetch_all(&self) -> Result<Vec<Recipe>, BackendError> {
        let recipes = self.backend.select_all().await?;
        tracing::debug!("Fetched {} recipes", recipes.len());
        Ok(recipes)
    }

    /// Insert a private recipe owned by the session's user.
    pub async fn create(
        &self,
        session: &Session,
        draft: &RecipeDraft,
    ) -> Result<RecipeEvent, SubmitError> {
        let new = draft.to_new_recipe(session.user_id())?;
        let recipe = self.backend.insert(&new).await?;
        tracing::info!("Created recipe {}", recipe.id);
        Ok(RecipeEvent::Created(recipe))
    }

    /// Overwrite the title, ingredients and instructions of `id`.
    pub async fn update(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<RecipeEvent, SubmitError> {
        let changes = draft.to_changes()?;
        self.backend.update(&id, &changes).await?;
        tracing::info!("Updated recipe {id}");
        Ok(RecipeEvent::Updated(id))
    }

    pub async fn delete(&self, id: RecipeId) -> Result<RecipeEvent, BackendError> {
        self.backend.delete(&id).await?;
        tracing::info!("Deleted recipe {id}");
        Ok(RecipeEvent::Deleted(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AuthBackend;
    use crate::error::DraftError;
    use crate::memory::MemoryBackend;

    fn draft(title: &str) -> RecipeDraft {
        RecipeDraft {
            title: title.into(),
            ingredients: "Flour\nWater".into(),
            instructions: "Knead.".into(),
        }
    }

    async fn signed_in() -> (RecipeBook<MemoryBackend>, Session) {
        let backend = MemoryBackend::new().without_confirmation();
        backend.sign_up("cook@example.com", "hunter22").await.unwrap();
        let session = backend.session().unwrap();
        (RecipeBook::new(backend), session)
    }

    #[tokio::test]
    async fn test_create_stamps_owner_and_private() {
        let (book, session) = signed_in().await;
        let event = book.create(&session, &draft("Bread")).await.unwrap();
        let RecipeEvent::Created(recipe) = event else {
            panic!("expected a created event");
        };
        assert_eq!(recipe.user_id, session.user_id());
        assert!(!recipe.is_public);
        assert_eq!(recipe.ingredients, vec!["Flour", "Water"]);
    }

    #[tokio::test]
    async fn test_fetch_all_is_newest_first() {
        let (book, session) = signed_in().await;
        for title in ["t1", "t2", "t3"] {
            book.create(&session, &draft(title)).await.unwrap();
        }
        let titles: Vec<String> = book
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn test_update_changes_only_mutable_fields() {
        let (book, session) = signed_in().await;
        let RecipeEvent::Created(original) = book.create(&session, &draft("Bread")).await.unwrap()
        else {
            panic!("expected a created event");
        };

        let mut edited = RecipeDraft::from_recipe(&original);
        edited.title = "Sourdough".into();
        edited.ingredients.push_str("\n  Starter  ");
        let event = book.update(original.id, &edited).await.unwrap();
        assert_eq!(event, RecipeEvent::Updated(original.id));

        let stored = book.fetch_all().await.unwrap().remove(0);
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.user_id, original.user_id);
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.title, "Sourdough");
        assert_eq!(stored.ingredients, vec!["Flour", "Water", "Starter"]);
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_no_request() {
        let (book, session) = signed_in().await;
        let before = book.backend().table_requests();
        let err = book.create(&session, &RecipeDraft::new()).await.unwrap_err();
        assert_eq!(err, SubmitError::Invalid(DraftError::MissingTitle));
        assert_eq!(book.backend().table_requests(), before);
    }

    #[tokio::test]
    async fn test_backend_failure_is_reported() {
        let (book, session) = signed_in().await;
        book.backend().set_offline(true);
        let err = book.create(&session, &draft("Bread")).await.unwrap_err();
        assert!(matches!(err, SubmitError::Backend(BackendError::Network(_))));

        book.backend().set_offline(false);
        assert!(book.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (book, session) = signed_in().await;
        let RecipeEvent::Created(recipe) = book.create(&session, &draft("Bread")).await.unwrap()
        else {
            panic!("expected a created event");
        };
        let event = book.delete(recipe.id).await.unwrap();
        assert_eq!(event, RecipeEvent::Deleted(recipe.id));
        assert!(book.fetch_all().await.unwrap().is_empty());
    }
}

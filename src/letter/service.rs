//! Letter lifecycle operations with validation and authorization.

use super::repository::LetterRepository;
use super::types::{
    is_hex_color, Letter, LetterDraft, LetterUpdate, NewLetter, MAX_CONTENT_LENGTH,
    MAX_TITLE_LENGTH,
};
use crate::auth::{authorize, Operation, Requester};
use crate::db::DbPool;
use crate::error::{AmoraError, Result};

/// Service wrapping letter storage with the ownership policy.
pub struct LetterService<'a> {
    repo: LetterRepository<'a>,
}

impl<'a> LetterService<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self {
            repo: LetterRepository::new(pool),
        }
    }

    /// Create a letter owned by `owner_id`. The title is optional.
    pub async fn create(&self, owner_id: i64, draft: LetterDraft) -> Result<Letter> {
        if let Some(title) = &draft.title {
            validate_title(title)?;
        }
        validate_content(&draft.content)?;
        if let Some(color) = &draft.background_color {
            validate_color("background_color", color)?;
        }
        if let Some(color) = &draft.text_color {
            validate_color("text_color", color)?;
        }

        self.repo.create(&NewLetter::from_draft(owner_id, draft)).await
    }

    /// Read a letter by id. Reads are public; possession of the id is
    /// the capability.
    pub async fn read(&self, id: &str) -> Result<Letter> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AmoraError::NotFound("letter".to_string()))
    }

    /// List the requester's own letters, newest first.
    pub async fn list(&self, owner_id: i64) -> Result<Vec<Letter>> {
        self.repo.list_by_owner(owner_id).await
    }

    /// Update a letter, enforcing ownership.
    ///
    /// A missing letter reports not-found before authorization, so
    /// callers can distinguish "gone" from "not yours".
    pub async fn update(
        &self,
        id: &str,
        requester: Requester,
        update: LetterUpdate,
    ) -> Result<Letter> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }
        if let Some(content) = &update.content {
            validate_content(content)?;
        }
        if let Some(color) = &update.background_color {
            validate_color("background_color", color)?;
        }
        if let Some(color) = &update.text_color {
            validate_color("text_color", color)?;
        }

        let letter = self.read(id).await?;
        let owner_id = self.check_owner(Operation::Update, requester, letter.owner_id)?;

        if !update.is_empty() {
            self.repo.update_owned(id, owner_id, &update).await?;
        }
        self.read(id).await
    }

    /// Delete a letter, enforcing ownership.
    pub async fn delete(&self, id: &str, requester: Requester) -> Result<()> {
        let letter = self.read(id).await?;
        let owner_id = self.check_owner(Operation::Delete, requester, letter.owner_id)?;

        self.repo.delete_owned(id, owner_id).await?;
        Ok(())
    }

    /// Count the requester's letters.
    pub async fn count(&self, owner_id: i64) -> Result<i64> {
        self.repo.count_by_owner(owner_id).await
    }

    fn check_owner(
        &self,
        operation: Operation,
        requester: Requester,
        owner_id: i64,
    ) -> Result<i64> {
        if !authorize(operation, requester, owner_id).is_allowed() {
            return match requester {
                Requester::Anonymous => Err(AmoraError::Auth("authentication required".to_string())),
                Requester::Account(_) => {
                    Err(AmoraError::Permission("not the letter owner".to_string()))
                }
            };
        }
        match requester {
            Requester::Account(id) => Ok(id),
            Requester::Anonymous => Err(AmoraError::Auth("authentication required".to_string())),
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AmoraError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(AmoraError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(AmoraError::Validation(format!(
            "content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_color(field: &str, value: &str) -> Result<()> {
    if !is_hex_color(value) {
        return Err(AmoraError::Validation(format!(
            "{field} must be a #rrggbb hex color"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{AccountRepository, Database, NewAccount};

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        let owner_id = AccountRepository::new(db.pool())
            .create(&NewAccount::new("writer", "writer@example.com", "hash"))
            .await
            .unwrap()
            .id;
        (db, owner_id)
    }

    fn draft(title: &str, content: &str) -> LetterDraft {
        LetterDraft {
            title: Some(title.to_string()),
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_without_title() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());

        let letter = service
            .create(
                owner_id,
                LetterDraft {
                    content: "hi".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(letter.title, None);
        assert_eq!(letter.content, "hi");

        let fetched = service.read(&letter.id).await.unwrap();
        assert_eq!(fetched.title, None);
        assert_eq!(fetched.content, "hi");
    }

    #[tokio::test]
    async fn test_create_rejects_long_title() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());

        let result = service
            .create(owner_id, draft(&"t".repeat(101), "content"))
            .await;
        assert!(matches!(result, Err(AmoraError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_validates_content() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());

        let result = service.create(owner_id, draft("title", "")).await;
        assert!(matches!(result, Err(AmoraError::Validation(_))));

        let result = service
            .create(owner_id, draft("title", &"c".repeat(5001)))
            .await;
        assert!(matches!(result, Err(AmoraError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_validates_colors() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());

        let bad = LetterDraft {
            background_color: Some("red".to_string()),
            ..draft("title", "content")
        };
        let result = service.create(owner_id, bad).await;
        assert!(matches!(result, Err(AmoraError::Validation(_))));
    }

    #[tokio::test]
    async fn test_read_is_public() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());
        let letter = service.create(owner_id, draft("title", "content")).await.unwrap();

        // read() takes no requester at all
        let fetched = service.read(&letter.id).await.unwrap();
        assert_eq!(fetched.id, letter.id);
    }

    #[tokio::test]
    async fn test_read_missing() {
        let (db, _) = setup().await;
        let service = LetterService::new(db.pool());

        let result = service.read("no-such-id").await;
        assert!(matches!(result, Err(AmoraError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());
        let letter = service.create(owner_id, draft("old", "content")).await.unwrap();

        let update = LetterUpdate {
            title: Some("new".to_string()),
            ..Default::default()
        };
        let updated = service
            .update(&letter.id, Requester::Account(owner_id), update)
            .await
            .unwrap();
        assert_eq!(updated.title.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_update_by_anonymous() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());
        let letter = service.create(owner_id, draft("old", "content")).await.unwrap();

        let update = LetterUpdate {
            title: Some("new".to_string()),
            ..Default::default()
        };
        let result = service.update(&letter.id, Requester::Anonymous, update).await;
        assert!(matches!(result, Err(AmoraError::Auth(_))));
    }

    #[tokio::test]
    async fn test_update_by_non_owner() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());
        let letter = service.create(owner_id, draft("old", "content")).await.unwrap();

        let update = LetterUpdate {
            title: Some("new".to_string()),
            ..Default::default()
        };
        let result = service
            .update(&letter.id, Requester::Account(owner_id + 1), update)
            .await;
        assert!(matches!(result, Err(AmoraError::Permission(_))));
    }

    #[tokio::test]
    async fn test_update_missing_letter() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());

        let update = LetterUpdate {
            title: Some("new".to_string()),
            ..Default::default()
        };
        let result = service
            .update("no-such-id", Requester::Account(owner_id), update)
            .await;
        assert!(matches!(result, Err(AmoraError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_row() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());
        let letter = service.create(owner_id, draft("title", "content")).await.unwrap();

        let unchanged = service
            .update(&letter.id, Requester::Account(owner_id), LetterUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged.title.as_deref(), Some("title"));
        assert_eq!(unchanged.updated_at, letter.updated_at);
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());
        let letter = service.create(owner_id, draft("title", "content")).await.unwrap();

        service
            .delete(&letter.id, Requester::Account(owner_id))
            .await
            .unwrap();
        assert!(matches!(
            service.read(&letter.id).await,
            Err(AmoraError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_by_non_owner() {
        let (db, owner_id) = setup().await;
        let service = LetterService::new(db.pool());
        let letter = service.create(owner_id, draft("title", "content")).await.unwrap();

        let result = service
            .delete(&letter.id, Requester::Account(owner_id + 1))
            .await;
        assert!(matches!(result, Err(AmoraError::Permission(_))));

        // Row survives
        assert!(service.read(&letter.id).await.is_ok());
    }
}

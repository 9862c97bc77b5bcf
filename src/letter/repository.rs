//! Letter persistence.
//!
//! Write operations filter on `id AND owner_id` in the statement
//! itself, so a write can never hit a row the caller does not own
//! even if the service-level check is bypassed.

use sqlx::QueryBuilder;
use uuid::Uuid;

use super::types::{Letter, LetterUpdate, NewLetter};
use crate::db::DbPool;
use crate::error::Result;

/// Repository for letter rows.
pub struct LetterRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> LetterRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new letter and return the stored row.
    ///
    /// The id doubles as the share token, so it must be unguessable;
    /// a random UUID gives 122 bits of entropy.
    pub async fn create(&self, letter: &NewLetter) -> Result<Letter> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO letters (id, owner_id, title, content, background_color, text_color, icon)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&id)
        .bind(letter.owner_id)
        .bind(&letter.title)
        .bind(&letter.content)
        .bind(&letter.background_color)
        .bind(&letter.text_color)
        .bind(&letter.icon)
        .execute(self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| crate::error::AmoraError::NotFound("letter".to_string()))
    }

    /// Fetch a letter by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Letter>> {
        let letter = sqlx::query_as::<_, Letter>(
            r#"
            SELECT id, owner_id, title, content, background_color, text_color, icon,
                   created_at, updated_at
            FROM letters
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(letter)
    }

    /// List an account's letters, newest first.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Letter>> {
        let letters = sqlx::query_as::<_, Letter>(
            r#"
            SELECT id, owner_id, title, content, background_color, text_color, icon,
                   created_at, updated_at
            FROM letters
            WHERE owner_id = $1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(letters)
    }

    /// Apply a partial update to a letter owned by `owner_id`.
    ///
    /// Returns `true` if a row was updated. An update with no set
    /// fields is a no-op that reports `false`.
    pub async fn update_owned(
        &self,
        id: &str,
        owner_id: i64,
        update: &LetterUpdate,
    ) -> Result<bool> {
        if update.is_empty() {
            return Ok(false);
        }

        let mut builder = QueryBuilder::new("UPDATE letters SET ");
        let mut fields = builder.separated(", ");

        if let Some(title) = &update.title {
            // Blanking the title clears it
            let title = Some(title.as_str()).filter(|t| !t.trim().is_empty());
            fields.push("title = ").push_bind_unseparated(title);
        }
        if let Some(content) = &update.content {
            fields.push("content = ").push_bind_unseparated(content);
        }
        if let Some(background_color) = &update.background_color {
            fields
                .push("background_color = ")
                .push_bind_unseparated(background_color);
        }
        if let Some(text_color) = &update.text_color {
            fields.push("text_color = ").push_bind_unseparated(text_color);
        }
        if let Some(icon) = &update.icon {
            fields.push("icon = ").push_bind_unseparated(icon);
        }
        fields.push("updated_at = datetime('now')");

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" AND owner_id = ").push_bind(owner_id);

        let result = builder.build().execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a letter owned by `owner_id`. Returns `true` if a row
    /// was deleted.
    pub async fn delete_owned(&self, id: &str, owner_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM letters WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count letters owned by an account.
    pub async fn count_by_owner(&self, owner_id: i64) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM letters WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{AccountRepository, Database, NewAccount};
    use crate::letter::types::{LetterDraft, DEFAULT_BACKGROUND_COLOR, DEFAULT_ICON};

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
    async fn test_create_and_get() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());

        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("Dear you", "Hello")))
            .await
            .unwrap();
        assert_eq!(letter.owner_id, owner_id);
        assert_eq!(letter.title.as_deref(), Some("Dear you"));
        assert_eq!(letter.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(letter.icon, DEFAULT_ICON);

        let fetched = repo.get_by_id(&letter.id).await.unwrap().unwrap();
        assert_eq!(fetched.content, "Hello");
    }

    #[tokio::test]
    async fn test_create_without_title() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());

        let untitled = LetterDraft {
            content: "Hello".to_string(),
            ..Default::default()
        };
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, untitled))
            .await
            .unwrap();
        assert_eq!(letter.title, None);
        assert_eq!(letter.content, "Hello");
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());

        let a = repo
            .create(&NewLetter::from_draft(owner_id, draft("A", "a")))
            .await
            .unwrap();
        let b = repo
            .create(&NewLetter::from_draft(owner_id, draft("B", "b")))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());

        for title in ["first", "second", "third"] {
            repo.create(&NewLetter::from_draft(owner_id, draft(title, "x")))
                .await
                .unwrap();
        }

        let letters = repo.list_by_owner(owner_id).await.unwrap();
        assert_eq!(letters.len(), 3);
        // Same-second timestamps fall back to insertion order, reversed
        assert_eq!(letters[0].title.as_deref(), Some("third"));
        assert_eq!(letters[2].title.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_list_excludes_other_owners() {
        let (db, owner_id) = setup().await;
        let other = AccountRepository::new(db.pool())
            .create(&NewAccount::new("other", "other@example.com", "hash"))
            .await
            .unwrap()
            .id;
        let repo = LetterRepository::new(db.pool());

        repo.create(&NewLetter::from_draft(owner_id, draft("mine", "x")))
            .await
            .unwrap();
        repo.create(&NewLetter::from_draft(other, draft("theirs", "x")))
            .await
            .unwrap();

        let letters = repo.list_by_owner(owner_id).await.unwrap();
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].title.as_deref(), Some("mine"));
    }

    #[tokio::test]
    async fn test_update_owned() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("Old", "body")))
            .await
            .unwrap();

        let update = LetterUpdate {
            title: Some("New".to_string()),
            icon: Some("🌹".to_string()),
            ..Default::default()
        };
        assert!(repo.update_owned(&letter.id, owner_id, &update).await.unwrap());

        let fetched = repo.get_by_id(&letter.id).await.unwrap().unwrap();
        assert_eq!(fetched.title.as_deref(), Some("New"));
        assert_eq!(fetched.icon, "🌹");
        assert_eq!(fetched.content, "body");
    }

    #[tokio::test]
    async fn test_update_owned_blank_title_clears() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("Old", "body")))
            .await
            .unwrap();

        let update = LetterUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(repo.update_owned(&letter.id, owner_id, &update).await.unwrap());

        let fetched = repo.get_by_id(&letter.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, None);
    }

    #[tokio::test]
    async fn test_update_owned_wrong_owner() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("Old", "body")))
            .await
            .unwrap();

        let update = LetterUpdate {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        assert!(!repo.update_owned(&letter.id, owner_id + 1, &update).await.unwrap());

        let fetched = repo.get_by_id(&letter.id).await.unwrap().unwrap();
        assert_eq!(fetched.title.as_deref(), Some("Old"));
    }

    #[tokio::test]
    async fn test_update_empty_is_noop() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("T", "c")))
            .await
            .unwrap();

        assert!(!repo
            .update_owned(&letter.id, owner_id, &LetterUpdate::default())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_owned() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("T", "c")))
            .await
            .unwrap();

        assert!(repo.delete_owned(&letter.id, owner_id).await.unwrap());
        assert!(repo.get_by_id(&letter.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_owned_wrong_owner() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("T", "c")))
            .await
            .unwrap();

        assert!(!repo.delete_owned(&letter.id, owner_id + 1).await.unwrap());
        assert!(repo.get_by_id(&letter.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_count_by_owner() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        assert_eq!(repo.count_by_owner(owner_id).await.unwrap(), 0);

        repo.create(&NewLetter::from_draft(owner_id, draft("T", "c")))
            .await
            .unwrap();
        assert_eq!(repo.count_by_owner(owner_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_account_cascades() {
        let (db, owner_id) = setup().await;
        let repo = LetterRepository::new(db.pool());
        let letter = repo
            .create(&NewLetter::from_draft(owner_id, draft("T", "c")))
            .await
            .unwrap();

        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(owner_id)
            .execute(db.pool())
            .await
            .unwrap();

        assert!(repo.get_by_id(&letter.id).await.unwrap().is_none());
    }
}

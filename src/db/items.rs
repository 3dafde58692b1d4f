//! Item Store
//!
//! Durable storage for items. The service only sees the `ItemStore` trait so
//! tests and alternative backends can be substituted.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::map_write_error;
use crate::error::StoreError;
use crate::models::{Item, ItemFields};

/// Record storage for items keyed by store-assigned id.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items ordered by id.
    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Item>, StoreError>;

    async fn name_exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Inserts a new item; the store assigns the id.
    async fn insert(&self, fields: &ItemFields) -> Result<Item, StoreError>;

    /// Replaces every writable field of `id`. Returns `None` if the id is gone.
    async fn update(&self, id: i64, fields: &ItemFields) -> Result<Option<Item>, StoreError>;

    /// Removes `id`. Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

/// SQLite implementation of `ItemStore` using sqlx.
#[derive(Clone)]
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, quantity FROM items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find(&self, id: i64) -> Result<Option<Item>, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, quantity FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn name_exists(&self, name: &str) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, fields: &ItemFields) -> Result<Item, StoreError> {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, quantity)
            VALUES (?, ?, ?)
            RETURNING id, name, description, quantity
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields.name))
    }

    async fn update(&self, id: i64, fields: &ItemFields) -> Result<Option<Item>, StoreError> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = ?, description = ?, quantity = ?
            WHERE id = ?
            RETURNING id, name, description, quantity
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields.name))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup_store() -> SqliteItemStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        SqliteItemStore::new(db.pool().clone())
    }

    fn fields(name: &str, quantity: i64) -> ItemFields {
        ItemFields {
            name: name.to_string(),
            description: format!("{} description", name),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let store = setup_store().await;

        let first = store.insert(&fields("First", 1)).await.unwrap();
        let second = store.insert(&fields("Second", 2)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.find(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_insert_duplicate_name_is_conflict() {
        let store = setup_store().await;
        store.insert(&fields("Widget", 1)).await.unwrap();

        let result = store.insert(&fields("Widget", 5)).await;
        assert!(matches!(result, Err(StoreError::Conflict(name)) if name == "Widget"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_ordered_by_id() {
        let store = setup_store().await;
        store.insert(&fields("B", 1)).await.unwrap();
        store.insert(&fields("A", 1)).await.unwrap();

        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = setup_store().await;
        let item = store.insert(&fields("Old", 1)).await.unwrap();

        let updated = store.update(item.id, &fields("New", 9)).await.unwrap().unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "New");
        assert_eq!(updated.quantity, 9);
        assert_eq!(store.find(item.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let store = setup_store().await;
        assert!(store.update(999, &fields("X", 1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_into_taken_name_is_conflict() {
        let store = setup_store().await;
        store.insert(&fields("Taken", 1)).await.unwrap();
        let other = store.insert(&fields("Other", 1)).await.unwrap();

        let result = store.update(other.id, &fields("Taken", 1)).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = setup_store().await;
        let item = store.insert(&fields("Doomed", 1)).await.unwrap();

        assert!(store.delete(item.id).await.unwrap());
        assert!(!store.delete(item.id).await.unwrap());
        assert!(store.find(item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_name_exists() {
        let store = setup_store().await;
        store.insert(&fields("Present", 1)).await.unwrap();

        assert!(store.name_exists("Present").await.unwrap());
        assert!(!store.name_exists("Absent").await.unwrap());
    }

    #[tokio::test]
    async fn test_negative_quantity_rejected_by_schema() {
        let store = setup_store().await;
        let result = store.insert(&fields("Negative", -1)).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }
}

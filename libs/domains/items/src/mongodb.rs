//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc},
    options::ReturnDocument,
};
use std::future::Future;
use std::time::Duration;
use tracing::instrument;

use crate::config::{DEFAULT_OPERATION_TIMEOUT, ItemsConfig};
use crate::document::ItemDocument;
use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemId, NewItem, UpdateItem};
use crate::repository::ItemRepository;

/// MongoDB implementation of the ItemRepository
///
/// Holds a cloneable collection handle and a deadline; no other state, so
/// one instance can serve any number of concurrent callers. Every call is
/// bounded by the same deadline and never retried.
#[derive(Clone)]
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
    operation_timeout: Duration,
}

impl MongoItemRepository {
    /// Bind to the `items` collection with the default 10s deadline
    ///
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoItemRepository::new(&client.database("shop"));
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_config(db, &ItemsConfig::default())
    }

    /// A zero `operation_timeout` falls back to the default deadline
    pub fn with_config(db: &Database, config: &ItemsConfig) -> Self {
        let operation_timeout = if config.operation_timeout.is_zero() {
            DEFAULT_OPERATION_TIMEOUT
        } else {
            config.operation_timeout
        };

        Self {
            collection: db.collection::<ItemDocument>(&config.collection),
            operation_timeout,
        }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<ItemDocument> {
        &self.collection
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    fn id_filter(id: ItemId) -> Document {
        doc! { "_id": id.object_id() }
    }

    /// `$set` for a partial update; `updatedAt` is always written
    fn build_update(input: &UpdateItem, now: bson::DateTime) -> Document {
        let mut set = doc! { "updatedAt": now };

        if let Some(name) = input.name.as_deref().filter(|name| !name.is_empty()) {
            set.insert("name", name);
        }

        if let Some(price) = input.price {
            set.insert("price", price);
        }

        doc! { "$set": set }
    }

    /// Run `call` under the repository deadline. Dropping the future on
    /// expiry aborts the in-flight driver operation.
    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = ItemResult<T>>,
    ) -> ItemResult<T> {
        match tokio::time::timeout(self.operation_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Item store call exceeded its deadline"
                );
                Err(ItemError::Timeout(self.operation_timeout))
            }
        }
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        // The cursor is owned here and killed on drop, whichever way we leave
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<ItemDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Item::try_from).collect()
    }

    async fn insert(&self, input: NewItem) -> ItemResult<Item> {
        let document = ItemDocument::new(input.name, input.price, bson::DateTime::now());
        let result = self.collection.insert_one(&document).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            ItemError::Decode(format!(
                "store assigned a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;

        Item::try_from(document.with_id(id))
    }

    async fn find_by_id(&self, id: ItemId) -> ItemResult<Option<Item>> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn find_and_update(&self, id: ItemId, input: &UpdateItem) -> ItemResult<Option<Item>> {
        let update = Self::build_update(input, bson::DateTime::now());

        self.collection
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn delete_by_id(&self, id: ItemId) -> ItemResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let items = self.with_deadline("list", self.find_all()).await?;
        tracing::debug!(count = items.len(), "Items listed");
        Ok(items)
    }

    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn create(&self, input: NewItem) -> ItemResult<Item> {
        let item = self.with_deadline("create", self.insert(input)).await?;

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn get_by_id(&self, id: ItemId) -> ItemResult<Option<Item>> {
        self.with_deadline("get_by_id", self.find_by_id(id)).await
    }

    #[instrument(skip(self, input), fields(item_id = %id))]
    async fn update(&self, id: ItemId, input: UpdateItem) -> ItemResult<Option<Item>> {
        let updated = self
            .with_deadline("update", self.find_and_update(id, &input))
            .await?;

        if updated.is_some() {
            tracing::info!(item_id = %id, "Item updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn delete(&self, id: ItemId) -> ItemResult<bool> {
        let deleted = self.with_deadline("delete", self.delete_by_id(id)).await?;

        if deleted {
            tracing::info!(item_id = %id, "Item deleted successfully");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    // The driver connects lazily, so these never touch a server
    async fn lazy_database() -> Database {
        Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap()
            .database("items_unit_tests")
    }

    #[test]
    fn test_build_update_name_only() {
        let update = MongoItemRepository::build_update(
            &UpdateItem::name("gadget"),
            bson::DateTime::from_millis(5),
        );
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("name").unwrap(), "gadget");
        assert!(!set.contains_key("price"));
        assert_eq!(
            set.get_datetime("updatedAt").unwrap(),
            &bson::DateTime::from_millis(5)
        );
    }

    #[test]
    fn test_build_update_skips_empty_name() {
        let input = UpdateItem {
            name: Some(String::new()),
            price: Some(12.5),
        };
        let update = MongoItemRepository::build_update(&input, bson::DateTime::now());
        let set = update.get_document("$set").unwrap();

        assert!(!set.contains_key("name"));
        assert_eq!(set.get_f64("price").unwrap(), 12.5);
    }

    #[test]
    fn test_build_update_zero_price_is_written() {
        let update =
            MongoItemRepository::build_update(&UpdateItem::price(0.0), bson::DateTime::now());
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_f64("price").unwrap(), 0.0);
        assert!(!set.contains_key("name"));
    }

    #[test]
    fn test_build_update_empty_still_touches_updated_at() {
        let update =
            MongoItemRepository::build_update(&UpdateItem::default(), bson::DateTime::now());
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updatedAt"));
        assert!(!set.contains_key("createdAt"));
    }

    #[test]
    fn test_id_filter() {
        let id = ItemId::parse("65f1c0a2b3d4e5f601234567").unwrap();
        let filter = MongoItemRepository::id_filter(id);
        assert_eq!(filter.get_object_id("_id").unwrap(), id.object_id());
    }

    #[tokio::test]
    async fn test_new_binds_items_collection_with_default_deadline() {
        let repo = MongoItemRepository::new(&lazy_database().await);
        assert_eq!(repo.collection().name(), "items");
        assert_eq!(repo.operation_timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_with_config_binds_configured_collection() {
        let config = ItemsConfig::default()
            .with_collection("catalog")
            .with_timeout(Duration::from_secs(2));
        let repo = MongoItemRepository::with_config(&lazy_database().await, &config);
        assert_eq!(repo.collection().name(), "catalog");
        assert_eq!(repo.operation_timeout(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_with_config_zero_deadline_uses_default() {
        let config = ItemsConfig {
            operation_timeout: Duration::ZERO,
            ..ItemsConfig::default()
        };
        let repo = MongoItemRepository::with_config(&lazy_database().await, &config);
        assert_eq!(repo.operation_timeout(), DEFAULT_OPERATION_TIMEOUT);
    }

    #[tokio::test]
    async fn test_deadline_expiry_is_a_timeout_error() {
        let config = ItemsConfig::default().with_timeout(Duration::from_millis(20));
        let repo = MongoItemRepository::with_config(&lazy_database().await, &config);

        let result: ItemResult<()> = repo
            .with_deadline("test", std::future::pending::<ItemResult<()>>())
            .await;

        match result {
            Err(ItemError::Timeout(elapsed)) => assert_eq!(elapsed, Duration::from_millis(20)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deadline_passes_through_inner_result() {
        let repo = MongoItemRepository::new(&lazy_database().await);

        let ok = repo.with_deadline("test", async { Ok(7) }).await.unwrap();
        assert_eq!(ok, 7);

        let err = repo
            .with_deadline("test", async {
                Err::<(), _>(ItemError::Decode("broken".to_string()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::Decode(_)));
    }
}

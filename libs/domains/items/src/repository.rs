use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::{Item, ItemId, NewItem, UpdateItem};

/// Storage port for items
///
/// Implementations receive already-validated input and typed identifiers;
/// "not found" is reported through `Option`/`bool` so the service decides
/// how to surface it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Every stored item, in store order
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Insert a new item and return it with its assigned id and timestamps
    async fn create(&self, input: NewItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: ItemId) -> ItemResult<Option<Item>>;

    /// Apply a partial update and return the item as stored afterwards
    async fn update(&self, id: ItemId, input: UpdateItem) -> ItemResult<Option<Item>>;

    /// Returns `false` when nothing matched
    async fn delete(&self, id: ItemId) -> ItemResult<bool>;
}

//! Item Service - the public items API
//!
//! Takes identifiers as text and raw input, rejects anything malformed
//! before the repository is touched, and turns "no match" into
//! [`ItemError::NotFound`].

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemId, NewItem, UpdateItem};
use crate::repository::ItemRepository;

pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All items, in store order
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    /// Create an item; the result carries the store-assigned id
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: NewItem) -> ItemResult<Item> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> ItemResult<Item> {
        let id = ItemId::parse(id)?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Apply the fields set in `input` and return the stored result
    ///
    /// An empty name leaves the stored name unchanged.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: &str, input: UpdateItem) -> ItemResult<Item> {
        let id = ItemId::parse(id)?;
        let input = input.normalized();
        input.validate()?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> ItemResult<()> {
        let id = ItemId::parse(id)?;

        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ItemError::NotFound(id))
        }
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

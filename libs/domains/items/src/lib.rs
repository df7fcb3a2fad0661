//! Items Domain
//!
//! CRUD over a MongoDB `items` collection, translating between the stored
//! document shape and the domain [`Item`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Text ids, validation, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Storage port (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Document   │  ← Stored shape (ObjectId, BSON datetimes)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{ItemService, MongoItemRepository, NewItem, UpdateItem};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let service = ItemService::new(MongoItemRepository::new(&db));
//!
//! let created = service.create_item(NewItem::new("widget", 9.99)).await?;
//! let id = created.id.to_string();
//!
//! service.update_item(&id, UpdateItem::price(12.5)).await?;
//! service.delete_item(&id).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use crate::config::ItemsConfig;
pub use crate::document::ItemDocument;
pub use crate::error::{ItemError, ItemResult};
pub use crate::models::{Item, ItemId, NewItem, UpdateItem};
pub use crate::mongodb::MongoItemRepository;
pub use crate::repository::ItemRepository;
pub use crate::service::ItemService;

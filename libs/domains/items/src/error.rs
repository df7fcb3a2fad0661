use std::time::Duration;
use thiserror::Error;

use crate::models::ItemId;

#[derive(Debug, Error)]
pub enum ItemError {
    /// Input rejected before reaching the store
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Identifier text is not a 24-character hex ObjectId
    #[error("invalid id format: {0}")]
    InvalidId(String),

    #[error("item not found: {0}")]
    NotFound(ItemId),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Driver failure, passed through untouched
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    /// A stored document could not be mapped to a domain item
    #[error("Failed to decode stored item: {0}")]
    Decode(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl ItemError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ItemError::NotFound(_))
    }

    /// Errors raised by the store or on the way to it, as opposed to
    /// problems with the caller's input
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            ItemError::Timeout(_) | ItemError::Database(_) | ItemError::Decode(_)
        )
    }
}

impl From<validator::ValidationErrors> for ItemError {
    fn from(err: validator::ValidationErrors) -> Self {
        ItemError::Validation(err.to_string())
    }
}

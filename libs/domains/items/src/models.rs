use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::error::ItemError;

fn validate_finite_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::new("non_finite_price")
            .with_message("price must be a finite number".into()));
    }
    Ok(())
}

/// Opaque item identifier
///
/// Wraps the store's 12-byte ObjectId. The only way in from text is
/// [`ItemId::parse`], so a value of this type is always well formed.
/// Serializes as 24 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(ObjectId);

impl ItemId {
    /// Parse 24 hex characters into an identifier
    pub fn parse(raw: &str) -> Result<Self, ItemError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| ItemError::InvalidId(raw.to_string()))
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub(crate) fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ItemId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for ItemId {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = ItemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.to_hex()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Item as seen by callers, independent of how it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    /// Set once on insert
    pub created_at: DateTime<Utc>,
    /// Refreshed on every write
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an item
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct NewItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(
        range(min = 0.0, message = "price must not be negative"),
        custom(function = "validate_finite_price")
    )]
    pub price: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Partial update: `None` leaves the stored field as it is
///
/// An empty name also means "no change". `Some(0.0)` is a real price
/// change, not "unset".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateItem {
    pub name: Option<String>,
    #[validate(
        range(min = 0.0, message = "price must not be negative"),
        custom(function = "validate_finite_price")
    )]
    pub price: Option<f64>,
}

impl UpdateItem {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    /// Drop an empty name so only real changes remain
    pub fn normalized(mut self) -> Self {
        self.name = self.name.filter(|name| !name.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty) && self.price.is_none()
    }
}

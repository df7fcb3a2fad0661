//! Storage shape of an item
//!
//! `ItemDocument` carries the MongoDB-specific concerns (ObjectId `_id`,
//! BSON datetimes, camelCase field names). Reads are mapped one way into
//! the domain through `TryFrom<ItemDocument> for Item`.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    /// Absent until the store has assigned one
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl ItemDocument {
    /// Fresh document for insertion; both timestamps are `now`
    pub fn new(name: impl Into<String>, price: f64, now: bson::DateTime) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = ItemError;

    fn try_from(doc: ItemDocument) -> ItemResult<Self> {
        let id = doc
            .id
            .ok_or_else(|| ItemError::Decode("document has no _id".to_string()))?;

        Ok(Item {
            id: ItemId::from(id),
            name: doc.name,
            price: doc.price,
            created_at: to_chrono(doc.created_at, "createdAt")?,
            updated_at: to_chrono(doc.updated_at, "updatedAt")?,
        })
    }
}

fn to_chrono(dt: bson::DateTime, field: &str) -> ItemResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| ItemError::Decode(format!("{field} is out of range: {dt}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{Bson, doc};

    #[test]
    fn test_new_document_has_equal_timestamps_and_no_id() {
        let now = bson::DateTime::now();
        let doc = ItemDocument::new("widget", 9.99, now);
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(doc.id.is_none());
    }

    #[test]
    fn test_insert_shape_omits_id_and_uses_camel_case() {
        let doc = ItemDocument::new("widget", 9.99, bson::DateTime::from_millis(1_000));
        let raw = bson::to_document(&doc).unwrap();

        assert!(!raw.contains_key("_id"));
        assert_eq!(raw.get_str("name").unwrap(), "widget");
        assert_eq!(raw.get_f64("price").unwrap(), 9.99);
        assert!(matches!(raw.get("createdAt"), Some(Bson::DateTime(_))));
        assert!(matches!(raw.get("updatedAt"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn test_decode_stored_document() {
        let oid = ObjectId::new();
        let raw = doc! {
            "_id": oid,
            "name": "widget",
            "price": 12.5,
            "createdAt": bson::DateTime::from_millis(1_700_000_000_000),
            "updatedAt": bson::DateTime::from_millis(1_700_000_060_000),
        };

        let doc: ItemDocument = bson::from_document(raw).unwrap();
        let item = Item::try_from(doc).unwrap();

        assert_eq!(item.id.to_hex(), oid.to_hex());
        assert_eq!(item.name, "widget");
        assert_eq!(item.price, 12.5);
        assert_eq!(item.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(item.updated_at.timestamp_millis(), 1_700_000_060_000);
    }

    #[test]
    fn test_document_without_id_does_not_convert() {
        let doc = ItemDocument::new("widget", 1.0, bson::DateTime::now());
        let err = Item::try_from(doc).unwrap_err();
        assert!(matches!(err, ItemError::Decode(_)));
    }

    #[test]
    fn test_out_of_range_timestamp_does_not_convert() {
        let doc = ItemDocument::new("widget", 1.0, bson::DateTime::MAX).with_id(ObjectId::new());
        let err = Item::try_from(doc).unwrap_err();
        assert!(err.to_string().contains("createdAt"));
    }
}

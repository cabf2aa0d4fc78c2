//! Translation between listing fields and BSON documents.
//!
//! Listings cross the HTTP boundary as JSON and live in the store as BSON.
//! Outbound, integers narrow to `Int32` when they fit and fall back to
//! `Int64` then `Double`. Inbound, `ObjectId` values render as hex strings
//! and `DateTime` values as RFC 3339 text, so every stored document can be
//! returned as plain JSON.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde_json::{Map, Number, Value};

use crate::domain::{ID_FIELD, Listing, ListingFields, ListingId};

/// Reasons a stored document cannot be read back as a listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentMappingError {
    /// The document has no `_id` key.
    #[error("stored document has no _id")]
    MissingId,
    /// The `_id` is neither an ObjectId nor its hex text.
    #[error("stored document _id is not an object id")]
    UnsupportedId,
}

/// Convert a listing identifier into the store's `ObjectId`.
pub fn object_id(id: &ListingId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

/// Convert a store `ObjectId` into a listing identifier.
pub fn listing_id(oid: ObjectId) -> ListingId {
    ListingId::from_bytes(oid.bytes())
}

/// Filter document selecting one listing by identifier.
pub fn id_filter(id: &ListingId) -> Document {
    let mut filter = Document::new();
    filter.insert(ID_FIELD, object_id(id));
    filter
}

/// Build the BSON document stored for `fields`.
pub fn fields_to_document(fields: &ListingFields) -> Document {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), json_to_bson(value)))
        .collect()
}

/// Read a stored document back as a listing.
pub fn document_to_listing(mut document: Document) -> Result<Listing, DocumentMappingError> {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => Some(listing_id(oid)),
        Some(Bson::String(text)) => ListingId::parse(text).ok(),
        Some(_) => None,
        None => return Err(DocumentMappingError::MissingId),
    }
    .ok_or(DocumentMappingError::UnsupportedId)?;

    let map: Map<String, Value> = document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    Ok(Listing::new(id, ListingFields::new(map)))
}

/// Convert one JSON value to BSON.
pub fn json_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(flag) => Bson::Boolean(*flag),
        Value::Number(number) => number_to_bson(number),
        Value::String(text) => Bson::String(text.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_bson(value)))
                .collect(),
        ),
    }
}

fn number_to_bson(number: &Number) -> Bson {
    if let Some(int) = number.as_i64() {
        return i32::try_from(int).map_or(Bson::Int64(int), Bson::Int32);
    }
    number.as_f64().map_or(Bson::Null, Bson::Double)
}

/// Convert one BSON value to JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::Int32(int) => Value::from(int),
        Bson::Int64(int) => Value::from(int),
        Bson::Double(float) => Number::from_f64(float).map_or(Value::Null, Value::Number),
        Bson::String(text) => Value::String(text),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(at) => at
            .try_to_rfc3339_string()
            .map_or_else(|_| Value::from(at.timestamp_millis()), Value::String),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}

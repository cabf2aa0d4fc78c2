//! Food-donation listing primitives.
//!
//! Listings are schemaless: the gateway stores whatever fields a donor
//! submits and only reserves the identifier key. The conventional
//! [`DONATOR_EMAIL_FIELD`] and [`CREATED_AT_FIELD`] keys drive the owner
//! filter and the "latest" ordering but are never validated.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Document key holding the store-assigned identifier.
pub const ID_FIELD: &str = "_id";
/// Document key grouping listings by donor.
pub const DONATOR_EMAIL_FIELD: &str = "donatorEmail";
/// Document key ordering the "latest" view.
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Maximum number of listings returned by the "latest" view.
pub const LATEST_LISTINGS_LIMIT: usize = 6;

const LISTING_ID_LEN: usize = 24;

/// Validation errors for [`ListingId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingIdError {
    /// The value does not have exactly 24 characters.
    #[error("listing id must be 24 characters long, got {length}")]
    InvalidLength {
        /// Observed length in characters.
        length: usize,
    },
    /// The value contains a non-hexadecimal character.
    #[error("listing id must contain only hexadecimal characters")]
    InvalidCharacter,
}

/// Store identifier of a listing: 12 bytes rendered as 24 lowercase hex
/// characters.
///
/// # Examples
/// ```
/// use shareplate::domain::ListingId;
///
/// let id = ListingId::parse("65F1C2A9B8E4D3C2B1A09F8E").expect("valid id");
/// assert_eq!(id.as_str(), "65f1c2a9b8e4d3c2b1a09f8e");
/// assert_eq!(id.bytes()[0], 0x65);
/// assert!(ListingId::parse("not-a-valid-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingId {
    bytes: [u8; LISTING_ID_BYTES],
    hex: String,
}

const LISTING_ID_BYTES: usize = LISTING_ID_LEN / 2;

impl ListingId {
    /// Validate and normalise an identifier.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ListingIdError> {
        let value = value.as_ref();
        let length = value.chars().count();
        if length != LISTING_ID_LEN {
            return Err(ListingIdError::InvalidLength { length });
        }
        let nibbles = value
            .chars()
            .map(|c| c.to_digit(16).and_then(|digit| u8::try_from(digit).ok()))
            .collect::<Option<Vec<u8>>>()
            .ok_or(ListingIdError::InvalidCharacter)?;

        let mut bytes = [0_u8; LISTING_ID_BYTES];
        for (byte, pair) in bytes.iter_mut().zip(nibbles.chunks_exact(2)) {
            if let [high, low] = pair {
                *byte = (high << 4) | low;
            }
        }
        Ok(Self::from_bytes(bytes))
    }

    /// Wrap raw identifier bytes; every 12-byte value is valid.
    pub fn from_bytes(bytes: [u8; LISTING_ID_BYTES]) -> Self {
        let hex = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        Self { bytes, hex }
    }

    /// Raw identifier bytes.
    pub fn bytes(&self) -> [u8; LISTING_ID_BYTES] {
        self.bytes
    }

    /// Hex representation.
    pub fn as_str(&self) -> &str {
        self.hex.as_str()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl AsRef<str> for ListingId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for ListingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex)
    }
}

/// Client-supplied listing fields, in submission order.
///
/// The identifier key is stripped on construction, so these fields can be
/// inserted or merged without touching a listing's identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFields(Map<String, Value>);

impl ListingFields {
    /// Wrap a JSON object, dropping any `_id` entry.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use shareplate::domain::ListingFields;
    ///
    /// let Some(map) = json!({"_id": "x", "name": "Bread"}).as_object().cloned() else {
    ///     unreachable!()
    /// };
    /// let fields = ListingFields::new(map);
    /// assert!(fields.get("_id").is_none());
    /// assert_eq!(fields.len(), 1);
    /// ```
    pub fn new(mut map: Map<String, Value>) -> Self {
        map.remove(ID_FIELD);
        Self(map)
    }

    /// Look up one field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Apply merge-update semantics: every field in `update` overwrites the
    /// same key here; all other keys stay untouched. Returns whether any
    /// value changed.
    pub fn merge(&mut self, update: &ListingFields) -> bool {
        let mut changed = false;
        for (key, value) in update.iter() {
            if self.0.get(key) != Some(value) {
                self.0.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }

    /// Unwrap into the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<ListingFields> for Value {
    fn from(value: ListingFields) -> Self {
        Value::Object(value.0)
    }
}

/// A stored listing.
///
/// Serialises flat, with the identifier first:
/// `{"_id": "<hex>", "name": "Bread", ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    id: ListingId,
    fields: ListingFields,
}

impl Listing {
    /// Assemble a listing from its identifier and fields.
    pub fn new(id: ListingId, fields: ListingFields) -> Self {
        Self { id, fields }
    }

    /// Store identifier.
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Client-supplied fields.
    pub fn fields(&self) -> &ListingFields {
        &self.fields
    }

    /// Donor email, when present as a string.
    pub fn donator_email(&self) -> Option<&str> {
        self.fields.get(DONATOR_EMAIL_FIELD).and_then(Value::as_str)
    }

    /// Mutable access for merge updates; the identifier stays fixed.
    pub(crate) fn fields_mut(&mut self) -> &mut ListingFields {
        &mut self.fields
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (key, value) in self.fields.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Counts reported by a merge update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Records matching the identifier (0 or 1).
    pub matched_count: u64,
    /// Records whose stored values changed (0 or 1).
    pub modified_count: u64,
}

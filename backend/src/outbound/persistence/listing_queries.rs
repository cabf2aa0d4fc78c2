//! Query, sort and update documents sent to the listings collection.

use mongodb::bson::{Document, doc};

use crate::domain::{CREATED_AT_FIELD, DONATOR_EMAIL_FIELD, ID_FIELD, ListingFields};

use super::document_mapping::fields_to_document;

/// Filter matching every listing.
pub fn all_listings_filter() -> Document {
    Document::new()
}

/// Filter matching listings whose `donatorEmail` equals `email` exactly.
pub fn donator_filter(email: &str) -> Document {
    doc! { DONATOR_EMAIL_FIELD: email }
}

/// Newest `createdAt` first, ties in identifier (insertion) order.
pub fn latest_sort() -> Document {
    doc! { CREATED_AT_FIELD: -1, ID_FIELD: 1 }
}

/// Driver limit for the "latest" view.
pub fn latest_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// `$set` update for a merge, or `None` when there is nothing to set.
pub fn merge_update(fields: &ListingFields) -> Option<Document> {
    if fields.is_empty() {
        return None;
    }
    Some(doc! { "$set": fields_to_document(fields) })
}

#[cfg(test)]
mod tests {
    use mongodb::bson::Bson;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn fields(value: Value) -> ListingFields {
        match value {
            Value::Object(map) => ListingFields::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    fn all_listings_filter_is_empty() {
        assert!(all_listings_filter().is_empty());
    }

    #[rstest]
    fn donator_filter_matches_email_exactly() {
        assert_eq!(
            donator_filter("a@x.com"),
            doc! { "donatorEmail": "a@x.com" }
        );
    }

    #[rstest]
    fn latest_sort_orders_by_created_at_then_id() {
        let sort = latest_sort();
        let keys: Vec<&str> = sort.keys().map(String::as_str).collect();
        assert_eq!(keys, ["createdAt", "_id"]);
        assert_eq!(sort.get("createdAt"), Some(&Bson::Int32(-1)));
        assert_eq!(sort.get("_id"), Some(&Bson::Int32(1)));
    }

    #[rstest]
    #[case(6, 6)]
    #[case(0, 0)]
    #[case(usize::MAX, i64::MAX)]
    fn latest_limit_saturates(#[case] limit: usize, #[case] expected: i64) {
        assert_eq!(latest_limit(limit), expected);
    }

    #[rstest]
    fn merge_update_sets_only_supplied_fields() {
        let update = merge_update(&fields(json!({"_id": "ignored", "b": 3, "c": "x"})));
        assert_eq!(update, Some(doc! { "$set": { "b": 3, "c": "x" } }));
    }

    #[rstest]
    fn empty_merge_has_no_update() {
        assert_eq!(merge_update(&fields(json!({}))), None);
    }
}

//! Core data model for a bill-splitting session, plus the wire types
//! exchanged with the receipt extraction service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One receipt line entry. Ids are generated client-side; the extraction
/// service only returns description/price pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub description: String,
    pub price: f64,
}

impl Item {
    /// Build an item with a freshly generated id.
    pub fn new(description: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            price,
        }
    }
}

/// A partial update to an item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl ItemPatch {
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            price: None,
        }
    }

    pub fn price(price: f64) -> Self {
        Self {
            description: None,
            price: Some(price),
        }
    }
}

/// One participant among whom the bill is split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

/// Lifecycle of the asynchronous extraction call. Set at will by the caller;
/// there is no transition table to enforce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Per-member summary, computed fresh from the live collections on every
/// query. Never stored, so it cannot go stale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberTotal {
    pub member_id: String,
    pub member_name: String,
    pub total_owed: f64,
    pub assigned_items: Vec<Item>,
}

/// A single extracted line as returned by the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub description: String,
    pub price: f64,
}

/// Success body of `POST /api/v1/extract`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub items: Vec<ExtractedItem>,
}

/// Error body the extraction service returns with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ids_are_unique() {
        let a = Item::new("Burger", 15.50);
        let b = Item::new("Burger", 15.50);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn processing_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProcessingStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: ProcessingStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, ProcessingStatus::Error);
    }

    #[test]
    fn extract_response_parses_service_body() {
        let body = r#"{"items":[{"description":"Burger","price":15.5},{"description":"Fries","price":4.25}]}"#;
        let response: ExtractResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].description, "Burger");
        assert_eq!(response.items[1].price, 4.25);
    }

    #[test]
    fn api_error_body_details_are_optional() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"bad image"}"#).unwrap();
        assert_eq!(body.error, "bad image");
        assert!(body.details.is_none());

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"bad image","details":"unsupported format"}"#)
                .unwrap();
        assert_eq!(body.details.as_deref(), Some("unsupported format"));
    }
}

//! Response envelope decoding.
//!
//! Every backend response is a JSON object with a `success` flag. On success
//! the payload sits next to the flag (`{"success": true, "products": [...]}`
//! or the dashboard counters at top level); on failure an `error` message
//! does.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use super::error::ApiError;

/// A decoded `{success, ...}` wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Envelope {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Response`] if the body is not an envelope.
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::Response(e.to_string()))
    }

    /// Check the success flag and decode one payload field.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] for `success: false` and
    /// [`ApiError::Response`] if the field is missing or malformed.
    pub fn into_field<T: DeserializeOwned>(self, field: &str) -> Result<T, ApiError> {
        let mut payload = self.into_payload_map()?;
        let value = payload
            .remove(field)
            .ok_or_else(|| ApiError::Response(format!("missing '{field}' in response")))?;
        serde_json::from_value(value).map_err(|e| ApiError::Response(format!("{field}: {e}")))
    }

    /// Check the success flag and decode a list field record by record.
    ///
    /// Records that do not decode are logged with their `_id` and left out,
    /// so one bad row cannot keep the rest of the list from loading.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] for `success: false` and
    /// [`ApiError::Response`] if the field is missing or not an array.
    pub fn into_records<T: DeserializeOwned>(self, field: &str) -> Result<Vec<T>, ApiError> {
        let mut payload = self.into_payload_map()?;
        let Some(Value::Array(values)) = payload.remove(field) else {
            return Err(ApiError::Response(format!(
                "missing '{field}' list in response"
            )));
        };

        let total = values.len();
        let records: Vec<T> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let id = value
                    .get("_id")
                    .and_then(Value::as_str)
                    .unwrap_or("?")
                    .to_string();
                serde_json::from_value(value)
                    .inspect_err(|e| {
                        warn!(payload = field, index, id = %id, error = %e, "Skipping undecodable record");
                    })
                    .ok()
            })
            .collect();
        if records.len() < total {
            warn!(
                payload = field,
                skipped = total - records.len(),
                total,
                "List decoded with skipped records"
            );
        }
        Ok(records)
    }

    /// Check the success flag and decode the whole payload object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] for `success: false` and
    /// [`ApiError::Response`] if the payload does not match `T`.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let payload = self.into_payload_map()?;
        serde_json::from_value(Value::Object(payload)).map_err(|e| ApiError::Response(e.to_string()))
    }

    fn into_payload_map(self) -> Result<Map<String, Value>, ApiError> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(ApiError::Api(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use trendx_core::{DashboardSnapshot, Product};

    use super::*;

    #[test]
    fn test_success_field() {
        let envelope = Envelope::parse(r#"{"success": true, "message": "Product deleted"}"#).unwrap();
        let message: String = envelope.into_field("message").unwrap();
        assert_eq!(message, "Product deleted");
    }

    #[test]
    fn test_failure_carries_backend_message() {
        let envelope =
            Envelope::parse(r#"{"success": false, "error": "Product not found"}"#).unwrap();
        let result = envelope.into_field::<String>("message");
        assert_eq!(result, Err(ApiError::Api("Product not found".to_string())));
    }

    #[test]
    fn test_failure_without_message() {
        let envelope = Envelope::parse(r#"{"success": false}"#).unwrap();
        let result = envelope.into_field::<String>("message");
        assert_eq!(result, Err(ApiError::Api("Unknown error".to_string())));
    }

    #[test]
    fn test_missing_field_is_response_error() {
        let envelope = Envelope::parse(r#"{"success": true}"#).unwrap();
        let result = envelope.into_field::<Vec<String>>("products");
        assert!(matches!(result, Err(ApiError::Response(_))));
    }

    #[test]
    fn test_bad_record_does_not_sink_the_list() {
        let envelope = Envelope::parse(
            r#"{"success": true, "products": [
                {"_id": "p1", "name": "Tee", "category": "Shirts", "price": 12.5,
                 "quantity": 4, "created_at": "Wed, 15 Oct 2025 10:05:00 GMT"},
                {"_id": "p2", "name": "Refund", "category": "Misc", "price": -3,
                 "quantity": 1, "created_at": "Wed, 15 Oct 2025 10:05:00 GMT"},
                {"_id": "p3", "name": "Cap", "category": "Hats", "price": "8",
                 "quantity": -2, "created_at": "Wed, 15 Oct 2025 10:05:00 GMT"},
                {"_id": "p4", "name": "Scarf", "category": "Accessories", "price": "20",
                 "created_at": "Wed, 15 Oct 2025 10:05:00 GMT"}
            ]}"#,
        )
        .unwrap();
        let products: Vec<Product> = envelope.into_records("products").unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p4"]);
    }

    #[test]
    fn test_records_field_must_be_a_list() {
        let envelope = Envelope::parse(r#"{"success": true, "products": {}}"#).unwrap();
        let result = envelope.into_records::<Product>("products");
        assert!(matches!(result, Err(ApiError::Response(_))));

        let envelope = Envelope::parse(r#"{"success": false, "error": "boom"}"#).unwrap();
        let result = envelope.into_records::<Product>("products");
        assert_eq!(result, Err(ApiError::Api("boom".to_string())));
    }

    #[test]
    fn test_non_json_body() {
        let result = Envelope::parse("<html><body>Internal Server Error</body></html>");
        assert!(matches!(result, Err(ApiError::Response(_))));
    }

    #[test]
    fn test_top_level_payload() {
        let envelope = Envelope::parse(
            r#"{"success": true, "total_products": 3, "total_customers": 2,
                "total_orders": 1, "total_revenue": 1234.5, "inventory_value": 99.99}"#,
        )
        .unwrap();
        let snapshot: DashboardSnapshot = envelope.into_payload().unwrap();
        assert_eq!(snapshot.total_products, 3);
        assert_eq!(snapshot.total_revenue.to_string(), "1234.5");
    }
}

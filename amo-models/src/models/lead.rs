//! Lead entity model.

use serde::{Deserialize, Serialize};

/// Represents a lead (a deal in progress) in the CRM.
///
/// Every field is optional: the server omits fields the account does not
/// use, and callers fill in only what they want to send. Timestamps are
/// epoch seconds. `custom_fields_values` and `_embedded` are free-form
/// blocks whose shape depends on account configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Deal amount in account currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// Current stage within the pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_reason_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest_task_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    /// Account-defined custom field values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields_values: Option<serde_json::Value>,
    /// Related data included via the `with` query parameter.
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<serde_json::Value>,
}

impl Lead {
    /// Creation time as a datetime, when the server sent one.
    pub fn created_at_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.created_at.and_then(amo_core::time::timestamp_to_datetime)
    }

    /// Close time as a datetime. None for open leads.
    pub fn closed_at_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.closed_at.and_then(amo_core::time::timestamp_to_datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_from_json() {
        let json = r#"{
            "id": 311,
            "name": "New roof",
            "price": 1500,
            "status_id": 142,
            "pipeline_id": 7,
            "created_at": 1700000000,
            "custom_fields_values": [{"field_id": 9, "values": [{"value": "warm"}]}]
        }"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.id, Some(311));
        assert_eq!(lead.price, Some(1500));
        assert!(lead.custom_fields_values.is_some());
        assert!(lead.closed_at.is_none());
    }

    #[test]
    fn test_unset_fields_omitted_on_serialize() {
        let lead = Lead {
            name: Some("New roof".into()),
            price: Some(1500),
            ..Default::default()
        };
        let json = serde_json::to_value(&lead).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("status_id"));
    }
}

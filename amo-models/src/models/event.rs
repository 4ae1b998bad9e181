//! Event entity model.

use serde::{Deserialize, Serialize};

/// An audit-trail event (field changed, stage moved, note added).
///
/// Events are read-only; their ids are opaque strings, unlike the numeric
/// ids of other entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_after: Option<Vec<EventValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_before: Option<Vec<EventValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
}

/// One before/after value of a changed field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_json() {
        let json = r#"{
            "id": "01jk3b9e8",
            "type": "lead_status_changed",
            "entity_id": 311,
            "entity_type": "lead",
            "value_after": [{"id": 142, "name": "Won"}],
            "value_before": [{"id": 141}]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type.as_deref(), Some("lead_status_changed"));
        assert_eq!(event.value_after.unwrap()[0].name.as_deref(), Some("Won"));
    }
}

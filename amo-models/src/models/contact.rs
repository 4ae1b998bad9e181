//! Contact entity model.

use serde::{Deserialize, Serialize};

/// Represents a person attached to an account.
///
/// Phone numbers and emails live inside `custom_fields_values` (the
/// provider models them as account-level custom fields), so the struct
/// only carries the fixed fields every account has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest_task_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields_values: Option<serde_json::Value>,
    /// Related data included via the `with` query parameter.
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_from_json() {
        let json = r#"{
            "id": 92,
            "name": "Ann Smith",
            "first_name": "Ann",
            "last_name": "Smith",
            "responsible_user_id": 5,
            "_embedded": {"tags": []}
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id, Some(92));
        assert_eq!(contact.first_name.as_deref(), Some("Ann"));
        assert!(contact.embedded.is_some());
    }
}

//! Pipeline status (stage) entity model.

use serde::{Deserialize, Serialize};

/// One stage of a pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<i64>,
    /// Stage color as a hex string, e.g. "#fffeb2".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// 0 for regular stages, 1 for the unsorted stage.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub status_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_renamed() {
        let status: PipelineStatus =
            serde_json::from_str(r##"{"id": 142, "type": 1, "color": "#fffeb2"}"##).unwrap();
        assert_eq!(status.status_type, Some(1));

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["type"], 1);
    }
}

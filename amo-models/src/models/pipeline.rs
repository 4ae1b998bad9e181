//! Pipeline entity model.

use serde::{Deserialize, Serialize};

use super::status::PipelineStatus;

/// A sales pipeline: an ordered set of stages leads move through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Position among the account's pipelines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_main: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unsorted_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<PipelineEmbedded>,
}

/// Statuses embedded in a pipeline body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineEmbedded {
    #[serde(default)]
    pub statuses: Vec<PipelineStatus>,
}

impl Pipeline {
    /// Embedded statuses, empty when the server sent none.
    pub fn statuses(&self) -> &[PipelineStatus] {
        self.embedded.as_ref().map_or(&[], |e| &e.statuses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_with_embedded_statuses() {
        let json = r#"{
            "id": 7,
            "name": "Main",
            "is_main": true,
            "_embedded": {"statuses": [
                {"id": 142, "name": "Won", "pipeline_id": 7},
                {"id": 143, "name": "Lost", "pipeline_id": 7}
            ]}
        }"#;
        let pipeline: Pipeline = serde_json::from_str(json).unwrap();
        assert_eq!(pipeline.statuses().len(), 2);
        assert_eq!(pipeline.statuses()[0].name.as_deref(), Some("Won"));
    }

    #[test]
    fn test_pipeline_without_statuses() {
        let pipeline: Pipeline = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert!(pipeline.statuses().is_empty());
    }
}

//! Response envelope types.
//!
//! List endpoints wrap their results in the provider's embedded envelope:
//!
//! ```json
//! { "_embedded": { "leads": [ ... ] }, "_page": { "total": 42 } }
//! ```
//!
//! Single-entity GETs return the entity body directly. Create calls reuse
//! the embedded envelope but each item carries only an id and a self link.
//! Error bodies follow RFC 7807 (`title`/`detail`/`status`).

use serde::de::DeserializeOwned;
use serde::Deserialize;

use amo_core::error::{AmoError, AmoResult};
use amo_models::CreatedEntity;

/// Pagination metadata from list responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    /// Total number of records matching the query.
    pub total: Option<i64>,
    /// Current page number.
    pub page: Option<i64>,
    /// Page size the server applied.
    pub limit: Option<i64>,
}

/// The embedded list envelope. The key under `_embedded` is the entity
/// type tag, so the array is held as raw JSON until a repository extracts
/// it under its own tag.
#[derive(Debug, Default, Deserialize)]
pub struct ListEnvelope {
    #[serde(rename = "_embedded", default)]
    embedded: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "_page", default)]
    page: Option<PageMeta>,
}

impl ListEnvelope {
    /// Extract and decode the embedded array for an entity type.
    ///
    /// A missing key decodes as an empty list: the server omits
    /// `_embedded.<tag>` entirely when nothing matches.
    pub fn take_embedded<T: DeserializeOwned>(&mut self, entity_type: &str) -> AmoResult<Vec<T>> {
        match self.embedded.remove(entity_type) {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                AmoError::Serialization(format!("failed to decode embedded {entity_type}: {e}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Total record count from pagination metadata.
    pub fn total(&self) -> Option<i64> {
        self.page.as_ref().and_then(|p| p.total)
    }

    /// Pagination metadata, when the server sent it.
    pub fn page(&self) -> Option<&PageMeta> {
        self.page.as_ref()
    }
}

/// One item of a create response: id plus links, no entity body.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRecord {
    pub id: i64,
    #[serde(rename = "_links", default)]
    pub links: Option<ResourceLinks>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Href>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Href {
    pub href: String,
}

impl CreatedRecord {
    /// Attach the repository's entity-type tag and flatten the self link.
    pub fn into_created(self, entity_type: &str) -> CreatedEntity {
        CreatedEntity {
            id: self.id,
            entity_type: entity_type.to_string(),
            link: self
                .links
                .and_then(|l| l.self_link)
                .map(|h| h.href)
                .unwrap_or_default(),
        }
    }
}

/// RFC 7807-style error body.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    title: Option<String>,
    detail: Option<String>,
}

/// Best-effort error message from an error response body.
///
/// Prefers `detail`, then `title`, then a generic fallback naming the
/// status.
pub(crate) fn error_message(status: u16, body: Option<&str>) -> String {
    if let Some(body) = body {
        if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
            if let Some(detail) = parsed.detail.filter(|d| !d.is_empty()) {
                return detail;
            }
            if let Some(title) = parsed.title.filter(|t| !t.is_empty()) {
                return title;
            }
        }
    }
    format!("HTTP {status} error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_extracts_by_tag() {
        let json = r#"{
            "_embedded": {"leads": [{"id": 1}, {"id": 2}]},
            "_page": {"total": 2, "page": 1, "limit": 50}
        }"#;
        let mut envelope: ListEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.total(), Some(2));

        let leads: Vec<serde_json::Value> = envelope.take_embedded("leads").unwrap();
        assert_eq!(leads.len(), 2);
    }

    #[test]
    fn test_missing_embedded_key_is_empty_list() {
        let mut envelope: ListEnvelope = serde_json::from_str(r#"{"_page": {"total": 0}}"#).unwrap();
        let leads: Vec<serde_json::Value> = envelope.take_embedded("leads").unwrap();
        assert!(leads.is_empty());
    }

    #[test]
    fn test_created_record_flattens_self_link() {
        let json = r#"{"id": 311, "_links": {"self": {"href": "https://x.amocrm.ru/api/v4/leads/311"}}}"#;
        let record: CreatedRecord = serde_json::from_str(json).unwrap();
        let created = record.into_created("leads");
        assert_eq!(created.id, 311);
        assert_eq!(created.entity_type, "leads");
        assert!(created.link.ends_with("/leads/311"));
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let body = r#"{"title": "Bad Request", "detail": "Field 'name' is required", "status": 400}"#;
        assert_eq!(error_message(400, Some(body)), "Field 'name' is required");
    }

    #[test]
    fn test_error_message_falls_back_to_title_then_status() {
        assert_eq!(
            error_message(403, Some(r#"{"title": "Forbidden"}"#)),
            "Forbidden"
        );
        assert_eq!(error_message(502, Some("not json at all")), "HTTP 502 error");
        assert_eq!(error_message(500, None), "HTTP 500 error");
    }
}

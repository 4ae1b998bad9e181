//! Cross-entity relationship links.

use serde::{Deserialize, Serialize};

/// One relationship edge from the entity the links were fetched for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityLink {
    pub to_entity_id: i64,
    pub to_entity_type: String,
    /// Edge metadata (main-contact flag, catalog quantity, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// The set of relationship edges of a single entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityLinks {
    pub links: Vec<EntityLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_from_json() {
        let json = r#"{"links": [
            {"to_entity_id": 92, "to_entity_type": "contacts", "metadata": {"main_contact": true}},
            {"to_entity_id": 17, "to_entity_type": "companies"}
        ]}"#;
        let links: EntityLinks = serde_json::from_str(json).unwrap();
        assert_eq!(links.links.len(), 2);
        assert_eq!(links.links[0].to_entity_type, "contacts");
        assert!(links.links[1].metadata.is_none());
    }
}

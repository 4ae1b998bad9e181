//! Create-call result record.

use serde::{Deserialize, Serialize};

/// What the server returns for each item of a bulk create: the new id and
/// a self link, never the full entity body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEntity {
    pub id: i64,
    /// Entity type tag of the repository the create went through.
    pub entity_type: String,
    /// Self link to the created resource.
    pub link: String,
}

//! amo-models - Typed entity models for the amoCRM API.
//!
//! One module per entity type, mirroring the API's JSON shapes: flat
//! structs of optional named fields, with free-form nested blocks
//! (custom field values, embedded relations) kept as raw JSON. Unset
//! fields are omitted when serializing, so create/update payloads carry
//! only what the caller filled in.
//!
//! Relationships between entities (a note's `entity_id`, a link's
//! `to_entity_id`) are opaque foreign keys; the server is the only place
//! they are validated.

pub mod models;

// Re-export key types
pub use models::company::Company;
pub use models::contact::Contact;
pub use models::created::CreatedEntity;
pub use models::event::{Event, EventValue};
pub use models::lead::Lead;
pub use models::links::{EntityLink, EntityLinks};
pub use models::note::{Note, NoteInput};
pub use models::pipeline::Pipeline;
pub use models::source::Source;
pub use models::status::PipelineStatus;
pub use models::task::{Task, TaskInput, TaskType};
pub use models::user::User;

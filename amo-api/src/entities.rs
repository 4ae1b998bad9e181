//! Entity bindings and repository accessors.
//!
//! One [`Entity`] impl per model ties the model to its resource path and
//! embedded-array tag; the accessors on [`AmoClient`] hand out bound
//! repositories.

use amo_core::constants::entity_types;
use amo_models::{
    Company, Contact, Event, Lead, Note, NoteInput, Pipeline, PipelineStatus, Source, Task,
    TaskInput, User,
};

use crate::client::AmoClient;
use crate::repository::{Entity, Repository};

impl Entity for Lead {
    const PATH: &'static str = "/leads";
    const ENTITY_TYPE: &'static str = entity_types::LEADS;
    type Input = Lead;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Contact {
    const PATH: &'static str = "/contacts";
    const ENTITY_TYPE: &'static str = entity_types::CONTACTS;
    type Input = Contact;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Company {
    const PATH: &'static str = "/companies";
    const ENTITY_TYPE: &'static str = entity_types::COMPANIES;
    type Input = Company;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Pipeline {
    const PATH: &'static str = "/leads/pipelines";
    const ENTITY_TYPE: &'static str = entity_types::PIPELINES;
    type Input = Pipeline;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for PipelineStatus {
    // Statuses only exist under a pipeline; the accessor always binds the
    // full `/leads/pipelines/{id}/statuses` path.
    const PATH: &'static str = "/leads/pipelines";
    const ENTITY_TYPE: &'static str = entity_types::STATUSES;
    type Input = PipelineStatus;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for User {
    const PATH: &'static str = "/users";
    const ENTITY_TYPE: &'static str = entity_types::USERS;
    type Input = User;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Source {
    const PATH: &'static str = "/sources";
    const ENTITY_TYPE: &'static str = entity_types::SOURCES;
    type Input = Source;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Task {
    const PATH: &'static str = "/tasks";
    const ENTITY_TYPE: &'static str = entity_types::TASKS;
    type Input = TaskInput;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Note {
    // Notes nest under a parent type; the accessor binds `/{parent}/notes`.
    const PATH: &'static str = "/leads/notes";
    const ENTITY_TYPE: &'static str = entity_types::NOTES;
    type Input = NoteInput;

    fn entity_id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Event {
    const PATH: &'static str = "/events";
    const ENTITY_TYPE: &'static str = entity_types::EVENTS;
    type Input = Event;

    // Event ids are opaque strings; events are read-only, so there is no
    // numeric id to update through.
    fn entity_id(&self) -> Option<i64> {
        None
    }
}

/// The entity types notes can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteParent {
    Leads,
    Contacts,
    Companies,
    Customers,
}

impl NoteParent {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteParent::Leads => entity_types::LEADS,
            NoteParent::Contacts => entity_types::CONTACTS,
            NoteParent::Companies => entity_types::COMPANIES,
            NoteParent::Customers => entity_types::CUSTOMERS,
        }
    }
}

impl AmoClient {
    /// Leads repository.
    pub fn leads(&self) -> Repository<'_, Lead> {
        Repository::new(self)
    }

    /// Contacts repository.
    pub fn contacts(&self) -> Repository<'_, Contact> {
        Repository::new(self)
    }

    /// Companies repository.
    pub fn companies(&self) -> Repository<'_, Company> {
        Repository::new(self)
    }

    /// Pipelines repository.
    pub fn pipelines(&self) -> Repository<'_, Pipeline> {
        Repository::new(self)
    }

    /// Statuses of one pipeline.
    pub fn pipeline_statuses(&self, pipeline_id: i64) -> Repository<'_, PipelineStatus> {
        Repository::with_path(self, format!("/leads/pipelines/{pipeline_id}/statuses"))
    }

    /// Users repository.
    pub fn users(&self) -> Repository<'_, User> {
        Repository::new(self)
    }

    /// Lead sources repository.
    pub fn sources(&self) -> Repository<'_, Source> {
        Repository::new(self)
    }

    /// Tasks repository.
    pub fn tasks(&self) -> Repository<'_, Task> {
        Repository::new(self)
    }

    /// Notes of one parent entity type.
    pub fn notes(&self, parent: NoteParent) -> Repository<'_, Note> {
        Repository::with_path(self, format!("/{}/notes", parent.as_str()))
    }

    /// Events repository (read-only on the provider side).
    pub fn events(&self) -> Repository<'_, Event> {
        Repository::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amo_core::config::AmoConfig;

    #[test]
    fn test_entity_bindings() {
        assert_eq!(Lead::PATH, "/leads");
        assert_eq!(Lead::ENTITY_TYPE, "leads");
        assert_eq!(Pipeline::PATH, "/leads/pipelines");
        assert_eq!(Pipeline::ENTITY_TYPE, "pipelines");
    }

    #[test]
    fn test_nested_paths_bound_at_accessor() {
        let client = AmoClient::new(&AmoConfig::new("t", "s")).unwrap();
        assert_eq!(
            client.pipeline_statuses(7).path(),
            "/leads/pipelines/7/statuses"
        );
        assert_eq!(client.notes(NoteParent::Contacts).path(), "/contacts/notes");
    }

    #[test]
    fn test_event_has_no_numeric_id() {
        let event = Event {
            id: Some("01jk3b9e8".into()),
            ..Default::default()
        };
        assert_eq!(event.entity_id(), None);
    }
}

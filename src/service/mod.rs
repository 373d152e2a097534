//! EntityService: generic JSON-facing CRUD over a repository.

mod entity;
pub use entity::{EntityService, ServiceOptions};

//! Entity CRUD routes, one resource path per entity.
//! `GET /{path}` list, `PUT /{path}` create, `POST /{path}` update,
//! `GET /{path}/:id` read, `DELETE /{path}/:id` delete.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::model::{self, Record};
use crate::repository::RepositoryFactory;
use crate::service::{EntityService, ServiceOptions};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Routes for one entity, bound to its service.
pub fn entity_router<R: Record>(service: Arc<EntityService<R>>) -> Router {
    let base = format!("/{}", R::entity().path_segment);
    Router::new()
        .route(&base, get(list::<R>).put(create::<R>).post(update::<R>))
        .route(&format!("{}/:id", base), get(read::<R>).delete(delete_handler::<R>))
        .with_state(service)
}

fn wire<R: Record, F: RepositoryFactory>(factory: &F, options: ServiceOptions) -> Router {
    entity_router::<R>(Arc::new(EntityService::new(factory.repository::<R>(), options)))
}

/// Routes for every catalog entity. Each entity gets its own repository and service,
/// built once here and shared by all requests.
pub fn entity_routes<F: RepositoryFactory>(factory: &F, options: ServiceOptions) -> Router {
    Router::new()
        .merge(wire::<model::Organization, _>(factory, options))
        .merge(wire::<model::Personality, _>(factory, options))
        .merge(wire::<model::Translation, _>(factory, options))
        .merge(wire::<model::Scripture, _>(factory, options))
        .merge(wire::<model::Passage, _>(factory, options))
        .merge(wire::<model::Commentary, _>(factory, options))
        .merge(wire::<model::QuestionCategory, _>(factory, options))
        .merge(wire::<model::QuestionChoice, _>(factory, options))
        .merge(wire::<model::Question, _>(factory, options))
        .merge(wire::<model::Category, _>(factory, options))
        .merge(wire::<model::Pastor, _>(factory, options))
}

//! Entity CRUD handlers: list, read, create (PUT), update (POST), delete.
//! Bodies pass through as raw JSON text; responses are the service's JSON text.

use crate::error::ServiceError;
use crate::model::Record;
use crate::service::EntityService;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

fn parse_id(id_str: &str) -> Result<i32, ServiceError> {
    id_str
        .parse()
        .map_err(|_| ServiceError::InvalidInput(format!("invalid id: {}", id_str)))
}

fn json(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub async fn list<R: Record>(State(service): State<Arc<EntityService<R>>>) -> Result<Response, ServiceError> {
    service.list().await.map(json)
}

pub async fn read<R: Record>(
    State(service): State<Arc<EntityService<R>>>,
    Path(id_str): Path<String>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id_str)?;
    service.get(id).await.map(json)
}

pub async fn create<R: Record>(
    State(service): State<Arc<EntityService<R>>>,
    body: String,
) -> Result<Response, ServiceError> {
    service.add(&body).await.map(json)
}

pub async fn update<R: Record>(
    State(service): State<Arc<EntityService<R>>>,
    body: String,
) -> Result<Response, ServiceError> {
    service.update(&body).await.map(json)
}

pub async fn delete<R: Record>(
    State(service): State<Arc<EntityService<R>>>,
    Path(id_str): Path<String>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id_str)?;
    service.delete(id).await.map(json)
}

//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::response::message_body;
use crate::service::StudentService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Ids outside the integer route pattern cannot name a student.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.parse().map_err(|_| AppError::NotFound)
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = StudentService::list(state.store.as_ref()).await?;
    Ok(Json(students))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let student = StudentService::get(state.store.as_ref(), id).await?;
    Ok(Json(student))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let student = StudentService::create(state.store.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let student = StudentService::update(state.store.as_ref(), id, &body).await?;
    Ok(Json(student))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    StudentService::delete(state.store.as_ref(), id).await?;
    Ok(Json(message_body("Student deleted successfully")))
}

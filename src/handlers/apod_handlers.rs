//! HTTP handlers for the APOD collection.
//! Each handler is a thin shell over `ApodService`; authentication and role
//! checks happen in route layers before these run.

use crate::{errors::AppError, models::record::Record, routes::routes::AppState};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

/// `GET /apod`
pub async fn list_apods(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(state.apod.list_all().await?))
}

/// `GET /apod/date/{date}`
pub async fn get_apod(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Record>, AppError> {
    Ok(Json(state.apod.get_by_date(&date).await?))
}

/// `GET /apod/liked`
pub async fn list_liked(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(state.apod.list_liked().await?))
}

/// `POST /apod` — append the body and echo it back with 201.
pub async fn create_apod(
    State(state): State<AppState>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(record) = payload?;
    let created = state.apod.create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /apod/date/{date}` — shallow merge of the body over the stored record.
pub async fn update_apod(
    State(state): State<AppState>,
    Path(date): Path<String>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(state.apod.update_by_date(&date, patch).await?))
}

/// `DELETE /apod/date/{date}` — returns the removed record.
pub async fn delete_apod(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Record>, AppError> {
    Ok(Json(state.apod.delete_by_date(&date).await?))
}

/// `PUT /apod/like/{date}`
pub async fn like_apod(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Record>, AppError> {
    Ok(Json(state.apod.toggle_like(&date).await?))
}

/// `PUT /apod/unlike/{date}`
pub async fn unlike_apod(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Record>, AppError> {
    Ok(Json(state.apod.unlike(&date).await?))
}

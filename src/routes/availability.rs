use std::sync::Arc;

use axum::{Json, extract::State};

use super::{ApiJson, ApiPath, Message};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{Availability, AvailabilityCreate},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<AvailabilityCreate>,
) -> ApiResult<Json<Availability>> {
    input.validate()?;
    let availability_id = state
        .repo
        .create_availability(&input)
        .await
        .map_err(ApiError::store("creating availability"))?;
    Ok(Json(Availability { availability_id, store_id: input.store_id, film_id: input.film_id }))
}

pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Availability>>> {
    let rows =
        state.repo.list_availability().await.map_err(ApiError::store("retrieving availability"))?;
    Ok(Json(rows.into_iter().map(Availability::from).collect()))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(availability_id): ApiPath<i32>,
    ApiJson(input): ApiJson<AvailabilityCreate>,
) -> ApiResult<Json<Availability>> {
    input.validate()?;
    let updated = state
        .repo
        .update_availability(availability_id, &input)
        .await
        .map_err(ApiError::store("updating availability"))?
        .ok_or(ApiError::NotFound { resource: "Availability", id: availability_id })?;
    Ok(Json(updated.into()))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(availability_id): ApiPath<i32>,
) -> ApiResult<Json<Message>> {
    state
        .repo
        .delete_availability(availability_id)
        .await
        .map_err(ApiError::store("deleting availability"))?;
    Ok(Json(Message::deleted("Availability", availability_id)))
}

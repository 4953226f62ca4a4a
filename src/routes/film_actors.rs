use std::sync::Arc;

use axum::{Json, extract::State};

use super::{ApiJson, ApiPath, Message};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{FilmActor, FilmActorCreate},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<FilmActorCreate>,
) -> ApiResult<Json<FilmActor>> {
    input.validate()?;
    let actor_id = state
        .repo
        .create_film_actor(&input)
        .await
        .map_err(ApiError::store("creating film actor"))?;
    Ok(Json(FilmActor { actor_id, film_id: input.film_id, actor_name: input.actor_name }))
}

pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<FilmActor>>> {
    let actors =
        state.repo.list_film_actors().await.map_err(ApiError::store("retrieving film actors"))?;
    Ok(Json(actors.into_iter().map(FilmActor::from).collect()))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(actor_id): ApiPath<i32>,
    ApiJson(input): ApiJson<FilmActorCreate>,
) -> ApiResult<Json<FilmActor>> {
    input.validate()?;
    let updated = state
        .repo
        .update_film_actor(actor_id, &input)
        .await
        .map_err(ApiError::store("updating film actor"))?
        .ok_or(ApiError::NotFound { resource: "Film actor", id: actor_id })?;
    Ok(Json(updated.into()))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(actor_id): ApiPath<i32>,
) -> ApiResult<Json<Message>> {
    state.repo.delete_film_actor(actor_id).await.map_err(ApiError::store("deleting film actor"))?;
    Ok(Json(Message::deleted("Film actor", actor_id)))
}

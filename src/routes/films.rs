use std::sync::Arc;

use axum::{Json, extract::State};

use super::{ApiJson, ApiPath, Message};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{Film, FilmCreate},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<FilmCreate>,
) -> ApiResult<Json<Film>> {
    input.validate()?;
    let film_id = state.repo.create_film(&input).await.map_err(ApiError::store("creating film"))?;
    Ok(Json(Film {
        film_id,
        title: input.title,
        release_year: Some(input.release_year),
        genre: Some(input.genre),
    }))
}

pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Film>>> {
    let films = state.repo.list_films().await.map_err(ApiError::store("retrieving films"))?;
    Ok(Json(films.into_iter().map(Film::from).collect()))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(film_id): ApiPath<i32>,
    ApiJson(input): ApiJson<FilmCreate>,
) -> ApiResult<Json<Film>> {
    input.validate()?;
    let updated = state
        .repo
        .update_film(film_id, &input)
        .await
        .map_err(ApiError::store("updating film"))?
        .ok_or(ApiError::NotFound { resource: "Film", id: film_id })?;
    Ok(Json(updated.into()))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(film_id): ApiPath<i32>,
) -> ApiResult<Json<Message>> {
    state.repo.delete_film(film_id).await.map_err(ApiError::store("deleting film"))?;
    Ok(Json(Message::deleted("Film", film_id)))
}

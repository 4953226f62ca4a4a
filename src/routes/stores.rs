use std::sync::Arc;

use axum::{Json, extract::State};

use super::{ApiJson, ApiPath, ApiQuery, Message};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{Store, StoreCreate, StoreSearch, StoreSearchQuery, StoreWithFilm},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<StoreCreate>,
) -> ApiResult<Json<Store>> {
    input.validate()?;
    let store_id =
        state.repo.create_store(&input).await.map_err(ApiError::store("creating store"))?;
    Ok(Json(Store { store_id, store_name: input.store_name, location: input.location }))
}

pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Store>>> {
    let stores = state.repo.list_stores().await.map_err(ApiError::store("retrieving stores"))?;
    Ok(Json(stores.into_iter().map(Store::from).collect()))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(store_id): ApiPath<i32>,
    ApiJson(input): ApiJson<StoreCreate>,
) -> ApiResult<Json<Store>> {
    input.validate()?;
    let updated = state
        .repo
        .update_store(store_id, &input)
        .await
        .map_err(ApiError::store("updating store"))?
        .ok_or(ApiError::NotFound { resource: "Store", id: store_id })?;
    Ok(Json(updated.into()))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(store_id): ApiPath<i32>,
) -> ApiResult<Json<Message>> {
    state.repo.delete_store(store_id).await.map_err(ApiError::store("deleting store"))?;
    Ok(Json(Message::deleted("Store", store_id)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<StoreSearchQuery>,
) -> ApiResult<Json<Vec<StoreWithFilm>>> {
    let search = query.into_search().ok_or_else(|| {
        ApiError::BadRequest(
            "Specify exactly one search parameter: film_name, genre, or actor".to_string(),
        )
    })?;
    let action = match search {
        StoreSearch::FilmName(_) => "fetching stores by film_name",
        StoreSearch::Genre(_) => "fetching stores by genre",
        StoreSearch::Actor(_) => "fetching stores by actor",
    };
    let stores = state.repo.search_stores(search).await.map_err(ApiError::store(action))?;
    Ok(Json(stores))
}

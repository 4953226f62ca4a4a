use std::sync::Arc;

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, error::ApiError};

mod availability;
mod film_actors;
mod films;
mod stores;

/// JSON body extractor whose rejections use the service's error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn deleted(resource: &str, id: i32) -> Self {
        Self { message: format!("{resource} with ID {id} deleted successfully") }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/stores/", post(stores::create).get(stores::list))
        .route("/stores/films", get(stores::search))
        .route("/stores/{store_id}", put(stores::update).delete(stores::delete))
        .route("/availability/", post(availability::create).get(availability::list))
        .route(
            "/availability/{availability_id}",
            put(availability::update).delete(availability::delete),
        )
        .route("/films/", post(films::create).get(films::list))
        .route("/films/{film_id}", put(films::update).delete(films::delete))
        .route("/film_actors/", post(film_actors::create).get(film_actors::list))
        .route("/film_actors/{actor_id}", put(film_actors::update).delete(film_actors::delete))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::repo::test_repository;

    async fn app() -> Router {
        router(Arc::new(AppState { repo: test_repository().await }))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        if status != StatusCode::OK {
            let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
            assert_eq!(content_type, "application/json", "{uri}");
        }
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value =
            if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    #[tokio::test]
    async fn film_store_availability_search_flow() {
        let app = app().await;

        let (status, film) =
            post(&app, "/films/", json!({"title": "Dune", "release_year": 2021, "genre": "SciFi"}))
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            film,
            json!({"film_id": 1, "title": "Dune", "release_year": 2021, "genre": "SciFi"})
        );

        let (status, store) =
            post(&app, "/stores/", json!({"store_name": "Main", "location": "5th Ave"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store, json!({"store_id": 1, "store_name": "Main", "location": "5th Ave"}));

        let (status, availability) =
            post(&app, "/availability/", json!({"store_id": 1, "film_id": 1})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(availability, json!({"availability_id": 1, "store_id": 1, "film_id": 1}));

        let (status, found) = get(&app, "/stores/films?film_name=Dune").await;
        assert_eq!(status, StatusCode::OK);
        let expected = json!([{
            "store_id": 1,
            "store_name": "Main",
            "location": "5th Ave",
            "film_name": "Dune",
        }]);
        assert_eq!(found, expected);

        let (status, found) = get(&app, "/stores/films?genre=Western").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, json!([]));
    }

    #[tokio::test]
    async fn search_requires_exactly_one_parameter() {
        let app = app().await;
        let uris = [
            "/stores/films",
            "/stores/films?film_name=Dune&genre=SciFi",
            "/stores/films?genre=a&actor=b",
        ];
        for uri in uris {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                body["detail"],
                "Specify exactly one search parameter: film_name, genre, or actor"
            );
        }
    }

    #[tokio::test]
    async fn malformed_path_and_query_get_json_detail() {
        let app = app().await;

        let (status, body) = get(&app, "/stores/films?film_name=a&film_name=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("film_name"));

        for uri in ["/films/abc", "/films/3000000000"] {
            let (status, body) = send(&app, Method::DELETE, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["detail"].is_string(), "{uri}");
        }

        let (status, body) = send(
            &app,
            Method::PUT,
            "/stores/abc",
            Some(json!({"store_name": "Main", "location": "5th Ave"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn release_year_out_of_range_is_rejected() {
        let app = app().await;
        for year in [1899, 2025] {
            let (status, _) = post(
                &app,
                "/films/",
                json!({"title": "Too Early", "release_year": year, "genre": "Drama"}),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        }
        let (_, films) = get(&app, "/films/").await;
        assert_eq!(films, json!([]));
    }

    #[tokio::test]
    async fn malformed_body_gets_json_detail() {
        let app = app().await;
        let (status, body) = post(&app, "/stores/", json!({"store_name": "No Location"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn updating_missing_rows_is_404() {
        let app = app().await;
        let cases = [
            ("/stores/9", json!({"store_name": "Main", "location": "5th Ave"}), "Store"),
            ("/films/9", json!({"title": "Dune", "release_year": 2021, "genre": "SciFi"}), "Film"),
            ("/film_actors/9", json!({"film_id": 1, "actor_name": "Zendaya"}), "Film actor"),
            ("/availability/9", json!({"store_id": 1, "film_id": 1}), "Availability"),
        ];
        for (uri, body, resource) in cases {
            let (status, body) = send(&app, Method::PUT, uri, Some(body)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["detail"], format!("{resource} with ID 9 not found"));
        }
    }

    #[tokio::test]
    async fn update_then_read_back() {
        let app = app().await;
        post(&app, "/stores/", json!({"store_name": "Main", "location": "5th Ave"})).await;

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/stores/1",
            Some(json!({"store_name": "Main", "location": "Broadway"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, json!({"store_id": 1, "store_name": "Main", "location": "Broadway"}));

        let (_, stores) = get(&app, "/stores/").await;
        assert_eq!(stores, json!([updated]));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let app = app().await;
        post(&app, "/films/", json!({"title": "Heat", "release_year": 1995, "genre": "Crime"}))
            .await;

        for _ in 0..2 {
            let (status, body) = send(&app, Method::DELETE, "/films/1", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "Film with ID 1 deleted successfully");
        }
        let (_, films) = get(&app, "/films/").await;
        assert_eq!(films, json!([]));
    }

    #[tokio::test]
    async fn dangling_reference_is_a_server_error() {
        let app = app().await;
        let (status, body) =
            post(&app, "/availability/", json!({"store_id": 5, "film_id": 5})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().starts_with("Error creating availability: "));
    }

    #[tokio::test]
    async fn actor_search_through_http() {
        let app = app().await;
        post(&app, "/films/", json!({"title": "Heat", "release_year": 1995, "genre": "Crime"}))
            .await;
        post(&app, "/stores/", json!({"store_name": "Annex", "location": "Pier 9"})).await;
        post(&app, "/availability/", json!({"store_id": 1, "film_id": 1})).await;

        let (status, actor) =
            post(&app, "/film_actors/", json!({"film_id": 1, "actor_name": "Al Pacino"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(actor, json!({"actor_id": 1, "film_id": 1, "actor_name": "Al Pacino"}));

        let (status, found) = get(&app, "/stores/films?actor=Al%20Pacino").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found[0]["store_name"], "Annex");
        assert_eq!(found[0]["film_name"], "Heat");
    }
}

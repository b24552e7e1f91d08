//! Request handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sonora_search::{Pagination, SearchError, TrackRecord};

use super::server::AppContext;

/// Errors returned to HTTP clients as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => {
                log::error!("Request failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

/// GET /
pub async fn home() -> Json<serde_json::Value> {
    Json(json!({ "status": "Music recommendation API running" }))
}

/// GET /songs
pub async fn list_songs(State(ctx): State<AppContext>) -> Json<Vec<TrackRecord>> {
    let records = ctx.engine.sample(ctx.sample_size, &mut rand::thread_rng());
    Json(records)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    page: Option<i64>,
    per_page: Option<i64>,
}

/// GET /search?q=&page=&per_page=
pub async fn search_songs(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<TrackRecord>>> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let pagination = Pagination::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(ctx.search_per_page),
    );
    log::debug!("GET /search q='{query}' page={}", pagination.page);

    Ok(Json(ctx.engine.search(query, pagination)?))
}

/// Body or query string of POST /recommend.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    song: Option<String>,
    page: Option<i64>,
    per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    input: String,
    recommendations: Vec<TrackRecord>,
    page: i64,
    per_page: i64,
}

/// POST /recommend
///
/// Reads `song`, `page` and `per_page` from a JSON body; when the body names
/// no song, all three come from the query string instead. The query string
/// is only validated when it is used.
pub async fn recommend_song(
    State(ctx): State<AppContext>,
    query: Result<Query<RecommendRequest>, QueryRejection>,
    body: Option<Json<RecommendRequest>>,
) -> ApiResult<Json<RecommendResponse>> {
    let request = match body {
        Some(Json(body)) if body.song.as_deref().is_some_and(|s| !s.is_empty()) => body,
        _ => {
            let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
            query
        }
    };

    let song = request
        .song
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ApiError::BadRequest(String::from("Song name is required (JSON or query param)"))
        })?;
    let page = request.page.unwrap_or(1);
    let per_page = request.per_page.unwrap_or(ctx.recommend_per_page);
    log::debug!("POST /recommend song='{song}' page={page}");

    let recommendations = ctx
        .engine
        .recommend(&song, Pagination::new(page, per_page))?;

    Ok(Json(RecommendResponse {
        input: song,
        recommendations,
        page,
        per_page,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::server::router;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use sonora_core::{Corpus, Track};
    use sonora_search::{Engine, EngineOptions};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn track(name: &str, artist: &str, energy: &str, tempo: &str) -> Track {
        Track::new(name, artist)
            .with_genre("pop")
            .with_popularity(60)
            .with_attribute("energy", energy)
            .with_attribute("tempo", tempo)
    }

    fn app() -> axum::Router {
        let corpus = Corpus::new(vec![
            track("Hey Jude", "The Beatles", "0.5", "74"),
            track("Hey Jude", "The Beatles", "0.5", "74"),
            track("Help!", "The Beatles", "0.9", "95"),
            track("Hello", "Adele", "0.4", "79"),
            track("Heroes", "David Bowie", "0.8", "113"),
        ]);
        let options = EngineOptions {
            features: vec!["energy".to_string(), "tempo".to_string()],
            ..EngineOptions::default()
        };
        let engine = Engine::build(corpus, options).unwrap();
        router(AppContext {
            engine: Arc::new(engine),
            search_per_page: 5,
            recommend_per_page: 10,
            sample_size: 3,
        })
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_home() {
        let (status, body) = send(get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["status"].is_string());
    }

    #[tokio::test]
    async fn test_songs_returns_sample_without_scores() {
        let (status, body) = send(get("/songs")).await;
        assert_eq!(status, StatusCode::OK);
        let songs = body.as_array().unwrap();
        assert_eq!(songs.len(), 3);
        assert!(songs.iter().all(|s| s.get("score").is_none()));
    }

    #[tokio::test]
    async fn test_search_dedups_and_pages() {
        let (status, body) = send(get("/search?q=hey%20jude&per_page=10")).await;
        assert_eq!(status, StatusCode::OK);
        let results = body.as_array().unwrap();
        assert_eq!(results[0]["track_name"], "Hey Jude");
        assert_eq!(
            results.iter().filter(|r| r["track_name"] == "Hey Jude").count(),
            1
        );

        let (_, body) = send(get("/search?q=hey%20jude&per_page=1&page=2")).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_ne!(body[0]["track_name"], "Hey Jude");
    }

    #[tokio::test]
    async fn test_search_blank_query_is_empty() {
        let (status, body) = send(get("/search?q=%20%20")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (_, body) = send(get("/search")).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_recommend_from_json_body() {
        let request = post_json("/recommend", &json!({ "song": "Help!", "per_page": 2 }));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"], "Help!");
        assert_eq!(body["page"], 1);
        assert_eq!(body["per_page"], 2);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r["track_name"] != "Help!"));
        assert!(recs.iter().all(|r| r["score"].is_number()));
    }

    #[tokio::test]
    async fn test_recommend_from_query_params() {
        let request = Request::builder()
            .method("POST")
            .uri("/recommend?song=Hello&page=1&per_page=3")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"], "Hello");
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_recommend_body_wins_over_malformed_query() {
        let request = post_json("/recommend?page=x", &json!({ "song": "Help!", "per_page": 1 }));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"], "Help!");
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recommend_malformed_query_is_json_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/recommend?song=Hello&page=x")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_recommend_without_song_is_bad_request() {
        let (status, body) = send(post_json("/recommend", &json!({ "page": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_recommend_unknown_song_is_not_found() {
        let (status, body) = send(post_json("/recommend", &json!({ "song": "Nope" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Nope"));
    }
}

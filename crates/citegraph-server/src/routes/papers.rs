//! Paper routes: add a root, list, look up one paper, clear.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use citegraph_core::Error;
use citegraph_ingest::IngestResult;
use citegraph_store::GraphQuery;

use crate::listing::{arrange, ListParams};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add_paper", post(add_paper))
        .route("/papers", get(list_papers))
        .route("/papers/{paper_id}", get(get_paper))
        .route("/clear", post(clear))
}

#[derive(Debug, Deserialize)]
struct AddPaperRequest {
    #[serde(default)]
    paper_id: Option<String>,
}

/// Failures are reported in the body; the status stays 200. A body that is
/// not a JSON object carrying an ID counts as a missing ID.
async fn add_paper(
    State(state): State<Arc<AppState>>,
    req: Result<Json<AddPaperRequest>, JsonRejection>,
) -> Json<IngestResult> {
    let paper_id = match req {
        Ok(Json(req)) => req.paper_id.unwrap_or_default(),
        Err(rejection) => {
            warn!("Rejected add_paper body: {}", rejection.body_text());
            return Json(IngestResult::failure(&Error::Validation(
                "Paper ID is required".into(),
            )));
        }
    };
    Json(state.ingester.add_root(&paper_id).await)
}

async fn list_papers(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let snapshot = GraphQuery::new(&state.graph).snapshot();
    Json(serde_json::json!({
        "papers": arrange(snapshot.papers, &params),
        "stats": snapshot.stats,
    }))
    .into_response()
}

async fn get_paper(State(state): State<Arc<AppState>>, Path(paper_id): Path<String>) -> Response {
    match GraphQuery::new(&state.graph).paper(paper_id.trim()) {
        Some(paper) => Json(paper).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Paper not found" })),
        )
            .into_response(),
    }
}

async fn clear(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.graph.reset();
    info!("Graph cleared via API");
    Json(serde_json::json!({
        "success": true,
        "message": "All data cleared",
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::routes::build_router;
    use crate::test_support::{test_state, StubProvider};

    fn provider() -> StubProvider {
        StubProvider::default()
            .with("R", &["A", "B"], &["B", "C"])
            .with("A", &["X"], &[])
    }

    async fn call(
        app: axum::Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        send(app, req.body(body).unwrap()).await
    }

    async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn add(app: &axum::Router, id: &str) -> serde_json::Value {
        let (status, body) = call(
            app.clone(),
            Method::POST,
            "/api/add_paper",
            Some(serde_json::json!({ "paper_id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    #[tokio::test]
    async fn test_add_paper_then_list() {
        let (state, _) = test_state(provider());
        let app = build_router(state);

        let body = add(&app, "R").await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Added paper with 2 references and 2 citations");
        assert_eq!(body["new_papers"], 3);
        assert_eq!(body["new_edges"], 3);
        assert_eq!(body["paper"]["paper_id"], "R");
        assert_eq!(body["paper"]["is_main"], true);

        let (status, list) = call(app, Method::GET, "/api/papers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["stats"]["total_papers"], 4);
        assert_eq!(list["stats"]["main_papers"], 1);
        assert_eq!(list["stats"]["total_edges"], 3);
        // Root has the most edges, so it leads the default order.
        assert_eq!(list["papers"][0]["paper_id"], "R");
        assert_eq!(list["papers"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_add_paper_twice_is_noop() {
        let (state, provider) = test_state(provider());
        let app = build_router(state);

        add(&app, "R").await;
        let body = add(&app, "R").await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Paper already added");
        assert_eq!(body["new_papers"], 0);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_add_paper_failures_stay_200() {
        let (state, _) = test_state(provider());
        let app = build_router(state);

        let body = add(&app, "   ").await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Paper ID is required");
        assert_eq!(body["error"], "validation");

        let (_, body) = call(
            app.clone(),
            Method::POST,
            "/api/add_paper",
            Some(serde_json::json!({})),
        )
        .await;
        assert_eq!(body["error"], "validation");

        let body = add(&app, "missing").await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "not_found");
        assert!(body["paper"].is_null());
    }

    #[tokio::test]
    async fn test_list_main_filter_and_sort() {
        let (state, _) = test_state(provider());
        let app = build_router(state);
        add(&app, "R").await;
        add(&app, "A").await;

        let (_, list) = call(app.clone(), Method::GET, "/api/papers?filter=main", None).await;
        let ids: Vec<&str> = list["papers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["paper_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["R", "A"]);
        // Stats are not affected by the filter.
        assert_eq!(list["stats"]["total_papers"], 5);
        assert_eq!(list["stats"]["main_papers"], 2);

        let (status, body) = call(app, Method::GET, "/api/papers?sort=bogus", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("bogus"));
    }

    #[tokio::test]
    async fn test_add_paper_unusable_body_is_validation() {
        let (state, provider) = test_state(provider());
        let app = build_router(state);

        let requests = [
            // No content type
            Request::post("/api/add_paper")
                .body(Body::from(r#"{"paper_id":"R"}"#))
                .unwrap(),
            // Empty JSON body
            Request::post("/api/add_paper")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::empty())
                .unwrap(),
            // Null ID
            Request::post("/api/add_paper")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"paper_id":null}"#))
                .unwrap(),
        ];

        for req in requests {
            let (status, body) = send(app.clone(), req).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Paper ID is required");
            assert_eq!(body["error"], "validation");
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_paper() {
        let (state, _) = test_state(provider());
        let app = build_router(state);
        add(&app, "R").await;

        let (status, paper) = call(app.clone(), Method::GET, "/api/papers/B", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(paper["paper_id"], "B");
        assert_eq!(paper["is_main"], false);
        assert_eq!(paper["edge_count"], 1);

        let (status, body) = call(app, Method::GET, "/api/papers/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Paper not found");
    }

    #[tokio::test]
    async fn test_clear_resets_graph() {
        let (state, provider) = test_state(provider());
        let app = build_router(state.clone());
        add(&app, "R").await;

        let (status, body) = call(app.clone(), Method::POST, "/api/clear", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "All data cleared");

        let (_, list) = call(app.clone(), Method::GET, "/api/papers", None).await;
        assert_eq!(list["stats"]["total_papers"], 0);
        assert!(list["papers"].as_array().unwrap().is_empty());

        // A cleared root is fetched again.
        let body = add(&app, "R").await;
        assert_eq!(body["new_papers"], 3);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state(provider());
        let app = build_router(state);
        add(&app, "R").await;

        let (status, body) = call(app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["provider"], "stub");
        assert_eq!(body["stats"]["total_edges"], 3);
    }
}

use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::debug;

use crate::state::AppState;

const SHELL: &str = include_str!("../web/index.html");

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(shell)).fallback(fallback)
}

async fn shell() -> Html<&'static str> {
    Html(SHELL)
}

/// Client-side paths get the shell; unknown API paths get a JSON 404.
async fn fallback(uri: Uri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        debug!(path, "no api route");
        return (StatusCode::NOT_FOUND, Json(json!({ "msg": "Not found" }))).into_response();
    }
    Html(SHELL).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{header, Method, StatusCode};
    use serde_json::json;

    use crate::testing::{body_json, body_text, call, test_state};

    #[tokio::test]
    async fn root_serves_shell() {
        let state = test_state();
        let res = call(&state, Method::GET, "/", None, None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let html = body_text(res).await;
        assert!(html.contains("DevConnector"));
        assert!(html.contains("Developers"));
        assert!(html.contains("class=\"landing\""));
    }

    #[tokio::test]
    async fn client_routes_fall_back_to_shell() {
        let state = test_state();
        for path in ["/login", "/register", "/profiles", "/dashboard/edit"] {
            let res = call(&state, Method::GET, path, None, None).await;
            assert_eq!(res.status(), StatusCode::OK, "{path}");
            assert!(body_text(res).await.contains("Developer Connector"));
        }
    }

    #[tokio::test]
    async fn unknown_api_path_is_json_404() {
        let state = test_state();
        let res = call(&state, Method::GET, "/api/posts", None, None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await, json!({ "msg": "Not found" }));
    }
}

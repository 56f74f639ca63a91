//! Local preview of the route surface.
//!
//! Listing, post and category routes answer with the same JSON documents a
//! build writes to disk. Lookup failures become 404s.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::error::LookupError;
use crate::routes::{parse_page_number, FEED_PATH, SITEMAP_PATH};
use crate::state::AppState;

/// Maps lookup failures to a not-found response.
struct NotFound(LookupError);

impl From<LookupError> for NotFound {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        debug!(error = %self.0, "route not found");
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/page/{page}", get(render_page))
        .route("/page/{page}/", get(render_page))
        .route("/posts/{slug}", get(render_post))
        .route("/posts/{slug}/", get(render_post))
        .route("/category/{id}", get(render_category))
        .route("/category/{id}/", get(render_category))
        .route(SITEMAP_PATH, get(sitemap))
        .route(FEED_PATH, get(feed))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    info!(%addr, "listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn homepage(State(state): State<Arc<AppState>>) -> Result<Response, NotFound> {
    let page = state.site.page(1)?;
    Ok(Json(page).into_response())
}

async fn render_page(
    Path(page): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, NotFound> {
    let number = parse_page_number(&page)?;
    if number == 1 {
        return Ok(Redirect::permanent("/").into_response());
    }
    let page = state.site.page(number)?;
    Ok(Json(page).into_response())
}

async fn render_post(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, NotFound> {
    let post = state.site.post(&slug)?;
    Ok(Json(post).into_response())
}

async fn render_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, NotFound> {
    let category = state.site.category(&id)?;
    Ok(Json(category).into_response())
}

async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        state.sitemap_xml.clone(),
    )
}

async fn feed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/rss+xml")],
        state.feed_xml.clone(),
    )
}

async fn not_found() -> NotFound {
    NotFound(LookupError::NotFound {
        resource: "route".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::index::test_post;
    use crate::site::Site;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::Utc;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut config = test_config();
        config.posts_per_page = 2;
        let posts = vec![
            test_post("a", "2024-01-01", Some("rust")),
            test_post("b", "2024-01-02", None),
            test_post("c", "2024-01-03", None),
        ];
        let site = Site::from_posts(config, posts, Utc::now()).unwrap();
        router(Arc::new(AppState::new(site).unwrap()))
    }

    async fn get(uri: &str) -> (StatusCode, Response) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        (response.status(), response)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn serves_listing_pages() {
        let (status, response) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["posts"][0]["slug"], "c");
        assert_eq!(json["total_page"], 2);

        let (status, response) = get("/page/2/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json(response).await["posts"][0]["slug"], "a");
    }

    #[tokio::test]
    async fn page_one_redirects_to_root() {
        let (status, response) = get("/page/1/").await;
        assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn invalid_and_out_of_range_pages_are_not_found() {
        for uri in ["/page/0/", "/page/abc/", "/page/3/", "/page/-1/"] {
            let (status, _) = get(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn serves_posts_and_categories() {
        let (status, response) = get("/posts/b/").await;
        assert_eq!(status, StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["post"]["slug"], "b");
        assert_eq!(json["metadata"]["canonical_url"], "https://example.com/posts/b/");

        let (status, _) = get("/posts/missing/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, response) = get("/category/rust").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json(response).await["posts"][0]["slug"], "a");

        let (status, _) = get("/category/cloud/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_xml_documents() {
        let (status, response) = get("/sitemap.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");

        let (status, response) = get("/rss.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/rss+xml");
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let (status, _) = get("/nothing/here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

//! HTTP handlers: a search page and a JSON API over the same pipeline.
//!
//! Credentials live only inside [`AppState`]'s source selection and are
//! never written to a response.

use crate::logic::{build_news_view, validate_keyword, NewsView};
use crate::network::{NewsEngine, NewsSource};
use crate::utils::escape_html;
use axum::{
    extract::{Form, Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

const MSG_EMPTY_KEYWORD: &str = "Please enter a keyword.";
const MSG_NO_RESULTS: &str = "No results.";

#[derive(Clone)]
pub struct AppState {
    engine: Arc<NewsEngine>,
    source: NewsSource,
    limit: usize,
}

impl AppState {
    pub fn new(engine: Arc<NewsEngine>, source: NewsSource, limit: usize) -> Self {
        Self { engine, source, limit }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KeywordParams {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Serialize)]
struct NewsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    items: Vec<NewsView>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(index_page).post(search_page))
        .route("/api/news", get(api_news))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await
}

async fn api_news(State(state): State<AppState>, Query(params): Query<KeywordParams>) -> Response {
    let keyword = match validate_keyword(&params.keyword) {
        Ok(k) => k,
        Err(_) => {
            let body = NewsResponse { error: Some(MSG_EMPTY_KEYWORD), items: Vec::new() };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let items = build_news_view(&state.engine, &state.source, keyword, state.limit).await;
    (StatusCode::OK, Json(NewsResponse { error: None, items })).into_response()
}

async fn index_page() -> Html<String> {
    render_page("", &[], None)
}

async fn search_page(State(state): State<AppState>, Form(params): Form<KeywordParams>) -> Html<String> {
    let keyword = match validate_keyword(&params.keyword) {
        Ok(k) => k,
        Err(_) => return render_page("", &[], Some(MSG_EMPTY_KEYWORD)),
    };

    let items = build_news_view(&state.engine, &state.source, keyword, state.limit).await;
    let error = items.is_empty().then_some(MSG_NO_RESULTS);
    render_page(keyword, &items, error)
}

fn render_page(keyword: &str, items: &[NewsView], error: Option<&str>) -> Html<String> {
    let mut body = String::with_capacity(2048);
    body.push_str("<!doctype html>\n<html lang=\"ko\">\n<head><meta charset=\"utf-8\"><title>News Brief</title></head>\n<body>\n");
    body.push_str("<h1>News Brief</h1>\n<form method=\"post\" action=\"/\">\n");
    body.push_str(&format!(
        "  <input type=\"text\" name=\"keyword\" value=\"{}\" placeholder=\"keyword\">\n  <button type=\"submit\">Search</button>\n</form>\n",
        escape_html(keyword)
    ));

    if let Some(msg) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(msg)));
    }

    if !items.is_empty() {
        body.push_str("<ol>\n");
        for item in items {
            body.push_str(&format!(
                "  <li value=\"{}\"><a href=\"{}\">{}</a><p>{}</p></li>\n",
                item.index,
                escape_html(&item.link),
                escape_html(&item.title),
                escape_html(&item.summary)
            ));
        }
        body.push_str("</ol>\n");
    }

    body.push_str("</body>\n</html>\n");
    Html(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{any, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn keyed_state(server: &MockServer) -> AppState {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "title": "<b>AI</b> breakthrough",
                    "description": "Scientists say <b>AI</b> model beats record. More details follow.",
                    "link": "http://x"
                }]
            })))
            .mount(server)
            .await;
        let engine = NewsEngine::with_endpoints(server.uri(), server.uri()).unwrap();
        AppState::new(engine, NewsSource::select(Credentials::new("the-id", "the-secret")), 10)
    }

    async fn body_string(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_api_news_returns_views() {
        let server = MockServer::start().await;
        let app = create_router(keyed_state(&server).await);

        let res = app
            .oneshot(Request::builder().uri("/api/news?keyword=AI").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let text = body_string(res).await;
        assert!(!text.contains("the-secret"));
        assert!(!text.contains("the-id"));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "index": 1,
                    "title": "AI breakthrough",
                    "description": "Scientists say AI model beats record. More details follow.",
                    "summary": "Scientists say AI model beats record",
                    "link": "http://x"
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_api_news_blank_keyword_is_bad_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let engine = NewsEngine::with_endpoints(server.uri(), server.uri()).unwrap();
        let app = create_router(AppState::new(engine, NewsSource::Rss, 10));

        let res = app
            .oneshot(Request::builder().uri("/api/news?keyword=%20%20").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["error"], MSG_EMPTY_KEYWORD);
    }

    #[tokio::test]
    async fn test_search_form_renders_escaped_results() {
        let server = MockServer::start().await;
        let app = create_router(keyed_state(&server).await);

        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("keyword=%3Cscript%3E"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let html = body_string(res).await;
        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<a href=\"http://x\">AI breakthrough</a><p>Scientists say AI model beats record</p>"));
        assert!(!html.contains("the-secret"));
    }

    #[tokio::test]
    async fn test_search_form_reports_empty_keyword_and_no_results() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let engine = NewsEngine::with_endpoints(server.uri(), server.uri()).unwrap();
        let app = create_router(AppState::new(engine, NewsSource::Rss, 10));

        let form = |body: &'static str| {
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap()
        };

        let html = body_string(app.clone().oneshot(form("keyword=")).await.unwrap()).await;
        assert!(html.contains(MSG_EMPTY_KEYWORD));

        let html = body_string(app.oneshot(form("keyword=AI")).await.unwrap()).await;
        assert!(html.contains(MSG_NO_RESULTS));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let server = MockServer::start().await;
        let engine = NewsEngine::with_endpoints(server.uri(), server.uri()).unwrap();
        let app = create_router(AppState::new(engine, NewsSource::Rss, 10));

        let res = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/news")
                    .header(header::ORIGIN, "https://elsewhere.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(res.status().is_success());
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_index_page_has_form() {
        let html = index_page().await.0;
        assert!(html.contains("<form method=\"post\" action=\"/\">"));
        assert!(!html.contains("class=\"error\""));
    }
}

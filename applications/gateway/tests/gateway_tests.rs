//! Route-level tests for the gateway, driven through the router without a
//! real listener.

use std::sync::Arc;

use agora_core::ClientDefaults;
use agora_gateway::config::GatewayConfig;
use agora_gateway::defaults_js::render_defaults_module;
use agora_gateway::routes::create_router;
use agora_gateway::state::AppState;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router_with(config: GatewayConfig, defaults: &ClientDefaults) -> axum::Router {
    let state = Arc::new(AppState::new(
        reqwest::Client::new(),
        config,
        render_defaults_module(defaults).expect("module renders"),
    ));
    create_router(state)
}

fn default_router() -> axum::Router {
    router_with(GatewayConfig::default(), &ClientDefaults::default())
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn root_redirects_to_index() {
    let response = default_router()
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/index.html")
    );
}

#[tokio::test]
async fn defaults_module_is_served_as_javascript() {
    let defaults = ClientDefaults {
        app_name: "Foo".to_string(),
        api_base: "https://x/api".to_string(),
        timeout_ms: 5000,
    };
    let response = router_with(GatewayConfig::default(), &defaults)
        .oneshot(
            Request::get("/js/core/defaults.js")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .expect("content type")
        .starts_with("application/javascript"));

    let body = body_string(response).await;
    let start = body.find("Object.freeze(").expect("freeze present") + "Object.freeze(".len();
    let end = body.find(");").expect("freeze closed");
    let config: serde_json::Value = serde_json::from_str(&body[start..end]).expect("JSON payload");

    assert_eq!(
        config,
        serde_json::json!({
            "APP_NAME": "Foo",
            "API_BASE": "https://x/api",
            "TIMEOUT_MS": 5000,
        })
    );
}

#[tokio::test]
async fn static_files_come_from_public_then_assets() {
    let public = tempfile::tempdir().expect("public dir");
    let assets = tempfile::tempdir().expect("assets dir");
    std::fs::write(public.path().join("index.html"), "<h1>hello</h1>").expect("write index");
    std::fs::write(assets.path().join("style.css"), "body{}").expect("write css");

    let mut config = GatewayConfig::default();
    config.static_files.public_dir = public.path().to_path_buf();
    config.static_files.assets_dir = assets.path().to_path_buf();
    let router = router_with(config, &ClientDefaults::default());

    let response = router
        .clone()
        .oneshot(
            Request::get("/index.html")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<h1>hello</h1>");

    // Not in public/, found in assets/.
    let response = router
        .clone()
        .oneshot(
            Request::get("/style.css")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "body{}");

    let response = router
        .oneshot(
            Request::get("/missing.txt")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pages_prefix_is_proxied_with_path_preserved() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/posts.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>from upstream</p>"))
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = GatewayConfig::default();
    config.proxy.target = upstream.uri();
    let router = router_with(config, &ClientDefaults::default());

    let response = router
        .oneshot(
            Request::get("/pages/posts.html")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<p>from upstream</p>");
}

#[tokio::test]
async fn proxy_forwards_upstream_status_codes() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/gone.html"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&upstream)
        .await;

    let mut config = GatewayConfig::default();
    config.proxy.target = upstream.uri();
    let router = router_with(config, &ClientDefaults::default());

    let response = router
        .oneshot(
            Request::get("/pages/gone.html")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "nope");
}

#[tokio::test]
async fn unreachable_upstream_answers_502_json() {
    let mut config = GatewayConfig::default();
    // Port 1 is never listening.
    config.proxy.target = "http://127.0.0.1:1".to_string();
    let router = router_with(config, &ClientDefaults::default());

    let response = router
        .oneshot(
            Request::get("/pages/posts.html")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("JSON body");
    assert_eq!(body, serde_json::json!({ "message": "Upstream unavailable" }));
}

#[tokio::test]
async fn port_env_overrides_configured_port() {
    // Only this test touches PORT; keep it self-contained.
    std::env::set_var("PORT", "4567");
    let config = GatewayConfig::load(None).expect("config loads");
    std::env::remove_var("PORT");

    assert_eq!(config.server.port, 4567);
}

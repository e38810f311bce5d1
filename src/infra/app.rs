use axum::{Router, body::Body, http, middleware};
use http::header::CONTENT_TYPE;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::adapters::{
    self,
    http::{app_state::AppState, middleware::rate_limit_middleware},
};

pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(app_state.config.cors_origins.clone()))
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([CONTENT_TYPE]);

    adapters::http::routes::router()
        .with_state(app_state.clone())
        .layer(middleware::from_fn_with_state(
            app_state,
            rate_limit_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &http::Request<Body>| {
                        let request_id = Uuid::new_v4();
                        tracing::info_span!(
                            "http-request",
                            method = %request.method(),
                            uri = %request.uri(),
                            version = ?request.version(),
                            request_id = %request_id
                        )
                    }),
                )
                .layer(SetResponseHeaderLayer::if_not_present(
                    http::header::X_CONTENT_TYPE_OPTIONS,
                    http::HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    http::header::X_FRAME_OPTIONS,
                    http::HeaderValue::from_static("DENY"),
                ))
                .layer(cors),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::test_utils::TestAppStateBuilder;

    #[tokio::test]
    async fn sets_security_headers() {
        let server = TestServer::new(create_app(TestAppStateBuilder::new().build())).unwrap();

        let response = server.get("/").await;

        response.assert_status_ok();
        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    }

    #[tokio::test]
    async fn allows_configured_origin() {
        let server = TestServer::new(create_app(TestAppStateBuilder::new().build())).unwrap();

        let response = server
            .get("/")
            .add_header("Origin", "http://localhost:3000")
            .await;

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn ignores_unknown_origin() {
        let server = TestServer::new(create_app(TestAppStateBuilder::new().build())).unwrap();

        let response = server
            .get("/")
            .add_header("Origin", "https://evil.example")
            .await;

        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }

    #[tokio::test]
    async fn rate_limit_returns_429_with_error_body() {
        let app_state = TestAppStateBuilder::new().with_rate_limit(2).build();
        let server = TestServer::new(create_app(app_state)).unwrap();

        let first = server.get("/").await;
        first.assert_status_ok();
        assert_eq!(first.headers().get("ratelimit-limit").unwrap(), "2");
        assert_eq!(first.headers().get("ratelimit-remaining").unwrap(), "1");
        assert!(first.headers().get("ratelimit-reset").is_some());
        assert!(first.headers().get("retry-after").is_none());

        let second = server
            .post("/waitlist")
            .json(&json!({ "email": "a@b.com" }))
            .await;
        second.assert_status_ok();
        assert_eq!(second.headers().get("ratelimit-remaining").unwrap(), "0");

        let response = server.get("/beta/spots").await;
        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.json::<serde_json::Value>(),
            json!({ "error": "Too many requests, please try again later." })
        );
        let headers = response.headers();
        assert_eq!(headers.get("ratelimit-limit").unwrap(), "2");
        assert_eq!(headers.get("ratelimit-remaining").unwrap(), "0");
        let reset: u64 = headers
            .get("ratelimit-reset")
            .unwrap()
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(reset > 0 && reset <= 900);
        assert_eq!(
            headers.get("retry-after").unwrap(),
            headers.get("ratelimit-reset").unwrap()
        );
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    }

    #[tokio::test]
    async fn full_signup_flow_through_app() {
        let server = TestServer::new(create_app(TestAppStateBuilder::new().build())).unwrap();

        for (name, email) in [("Ada", "ada@x.com"), ("Bob", "bob@x.com"), ("Cy", "cy@x.com")] {
            server
                .post("/beta/signup")
                .json(&json!({ "name": name, "email": email }))
                .await
                .assert_status_ok();
        }

        let response = server.get("/beta/spots").await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>(), json!({ "spotsTaken": 3 }));
    }
}

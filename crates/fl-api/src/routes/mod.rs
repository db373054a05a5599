//! Route definitions
//!
//! Business endpoints are mounted under /api and pass the general rate
//! limit; health probes and uploaded files are served outside of it.

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{auth, health, products, reviews, upload, visits};
use crate::middleware::{limit_general, limit_like, limit_login, limit_review_submit};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router(state: &AppState) -> Router<AppState> {
    let upload_dir = state.config().storage.upload_dir.clone();

    Router::new()
        .route("/", get(health::root))
        .merge(health_routes())
        .nest("/api", api_routes(state))
        .nest_service("/uploads", ServeDir::new(upload_dir))
}

/// Health check routes (kept outside the rate limiter)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(review_routes(state))
        .merge(product_routes())
        .merge(auth_routes(state))
        .merge(upload_routes(state))
        .merge(visit_routes())
        .route_layer(from_fn_with_state(state.clone(), limit_general))
}

/// Review routes
fn review_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/reviews",
            post(reviews::create_review)
                .layer(from_fn_with_state(state.clone(), limit_review_submit)),
        )
        .route("/reviews/public", get(reviews::list_public_reviews))
        .route("/reviews/admin", get(reviews::list_reviews_for_moderation))
        .route(
            "/reviews/:id/like",
            patch(reviews::like_review).layer(from_fn_with_state(state.clone(), limit_like)),
        )
        .route("/reviews/:id/status", patch(reviews::update_review_status))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/login",
        post(auth::login).layer(from_fn_with_state(state.clone(), limit_login)),
    )
}

fn upload_routes(state: &AppState) -> Router<AppState> {
    let max_bytes = state.config().storage.max_file_size_bytes();

    Router::new().route(
        "/upload",
        post(upload::upload_image).layer(DefaultBodyLimit::max(max_bytes)),
    )
}

/// Visit tracking routes
fn visit_routes() -> Router<AppState> {
    Router::new()
        .route("/visits", post(visits::record_visit))
        .route("/visits/stats", get(visits::visit_stats))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use fl_common::{AppConfig, RateLimitRule};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::server::{create_app, create_app_state};

    async fn app_with(configure: impl FnOnce(&mut AppConfig)) -> (axum::Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.upload_dir = dir.path().to_string_lossy().into_owned();
        configure(&mut config);

        let (state, _worker) = create_app_state(config).await.unwrap();
        (create_app(state), dir)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_not_rate_limited() {
        let (app, _dir) = app_with(|_| {}).await;
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key("x-ratelimit-limit"));
    }

    #[tokio::test]
    async fn test_api_routes_carry_quota_headers() {
        let (app, _dir) = app_with(|_| {}).await;
        let response = app.oneshot(get("/api/products")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "300");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "299");
    }

    #[tokio::test]
    async fn test_general_limit_rejects_with_retry_after() {
        let (app, _dir) = app_with(|config| {
            config.rate_limit.general = RateLimitRule::new(2, 60);
        })
        .await;

        for _ in 0..2 {
            let response = app.clone().oneshot(get("/api/visits/stats")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(get("/api/visits/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key("retry-after"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _dir) = app_with(|_| {}).await;
        let response = app.oneshot(get("/api/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

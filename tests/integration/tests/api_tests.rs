//! API Integration Tests
//!
//! Each test spawns its own server with in-memory storage, so no external
//! services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use fl_common::RateLimitRule;
use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer, ADMIN_PASSWORD, ADMIN_USERNAME,
};
use reqwest::StatusCode;
use serde_json::json;

async fn submit_review(server: &TestServer, rating: u8) -> AdminReview {
    let response = server
        .post("/api/reviews", &CreateReviewRequest::unique(rating))
        .await
        .unwrap();
    let created: ReviewCreated = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.review
}

async fn approved_review(server: &TestServer, rating: u8) -> AdminReview {
    let review = submit_review(server, rating).await;
    let response = server
        .patch(
            &format!("/api/reviews/{}/status", review.id),
            &json!({ "status": "approved" }),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_root() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/").await.expect("Request failed");
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "FL Store API running");
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_external_services() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "disabled");
    assert_eq!(body["checks"]["redis"], "disabled");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_submit_review_starts_pending() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateReviewRequest::unique(5);

    let response = server.post("/api/reviews", &request).await.unwrap();
    let created: ReviewCreated = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(created.message.contains("Gracias"));
    assert_eq!(created.review.customer_name, request.customer_name);
    assert_eq!(created.review.rating, 5);
    assert_eq!(created.review.status, "pending");
    assert_eq!(created.review.like_count, 0);
    assert!(created.review.visitor_likes.is_empty());
}

#[tokio::test]
async fn test_submit_review_missing_fields() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/reviews", &json!({ "customerName": "Ana", "rating": 4 }))
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body.error.message.contains("productId"));
    assert!(body.error.message.contains("comment"));
}

#[tokio::test]
async fn test_submit_review_rating_out_of_range() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = CreateReviewRequest::unique(5);
    request.rating = 6;

    let response = server.post("/api/reviews", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_second_review_within_window_is_throttled() {
    let server = TestServer::start_with(|config| {
        config.rate_limit.review = RateLimitRule::new(1, 300);
    })
    .await
    .expect("Failed to start server");

    let first = server
        .post("/api/reviews", &CreateReviewRequest::unique(4))
        .await
        .unwrap();
    assert_status(first, StatusCode::CREATED).await.unwrap();

    let second = server
        .post("/api/reviews", &CreateReviewRequest::unique(4))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = second.headers()["retry-after"]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=300).contains(&retry_after));

    let body: ErrorEnvelope = second.json().await.unwrap();
    assert_eq!(body.error.code, "RATE_LIMIT_EXCEEDED");
    assert!(body.error.message.contains("minuto"));
}

#[tokio::test]
async fn test_admitted_request_reports_quota() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/reviews/public").await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-ratelimit-limit"], "300");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "299");
}

#[tokio::test]
async fn test_pending_reviews_are_not_public() {
    let server = TestServer::start().await.expect("Failed to start server");
    submit_review(&server, 5).await;

    let response = server.get("/api/reviews/public").await.unwrap();
    let public: PublicReviews = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(public.reviews.is_empty());
    assert_eq!(public.stats.total_reviews, 0);
    assert_eq!(public.stats.average_rating, 0.0);
}

#[tokio::test]
async fn test_public_listing_shows_best_and_worst() {
    let server = TestServer::start().await.expect("Failed to start server");
    for rating in [1, 2, 3, 4, 5] {
        approved_review(&server, rating).await;
    }

    let response = server.get("/api/reviews/public").await.unwrap();
    let public: PublicReviews = assert_json(response, StatusCode::OK).await.unwrap();

    let ratings: Vec<u8> = public.reviews.iter().map(|r| r.rating).collect();
    assert_eq!(ratings, vec![5, 4, 1, 2]);
    assert_eq!(public.stats.total_reviews, 5);
    assert!((public.stats.average_rating - 3.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_moderation_lists_every_review() {
    let server = TestServer::start().await.expect("Failed to start server");
    let pending = submit_review(&server, 3).await;
    let approved = approved_review(&server, 4).await;

    let response = server.get("/api/reviews/admin").await.unwrap();
    let reviews: Vec<AdminReview> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().any(|r| r.id == pending.id && r.status == "pending"));
    assert!(reviews.iter().any(|r| r.id == approved.id && r.status == "approved"));
}

#[tokio::test]
async fn test_status_update_validation() {
    let server = TestServer::start().await.expect("Failed to start server");
    let review = submit_review(&server, 4).await;

    let response = server
        .patch(
            &format!("/api/reviews/{}/status", review.id),
            &json!({ "status": "published" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .patch("/api/reviews/does-not-exist/status", &json!({ "status": "approved" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_like_requires_visitor_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let review = approved_review(&server, 4).await;

    let response = server
        .patch(&format!("/api/reviews/{}/like", review.id), &json!({ "liked": true }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_like_unknown_review() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .patch(
            "/api/reviews/does-not-exist/like",
            &json!({ "visitorId": "v-1", "liked": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_like_then_cooldown() {
    let server = TestServer::start().await.expect("Failed to start server");
    let review = approved_review(&server, 4).await;
    let path = format!("/api/reviews/{}/like", review.id);

    let response = server
        .patch(&path, &json!({ "visitorId": "v-1", "liked": true }))
        .await
        .unwrap();
    let liked: LikeResult = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.review_id, review.id);
    assert_eq!(liked.like_count, 1);
    assert!(liked.liked_by_visitor);

    // Same pair inside the cooldown
    let response = server
        .patch(&path, &json!({ "visitorId": "v-1", "liked": false }))
        .await
        .unwrap();
    assert_status(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();

    // Another visitor is unaffected
    let response = server
        .patch(&path, &json!({ "visitorId": "v-2", "liked": true }))
        .await
        .unwrap();
    let liked: LikeResult = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.like_count, 2);
}

#[tokio::test]
async fn test_like_is_idempotent_after_cooldown() {
    let server = TestServer::start_with(|config| {
        config.cooldown.like_cooldown_secs = 0;
    })
    .await
    .expect("Failed to start server");
    let review = approved_review(&server, 4).await;
    let path = format!("/api/reviews/{}/like", review.id);

    for _ in 0..2 {
        let response = server
            .patch(&path, &json!({ "visitorId": "v-1", "liked": true }))
            .await
            .unwrap();
        let liked: LikeResult = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(liked.like_count, 1);
    }

    let response = server
        .patch(&path, &json!({ "visitorId": "v-1", "liked": false }))
        .await
        .unwrap();
    let unliked: LikeResult = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unliked.like_count, 0);
    assert!(!unliked.liked_by_visitor);
}

#[tokio::test]
async fn test_review_lifecycle_end_to_end() {
    let server = TestServer::start().await.expect("Failed to start server");
    let review = submit_review(&server, 5).await;

    let approved = approved_review_by_id(&server, &review.id).await;
    assert_eq!(approved.status, "approved");

    let response = server
        .patch(
            &format!("/api/reviews/{}/like", review.id),
            &json!({ "visitorId": "v-9", "liked": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/api/reviews/public?visitorId=v-9").await.unwrap();
    let public: PublicReviews = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(public.reviews.len(), 1);
    assert_eq!(public.reviews[0].id, review.id);
    assert_eq!(public.reviews[0].like_count, 1);
    assert!(public.reviews[0].liked_by_visitor);
    assert_eq!(public.stats.total_likes, 1);

    // Another visitor sees the count but not their own like
    let response = server.get("/api/reviews/public?visitorId=v-10").await.unwrap();
    let public: PublicReviews = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!public.reviews[0].liked_by_visitor);
}

async fn approved_review_by_id(server: &TestServer, id: &str) -> AdminReview {
    let response = server
        .patch(&format!("/api/reviews/{id}/status"), &json!({ "status": "approved" }))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Product Tests
// ============================================================================

#[tokio::test]
async fn test_sample_products_are_seeded() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/products").await.unwrap();
    let products: Vec<Product> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(products.len(), 4);
}

#[tokio::test]
async fn test_product_crud() {
    let server = TestServer::start_with(|config| {
        config.bootstrap.seed_sample_products = false;
    })
    .await
    .expect("Failed to start server");

    let request = ProductRequest::unique();
    let response = server.post("/api/products", &request).await.unwrap();
    let created: Product = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.name, request.name);
    assert!(created.is_new);

    let response = server.get(&format!("/api/products/{}", created.id)).await.unwrap();
    let fetched: Product = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);

    let mut replacement = ProductRequest::unique();
    replacement.price = 45.0;
    replacement.category = "faldas".to_string();
    let response = server
        .put(&format!("/api/products/{}", created.id), &replacement)
        .await
        .unwrap();
    let updated: Product = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.category, "faldas");
    assert!((updated.price - 45.0).abs() < f64::EPSILON);

    let response = server
        .delete(&format!("/api/products/{}", created.id))
        .await
        .unwrap();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Producto eliminado");

    let response = server.get(&format!("/api/products/{}", created.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_product_unknown_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/products/not-a-product").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete("/api/products/not-a-product").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_product_requires_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = ProductRequest::unique();
    request.name = String::new();

    let response = server.post("/api/products", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = LoginRequest {
        username: ADMIN_USERNAME.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    };

    let response = server.post("/api/login", &request).await.unwrap();
    let result: LoginResult = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Login exitoso");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");

    for (username, password) in [(ADMIN_USERNAME, "wrong"), ("nobody", ADMIN_PASSWORD)] {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = server.post("/api/login", &request).await.unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }
}

#[tokio::test]
async fn test_login_is_throttled() {
    let server = TestServer::start_with(|config| {
        config.rate_limit.login = RateLimitRule::new(2, 900);
    })
    .await
    .expect("Failed to start server");
    let request = LoginRequest {
        username: ADMIN_USERNAME.to_string(),
        password: "wrong".to_string(),
    };

    for _ in 0..2 {
        let response = server.post("/api/login", &request).await.unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }

    let response = server.post("/api/login", &request).await.unwrap();
    assert_status(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_upload_image_is_served_back() {
    let server = TestServer::start().await.expect("Failed to start server");
    let bytes = b"\x89PNG\r\n\x1a\nfake".to_vec();
    let part = reqwest::multipart::Part::bytes(bytes.clone())
        .file_name("foto.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("image", part);

    let response = server.upload(form).await.unwrap();
    let uploaded: UploadResult = assert_json(response, StatusCode::OK).await.unwrap();

    let prefix = format!("{}/uploads/", server.base_url());
    assert!(uploaded.url.starts_with(&prefix));
    assert!(uploaded.url.ends_with(".png"));

    let served = server.client.get(&uploaded.url).send().await.unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await.unwrap().to_vec(), bytes);
}

#[tokio::test]
async fn test_upload_rejects_non_images() {
    let server = TestServer::start().await.expect("Failed to start server");
    let part = reqwest::multipart::Part::bytes(b"hola".to_vec())
        .file_name("nota.txt")
        .mime_str("text/plain")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("image", part);

    let response = server.upload(form).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "El archivo debe ser una imagen");
}

#[tokio::test]
async fn test_upload_requires_image_field() {
    let server = TestServer::start().await.expect("Failed to start server");
    let form = reqwest::multipart::Form::new().text("caption", "sin imagen");

    let response = server.upload(form).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "No se recibió ninguna imagen");
}

// ============================================================================
// Visit Tests
// ============================================================================

#[tokio::test]
async fn test_visits_count_unique_visitors_per_day() {
    let server = TestServer::start().await.expect("Failed to start server");

    for visitor in ["v-1", "v-1", "v-2"] {
        let response = server
            .post("/api/visits", &json!({ "visitorId": visitor }))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server.get("/api/visits/stats").await.unwrap();
    let stats: VisitStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total_visits, 2);
    assert_eq!(stats.today_visitors, 2);
}

#[tokio::test]
async fn test_visit_requires_visitor_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/visits", &json!({ "visitorId": "  " }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

//! Shared fixtures for service tests

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use crate::dto::CreateReviewRequest;

use super::context::ServiceContext;
use super::upload::LocalBlobStore;

/// In-memory context plus the upload directory it writes to
pub(crate) struct TestContext {
    pub ctx: ServiceContext,
    pub upload_dir: TempDir,
}

pub(crate) fn test_context() -> TestContext {
    test_context_with_cooldown(Duration::from_secs(15))
}

pub(crate) fn test_context_with_cooldown(cooldown: Duration) -> TestContext {
    let upload_dir = tempfile::tempdir().expect("create upload dir");
    let ctx = ServiceContext::builder()
        .in_memory()
        .blob_store(Arc::new(LocalBlobStore::new(
            upload_dir.path(),
            "http://localhost:3000",
        )))
        .like_cooldown(cooldown)
        .build()
        .expect("build test context");

    TestContext { ctx, upload_dir }
}

pub(crate) fn review_request(rating: u8, recommend: bool) -> CreateReviewRequest {
    serde_json::from_value(json!({
        "customerName": "Ana",
        "productId": "p-1",
        "productName": "Lámpara",
        "category": "Hogar",
        "rating": rating,
        "comment": "Muy buena",
        "recommend": recommend
    }))
    .expect("valid review request")
}

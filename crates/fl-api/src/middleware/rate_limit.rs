//! Per-route-class rate limiting
//!
//! Every `/api` request passes the general class; login, review submission
//! and likes additionally pass their own class. Admitted responses carry the
//! quota of the most specific class that ran.

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use fl_service::{Admission, RouteClass};

use super::{RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER, RATE_LIMIT_RESET_HEADER};
use crate::extractors::ClientIdentity;
use crate::response::ApiError;
use crate::state::AppState;

async fn enforce(
    state: &AppState,
    client: &ClientIdentity,
    class: RouteClass,
    request: Request,
    next: Next,
) -> Response {
    let admission = match state
        .service_context()
        .rate_limiter()
        .admit(client.as_str(), class)
        .await
    {
        Ok(admission) => admission,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let mut response = next.run(request).await;
    set_quota_headers(&mut response, admission);
    response
}

/// Inner layers run first on the way out, so existing headers are kept
fn set_quota_headers(response: &mut Response, admission: Admission) {
    let reset_secs = admission.reset_after.as_secs()
        + u64::from(admission.reset_after.subsec_nanos() > 0);
    let headers = response.headers_mut();
    headers
        .entry(RATE_LIMIT_LIMIT_HEADER)
        .or_insert(HeaderValue::from(admission.limit));
    headers
        .entry(RATE_LIMIT_REMAINING_HEADER)
        .or_insert(HeaderValue::from(admission.remaining));
    headers
        .entry(RATE_LIMIT_RESET_HEADER)
        .or_insert(HeaderValue::from(reset_secs));
}

pub async fn limit_general(
    State(state): State<AppState>,
    client: ClientIdentity,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, &client, RouteClass::General, request, next).await
}

pub async fn limit_login(
    State(state): State<AppState>,
    client: ClientIdentity,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, &client, RouteClass::Login, request, next).await
}

pub async fn limit_review_submit(
    State(state): State<AppState>,
    client: ClientIdentity,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, &client, RouteClass::ReviewSubmit, request, next).await
}

pub async fn limit_like(
    State(state): State<AppState>,
    client: ClientIdentity,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, &client, RouteClass::Like, request, next).await
}

//! Site visit handlers

use axum::{extract::State, Json};
use axum_extra::{headers::UserAgent, TypedHeader};
use fl_service::dto::{VisitRequest, VisitResponse, VisitStatsResponse};
use fl_service::VisitService;

use crate::extractors::{ClientIdentity, JsonBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// Record a visit
///
/// POST /api/visits
pub async fn record_visit(
    State(state): State<AppState>,
    client: ClientIdentity,
    user_agent: Option<TypedHeader<UserAgent>>,
    JsonBody(request): JsonBody<VisitRequest>,
) -> ApiResult<Json<VisitResponse>> {
    let user_agent = user_agent
        .as_ref()
        .map_or("", |TypedHeader(ua)| ua.as_str());

    let service = VisitService::new(state.service_context());
    let response = service.record(request, client.as_str(), user_agent).await?;
    Ok(Json(response))
}

/// GET /api/visits/stats
pub async fn visit_stats(State(state): State<AppState>) -> ApiResult<Json<VisitStatsResponse>> {
    let service = VisitService::new(state.service_context());
    Ok(Json(service.stats().await?))
}

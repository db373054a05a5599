//! Site visit counting

use chrono::Utc;
use tracing::{debug, instrument};

use fl_core::entities::{SiteVisit, TOTAL_VISITS_METRIC};
use fl_core::DomainError;

use crate::dto::{VisitRequest, VisitResponse, VisitStatsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Visit service
pub struct VisitService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VisitService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a visit. Only the first visit of a visitor each day is counted.
    #[instrument(skip(self, request, user_agent))]
    pub async fn record(
        &self,
        request: VisitRequest,
        ip_address: &str,
        user_agent: &str,
    ) -> ServiceResult<VisitResponse> {
        let visitor_id = request
            .visitor_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(DomainError::MissingVisitorId)?;

        let visit = SiteVisit::new(
            visitor_id.to_string(),
            ip_address.to_string(),
            user_agent.to_string(),
            Utc::now(),
        );
        let repo = self.ctx.visit_repo();
        let counted = repo.record_visit(&visit).await?;
        let total_visits = if counted {
            repo.increment_metric(TOTAL_VISITS_METRIC).await?
        } else {
            repo.metric(TOTAL_VISITS_METRIC).await?
        };

        debug!(visitor_id = %visitor_id, counted, total_visits, "Visit recorded");
        Ok(VisitResponse {
            counted,
            total_visits,
        })
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<VisitStatsResponse> {
        let repo = self.ctx.visit_repo();
        Ok(VisitStatsResponse {
            total_visits: repo.metric(TOTAL_VISITS_METRIC).await?,
            today_visitors: repo.count_visitors(&SiteVisit::day_key(Utc::now())).await?,
        })
    }
}

//! Per-client request throttling
//!
//! Each route class has its own fixed window and ceiling. Counting lives in a
//! [`RateLimitStore`], so one instance can keep windows in memory while
//! several instances share them through Redis.

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use fl_common::{RateLimitConfig, RateLimitRule};
use fl_core::traits::RateLimitStore;

use super::error::{ServiceError, ServiceResult};

/// Group of routes sharing one request ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// Every `/api` request
    General,
    /// Admin login attempts
    Login,
    /// Review submissions
    ReviewSubmit,
    /// Review like toggles
    Like,
}

impl RouteClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Login => "login",
            Self::ReviewSubmit => "review",
            Self::Like => "like",
        }
    }

    /// The configured rule for this class
    pub fn rule(self, config: &RateLimitConfig) -> RateLimitRule {
        match self {
            Self::General => config.general,
            Self::Login => config.login,
            Self::ReviewSubmit => config.review,
            Self::Like => config.like,
        }
    }

    /// Localized message for a rejected client
    pub fn rejection_message(self, wait: Duration) -> String {
        let wait = describe_wait(wait);
        match self {
            Self::General => {
                format!("Demasiadas solicitudes desde esta IP. Intenta de nuevo en {wait}.")
            }
            Self::Login => {
                format!("Demasiados intentos de inicio de sesión. Intenta de nuevo en {wait}.")
            }
            Self::ReviewSubmit => {
                format!("Solo puedes enviar una reseña cada cierto tiempo. Intenta de nuevo en {wait}.")
            }
            Self::Like => format!("Demasiados me gusta en poco tiempo. Intenta de nuevo en {wait}."),
        }
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable wait, rounded up to whole seconds or minutes
pub(crate) fn describe_wait(wait: Duration) -> String {
    let secs = retry_after_secs(wait);
    if secs < 60 {
        if secs == 1 {
            "1 segundo".to_string()
        } else {
            format!("{secs} segundos")
        }
    } else {
        let minutes = secs.div_ceil(60);
        if minutes == 1 {
            "1 minuto".to_string()
        } else {
            format!("{minutes} minutos")
        }
    }
}

/// Whole seconds to advertise in `Retry-After`, never zero
pub(crate) fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

/// Quota left for an admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Fixed-window limiter keyed by `(route class, client)`
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count one request from `client` against `class`.
    ///
    /// A store failure admits the request: throttling is not worth an outage.
    pub async fn admit(&self, client: &str, class: RouteClass) -> ServiceResult<Admission> {
        let rule = class.rule(&self.config);
        let now = Utc::now();
        let key = format!("{class}:{client}");

        let state = match self.store.hit(&key, rule.window(), now).await {
            Ok(state) => state,
            Err(e) => {
                error!(error = %e, route_class = %class, "Rate limit store failed, admitting request");
                return Ok(Admission {
                    limit: rule.max_requests,
                    remaining: rule.max_requests,
                    reset_after: rule.window(),
                });
            }
        };

        let reset_after = state.reset_after(now);
        if state.count > rule.max_requests {
            warn!(
                client = %client,
                route_class = %class,
                count = state.count,
                limit = rule.max_requests,
                "Rate limit exceeded"
            );
            return Err(ServiceError::rate_limited(
                class.rejection_message(reset_after),
                retry_after_secs(reset_after),
            ));
        }

        debug!(client = %client, route_class = %class, count = state.count, "Request admitted");
        Ok(Admission {
            limit: rule.max_requests,
            remaining: rule.max_requests - state.count,
            reset_after,
        })
    }

    /// Evict finished windows
    pub async fn sweep(&self) -> ServiceResult<usize> {
        Ok(self.store.sweep(Utc::now()).await?)
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish()
    }
}

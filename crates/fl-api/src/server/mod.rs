//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use fl_cache::{RedisCooldownStore, RedisPool, RedisRateLimitStore};
use fl_common::{AppConfig, AppError};
use fl_db::{
    create_pool, run_schema, PgProductRepository, PgReviewRepository, PgUserRepository,
    PgVisitRepository,
};
use fl_service::services::NOTIFICATION_QUEUE_CAPACITY;
use fl_service::{
    seed, LocalBlobStore, NotificationWorker, ReviewNotifier, ServiceContext,
    ServiceContextBuilder,
};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// How long queued moderation alerts may take to drain after shutdown
const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router(&state);
    let router = apply_middleware(router, &state.config().cors, state.config().app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState.
///
/// Returns the notification worker unspawned so the caller owns its task.
pub async fn create_app_state(
    config: AppConfig,
) -> Result<(AppState, NotificationWorker), AppError> {
    let mut builder = ServiceContextBuilder::new();

    match &config.database {
        Some(db_config) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_schema(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            builder = builder
                .review_repo(Arc::new(PgReviewRepository::new(pool.clone())))
                .product_repo(Arc::new(PgProductRepository::new(pool.clone())))
                .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
                .visit_repo(Arc::new(PgVisitRepository::new(pool.clone())))
                .pool(pool);
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage. Data is lost on restart.");
            builder = builder.in_memory();
        }
    }

    if let Some(redis_config) = &config.redis {
        info!("Connecting to Redis...");
        let redis_pool =
            RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
        builder = builder
            .rate_limit_store(Arc::new(RedisRateLimitStore::new(redis_pool.clone())))
            .cooldown_store(Arc::new(RedisCooldownStore::new(redis_pool.clone())))
            .redis_pool(redis_pool);
        info!("Redis-backed rate limiting enabled");
    }

    tokio::fs::create_dir_all(&config.storage.upload_dir)
        .await
        .map_err(|e| {
            AppError::Config(format!(
                "Failed to create upload directory {}: {e}",
                config.storage.upload_dir
            ))
        })?;
    let blob_store = LocalBlobStore::new(
        &config.storage.upload_dir,
        &config.storage.public_base_url,
    );

    let (notifier, receiver) = ReviewNotifier::channel(NOTIFICATION_QUEUE_CAPACITY);
    let worker = NotificationWorker::from_config(receiver, &config.mail);

    let service_context = builder
        .blob_store(Arc::new(blob_store))
        .notifier(notifier)
        .rate_limit(config.rate_limit.clone())
        .like_cooldown(config.cooldown.like_cooldown())
        .build()?;

    seed(&service_context, &config.bootstrap).await?;

    Ok((AppState::new(service_context, config), worker))
}

/// Periodically drop expired rate-limit windows and like cooldowns
pub fn spawn_sweeper(ctx: ServiceContext, every: Duration) -> JoinHandle<()> {
    let every = every.max(Duration::from_secs(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match ctx.rate_limiter().sweep().await {
                Ok(0) => {}
                Ok(removed) => debug!(removed, "Swept expired rate-limit windows"),
                Err(e) => warn!(error = %e, "Rate-limit sweep failed"),
            }
            match ctx.like_cooldown().sweep().await {
                Ok(0) => {}
                Ok(removed) => debug!(removed, "Swept expired like cooldowns"),
                Err(e) => warn!(error = %e, "Like cooldown sweep failed"),
            }
        }
    })
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listen address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let sweep_interval = config.cooldown.sweep_interval();

    let (state, worker) = create_app_state(config).await?;
    let notifications = worker.spawn();
    let sweeper = spawn_sweeper(state.service_context().clone(), sweep_interval);

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    run_server(create_app(state), listener).await?;

    sweeper.abort();
    let _ = sweeper.await;

    // Every notifier handle is gone now, so the worker drains and exits
    match tokio::time::timeout(NOTIFICATION_DRAIN_TIMEOUT, notifications).await {
        Ok(Ok(())) => info!("Notification queue drained"),
        Ok(Err(e)) => error!(error = %e, "Notification worker panicked"),
        Err(_) => warn!("Timed out waiting for pending notifications"),
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

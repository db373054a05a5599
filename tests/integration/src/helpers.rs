//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use fl_api::{create_app, create_app_state};
use fl_common::{AppConfig, RateLimitRule};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Admin credentials seeded into every test server
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret-admin";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _upload_dir: TempDir,
    _handle: JoinHandle<()>,
    _notifications: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the default test configuration
    pub async fn start() -> Result<Self> {
        Self::start_with(|_| {}).await
    }

    /// Start a test server after adjusting the default test configuration
    pub async fn start_with(configure: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let upload_dir = tempfile::tempdir()?;

        // Bind first so returned upload URLs point at this server
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let mut config = test_config(&upload_dir, addr);
        configure(&mut config);

        let (state, worker) = create_app_state(config).await?;
        let notifications = worker.spawn();
        let app = create_app(state);

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _upload_dir: upload_dir,
            _handle: handle,
            _notifications: notifications,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).json(body).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Upload a multipart form
    pub async fn upload(&self, form: reqwest::multipart::Form) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?)
    }
}

/// In-memory configuration with a seeded admin and a roomy review limit.
///
/// Tests that exercise the review limit itself restore the production rule.
pub fn test_config(upload_dir: &TempDir, addr: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.upload_dir = upload_dir.path().to_string_lossy().into_owned();
    config.storage.public_base_url = format!("http://{addr}");
    config.bootstrap.admin_username = ADMIN_USERNAME.to_string();
    config.bootstrap.admin_password = Some(ADMIN_PASSWORD.to_string());
    config.rate_limit.review = RateLimitRule::new(100, 300);
    config
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

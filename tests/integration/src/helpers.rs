//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use vidshare_api::{create_app, create_app_state};
use vidshare_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, JwtConfig, PersistenceBackend,
    PersistenceConfig, RateLimitConfig, ServerConfig, SnowflakeConfig, StorageBackend,
    StorageConfig,
};

/// Running server plus the directory its uploads land in
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub upload_dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let upload_dir = tempfile::tempdir()?;
        let config = test_config(&upload_dir);
        Self::start_with_config(config, upload_dir).await
    }

    pub async fn start_with_config(config: AppConfig, upload_dir: TempDir) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            vidshare_api::server::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            upload_dir,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.get(self.url(path)), token).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// POST a JSON content type with a body that is sent verbatim
    pub async fn post_raw_json(&self, path: &str, token: &str, body: &str) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await?)
    }

    /// PATCH without a body
    pub async fn patch_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.patch(self.url(path)), token)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.delete(self.url(path)), token)
            .send()
            .await?)
    }

    pub async fn post_multipart(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn put_multipart(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(Self::authed(self.client.put(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Number of files currently stored below the upload directory
    pub fn stored_files(&self) -> usize {
        count_files(self.upload_dir.path())
    }
}

/// Files below `dir`, recursing into subdirectories
pub fn count_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() {
                        count_files(&path)
                    } else {
                        1
                    }
                })
                .sum()
        })
        .unwrap_or(0)
}

/// Memory persistence, local media below `upload_dir`, generous rate limit
pub fn test_config(upload_dir: &TempDir) -> AppConfig {
    AppConfig {
        app: AppSettings::default(),
        api: ServerConfig::default(),
        persistence: PersistenceConfig {
            backend: PersistenceBackend::Memory,
            run_migrations: false,
        },
        database: DatabaseConfig::default(),
        jwt: JwtConfig {
            secret: "integration-test-secret-key".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 3600,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig::default(),
        storage: StorageConfig {
            backend: StorageBackend::Local,
            upload_dir: upload_dir.path().to_string_lossy().into_owned(),
            public_base_url: "/media".to_string(),
            max_file_size_mb: 1,
        },
        snowflake: SnowflakeConfig::default(),
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

#![allow(dead_code)]

use bfhl_service::config::{BfhlConfig, GeminiSettings};
use bfhl_service::services::providers::mock::MockTextProvider;
use bfhl_service::services::providers::TextProvider;
use bfhl_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

pub const TEST_EMAIL: &str = "test.user@example.edu";

pub fn test_config(official_email: Option<&str>) -> BfhlConfig {
    BfhlConfig {
        common: CoreConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0, // Random port for testing
        },
        official_email: official_email.map(str::to_string),
        gemini: GeminiSettings::default(),
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the app with a mock provider that answers "Paris".
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Arc::new(MockTextProvider::replying("Paris"))).await
    }

    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        let app = Application::build_with_provider(test_config(Some(TEST_EMAIL)), provider)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    /// Spawn the app exactly as production does: Gemini provider, no API key.
    pub async fn spawn_without_ai_key(official_email: Option<&str>) -> Self {
        let app = Application::build(test_config(official_email))
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    async fn start(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_bfhl(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/bfhl", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

#![allow(
    clippy::missing_errors_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use std::time::Duration;

use anyhow::Context;
use rstest::fixture;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use stratus_compute::{ComputeClient, ComputeResponsesClient};
use stratus_core::ApiClient;

mod mock_api;
pub use self::mock_api::MockState;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// A mock compute API listening on a random local port, with clients bound to it.
#[derive(Debug)]
pub struct TestApp {
    pub base: String,
    pub api_client: ApiClient,
    pub compute: ComputeResponsesClient,
    pub raw: ComputeClient,
    server: JoinHandle<()>,
}

impl TestApp {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("binding mock api")?;
        let addr = listener.local_addr()?;
        let router = mock_api::router(MockState::default());
        let server = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router).await {
                error!(%error, "mock api stopped");
            }
        });
        info!(%addr, "mock api started");

        // no trailing slash on purpose, the client adds it
        let base = format!("http://{addr}/api");
        let api_client = ApiClient::builder()
            .with_server(&base)
            .with_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            base,
            compute: ComputeResponsesClient::new(api_client.clone()),
            raw: ComputeClient::new(api_client.clone()),
            api_client,
            server,
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

#[fixture]
pub async fn app() -> TestApp {
    init_tracing();
    match TestApp::start().await {
        Ok(app) => app,
        Err(error) => {
            panic!("fail to start test app: {error:?}");
        }
    }
}

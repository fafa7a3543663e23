use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, Request, Response};

use crate::error::ApiClientError;

/// A boxed, sendable future, as returned by [`Transport::execute`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Default request timeout of the [`ReqwestTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends a fully built request and returns the raw response.
///
/// The binding never inspects how the request travels: tests plug a recording
/// transport, applications can add proxies or tracing middleware. Errors are
/// surfaced unchanged to the caller.
///
/// # Example
///
/// ```rust
/// use stratus_core::{ApiClientError, BoxFuture, Transport};
///
/// #[derive(Debug)]
/// struct Offline;
///
/// impl Transport for Offline {
///     fn execute(
///         &self,
///         _request: reqwest::Request,
///     ) -> BoxFuture<'_, Result<reqwest::Response, ApiClientError>> {
///         Box::pin(async {
///             Err(ApiClientError::Transport {
///                 message: "offline".to_string(),
///             })
///         })
///     }
/// }
/// ```
pub trait Transport: Debug + Send + Sync {
    /// Sends the request.
    fn execute(&self, request: Request) -> BoxFuture<'_, Result<Response, ApiClientError>>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wraps an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the given timeout and the `stratus/<version>` user agent.
    ///
    /// HTTPS needs one of the `rustls` (default) or `native-tls` crate features.
    ///
    /// # Errors
    ///
    /// Fails when the TLS backend or the system configuration cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stratus/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client))
    }

    /// The underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: Request) -> BoxFuture<'_, Result<Response, ApiClientError>> {
        Box::pin(async move {
            let response = self.client.execute(request).await?;
            Ok(response)
        })
    }
}

use std::sync::Arc;
use std::time::Duration;

use reqwest::Request;
use tracing::debug;
use url::Url;

use crate::auth::Authentication;
use crate::client::ApiClient;
use crate::editor::{CallContext, EditorChain, RequestEditor};
use crate::error::ApiClientError;
use crate::transport::{DEFAULT_TIMEOUT, ReqwestTransport, Transport};

const DEFAULT_SERVER: &str = "http://127.0.0.1/";

/// Builder for [`ApiClient`].
///
/// Options are applied in call order; later calls win.
///
/// # Default Configuration
///
/// - **Server**: `http://127.0.0.1/`
/// - **Transport**: [`ReqwestTransport`] with a 30 s timeout
/// - **Editors**: none
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use stratus_core::{ApiClient, Authentication};
///
/// # fn example() -> Result<(), stratus_core::ApiClientError> {
/// let client = ApiClient::builder()
///     .with_server("https://api.example.com/compute")
///     .with_timeout(Duration::from_secs(10))
///     .with_authentication(Authentication::Bearer("token".into()))
///     .build()?;
///
/// assert_eq!(client.server().as_str(), "https://api.example.com/compute/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    server: String,
    transport: Option<Arc<dyn Transport>>,
    timeout: Duration,
    editors: EditorChain,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            transport: None,
            timeout: DEFAULT_TIMEOUT,
            editors: EditorChain::default(),
        }
    }
}

impl ApiClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Fails when the server URL is invalid or cannot be a base URL, or when the
    /// default transport cannot be created.
    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let Self {
            server,
            transport,
            timeout,
            editors,
        } = self;

        let server = normalize_server(&server)?;
        let transport = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_timeout(timeout)?),
        };
        debug!(%server, editors = editors.len(), "client built");

        Ok(ApiClient {
            server,
            transport,
            editors,
        })
    }

    /// Sets the server URL; a missing trailing slash is added.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Uses a custom transport.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Uses an already configured `reqwest` client.
    pub fn with_reqwest_client(self, client: reqwest::Client) -> Self {
        self.with_transport(ReqwestTransport::new(client))
    }

    /// Sets the timeout of the default transport.
    ///
    /// It has no effect when a transport or a `reqwest` client is supplied.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends an editor, run on every request after the ones already registered.
    pub fn with_request_editor(mut self, editor: impl RequestEditor + 'static) -> Self {
        self.editors.push(Arc::new(editor));
        self
    }

    /// Appends a closure editor.
    pub fn with_request_editor_fn<F>(self, editor: F) -> Self
    where
        F: Fn(&CallContext, &mut Request) -> Result<(), ApiClientError> + Send + Sync + 'static,
    {
        self.with_request_editor(editor)
    }

    /// Adds credentials to every request.
    pub fn with_authentication(self, authentication: Authentication) -> Self {
        self.with_request_editor(authentication)
    }
}

/// Parses a server URL and guarantees it ends with exactly one `/`.
///
/// Operation paths are resolved relative to the result, so the server path
/// prefix is kept. The function is idempotent.
///
/// ```rust
/// use stratus_core::normalize_server;
///
/// # fn example() -> Result<(), stratus_core::ApiClientError> {
/// let server = normalize_server("https://api.example.com/compute")?;
/// assert_eq!(server.as_str(), "https://api.example.com/compute/");
/// assert_eq!(normalize_server(server.as_str())?, server);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails when the URL cannot be parsed or cannot be a base (e.g. `mailto:`).
pub fn normalize_server(server: &str) -> Result<Url, ApiClientError> {
    let mut url = Url::parse(server)?;
    if url.cannot_be_a_base() {
        return Err(ApiClientError::InvalidBaseUrl {
            url: server.to_string(),
            error: "cannot be a base URL".to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

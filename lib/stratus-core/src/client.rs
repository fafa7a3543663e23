use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request, Response};
use tracing::debug;
use url::Url;

use crate::args::OperationParams;
use crate::body::CallBody;
use crate::builder::ApiClientBuilder;
use crate::descriptor::OperationDescriptor;
use crate::editor::{CallContext, EditorChain, RequestEditor};
use crate::error::ApiClientError;
use crate::request::build_request;
use crate::response::{ResponseEnvelope, decode_response};
use crate::transport::Transport;

/// Sends operations described by [`OperationDescriptor`]s to one server.
///
/// The client is immutable once built: it can be cloned cheaply and shared
/// between tasks. Each call builds a fresh request.
///
/// # Example
///
/// ```rust,no_run
/// use stratus_core::{ApiClient, CallArgs, CallOptions};
/// # use stratus_core::OperationDescriptor;
/// # async fn example(list_servers: &OperationDescriptor<()>) -> Result<(), stratus_core::ApiClientError> {
/// let client = ApiClient::builder()
///     .with_server("https://compute.example.com/api")
///     .build()?;
///
/// let mut args = CallArgs::new();
/// args.query("page", &2)?.header("x-request-id", "abc-123")?;
///
/// let response = client
///     .execute(list_servers, &args, None, &CallOptions::default())
///     .await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) server: Url,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) editors: EditorChain,
}

impl ApiClient {
    /// Creates a builder with the default configuration.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// The server URL, always ending with `/`.
    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Builds the request of an operation without sending it.
    ///
    /// # Errors
    ///
    /// Fails when the parameters or the body do not fit the operation.
    pub fn build_request<R, P>(
        &self,
        descriptor: &OperationDescriptor<R>,
        params: &P,
        body: Option<CallBody>,
    ) -> Result<Request, ApiClientError>
    where
        P: OperationParams + ?Sized,
    {
        let args = params.to_args()?;
        build_request(&self.server, descriptor, &args, body)
    }

    /// Builds, edits and sends the request of an operation.
    ///
    /// Client editors run first, then the call editors, in registration order.
    /// The first editor failure is returned as is and nothing is sent.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built, when an editor rejects it, or
    /// when the transport fails.
    pub async fn execute<R, P>(
        &self,
        descriptor: &OperationDescriptor<R>,
        params: &P,
        body: Option<CallBody>,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError>
    where
        P: OperationParams + ?Sized,
    {
        let mut request = self.build_request(descriptor, params, body)?;
        if let Some(timeout) = options.timeout {
            *request.timeout_mut() = Some(timeout);
        }

        let context = CallContext {
            operation_id: descriptor.id,
            timeout: options.timeout,
        };
        self.editors.apply(&context, &mut request)?;
        options.editors.apply(&context, &mut request)?;

        debug!(?request, "sending...");
        let response = self.transport.execute(request).await?;
        debug!(?response, "...receiving");

        Ok(response)
    }
}

/// Per-call settings.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    timeout: Option<Duration>,
    editors: EditorChain,
}

impl CallOptions {
    /// Creates options with no deadline and no extra editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a deadline for the whole call, response body included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Appends an editor, run after the client's editors.
    pub fn with_editor(mut self, editor: impl RequestEditor + 'static) -> Self {
        self.editors.push(Arc::new(editor));
        self
    }

    /// Appends a closure editor, run after the client's editors.
    pub fn with_editor_fn<F>(self, editor: F) -> Self
    where
        F: Fn(&CallContext, &mut Request) -> Result<(), ApiClientError> + Send + Sync + 'static,
    {
        self.with_editor(editor)
    }

    /// The call deadline.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Executes operations and decodes their responses.
///
/// # Example
///
/// ```rust,no_run
/// use stratus_core::{ApiClient, CallArgs, CallOptions, ResponsesClient};
/// # use stratus_core::OperationDescriptor;
/// # #[derive(Debug)] enum GetServerResponse { Ok(serde_json::Value) }
/// # async fn example(get_server: &OperationDescriptor<GetServerResponse>) -> Result<(), stratus_core::ApiClientError> {
/// let client = ResponsesClient::new(ApiClient::builder().build()?);
///
/// let mut args = CallArgs::new();
/// args.path("serverId", &42)?.header("x-request-id", "abc-123")?;
///
/// let envelope = client
///     .call(get_server, &args, None, &CallOptions::default())
///     .await?;
/// match envelope.payload() {
///     Some(GetServerResponse::Ok(server)) => println!("{server}"),
///     None => println!("{}: {:?}", envelope.status(), envelope.body()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResponsesClient {
    client: ApiClient,
}

impl ResponsesClient {
    /// Wraps a client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The wrapped client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Executes an operation and decodes its response.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::execute`], or when a declared payload fails to decode.
    pub async fn call<R, P>(
        &self,
        descriptor: &OperationDescriptor<R>,
        params: &P,
        body: Option<CallBody>,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<R>, ApiClientError>
    where
        P: OperationParams + ?Sized,
    {
        let response = self
            .client
            .execute(descriptor, params, body, options)
            .await?;
        decode_response(descriptor, response).await
    }
}

impl From<ApiClient> for ResponsesClient {
    fn from(client: ApiClient) -> Self {
        Self::new(client)
    }
}

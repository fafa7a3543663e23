//! # Stratus Core
//!
//! Table-driven request building and response decoding for typed REST bindings.
//!
//! Each remote operation is declared once as a static [`OperationDescriptor`]:
//! its method, path template, parameters (with their OpenAPI styles), accepted
//! body and the `(status, content type) -> payload` mappings of its responses.
//! The engine turns typed parameters into a `reqwest` request, runs the
//! [`RequestEditor`] chain, sends it through a [`Transport`] and decodes the
//! answer into a [`ResponseEnvelope`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use http::Method;
//! use serde::Deserialize;
//! use stratus_core::{
//!     ApiClient, Authentication, BodyEncoding, CallArgs, CallOptions, MediaMatch,
//!     OperationDescriptor, ParamSpec, ResponseCase, ResponsesClient, from_json,
//! };
//!
//! #[derive(Debug, Deserialize)]
//! struct Server {
//!     id: i64,
//!     name: String,
//! }
//!
//! #[derive(Debug)]
//! enum GetServerResponse {
//!     Ok(Server),
//!     NotFound(serde_json::Value),
//! }
//!
//! static GET_SERVER: OperationDescriptor<GetServerResponse> = OperationDescriptor {
//!     id: "getServer",
//!     method: Method::GET,
//!     path: "/v1/servers/{serverId}",
//!     path_params: &[ParamSpec::path("serverId")],
//!     query_params: &[],
//!     header_params: &[ParamSpec::header("x-request-id")],
//!     body: BodyEncoding::None,
//!     responses: &[
//!         ResponseCase { status: 200, media: MediaMatch::Json, decode: |body| from_json(body).map(GetServerResponse::Ok) },
//!         ResponseCase { status: 404, media: MediaMatch::Json, decode: |body| from_json(body).map(GetServerResponse::NotFound) },
//!     ],
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ResponsesClient::new(
//!     ApiClient::builder()
//!         .with_server("https://compute.example.com/api")
//!         .with_authentication(Authentication::Bearer("token".into()))
//!         .build()?,
//! );
//!
//! let mut args = CallArgs::new();
//! args.path("serverId", &42)?.header("x-request-id", "abc-123")?;
//!
//! let envelope = client
//!     .call(&GET_SERVER, &args, None, &CallOptions::default())
//!     .await?;
//! match envelope.payload() {
//!     Some(GetServerResponse::Ok(server)) => println!("{} is {}", server.id, server.name),
//!     Some(GetServerResponse::NotFound(problem)) => println!("not found: {problem}"),
//!     None => println!("unexpected {}", envelope.status()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Parameters
//!
//! Values are styled with [`style_param`] according to their [`ParamSpec`]:
//! path values are percent-encoded, query values are form-encoded and lists
//! are repeated with the default `form`/explode style.
//!
//! ## Responses
//!
//! An undeclared status, or a body that is not JSON, is not an error: the
//! [`ResponseEnvelope`] has no payload but keeps the raw body, status and headers.
//!
//! ## Features
//!
//! - `rustls` (default): HTTPS for the default [`ReqwestTransport`] through rustls.
//! - `native-tls`: HTTPS through the platform TLS library.
//!
//! Without either, the default transport only speaks plain HTTP.

mod args;
mod auth;
mod body;
mod builder;
mod client;
mod descriptor;
mod editor;
mod error;
mod param;
mod path;
mod request;
mod response;
mod transport;

pub use self::args::{CallArgs, OperationParams};
pub use self::auth::{Authentication, AuthenticationError, SecureString};
pub use self::body::CallBody;
pub use self::builder::{ApiClientBuilder, normalize_server};
pub use self::client::{ApiClient, CallOptions, ResponsesClient};
pub use self::descriptor::{
    BodyEncoding, DecodeError, MediaMatch, OperationDescriptor, ParamSpec, ResponseCase,
    from_json,
};
pub use self::editor::{CallContext, RequestEditor};
pub use self::error::ApiClientError;
pub use self::param::{ParamLocation, ParamStyle, style_param};
pub use self::request::build_request;
pub use self::response::{ResponseEnvelope, decode_envelope, decode_response};
pub use self::transport::{BoxFuture, DEFAULT_TIMEOUT, ReqwestTransport, Transport};


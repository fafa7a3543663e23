//! Static metadata describing one remote operation.
//!
//! An [`OperationDescriptor`] is plain tagged data: the request builder and the
//! response decoder are driven entirely by it, so a binding declares each
//! endpoint once as a `static` table entry instead of writing code per endpoint.

use std::fmt;

use http::Method;
use serde::de::DeserializeOwned;

use crate::param::ParamStyle;

/// Error produced when a declared payload fails to deserialize, with the JSON path.
pub type DecodeError = serde_path_to_error::Error<serde_json::Error>;

/// Deserializes a JSON body, keeping track of the path of a failure.
///
/// This is the building block of [`ResponseCase::decode`] functions:
///
/// ```rust
/// use stratus_core::{MediaMatch, ResponseCase, from_json};
///
/// #[derive(Debug, serde::Deserialize)]
/// struct Pong { ok: bool }
///
/// #[derive(Debug)]
/// enum PingResponse { Ok(Pong) }
///
/// static PING_RESPONSES: [ResponseCase<PingResponse>; 1] = [ResponseCase {
///     status: 200,
///     media: MediaMatch::Json,
///     decode: |body| from_json(body).map(PingResponse::Ok),
/// }];
///
/// let PingResponse::Ok(pong) = (PING_RESPONSES[0].decode)(br#"{"ok":true}"#)?;
/// assert!(pong.ok);
/// # Ok::<(), stratus_core::DecodeError>(())
/// ```
pub fn from_json<T>(body: &[u8]) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    serde_path_to_error::deserialize(deserializer)
}

/// How a parameter is declared for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// The wire name (placeholder, query key or header name).
    pub name: &'static str,
    /// Whether the caller must supply a value.
    pub required: bool,
    /// Serialization style.
    pub style: ParamStyle,
    /// Explode flag of the style.
    pub explode: bool,
}

impl ParamSpec {
    /// A path placeholder: required, `simple`, not exploded.
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            style: ParamStyle::Simple,
            explode: false,
        }
    }

    /// An optional query parameter: `form`, exploded.
    pub const fn query(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            style: ParamStyle::Form,
            explode: true,
        }
    }

    /// A required query parameter: `form`, exploded.
    pub const fn required_query(name: &'static str) -> Self {
        Self {
            required: true,
            ..Self::query(name)
        }
    }

    /// A required header: `simple`, not exploded.
    pub const fn header(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            style: ParamStyle::Simple,
            explode: false,
        }
    }

    /// An optional header: `simple`, not exploded.
    pub const fn optional_header(name: &'static str) -> Self {
        Self {
            required: false,
            ..Self::header(name)
        }
    }

    /// Overrides the style and explode flag.
    pub const fn with_style(self, style: ParamStyle, explode: bool) -> Self {
        Self {
            style,
            explode,
            ..self
        }
    }
}

/// The request body an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// No body is sent.
    None,
    /// A JSON body, usually built with [`CallBody::json`](crate::CallBody::json).
    Json,
    /// Any body with a caller-declared content type (e.g. image uploads).
    Any,
}

/// Content-type predicate of a [`ResponseCase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaMatch {
    /// The `Content-Type` header contains `json` (case-insensitive).
    Json,
    /// Any content type, including a missing header.
    Any,
}

impl MediaMatch {
    /// Checks the predicate against the response `Content-Type` value.
    pub fn matches(self, content_type: Option<&str>) -> bool {
        match self {
            Self::Json => content_type
                .is_some_and(|value| value.to_ascii_lowercase().contains("json")),
            Self::Any => true,
        }
    }
}

/// One `(status, content type) -> typed payload` mapping of an operation.
pub struct ResponseCase<R> {
    /// The HTTP status code that activates this case.
    pub status: u16,
    /// The content-type predicate that activates this case.
    pub media: MediaMatch,
    /// Decodes the body into the operation's response variant.
    pub decode: fn(&[u8]) -> Result<R, DecodeError>,
}

impl<R> ResponseCase<R> {
    /// Whether this case applies to a response.
    pub fn matches(&self, status: u16, content_type: Option<&str>) -> bool {
        self.status == status && self.media.matches(content_type)
    }
}

impl<R> fmt::Debug for ResponseCase<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCase")
            .field("status", &self.status)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

/// Immutable metadata of one remote operation.
///
/// `R` is the operation's tagged response type: usually an enum with one
/// variant per declared `(status, content type)` pair.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use stratus_core::{BodyEncoding, MediaMatch, OperationDescriptor, ParamSpec, ResponseCase, from_json};
///
/// #[derive(Debug)]
/// enum GetServerResponse {
///     Ok(serde_json::Value),
///     NotFound(serde_json::Value),
/// }
///
/// static GET_SERVER: OperationDescriptor<GetServerResponse> = OperationDescriptor {
///     id: "getServer",
///     method: Method::GET,
///     path: "/v1/servers/{serverId}",
///     path_params: &[ParamSpec::path("serverId")],
///     query_params: &[],
///     header_params: &[ParamSpec::header("x-request-id")],
///     body: BodyEncoding::None,
///     responses: &[
///         ResponseCase { status: 200, media: MediaMatch::Json, decode: |body| from_json(body).map(GetServerResponse::Ok) },
///         ResponseCase { status: 404, media: MediaMatch::Json, decode: |body| from_json(body).map(GetServerResponse::NotFound) },
///     ],
/// };
///
/// assert!(GET_SERVER.response_case(200, Some("application/json")).is_some());
/// assert!(GET_SERVER.response_case(500, Some("application/json")).is_none());
/// ```
pub struct OperationDescriptor<R: 'static> {
    /// Stable operation identifier (e.g. `listServers`).
    pub id: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Path template with `{name}` placeholders, relative to the server URL.
    pub path: &'static str,
    /// Path parameters, in template order.
    pub path_params: &'static [ParamSpec],
    /// Query parameters, in the order they are appended.
    pub query_params: &'static [ParamSpec],
    /// Header parameters.
    pub header_params: &'static [ParamSpec],
    /// Accepted request body.
    pub body: BodyEncoding,
    /// Ordered response mappings; the first match wins.
    pub responses: &'static [ResponseCase<R>],
}

impl<R: 'static> OperationDescriptor<R> {
    /// Finds the first response case matching a status and content type.
    pub fn response_case(&self, status: u16, content_type: Option<&str>) -> Option<&ResponseCase<R>> {
        self.responses
            .iter()
            .find(|case| case.matches(status, content_type))
    }

    /// Status codes with a declared payload, in declaration order.
    pub fn declared_statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.responses.iter().map(|case| case.status)
    }
}

impl<R: 'static> fmt::Debug for OperationDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("path_params", &self.path_params)
            .field("query_params", &self.query_params)
            .field("header_params", &self.header_params)
            .field("body", &self.body)
            .field("responses", &self.responses)
            .finish()
    }
}

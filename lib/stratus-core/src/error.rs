use crate::auth::AuthenticationError;

/// Errors that can occur when building, sending or decoding an API call.
///
/// Construction errors (URL, parameters, body) are raised before any network I/O.
/// Transport errors are surfaced unchanged from the [`Transport`](crate::Transport)
/// or from the [`RequestEditor`](crate::RequestEditor) that rejected the request.
/// Decode errors only happen when a declared JSON payload fails to deserialize.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or the body cannot be read.
    ReqwestError(reqwest::Error),

    /// URL parsing error when constructing request URLs.
    ///
    /// Occurs when the server URL or the resolved path create an invalid URL.
    UrlError(url::ParseError),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    ///
    /// Occurs when header values contain invalid characters.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// I/O error while reading a request body stream.
    IoError(std::io::Error),

    /// Declared request content type is not a valid media type.
    InvalidContentType(mime::FromStrError),

    /// JSON serialization error.
    ///
    /// Occurs when a parameter or a JSON request body cannot be marshaled.
    JsonValueError(serde_json::Error),

    /// Authentication data cannot be turned into a request header.
    AuthenticationError(AuthenticationError),

    /// The configured server URL cannot be used as a base for relative paths.
    #[display("Invalid base URL '{url}': {error}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Description of why the URL is invalid.
        error: String,
    },

    /// JSON response deserialization failure for a declared payload.
    #[display("Failed to deserialize {operation} response at '{path}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The operation whose response failed to decode.
        operation: &'static str,
        /// The JSON path where the error occurred.
        path: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },

    /// Path template contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that couldn't be resolved.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// A required query or header parameter has no value.
    #[display("Operation {operation} is missing required {location} parameter '{name}'")]
    #[from(skip)]
    MissingRequiredParameter {
        /// The operation being built.
        operation: &'static str,
        /// Where the parameter goes (query, header).
        location: &'static str,
        /// The parameter name.
        name: &'static str,
    },

    /// Parameter value cannot be styled for its location.
    #[display("Unsupported parameter value: {message}. Got: {value}")]
    #[from(skip)]
    UnsupportedParameterValue {
        /// Specific error message describing the conversion failure.
        message: String,
        /// The value that failed to convert.
        value: serde_json::Value,
    },

    /// Data serialization failed.
    ///
    /// Occurs when request data cannot be converted to the required format.
    #[display("Serialization error: {message}")]
    #[from(skip)]
    SerializationError {
        /// Description of the serialization failure.
        message: String,
    },

    /// A body was supplied to an operation that does not accept one.
    #[display("Operation {operation} does not accept a request body")]
    #[from(skip)]
    UnexpectedBody {
        /// The operation being built.
        operation: &'static str,
    },

    /// An operation that requires a body was called without one.
    #[display("Operation {operation} requires a request body")]
    #[from(skip)]
    MissingBody {
        /// The operation being built.
        operation: &'static str,
    },

    /// Failure reported by a custom transport.
    #[display("Transport error: {message}")]
    #[from(skip)]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

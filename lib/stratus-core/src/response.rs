use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use reqwest::Response;
use tracing::debug;
use url::Url;

use crate::descriptor::OperationDescriptor;
use crate::error::ApiClientError;

/// A decoded response: the raw parts plus at most one typed payload.
///
/// The payload is `None` when no declared `(status, content type)` pair
/// matched. That is not an error: the raw body, status and headers are always
/// available for the caller to inspect.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope<R> {
    operation_id: &'static str,
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    body: Bytes,
    payload: Option<R>,
}

impl<R> ResponseEnvelope<R> {
    /// The operation that produced this response.
    pub fn operation_id(&self) -> &'static str {
        self.operation_id
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The final URL, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The raw body, read once and kept whatever the outcome of decoding.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The `Content-Type` header, when present and readable.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// The typed payload, if a declared response matched.
    pub fn payload(&self) -> Option<&R> {
        self.payload.as_ref()
    }

    /// Takes the typed payload.
    pub fn into_payload(self) -> Option<R> {
        self.payload
    }

    /// Whether a declared response matched.
    pub fn is_typed(&self) -> bool {
        self.payload.is_some()
    }
}

/// Reads the whole response body and decodes it with the operation's
/// response cases.
///
/// The response is consumed: its body is read exactly once and the
/// connection is released on every path, including errors.
///
/// # Errors
///
/// Fails when the body cannot be read, or when a matching case fails to
/// decode the body.
pub async fn decode_response<R>(
    descriptor: &OperationDescriptor<R>,
    response: Response,
) -> Result<ResponseEnvelope<R>, ApiClientError> {
    let status = response.status();
    let headers = response.headers().clone();
    let url = response.url().clone();
    let body = response.bytes().await?;
    debug!(operation = descriptor.id, %status, length = body.len(), "response read");

    decode_envelope(descriptor, status, headers, url, body)
}

/// Decodes an already read response.
///
/// The first response case whose status equals `status` and whose media
/// predicate accepts the `Content-Type` decodes the body.
///
/// # Errors
///
/// Fails with [`ApiClientError::JsonError`] when the matching case fails to
/// decode the body.
pub fn decode_envelope<R>(
    descriptor: &OperationDescriptor<R>,
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    body: Bytes,
) -> Result<ResponseEnvelope<R>, ApiClientError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let payload = match descriptor.response_case(status.as_u16(), content_type) {
        Some(case) => {
            let payload = (case.decode)(&body).map_err(|err| ApiClientError::JsonError {
                operation: descriptor.id,
                path: err.path().to_string(),
                error: err.into_inner(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })?;
            Some(payload)
        }
        None => {
            debug!(
                operation = descriptor.id,
                %status,
                ?content_type,
                "no declared response, keeping raw body"
            );
            None
        }
    };

    Ok(ResponseEnvelope {
        operation_id: descriptor.id,
        status,
        headers,
        url,
        body,
        payload,
    })
}

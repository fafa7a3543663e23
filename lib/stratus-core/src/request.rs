use headers::HeaderMapExt;
use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use reqwest::{Body, Request};
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::args::CallArgs;
use crate::body::CallBody;
use crate::descriptor::{BodyEncoding, OperationDescriptor};
use crate::error::ApiClientError;
use crate::param::{ParamLocation, style_param};
use crate::path::{relative_reference, resolve_path};

/// Builds a ready-to-send request for an operation.
///
/// The path is resolved against `server` as a relative reference, so a server
/// URL with a sub-path (e.g. `https://api.example.com/compute/`) keeps its prefix.
/// Query parameters are appended in declaration order, only when present.
/// Headers are styled with the `simple` style. The body `Content-Type` is the
/// declared one.
///
/// # Errors
///
/// Any failure aborts construction: unresolved path, missing required parameter,
/// unsupported parameter value, invalid header, or a body that does not fit the
/// operation.
pub fn build_request<R>(
    server: &Url,
    descriptor: &OperationDescriptor<R>,
    args: &CallArgs,
    body: Option<CallBody>,
) -> Result<Request, ApiClientError> {
    let url = build_url(server, descriptor, args)?;

    let mut request = Request::new(descriptor.method.clone(), url);
    apply_headers(descriptor, args, request.headers_mut())?;
    apply_body(descriptor, body, &mut request)?;

    debug!(
        operation = descriptor.id,
        method = %request.method(),
        url = %request.url(),
        "request built"
    );
    Ok(request)
}

pub(crate) fn build_url<R>(
    server: &Url,
    descriptor: &OperationDescriptor<R>,
    args: &CallArgs,
) -> Result<Url, ApiClientError> {
    let path = resolve_path(descriptor.path, descriptor.path_params, args)?;
    let mut url = server.join(&relative_reference(&path))?;

    let mut pairs = Vec::new();
    for spec in descriptor.query_params {
        let Some(value) = args.get(ParamLocation::Query, spec.name) else {
            if spec.required {
                return Err(missing(descriptor, ParamLocation::Query, spec.name));
            }
            continue;
        };

        let fragment = style_param(
            spec.style,
            spec.explode,
            ParamLocation::Query,
            spec.name,
            value,
        )?;
        pairs.extend(form_urlencoded::parse(fragment.as_bytes()).into_owned());
    }

    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}

fn apply_headers<R>(
    descriptor: &OperationDescriptor<R>,
    args: &CallArgs,
    headers: &mut HeaderMap,
) -> Result<(), ApiClientError> {
    for spec in descriptor.header_params {
        let Some(value) = args.get(ParamLocation::Header, spec.name) else {
            if spec.required {
                return Err(missing(descriptor, ParamLocation::Header, spec.name));
            }
            continue;
        };

        let styled = style_param(
            spec.style,
            spec.explode,
            ParamLocation::Header,
            spec.name,
            value,
        )?;
        headers.insert(
            HeaderName::from_bytes(spec.name.as_bytes())?,
            HeaderValue::from_str(&styled)?,
        );
    }
    Ok(())
}

fn apply_body<R>(
    descriptor: &OperationDescriptor<R>,
    body: Option<CallBody>,
    request: &mut Request,
) -> Result<(), ApiClientError> {
    match (descriptor.body, body) {
        (BodyEncoding::None, None) => Ok(()),
        (BodyEncoding::None, Some(_)) => Err(ApiClientError::UnexpectedBody {
            operation: descriptor.id,
        }),
        (BodyEncoding::Json | BodyEncoding::Any, None) => Err(ApiClientError::MissingBody {
            operation: descriptor.id,
        }),
        (BodyEncoding::Json | BodyEncoding::Any, Some(body)) => {
            let CallBody { content_type, data } = body;
            request.headers_mut().typed_insert(content_type);
            *request.body_mut() = Some(Body::from(data));
            Ok(())
        }
    }
}

fn missing<R>(
    descriptor: &OperationDescriptor<R>,
    location: ParamLocation,
    name: &'static str,
) -> ApiClientError {
    let location = match location {
        ParamLocation::Path => "path",
        ParamLocation::Query => "query",
        ParamLocation::Header => "header",
    };
    ApiClientError::MissingRequiredParameter {
        operation: descriptor.id,
        location,
        name,
    }
}

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::ApiClientError;

/// Characters escaped in path values: everything but RFC 3986 unreserved characters.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Parameter styles supported by OpenAPI 3.1 specification.
///
/// These styles define how array values and complex parameters are serialized
/// in strings according to the OpenAPI standard.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use stratus_core::{ParamLocation, ParamStyle, style_param};
///
/// // Form style, exploded - arrays are repeated: tags=rust&tags=web
/// let form = style_param(ParamStyle::Form, true, ParamLocation::Query, "tags", &json!(["rust", "web"]))?;
/// assert_eq!(form, "tags=rust&tags=web");
///
/// // Simple style - arrays are joined with commas: rust,web
/// let simple = style_param(ParamStyle::Simple, false, ParamLocation::Path, "tags", &json!(["rust", "web"]))?;
/// assert_eq!(simple, "rust,web");
/// # Ok::<(), stratus_core::ApiClientError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// Simple style: `value1,value2` (path and header default)
    Simple,
    /// Form style: `param=value1&param=value2` (query default)
    Form,
    /// Label style: `.value` (path parameter with . prefix)
    Label,
    /// Matrix style: `;name=value` (path parameter with ; prefix)
    Matrix,
    /// Space delimited: `param=value1%20value2` (query arrays)
    SpaceDelimited,
    /// Pipe delimited: `param=value1|value2` (query arrays)
    PipeDelimited,
    /// Deep object style: `obj[key]=value` (query parameter for nested objects)
    DeepObject,
}

/// Where a styled parameter ends up in the request.
///
/// The location decides how values are escaped: path values are percent-encoded,
/// query values are form-urlencoded, header values are left as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ParamLocation {
    /// A `{name}` placeholder of the path template.
    #[display("path")]
    Path,
    /// A query string parameter.
    #[display("query")]
    Query,
    /// A request header.
    #[display("header")]
    Header,
}

impl ParamStyle {
    /// The style used when none is declared for a location.
    pub fn default_for(location: ParamLocation) -> Self {
        match location {
            ParamLocation::Query => Self::Form,
            ParamLocation::Path | ParamLocation::Header => Self::Simple,
        }
    }
}

/// Serializes a parameter value into a string fragment for its location.
///
/// Primitive values, flat arrays and flat objects are supported; nested
/// arrays or objects are rejected. Form-like styles produce `name=value`
/// fragments (possibly joined with `&`), other styles produce the bare value.
///
/// # Errors
///
/// Returns [`ApiClientError::UnsupportedParameterValue`] when the value shape
/// cannot be expressed with the style at this location.
pub fn style_param(
    style: ParamStyle,
    explode: bool,
    location: ParamLocation,
    name: &str,
    value: &Value,
) -> Result<String, ApiClientError> {
    match value {
        Value::Array(items) => style_array(style, explode, location, name, items, value),
        Value::Object(fields) => style_object(style, explode, location, name, fields, value),
        _ => style_primitive(style, location, name, value),
    }
}

fn style_primitive(
    style: ParamStyle,
    location: ParamLocation,
    name: &str,
    value: &Value,
) -> Result<String, ApiClientError> {
    let raw = json_value_to_string(value)?;
    let escaped = escape(location, &raw);

    let result = match style {
        ParamStyle::Simple => escaped.into_owned(),
        ParamStyle::Label => format!(".{escaped}"),
        ParamStyle::Matrix => format!(";{}={escaped}", escape(location, name)),
        ParamStyle::Form => format!("{}={escaped}", escape(location, name)),
        ParamStyle::SpaceDelimited | ParamStyle::PipeDelimited | ParamStyle::DeepObject => {
            return Err(unsupported(
                format!("{style:?} style requires an array or object value"),
                value,
            ));
        }
    };
    Ok(result)
}

fn style_array(
    style: ParamStyle,
    explode: bool,
    location: ParamLocation,
    name: &str,
    items: &[Value],
    value: &Value,
) -> Result<String, ApiClientError> {
    // an empty list is absent, whatever the explode flag
    if items.is_empty()
        && matches!(
            style,
            ParamStyle::Form | ParamStyle::SpaceDelimited | ParamStyle::PipeDelimited
        )
    {
        return Ok(String::new());
    }

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        let raw = json_value_to_string(item)?;
        parts.push(escape(location, &raw).into_owned());
    }
    let key = escape(location, name);

    let result = match (style, explode) {
        (ParamStyle::Simple, _) => parts.join(","),
        (ParamStyle::Label, true) => format!(".{}", parts.join(".")),
        (ParamStyle::Label, false) => format!(".{}", parts.join(",")),
        (ParamStyle::Matrix, true) => parts
            .iter()
            .map(|part| format!(";{key}={part}"))
            .collect::<String>(),
        (ParamStyle::Matrix, false) => format!(";{key}={}", parts.join(",")),
        (ParamStyle::Form, false) => format!("{key}={}", parts.join(",")),
        (ParamStyle::SpaceDelimited | ParamStyle::PipeDelimited, _)
            if location != ParamLocation::Query =>
        {
            return Err(unsupported(
                format!("{style:?} style is only supported for query parameters"),
                value,
            ));
        }
        (ParamStyle::Form | ParamStyle::SpaceDelimited | ParamStyle::PipeDelimited, true) => {
            parts
                .iter()
                .map(|part| format!("{key}={part}"))
                .collect::<Vec<_>>()
                .join("&")
        }
        (ParamStyle::SpaceDelimited, false) => format!("{key}={}", parts.join("%20")),
        (ParamStyle::PipeDelimited, false) => format!("{key}={}", parts.join("|")),
        (ParamStyle::DeepObject, _) => {
            return Err(unsupported(
                "DeepObject style not supported for arrays, use objects instead".to_string(),
                value,
            ));
        }
    };
    Ok(result)
}

fn style_object(
    style: ParamStyle,
    explode: bool,
    location: ParamLocation,
    name: &str,
    fields: &Map<String, Value>,
    value: &Value,
) -> Result<String, ApiClientError> {
    let mut pairs = Vec::with_capacity(fields.len());
    for (field, field_value) in fields {
        let raw = json_value_to_string(field_value)?;
        pairs.push((
            escape(location, field).into_owned(),
            escape(location, &raw).into_owned(),
        ));
    }
    let joined = |pair_sep: &str, sep: &str| {
        pairs
            .iter()
            .map(|(field, raw)| format!("{field}{pair_sep}{raw}"))
            .collect::<Vec<_>>()
            .join(sep)
    };
    let key = escape(location, name);

    let result = match (style, explode) {
        (ParamStyle::Simple, true) => joined("=", ","),
        (ParamStyle::Simple, false) => joined(",", ","),
        (ParamStyle::Label, true) => format!(".{}", joined("=", ".")),
        (ParamStyle::Label, false) => format!(".{}", joined(",", ",")),
        (ParamStyle::Matrix, true) => format!(";{}", joined("=", ";")),
        (ParamStyle::Matrix, false) => format!(";{key}={}", joined(",", ",")),
        (ParamStyle::Form, true) => joined("=", "&"),
        (ParamStyle::Form, false) => format!("{key}={}", joined(",", ",")),
        (ParamStyle::DeepObject, _) if location == ParamLocation::Query => pairs
            .iter()
            .map(|(field, raw)| format!("{key}[{field}]={raw}"))
            .collect::<Vec<_>>()
            .join("&"),
        (ParamStyle::DeepObject, _) => {
            return Err(unsupported(
                "DeepObject style is only supported for query parameters".to_string(),
                value,
            ));
        }
        (ParamStyle::SpaceDelimited | ParamStyle::PipeDelimited, _) => {
            return Err(unsupported(
                format!("{style:?} style not supported for objects"),
                value,
            ));
        }
    };
    Ok(result)
}

fn escape<'a>(location: ParamLocation, raw: &'a str) -> Cow<'a, str> {
    match location {
        ParamLocation::Path => Cow::from(utf8_percent_encode(raw, PATH_VALUE)),
        ParamLocation::Query => Cow::Owned(form_urlencoded::byte_serialize(raw.as_bytes()).collect()),
        ParamLocation::Header => Cow::Borrowed(raw),
    }
}

fn json_value_to_string(value: &Value) -> Result<String, ApiClientError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(unsupported(
            "nested complex values not supported in parameters".to_string(),
            value,
        )),
    }
}

fn unsupported(message: String, value: &Value) -> ApiClientError {
    ApiClientError::UnsupportedParameterValue {
        message,
        value: value.clone(),
    }
}

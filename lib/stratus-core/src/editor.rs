use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Request;

use crate::error::ApiClientError;

/// What an editor knows about the call it edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// The descriptor id of the operation being sent.
    pub operation_id: &'static str,
    /// The per-call deadline, if any.
    pub timeout: Option<Duration>,
}

/// A hook that mutates a built request before it is sent.
///
/// Editors add authentication, tracing headers, or reject a request outright:
/// the first error aborts the call and is returned to the caller verbatim.
///
/// Closures with the matching signature are editors:
///
/// ```rust
/// use http::HeaderValue;
/// use stratus_core::{ApiClient, ApiClientError, CallContext};
///
/// # fn example() -> Result<(), ApiClientError> {
/// let client = ApiClient::builder()
///     .with_request_editor_fn(|_ctx: &CallContext, request: &mut reqwest::Request| {
///         request
///             .headers_mut()
///             .insert("x-tenant", HeaderValue::from_static("acme"));
///         Ok(())
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub trait RequestEditor: Send + Sync {
    /// Edits the request in place.
    ///
    /// # Errors
    ///
    /// Any error aborts the call; the request is not sent.
    fn edit(&self, context: &CallContext, request: &mut Request) -> Result<(), ApiClientError>;
}

impl<F> RequestEditor for F
where
    F: Fn(&CallContext, &mut Request) -> Result<(), ApiClientError> + Send + Sync,
{
    fn edit(&self, context: &CallContext, request: &mut Request) -> Result<(), ApiClientError> {
        self(context, request)
    }
}

/// Editors applied in registration order.
#[derive(Clone, Default)]
pub(crate) struct EditorChain(Vec<Arc<dyn RequestEditor>>);

impl EditorChain {
    pub(crate) fn push(&mut self, editor: Arc<dyn RequestEditor>) {
        self.0.push(editor);
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn apply(
        &self,
        context: &CallContext,
        request: &mut Request,
    ) -> Result<(), ApiClientError> {
        self.0
            .iter()
            .try_for_each(|editor| editor.edit(context, request))
    }
}

impl fmt::Debug for EditorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorChain")
            .field("editors", &self.0.len())
            .finish()
    }
}

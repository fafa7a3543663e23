use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiClientError;
use crate::param::ParamLocation;

/// Typed parameters of one operation.
///
/// Implementations write each field under its wire name; the operation's
/// [`OperationDescriptor`](crate::OperationDescriptor) decides how every value
/// is styled and where it goes.
///
/// # Example
///
/// ```rust
/// use stratus_core::{ApiClientError, CallArgs, OperationParams};
///
/// struct GetServerParams {
///     server_id: i64,
///     request_id: String,
///     trace_id: Option<String>,
/// }
///
/// impl OperationParams for GetServerParams {
///     fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
///         args.path("serverId", &self.server_id)?
///             .header("x-request-id", &self.request_id)?
///             .header("x-trace-id", &self.trace_id)?;
///         Ok(())
///     }
/// }
/// ```
pub trait OperationParams {
    /// Writes the parameter values into the call arguments.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be serialized.
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError>;

    /// Collects the parameter values into a fresh [`CallArgs`].
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be serialized.
    fn to_args(&self) -> Result<CallArgs, ApiClientError> {
        let mut args = CallArgs::new();
        self.write_args(&mut args)?;
        Ok(args)
    }
}

impl OperationParams for () {
    fn write_args(&self, _args: &mut CallArgs) -> Result<(), ApiClientError> {
        Ok(())
    }
}

impl OperationParams for CallArgs {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        args.merge(self.clone());
        Ok(())
    }
}

/// Parameter values of a call, keyed by wire name and location.
///
/// Values are kept as JSON values so the styler can handle primitives, lists
/// and flat objects uniformly. A `null` value (an unset `Option`) means the
/// parameter is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    path: IndexMap<String, Value>,
    query: IndexMap<String, Value>,
    headers: IndexMap<String, Value>,
}

impl CallArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a path parameter.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be serialized.
    pub fn path<T>(&mut self, name: impl Into<String>, value: &T) -> Result<&mut Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        self.insert(ParamLocation::Path, name.into(), value)
    }

    /// Sets a query parameter; `None` values are skipped.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be serialized.
    pub fn query<T>(&mut self, name: impl Into<String>, value: &T) -> Result<&mut Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        self.insert(ParamLocation::Query, name.into(), value)
    }

    /// Sets a header parameter; `None` values are skipped.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be serialized.
    pub fn header<T>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<&mut Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        self.insert(ParamLocation::Header, name.into(), value)
    }

    /// Merges another argument set into this one; `other` takes precedence.
    pub fn merge(&mut self, other: Self) {
        self.path.extend(other.path);
        self.query.extend(other.query);
        self.headers.extend(other.headers);
    }

    /// Returns the value of a parameter, if present.
    pub fn get(&self, location: ParamLocation, name: &str) -> Option<&Value> {
        self.values(location).get(name)
    }

    /// Checks whether no parameter has been set.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty() && self.headers.is_empty()
    }

    fn values(&self, location: ParamLocation) -> &IndexMap<String, Value> {
        match location {
            ParamLocation::Path => &self.path,
            ParamLocation::Query => &self.query,
            ParamLocation::Header => &self.headers,
        }
    }

    fn insert<T>(
        &mut self,
        location: ParamLocation,
        name: String,
        value: &T,
    ) -> Result<&mut Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        let values = match location {
            ParamLocation::Path => &mut self.path,
            ParamLocation::Query => &mut self.query,
            ParamLocation::Header => &mut self.headers,
        };
        if value.is_null() {
            values.shift_remove(&name);
        } else {
            values.insert(name, value);
        }
        Ok(self)
    }
}

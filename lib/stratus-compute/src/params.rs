//! Typed parameters of the compute operations.
//!
//! Every operation takes the common [`RequestHeaders`]; list operations add
//! pagination, ordering and resource filters. Unset options and empty filter
//! lists are left out of the request.

use stratus_core::{ApiClientError, CallArgs, OperationParams};

use crate::models::ServerStatus;

/// Correlation headers sent with every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    /// `x-request-id`, required by the server.
    pub request_id: String,
    /// `x-trace-id`, forwarded to the tracing backend when present.
    pub trace_id: Option<String>,
}

impl RequestHeaders {
    /// Headers with a request id and no trace id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            trace_id: None,
        }
    }

    /// Adds a trace id.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl OperationParams for RequestHeaders {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        args.header("x-request-id", &self.request_id)?
            .header("x-trace-id", &self.trace_id)?;
        Ok(())
    }
}

/// Pagination and ordering shared by list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    /// One-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// Sort key, e.g. `name` or `-createdAt`.
    pub order_by: Option<String>,
}

impl PageParams {
    /// A given page of a given size.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            order_by: None,
        }
    }

    /// Sorts the results.
    #[must_use]
    pub fn ordered_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }
}

impl OperationParams for PageParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        args.query("page", &self.page)?
            .query("size", &self.size)?
            .query("orderBy", &self.order_by)?;
        Ok(())
    }
}

/// Parameters of `listServers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListServersParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Pagination and ordering.
    pub page: PageParams,
    /// Exact name filter.
    pub name: Option<String>,
    /// Any of these states.
    pub status: Vec<ServerStatus>,
    /// All of these tags.
    pub tags: Vec<String>,
}

impl ListServersParams {
    /// Lists every server, first page.
    pub fn new(headers: RequestHeaders) -> Self {
        Self {
            headers,
            page: PageParams::default(),
            name: None,
            status: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl OperationParams for ListServersParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        self.page.write_args(args)?;
        args.query("name", &self.name)?
            .query("status", &self.status)?
            .query("tags", &self.tags)?;
        Ok(())
    }
}

/// Parameters of operations on one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Server id.
    pub server_id: i64,
}

impl ServerParams {
    /// Targets a server.
    pub fn new(headers: RequestHeaders, server_id: i64) -> Self {
        Self { headers, server_id }
    }
}

impl OperationParams for ServerParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        args.path("serverId", &self.server_id)?;
        Ok(())
    }
}

/// Parameters of `listServerVolumes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListServerVolumesParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Server id.
    pub server_id: i64,
    /// Pagination and ordering.
    pub page: PageParams,
}

impl OperationParams for ListServerVolumesParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        self.page.write_args(args)?;
        args.path("serverId", &self.server_id)?;
        Ok(())
    }
}

/// Parameters of `attachVolume` and `detachVolume`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Server id.
    pub server_id: i64,
    /// Volume id.
    pub volume_id: i64,
}

impl OperationParams for AttachmentParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        args.path("serverId", &self.server_id)?
            .path("volumeId", &self.volume_id)?;
        Ok(())
    }
}

/// Parameters of `listVolumes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListVolumesParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Pagination and ordering.
    pub page: PageParams,
    /// Filter on the exact name.
    pub name: Option<String>,
    /// Only attached (or detached) volumes.
    pub attached: Option<bool>,
}

impl ListVolumesParams {
    /// Lists every volume, first page.
    pub fn new(headers: RequestHeaders) -> Self {
        Self {
            headers,
            page: PageParams::default(),
            name: None,
            attached: None,
        }
    }
}

impl OperationParams for ListVolumesParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        self.page.write_args(args)?;
        args.query("name", &self.name)?
            .query("attached", &self.attached)?;
        Ok(())
    }
}

/// Parameters of `getVolume`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Volume id.
    pub volume_id: i64,
}

impl OperationParams for VolumeParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        args.path("volumeId", &self.volume_id)?;
        Ok(())
    }
}

/// Parameters of `listImages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListImagesParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Pagination and ordering.
    pub page: PageParams,
    /// Filter on the exact name.
    pub name: Option<String>,
    /// Filter on the operating system.
    pub os: Option<String>,
    /// Filter on all of these tags.
    pub tags: Vec<String>,
}

impl ListImagesParams {
    /// Lists every image, first page.
    pub fn new(headers: RequestHeaders) -> Self {
        Self {
            headers,
            page: PageParams::default(),
            name: None,
            os: None,
            tags: Vec::new(),
        }
    }
}

impl OperationParams for ListImagesParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        self.page.write_args(args)?;
        args.query("name", &self.name)?
            .query("os", &self.os)?
            .query("tags", &self.tags)?;
        Ok(())
    }
}

/// Parameters of `uploadImage`: the image metadata travels in the query, the
/// disk content in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImageParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Image name.
    pub name: String,
    /// Operating system family.
    pub os: String,
    /// Labels of the image.
    pub tags: Vec<String>,
}

impl OperationParams for UploadImageParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        args.query("name", &self.name)?
            .query("os", &self.os)?
            .query("tags", &self.tags)?;
        Ok(())
    }
}

/// Parameters of `getImage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Image id.
    pub image_id: String,
}

impl OperationParams for ImageParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        args.path("imageId", &self.image_id)?;
        Ok(())
    }
}

/// Parameters of `deleteSshKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshKeyParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Key id.
    pub key_id: String,
}

impl OperationParams for SshKeyParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        args.path("keyId", &self.key_id)?;
        Ok(())
    }
}

/// Parameters of `listSshKeys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSshKeysParams {
    /// Correlation headers.
    pub headers: RequestHeaders,
    /// Pagination and ordering.
    pub page: PageParams,
}

impl OperationParams for ListSshKeysParams {
    fn write_args(&self, args: &mut CallArgs) -> Result<(), ApiClientError> {
        self.headers.write_args(args)?;
        self.page.write_args(args)
    }
}

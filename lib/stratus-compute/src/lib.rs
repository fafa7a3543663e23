//! # Stratus Compute
//!
//! Typed binding of the compute API: servers, volumes, images and SSH keys.
//!
//! Every operation is a static [`OperationDescriptor`](stratus_core::OperationDescriptor)
//! in [`operations`], driven by the `stratus-core` engine. Two clients expose
//! one method per operation:
//!
//! - [`ComputeClient`] returns the raw `reqwest::Response`;
//! - [`ComputeResponsesClient`] returns a [`ResponseEnvelope`](stratus_core::ResponseEnvelope)
//!   with the typed payload of the declared status, if any.
//!
//! Write operations come in two flavours: `create_server(headers, &NewServer, ..)`
//! marshals the model as JSON, `create_server_with_body(headers, CallBody, ..)`
//! sends any body with its own content type.
//!
//! ```rust,no_run
//! use stratus_compute::{
//!     ComputeResponsesClient, ListServersParams, ListServersResponse, PageParams, RequestHeaders,
//!     ServerStatus,
//! };
//! use stratus_core::{ApiClient, Authentication, CallOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), stratus_core::ApiClientError> {
//! let compute = ComputeResponsesClient::new(
//!     ApiClient::builder()
//!         .with_server("https://compute.example.com/api")
//!         .with_authentication(Authentication::Bearer("token".into()))
//!         .build()?,
//! );
//!
//! let params = ListServersParams {
//!     page: PageParams::new(1, 50),
//!     status: vec![ServerStatus::Running],
//!     ..ListServersParams::new(RequestHeaders::new("abc-123"))
//! };
//! let envelope = compute.list_servers(&params, &CallOptions::default()).await?;
//! if let Some(ListServersResponse::Ok(page)) = envelope.payload() {
//!     for server in &page.data {
//!         println!("{} {}", server.id, server.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod params;
mod responses;

pub mod models;
pub mod operations;

pub use self::client::{ComputeClient, ComputeResponsesClient};
pub use self::models::{
    Attachment, ErrorBody, Image, ImagePage, NewServer, NewSshKey, NewVolume, PageInfo, Server,
    ServerPage, ServerPatch, ServerStatus, SshKey, SshKeyPage, UnsupportedMediaTypeBody, Volume,
    VolumePage,
};
pub use self::params::{
    AttachmentParams, ImageParams, ListImagesParams, ListServerVolumesParams, ListServersParams,
    ListSshKeysParams, ListVolumesParams, PageParams, RequestHeaders, ServerParams, SshKeyParams,
    UploadImageParams, VolumeParams,
};
pub use self::responses::{
    AttachVolumeResponse, CreateServerResponse, CreateSshKeyResponse, CreateVolumeResponse,
    DeleteServerResponse, DeleteSshKeyResponse, DetachVolumeResponse, GetImageResponse,
    GetServerResponse, GetVolumeResponse, ListImagesResponse, ListServerVolumesResponse,
    ListServersResponse, ListSshKeysResponse, ListVolumesResponse, UpdateServerResponse,
    UploadImageResponse,
};

use reqwest::Response;
use stratus_core::{
    ApiClient, ApiClientError, CallBody, CallOptions, OperationDescriptor, OperationParams,
    ResponseEnvelope, ResponsesClient,
};

use crate::models::{NewServer, NewSshKey, NewVolume, ServerPatch};
use crate::operations::{
    ATTACH_VOLUME, CREATE_SERVER, CREATE_SSH_KEY, CREATE_VOLUME, DELETE_SERVER, DELETE_SSH_KEY,
    DETACH_VOLUME, GET_IMAGE, GET_SERVER, GET_VOLUME, LIST_IMAGES, LIST_SERVER_VOLUMES,
    LIST_SERVERS, LIST_SSH_KEYS, LIST_VOLUMES, UPDATE_SERVER, UPLOAD_IMAGE,
};
use crate::params::{
    AttachmentParams, ImageParams, ListImagesParams, ListServerVolumesParams, ListServersParams,
    ListSshKeysParams, ListVolumesParams, RequestHeaders, ServerParams, SshKeyParams,
    UploadImageParams, VolumeParams,
};
use crate::responses::{
    AttachVolumeResponse, CreateServerResponse, CreateSshKeyResponse, CreateVolumeResponse,
    DeleteServerResponse, DeleteSshKeyResponse, DetachVolumeResponse, GetImageResponse,
    GetServerResponse, GetVolumeResponse, ListImagesResponse, ListServerVolumesResponse,
    ListServersResponse, ListSshKeysResponse, ListVolumesResponse, UpdateServerResponse,
    UploadImageResponse,
};

/// Compute API client returning raw responses.
///
/// Use it when the caller reads the response itself, e.g. to stream a large
/// body. [`ComputeResponsesClient`] decodes the responses.
#[derive(Debug, Clone)]
pub struct ComputeClient {
    client: ApiClient,
}

impl ComputeClient {
    /// Wraps a configured client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn api_client(&self) -> &ApiClient {
        &self.client
    }

    async fn send<R, P>(
        &self,
        descriptor: &OperationDescriptor<R>,
        params: &P,
        body: Option<CallBody>,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError>
    where
        P: OperationParams + ?Sized,
    {
        self.client
            .execute(descriptor, params, body, options)
            .await
    }

    /// `listServers`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn list_servers(
        &self,
        params: &ListServersParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&LIST_SERVERS, params, None, options).await
    }

    /// `createServer` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, or the request cannot be built or sent.
    pub async fn create_server(
        &self,
        headers: &RequestHeaders,
        body: &NewServer,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.create_server_with_body(headers, CallBody::json(body)?, options)
            .await
    }

    /// `createServer` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn create_server_with_body(
        &self,
        headers: &RequestHeaders,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&CREATE_SERVER, headers, Some(body), options).await
    }

    /// `getServer`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn get_server(
        &self,
        params: &ServerParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&GET_SERVER, params, None, options).await
    }

    /// `updateServer` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, or the request cannot be built or sent.
    pub async fn update_server(
        &self,
        params: &ServerParams,
        body: &ServerPatch,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.update_server_with_body(params, CallBody::json(body)?, options)
            .await
    }

    /// `updateServer` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn update_server_with_body(
        &self,
        params: &ServerParams,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&UPDATE_SERVER, params, Some(body), options).await
    }

    /// `deleteServer`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn delete_server(
        &self,
        params: &ServerParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&DELETE_SERVER, params, None, options).await
    }

    /// `listServerVolumes`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn list_server_volumes(
        &self,
        params: &ListServerVolumesParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&LIST_SERVER_VOLUMES, params, None, options).await
    }

    /// `attachVolume`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn attach_volume(
        &self,
        params: &AttachmentParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&ATTACH_VOLUME, params, None, options).await
    }

    /// `detachVolume`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn detach_volume(
        &self,
        params: &AttachmentParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&DETACH_VOLUME, params, None, options).await
    }

    /// `listVolumes`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn list_volumes(
        &self,
        params: &ListVolumesParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&LIST_VOLUMES, params, None, options).await
    }

    /// `createVolume` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, or the request cannot be built or sent.
    pub async fn create_volume(
        &self,
        headers: &RequestHeaders,
        body: &NewVolume,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.create_volume_with_body(headers, CallBody::json(body)?, options)
            .await
    }

    /// `createVolume` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn create_volume_with_body(
        &self,
        headers: &RequestHeaders,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&CREATE_VOLUME, headers, Some(body), options).await
    }

    /// `getVolume`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn get_volume(
        &self,
        params: &VolumeParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&GET_VOLUME, params, None, options).await
    }

    /// `listImages`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn list_images(
        &self,
        params: &ListImagesParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&LIST_IMAGES, params, None, options).await
    }

    /// `uploadImage`; the body carries the disk format as its content type.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn upload_image_with_body(
        &self,
        params: &UploadImageParams,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&UPLOAD_IMAGE, params, Some(body), options).await
    }

    /// `getImage`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn get_image(
        &self,
        params: &ImageParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&GET_IMAGE, params, None, options).await
    }

    /// `listSshKeys`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn list_ssh_keys(
        &self,
        params: &ListSshKeysParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&LIST_SSH_KEYS, params, None, options).await
    }

    /// `createSshKey` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, or the request cannot be built or sent.
    pub async fn create_ssh_key(
        &self,
        headers: &RequestHeaders,
        body: &NewSshKey,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.create_ssh_key_with_body(headers, CallBody::json(body)?, options)
            .await
    }

    /// `createSshKey` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn create_ssh_key_with_body(
        &self,
        headers: &RequestHeaders,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&CREATE_SSH_KEY, headers, Some(body), options).await
    }

    /// `deleteSshKey`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent.
    pub async fn delete_ssh_key(
        &self,
        params: &SshKeyParams,
        options: &CallOptions,
    ) -> Result<Response, ApiClientError> {
        self.send(&DELETE_SSH_KEY, params, None, options).await
    }
}

/// Compute API client decoding every response into its typed envelope.
///
/// ```rust,no_run
/// use stratus_compute::{ComputeResponsesClient, GetServerResponse, RequestHeaders, ServerParams};
/// use stratus_core::{ApiClient, CallOptions};
///
/// # async fn example() -> Result<(), stratus_core::ApiClientError> {
/// let compute = ComputeResponsesClient::new(
///     ApiClient::builder()
///         .with_server("https://compute.example.com/api")
///         .build()?,
/// );
///
/// let params = ServerParams::new(RequestHeaders::new("abc-123"), 42);
/// let envelope = compute.get_server(&params, &CallOptions::default()).await?;
/// match envelope.payload() {
///     Some(GetServerResponse::Ok(server)) => println!("{} is {:?}", server.name, server.status),
///     Some(GetServerResponse::NotFound(error)) => println!("{}", error.message),
///     None => println!("unexpected {}", envelope.status()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ComputeResponsesClient {
    client: ResponsesClient,
}

impl ComputeResponsesClient {
    /// Wraps a configured client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: ResponsesClient::new(client),
        }
    }

    /// The underlying client.
    pub fn api_client(&self) -> &ApiClient {
        self.client.client()
    }

    /// `listServers`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn list_servers(
        &self,
        params: &ListServersParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<ListServersResponse>, ApiClientError> {
        self.client.call(&LIST_SERVERS, params, None, options).await
    }

    /// `createServer` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, the request cannot be built or sent,
    /// or a declared payload cannot be decoded.
    pub async fn create_server(
        &self,
        headers: &RequestHeaders,
        body: &NewServer,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<CreateServerResponse>, ApiClientError> {
        self.create_server_with_body(headers, CallBody::json(body)?, options)
            .await
    }

    /// `createServer` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn create_server_with_body(
        &self,
        headers: &RequestHeaders,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<CreateServerResponse>, ApiClientError> {
        self.client
            .call(&CREATE_SERVER, headers, Some(body), options)
            .await
    }

    /// `getServer`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn get_server(
        &self,
        params: &ServerParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<GetServerResponse>, ApiClientError> {
        self.client.call(&GET_SERVER, params, None, options).await
    }

    /// `updateServer` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, the request cannot be built or sent,
    /// or a declared payload cannot be decoded.
    pub async fn update_server(
        &self,
        params: &ServerParams,
        body: &ServerPatch,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<UpdateServerResponse>, ApiClientError> {
        self.update_server_with_body(params, CallBody::json(body)?, options)
            .await
    }

    /// `updateServer` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn update_server_with_body(
        &self,
        params: &ServerParams,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<UpdateServerResponse>, ApiClientError> {
        self.client
            .call(&UPDATE_SERVER, params, Some(body), options)
            .await
    }

    /// `deleteServer`; a `204` comes back as an envelope without payload.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn delete_server(
        &self,
        params: &ServerParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<DeleteServerResponse>, ApiClientError> {
        self.client.call(&DELETE_SERVER, params, None, options).await
    }

    /// `listServerVolumes`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn list_server_volumes(
        &self,
        params: &ListServerVolumesParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<ListServerVolumesResponse>, ApiClientError> {
        self.client
            .call(&LIST_SERVER_VOLUMES, params, None, options)
            .await
    }

    /// `attachVolume`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn attach_volume(
        &self,
        params: &AttachmentParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<AttachVolumeResponse>, ApiClientError> {
        self.client.call(&ATTACH_VOLUME, params, None, options).await
    }

    /// `detachVolume`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn detach_volume(
        &self,
        params: &AttachmentParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<DetachVolumeResponse>, ApiClientError> {
        self.client.call(&DETACH_VOLUME, params, None, options).await
    }

    /// `listVolumes`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn list_volumes(
        &self,
        params: &ListVolumesParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<ListVolumesResponse>, ApiClientError> {
        self.client.call(&LIST_VOLUMES, params, None, options).await
    }

    /// `createVolume` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, the request cannot be built or sent,
    /// or a declared payload cannot be decoded.
    pub async fn create_volume(
        &self,
        headers: &RequestHeaders,
        body: &NewVolume,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<CreateVolumeResponse>, ApiClientError> {
        self.create_volume_with_body(headers, CallBody::json(body)?, options)
            .await
    }

    /// `createVolume` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn create_volume_with_body(
        &self,
        headers: &RequestHeaders,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<CreateVolumeResponse>, ApiClientError> {
        self.client
            .call(&CREATE_VOLUME, headers, Some(body), options)
            .await
    }

    /// `getVolume`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn get_volume(
        &self,
        params: &VolumeParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<GetVolumeResponse>, ApiClientError> {
        self.client.call(&GET_VOLUME, params, None, options).await
    }

    /// `listImages`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn list_images(
        &self,
        params: &ListImagesParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<ListImagesResponse>, ApiClientError> {
        self.client.call(&LIST_IMAGES, params, None, options).await
    }

    /// `uploadImage`; the body carries the disk format as its content type.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn upload_image_with_body(
        &self,
        params: &UploadImageParams,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<UploadImageResponse>, ApiClientError> {
        self.client
            .call(&UPLOAD_IMAGE, params, Some(body), options)
            .await
    }

    /// `getImage`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn get_image(
        &self,
        params: &ImageParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<GetImageResponse>, ApiClientError> {
        self.client.call(&GET_IMAGE, params, None, options).await
    }

    /// `listSshKeys`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn list_ssh_keys(
        &self,
        params: &ListSshKeysParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<ListSshKeysResponse>, ApiClientError> {
        self.client.call(&LIST_SSH_KEYS, params, None, options).await
    }

    /// `createSshKey` with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be marshaled, the request cannot be built or sent,
    /// or a declared payload cannot be decoded.
    pub async fn create_ssh_key(
        &self,
        headers: &RequestHeaders,
        body: &NewSshKey,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<CreateSshKeyResponse>, ApiClientError> {
        self.create_ssh_key_with_body(headers, CallBody::json(body)?, options)
            .await
    }

    /// `createSshKey` with any body.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn create_ssh_key_with_body(
        &self,
        headers: &RequestHeaders,
        body: CallBody,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<CreateSshKeyResponse>, ApiClientError> {
        self.client
            .call(&CREATE_SSH_KEY, headers, Some(body), options)
            .await
    }

    /// `deleteSshKey`
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be built or sent, or a declared payload cannot be decoded.
    pub async fn delete_ssh_key(
        &self,
        params: &SshKeyParams,
        options: &CallOptions,
    ) -> Result<ResponseEnvelope<DeleteSshKeyResponse>, ApiClientError> {
        self.client.call(&DELETE_SSH_KEY, params, None, options).await
    }
}

impl From<ApiClient> for ComputeResponsesClient {
    fn from(client: ApiClient) -> Self {
        Self::new(client)
    }
}

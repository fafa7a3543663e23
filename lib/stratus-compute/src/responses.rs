//! Typed responses of the compute operations.
//!
//! One enum per operation, one variant per declared `(status, JSON)` pair. A
//! response that matches no variant is still returned, untyped, inside the
//! [`ResponseEnvelope`](stratus_core::ResponseEnvelope).

use crate::models::{
    Attachment, ErrorBody, Image, ImagePage, Server, ServerPage, SshKey, SshKeyPage,
    UnsupportedMediaTypeBody, Volume, VolumePage,
};

/// Response of `listServers`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListServersResponse {
    /// 200
    Ok(ServerPage),
    /// 400
    BadRequest(ErrorBody),
}

/// Response of `createServer`.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateServerResponse {
    /// 201
    Created(Server),
    /// 400
    BadRequest(ErrorBody),
    /// 415
    UnsupportedMediaType(UnsupportedMediaTypeBody),
}

/// Response of `getServer`.
#[derive(Debug, Clone, PartialEq)]
pub enum GetServerResponse {
    /// 200
    Ok(Server),
    /// 404
    NotFound(ErrorBody),
}

/// Response of `updateServer`.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateServerResponse {
    /// 200
    Ok(Server),
    /// 404
    NotFound(ErrorBody),
}

/// Response of `deleteServer`; success is an untyped `204`.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteServerResponse {
    /// 404
    NotFound(ErrorBody),
}

/// Response of `listServerVolumes`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListServerVolumesResponse {
    /// 200
    Ok(VolumePage),
    /// 404
    NotFound(ErrorBody),
}

/// Response of `attachVolume`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachVolumeResponse {
    /// 200
    Ok(Attachment),
    /// 404
    NotFound(ErrorBody),
    /// 409, the volume is attached elsewhere.
    Conflict(ErrorBody),
}

/// Response of `detachVolume`; success is an untyped `204`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetachVolumeResponse {
    /// 404
    NotFound(ErrorBody),
}

/// Response of `listVolumes`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListVolumesResponse {
    /// 200
    Ok(VolumePage),
    /// 400
    BadRequest(ErrorBody),
}

/// Response of `createVolume`.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateVolumeResponse {
    /// 201
    Created(Volume),
    /// 400
    BadRequest(ErrorBody),
    /// 415
    UnsupportedMediaType(UnsupportedMediaTypeBody),
}

/// Response of `getVolume`.
#[derive(Debug, Clone, PartialEq)]
pub enum GetVolumeResponse {
    /// 200
    Ok(Volume),
    /// 404
    NotFound(ErrorBody),
}

/// Response of `listImages`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListImagesResponse {
    /// 200
    Ok(ImagePage),
    /// 400
    BadRequest(ErrorBody),
}

/// Response of `uploadImage`.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadImageResponse {
    /// 201
    Created(Image),
    /// 400
    BadRequest(ErrorBody),
    /// 415, the disk format is not accepted.
    UnsupportedMediaType(UnsupportedMediaTypeBody),
}

/// Response of `getImage`.
#[derive(Debug, Clone, PartialEq)]
pub enum GetImageResponse {
    /// 200
    Ok(Image),
    /// 404
    NotFound(ErrorBody),
}

/// Response of `listSshKeys`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListSshKeysResponse {
    /// 200
    Ok(SshKeyPage),
}

/// Response of `createSshKey`.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateSshKeyResponse {
    /// 201
    Created(SshKey),
    /// 400
    BadRequest(ErrorBody),
    /// 415
    UnsupportedMediaType(UnsupportedMediaTypeBody),
}

/// Response of `deleteSshKey`; success is an untyped `204`.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteSshKeyResponse {
    /// 404
    NotFound(ErrorBody),
}

//! Descriptor table of the compute API.

use http::Method;
use stratus_core::{BodyEncoding, MediaMatch, OperationDescriptor, ParamSpec, ResponseCase, from_json};

use crate::responses::{
    AttachVolumeResponse, CreateServerResponse, CreateSshKeyResponse, CreateVolumeResponse,
    DeleteServerResponse, DeleteSshKeyResponse, DetachVolumeResponse, GetImageResponse,
    GetServerResponse, GetVolumeResponse, ListImagesResponse, ListServerVolumesResponse,
    ListServersResponse, ListSshKeysResponse, ListVolumesResponse, UpdateServerResponse,
    UploadImageResponse,
};

/// A JSON response case decoding into a tuple variant.
macro_rules! json_case {
    ($status:literal => $variant:path) => {
        ResponseCase {
            status: $status,
            media: MediaMatch::Json,
            decode: |body| from_json(body).map($variant),
        }
    };
}

const HEADERS: &[ParamSpec] = &[
    ParamSpec::header("x-request-id"),
    ParamSpec::optional_header("x-trace-id"),
];

const SERVER_ID: &[ParamSpec] = &[ParamSpec::path("serverId")];

const PAGE: &[ParamSpec] = &[
    ParamSpec::query("page"),
    ParamSpec::query("size"),
    ParamSpec::query("orderBy"),
];

/// `GET /v1/servers`
pub static LIST_SERVERS: OperationDescriptor<ListServersResponse> = OperationDescriptor {
    id: "listServers",
    method: Method::GET,
    path: "/v1/servers",
    path_params: &[],
    query_params: &[
        ParamSpec::query("page"),
        ParamSpec::query("size"),
        ParamSpec::query("orderBy"),
        ParamSpec::query("name"),
        ParamSpec::query("status"),
        ParamSpec::query("tags"),
    ],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[
        json_case!(200 => ListServersResponse::Ok),
        json_case!(400 => ListServersResponse::BadRequest),
    ],
};

/// `POST /v1/servers`
pub static CREATE_SERVER: OperationDescriptor<CreateServerResponse> = OperationDescriptor {
    id: "createServer",
    method: Method::POST,
    path: "/v1/servers",
    path_params: &[],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::Json,
    responses: &[
        json_case!(201 => CreateServerResponse::Created),
        json_case!(400 => CreateServerResponse::BadRequest),
        json_case!(415 => CreateServerResponse::UnsupportedMediaType),
    ],
};

/// `GET /v1/servers/{serverId}`
pub static GET_SERVER: OperationDescriptor<GetServerResponse> = OperationDescriptor {
    id: "getServer",
    method: Method::GET,
    path: "/v1/servers/{serverId}",
    path_params: SERVER_ID,
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[
        json_case!(200 => GetServerResponse::Ok),
        json_case!(404 => GetServerResponse::NotFound),
    ],
};

/// `PATCH /v1/servers/{serverId}`
pub static UPDATE_SERVER: OperationDescriptor<UpdateServerResponse> = OperationDescriptor {
    id: "updateServer",
    method: Method::PATCH,
    path: "/v1/servers/{serverId}",
    path_params: SERVER_ID,
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::Json,
    responses: &[
        json_case!(200 => UpdateServerResponse::Ok),
        json_case!(404 => UpdateServerResponse::NotFound),
    ],
};

/// `DELETE /v1/servers/{serverId}`
pub static DELETE_SERVER: OperationDescriptor<DeleteServerResponse> = OperationDescriptor {
    id: "deleteServer",
    method: Method::DELETE,
    path: "/v1/servers/{serverId}",
    path_params: SERVER_ID,
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[json_case!(404 => DeleteServerResponse::NotFound)],
};

/// `GET /v1/servers/{serverId}/volumes`
pub static LIST_SERVER_VOLUMES: OperationDescriptor<ListServerVolumesResponse> =
    OperationDescriptor {
        id: "listServerVolumes",
        method: Method::GET,
        path: "/v1/servers/{serverId}/volumes",
        path_params: SERVER_ID,
        query_params: PAGE,
        header_params: HEADERS,
        body: BodyEncoding::None,
        responses: &[
            json_case!(200 => ListServerVolumesResponse::Ok),
            json_case!(404 => ListServerVolumesResponse::NotFound),
        ],
    };

/// `PUT /v1/servers/{serverId}/volumes/{volumeId}`
pub static ATTACH_VOLUME: OperationDescriptor<AttachVolumeResponse> = OperationDescriptor {
    id: "attachVolume",
    method: Method::PUT,
    path: "/v1/servers/{serverId}/volumes/{volumeId}",
    path_params: &[ParamSpec::path("serverId"), ParamSpec::path("volumeId")],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[
        json_case!(200 => AttachVolumeResponse::Ok),
        json_case!(404 => AttachVolumeResponse::NotFound),
        json_case!(409 => AttachVolumeResponse::Conflict),
    ],
};

/// `DELETE /v1/servers/{serverId}/volumes/{volumeId}`
pub static DETACH_VOLUME: OperationDescriptor<DetachVolumeResponse> = OperationDescriptor {
    id: "detachVolume",
    method: Method::DELETE,
    path: "/v1/servers/{serverId}/volumes/{volumeId}",
    path_params: &[ParamSpec::path("serverId"), ParamSpec::path("volumeId")],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[json_case!(404 => DetachVolumeResponse::NotFound)],
};

/// `GET /v1/volumes`
pub static LIST_VOLUMES: OperationDescriptor<ListVolumesResponse> = OperationDescriptor {
    id: "listVolumes",
    method: Method::GET,
    path: "/v1/volumes",
    path_params: &[],
    query_params: &[
        ParamSpec::query("page"),
        ParamSpec::query("size"),
        ParamSpec::query("orderBy"),
        ParamSpec::query("name"),
        ParamSpec::query("attached"),
    ],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[
        json_case!(200 => ListVolumesResponse::Ok),
        json_case!(400 => ListVolumesResponse::BadRequest),
    ],
};

/// `POST /v1/volumes`
pub static CREATE_VOLUME: OperationDescriptor<CreateVolumeResponse> = OperationDescriptor {
    id: "createVolume",
    method: Method::POST,
    path: "/v1/volumes",
    path_params: &[],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::Json,
    responses: &[
        json_case!(201 => CreateVolumeResponse::Created),
        json_case!(400 => CreateVolumeResponse::BadRequest),
        json_case!(415 => CreateVolumeResponse::UnsupportedMediaType),
    ],
};

/// `GET /v1/volumes/{volumeId}`
pub static GET_VOLUME: OperationDescriptor<GetVolumeResponse> = OperationDescriptor {
    id: "getVolume",
    method: Method::GET,
    path: "/v1/volumes/{volumeId}",
    path_params: &[ParamSpec::path("volumeId")],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[
        json_case!(200 => GetVolumeResponse::Ok),
        json_case!(404 => GetVolumeResponse::NotFound),
    ],
};

/// `GET /v1/images`
pub static LIST_IMAGES: OperationDescriptor<ListImagesResponse> = OperationDescriptor {
    id: "listImages",
    method: Method::GET,
    path: "/v1/images",
    path_params: &[],
    query_params: &[
        ParamSpec::query("page"),
        ParamSpec::query("size"),
        ParamSpec::query("orderBy"),
        ParamSpec::query("name"),
        ParamSpec::query("os"),
        ParamSpec::query("tags"),
    ],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[
        json_case!(200 => ListImagesResponse::Ok),
        json_case!(400 => ListImagesResponse::BadRequest),
    ],
};

/// `POST /v1/images`, the body is the disk content with the caller's content type.
pub static UPLOAD_IMAGE: OperationDescriptor<UploadImageResponse> = OperationDescriptor {
    id: "uploadImage",
    method: Method::POST,
    path: "/v1/images",
    path_params: &[],
    query_params: &[
        ParamSpec::required_query("name"),
        ParamSpec::required_query("os"),
        ParamSpec::query("tags"),
    ],
    header_params: HEADERS,
    body: BodyEncoding::Any,
    responses: &[
        json_case!(201 => UploadImageResponse::Created),
        json_case!(400 => UploadImageResponse::BadRequest),
        json_case!(415 => UploadImageResponse::UnsupportedMediaType),
    ],
};

/// `GET /v1/images/{imageId}`
pub static GET_IMAGE: OperationDescriptor<GetImageResponse> = OperationDescriptor {
    id: "getImage",
    method: Method::GET,
    path: "/v1/images/{imageId}",
    path_params: &[ParamSpec::path("imageId")],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[
        json_case!(200 => GetImageResponse::Ok),
        json_case!(404 => GetImageResponse::NotFound),
    ],
};

/// `GET /v1/ssh-keys`
pub static LIST_SSH_KEYS: OperationDescriptor<ListSshKeysResponse> = OperationDescriptor {
    id: "listSshKeys",
    method: Method::GET,
    path: "/v1/ssh-keys",
    path_params: &[],
    query_params: PAGE,
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[json_case!(200 => ListSshKeysResponse::Ok)],
};

/// `POST /v1/ssh-keys`
pub static CREATE_SSH_KEY: OperationDescriptor<CreateSshKeyResponse> = OperationDescriptor {
    id: "createSshKey",
    method: Method::POST,
    path: "/v1/ssh-keys",
    path_params: &[],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::Json,
    responses: &[
        json_case!(201 => CreateSshKeyResponse::Created),
        json_case!(400 => CreateSshKeyResponse::BadRequest),
        json_case!(415 => CreateSshKeyResponse::UnsupportedMediaType),
    ],
};

/// `DELETE /v1/ssh-keys/{keyId}`
pub static DELETE_SSH_KEY: OperationDescriptor<DeleteSshKeyResponse> = OperationDescriptor {
    id: "deleteSshKey",
    method: Method::DELETE,
    path: "/v1/ssh-keys/{keyId}",
    path_params: &[ParamSpec::path("keyId")],
    query_params: &[],
    header_params: HEADERS,
    body: BodyEncoding::None,
    responses: &[json_case!(404 => DeleteSshKeyResponse::NotFound)],
};

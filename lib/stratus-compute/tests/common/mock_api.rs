//! In-memory compute API served by axum.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::debug;

use stratus_compute::{
    Attachment, ErrorBody, Image, ImagePage, NewServer, NewSshKey, NewVolume, PageInfo, Server,
    ServerPage, ServerPatch, ServerStatus, SshKey, SshKeyPage, UnsupportedMediaTypeBody, Volume,
    VolumePage,
};

const DISK_FORMATS: &[&str] = &["application/octet-stream", "application/x-qemu-disk"];
const MAX_PAGE_SIZE: u32 = 100;

type QueryPairs = Query<Vec<(String, String)>>;
type ApiResult<T> = Result<(StatusCode, Json<T>), Response>;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    servers: BTreeMap<i64, Server>,
    volumes: BTreeMap<i64, Volume>,
    images: BTreeMap<String, Image>,
    keys: BTreeMap<String, SshKey>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockState(Arc<Mutex<Store>>);

impl MockState {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.0.lock().expect("store not poisoned")
    }
}

pub fn router(state: MockState) -> Router {
    let api = Router::new()
        .route("/v1/servers", get(list_servers).post(create_server))
        .route(
            "/v1/servers/{server_id}",
            get(get_server).patch(update_server).delete(delete_server),
        )
        .route("/v1/servers/{server_id}/volumes", get(list_server_volumes))
        .route(
            "/v1/servers/{server_id}/volumes/{volume_id}",
            put(attach_volume).delete(detach_volume),
        )
        .route("/v1/volumes", get(list_volumes).post(create_volume))
        .route("/v1/volumes/{volume_id}", get(get_volume))
        .route("/v1/images", get(list_images).post(upload_image))
        .route("/v1/images/{image_id}", get(get_image))
        .route("/v1/ssh-keys", get(list_ssh_keys).post(create_ssh_key))
        .route("/v1/ssh-keys/{key_id}", delete(delete_ssh_key))
        .layer(middleware::from_fn(correlation))
        .with_state(state);

    Router::new().nest("/api", api)
}

/// Checks and echoes the correlation headers.
///
/// Request ids starting with `fault-` get a plain text 500, `slow-` ones are delayed.
async fn correlation(request: Request, next: Next) -> Response {
    let Some(request_id) = request.headers().get("x-request-id").cloned() else {
        return error(
            StatusCode::BAD_REQUEST,
            "missing_request_id",
            "x-request-id is required",
        );
    };
    let trace_id = request.headers().get("x-trace-id").cloned();
    debug!(?request_id, method = %request.method(), uri = %request.uri(), "mock api");

    if request_id.as_bytes().starts_with(b"fault-") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain")],
            "upstream unavailable",
        )
            .into_response();
    }
    if request_id.as_bytes().starts_with(b"slow-") {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert("x-request-id", request_id);
    if let Some(trace_id) = trace_id {
        response.headers_mut().insert("x-trace-id", trace_id);
    }
    response
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = ErrorBody {
        code: code.to_string(),
        message: message.to_string(),
        request_id: None,
    };
    (status, Json(body)).into_response()
}

fn not_found(kind: &str, id: impl Display) -> Response {
    error(
        StatusCode::NOT_FOUND,
        &format!("{kind}_not_found"),
        &format!("no {kind} {id}"),
    )
}

fn unsupported_media_type(supported: &[&str]) -> Response {
    let body = UnsupportedMediaTypeBody {
        message: "unsupported content type".to_string(),
        supported: supported.iter().map(ToString::to_string).collect(),
    };
    (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(body)).into_response()
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn json_body<T: DeserializeOwned>(headers: &HeaderMap, body: &[u8]) -> Result<T, Response> {
    if !content_type(headers).starts_with("application/json") {
        return Err(unsupported_media_type(&["application/json"]));
    }
    serde_json::from_slice(body)
        .map_err(|err| error(StatusCode::BAD_REQUEST, "invalid_body", &err.to_string()))
}

fn values<'a>(query: &'a [(String, String)], key: &'a str) -> impl Iterator<Item = &'a str> {
    query
        .iter()
        .filter(move |(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

fn first<'a>(query: &'a [(String, String)], key: &'a str) -> Option<&'a str> {
    values(query, key).next()
}

fn paginate<T>(items: Vec<T>, query: &[(String, String)]) -> Result<(Vec<T>, PageInfo), Response> {
    let parse = |key: &str, default: u32| {
        first(query, key).map_or(Ok(default), |value| {
            value.parse::<u32>().map_err(|_| {
                error(
                    StatusCode::BAD_REQUEST,
                    "invalid_query",
                    &format!("{key} must be a positive integer"),
                )
            })
        })
    };
    let page = parse("page", 1)?.max(1);
    let size = parse("size", 20)?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "invalid_page_size",
            &format!("size must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }

    let total = items.len() as u64;
    let skip = ((page - 1) * size) as usize;
    let data = items.into_iter().skip(skip).take(size as usize).collect();
    Ok((data, PageInfo { page, size, total }))
}

fn status_name(status: ServerStatus) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

async fn list_servers(
    State(state): State<MockState>,
    Query(query): QueryPairs,
) -> ApiResult<ServerPage> {
    let statuses: Vec<_> = values(&query, "status").collect();
    let tags: Vec<_> = values(&query, "tags").collect();
    let name = first(&query, "name");

    let servers: Vec<_> = state
        .store()
        .servers
        .values()
        .filter(|server| name.is_none_or(|name| server.name == name))
        .filter(|server| {
            statuses.is_empty() || statuses.contains(&status_name(server.status).as_str())
        })
        .filter(|server| tags.iter().all(|tag| server.tags.iter().any(|it| it == tag)))
        .cloned()
        .collect();

    let (data, page) = paginate(servers, &query)?;
    Ok((StatusCode::OK, Json(ServerPage { data, page })))
}

async fn create_server(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Server> {
    let new_server: NewServer = json_body(&headers, &body)?;
    if new_server.name.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "invalid_name", "name is required"));
    }

    let mut store = state.store();
    let id = store.next_id();
    let server = Server {
        id,
        name: new_server.name,
        flavor: new_server.flavor,
        image_id: new_server.image_id,
        status: ServerStatus::Provisioning,
        tags: new_server.tags,
        created_at: Utc::now(),
    };
    store.servers.insert(id, server.clone());
    Ok((StatusCode::CREATED, Json(server)))
}

async fn get_server(
    State(state): State<MockState>,
    Path(server_id): Path<i64>,
) -> ApiResult<Server> {
    let store = state.store();
    let server = store
        .servers
        .get(&server_id)
        .cloned()
        .ok_or_else(|| not_found("server", server_id))?;
    Ok((StatusCode::OK, Json(server)))
}

async fn update_server(
    State(state): State<MockState>,
    Path(server_id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Server> {
    let patch: ServerPatch = json_body(&headers, &body)?;

    let mut store = state.store();
    let server = store
        .servers
        .get_mut(&server_id)
        .ok_or_else(|| not_found("server", server_id))?;
    if let Some(name) = patch.name {
        server.name = name;
    }
    if let Some(tags) = patch.tags {
        server.tags = tags;
    }
    Ok((StatusCode::OK, Json(server.clone())))
}

async fn delete_server(
    State(state): State<MockState>,
    Path(server_id): Path<i64>,
) -> Result<StatusCode, Response> {
    let mut store = state.store();
    store
        .servers
        .remove(&server_id)
        .ok_or_else(|| not_found("server", server_id))?;
    for volume in store.volumes.values_mut() {
        if volume.server_id == Some(server_id) {
            volume.server_id = None;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_server_volumes(
    State(state): State<MockState>,
    Path(server_id): Path<i64>,
    Query(query): QueryPairs,
) -> ApiResult<VolumePage> {
    let volumes: Vec<_> = {
        let store = state.store();
        if !store.servers.contains_key(&server_id) {
            return Err(not_found("server", server_id));
        }
        store
            .volumes
            .values()
            .filter(|volume| volume.server_id == Some(server_id))
            .cloned()
            .collect()
    };

    let (data, page) = paginate(volumes, &query)?;
    Ok((StatusCode::OK, Json(VolumePage { data, page })))
}

async fn attach_volume(
    State(state): State<MockState>,
    Path((server_id, volume_id)): Path<(i64, i64)>,
) -> ApiResult<Attachment> {
    let mut store = state.store();
    if !store.servers.contains_key(&server_id) {
        return Err(not_found("server", server_id));
    }
    let volume = store
        .volumes
        .get_mut(&volume_id)
        .ok_or_else(|| not_found("volume", volume_id))?;
    if let Some(other) = volume.server_id.filter(|other| *other != server_id) {
        return Err(error(
            StatusCode::CONFLICT,
            "volume_attached",
            &format!("volume {volume_id} is attached to server {other}"),
        ));
    }

    volume.server_id = Some(server_id);
    let attachment = Attachment {
        server_id,
        volume_id,
        device: "/dev/vdb".to_string(),
        attached_at: Utc::now(),
    };
    Ok((StatusCode::OK, Json(attachment)))
}

async fn detach_volume(
    State(state): State<MockState>,
    Path((server_id, volume_id)): Path<(i64, i64)>,
) -> Result<StatusCode, Response> {
    let mut store = state.store();
    let volume = store
        .volumes
        .get_mut(&volume_id)
        .filter(|volume| volume.server_id == Some(server_id))
        .ok_or_else(|| not_found("attachment", format!("{server_id}/{volume_id}")))?;
    volume.server_id = None;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_volumes(
    State(state): State<MockState>,
    Query(query): QueryPairs,
) -> ApiResult<VolumePage> {
    let name = first(&query, "name");
    let attached = match first(&query, "attached") {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => {
            return Err(error(
                StatusCode::BAD_REQUEST,
                "invalid_query",
                &format!("attached must be a boolean, got {other}"),
            ));
        }
    };

    let volumes: Vec<_> = state
        .store()
        .volumes
        .values()
        .filter(|volume| name.is_none_or(|name| volume.name == name))
        .filter(|volume| attached.is_none_or(|attached| volume.server_id.is_some() == attached))
        .cloned()
        .collect();

    let (data, page) = paginate(volumes, &query)?;
    Ok((StatusCode::OK, Json(VolumePage { data, page })))
}

async fn create_volume(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Volume> {
    let new_volume: NewVolume = json_body(&headers, &body)?;
    if new_volume.size_gb == 0 {
        return Err(error(StatusCode::BAD_REQUEST, "invalid_size", "sizeGb must be positive"));
    }

    let mut store = state.store();
    let id = store.next_id();
    let volume = Volume {
        id,
        name: new_volume.name,
        size_gb: new_volume.size_gb,
        server_id: None,
        created_at: Utc::now(),
    };
    store.volumes.insert(id, volume.clone());
    Ok((StatusCode::CREATED, Json(volume)))
}

async fn get_volume(
    State(state): State<MockState>,
    Path(volume_id): Path<i64>,
) -> ApiResult<Volume> {
    let store = state.store();
    let volume = store
        .volumes
        .get(&volume_id)
        .cloned()
        .ok_or_else(|| not_found("volume", volume_id))?;
    Ok((StatusCode::OK, Json(volume)))
}

async fn list_images(
    State(state): State<MockState>,
    Query(query): QueryPairs,
) -> ApiResult<ImagePage> {
    let name = first(&query, "name");
    let os = first(&query, "os");
    let tags: Vec<_> = values(&query, "tags").collect();

    let images: Vec<_> = state
        .store()
        .images
        .values()
        .filter(|image| name.is_none_or(|name| image.name == name))
        .filter(|image| os.is_none_or(|os| image.os == os))
        .filter(|image| tags.iter().all(|tag| image.tags.iter().any(|it| it == tag)))
        .cloned()
        .collect();

    let (data, page) = paginate(images, &query)?;
    Ok((StatusCode::OK, Json(ImagePage { data, page })))
}

async fn upload_image(
    State(state): State<MockState>,
    Query(query): QueryPairs,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Image> {
    let content_type = content_type(&headers);
    if !DISK_FORMATS.contains(&content_type) {
        return Err(unsupported_media_type(DISK_FORMATS));
    }
    let (Some(name), Some(os)) = (first(&query, "name"), first(&query, "os")) else {
        return Err(error(StatusCode::BAD_REQUEST, "invalid_query", "name and os are required"));
    };
    if body.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "empty_image", "image content is empty"));
    }

    let mut store = state.store();
    let id = format!("img-{}", store.next_id());
    let image = Image {
        id: id.clone(),
        name: name.to_string(),
        os: os.to_string(),
        size_bytes: body.len() as u64,
        tags: values(&query, "tags").map(str::to_string).collect(),
        created_at: Utc::now(),
    };
    store.images.insert(id, image.clone());
    Ok((StatusCode::CREATED, Json(image)))
}

async fn get_image(
    State(state): State<MockState>,
    Path(image_id): Path<String>,
) -> ApiResult<Image> {
    let store = state.store();
    let image = store
        .images
        .get(&image_id)
        .cloned()
        .ok_or_else(|| not_found("image", &image_id))?;
    Ok((StatusCode::OK, Json(image)))
}

async fn list_ssh_keys(
    State(state): State<MockState>,
    Query(query): QueryPairs,
) -> ApiResult<SshKeyPage> {
    let keys: Vec<_> = state.store().keys.values().cloned().collect();

    let (data, page) = paginate(keys, &query)?;
    Ok((StatusCode::OK, Json(SshKeyPage { data, page })))
}

async fn create_ssh_key(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<SshKey> {
    let new_key: NewSshKey = json_body(&headers, &body)?;
    if !new_key.public_key.starts_with("ssh-") {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "invalid_public_key",
            "not an OpenSSH public key",
        ));
    }

    let mut store = state.store();
    let id = format!("key-{}", new_key.name);
    if store.keys.contains_key(&id) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "duplicate_key",
            &format!("a key named {} exists", new_key.name),
        ));
    }
    let key = SshKey {
        id: id.clone(),
        name: new_key.name,
        fingerprint: format!("SHA256:{:08x}", new_key.public_key.len()),
        public_key: new_key.public_key,
        created_at: Utc::now(),
    };
    store.keys.insert(id, key.clone());
    Ok((StatusCode::CREATED, Json(key)))
}

async fn delete_ssh_key(
    State(state): State<MockState>,
    Path(key_id): Path<String>,
) -> Result<StatusCode, Response> {
    state
        .store()
        .keys
        .remove(&key_id)
        .ok_or_else(|| not_found("ssh_key", &key_id))?;
    Ok(StatusCode::NO_CONTENT)
}

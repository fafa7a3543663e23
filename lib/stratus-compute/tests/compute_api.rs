#![allow(missing_docs, clippy::indexing_slicing)]

use headers::ContentType;
use rstest::rstest;
use tracing::info;

use stratus_compute::{
    AttachVolumeResponse, AttachmentParams, CreateServerResponse, CreateSshKeyResponse,
    CreateVolumeResponse, DeleteServerResponse, DeleteSshKeyResponse, DetachVolumeResponse,
    ErrorBody, GetImageResponse, GetServerResponse, ImageParams, ListServerVolumesParams,
    ListServerVolumesResponse, ListServersParams, ListServersResponse, ListSshKeysParams,
    ListSshKeysResponse, ListVolumesParams, ListVolumesResponse, NewServer, NewSshKey, NewVolume,
    PageParams, RequestHeaders, Server, ServerParams, ServerPatch, ServerStatus, SshKeyParams,
    UpdateServerResponse, UploadImageParams, UploadImageResponse, Volume,
};
use stratus_core::{CallBody, CallOptions};

mod common;
pub use self::common::*;

fn new_server(name: &str) -> NewServer {
    NewServer {
        name: name.to_string(),
        flavor: "s1.small".to_string(),
        image_id: "debian-12".to_string(),
        tags: vec!["web".to_string()],
        ssh_key_ids: vec![],
    }
}

async fn create_server(app: &TestApp, name: &str) -> anyhow::Result<Server> {
    let envelope = app
        .compute
        .create_server(
            &RequestHeaders::new(format!("create-{name}")),
            &new_server(name),
            &CallOptions::default(),
        )
        .await?;
    match envelope.into_payload() {
        Some(CreateServerResponse::Created(server)) => Ok(server),
        other => anyhow::bail!("expected a created server, got {other:?}"),
    }
}

async fn create_volume(app: &TestApp, name: &str) -> anyhow::Result<Volume> {
    let body = NewVolume {
        name: name.to_string(),
        size_gb: 20,
    };
    let envelope = app
        .compute
        .create_volume(
            &RequestHeaders::new(format!("create-{name}")),
            &body,
            &CallOptions::default(),
        )
        .await?;
    match envelope.into_payload() {
        Some(CreateVolumeResponse::Created(volume)) => Ok(volume),
        other => anyhow::bail!("expected a created volume, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn should_manage_server_lifecycle(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let options = CallOptions::default();

    let created = create_server(&app, "web-1").await?;
    assert_eq!(created.name, "web-1");
    assert_eq!(created.status, ServerStatus::Provisioning);

    let params = ServerParams::new(RequestHeaders::new("get-1"), created.id);
    let envelope = app.compute.get_server(&params, &options).await?;
    assert_eq!(envelope.status(), 200);
    assert_eq!(envelope.payload(), Some(&GetServerResponse::Ok(created.clone())));

    let patch = ServerPatch {
        name: Some("web-renamed".to_string()),
        ..Default::default()
    };
    let envelope = app.compute.update_server(&params, &patch, &options).await?;
    let Some(UpdateServerResponse::Ok(updated)) = envelope.into_payload() else {
        anyhow::bail!("expected the updated server");
    };
    assert_eq!(updated.name, "web-renamed");
    assert_eq!(updated.tags, created.tags);

    let envelope = app.compute.delete_server(&params, &options).await?;
    info!(status = %envelope.status(), "server deleted");
    assert_eq!(envelope.status(), 204);
    assert!(!envelope.is_typed());
    assert!(envelope.body().is_empty());

    let envelope = app.compute.get_server(&params, &options).await?;
    assert_eq!(envelope.status(), 404);
    let Some(GetServerResponse::NotFound(error)) = envelope.payload() else {
        anyhow::bail!("expected a typed 404, got {envelope:?}");
    };
    assert_eq!(error.code, "server_not_found");

    let envelope = app.compute.delete_server(&params, &options).await?;
    assert!(matches!(
        envelope.payload(),
        Some(DeleteServerResponse::NotFound(_))
    ));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_list_servers_with_pagination(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    for name in ["alpha", "beta", "gamma"] {
        create_server(&app, name).await?;
    }

    let params = ListServersParams {
        page: PageParams::new(1, 2),
        ..ListServersParams::new(RequestHeaders::new("list-1"))
    };
    let envelope = app
        .compute
        .list_servers(&params, &CallOptions::default())
        .await?;

    assert_eq!(envelope.url().path(), "/api/v1/servers");
    assert_eq!(envelope.url().query(), Some("page=1&size=2"));
    let request_id = envelope.headers().get("x-request-id");
    assert_eq!(request_id.map(|it| it.to_str()).transpose()?, Some("list-1"));
    assert!(envelope.content_type().is_some_and(|ct| ct.contains("json")));

    let Some(ListServersResponse::Ok(page)) = envelope.payload() else {
        anyhow::bail!("expected a server page, got {envelope:?}");
    };
    let names: Vec<_> = page.data.iter().map(|server| server.name.as_str()).collect();
    assert_eq!(names, ["alpha", "beta"]);
    assert_eq!(page.page.total, 3);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_filter_servers_by_repeated_status(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    create_server(&app, "alpha").await?;
    create_server(&app, "beta").await?;

    let params = ListServersParams {
        status: vec![ServerStatus::Running, ServerStatus::Provisioning],
        ..ListServersParams::new(RequestHeaders::new("list-status"))
    };
    let envelope = app
        .compute
        .list_servers(&params, &CallOptions::default())
        .await?;
    assert_eq!(
        envelope.url().query(),
        Some("status=running&status=provisioning")
    );
    let Some(ListServersResponse::Ok(page)) = envelope.payload() else {
        anyhow::bail!("expected a server page, got {envelope:?}");
    };
    assert_eq!(page.data.len(), 2);

    let params = ListServersParams {
        status: vec![ServerStatus::Stopped],
        ..ListServersParams::new(RequestHeaders::new("list-stopped"))
    };
    let envelope = app
        .compute
        .list_servers(&params, &CallOptions::default())
        .await?;
    let Some(ListServersResponse::Ok(page)) = envelope.payload() else {
        anyhow::bail!("expected a server page, got {envelope:?}");
    };
    assert!(page.data.is_empty());

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_decode_declared_bad_request(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let params = ListServersParams {
        page: PageParams::new(1, 500),
        ..ListServersParams::new(RequestHeaders::new("list-oversized"))
    };
    let envelope = app
        .compute
        .list_servers(&params, &CallOptions::default())
        .await?;

    assert_eq!(envelope.status(), 400);
    let Some(ListServersResponse::BadRequest(error)) = envelope.payload() else {
        anyhow::bail!("expected a typed 400, got {envelope:?}");
    };
    assert_eq!(error.code, "invalid_page_size");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_decode_unsupported_media_type(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let envelope = app
        .compute
        .create_server_with_body(
            &RequestHeaders::new("create-text"),
            CallBody::text("name=web-1"),
            &CallOptions::default(),
        )
        .await?;

    assert_eq!(envelope.status(), 415);
    let Some(CreateServerResponse::UnsupportedMediaType(error)) = envelope.payload() else {
        anyhow::bail!("expected a typed 415, got {envelope:?}");
    };
    assert_eq!(error.supported, ["application/json"]);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_attach_and_detach_volumes(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let options = CallOptions::default();
    let web = create_server(&app, "web").await?;
    let db = create_server(&app, "db").await?;
    let data = create_volume(&app, "data").await?;

    let attach = AttachmentParams {
        headers: RequestHeaders::new("attach-1"),
        server_id: web.id,
        volume_id: data.id,
    };
    let envelope = app.compute.attach_volume(&attach, &options).await?;
    let Some(AttachVolumeResponse::Ok(attachment)) = envelope.payload() else {
        anyhow::bail!("expected an attachment, got {envelope:?}");
    };
    assert_eq!((attachment.server_id, attachment.volume_id), (web.id, data.id));
    assert_eq!(
        envelope.url().path(),
        format!("/api/v1/servers/{}/volumes/{}", web.id, data.id)
    );

    let conflicting = AttachmentParams {
        server_id: db.id,
        ..attach.clone()
    };
    let envelope = app.compute.attach_volume(&conflicting, &options).await?;
    assert_eq!(envelope.status(), 409);
    assert!(matches!(
        envelope.payload(),
        Some(AttachVolumeResponse::Conflict(_))
    ));

    let listing = ListServerVolumesParams {
        headers: RequestHeaders::new("list-volumes"),
        server_id: web.id,
        page: PageParams::default(),
    };
    let envelope = app.compute.list_server_volumes(&listing, &options).await?;
    let Some(ListServerVolumesResponse::Ok(page)) = envelope.payload() else {
        anyhow::bail!("expected a volume page, got {envelope:?}");
    };
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].server_id, Some(web.id));

    let envelope = app.compute.detach_volume(&attach, &options).await?;
    assert_eq!(envelope.status(), 204);
    assert!(!envelope.is_typed());

    let envelope = app.compute.detach_volume(&attach, &options).await?;
    assert!(matches!(
        envelope.payload(),
        Some(DetachVolumeResponse::NotFound(_))
    ));

    let detached = ListVolumesParams {
        attached: Some(false),
        ..ListVolumesParams::new(RequestHeaders::new("list-detached"))
    };
    let envelope = app.compute.list_volumes(&detached, &options).await?;
    assert_eq!(envelope.url().query(), Some("attached=false"));
    let Some(ListVolumesResponse::Ok(page)) = envelope.payload() else {
        anyhow::bail!("expected a volume page, got {envelope:?}");
    };
    assert_eq!(page.data.len(), 1);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_upload_image_with_caller_content_type(
    #[future] app: TestApp,
) -> anyhow::Result<()> {
    let app = app.await;
    let options = CallOptions::default();

    let params = UploadImageParams {
        headers: RequestHeaders::new("upload-1"),
        name: "debian 12".to_string(),
        os: "linux".to_string(),
        tags: vec!["lts".to_string(), "minimal".to_string()],
    };
    let disk = CallBody::with_content_type(
        vec![0x51, 0x46, 0x49, 0xFB],
        "application/x-qemu-disk",
    )?;
    let envelope = app
        .compute
        .upload_image_with_body(&params, disk, &options)
        .await?;

    assert_eq!(
        envelope.url().query(),
        Some("name=debian+12&os=linux&tags=lts&tags=minimal")
    );
    let Some(UploadImageResponse::Created(image)) = envelope.into_payload() else {
        anyhow::bail!("expected a created image");
    };
    assert_eq!(image.size_bytes, 4);
    assert_eq!(image.tags, ["lts", "minimal"]);

    let get = ImageParams {
        headers: RequestHeaders::new("get-image"),
        image_id: image.id.clone(),
    };
    let envelope = app.compute.get_image(&get, &options).await?;
    assert_eq!(envelope.payload(), Some(&GetImageResponse::Ok(image)));

    let envelope = app
        .compute
        .upload_image_with_body(&params, CallBody::text("not a disk"), &options)
        .await?;
    assert_eq!(envelope.status(), 415);
    let Some(UploadImageResponse::UnsupportedMediaType(error)) = envelope.payload() else {
        anyhow::bail!("expected a typed 415, got {envelope:?}");
    };
    assert!(error.supported.iter().any(|it| it == "application/x-qemu-disk"));

    let envelope = app
        .compute
        .upload_image_with_body(
            &params,
            CallBody::raw(Vec::new(), ContentType::octet_stream()),
            &options,
        )
        .await?;
    assert!(matches!(
        envelope.payload(),
        Some(UploadImageResponse::BadRequest(_))
    ));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_escape_reserved_characters_in_path(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let options = CallOptions::default();

    let new_key = NewSshKey {
        name: "ops laptop/2".to_string(),
        public_key: "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOps".to_string(),
    };
    let envelope = app
        .compute
        .create_ssh_key(&RequestHeaders::new("key-1"), &new_key, &options)
        .await?;
    let Some(CreateSshKeyResponse::Created(key)) = envelope.into_payload() else {
        anyhow::bail!("expected a created key");
    };
    assert_eq!(key.id, "key-ops laptop/2");

    let delete = SshKeyParams {
        headers: RequestHeaders::new("key-delete"),
        key_id: key.id.clone(),
    };
    let envelope = app.compute.delete_ssh_key(&delete, &options).await?;
    assert_eq!(envelope.url().path(), "/api/v1/ssh-keys/key-ops%20laptop%2F2");
    assert_eq!(envelope.status(), 204);

    let envelope = app.compute.delete_ssh_key(&delete, &options).await?;
    assert!(matches!(
        envelope.payload(),
        Some(DeleteSshKeyResponse::NotFound(_))
    ));

    let listing = ListSshKeysParams {
        headers: RequestHeaders::new("key-list"),
        page: PageParams::default(),
    };
    let envelope = app.compute.list_ssh_keys(&listing, &options).await?;
    let Some(ListSshKeysResponse::Ok(page)) = envelope.payload() else {
        anyhow::bail!("expected a key page, got {envelope:?}");
    };
    assert!(page.data.is_empty());

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_keep_raw_response_of_raw_client(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let params = ServerParams::new(RequestHeaders::new("raw-get"), 42);
    let response = app
        .raw
        .get_server(&params, &CallOptions::default())
        .await?;

    assert_eq!(response.status(), 404);
    assert_eq!(response.url().as_str(), format!("{}/v1/servers/42", app.base));
    let body = response.bytes().await?;
    let error: ErrorBody = serde_json::from_slice(&body)?;
    assert_eq!(error.code, "server_not_found");

    Ok(())
}

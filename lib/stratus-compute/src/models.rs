//! Resources exchanged with the compute API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Being created.
    Provisioning,
    /// Up and reachable.
    Running,
    /// Powered off.
    Stopped,
    /// Failed, see the server events.
    Error,
}

/// Pagination metadata of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Total number of items.
    pub total: u64,
}

/// A virtual machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Server id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Hardware flavor, e.g. `s1.small`.
    pub flavor: String,
    /// Image the server booted from.
    pub image_id: String,
    /// Current lifecycle state.
    pub status: ServerStatus,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A page of servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPage {
    /// Items of this page.
    pub data: Vec<Server>,
    /// Pagination metadata.
    pub page: PageInfo,
}

/// Server creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServer {
    /// Display name.
    pub name: String,
    /// Hardware flavor.
    pub flavor: String,
    /// Image to boot from.
    pub image_id: String,
    /// Free-form labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// SSH keys installed at first boot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_key_ids: Vec<String>,
}

/// Partial server update; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A block storage volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Volume id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Capacity in GiB.
    pub size_gb: u32,
    /// Server the volume is attached to, if any.
    #[serde(default)]
    pub server_id: Option<i64>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A page of volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePage {
    /// Items of this page.
    pub data: Vec<Volume>,
    /// Pagination metadata.
    pub page: PageInfo,
}

/// Volume creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVolume {
    /// Display name.
    pub name: String,
    /// Capacity in GiB.
    pub size_gb: u32,
}

/// A volume attached to a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Server id.
    pub server_id: i64,
    /// Volume id.
    pub volume_id: i64,
    /// Device path on the server, e.g. `/dev/vdb`.
    pub device: String,
    /// Attachment time.
    pub attached_at: DateTime<Utc>,
}

/// A bootable disk image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Operating system family.
    pub os: String,
    /// Size of the uploaded disk.
    pub size_bytes: u64,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

/// A page of images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePage {
    /// Items of this page.
    pub data: Vec<Image>,
    /// Pagination metadata.
    pub page: PageInfo,
}

/// A registered SSH public key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshKey {
    /// Key id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// SHA256 fingerprint.
    pub fingerprint: String,
    /// OpenSSH public key.
    pub public_key: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// A page of SSH keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKeyPage {
    /// Items of this page.
    pub data: Vec<SshKey>,
    /// Pagination metadata.
    pub page: PageInfo,
}

/// SSH key registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSshKey {
    /// Display name.
    pub name: String,
    /// OpenSSH public key.
    pub public_key: String,
}

/// Error payload of 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine readable code, e.g. `server_not_found`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Echo of the `x-request-id` header.
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Payload of `415 Unsupported Media Type` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedMediaTypeBody {
    /// Human readable message.
    pub message: String,
    /// Accepted content types.
    #[serde(default)]
    pub supported: Vec<String>,
}

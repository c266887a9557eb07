use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// 匿名浏览等无操作者事件使用的系统账号 id
pub const SYSTEM_ACTOR_ID: i32 = 0;

/// 可见范围，按 Private < Workspace < Public 排序
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Private,
    Workspace,
    Public,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStatus {
    #[default]
    Normal,
    Archived,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Per-shortcut social preview override
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenGraphMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: i32,
    pub creator_id: i32,
    pub name: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub visibility: Visibility,
    pub og_metadata: OpenGraphMetadata,
    pub row_status: RowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a shortcut about to be inserted
#[derive(Debug, Clone, Default)]
pub struct NewShortcut {
    pub creator_id: i32,
    pub name: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub visibility: Visibility,
    pub og_metadata: OpenGraphMetadata,
}

/// Partial update: only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutPatch {
    pub name: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub visibility: Option<Visibility>,
    pub og_metadata: Option<OpenGraphMetadata>,
}

impl ShortcutPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i32,
    pub creator_id: i32,
    pub name: String,
    pub title: String,
    pub description: String,
    pub shortcut_ids: Vec<i32>,
    pub visibility: Visibility,
    pub row_status: RowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCollection {
    pub creator_id: i32,
    pub name: String,
    pub title: String,
    pub description: String,
    pub shortcut_ids: Vec<i32>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub shortcut_ids: Option<Vec<i32>>,
    pub visibility: Option<Visibility>,
}

impl CollectionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub role: Role,
    pub row_status: RowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub role: Role,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum ActivityType {
    #[strum(serialize = "shortcut.view")]
    #[serde(rename = "shortcut.view")]
    ShortcutView,
    #[strum(serialize = "shortcut.create")]
    #[serde(rename = "shortcut.create")]
    ShortcutCreate,
    #[strum(serialize = "collection.view")]
    #[serde(rename = "collection.view")]
    CollectionView,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ActivityLevel {
    #[default]
    Info,
    Warn,
    Error,
}

/// Append-only audit record; the payload is JSON whose shape depends on `activity_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub creator_id: i32,
    pub activity_type: ActivityType,
    pub level: ActivityLevel,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub creator_id: i32,
    pub activity_type: ActivityType,
    pub level: ActivityLevel,
    pub payload: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShortcutViewPayload {
    pub shortcut_id: i32,
    pub ip: String,
    pub referer: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShortcutCreatePayload {
    pub shortcut_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionViewPayload {
    pub collection_id: i32,
    pub ip: String,
    pub referer: String,
    pub user_agent: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceSettingKey {
    InstanceUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSetting {
    pub key: WorkspaceSettingKey,
    pub value: String,
}

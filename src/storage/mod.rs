//! Persistence layer
//!
//! Services only talk to the [`Store`] trait; [`SeaOrmStore`] is the
//! SQLite / MySQL / PostgreSQL implementation backed by SeaORM.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::{SeaOrmStore, infer_backend_from_url};
pub use models::*;

/// 短链接查询条件，所有字段为 AND 关系
#[derive(Default, Clone, Debug)]
pub struct FindShortcut {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub creator_id: Option<i32>,
    /// 为空时不按可见性过滤
    pub visibility_list: Vec<Visibility>,
}

#[derive(Default, Clone, Debug)]
pub struct FindCollection {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub creator_id: Option<i32>,
    pub visibility_list: Vec<Visibility>,
}

#[derive(Default, Clone, Debug)]
pub struct FindUser {
    pub id: Option<i32>,
    pub username: Option<String>,
}

/// 活动查询条件
///
/// `shortcut_id` / `collection_id` 匹配的是 payload JSON 里的字段。
#[derive(Default, Clone, Debug)]
pub struct FindActivity {
    pub activity_type: Option<ActivityType>,
    pub level: Option<ActivityLevel>,
    pub shortcut_id: Option<i32>,
    pub collection_id: Option<i32>,
}

#[async_trait]
pub trait Store: Send + Sync {
    fn backend_name(&self) -> &str;

    async fn create_shortcut(&self, new: NewShortcut) -> Result<Shortcut>;
    async fn list_shortcuts(&self, find: &FindShortcut) -> Result<Vec<Shortcut>>;
    async fn get_shortcut(&self, find: &FindShortcut) -> Result<Option<Shortcut>>;
    async fn update_shortcut(&self, id: i32, patch: &ShortcutPatch) -> Result<Shortcut>;
    async fn delete_shortcut(&self, id: i32) -> Result<()>;

    async fn create_collection(&self, new: NewCollection) -> Result<Collection>;
    async fn list_collections(&self, find: &FindCollection) -> Result<Vec<Collection>>;
    async fn get_collection(&self, find: &FindCollection) -> Result<Option<Collection>>;
    async fn update_collection(&self, id: i32, patch: &CollectionPatch) -> Result<Collection>;
    async fn delete_collection(&self, id: i32) -> Result<()>;

    async fn create_user(&self, new: NewUser) -> Result<User>;
    async fn get_user(&self, find: &FindUser) -> Result<Option<User>>;

    async fn create_activity(&self, new: NewActivity) -> Result<Activity>;
    async fn list_activities(&self, find: &FindActivity) -> Result<Vec<Activity>>;
    async fn count_activities(&self, find: &FindActivity) -> Result<u64>;

    async fn get_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> Result<Option<WorkspaceSetting>>;
    async fn upsert_workspace_setting(&self, setting: WorkspaceSetting)
    -> Result<WorkspaceSetting>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmStore>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let store = backend::SeaOrmStore::new(database_url, &backend_type).await?;
        Ok(Arc::new(store))
    }
}

//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{LinkhubError, Result};
use crate::storage::{
    Activity, Collection, CollectionPatch, FindActivity, FindCollection, FindShortcut, FindUser,
    NewActivity, NewCollection, NewShortcut, NewUser, Shortcut, ShortcutPatch, Store, User,
    WorkspaceSetting, WorkspaceSettingKey,
};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{join_tags, split_tags};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinkhubError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based store
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStore {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LinkhubError::database_config("DATABASE_URL 未设置"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let store = SeaOrmStore {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&store.db).await?;

        warn!("{} Storage initialized.", store.backend_name.to_uppercase());
        Ok(store)
    }
}

#[async_trait]
impl Store for SeaOrmStore {
    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn create_shortcut(&self, new: NewShortcut) -> Result<Shortcut> {
        self.insert_shortcut(new).await
    }

    async fn list_shortcuts(&self, find: &FindShortcut) -> Result<Vec<Shortcut>> {
        self.query_shortcuts(find).await
    }

    async fn get_shortcut(&self, find: &FindShortcut) -> Result<Option<Shortcut>> {
        self.query_shortcut(find).await
    }

    async fn update_shortcut(&self, id: i32, patch: &ShortcutPatch) -> Result<Shortcut> {
        self.patch_shortcut(id, patch).await
    }

    async fn delete_shortcut(&self, id: i32) -> Result<()> {
        self.remove_shortcut(id).await
    }

    async fn create_collection(&self, new: NewCollection) -> Result<Collection> {
        self.insert_collection(new).await
    }

    async fn list_collections(&self, find: &FindCollection) -> Result<Vec<Collection>> {
        self.query_collections(find).await
    }

    async fn get_collection(&self, find: &FindCollection) -> Result<Option<Collection>> {
        self.query_collection(find).await
    }

    async fn update_collection(&self, id: i32, patch: &CollectionPatch) -> Result<Collection> {
        self.patch_collection(id, patch).await
    }

    async fn delete_collection(&self, id: i32) -> Result<()> {
        self.remove_collection(id).await
    }

    async fn create_user(&self, new: NewUser) -> Result<User> {
        self.insert_user(new).await
    }

    async fn get_user(&self, find: &FindUser) -> Result<Option<User>> {
        self.query_user(find).await
    }

    async fn create_activity(&self, new: NewActivity) -> Result<Activity> {
        self.append_activity(new).await
    }

    async fn list_activities(&self, find: &FindActivity) -> Result<Vec<Activity>> {
        self.query_activities(find).await
    }

    async fn count_activities(&self, find: &FindActivity) -> Result<u64> {
        self.query_activity_count(find).await
    }

    async fn get_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> Result<Option<WorkspaceSetting>> {
        self.query_workspace_setting(key).await
    }

    async fn upsert_workspace_setting(
        &self,
        setting: WorkspaceSetting,
    ) -> Result<WorkspaceSetting> {
        self.upsert_setting(setting).await
    }
}

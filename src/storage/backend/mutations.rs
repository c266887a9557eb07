//! Mutation operations for SeaOrmStore
//!
//! This module contains all write database operations. Every write touches a
//! single row; there are no cross-entity transactions.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, sea_query::OnConflict};
use tracing::info;

use super::SeaOrmStore;
use super::converters::*;
use crate::errors::{LinkhubError, Result};
use crate::storage::{
    Activity, Collection, CollectionPatch, NewActivity, NewCollection, NewShortcut, NewUser,
    Shortcut, ShortcutPatch, User, WorkspaceSetting,
};

use migration::entities::{collection, shortcut, workspace_setting};

fn map_update_err(err: DbErr, what: &str, id: i32) -> LinkhubError {
    match err {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
            LinkhubError::not_found(format!("{} 不存在: {}", what, id))
        }
        other => LinkhubError::database_operation(format!("更新{}失败: {}", what, other)),
    }
}

impl SeaOrmStore {
    pub(super) async fn insert_shortcut(&self, new: NewShortcut) -> Result<Shortcut> {
        let active = new_shortcut_to_active_model(&new, Utc::now())?;
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| LinkhubError::database_operation(format!("创建短链接失败: {}", e)))?;

        info!("Shortcut created: {} (id={})", model.name, model.id);
        model_to_shortcut(model)
    }

    pub(super) async fn patch_shortcut(&self, id: i32, patch: &ShortcutPatch) -> Result<Shortcut> {
        let active = shortcut_patch_to_active_model(id, patch, Utc::now())?;
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| map_update_err(e, "短链接", id))?;

        info!("Shortcut updated: {} (id={})", model.name, model.id);
        model_to_shortcut(model)
    }

    pub(super) async fn remove_shortcut(&self, id: i32) -> Result<()> {
        let result = shortcut::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LinkhubError::database_operation(format!("删除短链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkhubError::not_found(format!("短链接不存在: {}", id)));
        }

        info!("Shortcut deleted: id={}", id);
        Ok(())
    }

    pub(super) async fn insert_collection(&self, new: NewCollection) -> Result<Collection> {
        let active = new_collection_to_active_model(&new, Utc::now())?;
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| LinkhubError::database_operation(format!("创建集合失败: {}", e)))?;

        info!("Collection created: {} (id={})", model.name, model.id);
        model_to_collection(model)
    }

    pub(super) async fn patch_collection(
        &self,
        id: i32,
        patch: &CollectionPatch,
    ) -> Result<Collection> {
        let active = collection_patch_to_active_model(id, patch, Utc::now())?;
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| map_update_err(e, "集合", id))?;

        info!("Collection updated: {} (id={})", model.name, model.id);
        model_to_collection(model)
    }

    pub(super) async fn remove_collection(&self, id: i32) -> Result<()> {
        let result = collection::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LinkhubError::database_operation(format!("删除集合失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkhubError::not_found(format!("集合不存在: {}", id)));
        }

        info!("Collection deleted: id={}", id);
        Ok(())
    }

    pub(super) async fn insert_user(&self, new: NewUser) -> Result<User> {
        let model = new_user_to_active_model(&new, Utc::now())
            .insert(&self.db)
            .await
            .map_err(|e| LinkhubError::database_operation(format!("创建用户失败: {}", e)))?;

        info!("User created: {} (id={})", model.username, model.id);
        model_to_user(model)
    }

    /// 活动表只追加
    pub(super) async fn append_activity(&self, new: NewActivity) -> Result<Activity> {
        let model = new_activity_to_active_model(&new, Utc::now())
            .insert(&self.db)
            .await
            .map_err(|e| LinkhubError::database_operation(format!("写入活动失败: {}", e)))?;

        model_to_activity(model)
    }

    pub(super) async fn upsert_setting(&self, setting: WorkspaceSetting) -> Result<WorkspaceSetting> {
        workspace_setting::Entity::insert(workspace_setting_to_active_model(&setting))
            .on_conflict(
                OnConflict::column(workspace_setting::Column::Key)
                    .update_column(workspace_setting::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                LinkhubError::database_operation(format!("保存工作区设置失败: {}", e))
            })?;

        info!("Workspace setting saved: {}", setting.key);
        Ok(setting)
    }
}

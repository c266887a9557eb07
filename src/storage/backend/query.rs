//! Query operations for SeaOrmStore
//!
//! This module contains all read-only database operations.

use sea_orm::{
    ColumnTrait, Condition, DbBackend, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};
use tracing::debug;

use super::SeaOrmStore;
use super::converters::{
    model_to_activity, model_to_collection, model_to_shortcut, model_to_user,
    model_to_workspace_setting,
};
use crate::errors::Result;
use crate::storage::{
    Activity, Collection, FindActivity, FindCollection, FindShortcut, FindUser, Shortcut, User,
    WorkspaceSetting, WorkspaceSettingKey,
};

use migration::entities::{activity, collection, shortcut, user, workspace_setting};

fn shortcut_condition(find: &FindShortcut) -> Condition {
    let mut condition = Condition::all();
    if let Some(id) = find.id {
        condition = condition.add(shortcut::Column::Id.eq(id));
    }
    if let Some(ref name) = find.name {
        condition = condition.add(shortcut::Column::Name.eq(name.as_str()));
    }
    if let Some(creator_id) = find.creator_id {
        condition = condition.add(shortcut::Column::CreatorId.eq(creator_id));
    }
    if !find.visibility_list.is_empty() {
        condition = condition.add(
            shortcut::Column::Visibility.is_in(find.visibility_list.iter().map(|v| v.to_string())),
        );
    }
    condition
}

fn collection_condition(find: &FindCollection) -> Condition {
    let mut condition = Condition::all();
    if let Some(id) = find.id {
        condition = condition.add(collection::Column::Id.eq(id));
    }
    if let Some(ref name) = find.name {
        condition = condition.add(collection::Column::Name.eq(name.as_str()));
    }
    if let Some(creator_id) = find.creator_id {
        condition = condition.add(collection::Column::CreatorId.eq(creator_id));
    }
    if !find.visibility_list.is_empty() {
        condition = condition.add(
            collection::Column::Visibility
                .is_in(find.visibility_list.iter().map(|v| v.to_string())),
        );
    }
    condition
}

impl SeaOrmStore {
    fn db_backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    /// payload JSON 中整数字段的等值匹配，各数据库的 JSON 函数不同
    fn payload_field_eq(&self, field: &str, value: i32) -> Expr {
        match self.db_backend() {
            DbBackend::Sqlite => Expr::cust(format!(
                "json_extract(payload, '$.{}') = {}",
                field, value
            )),
            DbBackend::MySql => Expr::cust(format!(
                "JSON_EXTRACT(payload, '$.{}') = {}",
                field, value
            )),
            // Postgres
            _ => Expr::cust(format!(
                "(CAST(payload AS jsonb) ->> '{}') = '{}'",
                field, value
            )),
        }
    }

    fn activity_condition(&self, find: &FindActivity) -> Condition {
        let mut condition = Condition::all();
        if let Some(activity_type) = find.activity_type {
            condition = condition.add(activity::Column::ActivityType.eq(activity_type.to_string()));
        }
        if let Some(level) = find.level {
            condition = condition.add(activity::Column::Level.eq(level.to_string()));
        }
        if let Some(shortcut_id) = find.shortcut_id {
            condition = condition.add(self.payload_field_eq("shortcutId", shortcut_id));
        }
        if let Some(collection_id) = find.collection_id {
            condition = condition.add(self.payload_field_eq("collectionId", collection_id));
        }
        condition
    }

    pub(super) async fn query_shortcuts(&self, find: &FindShortcut) -> Result<Vec<Shortcut>> {
        let models = shortcut::Entity::find()
            .filter(shortcut_condition(find))
            .order_by_desc(shortcut::Column::CreatedAt)
            .order_by_desc(shortcut::Column::Id)
            .all(&self.db)
            .await?;

        debug!("Loaded {} shortcuts", models.len());
        models.into_iter().map(model_to_shortcut).collect()
    }

    pub(super) async fn query_shortcut(&self, find: &FindShortcut) -> Result<Option<Shortcut>> {
        shortcut::Entity::find()
            .filter(shortcut_condition(find))
            .one(&self.db)
            .await?
            .map(model_to_shortcut)
            .transpose()
    }

    pub(super) async fn query_collections(&self, find: &FindCollection) -> Result<Vec<Collection>> {
        let models = collection::Entity::find()
            .filter(collection_condition(find))
            .order_by_desc(collection::Column::CreatedAt)
            .order_by_desc(collection::Column::Id)
            .all(&self.db)
            .await?;

        debug!("Loaded {} collections", models.len());
        models.into_iter().map(model_to_collection).collect()
    }

    pub(super) async fn query_collection(
        &self,
        find: &FindCollection,
    ) -> Result<Option<Collection>> {
        collection::Entity::find()
            .filter(collection_condition(find))
            .one(&self.db)
            .await?
            .map(model_to_collection)
            .transpose()
    }

    pub(super) async fn query_user(&self, find: &FindUser) -> Result<Option<User>> {
        let mut condition = Condition::all();
        if let Some(id) = find.id {
            condition = condition.add(user::Column::Id.eq(id));
        }
        if let Some(ref username) = find.username {
            condition = condition.add(user::Column::Username.eq(username.as_str()));
        }

        user::Entity::find()
            .filter(condition)
            .one(&self.db)
            .await?
            .map(model_to_user)
            .transpose()
    }

    pub(super) async fn query_activities(&self, find: &FindActivity) -> Result<Vec<Activity>> {
        let models = activity::Entity::find()
            .filter(self.activity_condition(find))
            .order_by_asc(activity::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(model_to_activity).collect()
    }

    pub(super) async fn query_activity_count(&self, find: &FindActivity) -> Result<u64> {
        let count = activity::Entity::find()
            .filter(self.activity_condition(find))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    pub(super) async fn query_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> Result<Option<WorkspaceSetting>> {
        workspace_setting::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await?
            .map(model_to_workspace_setting)
            .transpose()
    }
}

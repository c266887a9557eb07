//! Sea-ORM Model <-> 领域模型转换
//!
//! 枚举列以字符串存储，解析失败视为数据损坏，返回 `Serialization` 错误。

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::errors::{LinkhubError, Result};
use crate::storage::models::*;
use migration::entities::{activity, collection, shortcut, user, workspace_setting};

fn parse_column<T: FromStr>(value: &str, column: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        LinkhubError::serialization(format!("无法解析列 {} 的值: {}", column, value))
    })
}

/// 标签以空白分隔存储
pub fn join_tags(tags: &[String]) -> String {
    tags.join(" ")
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn parse_og_metadata(raw: &str) -> Result<OpenGraphMetadata> {
    if raw.trim().is_empty() {
        return Ok(OpenGraphMetadata::default());
    }
    Ok(serde_json::from_str(raw)?)
}

fn parse_shortcut_ids(raw: &str) -> Result<Vec<i32>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

pub fn model_to_shortcut(model: shortcut::Model) -> Result<Shortcut> {
    Ok(Shortcut {
        id: model.id,
        creator_id: model.creator_id,
        tags: split_tags(&model.tag),
        visibility: parse_column(&model.visibility, "visibility")?,
        og_metadata: parse_og_metadata(&model.og_metadata)?,
        row_status: parse_column(&model.row_status, "row_status")?,
        name: model.name,
        link: model.link,
        title: model.title,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub fn new_shortcut_to_active_model(
    new: &NewShortcut,
    now: DateTime<Utc>,
) -> Result<shortcut::ActiveModel> {
    Ok(shortcut::ActiveModel {
        id: NotSet,
        creator_id: Set(new.creator_id),
        name: Set(new.name.clone()),
        link: Set(new.link.clone()),
        title: Set(new.title.clone()),
        description: Set(new.description.clone()),
        tag: Set(join_tags(&new.tags)),
        visibility: Set(new.visibility.to_string()),
        og_metadata: Set(serde_json::to_string(&new.og_metadata)?),
        row_status: Set(RowStatus::Normal.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

/// 只写入 patch 中给出的字段，`updated_at` 总是刷新
pub fn shortcut_patch_to_active_model(
    id: i32,
    patch: &ShortcutPatch,
    now: DateTime<Utc>,
) -> Result<shortcut::ActiveModel> {
    let og_metadata = match &patch.og_metadata {
        Some(og) => Set(serde_json::to_string(og)?),
        None => NotSet,
    };

    Ok(shortcut::ActiveModel {
        id: Set(id),
        creator_id: NotSet,
        name: patch.name.clone().map_or(NotSet, Set),
        link: patch.link.clone().map_or(NotSet, Set),
        title: patch.title.clone().map_or(NotSet, Set),
        description: patch.description.clone().map_or(NotSet, Set),
        tag: patch
            .tags
            .as_ref()
            .map_or(NotSet, |tags| Set(join_tags(tags))),
        visibility: patch.visibility.map_or(NotSet, |v| Set(v.to_string())),
        og_metadata,
        row_status: NotSet,
        created_at: NotSet,
        updated_at: Set(now),
    })
}

pub fn model_to_collection(model: collection::Model) -> Result<Collection> {
    Ok(Collection {
        id: model.id,
        creator_id: model.creator_id,
        shortcut_ids: parse_shortcut_ids(&model.shortcut_ids)?,
        visibility: parse_column(&model.visibility, "visibility")?,
        row_status: parse_column(&model.row_status, "row_status")?,
        name: model.name,
        title: model.title,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub fn new_collection_to_active_model(
    new: &NewCollection,
    now: DateTime<Utc>,
) -> Result<collection::ActiveModel> {
    Ok(collection::ActiveModel {
        id: NotSet,
        creator_id: Set(new.creator_id),
        name: Set(new.name.clone()),
        title: Set(new.title.clone()),
        description: Set(new.description.clone()),
        shortcut_ids: Set(serde_json::to_string(&new.shortcut_ids)?),
        visibility: Set(new.visibility.to_string()),
        row_status: Set(RowStatus::Normal.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

pub fn collection_patch_to_active_model(
    id: i32,
    patch: &CollectionPatch,
    now: DateTime<Utc>,
) -> Result<collection::ActiveModel> {
    let shortcut_ids = match &patch.shortcut_ids {
        Some(ids) => Set(serde_json::to_string(ids)?),
        None => NotSet,
    };

    Ok(collection::ActiveModel {
        id: Set(id),
        creator_id: NotSet,
        name: patch.name.clone().map_or(NotSet, Set),
        title: patch.title.clone().map_or(NotSet, Set),
        description: patch.description.clone().map_or(NotSet, Set),
        shortcut_ids,
        visibility: patch.visibility.map_or(NotSet, |v| Set(v.to_string())),
        row_status: NotSet,
        created_at: NotSet,
        updated_at: Set(now),
    })
}

pub fn model_to_user(model: user::Model) -> Result<User> {
    Ok(User {
        id: model.id,
        role: parse_column(&model.role, "role")?,
        row_status: parse_column(&model.row_status, "row_status")?,
        username: model.username,
        nickname: model.nickname,
        email: model.email,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub fn new_user_to_active_model(new: &NewUser, now: DateTime<Utc>) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        username: Set(new.username.clone()),
        nickname: Set(new.nickname.clone()),
        email: Set(new.email.clone()),
        role: Set(new.role.to_string()),
        row_status: Set(RowStatus::Normal.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub fn model_to_activity(model: activity::Model) -> Result<Activity> {
    Ok(Activity {
        id: model.id,
        creator_id: model.creator_id,
        activity_type: parse_column(&model.activity_type, "activity_type")?,
        level: parse_column(&model.level, "level")?,
        payload: model.payload,
        created_at: model.created_at,
    })
}

pub fn new_activity_to_active_model(
    new: &NewActivity,
    now: DateTime<Utc>,
) -> activity::ActiveModel {
    activity::ActiveModel {
        id: NotSet,
        creator_id: Set(new.creator_id),
        activity_type: Set(new.activity_type.to_string()),
        level: Set(new.level.to_string()),
        payload: Set(new.payload.clone()),
        created_at: Set(now),
    }
}

pub fn model_to_workspace_setting(model: workspace_setting::Model) -> Result<WorkspaceSetting> {
    Ok(WorkspaceSetting {
        key: parse_column(&model.key, "key")?,
        value: model.value,
    })
}

pub fn workspace_setting_to_active_model(
    setting: &WorkspaceSetting,
) -> workspace_setting::ActiveModel {
    workspace_setting::ActiveModel {
        key: Set(setting.key.to_string()),
        value: Set(setting.value.clone()),
    }
}

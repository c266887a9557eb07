//! API 类型定义

use serde::{Deserialize, Serialize};

use crate::services::{CollectionDraft, ShortcutDraft};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct GetByNameQuery {
    #[serde(default)]
    pub record_view: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UpdateShortcutRequest {
    #[serde(default)]
    pub update_mask: Vec<String>,
    #[serde(default)]
    pub shortcut: ShortcutDraft,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UpdateCollectionRequest {
    #[serde(default)]
    pub update_mask: Vec<String>,
    #[serde(default)]
    pub collection: CollectionDraft,
}

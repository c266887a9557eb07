//! Collection management service
//!
//! Same contracts as the shortcut service. Collections have no creation
//! activity and carry no view count.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::activity_recorder::{ActivityRecorder, RequestContext};
use super::field_mask::{CollectionField, FieldMask};
use super::visibility::{Actor, can_read, can_write};
use crate::errors::{LinkhubError, Result};
use crate::metrics_core::MetricsRecorder;
use crate::storage::{Collection, CollectionPatch, FindCollection, NewCollection, Store, Visibility};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionDraft {
    pub name: String,
    pub title: String,
    pub description: String,
    pub shortcut_ids: Vec<i32>,
    pub visibility: Visibility,
}

pub fn build_collection_patch(
    mask: &FieldMask<CollectionField>,
    draft: &CollectionDraft,
) -> Result<CollectionPatch> {
    let mut patch = CollectionPatch::default();
    for field in mask.fields() {
        match field {
            CollectionField::Name => {
                let name = draft.name.trim();
                if name.is_empty() {
                    return Err(LinkhubError::invalid_argument("name must not be empty"));
                }
                patch.name = Some(name.to_string());
            }
            CollectionField::Title => patch.title = Some(draft.title.clone()),
            CollectionField::Description => patch.description = Some(draft.description.clone()),
            CollectionField::Visibility => patch.visibility = Some(draft.visibility),
            CollectionField::ShortcutIds => patch.shortcut_ids = Some(draft.shortcut_ids.clone()),
        }
    }
    Ok(patch)
}

pub struct CollectionService {
    store: Arc<dyn Store>,
    recorder: ActivityRecorder,
}

impl CollectionService {
    pub fn new(store: Arc<dyn Store>, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            recorder: ActivityRecorder::new(store.clone(), metrics),
            store,
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Collection> {
        self.store
            .get_collection(&FindCollection {
                name: Some(name.to_string()),
                ..Default::default()
            })
            .await?
            .ok_or_else(|| LinkhubError::not_found(format!("collection not found: {}", name)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Collection> {
        self.store
            .get_collection(&FindCollection {
                id: Some(id),
                ..Default::default()
            })
            .await?
            .ok_or_else(|| LinkhubError::not_found(format!("collection not found: {}", id)))
    }

    pub async fn list_collections(&self, actor: Option<&Actor>) -> Result<Vec<Collection>> {
        let Some(actor) = actor else {
            return self
                .store
                .list_collections(&FindCollection {
                    visibility_list: vec![Visibility::Public],
                    ..Default::default()
                })
                .await;
        };

        let mut collections = self
            .store
            .list_collections(&FindCollection {
                visibility_list: vec![Visibility::Workspace, Visibility::Public],
                ..Default::default()
            })
            .await?;
        let own_private = self
            .store
            .list_collections(&FindCollection {
                creator_id: Some(actor.id),
                visibility_list: vec![Visibility::Private],
                ..Default::default()
            })
            .await?;

        let mut seen: HashSet<i32> = collections.iter().map(|c| c.id).collect();
        collections.extend(own_private.into_iter().filter(|c| seen.insert(c.id)));
        Ok(collections)
    }

    pub async fn get_collection(
        &self,
        name: &str,
        actor: Option<&Actor>,
        record_view: bool,
        ctx: &RequestContext,
    ) -> Result<Collection> {
        let collection = self.find_by_name(name).await?;
        if !can_read(actor, &collection) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for collection: {}",
                name
            )));
        }

        if record_view {
            if let Err(e) = self
                .recorder
                .record_collection_view(&collection, actor, ctx)
                .await
            {
                warn!(
                    "Failed to record view for collection {}: {}",
                    collection.name, e
                );
            }
        }

        Ok(collection)
    }

    pub async fn get_collection_by_id(&self, id: i32, actor: Option<&Actor>) -> Result<Collection> {
        let collection = self.find_by_id(id).await?;
        if !can_read(actor, &collection) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for collection: {}",
                id
            )));
        }
        Ok(collection)
    }

    pub async fn create_collection(
        &self,
        actor: Option<&Actor>,
        draft: CollectionDraft,
    ) -> Result<Collection> {
        let actor = actor.ok_or_else(|| {
            LinkhubError::permission_denied("authentication required to create collections")
        })?;
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(LinkhubError::invalid_argument("name must not be empty"));
        }

        let collection = self
            .store
            .create_collection(NewCollection {
                creator_id: actor.id,
                name: name.to_string(),
                title: draft.title,
                description: draft.description,
                shortcut_ids: draft.shortcut_ids,
                visibility: draft.visibility,
            })
            .await?;

        info!("Collection {} created by user {}", collection.name, actor.id);
        Ok(collection)
    }

    pub async fn update_collection<S: AsRef<str>>(
        &self,
        actor: Option<&Actor>,
        id: i32,
        update_mask: &[S],
        draft: CollectionDraft,
    ) -> Result<Collection> {
        let mask = FieldMask::<CollectionField>::parse(update_mask)?;

        let collection = self.find_by_id(id).await?;
        if !can_write(actor, &collection) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for collection: {}",
                collection.name
            )));
        }

        let patch = build_collection_patch(&mask, &draft)?;
        if patch.is_empty() {
            return Ok(collection);
        }
        self.store.update_collection(id, &patch).await
    }

    pub async fn delete_collection(&self, actor: Option<&Actor>, name: &str) -> Result<()> {
        let collection = self.find_by_name(name).await?;
        if !can_write(actor, &collection) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for collection: {}",
                name
            )));
        }

        self.store.delete_collection(collection.id).await?;
        info!("Collection {} deleted", name);
        Ok(())
    }
}

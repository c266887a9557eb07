//! Shortcut management service
//!
//! find → authorize → mutate → compose. Shared between the HTTP handlers and
//! the integration tests; every method takes the actor explicitly.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::activity_recorder::{ActivityRecorder, RequestContext};
use super::analytics_service::{AnalyticsService, ShortcutAnalytics};
use super::field_mask::{FieldMask, ShortcutField};
use super::visibility::{Actor, can_read, can_write};
use crate::errors::{LinkhubError, Result};
use crate::metrics_core::MetricsRecorder;
use crate::storage::{
    FindShortcut, NewShortcut, OpenGraphMetadata, Shortcut, ShortcutPatch, Store, Visibility,
};

// ============ Request/Response DTOs ============

/// Caller-supplied shortcut fields for create and update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutDraft {
    pub name: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub visibility: Visibility,
    /// `None` leaves the stored override untouched on update
    pub og_metadata: Option<OpenGraphMetadata>,
}

/// Shortcut plus its derived view count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutView {
    #[serde(flatten)]
    pub shortcut: Shortcut,
    pub view_count: u64,
}

fn require_non_empty(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LinkhubError::invalid_argument(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// 标签整体覆盖，按空白重新切分
fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .flat_map(|t| t.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Translate an update mask into a patch; fields outside the mask stay `None`
pub fn build_shortcut_patch(
    mask: &FieldMask<ShortcutField>,
    draft: &ShortcutDraft,
) -> Result<ShortcutPatch> {
    let mut patch = ShortcutPatch::default();
    for field in mask.fields() {
        match field {
            ShortcutField::Name => patch.name = Some(require_non_empty(&draft.name, "name")?),
            ShortcutField::Link => patch.link = Some(require_non_empty(&draft.link, "link")?),
            ShortcutField::Title => patch.title = Some(draft.title.clone()),
            ShortcutField::Description => patch.description = Some(draft.description.clone()),
            ShortcutField::Tags => patch.tags = Some(normalize_tags(&draft.tags)),
            ShortcutField::Visibility => patch.visibility = Some(draft.visibility),
            ShortcutField::OgMetadata => {
                if let Some(og) = &draft.og_metadata {
                    patch.og_metadata = Some(og.clone());
                }
            }
        }
    }
    Ok(patch)
}

pub struct ShortcutService {
    store: Arc<dyn Store>,
    recorder: ActivityRecorder,
    analytics: AnalyticsService,
    metrics: Arc<dyn MetricsRecorder>,
}

impl ShortcutService {
    pub fn new(store: Arc<dyn Store>, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            recorder: ActivityRecorder::new(store.clone(), metrics.clone()),
            analytics: AnalyticsService::new(store.clone()),
            store,
            metrics,
        }
    }

    async fn compose(&self, shortcut: Shortcut) -> Result<ShortcutView> {
        let view_count = self.analytics.view_count(shortcut.id).await?;
        Ok(ShortcutView {
            shortcut,
            view_count,
        })
    }

    async fn find_by_name(&self, name: &str) -> Result<Shortcut> {
        self.store
            .get_shortcut(&FindShortcut {
                name: Some(name.to_string()),
                ..Default::default()
            })
            .await?
            .ok_or_else(|| LinkhubError::not_found(format!("shortcut not found: {}", name)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Shortcut> {
        self.store
            .get_shortcut(&FindShortcut {
                id: Some(id),
                ..Default::default()
            })
            .await?
            .ok_or_else(|| LinkhubError::not_found(format!("shortcut not found: {}", id)))
    }

    /// 匿名只返回 Public；登录用户返回 Workspace/Public 以及自己的 Private
    pub async fn list_shortcuts(&self, actor: Option<&Actor>) -> Result<Vec<ShortcutView>> {
        let shortcuts = match actor {
            None => {
                self.store
                    .list_shortcuts(&FindShortcut {
                        visibility_list: vec![Visibility::Public],
                        ..Default::default()
                    })
                    .await?
            }
            Some(actor) => {
                let mut shortcuts = self
                    .store
                    .list_shortcuts(&FindShortcut {
                        visibility_list: vec![Visibility::Workspace, Visibility::Public],
                        ..Default::default()
                    })
                    .await?;
                let own_private = self
                    .store
                    .list_shortcuts(&FindShortcut {
                        creator_id: Some(actor.id),
                        visibility_list: vec![Visibility::Private],
                        ..Default::default()
                    })
                    .await?;

                let mut seen: HashSet<i32> = shortcuts.iter().map(|s| s.id).collect();
                shortcuts.extend(own_private.into_iter().filter(|s| seen.insert(s.id)));
                shortcuts
            }
        };

        let mut views = Vec::with_capacity(shortcuts.len());
        for shortcut in shortcuts {
            views.push(self.compose(shortcut).await?);
        }
        Ok(views)
    }

    /// Exact, case-sensitive name lookup.
    ///
    /// With `record_view` the view is appended to the activity log; a
    /// recording failure is logged and does not change the result.
    pub async fn get_shortcut(
        &self,
        name: &str,
        actor: Option<&Actor>,
        record_view: bool,
        ctx: &RequestContext,
    ) -> Result<ShortcutView> {
        let shortcut = self.find_by_name(name).await?;
        if !can_read(actor, &shortcut) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for shortcut: {}",
                name
            )));
        }

        if record_view {
            if let Err(e) = self.recorder.record_shortcut_view(&shortcut, actor, ctx).await {
                warn!("Failed to record view for shortcut {}: {}", shortcut.name, e);
            }
        }

        self.compose(shortcut).await
    }

    pub async fn get_shortcut_by_id(&self, id: i32, actor: Option<&Actor>) -> Result<ShortcutView> {
        let shortcut = self.find_by_id(id).await?;
        if !can_read(actor, &shortcut) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for shortcut: {}",
                id
            )));
        }
        self.compose(shortcut).await
    }

    /// Persist, then record the creation activity.
    ///
    /// The two writes are not atomic: when the activity cannot be stored the
    /// call fails with an internal error but the shortcut row remains.
    pub async fn create_shortcut(
        &self,
        actor: Option<&Actor>,
        draft: ShortcutDraft,
    ) -> Result<ShortcutView> {
        let actor = actor.ok_or_else(|| {
            LinkhubError::permission_denied("authentication required to create shortcuts")
        })?;
        let name = require_non_empty(&draft.name, "name")?;
        let link = require_non_empty(&draft.link, "link")?;

        let shortcut = self
            .store
            .create_shortcut(NewShortcut {
                creator_id: actor.id,
                name,
                link,
                title: draft.title,
                description: draft.description,
                tags: normalize_tags(&draft.tags),
                visibility: draft.visibility,
                og_metadata: draft.og_metadata.unwrap_or_default(),
            })
            .await?;

        self.recorder.record_shortcut_create(&shortcut).await?;

        info!("Shortcut {} created by user {}", shortcut.name, actor.id);
        self.compose(shortcut).await
    }

    /// 空 mask 最先检查，与 actor 和目标无关
    pub async fn update_shortcut<S: AsRef<str>>(
        &self,
        actor: Option<&Actor>,
        id: i32,
        update_mask: &[S],
        draft: ShortcutDraft,
    ) -> Result<ShortcutView> {
        let mask = FieldMask::<ShortcutField>::parse(update_mask)?;

        let shortcut = self.find_by_id(id).await?;
        if !can_write(actor, &shortcut) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for shortcut: {}",
                shortcut.name
            )));
        }

        let patch = build_shortcut_patch(&mask, &draft)?;
        let updated = if patch.is_empty() {
            shortcut
        } else {
            self.store.update_shortcut(id, &patch).await?
        };

        self.compose(updated).await
    }

    /// Activity history of the shortcut is left in place.
    pub async fn delete_shortcut(&self, actor: Option<&Actor>, name: &str) -> Result<()> {
        let shortcut = self.find_by_name(name).await?;
        if !can_write(actor, &shortcut) {
            return Err(LinkhubError::permission_denied(format!(
                "permission denied for shortcut: {}",
                name
            )));
        }

        self.store.delete_shortcut(shortcut.id).await?;
        info!("Shortcut {} deleted", name);
        Ok(())
    }

    pub async fn get_shortcut_analytics(&self, name: &str) -> Result<ShortcutAnalytics> {
        let shortcut = self.find_by_name(name).await?;
        self.metrics.record_event("shortcut analytics");
        self.analytics.aggregate_views(shortcut.id).await
    }

    pub async fn get_shortcut_analytics_by_id(&self, id: i32) -> Result<ShortcutAnalytics> {
        let shortcut = self.find_by_id(id).await?;
        self.metrics.record_event("shortcut analytics");
        self.analytics.aggregate_views(shortcut.id).await
    }
}

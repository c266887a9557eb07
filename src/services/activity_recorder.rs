//! Activity recorder
//!
//! Appends structured view/create events to the activity log. View recording
//! is best-effort at the call site; create recording failures are propagated.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::visibility::Actor;
use crate::errors::LinkhubError;
use crate::metrics_core::MetricsRecorder;
use crate::storage::{
    ActivityLevel, ActivityType, Collection, CollectionViewPayload, NewActivity, Shortcut,
    ShortcutCreatePayload, ShortcutViewPayload, Store, SYSTEM_ACTOR_ID,
};

/// 传输层元数据，由 HTTP 层从连接和请求头中提取
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportMetadata {
    pub peer_addr: Option<String>,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

/// Per-request context handed to resolver operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub transport: Option<TransportMetadata>,
}

impl RequestContext {
    /// Context without transport metadata (internal calls, tests)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        peer_addr: Option<String>,
        referer: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            transport: Some(TransportMetadata {
                peer_addr,
                referer,
                user_agent,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Transport metadata, peer address or user agent absent
    MissingMetadata(&'static str),
    Serialization(String),
    Store(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingMetadata(what) => write!(f, "missing request metadata: {}", what),
            RecordError::Serialization(msg) => write!(f, "failed to encode payload: {}", msg),
            RecordError::Store(msg) => write!(f, "failed to store activity: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<RecordError> for LinkhubError {
    fn from(err: RecordError) -> Self {
        LinkhubError::activity_record(err.to_string())
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Serialization(err.to_string())
    }
}

struct ViewSource {
    ip: String,
    referer: String,
    user_agent: String,
}

fn view_source(ctx: &RequestContext) -> Result<ViewSource, RecordError> {
    let transport = ctx
        .transport
        .as_ref()
        .ok_or(RecordError::MissingMetadata("transport"))?;
    let ip = transport
        .peer_addr
        .clone()
        .ok_or(RecordError::MissingMetadata("peer address"))?;
    let user_agent = transport
        .user_agent
        .clone()
        .ok_or(RecordError::MissingMetadata("user-agent"))?;

    Ok(ViewSource {
        ip,
        referer: transport.referer.clone().unwrap_or_default(),
        user_agent,
    })
}

#[derive(Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn Store>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<dyn Store>, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { store, metrics }
    }

    async fn append(
        &self,
        creator_id: i32,
        activity_type: ActivityType,
        payload: String,
    ) -> Result<(), RecordError> {
        let activity = self
            .store
            .create_activity(NewActivity {
                creator_id,
                activity_type,
                level: ActivityLevel::Info,
                payload,
            })
            .await
            .map_err(|e| RecordError::Store(e.message().to_string()))?;

        debug!(
            "Activity {} recorded: {} (creator={})",
            activity.id, activity.activity_type, activity.creator_id
        );
        Ok(())
    }

    pub async fn record_shortcut_view(
        &self,
        shortcut: &Shortcut,
        actor: Option<&Actor>,
        ctx: &RequestContext,
    ) -> Result<(), RecordError> {
        let source = view_source(ctx)?;
        let payload = serde_json::to_string(&ShortcutViewPayload {
            shortcut_id: shortcut.id,
            ip: source.ip,
            referer: source.referer,
            user_agent: source.user_agent,
        })?;

        let creator_id = actor.map_or(SYSTEM_ACTOR_ID, |a| a.id);
        self.append(creator_id, ActivityType::ShortcutView, payload)
            .await?;
        self.metrics.record_event("shortcut view");
        Ok(())
    }

    pub async fn record_collection_view(
        &self,
        collection: &Collection,
        actor: Option<&Actor>,
        ctx: &RequestContext,
    ) -> Result<(), RecordError> {
        let source = view_source(ctx)?;
        let payload = serde_json::to_string(&CollectionViewPayload {
            collection_id: collection.id,
            ip: source.ip,
            referer: source.referer,
            user_agent: source.user_agent,
        })?;

        let creator_id = actor.map_or(SYSTEM_ACTOR_ID, |a| a.id);
        self.append(creator_id, ActivityType::CollectionView, payload)
            .await?;
        self.metrics.record_event("collection view");
        Ok(())
    }

    /// 创建者即短链接的 owner
    pub async fn record_shortcut_create(&self, shortcut: &Shortcut) -> Result<(), RecordError> {
        let payload = serde_json::to_string(&ShortcutCreatePayload {
            shortcut_id: shortcut.id,
        })?;
        self.append(shortcut.creator_id, ActivityType::ShortcutCreate, payload)
            .await
    }
}

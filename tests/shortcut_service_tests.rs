//! ShortcutService tests
//!
//! Resolver behaviour against a temporary SQLite store.

use std::sync::{Arc, Once};

use async_trait::async_trait;
use tempfile::TempDir;

use linkhub::config::init_config;
use linkhub::errors::{ErrorKind, LinkhubError, Result};
use linkhub::metrics_core::NoopMetrics;
use linkhub::services::{Actor, RequestContext, ShortcutDraft, ShortcutService};
use linkhub::storage::{
    Activity, ActivityType, Collection, CollectionPatch, FindActivity, FindCollection,
    FindShortcut, FindUser, NewActivity, NewCollection, NewShortcut, NewUser, OpenGraphMetadata,
    Role, SeaOrmStore, Shortcut, ShortcutPatch, Store, User, Visibility, WorkspaceSetting,
    WorkspaceSettingKey,
};

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_test_store() -> (Arc<SeaOrmStore>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("shortcut_service.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = Arc::new(
        SeaOrmStore::new(&db_url, "sqlite")
            .await
            .expect("Failed to create store"),
    );
    (store, temp_dir)
}

async fn create_user(store: &dyn Store, username: &str, role: Role) -> Actor {
    let user = store
        .create_user(NewUser {
            username: username.to_string(),
            nickname: username.to_string(),
            email: format!("{}@example.com", username),
            role,
        })
        .await
        .expect("Failed to create user");
    Actor::from(&user)
}

fn draft(name: &str, visibility: Visibility) -> ShortcutDraft {
    ShortcutDraft {
        name: name.to_string(),
        link: format!("https://example.com/{}", name),
        title: format!("{} title", name),
        description: "a shortcut".to_string(),
        tags: vec!["docs".to_string(), "team".to_string()],
        visibility,
        og_metadata: None,
    }
}

fn browser_context() -> RequestContext {
    RequestContext::new(
        Some("203.0.113.7".to_string()),
        Some("https://search.example".to_string()),
        Some(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        ),
    )
}

/// Store whose activity log rejects every append
struct FailingActivityStore {
    inner: Arc<SeaOrmStore>,
}

#[async_trait]
impl Store for FailingActivityStore {
    fn backend_name(&self) -> &str {
        "failing"
    }

    async fn create_shortcut(&self, new: NewShortcut) -> Result<Shortcut> {
        self.inner.create_shortcut(new).await
    }

    async fn list_shortcuts(&self, find: &FindShortcut) -> Result<Vec<Shortcut>> {
        self.inner.list_shortcuts(find).await
    }

    async fn get_shortcut(&self, find: &FindShortcut) -> Result<Option<Shortcut>> {
        self.inner.get_shortcut(find).await
    }

    async fn update_shortcut(&self, id: i32, patch: &ShortcutPatch) -> Result<Shortcut> {
        self.inner.update_shortcut(id, patch).await
    }

    async fn delete_shortcut(&self, id: i32) -> Result<()> {
        self.inner.delete_shortcut(id).await
    }

    async fn create_collection(&self, new: NewCollection) -> Result<Collection> {
        self.inner.create_collection(new).await
    }

    async fn list_collections(&self, find: &FindCollection) -> Result<Vec<Collection>> {
        self.inner.list_collections(find).await
    }

    async fn get_collection(&self, find: &FindCollection) -> Result<Option<Collection>> {
        self.inner.get_collection(find).await
    }

    async fn update_collection(&self, id: i32, patch: &CollectionPatch) -> Result<Collection> {
        self.inner.update_collection(id, patch).await
    }

    async fn delete_collection(&self, id: i32) -> Result<()> {
        self.inner.delete_collection(id).await
    }

    async fn create_user(&self, new: NewUser) -> Result<User> {
        self.inner.create_user(new).await
    }

    async fn get_user(&self, find: &FindUser) -> Result<Option<User>> {
        self.inner.get_user(find).await
    }

    async fn create_activity(&self, _new: NewActivity) -> Result<Activity> {
        Err(LinkhubError::database_operation("activity table is read-only"))
    }

    async fn list_activities(&self, find: &FindActivity) -> Result<Vec<Activity>> {
        self.inner.list_activities(find).await
    }

    async fn count_activities(&self, find: &FindActivity) -> Result<u64> {
        self.inner.count_activities(find).await
    }

    async fn get_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> Result<Option<WorkspaceSetting>> {
        self.inner.get_workspace_setting(key).await
    }

    async fn upsert_workspace_setting(
        &self,
        setting: WorkspaceSetting,
    ) -> Result<WorkspaceSetting> {
        self.inner.upsert_workspace_setting(setting).await
    }
}

// =============================================================================
// Create / Get
// =============================================================================

#[tokio::test]
async fn test_create_then_get_by_id_round_trips() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store.clone(), NoopMetrics::arc());

    let created = service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Workspace))
        .await
        .unwrap();
    let fetched = service
        .get_shortcut_by_id(created.shortcut.id, Some(&owner))
        .await
        .unwrap();

    assert_eq!(fetched.shortcut.name, "docs");
    assert_eq!(fetched.shortcut.link, "https://example.com/docs");
    assert_eq!(fetched.shortcut.title, "docs title");
    assert_eq!(fetched.shortcut.tags, vec!["docs", "team"]);
    assert_eq!(fetched.shortcut.visibility, Visibility::Workspace);
    assert_eq!(fetched.shortcut.creator_id, owner.id);
    assert_eq!(fetched.view_count, 0);
}

#[tokio::test]
async fn test_create_records_creation_activity() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store.clone(), NoopMetrics::arc());

    let created = service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();

    let activities = store
        .list_activities(&FindActivity {
            activity_type: Some(ActivityType::ShortcutCreate),
            shortcut_id: Some(created.shortcut.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].creator_id, owner.id);
}

#[tokio::test]
async fn test_create_requires_actor() {
    let (store, _temp) = create_test_store().await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    let err = service
        .create_shortcut(None, draft("docs", Visibility::Public))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

#[tokio::test]
async fn test_create_rejects_blank_name_or_link() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    let mut blank_name = draft("docs", Visibility::Public);
    blank_name.name = "   ".to_string();
    let err = service
        .create_shortcut(Some(&owner), blank_name)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let mut blank_link = draft("docs", Visibility::Public);
    blank_link.link = String::new();
    let err = service
        .create_shortcut(Some(&owner), blank_link)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_create_fails_when_activity_cannot_be_stored() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let failing = Arc::new(FailingActivityStore {
        inner: store.clone(),
    });
    let service = ShortcutService::new(failing, NoopMetrics::arc());

    let err = service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    // 无回滚：短链接行仍然存在
    let persisted = store
        .get_shortcut(&FindShortcut {
            name: Some("docs".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(persisted.is_some());
}

#[tokio::test]
async fn test_get_by_name_is_case_sensitive() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    service
        .create_shortcut(Some(&owner), draft("Docs", Visibility::Public))
        .await
        .unwrap();

    let err = service
        .get_shortcut("docs", None, false, &RequestContext::empty())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(
        service
            .get_shortcut("Docs", None, false, &RequestContext::empty())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_private_shortcut_hidden_from_others() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let other = create_user(store.as_ref(), "other", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    service
        .create_shortcut(Some(&owner), draft("secret", Visibility::Private))
        .await
        .unwrap();

    let ctx = RequestContext::empty();
    assert!(
        service
            .get_shortcut("secret", Some(&owner), false, &ctx)
            .await
            .is_ok()
    );
    let err = service
        .get_shortcut("secret", Some(&other), false, &ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    let err = service
        .get_shortcut("secret", None, false, &ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

// =============================================================================
// View recording
// =============================================================================

#[tokio::test]
async fn test_recorded_views_increase_view_count() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store.clone(), NoopMetrics::arc());

    service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();

    let ctx = browser_context();
    service.get_shortcut("docs", None, true, &ctx).await.unwrap();
    let view = service
        .get_shortcut("docs", Some(&owner), true, &ctx)
        .await
        .unwrap();
    assert_eq!(view.view_count, 2);

    // 匿名访问记为系统用户
    let views = store
        .list_activities(&FindActivity {
            activity_type: Some(ActivityType::ShortcutView),
            shortcut_id: Some(view.shortcut.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(views[0].creator_id, 0);
    assert_eq!(views[1].creator_id, owner.id);
}

#[tokio::test]
async fn test_missing_transport_metadata_does_not_fail_get() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();

    let view = service
        .get_shortcut("docs", None, true, &RequestContext::empty())
        .await
        .unwrap();
    assert_eq!(view.view_count, 0);

    let no_agent = RequestContext::new(Some("10.0.0.1".to_string()), None, None);
    let view = service
        .get_shortcut("docs", None, true, &no_agent)
        .await
        .unwrap();
    assert_eq!(view.view_count, 0);
}

#[tokio::test]
async fn test_failing_view_recording_does_not_fail_get() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    ShortcutService::new(store.clone(), NoopMetrics::arc())
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();

    let failing = Arc::new(FailingActivityStore { inner: store });
    let service = ShortcutService::new(failing, NoopMetrics::arc());

    let view = service
        .get_shortcut("docs", None, true, &browser_context())
        .await
        .unwrap();
    assert_eq!(view.shortcut.name, "docs");
    assert_eq!(view.view_count, 0);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_empty_mask_rejected_before_lookup() {
    let (store, _temp) = create_test_store().await;
    let service = ShortcutService::new(store, NoopMetrics::arc());
    let empty: [&str; 0] = [];

    // 目标不存在、匿名调用，仍然先返回 InvalidArgument
    let err = service
        .update_shortcut(None, 9999, &empty, ShortcutDraft::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_unknown_mask_path_rejected() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    let created = service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();
    let err = service
        .update_shortcut(
            Some(&owner),
            created.shortcut.id,
            &["view_count"],
            ShortcutDraft::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_tags_mask_changes_only_tags() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    let created = service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();

    let mut changes = draft("renamed", Visibility::Private);
    changes.title = "Another title".to_string();
    changes.tags = vec!["rust".to_string()];

    let updated = service
        .update_shortcut(Some(&owner), created.shortcut.id, &["tags"], changes)
        .await
        .unwrap();

    assert_eq!(updated.shortcut.tags, vec!["rust"]);
    assert_eq!(updated.shortcut.title, "docs title");
    assert_eq!(updated.shortcut.name, "docs");
    assert_eq!(updated.shortcut.visibility, Visibility::Public);
}

#[tokio::test]
async fn test_og_metadata_replaced_when_supplied() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    let created = service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();

    let mut changes = ShortcutDraft::default();
    changes.og_metadata = Some(OpenGraphMetadata {
        title: "Preview".to_string(),
        description: String::new(),
        image: "https://img.example/docs.png".to_string(),
    });
    let updated = service
        .update_shortcut(Some(&owner), created.shortcut.id, &["og_metadata"], changes)
        .await
        .unwrap();

    assert_eq!(updated.shortcut.og_metadata.title, "Preview");
    assert_eq!(
        updated.shortcut.og_metadata.image,
        "https://img.example/docs.png"
    );
}

#[tokio::test]
async fn test_private_update_by_other_denied_admin_allowed() {
    let (store, _temp) = create_test_store().await;
    let alice = create_user(store.as_ref(), "alice", Role::User).await;
    let bob = create_user(store.as_ref(), "bob", Role::User).await;
    let admin = create_user(store.as_ref(), "root", Role::Admin).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    let created = service
        .create_shortcut(Some(&alice), draft("abc", Visibility::Private))
        .await
        .unwrap();

    let mut changes = ShortcutDraft::default();
    changes.title = "Changed".to_string();

    let err = service
        .update_shortcut(Some(&bob), created.shortcut.id, &["title"], changes.clone())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);

    let updated = service
        .update_shortcut(Some(&admin), created.shortcut.id, &["title"], changes)
        .await
        .unwrap();
    assert_eq!(updated.shortcut.title, "Changed");
}

#[tokio::test]
async fn test_update_missing_shortcut_not_found() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    let err = service
        .update_shortcut(Some(&owner), 4242, &["title"], ShortcutDraft::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// =============================================================================
// List / Delete
// =============================================================================

#[tokio::test]
async fn test_list_respects_visibility() {
    let (store, _temp) = create_test_store().await;
    let alice = create_user(store.as_ref(), "alice", Role::User).await;
    let bob = create_user(store.as_ref(), "bob", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    for (name, visibility) in [
        ("public", Visibility::Public),
        ("workspace", Visibility::Workspace),
        ("alice-private", Visibility::Private),
    ] {
        service
            .create_shortcut(Some(&alice), draft(name, visibility))
            .await
            .unwrap();
    }
    service
        .create_shortcut(Some(&bob), draft("bob-private", Visibility::Private))
        .await
        .unwrap();

    let names = |views: Vec<linkhub::services::ShortcutView>| {
        let mut names: Vec<String> = views.into_iter().map(|v| v.shortcut.name).collect();
        names.sort();
        names
    };

    assert_eq!(names(service.list_shortcuts(None).await.unwrap()), vec!["public"]);
    assert_eq!(
        names(service.list_shortcuts(Some(&alice)).await.unwrap()),
        vec!["alice-private", "public", "workspace"]
    );
    assert_eq!(
        names(service.list_shortcuts(Some(&bob)).await.unwrap()),
        vec!["bob-private", "public", "workspace"]
    );
}

#[tokio::test]
async fn test_delete_then_analytics_not_found_and_history_kept() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store.clone(), NoopMetrics::arc());

    let created = service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();
    let id = created.shortcut.id;
    service
        .get_shortcut("docs", None, true, &browser_context())
        .await
        .unwrap();

    service.delete_shortcut(Some(&owner), "docs").await.unwrap();

    let err = service.get_shortcut_analytics("docs").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = service.get_shortcut_analytics_by_id(id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let orphaned = store
        .count_activities(&FindActivity {
            shortcut_id: Some(id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(orphaned, 2);
}

#[tokio::test]
async fn test_delete_by_non_owner_denied() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let other = create_user(store.as_ref(), "other", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();

    let err = service
        .delete_shortcut(Some(&other), "docs")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    let err = service.delete_shortcut(None, "docs").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    let err = service
        .delete_shortcut(Some(&owner), "missing")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_analytics_groups_recorded_views() {
    let (store, _temp) = create_test_store().await;
    let owner = create_user(store.as_ref(), "owner", Role::User).await;
    let service = ShortcutService::new(store, NoopMetrics::arc());

    service
        .create_shortcut(Some(&owner), draft("docs", Visibility::Public))
        .await
        .unwrap();
    for _ in 0..3 {
        service
            .get_shortcut("docs", None, true, &browser_context())
            .await
            .unwrap();
    }

    let analytics = service.get_shortcut_analytics("docs").await.unwrap();
    assert_eq!(analytics.references.len(), 1);
    assert_eq!(analytics.references[0].name, "https://search.example");
    assert_eq!(analytics.references[0].count, 3);
    assert_eq!(analytics.devices.iter().map(|i| i.count).sum::<u64>(), 3);
    assert_eq!(analytics.browsers.len(), 1);
    assert_eq!(analytics.browsers[0].name, "Chrome");
}

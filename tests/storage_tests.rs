//! SeaOrmStore tests
//!
//! Query contracts of the SQLite backend.

use std::sync::{Arc, Once};

use tempfile::TempDir;

use linkhub::config::init_config;
use linkhub::errors::ErrorKind;
use linkhub::storage::{
    ActivityLevel, ActivityType, FindActivity, FindShortcut, FindUser, NewActivity, NewShortcut,
    NewUser, OpenGraphMetadata, Role, RowStatus, SeaOrmStore, ShortcutPatch, Store, Visibility,
    WorkspaceSetting, WorkspaceSettingKey,
};

static INIT: Once = Once::new();

async fn create_test_store() -> (Arc<SeaOrmStore>, TempDir) {
    INIT.call_once(|| {
        init_config();
    });

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("storage.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let store = Arc::new(
        SeaOrmStore::new(&db_url, "sqlite")
            .await
            .expect("Failed to create store"),
    );
    (store, temp_dir)
}

fn new_shortcut(name: &str, creator_id: i32, visibility: Visibility) -> NewShortcut {
    NewShortcut {
        creator_id,
        name: name.to_string(),
        link: format!("https://example.com/{}", name),
        title: String::new(),
        description: String::new(),
        tags: vec!["a".to_string(), "b".to_string()],
        visibility,
        og_metadata: OpenGraphMetadata::default(),
    }
}

fn view_activity(shortcut_id: i32) -> NewActivity {
    NewActivity {
        creator_id: 0,
        activity_type: ActivityType::ShortcutView,
        level: ActivityLevel::Info,
        payload: format!(
            r#"{{"shortcutId":{},"ip":"127.0.0.1","referer":"","userAgent":"curl/8.0"}}"#,
            shortcut_id
        ),
    }
}

#[tokio::test]
async fn test_backend_name() {
    let (store, _temp) = create_test_store().await;
    assert_eq!(store.backend_name(), "sqlite");
}

#[tokio::test]
async fn test_shortcut_name_is_unique() {
    let (store, _temp) = create_test_store().await;

    store
        .create_shortcut(new_shortcut("docs", 1, Visibility::Public))
        .await
        .unwrap();
    let err = store
        .create_shortcut(new_shortcut("docs", 2, Visibility::Public))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_filters_combine_with_and() {
    let (store, _temp) = create_test_store().await;

    store
        .create_shortcut(new_shortcut("p1", 1, Visibility::Public))
        .await
        .unwrap();
    store
        .create_shortcut(new_shortcut("w1", 1, Visibility::Workspace))
        .await
        .unwrap();
    store
        .create_shortcut(new_shortcut("x2", 2, Visibility::Private))
        .await
        .unwrap();

    let all = store.list_shortcuts(&FindShortcut::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let creator_one_public = store
        .list_shortcuts(&FindShortcut {
            creator_id: Some(1),
            visibility_list: vec![Visibility::Public, Visibility::Private],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(creator_one_public.len(), 1);
    assert_eq!(creator_one_public[0].name, "p1");
}

#[tokio::test]
async fn test_patch_only_touches_set_fields() {
    let (store, _temp) = create_test_store().await;

    let created = store
        .create_shortcut(new_shortcut("docs", 1, Visibility::Public))
        .await
        .unwrap();
    let updated = store
        .update_shortcut(
            created.id,
            &ShortcutPatch {
                tags: Some(vec!["x".to_string(), "y".to_string(), "z".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.tags, vec!["x", "y", "z"]);
    assert_eq!(updated.link, created.link);
    assert_eq!(updated.visibility, Visibility::Public);
    assert_eq!(updated.row_status, RowStatus::Normal);
}

#[tokio::test]
async fn test_update_and_delete_missing_rows() {
    let (store, _temp) = create_test_store().await;

    let err = store
        .update_shortcut(
            77,
            &ShortcutPatch {
                title: Some("t".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = store.delete_shortcut(77).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_activity_payload_filter() {
    let (store, _temp) = create_test_store().await;

    for id in [1, 1, 2, 11] {
        store.create_activity(view_activity(id)).await.unwrap();
    }
    store
        .create_activity(NewActivity {
            activity_type: ActivityType::ShortcutCreate,
            payload: r#"{"shortcutId":1}"#.to_string(),
            ..view_activity(1)
        })
        .await
        .unwrap();

    let views_of_one = FindActivity {
        activity_type: Some(ActivityType::ShortcutView),
        level: Some(ActivityLevel::Info),
        shortcut_id: Some(1),
        ..Default::default()
    };
    assert_eq!(store.count_activities(&views_of_one).await.unwrap(), 2);

    let all_of_one = FindActivity {
        shortcut_id: Some(1),
        ..Default::default()
    };
    let activities = store.list_activities(&all_of_one).await.unwrap();
    assert_eq!(activities.len(), 3);
    assert!(activities.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_user_lookup() {
    let (store, _temp) = create_test_store().await;

    let created = store
        .create_user(NewUser {
            username: "alice".to_string(),
            nickname: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap();

    let by_name = store
        .get_user(&FindUser {
            username: Some("alice".to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
        .expect("user exists");
    assert_eq!(by_name.id, created.id);
    assert_eq!(by_name.role, Role::Admin);

    let missing = store
        .get_user(&FindUser {
            id: Some(created.id + 100),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_workspace_setting_upsert() {
    let (store, _temp) = create_test_store().await;

    assert!(
        store
            .get_workspace_setting(WorkspaceSettingKey::InstanceUrl)
            .await
            .unwrap()
            .is_none()
    );

    for value in ["https://old.example", "https://links.example"] {
        store
            .upsert_workspace_setting(WorkspaceSetting {
                key: WorkspaceSettingKey::InstanceUrl,
                value: value.to_string(),
            })
            .await
            .unwrap();
    }

    let setting = store
        .get_workspace_setting(WorkspaceSettingKey::InstanceUrl)
        .await
        .unwrap()
        .expect("setting stored");
    assert_eq!(setting.value, "https://links.example");
}

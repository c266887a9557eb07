pub mod activity;
pub mod collection;
pub mod shortcut;
pub mod user;
pub mod workspace_setting;

pub use activity::Entity as ActivityEntity;
pub use collection::Entity as CollectionEntity;
pub use shortcut::Entity as ShortcutEntity;
pub use user::Entity as UserEntity;
pub use workspace_setting::Entity as WorkspaceSettingEntity;

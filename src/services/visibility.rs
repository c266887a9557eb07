//! Visibility policy
//!
//! Pure read/write predicates shared by shortcuts and collections.

use crate::storage::{Collection, Role, Shortcut, User, Visibility};

/// 已认证的请求者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i32, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

/// Entities carrying an owner and a visibility scope
pub trait Scoped {
    fn creator_id(&self) -> i32;
    fn visibility(&self) -> Visibility;
}

impl Scoped for Shortcut {
    fn creator_id(&self) -> i32 {
        self.creator_id
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }
}

impl Scoped for Collection {
    fn creator_id(&self) -> i32 {
        self.creator_id
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// 匿名只能读 Public；已登录用户除了他人的 Private 都可读
pub fn can_read<E: Scoped + ?Sized>(actor: Option<&Actor>, entity: &E) -> bool {
    match actor {
        None => entity.visibility() == Visibility::Public,
        Some(actor) => {
            entity.visibility() != Visibility::Private || actor.id == entity.creator_id()
        }
    }
}

/// 只有创建者或管理员可写，与可见性无关
pub fn can_write<E: Scoped + ?Sized>(actor: Option<&Actor>, entity: &E) -> bool {
    match actor {
        None => false,
        Some(actor) => actor.id == entity.creator_id() || actor.is_admin(),
    }
}

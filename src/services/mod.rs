//! Service layer for business logic
//!
//! Services are shared between the HTTP handlers and the integration tests.
//! Every operation takes the acting user explicitly as `Option<&Actor>`.

mod activity_recorder;
mod analytics_service;
mod collection_service;
mod field_mask;
mod metadata_service;
mod shortcut_service;
pub mod user_agent;
pub mod visibility;

pub use activity_recorder::*;
pub use analytics_service::*;
pub use collection_service::*;
pub use field_mask::*;
pub use metadata_service::*;
pub use shortcut_service::*;
pub use visibility::{Actor, Scoped, can_read, can_write};

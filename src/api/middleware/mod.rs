pub mod auth;

pub use auth::{ActorAuth, CurrentActor};

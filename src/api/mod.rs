//! HTTP surface
//!
//! - `middleware`: actor resolution from bearer token or cookie
//! - `services::v1`: JSON API under `/api/v1`
//! - `services::frontend`: embedded SPA with link-preview metadata, robots and sitemap

pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;

//! Linkhub - self-hosted shortcut and collection manager
//!
//! Named short links ("shortcuts") and grouped collections, each with a
//! visibility scope, an append-only activity log feeding view analytics,
//! and link-preview metadata for the embedded frontend.
//!
//! # Features
//! - **metrics**: Prometheus event counters and `/metrics` export
//!
//! # Architecture
//! - `storage`: `Store` trait and the SeaORM backend
//! - `services`: visibility policy, resolvers, activity recorder, analytics, metadata
//! - `api`: HTTP handlers and actor resolution middleware
//! - `config`: Configuration management
//! - `runtime`: Application startup and the HTTP server
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod metrics_core;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;

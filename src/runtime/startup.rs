use std::sync::Arc;

use actix_web::web;
use anyhow::{Context, Result};
use tracing::info;

use crate::api::services::{api_v1_routes, frontend_routes};
use crate::config::FrontendConfig;
use crate::metrics_core::MetricsRecorder;
use crate::services::{CollectionService, MetadataService, ShortcutService};
use crate::storage::{StorageFactory, Store};

/// Services shared by all workers
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn Store>,
    pub shortcuts: Arc<ShortcutService>,
    pub collections: Arc<CollectionService>,
    pub metadata: Arc<MetadataService>,
    pub metrics: Arc<dyn MetricsRecorder>,
}

impl AppServices {
    /// 前端前缀与已有路由冲突时返回 InvalidArgument
    pub fn new(
        store: Arc<dyn Store>,
        metrics: Arc<dyn MetricsRecorder>,
        frontend: &FrontendConfig,
    ) -> crate::errors::Result<Self> {
        Ok(Self {
            shortcuts: Arc::new(ShortcutService::new(store.clone(), metrics.clone())),
            collections: Arc::new(CollectionService::new(store.clone(), metrics.clone())),
            metadata: Arc::new(MetadataService::new(store.clone(), frontend)?),
            metrics,
            store,
        })
    }

    /// 注册 app_data 与全部路由（API + 前端）
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.shortcuts.clone()))
            .app_data(web::Data::new(self.collections.clone()))
            .app_data(web::Data::new(self.metadata.clone()))
            .app_data(web::Data::new(self.metrics.clone()))
            .service(api_v1_routes());

        let prefix = self.metadata.shortcut_prefix().to_string();
        frontend_routes(cfg, &prefix);
    }
}

fn select_metrics() -> Arc<dyn MetricsRecorder> {
    #[cfg(feature = "metrics")]
    {
        crate::metrics::PrometheusMetrics::arc()
    }
    #[cfg(not(feature = "metrics"))]
    {
        crate::metrics_core::TracingMetrics::arc()
    }
}

/// 连接存储、执行迁移并组装服务
pub async fn prepare_server_startup() -> Result<AppServices> {
    let start_time = std::time::Instant::now();

    let store = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.backend_name());

    let config = crate::config::get_config();
    let services = AppServices::new(store, select_metrics(), &config.frontend)
        .context("Invalid frontend configuration")?;

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(services)
}

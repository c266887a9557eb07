//! Frontend pages, robots.txt and sitemap.xml
//!
//! 前端页面由 `web/dist/` 嵌入；访问短链接或集合页面时，调用方可读则在
//! `index.html` 中注入预览元数据，否则返回原始页面。页面访问只发送遥测事件，
//! 不写入活动记录。

use std::sync::Arc;

use actix_web::{HttpResponse, Result, web};
use rust_embed::Embed;
use tracing::{debug, trace};

use crate::api::constants::COLLECTION_ROUTE_PREFIX;
use crate::api::middleware::CurrentActor;
use crate::errors::{ErrorKind, LinkhubError};
use crate::metrics_core::MetricsRecorder;
use crate::services::{
    CollectionService, MetadataService, RequestContext, SeoMetadata, ShortcutService,
};

#[derive(Embed)]
#[folder = "web/dist/"]
struct FrontendAssets;

fn index_html() -> String {
    match FrontendAssets::get("index.html") {
        Some(content) => String::from_utf8_lossy(&content.data).into_owned(),
        None => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/web/dist/index.html")).to_string(),
    }
}

fn html_page(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn internal_error(err: &LinkhubError) -> HttpResponse {
    tracing::error!("Frontend request failed: {}", err);
    HttpResponse::InternalServerError().body("Internal Server Error")
}

/// 读取失败（不存在或无权限）时返回原始页面，存储错误返回 500
fn page_for(result: std::result::Result<SeoMetadata, LinkhubError>) -> HttpResponse {
    match result {
        Ok(metadata) => html_page(metadata.inject(&index_html())),
        Err(e) if e.kind() == ErrorKind::Internal => internal_error(&e),
        Err(e) => {
            debug!("Serving raw page: {}", e);
            html_page(index_html())
        }
    }
}

pub struct FrontendService;

impl FrontendService {
    pub async fn handle_index(metadata: web::Data<Arc<MetadataService>>) -> Result<HttpResponse> {
        trace!("Serving frontend index page");
        Ok(html_page(metadata.default_metadata().inject(&index_html())))
    }

    pub async fn handle_shortcut_page(
        actor: CurrentActor,
        path: web::Path<String>,
        shortcuts: web::Data<Arc<ShortcutService>>,
        metadata: web::Data<Arc<MetadataService>>,
        metrics: web::Data<Arc<dyn MetricsRecorder>>,
    ) -> Result<HttpResponse> {
        let result = shortcuts
            .get_shortcut(&path, actor.actor(), false, &RequestContext::empty())
            .await
            .map(|view| metadata.shortcut_metadata(&view.shortcut));
        if result.is_ok() {
            metrics.record_event("shortcut view");
        }
        Ok(page_for(result))
    }

    pub async fn handle_collection_page(
        actor: CurrentActor,
        path: web::Path<String>,
        collections: web::Data<Arc<CollectionService>>,
        metadata: web::Data<Arc<MetadataService>>,
        metrics: web::Data<Arc<dyn MetricsRecorder>>,
    ) -> Result<HttpResponse> {
        let result = collections
            .get_collection(&path, actor.actor(), false, &RequestContext::empty())
            .await
            .map(|collection| metadata.collection_metadata(&collection));
        if result.is_ok() {
            metrics.record_event("collection view");
        }
        Ok(page_for(result))
    }

    pub async fn handle_robots(metadata: web::Data<Arc<MetadataService>>) -> Result<HttpResponse> {
        Ok(match metadata.robots().await {
            Ok(Some(body)) => HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(body),
            Ok(None) => HttpResponse::NotFound().body("Not Found"),
            Err(e) => internal_error(&e),
        })
    }

    pub async fn handle_sitemap(metadata: web::Data<Arc<MetadataService>>) -> Result<HttpResponse> {
        Ok(match metadata.sitemap().await {
            Ok(Some(body)) => HttpResponse::Ok()
                .content_type("application/xml; charset=utf-8")
                .body(body),
            Ok(None) => HttpResponse::NotFound().body("Not Found"),
            Err(e) => internal_error(&e),
        })
    }

    #[cfg(feature = "metrics")]
    pub async fn handle_metrics() -> Result<HttpResponse> {
        Ok(HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(crate::metrics::METRICS.export()))
    }
}

/// 前端路由
///
/// - GET /
/// - GET /robots.txt, /sitemap.xml
/// - GET /{shortcut_prefix}/{name}
/// - GET /c/{name}
pub fn frontend_routes(cfg: &mut web::ServiceConfig, shortcut_prefix: &str) {
    cfg.route("/", web::get().to(FrontendService::handle_index))
        .route("/robots.txt", web::get().to(FrontendService::handle_robots))
        .route("/sitemap.xml", web::get().to(FrontendService::handle_sitemap))
        .route(
            &format!("/{}/{{name}}", shortcut_prefix),
            web::get().to(FrontendService::handle_shortcut_page),
        )
        .route(
            &format!("/{}/{{name}}", COLLECTION_ROUTE_PREFIX),
            web::get().to(FrontendService::handle_collection_page),
        );

    #[cfg(feature = "metrics")]
    cfg.route("/metrics", web::get().to(FrontendService::handle_metrics));
}

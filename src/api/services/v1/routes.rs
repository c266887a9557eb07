//! `/api/v1` 路由配置

use actix_web::web;

use super::collections::{
    create_collection, delete_collection, get_collection_by_id, get_collection_by_name,
    list_collections, update_collection,
};
use super::shortcuts::{
    create_shortcut, delete_shortcut, get_shortcut_analytics, get_shortcut_analytics_by_id,
    get_shortcut_by_id, get_shortcut_by_name, list_shortcuts, update_shortcut,
};

/// 短链接路由 `/shortcuts`
///
/// - GET/POST /shortcuts
/// - GET/DELETE /shortcuts/name/{name}
/// - GET /shortcuts/name/{name}/analytics
/// - GET/PATCH /shortcuts/{id}
/// - GET /shortcuts/{id}/analytics
pub fn shortcuts_routes() -> actix_web::Scope {
    web::scope("/shortcuts")
        .route("", web::get().to(list_shortcuts))
        .route("", web::post().to(create_shortcut))
        .route(
            "/name/{name}/analytics",
            web::get().to(get_shortcut_analytics),
        )
        .route("/name/{name}", web::get().to(get_shortcut_by_name))
        .route("/name/{name}", web::delete().to(delete_shortcut))
        .route(
            "/{id}/analytics",
            web::get().to(get_shortcut_analytics_by_id),
        )
        .route("/{id}", web::get().to(get_shortcut_by_id))
        .route("/{id}", web::patch().to(update_shortcut))
}

/// 集合路由 `/collections`
pub fn collections_routes() -> actix_web::Scope {
    web::scope("/collections")
        .route("", web::get().to(list_collections))
        .route("", web::post().to(create_collection))
        .route("/name/{name}", web::get().to(get_collection_by_name))
        .route("/name/{name}", web::delete().to(delete_collection))
        .route("/{id}", web::get().to(get_collection_by_id))
        .route("/{id}", web::patch().to(update_collection))
}

/// 组合所有 v1 路由
pub fn api_v1_routes() -> actix_web::Scope {
    web::scope(crate::api::constants::API_V1_PREFIX)
        .service(shortcuts_routes())
        .service(collections_routes())
}

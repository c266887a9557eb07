//! 短链接 API

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::trace;

use crate::api::middleware::CurrentActor;
use crate::api::services::request_context;
use crate::services::{ShortcutDraft, ShortcutService};

use super::helpers::api_result;
use super::types::{GetByNameQuery, UpdateShortcutRequest};

pub async fn list_shortcuts(
    actor: CurrentActor,
    service: web::Data<Arc<ShortcutService>>,
) -> ActixResult<impl Responder> {
    trace!("API: list shortcuts");
    Ok(api_result(service.list_shortcuts(actor.actor()).await))
}

pub async fn create_shortcut(
    actor: CurrentActor,
    service: web::Data<Arc<ShortcutService>>,
    body: web::Json<ShortcutDraft>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service
            .create_shortcut(actor.actor(), body.into_inner())
            .await,
    ))
}

pub async fn get_shortcut_by_name(
    req: HttpRequest,
    actor: CurrentActor,
    service: web::Data<Arc<ShortcutService>>,
    path: web::Path<String>,
    query: web::Query<GetByNameQuery>,
) -> ActixResult<impl Responder> {
    let ctx = request_context(&req);
    Ok(api_result(
        service
            .get_shortcut(&path, actor.actor(), query.record_view, &ctx)
            .await,
    ))
}

pub async fn get_shortcut_by_id(
    actor: CurrentActor,
    service: web::Data<Arc<ShortcutService>>,
    path: web::Path<i32>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service
            .get_shortcut_by_id(path.into_inner(), actor.actor())
            .await,
    ))
}

pub async fn update_shortcut(
    actor: CurrentActor,
    service: web::Data<Arc<ShortcutService>>,
    path: web::Path<i32>,
    body: web::Json<UpdateShortcutRequest>,
) -> ActixResult<impl Responder> {
    let UpdateShortcutRequest {
        update_mask,
        shortcut,
    } = body.into_inner();
    Ok(api_result(
        service
            .update_shortcut(actor.actor(), path.into_inner(), &update_mask, shortcut)
            .await,
    ))
}

pub async fn delete_shortcut(
    actor: CurrentActor,
    service: web::Data<Arc<ShortcutService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.delete_shortcut(actor.actor(), &path).await))
}

pub async fn get_shortcut_analytics(
    service: web::Data<Arc<ShortcutService>>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    Ok(api_result(service.get_shortcut_analytics(&path).await))
}

pub async fn get_shortcut_analytics_by_id(
    service: web::Data<Arc<ShortcutService>>,
    path: web::Path<i32>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service
            .get_shortcut_analytics_by_id(path.into_inner())
            .await,
    ))
}

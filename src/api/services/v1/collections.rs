//! 集合 API

use std::sync::Arc;

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use tracing::trace;

use crate::api::middleware::CurrentActor;
use crate::api::services::request_context;
use crate::services::{CollectionDraft, CollectionService};

use super::helpers::api_result;
use super::types::{GetByNameQuery, UpdateCollectionRequest};

pub async fn list_collections(
    actor: CurrentActor,
    service: web::Data<Arc<CollectionService>>,
) -> ActixResult<impl Responder> {
    trace!("API: list collections");
    Ok(api_result(service.list_collections(actor.actor()).await))
}

pub async fn create_collection(
    actor: CurrentActor,
    service: web::Data<Arc<CollectionService>>,
    body: web::Json<CollectionDraft>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service
            .create_collection(actor.actor(), body.into_inner())
            .await,
    ))
}

pub async fn get_collection_by_name(
    req: HttpRequest,
    actor: CurrentActor,
    service: web::Data<Arc<CollectionService>>,
    path: web::Path<String>,
    query: web::Query<GetByNameQuery>,
) -> ActixResult<impl Responder> {
    let ctx = request_context(&req);
    Ok(api_result(
        service
            .get_collection(&path, actor.actor(), query.record_view, &ctx)
            .await,
    ))
}

pub async fn get_collection_by_id(
    actor: CurrentActor,
    service: web::Data<Arc<CollectionService>>,
    path: web::Path<i32>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service
            .get_collection_by_id(path.into_inner(), actor.actor())
            .await,
    ))
}

pub async fn update_collection(
    actor: CurrentActor,
    service: web::Data<Arc<CollectionService>>,
    path: web::Path<i32>,
    body: web::Json<UpdateCollectionRequest>,
) -> ActixResult<impl Responder> {
    let UpdateCollectionRequest {
        update_mask,
        collection,
    } = body.into_inner();
    Ok(api_result(
        service
            .update_collection(actor.actor(), path.into_inner(), &update_mask, collection)
            .await,
    ))
}

pub async fn delete_collection(
    actor: CurrentActor,
    service: web::Data<Arc<CollectionService>>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service.delete_collection(actor.actor(), &path).await,
    ))
}

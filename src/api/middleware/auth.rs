//! Actor resolution middleware
//!
//! Resolves the requesting user from `Authorization: Bearer <jwt>` first,
//! then from the access-token cookie. The middleware never rejects a request:
//! an absent or invalid token simply leaves the request anonymous, and the
//! visibility policy decides what an anonymous caller may see.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, ServiceRequest, ServiceResponse},
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, trace, warn};

use crate::api::constants;
use crate::api::jwt::get_jwt_service;
use crate::services::Actor;
use crate::storage::{FindUser, RowStatus, Store};

/// Actor resolution middleware
#[derive(Clone)]
pub struct ActorAuth {
    store: Arc<dyn Store>,
}

impl ActorAuth {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ActorAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ActorAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ActorAuthMiddleware {
            service: Rc::new(service),
            store: self.store.clone(),
        }))
    }
}

pub struct ActorAuthMiddleware<S> {
    service: Rc<S>,
    store: Arc<dyn Store>,
}

/// 从 Authorization header 提取 Bearer token
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
}

fn extract_cookie_token(req: &ServiceRequest) -> Option<String> {
    req.cookie(constants::ACCESS_COOKIE_NAME)
        .map(|c| c.value().to_string())
}

/// 令牌有效且用户存在、未归档时返回 Actor
async fn resolve_actor(store: &dyn Store, token: &str) -> Option<Actor> {
    let claims = match get_jwt_service().validate_access_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Access token validation failed: {}", e);
            return None;
        }
    };

    let user_id = claims.user_id()?;
    match store
        .get_user(&FindUser {
            id: Some(user_id),
            ..Default::default()
        })
        .await
    {
        Ok(Some(user)) if user.row_status == RowStatus::Normal => Some(Actor::from(&user)),
        Ok(_) => {
            debug!("Token subject {} does not match an active user", user_id);
            None
        }
        Err(e) => {
            warn!("Failed to load user {} for token: {}", user_id, e);
            None
        }
    }
}

impl<S, B> Service<ServiceRequest> for ActorAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let store = self.store.clone();

        Box::pin(async move {
            let token = extract_bearer_token(&req).or_else(|| extract_cookie_token(&req));

            if let Some(token) = token {
                if let Some(actor) = resolve_actor(store.as_ref(), &token).await {
                    trace!("Request authenticated as user {}", actor.id);
                    req.extensions_mut().insert(actor);
                }
            }

            srv.call(req).await
        })
    }
}

/// Extractor for the actor resolved by [`ActorAuth`]; `None` when anonymous
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Option<Actor>);

impl CurrentActor {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

impl FromRequest for CurrentActor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(CurrentActor(req.extensions().get::<Actor>().copied())))
    }
}

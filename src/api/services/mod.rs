pub mod frontend;
pub mod v1;

use actix_web::HttpRequest;
use actix_web::http::header;

use crate::services::RequestContext;

pub use frontend::frontend_routes;
pub use v1::api_v1_routes;

fn header_value(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// 从连接与请求头构建 RequestContext
pub fn request_context(req: &HttpRequest) -> RequestContext {
    RequestContext::new(
        req.peer_addr().map(|addr| addr.ip().to_string()),
        header_value(req, header::REFERER),
        header_value(req, header::USER_AGENT),
    )
}

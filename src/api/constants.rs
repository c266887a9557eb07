//! API 模块常量定义

/// Access Token Cookie 名称
pub const ACCESS_COOKIE_NAME: &str = "linkhub.access-token";

/// JSON API 路由前缀
pub const API_V1_PREFIX: &str = "/api/v1";

/// 集合页面前缀，如 /c/{name}
pub const COLLECTION_ROUTE_PREFIX: &str = "c";

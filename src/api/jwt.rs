//! HS256 access-token validation
//!
//! Tokens are issued elsewhere; `sub` carries the numeric user id.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;

/// Global cached JwtService instance
static JWT_SERVICE: OnceLock<JwtService> = OnceLock::new();

/// Get the cached JwtService instance
///
/// Initialized once from the static config on first use.
pub fn get_jwt_service() -> &'static JwtService {
    JWT_SERVICE.get_or_init(JwtService::from_config)
}

/// Access Token Claims
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl AccessClaims {
    /// `sub` 解析为用户 id，非数字视为无效
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// JWT Service for validating tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create JwtService from config
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        // secret 为空时生成随机值，已签发的令牌在重启后全部失效
        let secret = if config.auth.jwt_secret.is_empty() {
            warn!("JWT secret not configured or empty, generating random secret");
            format!(
                "{}{}",
                uuid::Uuid::new_v4().simple(),
                uuid::Uuid::new_v4().simple()
            )
        } else {
            config.auth.jwt_secret.clone()
        };

        Self::new(&secret)
    }

    /// Sign an access token for `user_id`.
    ///
    /// The server never hands these out; this exists for operator tooling
    /// and tests.
    pub fn generate_access_token(
        &self,
        user_id: i32,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate Access Token
    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::{ErrorKind, LinkhubError};

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 短链接/集合错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    PermissionDenied = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 实体错误 3000-3099
    DatabaseError = 3005,
    ActivityRecordFailed = 3010,
}

impl From<&LinkhubError> for ErrorCode {
    fn from(err: &LinkhubError) -> Self {
        match err {
            LinkhubError::ActivityRecord(_) => ErrorCode::ActivityRecordFailed,
            LinkhubError::DatabaseConfig(_)
            | LinkhubError::DatabaseConnection(_)
            | LinkhubError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            other => match other.kind() {
                ErrorKind::NotFound => ErrorCode::NotFound,
                ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
                ErrorKind::InvalidArgument => ErrorCode::BadRequest,
                ErrorKind::Internal => ErrorCode::InternalServerError,
            },
        }
    }
}

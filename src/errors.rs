use std::fmt;

use actix_web::http::StatusCode;

/// 对外可见的错误类别
///
/// 所有存储、序列化、活动记录失败都归入 `Internal`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    InvalidArgument,
    Internal,
}

#[derive(Debug, Clone)]
pub enum LinkhubError {
    NotFound(String),
    PermissionDenied(String),
    InvalidArgument(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    ActivityRecord(String),
    Internal(String),
}

impl LinkhubError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkhubError::NotFound(_) => "E001",
            LinkhubError::PermissionDenied(_) => "E002",
            LinkhubError::InvalidArgument(_) => "E003",
            LinkhubError::DatabaseConfig(_) => "E004",
            LinkhubError::DatabaseConnection(_) => "E005",
            LinkhubError::DatabaseOperation(_) => "E006",
            LinkhubError::Serialization(_) => "E007",
            LinkhubError::ActivityRecord(_) => "E008",
            LinkhubError::Internal(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkhubError::NotFound(_) => "Resource Not Found",
            LinkhubError::PermissionDenied(_) => "Permission Denied",
            LinkhubError::InvalidArgument(_) => "Invalid Argument",
            LinkhubError::DatabaseConfig(_) => "Database Configuration Error",
            LinkhubError::DatabaseConnection(_) => "Database Connection Error",
            LinkhubError::DatabaseOperation(_) => "Database Operation Error",
            LinkhubError::Serialization(_) => "Serialization Error",
            LinkhubError::ActivityRecord(_) => "Activity Record Error",
            LinkhubError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkhubError::NotFound(msg) => msg,
            LinkhubError::PermissionDenied(msg) => msg,
            LinkhubError::InvalidArgument(msg) => msg,
            LinkhubError::DatabaseConfig(msg) => msg,
            LinkhubError::DatabaseConnection(msg) => msg,
            LinkhubError::DatabaseOperation(msg) => msg,
            LinkhubError::Serialization(msg) => msg,
            LinkhubError::ActivityRecord(msg) => msg,
            LinkhubError::Internal(msg) => msg,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LinkhubError::NotFound(_) => ErrorKind::NotFound,
            LinkhubError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            LinkhubError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LinkhubError::DatabaseConfig(_)
            | LinkhubError::DatabaseConnection(_)
            | LinkhubError::DatabaseOperation(_)
            | LinkhubError::Serialization(_)
            | LinkhubError::ActivityRecord(_)
            | LinkhubError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkhubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkhubError {}

// 便捷的构造函数
impl LinkhubError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkhubError::NotFound(msg.into())
    }

    pub fn permission_denied<T: Into<String>>(msg: T) -> Self {
        LinkhubError::PermissionDenied(msg.into())
    }

    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        LinkhubError::InvalidArgument(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkhubError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkhubError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkhubError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkhubError::Serialization(msg.into())
    }

    pub fn activity_record<T: Into<String>>(msg: T) -> Self {
        LinkhubError::ActivityRecord(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        LinkhubError::Internal(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkhubError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkhubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkhubError {
    fn from(err: std::io::Error) -> Self {
        LinkhubError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for LinkhubError {
    fn from(err: serde_json::Error) -> Self {
        LinkhubError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkhubError>;

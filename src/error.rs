use stellar_burger_shared::TOKEN_EXPIRED_MESSAGE;
use thiserror::Error;
use tracing::Level;

// =========================================================
// 错误分类
// =========================================================

/// 错误语义分类，用于日志与界面分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 网络不可达、响应体无法解析
    Transport,
    /// 凭据无效或会话过期
    Authentication,
    /// 资源不存在
    NotFound,
    /// 其余服务端拒绝
    Server,
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    /// 服务端返回非 2xx，或响应体中 `success` 不为 true
    #[error("request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    #[error("malformed response: {0}")]
    Malformed(String),

    /// 需要刷新令牌但本地没有保存
    #[error("no stored credentials")]
    MissingCredentials,
}

impl ApiError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    /// 适合展示给用户的消息；底层未提供时返回 `None`，由调用方替换为默认文案
    pub fn message(&self) -> Option<&str> {
        let msg = match self {
            ApiError::Network(msg) | ApiError::Malformed(msg) => Some(msg.as_str()),
            ApiError::Rejected { message, .. } => message.as_deref(),
            ApiError::MissingCredentials => None,
        };
        msg.filter(|m| !m.trim().is_empty())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) | ApiError::Malformed(_) => ErrorKind::Transport,
            ApiError::MissingCredentials => ErrorKind::Authentication,
            ApiError::Rejected { status, .. } => match status {
                401 | 403 => ErrorKind::Authentication,
                404 => ErrorKind::NotFound,
                _ => ErrorKind::Server,
            },
        }
    }

    /// 日志级别：未登录与资源不存在属于正常流程，只记 info
    pub fn log_level(&self) -> Level {
        match self.kind() {
            ErrorKind::Authentication | ErrorKind::NotFound => Level::INFO,
            ErrorKind::Transport | ErrorKind::Server => Level::WARN,
        }
    }

    /// 按分类记录一次失败的操作
    pub fn report(&self, operation: &str) {
        if self.log_level() == Level::WARN {
            tracing::warn!(operation, error = %self, kind = ?self.kind(), "request failed");
        } else {
            tracing::info!(operation, error = %self, kind = ?self.kind(), "request not fulfilled");
        }
    }

    /// 访问令牌过期，可通过刷新令牌恢复
    pub fn is_token_expired(&self) -> bool {
        matches!(self, ApiError::Rejected { message: Some(m), .. } if m == TOKEN_EXPIRED_MESSAGE)
    }

    /// 转为存入 store 的错误字符串
    pub fn message_or(&self, default: &str) -> String {
        self.message().unwrap_or(default).to_string()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Malformed(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

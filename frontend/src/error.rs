//! 客户端错误类型
//!
//! - [`ApiError::Unauthorized`]: 凭证被拒绝，调用方拿到错误时网关已清除会话
//! - 其他 [`ApiError`]: 请求失败，由发起请求的页面处理
//! - [`AuthError`]: 登录流程失败

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_LOGIN_FAILURE: &str = "Login failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request could not be built: {0}")]
    RequestBuild(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unauthorized{}", fmt_detail(.detail))]
    Unauthorized { detail: Option<String> },
    #[error("request failed with status {status}{}", fmt_detail(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
}

fn fmt_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

impl ApiError {
    /// 将非 2xx 响应转换为错误，并从响应体中取出 `detail`
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        if status == 401 {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Status { status, detail }
        }
    }

    /// 服务端返回的错误信息
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

// FastAPI 返回 `{"detail": "..."}`，校验错误时 detail 是一个列表
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{message}")]
    Failed { message: String },
    #[error("a login request is already in progress")]
    InProgress,
}

impl AuthError {
    pub fn failed(message: impl Into<String>) -> Self {
        AuthError::Failed {
            message: message.into(),
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        AuthError::failed(e.detail().unwrap_or(DEFAULT_LOGIN_FAILURE))
    }
}

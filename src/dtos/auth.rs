// src/dtos/auth.rs
use serde::{Deserialize, Serialize};

/// 经后端验证的用户身份。`/api/auth/current` 的响应不含时间戳字段，因此为 Option。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub pid: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// 登录响应：令牌 + 最小身份。完整身份之后由"当前用户"接口刷新。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub pid: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// 持久化的会话条目：恰好三项字符串，作为一组整体写入/清除，
/// 约定上不存在部分写入的状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub auth_token: String,
    pub user_pid: String,
    pub user_name: String,
}

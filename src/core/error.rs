// src/core/error.rs
use thiserror::Error;

/// 应用程序统一错误类型。这个枚举定义了客户端核心所有可能发生的错误类型，
/// 覆盖网络传输、本地存储、序列化以及后端返回的各类业务失败。
///
/// 同步校验没有对应的错误变体：它是不会失败的纯函数，
/// 连非法数值输入也作为 INVALID_FORMAT 校验错误返回，而不是异常。
#[derive(Error, Debug)]
pub enum AppError {
    /// 网络传输错误。包装 reqwest 的错误，自动转换。连接失败、DNS 失败等都落在这里。
    #[error("Request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// 本地会话存储的 IO 错误。
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误。包装 serde_json 的错误，自动转换。
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// 认证错误（后端返回 401）。抛出之前本地会话缓存已被清空，
    /// 错误本身继续向调用方传播，由 UI 层提示用户重新登录。
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// 请求频率限制（后端返回 429）。限流本身由后端执行，客户端只负责转述。
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// 后端返回的其他非成功状态。保留状态码与响应正文，便于日志排查。
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

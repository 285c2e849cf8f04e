// ==========================================
// 请求头常量：每个发往后端的请求都携带的安全头。注意 HeaderName 要求小写。
// ==========================================

/// API Key 请求头：后端以此识别合法客户端。
pub const HEADER_API_KEY: &str = "x-api-key";

/// 客户端版本头：后端据此做兼容性判断。
pub const HEADER_CLIENT_VERSION: &str = "x-client-version";

/// AJAX 标识头：与后端 CORS/CSRF 策略配套。
pub const HEADER_REQUESTED_WITH: &str = "x-requested-with";

pub const CLIENT_VERSION: &str = "1.0.0";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

// ==========================================
// 业务逻辑常量
// ==========================================

/// 默认防抖静默期（毫秒）：字段停止编辑后到发出远程校验请求的等待时间。
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

use config::{Config as ConfigLoader, Environment};
use dotenvy::dotenv;
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// 后端服务地址。所有请求都转发到这里，本客户端不定义任何接口形状。
    #[serde(default = "default_backend_url", alias = "BACKEND_URL")]
    pub backend_url: String,

    /// API Key（敏感信息），随每个请求通过 x-api-key 头发送
    #[serde(default = "default_api_key", alias = "API_KEY")]
    pub api_key: SecretString,

    /// 防抖静默期（毫秒）：某字段最后一次编辑之后，等待多久才发出远程校验请求。
    #[serde(default = "default_debounce_ms", alias = "DEBOUNCE_MS")]
    pub debounce_ms: u64,

    /// 会话持久化文件路径（令牌 + 最小用户身份，三项作为一组读写）
    #[serde(default = "default_session_file", alias = "SESSION_FILE")]
    pub session_file: String,

    #[serde(default = "default_log", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// 加载配置：
    /// - 支持 `.env`
    /// - 优先从环境变量加载
    pub fn new() -> Self {
        dotenv().ok();

        // 注意：Environment::default() 会把 `FOO__BAR=baz` 映射到 `foo.bar=baz`
        // 并且 try_parsing(true) 会把 "300" 解析成数字等类型。
        let builder = ConfigLoader::builder().add_source(Environment::default().try_parsing(true));

        match builder.build() {
            Ok(config) => config
                .try_deserialize()
                .expect("❌ Failed to deserialize configuration"),
            Err(e) => panic!("❌ Failed to build configuration: {e}"),
        }
    }
}

// --- 默认值函数 ---
fn default_backend_url() -> String {
    "http://localhost:5151".to_string()
}
fn default_api_key() -> SecretString {
    SecretString::from("dev-api-key-12345".to_string())
}
fn default_debounce_ms() -> u64 {
    crate::core::constants::DEFAULT_DEBOUNCE_MS
}
fn default_session_file() -> String {
    ".wardrobe/session.json".to_string()
}
fn default_log() -> String {
    "info".to_string()
}

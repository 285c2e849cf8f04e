// src/start.rs
use crate::{
    core::{config::Config, log},
    services::session::SessionState,
    state::AppState,
};

/// 启动并初始化客户端核心。这是二进制入口的主体，负责初始化所有必要的组件。
///
/// 这个函数执行以下步骤：
/// 1. 加载应用程序配置
/// 2. 初始化日志系统
/// 3. 初始化应用状态（会话存储、API 客户端、会话恢复、规则缓存）
/// 4. 输出启动摘要
///
/// UI 层从 `AppState` 继续接管（见 `state::AppState::form_validator`），
/// 本函数只负责引导并报告状态。
pub async fn run() {
    // 第一步：加载应用程序配置。配置从 .env 与环境变量中读取，
    // 包括后端地址、API Key、防抖静默期、会话文件路径等。
    let config = Config::new();

    // 第二步：初始化日志系统。返回的 guard 用于在作用域结束时保持日志系统的活跃状态。
    let _guard = log::init(&config.rust_log);
    tracing::info!("🔍 Config loaded, backend at {}", config.backend_url);

    // 第三步：初始化应用状态。内部依次完成：
    // 打开会话持久化存储 → 构建 API 客户端 → 恢复并验证会话（一次后端往返）
    // → 并行拉取校验规则与表单选项（各自失败只降级、不中断启动）。
    let state = AppState::init(config).await;

    // 第四步：输出启动摘要。
    match state.session.state() {
        SessionState::Authenticated => {
            if let Some(user) = state.session.user() {
                tracing::info!("✅ Signed in as {} <{}>", user.name, user.email);
            }
        }
        _ => tracing::info!("👤 No active session, starting anonymous"),
    }

    match state.rules.rules() {
        Some(rules) => tracing::info!(
            "✅ Validation rules loaded: {} clothes / {} coordinates / {} auth fields",
            rules.clothes.len(),
            rules.coordinates.len(),
            rules.auth.len()
        ),
        // 规则缺席时本地校验退化为 no-op，由远程校验兜底
        None => tracing::warn!("⚠️ Running without local validation rules"),
    }

    match state.rules.options() {
        Some(options) => tracing::info!(
            "✅ Form options loaded: {} categories, {} sizes",
            options.categories.len(),
            options.sizes.len()
        ),
        None => tracing::warn!("⚠️ Form options unavailable, selects degrade to free input"),
    }

    tracing::info!("🚀 Wardrobe client core ready");
}

use std::{sync::Arc, time::Duration};

use crate::{
    api::ApiClient,
    core::{config::Config, enums::FormType},
    services::{form::FormValidator, rules::RuleCache, session::SessionManager},
    utils::storage::TokenStore,
};

/// 应用状态：组合根持有的共享对象。
/// 会话与规则缓存都在这里显式创建并经 Arc 传给消费方，没有环境全局量。
#[derive(Clone)]
pub struct AppState {
    /// 全局配置，使用 Arc 包装以实现廉价克隆
    pub config: Arc<Config>,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionManager>,
    pub rules: Arc<RuleCache>,
}

impl AppState {
    /// 初始化客户端核心：打开会话存储、构建 API 客户端、
    /// 恢复并验证会话、一次性拉取校验规则与表单选项。
    pub async fn init(config: Config) -> Self {
        // 会话持久化存储与后端 API 客户端
        let store = Arc::new(TokenStore::new(config.session_file.clone()));
        let api = Arc::new(ApiClient::new(&config, Arc::clone(&store)));

        // 恢复持久化会话并通过一次后端往返确认有效性
        let session = Arc::new(SessionManager::new(Arc::clone(&api), Arc::clone(&store)));
        session.hydrate().await;

        // 校验规则与表单选项：每个应用会话只拉取一次，之后只读共享
        let rules = Arc::new(RuleCache::load(&api).await);

        Self {
            config: Arc::new(config),
            api,
            session,
            rules,
        }
    }

    /// 为一个表单实例创建校验器。每个渲染中的表单各持一份独立的
    /// 状态存储与防抖调度器，规则缓存共享同一份。
    pub fn form_validator(&self, form_type: FormType) -> FormValidator {
        FormValidator::new(
            form_type,
            Arc::clone(&self.rules),
            Arc::clone(&self.api),
            Duration::from_millis(self.config.debounce_ms),
        )
    }
}

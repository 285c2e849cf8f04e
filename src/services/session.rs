// src/services/session.rs
use std::sync::Arc;

use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    api::ApiClient,
    core::error::AppError,
    dtos::auth::{LoginRequest, PersistedSession, RegisterRequest, User},
    utils::storage::TokenStore,
};

/// 会话状态机。
///
/// ```text
/// Uninitialized → Hydrating → { Authenticated, Anonymous }
///                              Authenticated → Anonymous （登出 / 验证失败）
/// ```
///
/// 验证失败不自动重试：对本次会话是终态，直到用户重新登录。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Hydrating,
    Authenticated,
    Anonymous,
}

struct SessionInner {
    state: SessionState,
    token: Option<SecretString>,
    user: Option<User>,
}

/// 认证状态缓存：持久化令牌 + 最小用户身份。
///
/// 应用启动时创建一次，由组合根显式持有并传给消费方——
/// 没有全局可变单例。生命周期：启动时 hydrate，登出时清空。
pub struct SessionManager {
    api: Arc<ApiClient>,
    store: Arc<TokenStore>,
    inner: Mutex<SessionInner>,
}

impl SessionManager {
    pub fn new(api: Arc<ApiClient>, store: Arc<TokenStore>) -> Self {
        Self {
            api,
            store,
            inner: Mutex::new(SessionInner {
                state: SessionState::Uninitialized,
                token: None,
                user: None,
            }),
        }
    }

    /// 启动恢复：读取持久化的令牌与身份，并通过一次"当前用户"往返确认令牌有效。
    /// 身份以验证响应为准，而不是持久化的旧数据。
    pub async fn hydrate(&self) {
        // 第一步：进入 Hydrating 状态并读取持久化条目
        let persisted = {
            let mut inner = self.inner.lock();
            inner.state = SessionState::Hydrating;
            self.store.load()
        };

        let Some(persisted) = persisted else {
            // 没有持久化令牌，直接进入匿名态
            self.inner.lock().state = SessionState::Anonymous;
            return;
        };

        self.inner.lock().token = Some(SecretString::from(persisted.auth_token));

        // 第二步：后端验证往返。失败即清空自身（不重试），成功则刷新身份。
        match self.api.current_user().await {
            Ok(user) => {
                tracing::info!("✅ Session restored for user {}", user.pid);
                let mut inner = self.inner.lock();
                inner.user = Some(user);
                inner.state = SessionState::Authenticated;
            }
            Err(e) => {
                tracing::warn!("⚠️ Stored token is invalid, clearing auth data: {}", e);
                self.clear_session();
            }
        }
    }

    /// 登录/注册成功后写入会话：三项持久化条目作为一组原子写入，
    /// 内存状态同步进入 Authenticated。
    pub fn login(&self, token: &str, user: User) {
        self.store.save(&PersistedSession {
            auth_token: token.to_string(),
            user_pid: user.pid.clone(),
            user_name: user.name.clone(),
        });

        let mut inner = self.inner.lock();
        inner.token = Some(SecretString::from(token.to_string()));
        inner.user = Some(user);
        inner.state = SessionState::Authenticated;
    }

    /// 邮箱 + 密码登录。后端返回 `{token, pid, name}`，邮箱沿用输入值。
    pub async fn login_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let response = self
            .api
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        let user = User {
            pid: response.pid,
            email: email.to_string(),
            name: response.name,
            created_at: None,
            updated_at: None,
        };
        self.login(&response.token, user.clone());
        Ok(user)
    }

    /// 注册。后端注册接口返回空响应体（不发令牌），
    /// 因此注册成功后立即用同一凭据登录。
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AppError> {
        self.api
            .register(&RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                name: name.to_string(),
            })
            .await?;

        self.login_with_credentials(email, password).await
    }

    /// 显式登出：整组清除持久化条目并回到匿名态。
    pub fn logout(&self) {
        self.clear_session();
    }

    /// 重新拉取用户身份。无令牌时为 no-op；
    /// 请求失败则登出（转入匿名态）并把错误传播给调用方提示。
    pub async fn refresh_user(&self) -> Result<(), AppError> {
        if self.inner.lock().token.is_none() {
            return Ok(());
        }

        match self.api.current_user().await {
            Ok(user) => {
                self.inner.lock().user = Some(user);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to refresh user, logging out: {}", e);
                self.clear_session();
                Err(e)
            }
        }
    }

    fn clear_session(&self) {
        self.store.clear();
        let mut inner = self.inner.lock();
        inner.token = None;
        inner.user = None;
        inner.state = SessionState::Anonymous;
    }

    // --- 只读访问器：UI 层据此门禁需要认证的视图 ---

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// 启动恢复尚未完成时为 true（UI 先出加载态，避免闪现登录页）。
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state(),
            SessionState::Uninitialized | SessionState::Hydrating
        )
    }

    /// 不变量：令牌与用户身份同时存在才视为已认证。
    pub fn is_authenticated(&self) -> bool {
        let inner = self.inner.lock();
        inner.token.is_some() && inner.user.is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.lock().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .lock()
            .token
            .as_ref()
            .map(|token| token.expose_secret().to_string())
    }
}

// tests/session_flow.rs
//! 会话缓存状态机的端到端行为：恢复、验证、登录、登出、失效。

mod common;

use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use wardrobe_client::{
    api::ApiClient,
    core::error::AppError,
    dtos::auth::PersistedSession,
    services::session::{SessionManager, SessionState},
    utils::storage::TokenStore,
};

fn persisted(token: &str) -> PersistedSession {
    PersistedSession {
        auth_token: token.to_string(),
        user_pid: "u-1".to_string(),
        user_name: "Stale Name".to_string(),
    }
}

fn setup(addr: SocketAddr, path: &Path) -> (Arc<TokenStore>, Arc<ApiClient>, SessionManager) {
    let config = common::test_config(addr, path, 300);
    let store = Arc::new(TokenStore::new(path));
    let api = Arc::new(ApiClient::new(&config, Arc::clone(&store)));
    let session = SessionManager::new(Arc::clone(&api), Arc::clone(&store));
    (store, api, session)
}

/// `/api/auth/current`：只认 `Bearer tok123`，其余一律 401。
fn current_user_route() -> Router {
    Router::new().route(
        "/api/auth/current",
        get(|headers: HeaderMap| async move {
            let authorized = headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                == Some("Bearer tok123");

            if authorized {
                Json(serde_json::json!({
                    "pid": "u-1",
                    "email": "alice@example.com",
                    "name": "Alice"
                }))
                .into_response()
            } else {
                StatusCode::UNAUTHORIZED.into_response()
            }
        }),
    )
}

fn login_route() -> Router {
    Router::new().route(
        "/api/auth/login",
        post(|Json(_request): Json<serde_json::Value>| async move {
            Json(serde_json::json!({
                "token": "tok123",
                "pid": "u-1",
                "name": "Alice"
            }))
        }),
    )
}

#[tokio::test]
async fn hydrate_without_persisted_token_goes_anonymous() {
    let addr = common::spawn_backend(Router::new()).await;
    let dir = tempfile::tempdir().unwrap();
    let (_store, _api, session) = setup(addr, &dir.path().join("session.json"));

    assert_eq!(session.state(), SessionState::Uninitialized);
    assert!(session.is_loading());

    session.hydrate().await;

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn hydrate_with_valid_token_refreshes_identity_from_server() {
    let addr = common::spawn_backend(current_user_route()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let (store, _api, session) = setup(addr, &path);

    store.save(&persisted("tok123"));
    session.hydrate().await;

    assert_eq!(session.state(), SessionState::Authenticated);
    assert!(session.is_authenticated());

    // 身份来自验证响应，而不是持久化的旧数据
    let user = session.user().unwrap();
    assert_eq!(user.name, "Alice");
    assert_eq!(user.pid, "u-1");
    assert_eq!(session.token().as_deref(), Some("tok123"));
}

#[tokio::test]
async fn hydrate_with_rejected_token_clears_storage_and_goes_anonymous() {
    let addr = common::spawn_backend(current_user_route()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let (store, _api, session) = setup(addr, &path);

    store.save(&persisted("expired-token"));
    session.hydrate().await;

    // 401 → 匿名态，持久化条目整组清除
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(!session.is_authenticated());
    assert!(store.load().is_none());
    assert!(session.user().is_none());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn login_then_reload_preserves_persisted_identity() {
    let router = login_route().merge(current_user_route());
    let addr = common::spawn_backend(router).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let (store, _api, session) = setup(addr, &path);
    let user = session
        .login_with_credentials("alice@example.com", "Passw0rd")
        .await
        .unwrap();

    assert!(session.is_authenticated());
    assert_eq!(user.email, "alice@example.com");

    // 登录时写入的三项条目
    let saved = store.load().unwrap();
    assert_eq!(saved.auth_token, "tok123");
    assert_eq!(saved.user_pid, "u-1");
    assert_eq!(saved.user_name, "Alice");

    // "重新加载页面"：同一路径上的全新会话栈
    let (store2, _api2, session2) = setup(addr, &path);
    session2.hydrate().await;

    assert!(session2.is_authenticated());
    // 持久化值与登录时写入的一致（无丢失、无变造）
    assert_eq!(store2.load().unwrap(), saved);
}

#[tokio::test]
async fn logout_clears_group_and_goes_anonymous() {
    let router = login_route().merge(current_user_route());
    let addr = common::spawn_backend(router).await;
    let dir = tempfile::tempdir().unwrap();
    let (store, _api, session) = setup(addr, &dir.path().join("session.json"));

    session
        .login_with_credentials("alice@example.com", "Passw0rd")
        .await
        .unwrap();
    assert!(session.is_authenticated());

    session.logout();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(!session.is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn refresh_user_failure_logs_out_and_propagates() {
    // 验证接口恒定 500：刷新身份必然失败
    let router = Router::new().route(
        "/api/auth/current",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = common::spawn_backend(router).await;
    let dir = tempfile::tempdir().unwrap();
    let (store, _api, session) = setup(addr, &dir.path().join("session.json"));

    session.login(
        "tok123",
        wardrobe_client::dtos::auth::User {
            pid: "u-1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            created_at: None,
            updated_at: None,
        },
    );
    assert!(session.is_authenticated());

    let result = session.refresh_user().await;

    assert!(matches!(result, Err(AppError::ApiError { status: 500, .. })));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(store.load().is_none());
}

#[tokio::test]
async fn refresh_user_without_token_is_a_noop() {
    let addr = common::spawn_backend(Router::new()).await;
    let dir = tempfile::tempdir().unwrap();
    let (_store, _api, session) = setup(addr, &dir.path().join("session.json"));

    assert!(session.refresh_user().await.is_ok());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn register_composes_register_then_login() {
    let calls: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let register_calls = Arc::clone(&calls);
    let login_calls = Arc::clone(&calls);

    let router = Router::new()
        .route(
            "/api/auth/register",
            post(move || {
                let calls = Arc::clone(&register_calls);
                async move {
                    calls.lock().push("register");
                    // 后端注册成功返回空响应体，令牌需要随后登录获取
                    StatusCode::CREATED
                }
            }),
        )
        .route(
            "/api/auth/login",
            post(move |Json(_request): Json<serde_json::Value>| {
                let calls = Arc::clone(&login_calls);
                async move {
                    calls.lock().push("login");
                    Json(serde_json::json!({
                        "token": "tok123",
                        "pid": "u-1",
                        "name": "Alice"
                    }))
                }
            }),
        );

    let addr = common::spawn_backend(router).await;
    let dir = tempfile::tempdir().unwrap();
    let (store, _api, session) = setup(addr, &dir.path().join("session.json"));

    let user = session
        .register("alice@example.com", "Passw0rd", "Alice")
        .await
        .unwrap();

    assert_eq!(*calls.lock(), vec!["register", "login"]);
    assert_eq!(user.name, "Alice");
    assert!(session.is_authenticated());
    assert_eq!(store.load().unwrap().auth_token, "tok123");
}

#[tokio::test]
async fn unauthorized_request_invalidates_local_session_and_propagates() {
    // 任何已认证请求返回 401 时：本地缓存作为副作用被清空，错误继续传播
    let router = Router::new().route(
        "/api/clothes",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let addr = common::spawn_backend(router).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let (store, api, _session) = setup(addr, &path);

    store.save(&persisted("tok123"));

    let result = api.get_clothes().await;

    assert!(matches!(result, Err(AppError::AuthError(_))));
    assert!(store.load().is_none());
}

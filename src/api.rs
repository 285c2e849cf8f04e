// src/api.rs
use std::sync::Arc;

use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    core::{config::Config, constants::*, error::AppError},
    dtos::{
        auth::{
            ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
            ResetPasswordRequest, User,
        },
        catalog::{
            ClothesItem, Coordinate, CreateClothesRequest, CreateCoordinateRequest,
            FormSubmitResponse, UpdateClothesRequest, UpdateCoordinateRequest,
        },
        validation::{FormOptions, FormValidationRules, ValidateFieldRequest, ValidateFieldResponse},
    },
    utils::storage::TokenStore,
};

/// 后端 API 客户端。接口形状完全由外部后端决定，这里只做类型化的转发。
///
/// 统一的响应处理规则：
/// - 429 → `RateLimitExceeded`
/// - 401 → 清空本地会话缓存（副作用），错误继续向上传播
/// - 其他非成功状态 → `ApiError`（保留状态码与正文）
///
/// 不设置显式超时，沿用传输层默认值。
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(config: &Config, store: Arc<TokenStore>) -> Self {
        // 每个请求固定携带的安全头。API Key 标记为 sensitive，避免进入调试输出。
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            HEADER_REQUESTED_WITH,
            header::HeaderValue::from_static(REQUESTED_WITH_VALUE),
        );
        headers.insert(
            HEADER_CLIENT_VERSION,
            header::HeaderValue::from_static(CLIENT_VERSION),
        );

        let mut api_key = header::HeaderValue::from_str(config.api_key.expose_secret())
            .expect("❌ Invalid API key header value");
        api_key.set_sensitive(true);
        headers.insert(HEADER_API_KEY, api_key);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("❌ Failed to build HTTP client");

        Self {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送请求并统一映射非成功状态。
    async fn execute(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimitExceeded(
                "Too many requests. Please try again later.".to_string(),
            ));
        }

        if status == StatusCode::UNAUTHORIZED {
            // 任何请求返回 401 都说明本地令牌已失效：
            // 立即整组清除持久化会话（副作用），错误继续传播由调用方提示用户。
            tracing::warn!("🚫 Authentication failed (401), clearing local session");
            self.store.clear();
            return Err(AppError::AuthError(
                "Authentication failed. Please login again.".to_string(),
            ));
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(AppError::ApiError {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.execute(self.http.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .execute(self.http.post(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    /// POST 但不解析响应体（后端注册等接口返回空正文）。
    async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), AppError> {
        self.execute(self.http.post(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .execute(self.http.put(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.execute(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    // --- 校验接口 ---

    pub async fn get_validation_rules(&self) -> Result<FormValidationRules, AppError> {
        self.get_json("/api/validation/rules").await
    }

    pub async fn get_form_options(&self) -> Result<FormOptions, AppError> {
        self.get_json("/api/validation/options").await
    }

    /// 服务端权威字段校验。防抖调度器在静默期结束后调用。
    pub async fn validate_field(
        &self,
        request: &ValidateFieldRequest,
    ) -> Result<ValidateFieldResponse, AppError> {
        self.post_json("/api/validation/field", request).await
    }

    // --- 认证接口 ---

    /// 拉取当前用户。持久化存储中没有令牌时直接报认证错误，不发请求。
    pub async fn current_user(&self) -> Result<User, AppError> {
        let token = self
            .store
            .token()
            .ok_or_else(|| AppError::AuthError("No authentication token found".to_string()))?;

        let request = self
            .http
            .get(self.url("/api/auth/current"))
            .bearer_auth(token);
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        self.post_json("/api/auth/login", request).await
    }

    /// 注册。后端对注册成功返回空响应体，令牌需要随后登录获取。
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        self.post_empty("/api/auth/register", request).await
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<(), AppError> {
        self.post_empty("/api/auth/forgot", request).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), AppError> {
        self.post_empty("/api/auth/reset", request).await
    }

    // --- 衣物目录接口 ---

    pub async fn get_clothes(&self) -> Result<Vec<ClothesItem>, AppError> {
        self.get_json("/api/clothes").await
    }

    pub async fn get_clothes_item(&self, pid: &str) -> Result<ClothesItem, AppError> {
        self.get_json(&format!("/api/clothes/{pid}")).await
    }

    pub async fn create_clothes_item(
        &self,
        request: &CreateClothesRequest,
    ) -> Result<ClothesItem, AppError> {
        self.post_json("/api/clothes", request).await
    }

    pub async fn update_clothes_item(
        &self,
        pid: &str,
        request: &UpdateClothesRequest,
    ) -> Result<ClothesItem, AppError> {
        self.put_json(&format!("/api/clothes/{pid}"), request).await
    }

    pub async fn delete_clothes_item(&self, pid: &str) -> Result<(), AppError> {
        self.delete(&format!("/api/clothes/{pid}")).await
    }

    // --- 穿搭目录接口 ---

    pub async fn get_coordinates(&self) -> Result<Vec<Coordinate>, AppError> {
        self.get_json("/api/coordinates").await
    }

    pub async fn get_coordinate(&self, pid: &str) -> Result<Coordinate, AppError> {
        self.get_json(&format!("/api/coordinates/{pid}")).await
    }

    pub async fn create_coordinate(
        &self,
        request: &CreateCoordinateRequest,
    ) -> Result<Coordinate, AppError> {
        self.post_json("/api/coordinates", request).await
    }

    pub async fn update_coordinate(
        &self,
        pid: &str,
        request: &UpdateCoordinateRequest,
    ) -> Result<Coordinate, AppError> {
        self.put_json(&format!("/api/coordinates/{pid}"), request)
            .await
    }

    pub async fn delete_coordinate(&self, pid: &str) -> Result<(), AppError> {
        self.delete(&format!("/api/coordinates/{pid}")).await
    }

    // --- 表单提交接口（服务端整表校验 + 落库） ---

    pub async fn submit_clothes_form(
        &self,
        request: &CreateClothesRequest,
    ) -> Result<FormSubmitResponse<ClothesItem>, AppError> {
        self.post_json("/api/forms/clothes", request).await
    }

    pub async fn submit_coordinate_form(
        &self,
        request: &CreateCoordinateRequest,
    ) -> Result<FormSubmitResponse<Coordinate>, AppError> {
        self.post_json("/api/forms/coordinates", request).await
    }

    pub async fn update_clothes_form(
        &self,
        pid: &str,
        request: &UpdateClothesRequest,
    ) -> Result<FormSubmitResponse<ClothesItem>, AppError> {
        self.put_json(&format!("/api/forms/clothes/{pid}"), request)
            .await
    }

    pub async fn update_coordinate_form(
        &self,
        pid: &str,
        request: &UpdateCoordinateRequest,
    ) -> Result<FormSubmitResponse<Coordinate>, AppError> {
        self.put_json(&format!("/api/forms/coordinates/{pid}"), request)
            .await
    }
}

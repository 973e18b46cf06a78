use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use stellar_burger_shared::protocol::*;
use stellar_burger_shared::{
    CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, Ingredient, Order,
    OrderConfirmation, TokenPair, User,
};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 凭据存储抽象
// =========================================================

/// 客户端持久化凭据
///
/// 访问令牌随请求携带且有独立的过期时间（浏览器中为 cookie），
/// 刷新令牌需要跨进程重启保留（浏览器中为 LocalStorage）。
pub trait CredentialStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn store_tokens(&self, tokens: &TokenPair);
    fn clear_tokens(&self);
    /// 标记用户已申请重置密码（重置页据此决定是否放行）
    fn set_reset_requested(&self, requested: bool);
    fn reset_requested(&self) -> bool;
}

// =========================================================
// 业务网关: BurgerApi
// =========================================================

/// 服务端 API 网关
///
/// 接受任何实现了 `HttpClient` 的客户端，从而解耦具体的 HTTP 实现。
pub struct BurgerApi<C, K> {
    config: ApiConfig,
    client: C,
    credentials: K,
}

impl<C: HttpClient, K: CredentialStore> BurgerApi<C, K> {
    pub fn new(config: ApiConfig, client: C, credentials: K) -> Self {
        Self {
            config,
            client,
            credentials,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credentials(&self) -> &K {
        &self.credentials
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn build<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let url = self.config.url(&req.path());
        let mut http = HttpRequest::new(&url, R::METHOD);

        if R::METHOD != HttpMethod::Get {
            http = http
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(serde_json::to_string(req)?);
        }
        if R::AUTHORIZED {
            if let Some(token) = self.credentials.access_token() {
                http = http.with_header(HEADER_AUTHORIZATION, &token);
            }
        }
        Ok(http)
    }

    async fn send_once<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let http = self.build(req)?;
        tracing::debug!(method = R::METHOD.as_str(), url = %http.url, "api request");
        let resp = self.client.send(http).await?;
        parse_reply(resp)
    }

    /// 发送请求；需要授权的请求遇到访问令牌过期时刷新一次后重试
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        match self.send_once(req).await {
            Err(e) if R::AUTHORIZED && e.is_token_expired() => {
                tracing::info!(path = %req.path(), "access token expired, refreshing");
                self.refresh_token().await?;
                self.send_once(req).await
            }
            other => other,
        }
    }

    /// 用保存的刷新令牌换取新的令牌对并持久化
    pub async fn refresh_token(&self) -> ApiResult<TokenPair> {
        let token = self
            .credentials
            .refresh_token()
            .ok_or(ApiError::MissingCredentials)?;
        let pair = self.send_once(&RefreshTokenRequest { token }).await?;
        self.credentials.store_tokens(&pair);
        Ok(pair)
    }

    // --- Catalog & orders ---

    pub async fn get_ingredients(&self) -> ApiResult<Vec<Ingredient>> {
        Ok(self.call(&IngredientsRequest).await?.data)
    }

    pub async fn get_feed(&self) -> ApiResult<FeedResponse> {
        self.call(&FeedRequest).await
    }

    pub async fn get_user_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.call(&UserOrdersRequest).await?.orders)
    }

    /// 按编号查询订单，服务端返回单元素列表，取第 0 个
    pub async fn get_order_by_number(&self, number: u64) -> ApiResult<Option<Order>> {
        let resp = self.call(&OrderByNumberRequest { number }).await?;
        Ok(resp.orders.into_iter().next())
    }

    pub async fn order_burger(&self, ingredients: Vec<String>) -> ApiResult<OrderConfirmation> {
        let resp = self.call(&CreateOrderRequest { ingredients }).await?;
        Ok(resp.into())
    }

    // --- Session ---

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.call(req).await
    }

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthResponse> {
        self.call(req).await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        let token = self.credentials.refresh_token().unwrap_or_default();
        self.call(&LogoutRequest { token }).await?;
        Ok(())
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        self.call(&ForgotPasswordRequest {
            email: email.to_string(),
        })
        .await?;
        Ok(())
    }

    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> ApiResult<()> {
        self.call(req).await?;
        Ok(())
    }

    pub async fn get_user(&self) -> ApiResult<User> {
        Ok(self.call(&UserRequest).await?.user)
    }

    pub async fn update_user(&self, req: &UpdateUserRequest) -> ApiResult<User> {
        Ok(self.call(req).await?.user)
    }
}

/// 解析服务端响应信封：非 2xx 或 `success != true` 视为拒绝，并带出 `message`
fn parse_reply<T: DeserializeOwned>(resp: HttpResponse) -> ApiResult<T> {
    let value: Value = match serde_json::from_str(&resp.body) {
        Ok(v) => v,
        Err(_) if !resp.ok() => return Err(ApiError::rejected(resp.status, None)),
        Err(e) => return Err(e.into()),
    };

    let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !resp.ok() || !success {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(ApiError::rejected(resp.status, message));
    }

    serde_json::from_value(value).map_err(ApiError::from)
}

// =========================================================
// 测试工具: MemoryCredentials
// =========================================================

#[cfg(test)]
#[derive(Default)]
pub struct MemoryCredentials {
    pub access: RefCell<Option<String>>,
    pub refresh: RefCell<Option<String>>,
    pub reset: RefCell<bool>,
}

#[cfg(test)]
impl MemoryCredentials {
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let creds = Self::default();
        *creds.access.borrow_mut() = Some(access.to_string());
        *creds.refresh.borrow_mut() = Some(refresh.to_string());
        creds
    }
}

#[cfg(test)]
impl CredentialStore for MemoryCredentials {
    fn access_token(&self) -> Option<String> {
        self.access.borrow().clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh.borrow().clone()
    }

    fn store_tokens(&self, tokens: &TokenPair) {
        *self.access.borrow_mut() = Some(tokens.access_token.clone());
        *self.refresh.borrow_mut() = Some(tokens.refresh_token.clone());
    }

    fn clear_tokens(&self) {
        self.access.borrow_mut().take();
        self.refresh.borrow_mut().take();
    }

    fn set_reset_requested(&self, requested: bool) {
        *self.reset.borrow_mut() = requested;
    }

    fn reset_requested(&self) -> bool {
        *self.reset.borrow()
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================

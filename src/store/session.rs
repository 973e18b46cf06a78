//! 会话 store：当前用户、是否已登录，以及启动时的一次性身份检查
//!
//! `auth_checked` 只由身份获取（[`AuthOp::FetchIdentity`]）写入，
//! 成功或失败都会置为 true，之后不再回退。路由守卫据此决定是否可以重定向。

use super::{Reducer, RequestId, StateCell};
use crate::api::{BurgerApi, CredentialStore};
use crate::error::ApiError;
use crate::request::HttpClient;
use std::collections::HashMap;
use stellar_burger_shared::User;
use stellar_burger_shared::protocol::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, UpdateUserRequest,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOp {
    Login,
    Register,
    Logout,
    ForgotPassword,
    ResetPassword,
    FetchIdentity,
    UpdateIdentity,
}

impl AuthOp {
    /// 服务端未给出原因时展示的错误
    pub fn default_error(&self) -> &'static str {
        match self {
            AuthOp::Login => "Authorization failed",
            AuthOp::Register => "Registration failed",
            AuthOp::Logout => "Logout failed",
            AuthOp::ForgotPassword => "Password recovery failed",
            AuthOp::ResetPassword => "Password reset failed",
            AuthOp::FetchIdentity => "Failed to fetch user data",
            AuthOp::UpdateIdentity => "Failed to update user data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// 携带用户信息的成功（登录、注册、获取、更新）
    Identity(User),
    LoggedOut,
    /// 无状态变化的成功（找回/重置密码）
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Pending {
        op: AuthOp,
        request: RequestId,
    },
    Succeeded {
        op: AuthOp,
        request: RequestId,
        outcome: AuthOutcome,
    },
    Failed {
        op: AuthOp,
        request: RequestId,
        message: Option<String>,
    },
    ClearError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_auth: bool,
    pub auth_checked: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    // 每类操作最近一次启动的请求
    in_flight: HashMap<AuthOp, RequestId>,
}

impl SessionState {
    /// `request` 是否仍是该类操作最近一次启动的请求
    pub fn is_latest(&self, op: AuthOp, request: RequestId) -> bool {
        self.in_flight.get(&op) == Some(&request)
    }

    /// 结束一个请求；返回 false 表示这是被后续同类请求取代的迟到结果
    fn settle(&mut self, op: AuthOp, request: RequestId) -> bool {
        if !self.is_latest(op, request) {
            tracing::debug!(?op, ?request, "discarding stale auth resolution");
            return false;
        }
        self.in_flight.remove(&op);
        self.is_loading = !self.in_flight.is_empty();
        true
    }
}

impl Reducer for SessionState {
    type Event = SessionEvent;

    fn reduce(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Pending { op, request } => {
                self.in_flight.insert(op, request);
                self.is_loading = true;
                self.error = None;
            }
            SessionEvent::Succeeded {
                op,
                request,
                outcome,
            } => {
                if !self.settle(op, request) {
                    return;
                }
                self.error = None;
                match outcome {
                    AuthOutcome::Identity(user) => {
                        self.user = Some(user);
                        self.is_auth = true;
                    }
                    AuthOutcome::LoggedOut => {
                        self.user = None;
                        self.is_auth = false;
                    }
                    AuthOutcome::Acknowledged => {}
                }
                if op == AuthOp::FetchIdentity {
                    self.auth_checked = true;
                }
            }
            SessionEvent::Failed {
                op,
                request,
                message,
            } => {
                if !self.settle(op, request) {
                    return;
                }
                self.error = Some(message.unwrap_or_else(|| op.default_error().to_string()));
                if op == AuthOp::FetchIdentity {
                    self.is_auth = false;
                    self.auth_checked = true;
                }
            }
            SessionEvent::ClearError => self.error = None,
        }
    }
}

// =========================================================
// 异步操作
// =========================================================

fn begin<S: StateCell<SessionState>>(session: &S, op: AuthOp) -> RequestId {
    let request = RequestId::next();
    session.dispatch(SessionEvent::Pending { op, request });
    request
}

/// 应用成功结果；结果已被后续请求取代时返回 false
fn succeed<S: StateCell<SessionState>>(
    session: &S,
    op: AuthOp,
    request: RequestId,
    outcome: AuthOutcome,
) -> bool {
    let applied = session.with(|s| s.is_latest(op, request));
    session.dispatch(SessionEvent::Succeeded {
        op,
        request,
        outcome,
    });
    applied
}

fn fail<S: StateCell<SessionState>>(
    session: &S,
    op: AuthOp,
    request: RequestId,
    error: &ApiError,
) -> bool {
    error.report(&format!("{:?}", op));
    session.dispatch(SessionEvent::Failed {
        op,
        request,
        message: error.message().map(str::to_string),
    });
    false
}

/// 登录；令牌在状态切换为已登录之前写入凭据存储
pub async fn login<C, K, S>(api: &BurgerApi<C, K>, session: &S, req: &LoginRequest) -> bool
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<SessionState>,
{
    let op = AuthOp::Login;
    let request = begin(session, op);
    match api.login(req).await {
        Ok(resp) => {
            api.credentials().store_tokens(&resp.tokens());
            tracing::info!(email = %resp.user.email, "logged in");
            succeed(session, op, request, AuthOutcome::Identity(resp.user))
        }
        Err(e) => fail(session, op, request, &e),
    }
}

pub async fn register<C, K, S>(api: &BurgerApi<C, K>, session: &S, req: &RegisterRequest) -> bool
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<SessionState>,
{
    let op = AuthOp::Register;
    let request = begin(session, op);
    match api.register(req).await {
        Ok(resp) => {
            api.credentials().store_tokens(&resp.tokens());
            tracing::info!(email = %resp.user.email, "registered");
            succeed(session, op, request, AuthOutcome::Identity(resp.user))
        }
        Err(e) => fail(session, op, request, &e),
    }
}

pub async fn logout<C, K, S>(api: &BurgerApi<C, K>, session: &S) -> bool
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<SessionState>,
{
    let op = AuthOp::Logout;
    let request = begin(session, op);
    match api.logout().await {
        Ok(()) => {
            api.credentials().clear_tokens();
            tracing::info!("logged out");
            succeed(session, op, request, AuthOutcome::LoggedOut)
        }
        Err(e) => fail(session, op, request, &e),
    }
}

/// 申请重置密码；成功后记下标记，重置页据此放行
pub async fn forgot_password<C, K, S>(api: &BurgerApi<C, K>, session: &S, email: &str) -> bool
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<SessionState>,
{
    let op = AuthOp::ForgotPassword;
    let request = begin(session, op);
    match api.forgot_password(email).await {
        Ok(()) => {
            api.credentials().set_reset_requested(true);
            succeed(session, op, request, AuthOutcome::Acknowledged)
        }
        Err(e) => fail(session, op, request, &e),
    }
}

pub async fn reset_password<C, K, S>(
    api: &BurgerApi<C, K>,
    session: &S,
    req: &ResetPasswordRequest,
) -> bool
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<SessionState>,
{
    let op = AuthOp::ResetPassword;
    let request = begin(session, op);
    match api.reset_password(req).await {
        Ok(()) => {
            api.credentials().set_reset_requested(false);
            succeed(session, op, request, AuthOutcome::Acknowledged)
        }
        Err(e) => fail(session, op, request, &e),
    }
}

/// 启动时的身份检查，结束后 `auth_checked` 为 true
pub async fn fetch_identity<C, K, S>(api: &BurgerApi<C, K>, session: &S) -> bool
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<SessionState>,
{
    let op = AuthOp::FetchIdentity;
    let request = begin(session, op);
    match api.get_user().await {
        Ok(user) => succeed(session, op, request, AuthOutcome::Identity(user)),
        Err(e) => fail(session, op, request, &e),
    }
}

pub async fn update_identity<C, K, S>(
    api: &BurgerApi<C, K>,
    session: &S,
    req: &UpdateUserRequest,
) -> bool
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<SessionState>,
{
    let op = AuthOp::UpdateIdentity;
    let request = begin(session, op);
    match api.update_user(req).await {
        Ok(user) => succeed(session, op, request, AuthOutcome::Identity(user)),
        Err(e) => fail(session, op, request, &e),
    }
}

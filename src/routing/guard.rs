//! 访问守卫
//!
//! 每次渲染路由前求值的纯函数。身份检查结束前只显示加载状态，不做任何重定向。

use super::location::Location;
use super::route::{FORGOT_PASSWORD_PATH, HOME_PATH, LOGIN_PATH, RouteAccess};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 身份检查尚未结束
    Pending,
    /// 替换当前历史记录跳转到目标
    Redirect(Location),
    Render,
}

/// 根据会话状态决定路由如何处理
///
/// `attempted` 是正在访问的位置；被拦下时会附在登录页的状态里，
/// 登录成功后守卫据此把用户送回原处。
pub fn decide(
    auth_checked: bool,
    is_auth: bool,
    access: RouteAccess,
    attempted: &Location,
) -> GuardDecision {
    if !auth_checked {
        return GuardDecision::Pending;
    }

    match access {
        RouteAccess::Protected if !is_auth => {
            tracing::debug!(location = %attempted, "access denied, redirecting to login");
            GuardDecision::Redirect(Location::new(LOGIN_PATH).with_from(attempted.clone()))
        }
        RouteAccess::AuthOnly if is_auth => {
            let destination = attempted
                .redirected_from()
                .map(|from| Location {
                    state: Default::default(),
                    ..from.clone()
                })
                .unwrap_or_else(|| Location::new(HOME_PATH));
            tracing::debug!(%destination, "already authenticated, leaving auth page");
            GuardDecision::Redirect(destination)
        }
        _ => GuardDecision::Render,
    }
}

/// 重置密码页：既没有申请过重置、地址中也没有令牌时，送回找回密码页
pub fn reset_password_redirect(reset_requested: bool, token: Option<&str>) -> Option<Location> {
    if reset_requested || token.is_some_and(|t| !t.is_empty()) {
        None
    } else {
        Some(Location::new(FORGOT_PASSWORD_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryCredentials;
    use crate::api::tests::{api_with, url, user_json};
    use crate::routing::route::AppRoute;
    use crate::store::session::{self, SessionState};
    use crate::store::{LocalCell, StateCell};
    use serde_json::json;
    use stellar_burger_shared::protocol::{HttpMethod, LoginRequest};

    const ALL: [RouteAccess; 3] = [
        RouteAccess::Public,
        RouteAccess::AuthOnly,
        RouteAccess::Protected,
    ];

    #[test]
    fn unchecked_session_never_redirects() {
        let loc = Location::new("/profile");
        for access in ALL {
            for is_auth in [false, true] {
                assert_eq!(decide(false, is_auth, access, &loc), GuardDecision::Pending);
            }
        }
    }

    #[test]
    fn protected_route_sends_guest_to_login() {
        let attempted = Location::new("/profile/orders?sort=new");
        let GuardDecision::Redirect(target) =
            decide(true, false, RouteAccess::Protected, &attempted)
        else {
            panic!("expected redirect");
        };

        assert_eq!(target.pathname, LOGIN_PATH);
        assert_eq!(target.redirected_from(), Some(&attempted));
    }

    #[test]
    fn auth_page_without_origin_goes_home() {
        let decision = decide(true, true, RouteAccess::AuthOnly, &Location::new("/register"));
        assert_eq!(decision, GuardDecision::Redirect(Location::new(HOME_PATH)));
    }

    #[test]
    fn public_routes_always_render() {
        let loc = Location::new("/feed");
        assert_eq!(decide(true, false, RouteAccess::Public, &loc), GuardDecision::Render);
        assert_eq!(decide(true, true, RouteAccess::Public, &loc), GuardDecision::Render);
        assert_eq!(decide(true, true, RouteAccess::Protected, &loc), GuardDecision::Render);
        assert_eq!(decide(true, false, RouteAccess::AuthOnly, &loc), GuardDecision::Render);
    }

    #[test]
    fn reset_page_needs_request_or_token() {
        assert_eq!(
            reset_password_redirect(false, None),
            Some(Location::new(FORGOT_PASSWORD_PATH))
        );
        assert!(reset_password_redirect(false, Some("")).is_some());
        assert_eq!(reset_password_redirect(true, None), None);
        assert_eq!(reset_password_redirect(false, Some("abc")), None);
    }

    #[tokio::test]
    async fn login_returns_guest_to_the_attempted_page() {
        let api = api_with(MemoryCredentials::default());
        api.client().mock_response(
            HttpMethod::Get,
            &url("/auth/user"),
            401,
            json!({ "success": false, "message": "You should be authorised" }),
        );
        api.client().mock_response(
            HttpMethod::Post,
            &url("/auth/login"),
            200,
            json!({
                "success": true,
                "accessToken": "Bearer a",
                "refreshToken": "r",
                "user": user_json()
            }),
        );
        let session = LocalCell::new(SessionState::default());
        let attempted = Location::new("/profile/orders");
        let route = AppRoute::parse(&attempted.pathname);

        let check = |s: &SessionState, loc: &Location, access| {
            decide(s.auth_checked, s.is_auth, access, loc)
        };

        assert_eq!(
            session.with(|s| check(s, &attempted, route.access())),
            GuardDecision::Pending
        );
        session::fetch_identity(&api, &session).await;

        let GuardDecision::Redirect(login_page) =
            session.with(|s| check(s, &attempted, route.access()))
        else {
            panic!("guest should be redirected");
        };
        let login_route = AppRoute::parse(&login_page.pathname);
        assert_eq!(login_route, AppRoute::Login);
        assert_eq!(
            session.with(|s| check(s, &login_page, login_route.access())),
            GuardDecision::Render
        );

        let req = LoginRequest {
            email: "pilot@stellar.test".into(),
            password: "secret".into(),
        };
        assert!(session::login(&api, &session, &req).await);

        let after = session.with(|s| check(s, &login_page, login_route.access()));
        assert_eq!(after, GuardDecision::Redirect(attempted.clone()));
        assert_eq!(
            session.with(|s| check(s, &attempted, route.access())),
            GuardDecision::Render
        );
    }
}

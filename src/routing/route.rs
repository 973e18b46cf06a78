//! 路由定义
//!
//! 纯粹的业务逻辑层，不依赖于 DOM。定义了应用的所有路由及其访问属性。

use std::fmt::Display;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";

/// 路由的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// 仅未登录用户（登录、注册、找回密码）
    AuthOnly,
    /// 仅已登录用户
    Protected,
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 汉堡组装页 (默认路由)
    #[default]
    Constructor,
    Feed,
    FeedOrder(String),
    Ingredient(String),
    Login,
    Register,
    ForgotPassword,
    /// 令牌可以出现在路径中，也可以由用户手动输入
    ResetPassword(Option<String>),
    Profile,
    ProfileOrders,
    ProfileOrder(String),
    NotFound,
}

/// 邮件中复制来的重置码常带空白或句末的 `.`，去掉后为空则视为没有
fn clean_reset_token(raw: &str) -> Option<String> {
    let token = raw.trim().trim_end_matches('.');
    (!token.is_empty()).then(|| token.to_string())
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略末尾的 `/`）
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Constructor,
            ["feed"] => Self::Feed,
            ["feed", number] => Self::FeedOrder(number.to_string()),
            ["ingredients", id] => Self::Ingredient(id.to_string()),
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["reset-password"] => Self::ResetPassword(None),
            ["reset-password", token] => Self::ResetPassword(clean_reset_token(token)),
            ["profile"] => Self::Profile,
            ["profile", "orders"] => Self::ProfileOrders,
            ["profile", "orders", number] => Self::ProfileOrder(number.to_string()),
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Constructor => HOME_PATH.to_string(),
            Self::Feed => "/feed".to_string(),
            Self::FeedOrder(number) => format!("/feed/{}", number),
            Self::Ingredient(id) => format!("/ingredients/{}", id),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => FORGOT_PASSWORD_PATH.to_string(),
            Self::ResetPassword(None) => "/reset-password".to_string(),
            Self::ResetPassword(Some(token)) => format!("/reset-password/{}", token),
            Self::Profile => "/profile".to_string(),
            Self::ProfileOrders => "/profile/orders".to_string(),
            Self::ProfileOrder(number) => format!("/profile/orders/{}", number),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫属性：该路由对谁开放**
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::Register | Self::ForgotPassword | Self::ResetPassword(_) => {
                RouteAccess::AuthOnly
            }
            Self::Profile | Self::ProfileOrders | Self::ProfileOrder(_) => RouteAccess::Protected,
            _ => RouteAccess::Public,
        }
    }

    /// 可以以弹窗形式叠在背景页之上的详情路由
    pub fn is_modal_capable(&self) -> bool {
        matches!(
            self,
            Self::Ingredient(_) | Self::FeedOrder(_) | Self::ProfileOrder(_)
        )
    }

    /// 订单详情路由中的订单编号（非数字时为 `None`）
    pub fn order_number(&self) -> Option<u64> {
        match self {
            Self::FeedOrder(n) | Self::ProfileOrder(n) => n.parse().ok(),
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_round_trip() {
        let routes = [
            AppRoute::Constructor,
            AppRoute::Feed,
            AppRoute::FeedOrder("034535".into()),
            AppRoute::Ingredient("643d69a5".into()),
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::ForgotPassword,
            AppRoute::ResetPassword(None),
            AppRoute::ResetPassword(Some("tok".into())),
            AppRoute::Profile,
            AppRoute::ProfileOrders,
            AppRoute::ProfileOrder("7".into()),
        ];
        for route in routes {
            assert_eq!(AppRoute::parse(&route.to_path()), route);
        }
    }

    #[test]
    fn trailing_slash_and_unknown_paths() {
        assert_eq!(AppRoute::parse("/feed/"), AppRoute::Feed);
        assert_eq!(AppRoute::parse("/feed/1/extra"), AppRoute::NotFound);
        assert_eq!(AppRoute::parse("/nowhere"), AppRoute::NotFound);
    }

    #[test]
    fn reset_token_is_cleaned() {
        assert_eq!(
            AppRoute::parse("/reset-password/ab12cd..."),
            AppRoute::ResetPassword(Some("ab12cd".into()))
        );
        assert_eq!(
            AppRoute::parse("/reset-password/ ab12cd. "),
            AppRoute::ResetPassword(Some("ab12cd".into()))
        );
        assert_eq!(AppRoute::parse("/reset-password/.."), AppRoute::ResetPassword(None));
    }

    #[test]
    fn access_levels() {
        assert_eq!(AppRoute::Constructor.access(), RouteAccess::Public);
        assert_eq!(AppRoute::FeedOrder("1".into()).access(), RouteAccess::Public);
        assert_eq!(AppRoute::ResetPassword(None).access(), RouteAccess::AuthOnly);
        assert_eq!(AppRoute::ProfileOrder("1".into()).access(), RouteAccess::Protected);
    }

    #[test]
    fn only_detail_routes_open_as_modals() {
        assert!(AppRoute::Ingredient("x".into()).is_modal_capable());
        assert!(AppRoute::ProfileOrder("1".into()).is_modal_capable());
        assert!(!AppRoute::Feed.is_modal_capable());
        assert_eq!(AppRoute::FeedOrder("0042".into()).order_number(), Some(42));
        assert_eq!(AppRoute::FeedOrder("abc".into()).order_number(), None);
    }
}

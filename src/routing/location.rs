//! 导航位置与随历史记录保存的导航状态

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 一次导航的目标：路径、查询串以及附带的状态
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    /// 含前导 `?`，没有查询串时为空
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub state: NavState,
}

/// 写入 `history.state` 的瞬态信息，硬刷新后不保留
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavState {
    /// 以弹窗打开时，底下继续渲染的页面
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Box<Location>>,
    /// 被守卫拦下的原始目标，登录后回到这里
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Box<Location>>,
}

impl NavState {
    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.from.is_none()
    }
}

impl Location {
    /// 从 `path?query` 形式的字符串构造，不带状态
    pub fn new(href: &str) -> Self {
        let (pathname, search) = match href.find('?') {
            Some(i) => (&href[..i], &href[i..]),
            None => (href, ""),
        };
        Self {
            pathname: if pathname.is_empty() { "/" } else { pathname }.to_string(),
            search: search.to_string(),
            state: NavState::default(),
        }
    }

    pub fn with_background(mut self, background: Location) -> Self {
        self.state.background = Some(Box::new(background));
        self
    }

    pub fn with_from(mut self, from: Location) -> Self {
        self.state.from = Some(Box::new(from));
        self
    }

    pub fn background(&self) -> Option<&Location> {
        self.state.background.as_deref()
    }

    pub fn redirected_from(&self) -> Option<&Location> {
        self.state.from.as_deref()
    }

    /// 写入地址栏的部分
    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.pathname, self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_query_from_path() {
        let loc = Location::new("/feed?page=2");
        assert_eq!(loc.pathname, "/feed");
        assert_eq!(loc.search, "?page=2");
        assert_eq!(loc.href(), "/feed?page=2");
        assert_eq!(Location::new("").pathname, "/");
    }

    #[test]
    fn state_survives_history_serialization() {
        let loc = Location::new("/ingredients/abc").with_background(Location::new("/?tab=sauce"));
        let json = serde_json::to_string(&loc).unwrap();
        let back: Location = serde_json::from_str(&json).unwrap();

        assert_eq!(back, loc);
        assert_eq!(back.background().map(|b| b.search.as_str()), Some("?tab=sauce"));
    }

    #[test]
    fn empty_state_is_omitted() {
        let json = serde_json::to_value(NavState::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}

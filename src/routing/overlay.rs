//! 弹窗叠加路由
//!
//! 两次独立的路由匹配：页面按背景位置（没有时按当前位置）匹配，
//! 弹窗只在存在背景位置时按当前位置匹配。关闭弹窗即后退一步历史记录。

use super::location::Location;
use super::route::AppRoute;

pub const INGREDIENT_MODAL_TITLE: &str = "Ingredient details";

/// 一个位置的渲染方案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayPlan {
    /// 页面这一层实际使用的位置
    pub page_location: Location,
    pub page: AppRoute,
    /// 叠在页面上方的详情路由
    pub modal: Option<AppRoute>,
}

pub fn plan(current: &Location) -> OverlayPlan {
    match current.background() {
        Some(background) => {
            let route = AppRoute::parse(&current.pathname);
            OverlayPlan {
                page_location: background.clone(),
                page: AppRoute::parse(&background.pathname),
                modal: route.is_modal_capable().then_some(route),
            }
        }
        None => OverlayPlan {
            page_location: current.clone(),
            page: AppRoute::parse(&current.pathname),
            modal: None,
        },
    }
}

/// 以弹窗方式打开详情：把当前位置作为背景附在目标上
pub fn open_as_modal(route: &AppRoute, current: &Location) -> Location {
    // 背景位置本身不再携带背景，避免层层嵌套
    let background = Location {
        state: Default::default(),
        ..current.clone()
    };
    Location::new(&route.to_path()).with_background(background)
}

/// 弹窗标题；订单编号左侧补零到 6 位
pub fn modal_title(route: &AppRoute) -> Option<String> {
    match route {
        AppRoute::Ingredient(_) => Some(INGREDIENT_MODAL_TITLE.to_string()),
        AppRoute::FeedOrder(number) | AppRoute::ProfileOrder(number) => {
            Some(format!("#{:0>6}", number))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_navigation_renders_a_page() {
        let loc = Location::new("/ingredients/abc");
        let plan = plan(&loc);

        assert_eq!(plan.page, AppRoute::Ingredient("abc".into()));
        assert_eq!(plan.modal, None);
    }

    #[test]
    fn modal_keeps_the_background_page() {
        let home = Location::new("/?tab=sauce");
        let opened = open_as_modal(&AppRoute::Ingredient("abc".into()), &home);
        let plan = plan(&opened);

        assert_eq!(plan.page, AppRoute::Constructor);
        assert_eq!(plan.page_location.search, "?tab=sauce");
        assert_eq!(plan.modal, Some(AppRoute::Ingredient("abc".into())));
    }

    #[test]
    fn background_is_not_nested() {
        let feed = Location::new("/feed");
        let first = open_as_modal(&AppRoute::FeedOrder("1".into()), &feed);
        let second = open_as_modal(&AppRoute::FeedOrder("2".into()), &first);

        let bg = second.background().unwrap();
        assert_eq!(bg.pathname, "/feed/1");
        assert!(bg.state.is_empty());
    }

    #[test]
    fn non_modal_route_over_background_opens_no_modal() {
        let loc = Location::new("/feed").with_background(Location::new("/"));
        assert_eq!(plan(&loc).modal, None);
    }

    #[test]
    fn order_titles_are_zero_padded() {
        assert_eq!(
            modal_title(&AppRoute::FeedOrder("4567".into())).as_deref(),
            Some("#004567")
        );
        assert_eq!(
            modal_title(&AppRoute::ProfileOrder("1234567".into())).as_deref(),
            Some("#1234567")
        );
        assert_eq!(
            modal_title(&AppRoute::FeedOrder("ab".into())).as_deref(),
            Some("#0000ab")
        );
        assert_eq!(
            modal_title(&AppRoute::Ingredient("x".into())).as_deref(),
            Some(INGREDIENT_MODAL_TITLE)
        );
        assert_eq!(modal_title(&AppRoute::Feed), None);
    }
}

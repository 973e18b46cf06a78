//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 路由表、守卫与弹窗规则是核心 crate 中的纯函数，这里只负责
//! "读取位置 -> 守卫 -> 渲染页面与弹窗"的流程。

use crate::components::modal::{Modal, Preloader};
use crate::context::use_stores;
use leptos::prelude::*;
use stellar_burger::routing::{
    AppRoute, GuardDecision, Location, NavState, decide, modal_title, open_as_modal, plan,
};
use wasm_bindgen::prelude::*;

/// 当前地址栏位置（不含状态）
fn current_location() -> Location {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            Location::new(&format!("{}{}", path, search))
        })
        .unwrap_or_default()
}

/// 读取 `history.state` 中保存的导航状态
fn history_state() -> NavState {
    web_sys::window()
        .and_then(|w| w.history().ok())
        .and_then(|h| h.state().ok())
        .and_then(|state| state.as_string())
        .and_then(|json| serde_json_wasm::from_str(&json).ok())
        .unwrap_or_default()
}

fn state_value(state: &NavState) -> JsValue {
    if state.is_empty() {
        return JsValue::NULL;
    }
    match serde_json_wasm::to_string(state) {
        Ok(json) => JsValue::from_str(&json),
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode navigation state");
            JsValue::NULL
        }
    }
}

/// 写入 History（内部工具函数）
fn write_history(location: &Location, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let state = state_value(&location.state);
    let href = location.href();
    let result = if replace {
        history.replace_state_with_url(&state, "", Some(&href))
    } else {
        history.push_state_with_url(&state, "", Some(&href))
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, %href, "history update failed");
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    location: RwSignal<Location>,
}

impl RouterService {
    fn new() -> Self {
        // 硬刷新后不恢复弹窗：丢弃浏览器保留的旧状态
        let initial = current_location();
        write_history(&initial, true);

        Self {
            location: RwSignal::new(initial),
        }
    }

    /// 当前位置（包含导航状态）
    pub fn location(&self) -> RwSignal<Location> {
        self.location
    }

    pub fn navigate(&self, to: Location) {
        tracing::debug!(to = %to, "navigate");
        write_history(&to, false);
        self.location.set(to);
    }

    /// 替换当前历史记录（用于重定向）
    pub fn replace(&self, to: Location) {
        tracing::debug!(to = %to, "redirect");
        write_history(&to, true);
        self.location.set(to);
    }

    pub fn navigate_path(&self, path: &str) {
        self.navigate(Location::new(path));
    }

    /// 以弹窗打开详情路由，当前位置作为背景
    pub fn open_modal(&self, route: &AppRoute) {
        let to = self.location.with_untracked(|current| open_as_modal(route, current));
        self.navigate(to);
    }

    /// 后退一步，关闭弹窗时使用
    pub fn back(&self) {
        if let Some(Err(e)) = web_sys::window()
            .and_then(|w| w.history().ok())
            .map(|h| h.back())
        {
            tracing::warn!(error = ?e, "history back failed");
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let location = self.location;

        let closure = Closure::<dyn Fn()>::new(move || {
            let mut next = current_location();
            next.state = history_state();
            location.set(next);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(children: Children) -> impl IntoView {
    provide_router();
    children()
}

/// 对单个路由求值守卫，通过后渲染
#[component]
fn Guarded(route: AppRoute, location: Location, matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let stores = use_stores();
    let router = use_router();
    let access = route.access();

    let decision = Memo::new(move |_| {
        stores
            .session
            .read(|s| decide(s.auth_checked, s.is_auth, access, &location))
    });

    Effect::new(move |_| {
        if let GuardDecision::Redirect(to) = decision.get() {
            router.replace(to);
        }
    });

    move || match decision.get() {
        GuardDecision::Render => matcher(route.clone()),
        _ => view! { <Preloader /> }.into_any(),
    }
}

/// 路由出口组件
///
/// 页面按背景位置（没有时按当前位置）渲染；存在背景时，当前位置的详情路由渲染为弹窗。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
    /// 弹窗内容匹配函数
    modal_matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let overlay = Memo::new(move |_| router.location().with(plan));

    // 拆成独立的 Memo：打开弹窗时背景页不重新挂载
    let page = Memo::new(move |_| overlay.with(|p| (p.page.clone(), p.page_location.clone())));
    let modal = Memo::new(move |_| overlay.with(|p| p.modal.clone()));

    let page_view = move || {
        let (route, location) = page.get();
        view! { <Guarded route=route location=location matcher=matcher /> }
    };

    let modal_view = move || {
        modal.get().map(|route| {
            let title = modal_title(&route).unwrap_or_default();
            let location = router.location().get_untracked();
            view! {
                <Modal title=title on_close=Callback::new(move |_| router.back())>
                    <Guarded route=route location=location matcher=modal_matcher />
                </Modal>
            }
        })
    };

    view! {
        {page_view}
        {modal_view}
    }
}

/// 站内链接，点击时不刷新页面
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    /// 以弹窗形式打开（目标必须是详情路由）
    #[prop(optional)]
    modal: bool,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.clone();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        let route = AppRoute::parse(&to);
        if modal && route.is_modal_capable() {
            router.open_modal(&route);
        } else {
            router.navigate_path(&to);
        }
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}

//! 全局状态上下文
//!
//! 每个 store 放在一个信号里，通过 Context 在组件间共享。
//! 组件只读取状态、派发事件或调用核心中的异步操作，从不直接写字段。

use crate::web::{BrowserCredentials, GlooHttpClient};
use leptos::prelude::*;
use std::sync::Arc;
use stellar_burger::ApiConfig;
use stellar_burger::BurgerApi;
use stellar_burger::store::StateCell;
use stellar_burger::store::catalog::CatalogState;
use stellar_burger::store::composition::Composition;
use stellar_burger::store::feed::FeedState;
use stellar_burger::store::orders::OrdersState;
use stellar_burger::store::session::SessionState;
use stellar_burger::store::submission::SubmissionState;

pub type AppApi = BurgerApi<GlooHttpClient, BrowserCredentials>;

/// 基于信号的 store 容器
///
/// `StateCell` 的读取不追踪依赖，供事件处理和异步操作使用；
/// 视图中需要响应式读取时用 [`SignalCell::read`]。
pub struct SignalCell<S: 'static>(RwSignal<S>);

impl<S: 'static> Clone for SignalCell<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SignalCell<S> {}

impl<S: Send + Sync + 'static> SignalCell<S> {
    pub fn new(state: S) -> Self {
        Self(RwSignal::new(state))
    }

    /// 响应式读取
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.0.with(f)
    }
}

impl<S: Send + Sync + 'static> StateCell<S> for SignalCell<S> {
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        self.0.update(f);
    }
}

#[derive(Clone, Copy)]
pub struct Stores {
    pub catalog: SignalCell<CatalogState>,
    pub composition: SignalCell<Composition>,
    pub submission: SignalCell<SubmissionState>,
    pub session: SignalCell<SessionState>,
    pub feed: SignalCell<FeedState>,
    pub orders: SignalCell<OrdersState>,
}

impl Stores {
    fn new() -> Self {
        Self {
            catalog: SignalCell::new(CatalogState::default()),
            composition: SignalCell::new(Composition::default()),
            submission: SignalCell::new(SubmissionState::default()),
            session: SignalCell::new(SessionState::default()),
            feed: SignalCell::new(FeedState::default()),
            orders: SignalCell::new(OrdersState::default()),
        }
    }
}

/// 创建 API 网关与所有 store 并放入 Context
pub fn provide_app_state() -> (Arc<AppApi>, Stores) {
    let config = ApiConfig::from_env();
    tracing::info!(base_url = %config.base_url, "starting client");

    let credentials = BrowserCredentials::new(config.clone());
    let api = Arc::new(BurgerApi::new(config, GlooHttpClient, credentials));
    let stores = Stores::new();

    provide_context(api.clone());
    provide_context(stores);
    (api, stores)
}

pub fn use_api() -> Arc<AppApi> {
    use_context::<Arc<AppApi>>().expect("API gateway should be provided")
}

pub fn use_stores() -> Stores {
    use_context::<Stores>().expect("Stores should be provided")
}

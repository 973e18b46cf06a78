//! Stellar Burger 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `context`: 各个 store 的信号容器与 API 网关
//! - `web::router`: 路由服务（History 读写、守卫、弹窗叠加）
//! - `components`: UI 组件层
//!
//! 状态规则、路由表与守卫都在 `stellar-burger` 核心 crate 中。

mod context;
mod components {
    pub mod constructor;
    pub mod details;
    pub mod feed;
    pub mod header;
    pub mod login;
    pub mod modal;
    pub mod profile;
}
mod web;

use crate::components::constructor::ConstructorPage;
use crate::components::details::{IngredientDetails, IngredientPage, OrderInfo, OrderPage};
use crate::components::feed::FeedPage;
use crate::components::header::AppHeader;
use crate::components::login::{ForgotPasswordPage, LoginPage, RegisterPage, ResetPasswordPage};
use crate::components::profile::{ProfileOrdersPage, ProfilePage};
use crate::context::provide_app_state;

use leptos::prelude::*;
use leptos::task::spawn_local;
use stellar_burger::routing::AppRoute;
use stellar_burger::store::catalog::fetch_catalog;
use stellar_burger::store::session::fetch_identity;
use web::router::{Router, RouterOutlet};

/// 页面路由匹配函数
///
/// 详情路由在这里渲染为完整页面；以弹窗打开时由 [`modal_matcher`] 渲染内容。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Constructor => view! { <ConstructorPage /> }.into_any(),
        AppRoute::Feed => view! { <FeedPage /> }.into_any(),
        AppRoute::FeedOrder(number) | AppRoute::ProfileOrder(number) => {
            view! { <OrderPage number=number /> }.into_any()
        }
        AppRoute::Ingredient(id) => view! { <IngredientPage id=id /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword(token) => view! { <ResetPasswordPage token=token /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::ProfileOrders => view! { <ProfileOrdersPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[70vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// 弹窗内容匹配函数：只渲染详情本身，不带页面外框
fn modal_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Ingredient(id) => view! { <IngredientDetails id=id /> }.into_any(),
        route => {
            let number = route.order_number();
            view! { <OrderInfo number=number /> }.into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建 API 网关与所有 store
    let (api, stores) = provide_app_state();

    // 2. 目录加载与身份检查相互独立，同时启动
    let catalog_api = api.clone();
    spawn_local(async move {
        fetch_catalog(&catalog_api, &stores.catalog).await;
    });
    spawn_local(async move {
        fetch_identity(&api, &stores.session).await;
    });

    view! {
        <Router>
            <AppHeader />
            <RouterOutlet matcher=route_matcher modal_matcher=modal_matcher />
        </Router>
    }
}

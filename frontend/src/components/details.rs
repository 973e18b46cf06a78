//! 配料详情与订单详情
//!
//! 既可以作为独立页面，也可以作为弹窗内容。目标在已加载数据中找不到时显示加载状态。

use crate::components::modal::Preloader;
use crate::context::{use_api, use_stores};
use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stellar_burger::store::orders::fetch_order;
use stellar_burger_shared::Order;
use stellar_burger_shared::date::relative_date;

#[component]
pub fn IngredientDetails(id: String) -> impl IntoView {
    let stores = use_stores();
    let part = move || stores.catalog.read(|c| c.find(&id).cloned());

    move || match part() {
        None => view! { <Preloader /> }.into_any(),
        Some(part) => view! {
            <div class="flex flex-col items-center gap-4">
                <img src=part.image_large.clone() alt=part.name.clone() />
                <h3 class="text-2xl font-semibold">{part.name.clone()}</h3>
                <dl class="grid grid-cols-4 gap-6 text-center text-base-content/60">
                    <div><dt>"Calories, kcal"</dt><dd class="font-mono">{part.calories}</dd></div>
                    <div><dt>"Proteins, g"</dt><dd class="font-mono">{part.proteins}</dd></div>
                    <div><dt>"Fat, g"</dt><dd class="font-mono">{part.fat}</dd></div>
                    <div><dt>"Carbs, g"</dt><dd class="font-mono">{part.carbohydrates}</dd></div>
                </dl>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn IngredientPage(id: String) -> impl IntoView {
    view! {
        <main class="max-w-3xl mx-auto p-6">
            <h1 class="text-3xl font-bold text-center mb-6">"Ingredient details"</h1>
            <IngredientDetails id=id />
        </main>
    }
}

/// 订单详情；订单依次从订单流、个人历史中查找，都没有时按编号请求一次
#[component]
pub fn OrderInfo(number: Option<u64>) -> impl IntoView {
    let stores = use_stores();
    let api = use_api();

    let order = Memo::new(move |_| {
        let number = number?;
        stores
            .feed
            .read(|f| f.find(number).cloned())
            .or_else(|| stores.orders.read(|o| o.find(number).cloned()))
    });

    if let Some(number) = number {
        let missing = order.with_untracked(Option::is_none);
        if missing {
            spawn_local(async move {
                fetch_order(&api, &stores.orders, number).await;
            });
        }
    }

    move || match order.get() {
        None => view! { <Preloader /> }.into_any(),
        Some(order) => view! { <OrderSummaryView order=order /> }.into_any(),
    }
}

#[component]
fn OrderSummaryView(order: Order) -> impl IntoView {
    let stores = use_stores();
    let summary = stores.catalog.read(|c| c.summarize(&order));
    let when = relative_date(&order.created_at.with_timezone(&Local), &Local::now());

    let lines = summary
        .lines
        .into_iter()
        .map(|line| {
            view! {
                <li class="flex items-center gap-4">
                    <img class="w-12 rounded-full" src=line.part.image_mobile.clone() alt="" />
                    <span class="flex-1">{line.part.name.clone()}</span>
                    <span class="font-mono">{format!("{} x {}", line.count, line.part.price)}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="space-y-4">
            <h3 class="text-xl font-semibold">{order.name.clone()}</h3>
            <p class="text-success">{order.status.label()}</p>
            <p class="font-semibold">"Contents:"</p>
            <ul class="space-y-3 max-h-80 overflow-y-auto">{lines}</ul>
            <div class="flex justify-between text-base-content/60">
                <span>{when}</span>
                <span class="font-mono text-base-content">{summary.total_price}</span>
            </div>
        </div>
    }
}

#[component]
pub fn OrderPage(number: String) -> impl IntoView {
    let parsed = number.parse().ok();
    view! {
        <main class="max-w-3xl mx-auto p-6">
            <h1 class="text-3xl font-bold text-center font-mono mb-6">{format!("#{:0>6}", number)}</h1>
            <OrderInfo number=parsed />
        </main>
    }
}

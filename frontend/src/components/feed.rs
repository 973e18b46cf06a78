//! 订单流与订单卡片

use crate::components::modal::Preloader;
use crate::context::{use_api, use_stores};
use crate::web::router::Link;
use chrono::Local;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stellar_burger::store::feed::fetch_feed;
use stellar_burger_shared::Order;
use stellar_burger_shared::date::relative_date;

/// 订单流刷新间隔
const FEED_REFRESH_MS: u32 = 30_000;
/// 统计栏中每列最多显示的编号数
const STATUS_COLUMN_LIMIT: usize = 20;
/// 卡片上最多显示的配料图标数
const MAX_ICONS: usize = 6;

/// 订单卡片，点击以弹窗打开详情
#[component]
pub fn OrderCard(
    order: Order,
    /// 详情路由前缀，如 `/feed` 或 `/profile/orders`
    base_path: &'static str,
    #[prop(optional)] show_status: bool,
) -> impl IntoView {
    let stores = use_stores();
    let summary = stores.catalog.read(|c| c.summarize(&order));
    let when = relative_date(&order.created_at.with_timezone(&Local), &Local::now());
    let hidden = summary.lines.len().saturating_sub(MAX_ICONS);

    let icons = summary
        .lines
        .iter()
        .take(MAX_ICONS)
        .map(|line| {
            view! {
                <img class="w-12 h-12 rounded-full border-2 border-primary -ml-3 bg-base-300"
                     src=line.part.image_mobile.clone() alt=line.part.name.clone() />
            }
        })
        .collect_view();

    view! {
        <Link to=format!("{}/{}", base_path, order.number) modal=true>
            <article class="card bg-base-100 shadow hover:shadow-lg mb-4">
                <div class="card-body p-5 gap-3">
                    <div class="flex justify-between">
                        <span class="font-mono">{format!("#{:0>6}", order.number)}</span>
                        <span class="text-base-content/50">{when}</span>
                    </div>
                    <h3 class="text-lg font-semibold">{order.name.clone()}</h3>
                    {show_status.then(|| view! { <p class="text-success text-sm">{order.status.label()}</p> })}
                    <div class="flex items-center justify-between">
                        <div class="flex pl-3">
                            {icons}
                            {(hidden > 0).then(|| view! { <span class="ml-2 self-center">{format!("+{}", hidden)}</span> })}
                        </div>
                        <span class="font-mono text-xl">{summary.total_price}</span>
                    </div>
                </div>
            </article>
        </Link>
    }
}

#[component]
pub fn FeedPage() -> impl IntoView {
    let stores = use_stores();
    let api = use_api();

    let load = move || {
        let api = api.clone();
        spawn_local(async move {
            fetch_feed(&api, &stores.feed).await;
        });
    };
    load();

    // 组件卸载时 Interval 随之释放并停止
    let refresh = load.clone();
    let _interval = StoredValue::new_local(Interval::new(FEED_REFRESH_MS, move || refresh()));

    let orders = move || stores.feed.read(|f| f.data.orders.clone());
    let loading = move || stores.feed.read(|f| f.is_loading && f.data.orders.is_empty());
    let error = move || stores.feed.read(|f| f.error.clone());

    let numbers = |list: Vec<u64>| {
        list.into_iter()
            .map(|n| view! { <li class="font-mono">{format!("{:0>6}", n)}</li> })
            .collect_view()
    };

    view! {
        <main class="max-w-7xl mx-auto p-6">
            <h1 class="text-3xl font-bold mb-6">"Order feed"</h1>
            {move || error().map(|e| view! { <div role="alert" class="alert alert-error mb-4">{e}</div> })}
            <Show when=move || !loading() fallback=|| view! { <Preloader /> }>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                    <section class="max-h-[75vh] overflow-y-auto pr-2">
                        {move || {
                            orders()
                                .into_iter()
                                .map(|order| view! { <OrderCard order=order base_path="/feed" /> })
                                .collect_view()
                        }}
                    </section>
                    <section class="space-y-8">
                        <div class="grid grid-cols-2 gap-6">
                            <div>
                                <h3 class="font-semibold mb-2">"Ready:"</h3>
                                <ul class="text-success columns-2">
                                    {move || numbers(stores.feed.read(|f| f.ready_numbers(STATUS_COLUMN_LIMIT)))}
                                </ul>
                            </div>
                            <div>
                                <h3 class="font-semibold mb-2">"In progress:"</h3>
                                <ul class="columns-2">
                                    {move || numbers(stores.feed.read(|f| f.pending_numbers(STATUS_COLUMN_LIMIT)))}
                                </ul>
                            </div>
                        </div>
                        <div>
                            <h3 class="font-semibold">"Completed all time:"</h3>
                            <p class="text-6xl font-mono">{move || stores.feed.read(|f| f.total())}</p>
                        </div>
                        <div>
                            <h3 class="font-semibold">"Completed today:"</h3>
                            <p class="text-6xl font-mono">{move || stores.feed.read(|f| f.total_today())}</p>
                        </div>
                    </section>
                </div>
            </Show>
        </main>
    }
}

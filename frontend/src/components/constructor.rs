//! 组装页：左侧配料目录，右侧当前组装与下单按钮

use crate::components::modal::{Modal, Preloader};
use crate::context::{use_api, use_stores};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stellar_burger::routing::AppRoute;
use stellar_burger::routing::route::LOGIN_PATH;
use stellar_burger::store::StateCell;
use stellar_burger::store::composition::{BuildItem, CompositionAction};
use stellar_burger::store::submission::{OrderGate, SubmissionEvent, order_gate, submit_order};
use stellar_burger_shared::{Ingredient, IngredientKind};

const SECTIONS: [IngredientKind; 3] = [
    IngredientKind::Bun,
    IngredientKind::Sauce,
    IngredientKind::Main,
];

#[component]
pub fn ConstructorPage() -> impl IntoView {
    let stores = use_stores();
    let loading = move || stores.catalog.read(|c| c.is_loading && c.data.is_empty());
    let error = move || stores.catalog.read(|c| c.error.clone());

    view! {
        <main class="grid grid-cols-1 lg:grid-cols-2 gap-8 max-w-7xl mx-auto p-6">
            <section>
                <h1 class="text-3xl font-bold mb-4">"Build your burger"</h1>
                <Show when=move || !loading() fallback=|| view! { <Preloader /> }>
                    {move || error().map(|e| view! { <div role="alert" class="alert alert-error">{e}</div> })}
                    <Catalog />
                </Show>
            </section>
            <section>
                <BuildPanel />
            </section>
        </main>
        <OrderResult />
    }
}

#[component]
fn Catalog() -> impl IntoView {
    SECTIONS
        .into_iter()
        .map(|kind| {
            view! {
                <h2 class="text-xl font-semibold mt-6 mb-2">{kind.label()}</h2>
                <div class="grid grid-cols-2 gap-4">
                    <CatalogSection kind=kind />
                </div>
            }
        })
        .collect_view()
}

#[component]
fn CatalogSection(kind: IngredientKind) -> impl IntoView {
    let stores = use_stores();
    move || {
        stores
            .catalog
            .read(|c| c.by_kind(kind).cloned().collect::<Vec<_>>())
            .into_iter()
            .map(|part| view! { <IngredientCard part=part /> })
            .collect_view()
    }
}

#[component]
fn IngredientCard(part: Ingredient) -> impl IntoView {
    let stores = use_stores();
    let router = use_router();

    let id = part.id.clone();
    let count = Memo::new(move |_| stores.composition.read(|c| c.count_of(&id)));
    let details = AppRoute::Ingredient(part.id.clone());
    let to_add = part.clone();

    view! {
        <div class="card bg-base-100 shadow relative">
            <Show when=move || { count.get() > 0 }>
                <span class="badge badge-primary absolute top-2 right-2">{count}</span>
            </Show>
            <figure
                class="cursor-pointer px-4 pt-4"
                on:click=move |_| router.open_modal(&details)
            >
                <img src=part.image.clone() alt=part.name.clone() />
            </figure>
            <div class="card-body items-center text-center p-4">
                <p class="font-mono">{part.price}</p>
                <p class="text-sm">{part.name.clone()}</p>
                <button
                    class="btn btn-sm btn-outline"
                    on:click=move |_| stores.composition.dispatch(CompositionAction::add(to_add.clone()))
                >
                    "Add"
                </button>
            </div>
        </div>
    }
}

#[component]
fn BuildPanel() -> impl IntoView {
    let stores = use_stores();
    let api = use_api();
    let router = use_router();

    let total = move || stores.composition.read(|c| c.total_price());
    let busy = move || stores.submission.read(|s| s.request_in_flight);
    let submit_error = move || stores.submission.read(|s| s.last_error.clone());

    let on_order = move |_| {
        let is_auth = stores.session.with(|s| s.is_auth);
        let gate = stores.composition.with(|c| {
            stores
                .submission
                .with(|s| order_gate(is_auth, c, s))
        });
        match gate {
            OrderGate::NeedsLogin => router.navigate_path(LOGIN_PATH),
            OrderGate::Incomplete | OrderGate::Busy => {}
            OrderGate::Ready => {
                let api = api.clone();
                spawn_local(async move {
                    submit_order(&api, &stores.composition, &stores.submission).await;
                });
            }
        }
    };

    let base_slot = move |position: &'static str| {
        move || match stores.composition.read(|c| c.base.clone()) {
            Some(base) => view! {
                <div class="flex items-center gap-4 p-3 rounded-box bg-base-200">
                    <img class="w-16" src=base.part.image_mobile.clone() alt="" />
                    <span class="flex-1">{format!("{} ({})", base.part.name, position)}</span>
                    <span class="font-mono">{base.price()}</span>
                </div>
            }
            .into_any(),
            None => view! {
                <div class="p-3 rounded-box border border-dashed text-center text-base-content/50">
                    "Choose a bun"
                </div>
            }
            .into_any(),
        }
    };

    let fillings = move || {
        let items = stores.composition.read(|c| c.fillings.clone());
        let last = items.len().saturating_sub(1);
        if items.is_empty() {
            return view! {
                <div class="p-3 rounded-box border border-dashed text-center text-base-content/50">
                    "Choose fillings"
                </div>
            }
            .into_any();
        }
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| view! { <FillingRow item=item index=index last=last /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="flex flex-col gap-2">
            {base_slot("top")}
            {fillings}
            {base_slot("bottom")}
        </div>
        <div class="flex items-center justify-end gap-6 mt-6">
            <span class="text-3xl font-mono">{total}</span>
            <button class="btn btn-primary btn-lg" disabled=busy on:click=on_order>
                {move || if busy() { "Placing order..." } else { "Place order" }}
            </button>
        </div>
        {move || submit_error().map(|e| view! { <div role="alert" class="alert alert-error mt-4">{e}</div> })}
    }
}

#[component]
fn FillingRow(item: BuildItem, index: usize, last: usize) -> impl IntoView {
    let stores = use_stores();
    let instance_id = item.instance_id.clone();

    view! {
        <div class="flex items-center gap-4 p-3 rounded-box bg-base-200">
            <div class="flex flex-col">
                <button
                    class="btn btn-xs btn-ghost"
                    disabled={index == 0}
                    on:click=move |_| stores.composition.dispatch(CompositionAction::MoveUp(index))
                >
                    "▲"
                </button>
                <button
                    class="btn btn-xs btn-ghost"
                    disabled={index == last}
                    on:click=move |_| stores.composition.dispatch(CompositionAction::MoveDown(index))
                >
                    "▼"
                </button>
            </div>
            <img class="w-16" src=item.part.image_mobile.clone() alt="" />
            <span class="flex-1">{item.part.name.clone()}</span>
            <span class="font-mono">{item.price()}</span>
            <button
                class="btn btn-xs btn-ghost"
                aria-label="remove"
                on:click=move |_| stores.composition.dispatch(CompositionAction::remove(instance_id.clone()))
            >
                "✕"
            </button>
        </div>
    }
}

/// 下单结果弹窗，关闭时清除确认信息
#[component]
fn OrderResult() -> impl IntoView {
    let stores = use_stores();
    let confirmation = move || stores.submission.read(|s| s.last_confirmation.clone());
    let close = Callback::new(move |_| {
        stores
            .submission
            .dispatch(SubmissionEvent::ClearConfirmation)
    });

    move || {
        confirmation().map(|c| {
            view! {
                <Modal title="" on_close=close>
                    <div class="text-center space-y-4 py-6">
                        <p class="text-6xl font-mono font-bold">{format!("{:0>6}", c.number)}</p>
                        <p class="text-lg">"order number"</p>
                        <p class="text-base-content/70">{c.name.clone()}</p>
                        <p class="text-base-content/50 text-sm">
                            "Your order is being prepared. Wait for it at the orbital station."
                        </p>
                    </div>
                </Modal>
            }
        })
    }
}

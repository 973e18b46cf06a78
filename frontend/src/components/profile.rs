//! 个人中心：资料编辑与订单历史

use crate::components::feed::OrderCard;
use crate::components::modal::Preloader;
use crate::context::{use_api, use_stores};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use stellar_burger::routing::route::LOGIN_PATH;
use stellar_burger::store::StateCell;
use stellar_burger::store::orders::fetch_history;
use stellar_burger::store::session::{self, SessionEvent};
use stellar_burger_shared::protocol::UpdateUserRequest;

#[component]
fn ProfileLayout(#[prop(into)] hint: String, children: Children) -> impl IntoView {
    let stores = use_stores();
    let api = use_api();
    let router = use_router();

    let on_logout = move |_| {
        let api = api.clone();
        spawn_local(async move {
            if session::logout(&api, &stores.session).await {
                router.navigate_path(LOGIN_PATH);
            }
        });
    };

    view! {
        <main class="grid grid-cols-1 md:grid-cols-[16rem_1fr] gap-10 max-w-6xl mx-auto p-6">
            <aside class="space-y-4">
                <ul class="menu text-lg">
                    <li><Link to="/profile">"Profile"</Link></li>
                    <li><Link to="/profile/orders">"Order history"</Link></li>
                    <li><button on:click=on_logout>"Log out"</button></li>
                </ul>
                <p class="text-sm text-base-content/50">{hint}</p>
            </aside>
            <section>{children()}</section>
        </main>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let stores = use_stores();
    let api = use_api();

    // 已保存的 (名字, 邮箱)
    let saved = move || {
        stores.session.read(|s| {
            s.user
                .as_ref()
                .map(|u| (u.name.clone(), u.email.clone()))
                .unwrap_or_default()
        })
    };
    let name = RwSignal::new(saved().0);
    let email = RwSignal::new(saved().1);
    let password = RwSignal::new(String::new());

    let changed = move || {
        let (n, e) = saved();
        name.get() != n || email.get() != e || !password.get().is_empty()
    };

    let on_cancel = move |_| {
        let (n, e) = saved();
        name.set(n);
        email.set(e);
        password.set(String::new());
        stores.session.dispatch(SessionEvent::ClearError);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let new_password = password.get_untracked();
        let req = UpdateUserRequest {
            email: email.get_untracked(),
            name: name.get_untracked(),
            password: (!new_password.is_empty()).then_some(new_password),
        };
        let api = api.clone();
        spawn_local(async move {
            if session::update_identity(&api, &stores.session, &req).await {
                password.set(String::new());
            }
        });
    };

    let error = move || stores.session.read(|s| s.error.clone());

    view! {
        <ProfileLayout hint="Here you can change your personal data">
            <form class="space-y-4 max-w-md" on:submit=on_submit>
                <input class="input input-bordered w-full" type="text" placeholder="Name"
                    prop:value=name on:input=move |ev| name.set(event_target_value(&ev)) />
                <input class="input input-bordered w-full" type="email" placeholder="E-mail"
                    prop:value=email on:input=move |ev| email.set(event_target_value(&ev)) />
                <input class="input input-bordered w-full" type="password" placeholder="Password"
                    prop:value=password on:input=move |ev| password.set(event_target_value(&ev)) />
                {move || error().map(|e| view! { <div role="alert" class="alert alert-error text-sm">{e}</div> })}
                <Show when=changed>
                    <div class="flex gap-4 justify-end">
                        <button type="button" class="btn btn-ghost" on:click=on_cancel>"Cancel"</button>
                        <button type="submit" class="btn btn-primary">"Save"</button>
                    </div>
                </Show>
            </form>
        </ProfileLayout>
    }
}

#[component]
pub fn ProfileOrdersPage() -> impl IntoView {
    let stores = use_stores();
    let api = use_api();

    spawn_local(async move {
        fetch_history(&api, &stores.orders).await;
    });

    let loading = move || stores.orders.read(|o| o.history.is_loading && o.history.data.is_empty());
    let error = move || stores.orders.read(|o| o.history.error.clone());

    // 最新的订单在最上面
    let orders = move || {
        let mut list = stores.orders.read(|o| o.history.data.clone());
        list.reverse();
        list
    };

    view! {
        <ProfileLayout hint="Here you can view your order history">
            {move || error().map(|e| view! { <div role="alert" class="alert alert-error mb-4">{e}</div> })}
            <Show when=move || !loading() fallback=|| view! { <Preloader /> }>
                <div class="max-h-[75vh] overflow-y-auto pr-2">
                    {move || {
                        orders()
                            .into_iter()
                            .map(|order| view! { <OrderCard order=order base_path="/profile/orders" show_status=true /> })
                            .collect_view()
                    }}
                </div>
            </Show>
        </ProfileLayout>
    }
}

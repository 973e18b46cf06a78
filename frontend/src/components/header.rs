use crate::context::use_stores;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use stellar_burger::routing::AppRoute;

#[component]
pub fn AppHeader() -> impl IntoView {
    let stores = use_stores();
    let router = use_router();

    let user_name = move || {
        stores
            .session
            .read(|s| s.user.as_ref().map(|u| u.name.clone()))
            .unwrap_or_else(|| "Personal account".to_string())
    };

    // 弹窗打开时高亮背景页对应的导航项
    let active = move |check: fn(&AppRoute) -> bool| {
        move || {
            let current = router.location().with(|loc| {
                let page = loc.background().unwrap_or(loc);
                AppRoute::parse(&page.pathname)
            });
            if check(&current) {
                "btn btn-ghost text-primary"
            } else {
                "btn btn-ghost text-base-content/60"
            }
        }
    };

    view! {
        <header class="navbar bg-base-100 shadow-md px-4">
            <nav class="flex-1 gap-2">
                <Link to="/">
                    <span class=active(|r| matches!(r, AppRoute::Constructor | AppRoute::Ingredient(_)))>
                        "Constructor"
                    </span>
                </Link>
                <Link to="/feed">
                    <span class=active(|r| matches!(r, AppRoute::Feed | AppRoute::FeedOrder(_)))>
                        "Order feed"
                    </span>
                </Link>
            </nav>
            <div class="flex-none text-xl font-bold tracking-wide">"Stellar Burgers"</div>
            <div class="flex-1 justify-end flex">
                <Link to="/profile">
                    <span class="btn btn-ghost">{user_name}</span>
                </Link>
            </div>
        </header>
    }
}

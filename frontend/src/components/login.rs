//! 登录、注册、找回与重置密码表单
//!
//! 登录成功后的跳转由路由守卫完成：会话变为已登录时，守卫把用户送回被拦下的页面。

use crate::context::{use_api, use_stores};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use stellar_burger::CredentialStore;
use stellar_burger::routing::guard::reset_password_redirect;
use stellar_burger::routing::route::LOGIN_PATH;
use stellar_burger::store::session::{self, SessionEvent};
use stellar_burger::store::StateCell;
use stellar_burger_shared::protocol::{LoginRequest, RegisterRequest, ResetPasswordRequest};

/// 表单外框与会话错误提示
#[component]
fn AuthCard(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let stores = use_stores();
    // 进入表单时清掉上一次操作留下的错误
    stores.session.dispatch(SessionEvent::ClearError);

    let error = move || stores.session.read(|s| s.error.clone());

    view! {
        <main class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">{title}</h1>
                {move || error().map(|e| view! {
                    <div role="alert" class="alert alert-error text-sm py-2 w-full">
                        <span>{e}</span>
                    </div>
                })}
                <div class="card w-full shadow-2xl bg-base-100">{children()}</div>
            </div>
        </main>
    }
}

#[component]
fn Field(
    #[prop(into)] label: String,
    #[prop(into)] kind: String,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <span class="label-text mb-1">{label}</span>
            <input
                type=kind
                class="input input-bordered"
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
                required
            />
        </label>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let stores = use_stores();
    let api = use_api();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = move || stores.session.read(|s| s.is_loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = LoginRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let api = api.clone();
        spawn_local(async move {
            session::login(&api, &stores.session, &req).await;
        });
    };

    view! {
        <AuthCard title="Sign in">
            <form class="card-body" on:submit=on_submit>
                <Field label="E-mail" kind="email" value=email />
                <Field label="Password" kind="password" value=password />
                <button class="btn btn-primary mt-4" disabled=busy>
                    {move || if busy() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="text-sm mt-4">"New here? " <Link to="/register" class="link">"Create an account"</Link></p>
                <p class="text-sm">"Forgot your password? " <Link to="/forgot-password" class="link">"Recover it"</Link></p>
            </form>
        </AuthCard>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let stores = use_stores();
    let api = use_api();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = move || stores.session.read(|s| s.is_loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = RegisterRequest {
            email: email.get_untracked(),
            name: name.get_untracked(),
            password: password.get_untracked(),
        };
        let api = api.clone();
        spawn_local(async move {
            session::register(&api, &stores.session, &req).await;
        });
    };

    view! {
        <AuthCard title="Registration">
            <form class="card-body" on:submit=on_submit>
                <Field label="Name" kind="text" value=name />
                <Field label="E-mail" kind="email" value=email />
                <Field label="Password" kind="password" value=password />
                <button class="btn btn-primary mt-4" disabled=busy>"Register"</button>
                <p class="text-sm mt-4">"Already registered? " <Link to=LOGIN_PATH class="link">"Sign in"</Link></p>
            </form>
        </AuthCard>
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let stores = use_stores();
    let api = use_api();
    let router = use_router();

    let email = RwSignal::new(String::new());
    let busy = move || stores.session.read(|s| s.is_loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let api = api.clone();
        spawn_local(async move {
            if session::forgot_password(&api, &stores.session, &email).await {
                router.navigate_path("/reset-password");
            }
        });
    };

    view! {
        <AuthCard title="Password recovery">
            <form class="card-body" on:submit=on_submit>
                <Field label="E-mail" kind="email" value=email />
                <button class="btn btn-primary mt-4" disabled=busy>"Recover"</button>
                <p class="text-sm mt-4">"Remembered it? " <Link to=LOGIN_PATH class="link">"Sign in"</Link></p>
            </form>
        </AuthCard>
    }
}

#[component]
pub fn ResetPasswordPage(token: Option<String>) -> impl IntoView {
    let stores = use_stores();
    let api = use_api();
    let router = use_router();

    if let Some(to) = reset_password_redirect(api.credentials().reset_requested(), token.as_deref()) {
        router.replace(to);
    }

    let password = RwSignal::new(String::new());
    let code = RwSignal::new(token.unwrap_or_default());
    let busy = move || stores.session.read(|s| s.is_loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = ResetPasswordRequest {
            password: password.get_untracked(),
            token: code.get_untracked(),
        };
        let api = api.clone();
        spawn_local(async move {
            if session::reset_password(&api, &stores.session, &req).await {
                router.navigate_path(LOGIN_PATH);
            }
        });
    };

    view! {
        <AuthCard title="Password recovery">
            <form class="card-body" on:submit=on_submit>
                <Field label="New password" kind="password" value=password />
                <Field label="Code from the e-mail" kind="text" value=code />
                <button class="btn btn-primary mt-4" disabled=busy>"Save"</button>
                <p class="text-sm mt-4">"Remembered it? " <Link to=LOGIN_PATH class="link">"Sign in"</Link></p>
            </form>
        </AuthCard>
    }
}

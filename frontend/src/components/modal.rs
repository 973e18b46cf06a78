//! 弹窗与加载指示

use leptos::prelude::*;

/// 叠加在页面上方的弹窗
///
/// 点击遮罩、关闭按钮或按下 Escape 时调用 `on_close`。
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let handle = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div class="modal modal-open" role="dialog">
            <div class="modal-box max-w-3xl">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-2xl font-bold font-mono">{title}</h3>
                    <button
                        class="btn btn-sm btn-circle btn-ghost"
                        aria-label="close"
                        on:click=move |_| on_close.run(())
                    >
                        "✕"
                    </button>
                </div>
                {children()}
            </div>
            <div class="modal-backdrop bg-black/60" on:click=move |_| on_close.run(())></div>
        </div>
    }
}

#[component]
pub fn Preloader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[40vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use omnichat_shared::Role;

use crate::auth::use_auth;
use crate::components::icons::RefreshCw;
use crate::components::toast::{Notice, Toast};
use crate::resources::{StatCard, load_summary};

/// 角色仪表盘：几张汇总卡片
#[component]
pub fn DashboardPage(role: Role) -> impl IntoView {
    let auth = use_auth();

    let (cards, set_cards) = signal(Vec::<StatCard>::new());
    let (loading, set_loading) = signal(true);
    let (notification, set_notification) = signal(Option::<Notice>::None);

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            match load_summary(&api, role).await {
                Ok(data) => set_cards.set(data),
                Err(e) => {
                    warn!("{} dashboard failed to load: {}", role, e);
                    let text = format!("Could not load dashboard: {}", e);
                    set_notification.set(Some(Notice::error(text)));
                }
            }
            set_loading.set(false);
        });
    };

    // 进入页面即加载
    load();

    view! {
        <Toast notice=notification set_notice=set_notification />

        <div class="flex items-center justify-between">
            <p class="text-base-content/70">
                "Overview for " {role.display_name().to_lowercase()} " accounts"
            </p>
            <button
                on:click=move |_| load()
                disabled=move || loading.get()
                class="btn btn-ghost btn-circle"
            >
                <RefreshCw spinning=loading />
            </button>
        </div>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <For
                each=move || cards.get()
                key=|card: &StatCard| card.title
                children=|card: StatCard| {
                    view! {
                        <div class="stat">
                            <div class="stat-title">{card.title}</div>
                            <div class="stat-value text-primary">{card.value}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}

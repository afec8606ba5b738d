use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::auth::use_auth;
use crate::components::icons::{LogOut, NavIcon};
use crate::nav::{NavEntry, navigation_for_name};
use crate::session::Session;
use crate::web::route::AppRoute;

/// 受保护页面的外壳：侧边栏 + 顶栏
#[component]
pub fn Layout(route: AppRoute, children: Children) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    // 每次都按当前角色重新计算，不做缓存
    let menu = move || {
        let role = auth.session.with(Session::role);
        navigation_for_name(role.map_or("", |r| r.as_str()))
    };

    let full_name = move || {
        auth.session
            .with(|s| s.user().map(|u| u.full_name.clone()))
            .unwrap_or_default()
    };
    let role_label = move || {
        auth.session
            .with(|s| s.role().map(|r| r.display_name()))
            .unwrap_or_default()
    };

    let on_logout = move |_| auth.logout();

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200 font-sans">
            <input id="nav-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1 gap-2">
                        <label for="nav-drawer" class="btn btn-ghost lg:hidden">"☰"</label>
                        <h1 class="text-xl font-semibold px-2">{route.title()}</h1>
                    </div>
                    <div class="flex-none gap-4">
                        <div class="text-right">
                            <div class="font-medium">{full_name}</div>
                            <div class="text-xs text-base-content/60">{role_label}</div>
                        </div>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut />
                            "Sign out"
                        </button>
                    </div>
                </div>
                <main class="p-4 md:p-8 space-y-6">{children()}</main>
            </div>
            <aside class="drawer-side">
                <label for="nav-drawer" class="drawer-overlay"></label>
                <div class="w-64 min-h-full bg-base-100 border-r border-base-300">
                    <div class="p-4 text-2xl font-bold text-primary">"OmniChat"</div>
                    <ul class="menu p-2 gap-1 w-full">
                        <For
                            each=menu
                            key=|entry: &NavEntry| entry.route
                            children=move |entry: NavEntry| {
                                let active = move || location.pathname.get() == entry.path();
                                view! {
                                    <li>
                                        <a href=entry.path() class:active=active>
                                            <NavIcon icon=entry.icon />
                                            {entry.label}
                                        </a>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>
            </aside>
        </div>
    }
}

//! OmniChat 管理控制台
//!
//! - `session`: 会话状态，刷新后仍然保留
//! - `api`: 网关客户端，携带凭证并处理 401
//! - `nav`: 角色菜单
//! - `web::guard`: 路由守卫
//! - `components`: UI 组件层

mod api;
mod auth;
pub mod config;
mod error;
pub mod logging;
mod nav;
mod resources;
mod session;
mod web;
mod components {
    pub mod dashboard;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod records;
    mod toast;
}

use leptos::prelude::*;
use leptos_router::components::Router;
use omnichat_shared::Role;

use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::records::RecordsPage;
use crate::config::AppConfig;
use crate::resources::has_table;
use crate::web::route::AppRoute;
use crate::web::router::RouterOutlet;

fn dashboard_role(route: AppRoute) -> Option<Role> {
    match route {
        AppRoute::AdminDashboard => Some(Role::Admin),
        AppRoute::ManagerDashboard => Some(Role::Manager),
        AppRoute::StaffDashboard => Some(Role::Staff),
        _ => None,
    }
}

/// 守卫放行后渲染的视图
fn route_view(route: AppRoute) -> AnyView {
    if route == AppRoute::Login {
        return view! { <LoginPage /> }.into_any();
    }
    if let Some(role) = dashboard_role(route) {
        return view! {
            <Layout route=route>
                <DashboardPage role=role />
            </Layout>
        }
        .into_any();
    }
    if has_table(route) {
        return view! {
            <Layout route=route>
                <RecordsPage route=route />
            </Layout>
        }
        .into_any();
    }
    // 入口路由总是重定向
    ().into_any()
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 创建认证上下文（从 LocalStorage 恢复会话并连接网关）
    let auth = AuthContext::new(&config);
    provide_context(auth);

    view! {
        // 2. 路由器组件：出口根据会话运行守卫
        <Router>
            <RouterOutlet matcher=route_view />
        </Router>
    }
}

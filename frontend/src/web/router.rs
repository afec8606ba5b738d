//! 路由服务模块 - 路由出口
//!
//! 导航由 `leptos_router` 负责。本模块实现 "定位 -> 守卫 -> 渲染/重定向" 的流程：
//! 将当前地址映射为 [`AppRoute`]，用实时会话运行守卫，然后渲染或重定向。
//! 会话变化时守卫会重新运行，登出或凭证过期都会自动回到登录页。

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;
use log::debug;

use super::guard::{self, GuardDecision};
use super::route::AppRoute;
use crate::auth::use_auth;

/// 未知路径回到入口路由
fn resolve(path: &str) -> (AppRoute, GuardDecision) {
    match AppRoute::from_path(path) {
        Some(route) => (route, GuardDecision::Render),
        None => (AppRoute::Root, GuardDecision::Redirect(AppRoute::Root)),
    }
}

#[component]
pub fn RouterOutlet(
    /// 为守卫放行的路由构建视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    let decision = Memo::new(move |_| {
        let path = location.pathname.get();
        match resolve(&path) {
            (route, GuardDecision::Render) => {
                (route, auth.session.with(|s| guard::evaluate(s, route)))
            }
            unknown => unknown,
        }
    });

    move || match decision.get() {
        (route, GuardDecision::Render) => matcher(route),
        (route, GuardDecision::Redirect(target)) => {
            debug!("guard: {} -> {}", route, target);
            let options = NavigateOptions {
                replace: true,
                ..Default::default()
            };
            view! { <Redirect path=target.to_path() options=options /> }.into_any()
        }
    }
}

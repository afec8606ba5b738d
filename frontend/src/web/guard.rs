//! 路由守卫
//!
//! 仅根据当前会话决定路由能否渲染，或者应该跳转到哪里。
//! 纯函数，会话或地址变化时路由出口可以随时重新计算。

use omnichat_shared::Role;

use super::route::AppRoute;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(AppRoute),
}

/// 受保护视图的守卫
///
/// - 未登录: 跳转登录页
/// - 角色不在 `allowed` 中: 跳转入口路由
/// - 其他情况: 渲染
pub fn check(session: &Session, allowed: Option<&[Role]>) -> GuardDecision {
    let Some(role) = session.role() else {
        return GuardDecision::Redirect(AppRoute::auth_failure_redirect());
    };
    match allowed {
        Some(roles) if !roles.contains(&role) => {
            GuardDecision::Redirect(AppRoute::forbidden_redirect())
        }
        _ => GuardDecision::Render,
    }
}

/// 对 `route` 的完整判断，包括两个无需保护的入口
pub fn evaluate(session: &Session, route: AppRoute) -> GuardDecision {
    match route {
        AppRoute::Root => match session.role() {
            Some(role) => GuardDecision::Redirect(AppRoute::home_for(role)),
            None => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
        },
        r if r.should_redirect_when_authenticated() => match session.role() {
            Some(role) => GuardDecision::Redirect(AppRoute::home_for(role)),
            None => GuardDecision::Render,
        },
        r if r.requires_auth() => check(session, r.required_roles()),
        _ => GuardDecision::Render,
    }
}

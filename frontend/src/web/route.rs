//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不访问 DOM。
//! 每个路由知道自己的路径以及允许访问的角色。

use omnichat_shared::Role;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    /// 入口路由，解析为登录页或角色仪表盘
    Root,

    AdminDashboard,
    AdminUsers,
    AdminStatistics,
    AdminKeywords,

    ManagerDashboard,
    ManagerStaff,
    ManagerKpis,
    ManagerKeywords,
    ManagerShifts,
    ManagerRequests,

    StaffDashboard,
    StaffMessages,
    StaffRequests,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const MANAGER_ONLY: &[Role] = &[Role::Manager];
const STAFF_ONLY: &[Role] = &[Role::Staff];

impl AppRoute {
    pub const ALL: [AppRoute; 15] = [
        AppRoute::Login,
        AppRoute::Root,
        AppRoute::AdminDashboard,
        AppRoute::AdminUsers,
        AppRoute::AdminStatistics,
        AppRoute::AdminKeywords,
        AppRoute::ManagerDashboard,
        AppRoute::ManagerStaff,
        AppRoute::ManagerKpis,
        AppRoute::ManagerKeywords,
        AppRoute::ManagerShifts,
        AppRoute::ManagerRequests,
        AppRoute::StaffDashboard,
        AppRoute::StaffMessages,
        AppRoute::StaffRequests,
    ];

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Root => "/",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminUsers => "/admin/users",
            Self::AdminStatistics => "/admin/statistics",
            Self::AdminKeywords => "/admin/keywords",
            Self::ManagerDashboard => "/manager/dashboard",
            Self::ManagerStaff => "/manager/staff",
            Self::ManagerKpis => "/manager/kpis",
            Self::ManagerKeywords => "/manager/keywords",
            Self::ManagerShifts => "/manager/shifts",
            Self::ManagerRequests => "/manager/requests",
            Self::StaffDashboard => "/staff/dashboard",
            Self::StaffMessages => "/staff/messages",
            Self::StaffRequests => "/staff/requests",
        }
    }

    /// 将 URL path 解析为路由枚举，忽略末尾斜杠
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.to_path() == normalized)
    }

    /// 顶栏显示的页面标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Root => "OmniChat",
            Self::AdminDashboard | Self::ManagerDashboard | Self::StaffDashboard => "Dashboard",
            Self::AdminUsers => "User management",
            Self::AdminStatistics => "Statistics",
            Self::AdminKeywords | Self::ManagerKeywords => "Keywords",
            Self::ManagerStaff => "Staff management",
            Self::ManagerKpis => "KPI management",
            Self::ManagerShifts => "Shifts",
            Self::ManagerRequests => "Request approvals",
            Self::StaffMessages => "Messages",
            Self::StaffRequests => "My requests",
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Root)
    }

    /// 允许访问的角色，`None` 表示任意已登录角色
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Login | Self::Root => None,
            Self::AdminDashboard
            | Self::AdminUsers
            | Self::AdminStatistics
            | Self::AdminKeywords => Some(ADMIN_ONLY),
            Self::ManagerDashboard
            | Self::ManagerStaff
            | Self::ManagerKpis
            | Self::ManagerKeywords
            | Self::ManagerShifts
            | Self::ManagerRequests => Some(MANAGER_ONLY),
            Self::StaffDashboard | Self::StaffMessages | Self::StaffRequests => Some(STAFF_ONLY),
        }
    }

    /// 已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 未认证访问受保护路由时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已登录用户访问其他角色路由时的重定向目标
    pub fn forbidden_redirect() -> Self {
        Self::Root
    }

    /// 角色登录后的首页
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Manager => Self::ManagerDashboard,
            Role::Staff => Self::StaffDashboard,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<_> = AppRoute::ALL.iter().map(|r| r.to_path()).collect();
        assert_eq!(paths.len(), AppRoute::ALL.len());
    }

    #[test]
    fn every_protected_route_names_exactly_one_role() {
        for route in AppRoute::ALL {
            match route.required_roles() {
                Some(roles) => {
                    assert!(route.requires_auth());
                    assert_eq!(roles.len(), 1, "{route}");
                    assert!(route.to_path().starts_with(&format!("/{}/", roles[0])));
                }
                None => assert!(!route.requires_auth()),
            }
        }
    }

    #[test]
    fn from_path_matches_known_paths_only() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::from_path(route.to_path()), Some(route));
        }
        assert_eq!(AppRoute::from_path("/admin/users/"), Some(AppRoute::AdminUsers));
        assert_eq!(AppRoute::from_path(""), Some(AppRoute::Root));
        assert_eq!(AppRoute::from_path("/admin"), None);
        assert_eq!(AppRoute::from_path("/nope"), None);
    }

    #[test]
    fn role_home_is_reachable_by_that_role() {
        for role in Role::ALL {
            let home = AppRoute::home_for(role);
            assert_eq!(home.required_roles(), Some(&[role][..]));
        }
    }
}

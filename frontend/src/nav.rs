//! 角色菜单
//!
//! 每个角色对应一份固定顺序的侧边栏，不依赖服务端数据，
//! 同一角色总是得到相同的菜单。

use omnichat_shared::Role;

use crate::web::route::AppRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Dashboard,
    Users,
    Chart,
    Tag,
    Target,
    Calendar,
    Clipboard,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub route: AppRoute,
    pub label: &'static str,
    pub icon: Icon,
}

impl NavEntry {
    const fn new(route: AppRoute, label: &'static str, icon: Icon) -> Self {
        Self { route, label, icon }
    }

    pub fn path(&self) -> &'static str {
        self.route.to_path()
    }
}

const ADMIN_MENU: &[NavEntry] = &[
    NavEntry::new(AppRoute::AdminDashboard, "Dashboard", Icon::Dashboard),
    NavEntry::new(AppRoute::AdminUsers, "User management", Icon::Users),
    NavEntry::new(AppRoute::AdminStatistics, "Statistics", Icon::Chart),
    NavEntry::new(AppRoute::AdminKeywords, "Keywords", Icon::Tag),
];

const MANAGER_MENU: &[NavEntry] = &[
    NavEntry::new(AppRoute::ManagerDashboard, "Dashboard", Icon::Dashboard),
    NavEntry::new(AppRoute::ManagerStaff, "Staff management", Icon::Users),
    NavEntry::new(AppRoute::ManagerKpis, "KPI management", Icon::Target),
    NavEntry::new(AppRoute::ManagerKeywords, "Keywords", Icon::Tag),
    NavEntry::new(AppRoute::ManagerShifts, "Shifts", Icon::Calendar),
    NavEntry::new(AppRoute::ManagerRequests, "Request approvals", Icon::Clipboard),
];

const STAFF_MENU: &[NavEntry] = &[
    NavEntry::new(AppRoute::StaffDashboard, "Dashboard", Icon::Dashboard),
    NavEntry::new(AppRoute::StaffMessages, "Messages", Icon::Chat),
    NavEntry::new(AppRoute::StaffRequests, "My requests", Icon::Clipboard),
];

/// `role` 的侧边栏，未登录时为空
pub fn navigation_for(role: Option<Role>) -> Vec<NavEntry> {
    let menu = match role {
        Some(Role::Admin) => ADMIN_MENU,
        Some(Role::Manager) => MANAGER_MENU,
        Some(Role::Staff) => STAFF_MENU,
        None => &[],
    };
    menu.to_vec()
}

/// 按角色名查找菜单，未知角色返回空菜单
pub fn navigation_for_name(role: &str) -> Vec<NavEntry> {
    navigation_for(Role::parse(role))
}

//! 页面数据层
//!
//! 管理类路由展示对应资源的表格，仪表盘展示几项汇总数字。
//! 审批、完成消息、提交申请这几个写操作也放在这里。
//! 所有请求都经过网关，所以这里出现 401 同样会结束会话。

#[cfg(test)]
mod tests;

use log::info;
use omnichat_shared::Ack;
use omnichat_shared::protocol::{
    AdminDashboardRequest, ApproveRequest, CompleteMessage, CreateRequest, ListAllKeywordsRequest,
    ListDepartmentKeywordsRequest, ListKpisRequest, ListMessagesRequest, ListMyRequestsRequest,
    ListReviewQueueRequest, ListShiftsRequest, ListStaffRequest, ListUsersRequest, RejectRequest,
    StatisticsByDepartmentRequest,
};
use omnichat_shared::records::{
    ApprovalRequest, Keyword, Kpi, Message, MessageStatus, RequestStatus, RequestType, Shift,
    StatisticsByDepartment,
};
use omnichat_shared::{Role, User};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::web::HttpTransport;
use crate::web::route::AppRoute;

const USER_PAGE: u32 = 100;
const MESSAGE_PAGE: u32 = 50;

const DATE_TIME: &str = "%Y-%m-%d %H:%M";

// =========================================================
// 表格
// =========================================================

/// 可以显示为一行的记录
pub trait TableRecord {
    const HEADERS: &'static [&'static str];

    /// 行标识，写操作用它拼路径
    fn id(&self) -> i64;

    fn cells(&self) -> Vec<String>;
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn active_label(active: bool) -> String {
    let label = if active { "Active" } else { "Inactive" };
    label.to_string()
}

impl TableRecord for User {
    const HEADERS: &'static [&'static str] =
        &["Name", "Email", "Phone", "Role", "Department", "Status"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone(),
            or_dash(self.phone.as_deref()),
            self.role.display_name().to_string(),
            or_dash(self.department_name.as_deref()),
            active_label(self.is_active),
        ]
    }
}

impl TableRecord for StatisticsByDepartment {
    const HEADERS: &'static [&'static str] =
        &["Department", "Messages", "Completed", "Pending", "Staff"];

    fn id(&self) -> i64 {
        self.department_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.department_name.clone(),
            self.total_messages.to_string(),
            self.completed_messages.to_string(),
            self.pending_messages.to_string(),
            self.total_staff.to_string(),
        ]
    }
}

impl TableRecord for Keyword {
    const HEADERS: &'static [&'static str] = &["Keyword", "Department", "Priority", "Status"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        let department = self
            .department_name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.department_id));
        vec![
            self.keyword.clone(),
            department,
            self.priority.to_string(),
            active_label(self.is_active),
        ]
    }
}

impl TableRecord for Kpi {
    const HEADERS: &'static [&'static str] =
        &["Metric", "Staff", "Current", "Target", "Progress"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.metric_name.clone(),
            format!("#{}", self.user_id),
            format!("{:.2}", self.current_value),
            self.target_value
                .map(|t| format!("{:.2}", t))
                .unwrap_or_else(|| "-".to_string()),
            self.progress()
                .map(|p| format!("{:.0}%", p * 100.0))
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRecord for Shift {
    const HEADERS: &'static [&'static str] = &["Shift", "Start", "End"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.start_time.format("%H:%M").to_string(),
            self.end_time.format("%H:%M").to_string(),
        ]
    }
}

impl TableRecord for Message {
    const HEADERS: &'static [&'static str] =
        &["Customer", "Platform", "Content", "Status", "Received"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        let customer = self
            .customer_name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.customer_id));
        vec![
            customer,
            self.platform.clone(),
            self.content.clone(),
            self.status.label().to_string(),
            self.created_at.format(DATE_TIME).to_string(),
        ]
    }
}

impl TableRecord for ApprovalRequest {
    const HEADERS: &'static [&'static str] =
        &["Title", "Type", "Requested by", "Status", "Created"];

    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.request_type.label().to_string(),
            or_dash(self.user_name.as_deref()),
            self.status.label().to_string(),
            self.created_at.format(DATE_TIME).to_string(),
        ]
    }
}

/// 行内按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Approve,
    Reject,
    Complete,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Approve => "Approve",
            RowAction::Reject => "Reject",
            RowAction::Complete => "Mark done",
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, RowAction::Reject)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: i64,
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn from_records<R: TableRecord>(records: &[R]) -> Self {
        Self::with_actions(records, |_| Vec::new())
    }

    pub fn with_actions<R: TableRecord>(
        records: &[R],
        actions: impl Fn(&R) -> Vec<RowAction>,
    ) -> Self {
        let rows = records
            .iter()
            .map(|r| Row {
                id: r.id(),
                cells: r.cells(),
                actions: actions(r),
            })
            .collect();
        Self {
            headers: R::HEADERS.to_vec(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 是否需要渲染操作列
    pub fn has_actions(&self) -> bool {
        self.rows.iter().any(|row| !row.actions.is_empty())
    }
}

// 只有待审批的申请可以处理
fn review_actions(request: &ApprovalRequest) -> Vec<RowAction> {
    match request.status {
        RequestStatus::Pending => vec![RowAction::Approve, RowAction::Reject],
        RequestStatus::Approved | RequestStatus::Rejected => Vec::new(),
    }
}

fn completion_actions(message: &Message) -> Vec<RowAction> {
    match message.status {
        MessageStatus::Completed => Vec::new(),
        _ => vec![RowAction::Complete],
    }
}

/// 该路由是否有资源表格
pub fn has_table(route: AppRoute) -> bool {
    !matches!(
        route,
        AppRoute::Login
            | AppRoute::Root
            | AppRoute::AdminDashboard
            | AppRoute::ManagerDashboard
            | AppRoute::StaffDashboard
    )
}

/// 审批页需要填写审批意见
pub fn takes_review_notes(route: AppRoute) -> bool {
    route == AppRoute::ManagerRequests
}

/// 员工可以在"我的申请"页新建申请
pub fn accepts_new_requests(route: AppRoute) -> bool {
    route == AppRoute::StaffRequests
}

/// 拉取 `route` 对应的表格。没有表格的路由返回空表。
pub async fn load_table<T: HttpTransport>(
    api: &ApiClient<T>,
    route: AppRoute,
) -> Result<Table, ApiError> {
    let table = match route {
        AppRoute::AdminUsers => {
            let users = api
                .call(&ListUsersRequest {
                    limit: Some(USER_PAGE),
                })
                .await?;
            Table::from_records(&users)
        }
        AppRoute::AdminStatistics => {
            Table::from_records(&api.call(&StatisticsByDepartmentRequest).await?)
        }
        AppRoute::AdminKeywords => Table::from_records(&api.call(&ListAllKeywordsRequest).await?),
        AppRoute::ManagerStaff => Table::from_records(&api.call(&ListStaffRequest).await?),
        AppRoute::ManagerKpis => Table::from_records(&api.call(&ListKpisRequest).await?),
        AppRoute::ManagerKeywords => {
            Table::from_records(&api.call(&ListDepartmentKeywordsRequest).await?)
        }
        AppRoute::ManagerShifts => Table::from_records(&api.call(&ListShiftsRequest).await?),
        AppRoute::ManagerRequests => {
            let queue = api.call(&ListReviewQueueRequest).await?;
            Table::with_actions(&queue, review_actions)
        }
        AppRoute::StaffMessages => {
            let messages = api
                .call(&ListMessagesRequest {
                    limit: Some(MESSAGE_PAGE),
                })
                .await?;
            Table::with_actions(&messages, completion_actions)
        }
        AppRoute::StaffRequests => Table::from_records(&api.call(&ListMyRequestsRequest).await?),
        AppRoute::Login
        | AppRoute::Root
        | AppRoute::AdminDashboard
        | AppRoute::ManagerDashboard
        | AppRoute::StaffDashboard => Table::default(),
    };
    Ok(table)
}

// =========================================================
// 写操作
// =========================================================

/// 对第 `id` 行执行 `action`。`notes` 只对审批有效。
pub async fn perform<T: HttpTransport>(
    api: &ApiClient<T>,
    action: RowAction,
    id: i64,
    notes: Option<String>,
) -> Result<Ack, ApiError> {
    info!("{:?} on #{}", action, id);
    match action {
        RowAction::Approve => {
            let req = ApproveRequest {
                id,
                review_notes: notes,
            };
            api.call(&req).await
        }
        RowAction::Reject => {
            let req = RejectRequest {
                id,
                review_notes: notes,
            };
            api.call(&req).await
        }
        RowAction::Complete => api.call(&CompleteMessage { id }).await,
    }
}

/// 校验表单输入并组装新申请。标题不能为空，空描述视为未填写。
pub fn request_draft(
    kind: &str,
    title: &str,
    description: &str,
) -> Result<CreateRequest, &'static str> {
    let request_type = RequestType::parse(kind).ok_or("Please choose a request type")?;
    let title = title.trim();
    if title.is_empty() {
        return Err("Please enter a title");
    }
    let description = Some(description.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    Ok(CreateRequest {
        request_type,
        title: title.to_string(),
        description,
    })
}

pub async fn submit_request<T: HttpTransport>(
    api: &ApiClient<T>,
    draft: &CreateRequest,
) -> Result<ApprovalRequest, ApiError> {
    info!("submitting {} request", draft.request_type.as_str());
    api.call(draft).await
}

// =========================================================
// 仪表盘
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: u64,
}

impl StatCard {
    fn new(title: &'static str, value: u64) -> Self {
        Self { title, value }
    }

    fn count<T>(title: &'static str, items: &[T], pred: impl Fn(&T) -> bool) -> Self {
        let n = items.iter().filter(|item| pred(item)).count();
        Self::new(title, n as u64)
    }

    fn total<T>(title: &'static str, items: &[T]) -> Self {
        Self::new(title, items.len() as u64)
    }
}

/// 按角色汇总仪表盘数字
pub async fn load_summary<T: HttpTransport>(
    api: &ApiClient<T>,
    role: Role,
) -> Result<Vec<StatCard>, ApiError> {
    let cards = match role {
        Role::Admin => {
            let stats = api.call(&AdminDashboardRequest).await?;
            vec![
                StatCard::new("Total messages", stats.total_messages),
                StatCard::new("Pending messages", stats.pending_messages),
                StatCard::new("Completed messages", stats.completed_messages),
                StatCard::new("Users", stats.total_users),
                StatCard::new("Departments", stats.total_departments),
                StatCard::new("Pending requests", stats.pending_requests),
            ]
        }
        Role::Manager => {
            let staff = api.call(&ListStaffRequest).await?;
            let kpis = api.call(&ListKpisRequest).await?;
            let queue = api.call(&ListReviewQueueRequest).await?;
            vec![
                StatCard::total("Staff", &staff),
                StatCard::count("Active staff", &staff, |u| u.is_active),
                StatCard::total("KPIs tracked", &kpis),
                StatCard::count("Awaiting approval", &queue, |r| {
                    r.status == RequestStatus::Pending
                }),
            ]
        }
        Role::Staff => {
            let messages = api
                .call(&ListMessagesRequest {
                    limit: Some(MESSAGE_PAGE),
                })
                .await?;
            let requests = api.call(&ListMyRequestsRequest).await?;
            vec![
                StatCard::total("Recent messages", &messages),
                StatCard::count("Open messages", &messages, |m| {
                    m.status != MessageStatus::Completed
                }),
                StatCard::count("Pending requests", &requests, |r| {
                    r.status == RequestStatus::Pending
                }),
            ]
        }
    };
    Ok(cards)
}

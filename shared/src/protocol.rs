use crate::records::{
    ApprovalRequest, DashboardStats, Keyword, Kpi, Message, RequestType, Shift,
    StatisticsByDepartment,
};
use crate::{Ack, LoginRequest, LoginResponse, User};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (without query string).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Full path including any query string.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

fn with_limit(path: &str, limit: Option<u32>) -> String {
    match limit {
        Some(limit) => format!("{}?limit={}", path, limit),
        None => path.to_string(),
    }
}

/// Fills the `{id}` placeholder of a path template.
fn with_id(template: &str, id: i64) -> String {
    template.replace("{id}", &id.to_string())
}

/// Appends `?review_notes=...` (form-encoded) when notes are present.
fn with_review_notes(path: String, notes: Option<&str>) -> String {
    match notes.map(str::trim).filter(|n| !n.is_empty()) {
        Some(notes) => {
            let encoded: String = url::form_urlencoded::byte_serialize(notes.as_bytes()).collect();
            format!("{}?review_notes={}", path, encoded)
        }
        None => path,
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/api/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Profile of the credential holder.
#[derive(Debug, Serialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;
    const PATH: &'static str = "/api/auth/me";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Serialize)]
pub struct AdminDashboardRequest;

impl ApiRequest for AdminDashboardRequest {
    type Response = DashboardStats;
    const PATH: &'static str = "/api/admin/dashboard";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Default, Serialize)]
pub struct ListUsersRequest {
    #[serde(skip)]
    pub limit: Option<u32>,
}

impl ApiRequest for ListUsersRequest {
    type Response = Vec<User>;
    const PATH: &'static str = "/api/admin/users";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_limit(Self::PATH, self.limit)
    }
}

#[derive(Debug, Serialize)]
pub struct StatisticsByDepartmentRequest;

impl ApiRequest for StatisticsByDepartmentRequest {
    type Response = Vec<StatisticsByDepartment>;
    const PATH: &'static str = "/api/admin/statistics/by-department";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Keyword rules across every department.
#[derive(Debug, Serialize)]
pub struct ListAllKeywordsRequest;

impl ApiRequest for ListAllKeywordsRequest {
    type Response = Vec<Keyword>;
    const PATH: &'static str = "/api/admin/keywords";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Manager
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListStaffRequest;

impl ApiRequest for ListStaffRequest {
    type Response = Vec<User>;
    const PATH: &'static str = "/api/manager/staff";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize)]
pub struct ListKpisRequest;

impl ApiRequest for ListKpisRequest {
    type Response = Vec<Kpi>;
    const PATH: &'static str = "/api/manager/kpis";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Keyword rules of the manager's own department.
#[derive(Debug, Serialize)]
pub struct ListDepartmentKeywordsRequest;

impl ApiRequest for ListDepartmentKeywordsRequest {
    type Response = Vec<Keyword>;
    const PATH: &'static str = "/api/manager/keywords";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize)]
pub struct ListShiftsRequest;

impl ApiRequest for ListShiftsRequest {
    type Response = Vec<Shift>;
    const PATH: &'static str = "/api/manager/shifts";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Requests awaiting the manager's review.
#[derive(Debug, Serialize)]
pub struct ListReviewQueueRequest;

impl ApiRequest for ListReviewQueueRequest {
    type Response = Vec<ApprovalRequest>;
    const PATH: &'static str = "/api/manager/requests";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Staff
// =========================================================

#[derive(Debug, Default, Serialize)]
pub struct ListMessagesRequest {
    #[serde(skip)]
    pub limit: Option<u32>,
}

impl ApiRequest for ListMessagesRequest {
    type Response = Vec<Message>;
    const PATH: &'static str = "/api/staff/messages";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_limit(Self::PATH, self.limit)
    }
}

/// Approves a pending request. Notes travel in the query string, the body is empty.
#[derive(Debug, Default, Serialize)]
pub struct ApproveRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub review_notes: Option<String>,
}

impl ApiRequest for ApproveRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/manager/requests/{id}/approve";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        with_review_notes(with_id(Self::PATH, self.id), self.review_notes.as_deref())
    }
}

/// Rejects a pending request. Same wire shape as [`ApproveRequest`].
#[derive(Debug, Default, Serialize)]
pub struct RejectRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub review_notes: Option<String>,
}

impl ApiRequest for RejectRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/manager/requests/{id}/reject";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        with_review_notes(with_id(Self::PATH, self.id), self.review_notes.as_deref())
    }
}

/// Marks one of the caller's assigned messages as handled.
#[derive(Debug, Serialize)]
pub struct CompleteMessage {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for CompleteMessage {
    type Response = Ack;
    const PATH: &'static str = "/api/staff/messages/{id}/complete";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        with_id(Self::PATH, self.id)
    }
}

/// New leave / raise / transfer request from the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRequest {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiRequest for CreateRequest {
    type Response = ApprovalRequest;
    const PATH: &'static str = "/api/staff/requests";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// The caller's own approval requests.
#[derive(Debug, Serialize)]
pub struct ListMyRequestsRequest;

impl ApiRequest for ListMyRequestsRequest {
    type Response = Vec<ApprovalRequest>;
    const PATH: &'static str = "/api/staff/requests";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_appended_as_query() {
        assert_eq!(ListMessagesRequest { limit: Some(10) }.path(), "/api/staff/messages?limit=10");
        assert_eq!(ListUsersRequest::default().path(), "/api/admin/users");
        assert_eq!(ListUsersRequest { limit: Some(5) }.path(), "/api/admin/users?limit=5");
    }

    #[test]
    fn query_fields_stay_out_of_the_body() {
        let body = serde_json::to_string(&ListMessagesRequest { limit: Some(3) }).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn login_is_a_post_with_json_body() {
        assert_eq!(LoginRequest::METHOD, HttpMethod::Post);
        assert!(LoginRequest::METHOD.has_body());
        let body = serde_json::to_value(LoginRequest::new("a@b.c", "pw")).unwrap();
        assert_eq!(body["email"], "a@b.c");
        assert_eq!(body["password"], "pw");
    }

    #[test]
    fn reads_carry_no_body() {
        assert!(!CurrentUserRequest::METHOD.has_body());
        assert!(!ListMyRequestsRequest::METHOD.has_body());
    }

    #[test]
    fn review_decisions_put_notes_in_the_query() {
        let approve = ApproveRequest {
            id: 12,
            review_notes: Some("ok, enjoy & rest".to_string()),
        };
        assert_eq!(ApproveRequest::METHOD, HttpMethod::Put);
        assert_eq!(
            approve.path(),
            "/api/manager/requests/12/approve?review_notes=ok%2C+enjoy+%26+rest"
        );
        assert_eq!(serde_json::to_string(&approve).unwrap(), "{}");

        let reject = RejectRequest {
            id: 3,
            review_notes: Some("   ".to_string()),
        };
        assert_eq!(reject.path(), "/api/manager/requests/3/reject");
    }

    #[test]
    fn complete_message_targets_the_message() {
        let req = CompleteMessage { id: 41 };
        assert_eq!(req.path(), "/api/staff/messages/41/complete");
        assert!(CompleteMessage::METHOD.has_body());
    }

    #[test]
    fn create_request_body_uses_wire_names() {
        let req = CreateRequest {
            request_type: RequestType::Leave,
            title: "Two days off".to_string(),
            description: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, serde_json::json!({"type": "leave", "title": "Two days off"}));
    }
}

use super::*;
use crate::web::MockTransport;
use omnichat_shared::protocol::HttpMethod;
use serde_json::{Value, json};
use std::cell::Cell;
use std::rc::Rc;

const BASE: &str = "http://api.test";

// =========================================================
// 测试夹具
// =========================================================

fn client() -> ApiClient<MockTransport> {
    ApiClient::new(BASE, MockTransport::new())
}

fn mock(api: &ApiClient<MockTransport>, path: &str, status: u16, body: Value) {
    api.transport()
        .mock_response(&format!("{BASE}{path}"), status, body);
}

fn request_json(id: i64, status: &str) -> Value {
    json!({
        "id": id, "user_id": 7, "type": "leave", "title": "Annual leave",
        "description": null, "status": status,
        "created_at": "2024-06-01T08:30:00", "user_name": "Staff One"
    })
}

fn message_json(id: i64, status: &str) -> Value {
    json!({
        "id": id, "customer_id": 3, "content": "Hello", "platform": "zalo",
        "direction": "incoming", "status": status,
        "created_at": "2024-06-01T08:30:00", "customer_name": null
    })
}

fn user_json(id: i64, active: bool) -> Value {
    json!({
        "id": id, "email": "s@omnichat.com", "full_name": "Staff One",
        "phone": null, "role": "staff", "department_id": 2,
        "is_active": active, "created_at": "2024-01-01T09:00:00",
        "department_name": "Support"
    })
}

fn body_of(api: &ApiClient<MockTransport>, index: usize) -> Value {
    let requests = api.transport().requests.borrow();
    serde_json::from_str(requests[index].body.as_deref().unwrap()).unwrap()
}

// =========================================================
// 表格
// =========================================================

#[test]
fn test_headers_match_cell_count() {
    fn check<R: TableRecord>(record: R) {
        assert_eq!(R::HEADERS.len(), record.cells().len());
    }
    check(serde_json::from_value::<User>(user_json(1, true)).unwrap());
    check(serde_json::from_value::<Message>(message_json(1, "pending")).unwrap());
    check(serde_json::from_value::<ApprovalRequest>(request_json(1, "pending")).unwrap());
}

#[test]
fn test_user_row_fills_missing_fields_with_dash() {
    let user: User = serde_json::from_value(user_json(4, false)).unwrap();
    let table = Table::from_records(&[user]);

    assert_eq!(table.rows[0].id, 4);
    assert_eq!(table.rows[0].cells[2], "-");
    assert_eq!(table.rows[0].cells[5], "Inactive");
    assert!(!table.has_actions());
}

#[test]
fn test_dashboards_and_login_have_no_table() {
    assert!(!has_table(AppRoute::Login));
    assert!(!has_table(AppRoute::StaffDashboard));
    assert!(has_table(AppRoute::ManagerRequests));
    assert!(has_table(AppRoute::AdminKeywords));
}

#[tokio::test]
async fn test_review_queue_offers_decisions_only_for_pending() {
    let api = client();
    mock(
        &api,
        "/api/manager/requests",
        200,
        json!([request_json(1, "pending"), request_json(2, "approved")]),
    );

    let table = load_table(&api, AppRoute::ManagerRequests).await.unwrap();

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].actions, vec![RowAction::Approve, RowAction::Reject]);
    assert!(table.rows[1].actions.is_empty());
    assert!(table.has_actions());
}

#[tokio::test]
async fn test_own_requests_are_read_only() {
    let api = client();
    mock(&api, "/api/staff/requests", 200, json!([request_json(5, "pending")]));

    let table = load_table(&api, AppRoute::StaffRequests).await.unwrap();

    assert_eq!(table.rows[0].id, 5);
    assert!(!table.has_actions());
}

#[tokio::test]
async fn test_open_messages_can_be_completed() {
    let api = client();
    mock(
        &api,
        "/api/staff/messages?limit=50",
        200,
        json!([message_json(8, "in_progress"), message_json(9, "completed")]),
    );

    let table = load_table(&api, AppRoute::StaffMessages).await.unwrap();

    assert_eq!(table.rows[0].actions, vec![RowAction::Complete]);
    assert!(table.rows[1].actions.is_empty());
    assert_eq!(table.rows[0].cells[0], "#3");
}

#[tokio::test]
async fn test_dashboard_route_loads_nothing() {
    let api = client();
    let table = load_table(&api, AppRoute::AdminDashboard).await.unwrap();

    assert!(table.is_empty());
    assert!(api.transport().request_urls().is_empty());
}

// =========================================================
// 写操作
// =========================================================

#[tokio::test]
async fn test_approve_puts_notes_in_the_query() {
    let api = client();
    api.set_credential_source(|| Some("tok".to_string()));
    mock(
        &api,
        "/api/manager/requests/1/approve?review_notes=see+you+monday",
        200,
        json!({"message": "Request approved"}),
    );

    let ack = perform(&api, RowAction::Approve, 1, Some("see you monday".to_string()))
        .await
        .unwrap();

    assert_eq!(ack.message, "Request approved");
    let requests = api.transport().requests.borrow();
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].header("Authorization"), Some("Bearer tok"));
    drop(requests);
    assert_eq!(body_of(&api, 0), json!({}));
}

#[tokio::test]
async fn test_reject_without_notes_has_no_query() {
    let api = client();
    mock(
        &api,
        "/api/manager/requests/2/reject",
        200,
        json!({"message": "Request rejected"}),
    );

    perform(&api, RowAction::Reject, 2, Some("  ".to_string())).await.unwrap();

    assert_eq!(
        api.transport().request_urls(),
        vec![format!("{BASE}/api/manager/requests/2/reject")]
    );
    assert_eq!(api.transport().requests.borrow()[0].method, HttpMethod::Put);
}

#[tokio::test]
async fn test_complete_targets_the_message() {
    let api = client();
    mock(
        &api,
        "/api/staff/messages/9/complete",
        200,
        json!({"message": "Message marked as completed"}),
    );

    perform(&api, RowAction::Complete, 9, Some("ignored".to_string())).await.unwrap();

    assert_eq!(
        api.transport().request_urls(),
        vec![format!("{BASE}/api/staff/messages/9/complete")]
    );
    assert_eq!(api.transport().requests.borrow()[0].method, HttpMethod::Put);
}

#[tokio::test]
async fn test_mutation_401_raises_unauthorized() {
    let api = client();
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    api.on_unauthorized(move || counter.set(counter.get() + 1));
    mock(
        &api,
        "/api/staff/messages/9/complete",
        401,
        json!({"detail": "Could not validate credentials"}),
    );

    let err = perform(&api, RowAction::Complete, 9, None).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(fired.get(), 1);
}

#[tokio::test]
async fn test_mutation_failure_keeps_server_detail() {
    let api = client();
    mock(
        &api,
        "/api/manager/requests/3/approve",
        400,
        json!({"detail": "Request already processed"}),
    );

    let err = perform(&api, RowAction::Approve, 3, None).await.unwrap_err();
    assert_eq!(err.detail(), Some("Request already processed"));
}

#[test]
fn test_request_draft_trims_and_validates() {
    let draft = request_draft("transfer", "  Move to sales ", "   ").unwrap();
    assert_eq!(draft.request_type, RequestType::Transfer);
    assert_eq!(draft.title, "Move to sales");
    assert_eq!(draft.description, None);

    assert!(request_draft("leave", "   ", "why").is_err());
    assert!(request_draft("vacation", "Trip", "").is_err());
}

#[tokio::test]
async fn test_submit_request_posts_wire_body() {
    let api = client();
    mock(&api, "/api/staff/requests", 200, request_json(11, "pending"));

    let draft = request_draft("salary_increase", "Raise", "Two years in").unwrap();
    let created = submit_request(&api, &draft).await.unwrap();

    assert_eq!(created.id, 11);
    assert_eq!(created.status, RequestStatus::Pending);
    let requests = api.transport().requests.borrow();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
    drop(requests);
    assert_eq!(
        body_of(&api, 0),
        json!({"type": "salary_increase", "title": "Raise", "description": "Two years in"})
    );
}

// =========================================================
// 仪表盘
// =========================================================

#[tokio::test]
async fn test_manager_summary_counts_active_and_pending() {
    let api = client();
    mock(
        &api,
        "/api/manager/staff",
        200,
        json!([user_json(1, true), user_json(2, false)]),
    );
    mock(&api, "/api/manager/kpis", 200, json!([]));
    mock(
        &api,
        "/api/manager/requests",
        200,
        json!([request_json(1, "pending"), request_json(2, "rejected")]),
    );

    let cards = load_summary(&api, Role::Manager).await.unwrap();

    let values: Vec<u64> = cards.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![2, 1, 0, 1]);
}

#[tokio::test]
async fn test_summary_error_propagates() {
    let api = client();
    mock(&api, "/api/admin/dashboard", 500, json!({"detail": "boom"}));

    let err = load_summary(&api, Role::Admin).await.unwrap_err();
    assert_eq!(err.detail(), Some("boom"));
}

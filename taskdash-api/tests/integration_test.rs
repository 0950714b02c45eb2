/// Integration tests for the TaskDash API
///
/// These tests verify the full system works end-to-end:
/// - Registration and login with real password hashes
/// - Authenticated task CRUD
/// - Per-user ownership enforcement (403 on cross-user access)
/// - Dashboard client flow against a live server
///
/// Every test needs a reachable PostgreSQL instance and is therefore
/// ignored by default. Run with `cargo test -- --ignored`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use taskdash_client::{DashboardClient, NewTask};
use taskdash_shared::models::task::TaskStatus;
use tower::Service as _;

/// Test that the health endpoint reports a live database
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    ctx.cleanup().await.unwrap();
}

/// Test registration followed by login with the same credentials
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_register_and_login() {
    let ctx = TestContext::new().await.unwrap();

    let email = format!("register-{}@example.com", uuid::Uuid::new_v4());
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "username": "registrant",
                "email": email,
                "password": "a perfectly fine password"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await.unwrap();
    assert_eq!(body["message"], "User successfully created");
    // The stored user never exposes its password hash.
    assert!(body["user"]["password_hash"].is_null());

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": email,
                "password": "a perfectly fine password"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], email);

    let created_id: uuid::Uuid = serde_json::from_value(body["user"]["id"].clone()).unwrap();
    let stored = taskdash_shared::models::user::User::find_by_id(&ctx.db, created_id)
        .await
        .unwrap()
        .expect("registered user should be persisted");
    assert_eq!(stored.email, email);

    ctx.cleanup_user(created_id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Test that registering the same email twice yields a conflict
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_register_duplicate_email() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "username": "copycat",
                "email": ctx.user.email,
                "password": "another password"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    ctx.cleanup().await.unwrap();
}

/// Test login failure modes: missing fields, unknown email, bad password
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_login_failures() {
    let ctx = TestContext::new().await.unwrap();

    // Missing password
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "email": ctx.user.email }).to_string()))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown email
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": "nobody@example.com",
                "password": common::TEST_PASSWORD
            })
            .to_string(),
        ))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Wrong password
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": ctx.user.email,
                "password": "not the password"
            })
            .to_string(),
        ))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Test authentication requirement on task routes
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_authentication_required() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/getTasks?userId={}", ctx.user.id))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A garbage token is rejected the same way.
    let request = Request::builder()
        .method("GET")
        .uri(format!("/getTasks?userId={}", ctx.user.id))
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // So is a header that is present but not a Bearer scheme.
    let request = Request::builder()
        .method("GET")
        .uri(format!("/getTasks?userId={}", ctx.user.id))
        .header("authorization", "Token abc123")
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Test listing tasks scoped to the authenticated user
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_list_tasks() {
    let ctx = TestContext::new().await.unwrap();

    common::create_test_task(&ctx, ctx.user.id, "first", TaskStatus::Pending)
        .await
        .unwrap();
    common::create_test_task(&ctx, ctx.user.id, "second", TaskStatus::Completed)
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/getTasks?userId={}", ctx.user.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await.unwrap();
    let tasks = body["userTasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);

    // Missing userId is a client error, not an empty list.
    let request = Request::builder()
        .method("GET")
        .uri("/getTasks")
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

/// Test that a user cannot list another user's tasks
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_list_tasks_cross_user_forbidden() {
    let ctx = TestContext::new().await.unwrap();
    let (other, _) = ctx.create_other_user().await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/getTasks?userId={}", other.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    ctx.cleanup_user(other.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Test task creation through the API
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_create_task() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/tasks")
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "title": "write the report",
                "description": "quarterly numbers",
                "priority": "high"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await.unwrap();
    assert_eq!(body["title"], "write the report");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["priority"], "high");
    // Owner always comes from the token subject.
    assert_eq!(body["user_id"], ctx.user.id.to_string());

    ctx.cleanup().await.unwrap();
}

/// Test that declaring another owner in the create body is rejected
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_create_task_for_other_user_forbidden() {
    let ctx = TestContext::new().await.unwrap();
    let (other, _) = ctx.create_other_user().await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/tasks")
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "title": "planted task",
                "user": other.id
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    ctx.cleanup_user(other.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Test partial updates through the API
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_update_task() {
    let ctx = TestContext::new().await.unwrap();
    let task = common::create_test_task(&ctx, ctx.user.id, "flip me", TaskStatus::Pending)
        .await
        .unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tasks/{}", task.id))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": "completed" }).to_string()))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await.unwrap();
    assert_eq!(body["status"], "completed");
    // Untouched fields survive a partial update.
    assert_eq!(body["title"], "flip me");

    // Unknown task id
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tasks/{}", uuid::Uuid::new_v4()))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": "completed" }).to_string()))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Test that updating or deleting another user's task is forbidden
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_mutate_other_users_task_forbidden() {
    let ctx = TestContext::new().await.unwrap();
    let (other, _) = ctx.create_other_user().await.unwrap();
    let foreign = common::create_test_task(&ctx, other.id, "not yours", TaskStatus::Pending)
        .await
        .unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tasks/{}", foreign.id))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({ "title": "hijacked" }).to_string()))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tasks/{}", foreign.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The task itself is untouched.
    let still_there =
        taskdash_shared::models::task::Task::find_by_id(&ctx.db, foreign.id)
            .await
            .unwrap();
    assert!(still_there.is_some());

    ctx.cleanup_user(other.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Test deleting a task through the API
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_delete_task() {
    let ctx = TestContext::new().await.unwrap();
    let task = common::create_test_task(&ctx, ctx.user.id, "ephemeral", TaskStatus::Pending)
        .await
        .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tasks/{}", task.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await.unwrap();
    assert_eq!(body["message"], "Task deleted successfully");

    // Deleting again is a 404, not a silent success.
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tasks/{}", task.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Test the dashboard client against a live server: register, log in,
/// create a task, toggle it, and watch the stats move.
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_dashboard_client_flow() {
    let ctx = TestContext::new().await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = ctx.app.clone();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut client = DashboardClient::new(format!("http://{addr}"));

    let email = format!("dash-{}@example.com", uuid::Uuid::new_v4());
    client
        .register("dash-user", &email, "a dashboard password")
        .await
        .unwrap();
    client.login(&email, "a dashboard password").await.unwrap();
    assert!(client.is_logged_in());

    client
        .create_task(NewTask::with_title("walk the dog"))
        .await
        .unwrap();
    client
        .create_task(NewTask::with_title("water the plants"))
        .await
        .unwrap();

    let stats = client.stats();
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.completed_tasks, 0);
    assert_eq!(stats.productivity, 0);

    let first = client.tasks()[0].id;
    client.toggle_status(first).await.unwrap();

    let stats = client.stats();
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.pending_tasks, 1);
    assert_eq!(stats.productivity, 50);

    let second = client.tasks()[0].id;
    client.delete_task(second).await.unwrap();
    assert_eq!(client.stats().total_tasks, 1);

    let session_user = client.session().unwrap().user_id;
    client.logout();
    assert!(!client.is_logged_in());

    ctx.cleanup_user(session_user).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Test that an update with an empty body succeeds as a pure timestamp
/// refresh: no field changes, but `updated_at` moves forward.
#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_update_task_empty_patch_refreshes_timestamp() {
    let ctx = TestContext::new().await.unwrap();
    let task = common::create_test_task(&ctx, ctx.user.id, "unchanged", TaskStatus::Pending)
        .await
        .unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tasks/{}", task.id))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await.unwrap();
    assert_eq!(body["title"], "unchanged");
    assert_eq!(body["status"], "pending");

    let updated_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(body["updated_at"].clone()).unwrap();
    assert!(updated_at >= task.updated_at);

    ctx.cleanup().await.unwrap();
}

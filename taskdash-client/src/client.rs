/// Dashboard client
///
/// Wraps the TaskDash HTTP API in typed methods and maintains the local view
/// the dashboard renders from: the task list plus derived stats. Mutations
/// never patch the local list in place; every add/edit/delete re-fetches the
/// whole list from the server.

use crate::{
    error::{ApiErrorBody, ClientError},
    session::Session,
    stats::{derive_stats, DashboardStats},
};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use taskdash_shared::models::task::{Task, TaskPriority, TaskStatus, UpdateTask};
use uuid::Uuid;

/// Fields for creating a new task
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    /// Title (required)
    pub title: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// A pending, medium-priority task with just a title, matching the
    /// dashboard's "Add Task" defaults.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginUserBody {
    id: Uuid,
    email: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    token: String,
    user: LoginUserBody,
}

#[derive(Debug, Deserialize)]
struct RegisterBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListTasksBody {
    #[serde(rename = "userTasks")]
    user_tasks: Vec<Task>,
}

/// Typed client for the TaskDash API
///
/// Holds the login session, the cached task list, and the stats derived from
/// it. All methods that talk to the server are async and return
/// [`ClientError`] on failure; a 401/403 clears the session before the error
/// is returned.
#[derive(Debug)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
    tasks: Vec<Task>,
    stats: DashboardStats,
}

impl DashboardClient {
    /// Creates a client against the given base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
            session: None,
            tasks: Vec::new(),
            stats: DashboardStats::default(),
        }
    }

    /// The current session, if logged in
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// True when a login session is held
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// The cached task list from the last refresh
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Stats derived from the cached task list
    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    /// Drops the session and local cache
    pub fn logout(&mut self) {
        self.session = None;
        self.tasks.clear();
        self.stats = DashboardStats::default();
    }

    /// Registers a new account
    ///
    /// Does not log in; call [`login`](Self::login) afterwards to obtain a
    /// token.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let resp = Self::check_public(resp).await?;
        let body: RegisterBody = resp.json().await?;
        Ok(body.message)
    }

    /// Logs in and stores the session
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let resp = Self::check_public(resp).await?;
        let body: LoginBody = resp.json().await?;

        tracing::debug!(user_id = %body.user.id, "Logged in");

        self.session = Some(Session {
            token: body.token,
            user_id: body.user.id,
            email: body.user.email,
            username: body.user.username,
        });

        Ok(())
    }

    /// Re-fetches the full task list and re-derives the stats
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let session = self.session.clone().ok_or(ClientError::NotLoggedIn)?;

        let resp = self
            .http
            .get(format!("{}/getTasks", self.base_url))
            .query(&[("userId", session.user_id.to_string())])
            .bearer_auth(&session.token)
            .send()
            .await?;

        let resp = self.check(resp).await?;
        let body: ListTasksBody = resp.json().await?;

        self.stats = derive_stats(&body.user_tasks);
        self.tasks = body.user_tasks;

        tracing::debug!(
            total = self.stats.total_tasks,
            completed = self.stats.completed_tasks,
            "Task list refreshed"
        );

        Ok(())
    }

    /// Creates a task and refreshes the local list
    pub async fn create_task(&mut self, new_task: NewTask) -> Result<(), ClientError> {
        let session = self.session.clone().ok_or(ClientError::NotLoggedIn)?;

        #[derive(Serialize)]
        struct CreateTaskBody<'a> {
            #[serde(flatten)]
            task: &'a NewTask,
            user: Uuid,
        }

        let resp = self
            .http
            .post(format!("{}/tasks", self.base_url))
            .bearer_auth(&session.token)
            .json(&CreateTaskBody {
                task: &new_task,
                user: session.user_id,
            })
            .send()
            .await?;

        self.check(resp).await?;
        self.refresh().await
    }

    /// Applies a partial update to a task and refreshes the local list
    pub async fn update_task(&mut self, task_id: Uuid, patch: UpdateTask) -> Result<(), ClientError> {
        let session = self.session.clone().ok_or(ClientError::NotLoggedIn)?;

        let resp = self
            .http
            .put(format!("{}/tasks/{}", self.base_url, task_id))
            .bearer_auth(&session.token)
            .json(&patch)
            .send()
            .await?;

        self.check(resp).await?;
        self.refresh().await
    }

    /// Flips a task between completed and pending (the dashboard's check
    /// button)
    pub async fn toggle_status(&mut self, task_id: Uuid) -> Result<(), ClientError> {
        let current = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.status)
            .ok_or(ClientError::Api {
                status: 404,
                message: "Task not in local list".to_string(),
            })?;

        let next = if current == TaskStatus::Completed {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };

        self.update_task(
            task_id,
            UpdateTask {
                status: Some(next),
                ..Default::default()
            },
        )
        .await
    }

    /// Deletes a task and refreshes the local list
    pub async fn delete_task(&mut self, task_id: Uuid) -> Result<(), ClientError> {
        let session = self.session.clone().ok_or(ClientError::NotLoggedIn)?;

        let resp = self
            .http
            .delete(format!("{}/tasks/{}", self.base_url, task_id))
            .bearer_auth(&session.token)
            .send()
            .await?;

        self.check(resp).await?;
        self.refresh().await
    }

    /// Maps an authenticated response to an error, clearing the session on
    /// 401/403.
    async fn check(&mut self, resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = %status, "Credentials rejected, clearing session");
            self.logout();
            return Err(ClientError::SessionExpired);
        }

        Self::api_error(resp).await
    }

    /// Like [`check`](Self::check) but for unauthenticated endpoints, where a
    /// 401 means bad credentials rather than an expired session.
    async fn check_public(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        Self::api_error(resp).await
    }

    async fn api_error(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = resp
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "Unknown error".to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = NewTask::with_title("t1");

        assert_eq!(task.title, "t1");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = DashboardClient::new("http://localhost:3001/");
        assert_eq!(client.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_not_logged_in_initially() {
        let client = DashboardClient::new("http://localhost:3001");
        assert!(!client.is_logged_in());
        assert!(client.tasks().is_empty());
        assert_eq!(client.stats(), DashboardStats::default());
    }

    #[tokio::test]
    async fn test_refresh_without_session_fails() {
        let mut client = DashboardClient::new("http://localhost:3001");
        let result = client.refresh().await;
        assert!(matches!(result, Err(ClientError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_mutations_without_session_fail() {
        let mut client = DashboardClient::new("http://localhost:3001");

        let result = client.create_task(NewTask::with_title("t")).await;
        assert!(matches!(result, Err(ClientError::NotLoggedIn)));

        let result = client.delete_task(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ClientError::NotLoggedIn)));
    }

    #[test]
    fn test_logout_clears_state() {
        let mut client = DashboardClient::new("http://localhost:3001");
        client.session = Some(Session {
            token: "t".to_string(),
            user_id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            username: "a".to_string(),
        });

        client.logout();
        assert!(!client.is_logged_in());
        assert!(client.tasks().is_empty());
    }

    #[test]
    fn test_new_task_serializes_wire_format() {
        let task = NewTask::with_title("t1");
        let v = serde_json::to_value(&task).unwrap();

        assert_eq!(v["title"], "t1");
        assert_eq!(v["status"], "pending");
        assert_eq!(v["priority"], "medium");
        // absent optionals are omitted, not null
        assert!(v.get("description").is_none());
        assert!(v.get("due_date").is_none());
    }
}

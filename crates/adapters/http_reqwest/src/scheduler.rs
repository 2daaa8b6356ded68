//! [`SchedulerGateway`] over `/api/scheduler/*`.

use reqwest::Method;

use autopanel_app::ports::SchedulerGateway;
use autopanel_domain::error::PanelError;
use autopanel_domain::id::ScheduledTaskId;
use autopanel_domain::scheduler::{
    ScheduledTask, ScheduledTaskCreate, ScheduledTaskUpdate, TaskExecution,
};

use crate::client::HttpBackend;
use crate::error::HttpError;

const TASKS: &[&str] = &["api", "scheduler", "tasks"];
const EXECUTIONS: &[&str] = &["api", "scheduler", "executions"];

/// Path of one task; `action` is appended after the id.
fn task_path<'a>(id: &'a ScheduledTaskId, action: Option<&'a str>) -> Vec<&'a str> {
    let mut path: Vec<&'a str> = TASKS.to_vec();
    path.push(id.as_str());
    path.extend(action);
    path
}

impl SchedulerGateway for HttpBackend {
    async fn list_tasks(&self) -> Result<Vec<ScheduledTask>, PanelError> {
        let envelope = self
            .call(self.request(Method::GET, TASKS))
            .await?;
        Ok(envelope.tasks.ok_or(HttpError::MissingField("tasks"))?)
    }

    async fn create_task(&self, request: ScheduledTaskCreate) -> Result<ScheduledTask, PanelError> {
        let envelope = self
            .call(
                self.request(Method::POST, TASKS)
                    .json(&request),
            )
            .await?;
        Ok(envelope.task.ok_or(HttpError::MissingField("task"))?)
    }

    async fn update_task(
        &self,
        id: ScheduledTaskId,
        patch: ScheduledTaskUpdate,
    ) -> Result<ScheduledTask, PanelError> {
        let envelope = self
            .call(self.request(Method::PUT, &task_path(&id, None)).json(&patch))
            .await?;
        Ok(envelope.task.ok_or(HttpError::MissingField("task"))?)
    }

    async fn delete_task(&self, id: ScheduledTaskId) -> Result<(), PanelError> {
        self.call(self.request(Method::DELETE, &task_path(&id, None)))
            .await?;
        Ok(())
    }

    async fn pause_task(&self, id: ScheduledTaskId) -> Result<(), PanelError> {
        let path = task_path(&id, Some("pause"));
        self.call(self.request(Method::POST, &path)).await?;
        Ok(())
    }

    async fn resume_task(&self, id: ScheduledTaskId) -> Result<(), PanelError> {
        let path = task_path(&id, Some("resume"));
        self.call(self.request(Method::POST, &path)).await?;
        Ok(())
    }

    async fn list_executions(&self, limit: usize) -> Result<Vec<TaskExecution>, PanelError> {
        let request = self
            .request(Method::GET, EXECUTIONS)
            .query(&[("limit", limit)]);
        let envelope = self.call(request).await?;
        Ok(envelope
            .executions
            .ok_or(HttpError::MissingField("executions"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopanel_domain::scheduler::{ExecutionStatus, TriggerConfig, TriggerType};
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::HttpConfig;

    fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(&HttpConfig {
            base_url: server.uri(),
            timeout_secs: Some(5),
        })
        .unwrap()
    }

    fn task_json(id: &str, enabled: bool) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Morning run",
            "enabled": enabled,
            "trigger_type": "cron",
            "trigger_config": {"type": "cron", "cron": "0 8 * * *"},
            "task_list": ["Fight"],
            "task_options": {"Stage": "A"},
            "next_run_time": "2025-05-02T08:00:00",
            "created_at": "2025-05-01T10:00:00",
            "updated_at": "2025-05-01T10:00:00"
        })
    }

    fn ok(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    #[tokio::test]
    async fn should_list_scheduled_tasks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/scheduler/tasks"))
            .respond_with(ok(json!({
                "status": "success",
                "tasks": [task_json("job-1", true), task_json("job-2", false)]
            })))
            .mount(&server)
            .await;

        let tasks = backend(&server).list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id.as_str(), "job-2");
        assert!(!tasks[1].enabled);
    }

    #[tokio::test]
    async fn should_post_create_request_with_trigger_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scheduler/tasks"))
            .and(body_partial_json(json!({
                "name": "Morning run",
                "enabled": true,
                "trigger_type": "cron",
                "trigger_config": {"type": "cron", "cron": "0 8 * * *"},
                "task_list": ["Fight"]
            })))
            .respond_with(ok(json!({"status": "success", "task": task_json("job-1", true)})))
            .expect(1)
            .mount(&server)
            .await;

        let request = ScheduledTaskCreate::builder()
            .name("Morning run")
            .trigger(TriggerConfig::Cron {
                cron: "0 8 * * *".into(),
            })
            .task("Fight")
            .build()
            .unwrap();
        let task = backend(&server).create_task(request).await.unwrap();
        assert_eq!(task.trigger_type, TriggerType::Cron);
    }

    #[tokio::test]
    async fn should_put_sparse_update() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/scheduler/tasks/job-1"))
            .and(body_json(json!({"name": "Evening run"})))
            .respond_with(ok(json!({"status": "success", "task": task_json("job-1", true)})))
            .expect(1)
            .mount(&server)
            .await;

        let patch = ScheduledTaskUpdate::default().with_name("Evening run");
        backend(&server)
            .update_task(ScheduledTaskId::new("job-1"), patch)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn should_call_lifecycle_endpoints() {
        let server = MockServer::start().await;
        for endpoint in ["pause", "resume"] {
            Mock::given(method("POST"))
                .and(path(format!("/api/scheduler/tasks/job-1/{endpoint}")))
                .respond_with(ok(json!({"status": "success"})))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("DELETE"))
            .and(path("/api/scheduler/tasks/job-1"))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend(&server);
        let id = ScheduledTaskId::new("job-1");
        backend.pause_task(id.clone()).await.unwrap();
        backend.resume_task(id.clone()).await.unwrap();
        backend.delete_task(id).await.unwrap();
    }

    #[tokio::test]
    async fn should_escape_task_id_as_single_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scheduler/tasks/other/pause"))
            .respond_with(ok(json!({"status": "success"})))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/scheduler/tasks/other%2Fpause"))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server)
            .delete_task(ScheduledTaskId::new("other/pause"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn should_pass_execution_limit_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/scheduler/executions"))
            .and(query_param("limit", "10"))
            .respond_with(ok(json!({
                "status": "success",
                "executions": [{
                    "id": "exec-1",
                    "task_id": "job-1",
                    "task_name": "Morning run",
                    "started_at": "2025-05-01T08:00:00",
                    "status": "running"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let executions = backend(&server).list_executions(10).await.unwrap();
        assert_eq!(executions.len(), 1);
        assert_eq!(executions[0].status, ExecutionStatus::Running);
    }

    #[tokio::test]
    async fn should_reject_failed_delete_with_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/scheduler/tasks/job-9"))
            .respond_with(ok(json!({"status": "failed", "message": "task not found"})))
            .mount(&server)
            .await;

        let err = backend(&server)
            .delete_task(ScheduledTaskId::new("job-9"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message("failed to delete"), "task not found");
    }

    #[tokio::test]
    async fn should_treat_missing_payload_as_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/scheduler/tasks"))
            .respond_with(ok(json!({"status": "success"})))
            .mount(&server)
            .await;

        let err = backend(&server).list_tasks().await.unwrap_err();
        assert!(matches!(err, PanelError::Transport(_)));
    }
}

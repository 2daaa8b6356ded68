//! Command handlers — each subcommand drives the application services and
//! renders a plain-text answer.

use anyhow::Context;

use autopanel_app::ports::{
    DeviceGateway, InterfaceGateway, SchedulerGateway, SettingsGateway, UserConfigGateway,
};
use autopanel_app::services::{OperationKind, SchedulerStore, SchemaStore, TaskRunner};
use autopanel_domain::builder::build_start_request;
use autopanel_domain::defaults::value_keys;
use autopanel_domain::device::{Device, find_device};
use autopanel_domain::error::PanelError;
use autopanel_domain::id::ScheduledTaskId;
use autopanel_domain::resolver::ResolvedOptionMap;
use autopanel_domain::scheduler::{
    ScheduledTask, ScheduledTaskCreate, ScheduledTaskUpdate, TaskExecution, TriggerConfig,
};
use autopanel_domain::schema::{InterfaceSchema, OptionDef, OptionValueMap, TaskListItem};
use autopanel_domain::time::Timestamp;

use crate::cli::{
    Command, ConfigCommand, DeviceCommand, ScheduleCommand, SettingsCommand, TriggerArgs,
};

const LOAD_INTERFACE_FAILED: &str = "failed to load interface";
const START_FAILED: &str = "failed to start tasks";
const STOP_FAILED: &str = "failed to stop tasks";
const LOAD_CONFIG_FAILED: &str = "failed to load user configuration";
const SAVE_CONFIG_FAILED: &str = "failed to save user configuration";
const RESET_CONFIG_FAILED: &str = "failed to reset user configuration";
const LOAD_SETTINGS_FAILED: &str = "failed to load settings";
const SAVE_SETTINGS_FAILED: &str = "failed to save settings";
const LIST_DEVICES_FAILED: &str = "failed to list devices";
const CONNECT_DEVICE_FAILED: &str = "failed to connect device";

/// Wrap a service error with the text a user should see.
fn failure(err: PanelError, fallback: &str) -> anyhow::Error {
    let message = err.user_message(fallback);
    anyhow::Error::new(err).context(message)
}

fn scheduler_failure(kind: OperationKind) -> impl FnOnce(PanelError) -> anyhow::Error {
    move |err| failure(err, kind.fallback_message())
}

/// Every service of one CLI session, sharing a single backend.
pub struct Panel<B> {
    backend: B,
    schema: SchemaStore<B>,
    runner: TaskRunner<B>,
    scheduler: SchedulerStore<B>,
}

impl<B> Panel<B>
where
    B: InterfaceGateway
        + SchedulerGateway
        + UserConfigGateway
        + SettingsGateway
        + DeviceGateway
        + Clone,
{
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            schema: SchemaStore::new(backend.clone()),
            runner: TaskRunner::new(backend.clone()),
            scheduler: SchedulerStore::new(backend.clone()),
            backend,
        }
    }

    /// Execute one command and return its output.
    ///
    /// # Errors
    ///
    /// Returns the failure with its user-facing message as context.
    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Tasks => {
                self.load_schema().await?;
                let schema = self.schema.schema().await;
                Ok(render_tasks(&schema, &self.schema.task_list().await))
            }
            Command::Options { entry } => {
                self.load_schema().await?;
                self.schema
                    .task(&entry)
                    .await
                    .map_err(|err| failure(err, LOAD_INTERFACE_FAILED))?;
                let resolved = self.schema.option_list(&entry).await;
                let active = self.schema.active_options(&entry).await;
                Ok(render_options(&resolved, &active, &self.schema.values().await))
            }
            Command::Start {
                entries,
                values,
                saved,
            } => self.start(&entries, values, saved).await,
            Command::Stop => {
                self.runner
                    .stop()
                    .await
                    .map_err(|err| failure(err, STOP_FAILED))?;
                Ok("stopped".to_string())
            }
            Command::Schedule(command) => self.schedule(command).await,
            Command::Executions { limit } => {
                let executions = self
                    .scheduler
                    .fetch_executions(limit)
                    .await
                    .map_err(scheduler_failure(OperationKind::FetchExecutions))?;
                Ok(render_executions(&executions))
            }
            Command::Config(command) => self.config(command).await,
            Command::Settings(command) => self.settings(command).await,
            Command::Devices(command) => self.devices(command).await,
        }
    }

    async fn load_schema(&self) -> anyhow::Result<()> {
        self.schema
            .load()
            .await
            .map_err(|err| failure(err, LOAD_INTERFACE_FAILED))
    }

    /// Make `entries` the only checked tasks and apply the overrides.
    async fn select(
        &self,
        entries: &[String],
        values: Vec<(String, String)>,
    ) -> anyhow::Result<()> {
        for entry in self.schema.checked_entries().await {
            self.schema
                .set_checked(&entry, false)
                .await
                .map_err(|err| failure(err, LOAD_INTERFACE_FAILED))?;
        }
        for entry in entries {
            self.schema
                .set_checked(entry, true)
                .await
                .map_err(|err| failure(err, LOAD_INTERFACE_FAILED))?;
        }
        self.override_values(values).await;
        Ok(())
    }

    async fn override_values(&self, values: Vec<(String, String)>) {
        let known = self.schema.values().await;
        for (key, value) in values {
            if !known.contains_key(&key) {
                tracing::warn!(%key, "no option of the interface uses this value");
            }
            self.schema.set_value(key, value).await;
        }
    }

    async fn start(
        &self,
        entries: &[String],
        values: Vec<(String, String)>,
        saved: bool,
    ) -> anyhow::Result<String> {
        self.load_schema().await?;
        if saved {
            let config = self
                .backend
                .load_user_config()
                .await
                .map_err(|err| failure(err, LOAD_CONFIG_FAILED))?;
            self.schema.apply_user_config(&config).await;
        }
        self.select(entries, values).await?;
        let request = self
            .schema
            .start_request()
            .await
            .map_err(|err| failure(err, START_FAILED))?;
        let started = request.tasks.join(", ");
        self.runner
            .start(request)
            .await
            .map_err(|err| failure(err, START_FAILED))?;
        Ok(format!("started: {started}"))
    }

    /// Option values owned by `tasks`, with the overrides applied.
    async fn task_options(
        &self,
        tasks: &[String],
        values: Vec<(String, String)>,
        kind: OperationKind,
    ) -> anyhow::Result<OptionValueMap> {
        self.load_schema().await?;
        for entry in tasks {
            self.schema
                .task(entry)
                .await
                .map_err(scheduler_failure(kind))?;
        }
        self.override_values(values).await;
        let schema = self.schema.schema().await;
        let request = build_start_request(
            &schema,
            tasks.iter().map(String::as_str),
            &self.schema.values().await,
        )
        .map_err(|err| failure(err.into(), kind.fallback_message()))?;
        Ok(request.options)
    }

    async fn schedule(&self, command: ScheduleCommand) -> anyhow::Result<String> {
        match command {
            ScheduleCommand::List => {
                let tasks = self
                    .scheduler
                    .fetch_tasks()
                    .await
                    .map_err(scheduler_failure(OperationKind::FetchTasks))?;
                Ok(render_schedule(&tasks))
            }
            ScheduleCommand::Create {
                name,
                description,
                tasks,
                trigger,
                values,
                disabled,
            } => {
                let kind = OperationKind::CreateTask;
                let trigger = require_trigger(trigger)?;
                let options = self.task_options(&tasks, values, kind).await?;
                let mut builder = ScheduledTaskCreate::builder()
                    .name(name)
                    .enabled(!disabled)
                    .trigger(trigger)
                    .tasks(tasks)
                    .options(options);
                if let Some(description) = description {
                    builder = builder.description(description);
                }
                let request = builder
                    .build()
                    .map_err(|err| failure(err.into(), kind.fallback_message()))?;
                let task = self
                    .scheduler
                    .create_task(request)
                    .await
                    .map_err(scheduler_failure(kind))?;
                Ok(format!("created {}", render_scheduled_task(&task)))
            }
            ScheduleCommand::Update {
                id,
                name,
                description,
                tasks,
                trigger,
                values,
            } => {
                let kind = OperationKind::UpdateTask;
                let mut patch = ScheduledTaskUpdate::default();
                if let Some(name) = name {
                    patch = patch.with_name(name);
                }
                if let Some(description) = description {
                    patch = patch.with_description(description);
                }
                if let Some(trigger) = trigger.into_config() {
                    patch = patch.with_trigger(trigger);
                }
                if !tasks.is_empty() {
                    let options = self.task_options(&tasks, values, kind).await?;
                    patch = patch.with_task_list(tasks).with_task_options(options);
                }
                anyhow::ensure!(patch != ScheduledTaskUpdate::default(), "nothing to update");
                let task = self
                    .scheduler
                    .update_task(ScheduledTaskId::new(id), patch)
                    .await
                    .map_err(scheduler_failure(kind))?;
                Ok(format!("updated {}", render_scheduled_task(&task)))
            }
            ScheduleCommand::Delete { id } => {
                self.scheduler
                    .delete_task(ScheduledTaskId::new(id.as_str()))
                    .await
                    .map_err(scheduler_failure(OperationKind::DeleteTask))?;
                Ok(format!("deleted {id}"))
            }
            ScheduleCommand::Pause { id } => {
                self.scheduler
                    .toggle_task(ScheduledTaskId::new(id.as_str()), false)
                    .await
                    .map_err(scheduler_failure(OperationKind::PauseTask))?;
                Ok(format!("paused {id}"))
            }
            ScheduleCommand::Resume { id } => {
                self.scheduler
                    .toggle_task(ScheduledTaskId::new(id.as_str()), true)
                    .await
                    .map_err(scheduler_failure(OperationKind::ResumeTask))?;
                Ok(format!("resumed {id}"))
            }
        }
    }

    async fn config(&self, command: ConfigCommand) -> anyhow::Result<String> {
        match command {
            ConfigCommand::Show => {
                let config = self
                    .backend
                    .load_user_config()
                    .await
                    .map_err(|err| failure(err, LOAD_CONFIG_FAILED))?;
                if config.is_empty() {
                    return Ok("no saved configuration".to_string());
                }
                serde_json::to_string_pretty(&config).context("failed to render configuration")
            }
            ConfigCommand::Save { entries, values } => {
                self.load_schema().await?;
                self.select(&entries, values).await?;
                let config = self.schema.user_config().await;
                self.backend
                    .save_user_config(config)
                    .await
                    .map_err(|err| failure(err, SAVE_CONFIG_FAILED))?;
                Ok(format!("saved selection of {} task(s)", entries.len()))
            }
            ConfigCommand::Reset => {
                self.backend
                    .reset_user_config()
                    .await
                    .map_err(|err| failure(err, RESET_CONFIG_FAILED))?;
                Ok("user configuration reset".to_string())
            }
        }
    }
}

impl<B> Panel<B>
where
    B: SettingsGateway + DeviceGateway,
{
    async fn settings(&self, command: SettingsCommand) -> anyhow::Result<String> {
        let mut settings = self
            .backend
            .load_settings()
            .await
            .map_err(|err| failure(err, LOAD_SETTINGS_FAILED))?;
        let message = match command {
            SettingsCommand::Show => {
                return serde_json::to_string_pretty(&settings)
                    .context("failed to render settings");
            }
            SettingsCommand::Set { values } => {
                for (key, value) in &values {
                    settings
                        .set(key, value)
                        .map_err(|err| failure(err.into(), SAVE_SETTINGS_FAILED))?;
                }
                format!("updated {} setting(s)", values.len())
            }
            SettingsCommand::Reset => {
                settings = settings.reset();
                "settings reset to defaults".to_string()
            }
        };
        self.backend
            .save_settings(settings)
            .await
            .map_err(|err| failure(err, SAVE_SETTINGS_FAILED))?;
        Ok(message)
    }

    async fn devices(&self, command: DeviceCommand) -> anyhow::Result<String> {
        let devices = self
            .backend
            .list_devices()
            .await
            .map_err(|err| failure(err, LIST_DEVICES_FAILED))?;
        match command {
            DeviceCommand::List => Ok(render_devices(&devices)),
            DeviceCommand::Connect { device } => {
                let device = find_device(&devices, &device)
                    .map_err(|err| failure(err.into(), CONNECT_DEVICE_FAILED))?
                    .clone();
                let label = format!("{} ({})", device.name, device.address);
                self.backend
                    .connect_device(device)
                    .await
                    .map_err(|err| failure(err, CONNECT_DEVICE_FAILED))?;
                Ok(format!("connected {label}"))
            }
        }
    }
}

fn require_trigger(trigger: TriggerArgs) -> anyhow::Result<TriggerConfig> {
    trigger
        .into_config()
        .context("one of --cron, --at or --every-* is required")
}

fn format_time(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn render_tasks(schema: &InterfaceSchema, items: &[TaskListItem]) -> String {
    let mut lines = vec![schema.title.clone().unwrap_or_else(|| schema.name.clone())];
    if let Some(description) = &schema.description {
        lines.push(description.clone());
    }
    if items.is_empty() {
        lines.push("no tasks".to_string());
    }
    for item in items {
        let mark = if item.checked { 'x' } else { ' ' };
        lines.push(format!("[{mark}] {:<24} {}", item.id, item.name));
    }
    lines.join("\n")
}

fn render_options(
    resolved: &ResolvedOptionMap,
    active: &[String],
    values: &OptionValueMap,
) -> String {
    if resolved.is_empty() {
        return "no options".to_string();
    }
    let mut lines = Vec::with_capacity(resolved.len());
    for (name, option) in resolved.iter() {
        let mark = if active.iter().any(|live| live == name) { '*' } else { ' ' };
        let cases: Vec<&str> = option.cases().iter().map(|case| case.name.as_str()).collect();
        let choices = if cases.is_empty() {
            String::new()
        } else {
            format!(" [{}]", cases.join("|"))
        };
        lines.push(format!("{mark} {name} ({}){choices}", option.kind()));
        for key in value_keys(name, option) {
            let value = values.get(&key).map_or("-", String::as_str);
            if matches!(option, OptionDef::Input(_)) {
                lines.push(format!("    {key} = {value}"));
            } else {
                lines.push(format!("    = {value}"));
            }
        }
    }
    lines.join("\n")
}

fn render_scheduled_task(task: &ScheduledTask) -> String {
    let state = if task.enabled { "on " } else { "off" };
    let next = task.next_run_time.as_ref().map_or_else(|| "-".to_string(), format_time);
    format!(
        "{}  {state}  {}  {}  next: {next}  tasks: {}",
        task.id,
        task.name,
        task.trigger_config,
        task.task_list.join(", ")
    )
}

fn render_schedule(tasks: &[ScheduledTask]) -> String {
    if tasks.is_empty() {
        return "no scheduled tasks".to_string();
    }
    tasks
        .iter()
        .map(render_scheduled_task)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_executions(executions: &[TaskExecution]) -> String {
    if executions.is_empty() {
        return "no executions".to_string();
    }
    executions
        .iter()
        .map(|execution| {
            let mut line = format!(
                "{}  {:<8} {}",
                format_time(&execution.started_at),
                execution.status,
                execution.task_name
            );
            if let Some(duration) = execution.duration() {
                line.push_str(&format!("  ({}s)", duration.num_seconds()));
            }
            if let Some(error) = &execution.error_message {
                line.push_str(&format!("  {error}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_devices(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "no devices".to_string();
    }
    devices
        .iter()
        .map(|device| format!("{:<20} {:<22} adb: {}", device.name, device.address, device.adb_path))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopanel_adapter_http_reqwest::{HttpBackend, HttpConfig};
    use autopanel_domain::resolver::resolve_options;
    use autopanel_domain::schema::InterfaceDocument;
    use autopanel_domain::time::parse_timestamp;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn interface_json() -> serde_json::Value {
        json!({
            "interface_version": 2,
            "name": "Demo",
            "task": [
                {"name": "Daily fight", "entry": "Fight", "option": ["Stage"], "default_check": true},
                {"name": "Collect mail", "entry": "Mail"}
            ],
            "option": {
                "Stage": {
                    "type": "select",
                    "default_case": "A",
                    "cases": [{"name": "A"}, {"name": "B", "option": ["Count"]}]
                },
                "Count": {"type": "input", "inputs": [{"name": "times", "default": "3"}]}
            }
        })
    }

    fn schema() -> InterfaceSchema {
        InterfaceDocument::from_value(interface_json())
            .unwrap()
            .normalize()
            .unwrap()
    }

    async fn panel(server: &MockServer) -> Panel<HttpBackend> {
        Mock::given(method("GET"))
            .and(path("/api/interface"))
            .respond_with(ResponseTemplate::new(200).set_body_json(interface_json()))
            .mount(server)
            .await;
        let backend = HttpBackend::new(&HttpConfig {
            base_url: server.uri(),
            timeout_secs: Some(5),
        })
        .unwrap();
        Panel::new(backend)
    }

    fn ok(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    #[test]
    fn should_render_checked_tasks() {
        let schema = schema();
        let items: Vec<TaskListItem> = schema
            .task_list()
            .map(|item| TaskListItem {
                checked: item.id == "Fight",
                ..item
            })
            .collect();
        let output = render_tasks(&schema, &items);
        assert!(output.starts_with("Demo"));
        assert!(output.contains("[x] Fight"));
        assert!(output.contains("[ ] Mail"));
    }

    #[test]
    fn should_mark_only_active_options() {
        let schema = schema();
        let resolved = resolve_options(&schema, "Fight");
        let values: OptionValueMap = [("Stage".to_string(), "A".to_string())].into();
        let output = render_options(&resolved, &["Stage".to_string()], &values);
        assert!(output.contains("* Stage (select) [A|B]"));
        assert!(output.contains("  Count (input)"));
        assert!(output.contains("Count_times = -"));
    }

    #[test]
    fn should_render_empty_lists() {
        assert_eq!(render_schedule(&[]), "no scheduled tasks");
        assert_eq!(render_executions(&[]), "no executions");
    }

    #[test]
    fn should_render_execution_duration_and_error() {
        let execution: TaskExecution = serde_json::from_value(json!({
            "id": "exec-1",
            "task_id": "job-1",
            "task_name": "Morning run",
            "started_at": "2025-05-01T08:00:00",
            "finished_at": "2025-05-01T08:01:30",
            "status": "failed",
            "error_message": "device offline"
        }))
        .unwrap();
        let output = render_executions(&[execution]);
        assert!(output.starts_with("2025-05-01 08:00:00  failed"));
        assert!(output.contains("(90s)"));
        assert!(output.ends_with("device offline"));
    }

    #[test]
    fn should_render_missing_next_run_as_dash() {
        let task: ScheduledTask = serde_json::from_value(json!({
            "id": "job-1",
            "name": "Morning run",
            "enabled": false,
            "trigger_type": "date",
            "trigger_config": {"type": "date", "run_date": "2025-06-01T08:00:00"},
            "task_list": ["Fight", "Mail"],
            "created_at": "2025-05-01T10:00:00",
            "updated_at": "2025-05-01T10:00:00"
        }))
        .unwrap();
        let output = render_scheduled_task(&task);
        assert!(output.starts_with("job-1  off  Morning run"));
        assert!(output.contains("next: -"));
        assert!(output.ends_with("tasks: Fight, Mail"));
    }

    #[tokio::test]
    async fn should_start_only_requested_entries_with_projected_values() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/start"))
            .and(body_json(json!({"tasks": ["Mail"], "options": {}})))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let output = panel
            .run(Command::Start {
                entries: vec!["Mail".into()],
                values: vec![("Stage".into(), "B".into())],
                saved: false,
            })
            .await
            .unwrap();
        assert_eq!(output, "started: Mail");
    }

    #[tokio::test]
    async fn should_reject_unknown_entry_before_starting() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/start"))
            .respond_with(ok(json!({"status": "success"})))
            .expect(0)
            .mount(&server)
            .await;

        let err = panel
            .run(Command::Start {
                entries: vec!["Nope".into()],
                values: Vec::new(),
                saved: false,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Nope"));
    }

    #[tokio::test]
    async fn should_start_with_saved_values() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/user-config"))
            .respond_with(ok(json!({
                "status": "success",
                "config": {"taskOptions": {"Stage": "B", "Count_times": "7"}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/start"))
            .and(body_json(json!({
                "tasks": ["Fight"],
                "options": {"Stage": "B", "Count_times": "7"}
            })))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        panel
            .run(Command::Start {
                entries: vec!["Fight".into()],
                values: Vec::new(),
                saved: true,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn should_surface_backend_message_on_rejected_start() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/start"))
            .respond_with(ok(json!({"status": "failed", "message": "already running"})))
            .mount(&server)
            .await;

        let err = panel
            .run(Command::Start {
                entries: vec!["Fight".into()],
                values: Vec::new(),
                saved: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "already running");
    }

    #[tokio::test]
    async fn should_create_schedule_with_task_options() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/scheduler/tasks"))
            .and(body_partial_json(json!({
                "name": "Nightly",
                "enabled": false,
                "trigger_type": "date",
                "task_list": ["Fight"],
                "task_options": {"Stage": "A", "Count_times": "3"}
            })))
            .respond_with(ok(json!({
                "status": "success",
                "task": {
                    "id": "job-7",
                    "name": "Nightly",
                    "enabled": false,
                    "trigger_type": "date",
                    "trigger_config": {"type": "date", "run_date": "2025-06-01T22:00:00"},
                    "task_list": ["Fight"],
                    "created_at": "2025-05-01T10:00:00",
                    "updated_at": "2025-05-01T10:00:00"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let output = panel
            .run(Command::Schedule(ScheduleCommand::Create {
                name: "Nightly".into(),
                description: None,
                tasks: vec!["Fight".into()],
                trigger: TriggerArgs {
                    cron: None,
                    at: Some(parse_timestamp("2025-06-01T22:00:00").unwrap()),
                    every: crate::cli::EveryArgs::default(),
                },
                values: Vec::new(),
                disabled: true,
            }))
            .await
            .unwrap();
        assert!(output.starts_with("created job-7  off  Nightly"));
    }

    #[tokio::test]
    async fn should_use_fallback_message_for_silent_pause_failure() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/scheduler/tasks/job-1/pause"))
            .respond_with(ok(json!({"status": "failed"})))
            .mount(&server)
            .await;

        let err = panel
            .run(Command::Schedule(ScheduleCommand::Pause { id: "job-1".into() }))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            OperationKind::PauseTask.fallback_message()
        );
    }

    #[tokio::test]
    async fn should_save_selection_as_user_config() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/user-config"))
            .and(body_partial_json(json!({
                "taskChecked": {"Fight": false, "Mail": true},
                "taskOptions": {"Stage": "B"}
            })))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let output = panel
            .run(Command::Config(ConfigCommand::Save {
                entries: vec!["Mail".into()],
                values: vec![("Stage".into(), "B".into())],
            }))
            .await
            .unwrap();
        assert_eq!(output, "saved selection of 1 task(s)");
    }

    #[tokio::test]
    async fn should_report_empty_saved_config() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/user-config"))
            .respond_with(ok(json!({"status": "success"})))
            .mount(&server)
            .await;

        let output = panel
            .run(Command::Config(ConfigCommand::Show))
            .await
            .unwrap();
        assert_eq!(output, "no saved configuration");
    }

    async fn mount_settings(server: &MockServer, data: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/settings"))
            .respond_with(ok(json!({"status": "success", "data": data})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn should_apply_assignments_and_save_settings() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        mount_settings(&server, json!({"runtime": {"timeout": 120}})).await;
        Mock::given(method("POST"))
            .and(path("/api/settings"))
            .and(body_partial_json(json!({
                "runtime": {"timeout": 120, "maxRetryCount": 5},
                "update": {"updateChannel": "beta"}
            })))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let output = panel
            .run(Command::Settings(SettingsCommand::Set {
                values: vec![
                    ("runtime.maxRetryCount".into(), "5".into()),
                    ("update.updateChannel".into(), "beta".into()),
                ],
            }))
            .await
            .unwrap();
        assert_eq!(output, "updated 2 setting(s)");
    }

    #[tokio::test]
    async fn should_not_save_settings_with_unknown_key() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        mount_settings(&server, json!({})).await;
        Mock::given(method("POST"))
            .and(path("/api/settings"))
            .respond_with(ok(json!({"status": "success"})))
            .expect(0)
            .mount(&server)
            .await;

        let err = panel
            .run(Command::Settings(SettingsCommand::Set {
                values: vec![("about.version".into(), "9".into())],
            }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown or read-only setting `about.version`");
    }

    #[tokio::test]
    async fn should_keep_about_when_resetting_settings() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        mount_settings(
            &server,
            json!({"notification": {"enabled": false}, "about": {"version": "1.2.0"}}),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/api/settings"))
            .and(body_partial_json(json!({
                "notification": {"enabled": true},
                "about": {"version": "1.2.0"}
            })))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let output = panel
            .run(Command::Settings(SettingsCommand::Reset))
            .await
            .unwrap();
        assert_eq!(output, "settings reset to defaults");
    }

    fn device_list() -> serde_json::Value {
        json!({"devices": [{
            "name": "Emulator",
            "adb_path": "/usr/bin/adb",
            "address": "127.0.0.1:5555",
            "screencap_methods": "64",
            "input_methods": "3",
            "config": {}
        }]})
    }

    #[tokio::test]
    async fn should_connect_device_found_by_address() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/get_device"))
            .respond_with(ok(device_list()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/connect_device"))
            .and(body_partial_json(json!({"name": "Emulator", "input_methods": 3})))
            .respond_with(ok(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let output = panel
            .run(Command::Devices(DeviceCommand::Connect {
                device: "127.0.0.1:5555".into(),
            }))
            .await
            .unwrap();
        assert_eq!(output, "connected Emulator (127.0.0.1:5555)");
    }

    #[tokio::test]
    async fn should_report_unknown_device_without_connecting() {
        let server = MockServer::start().await;
        let panel = panel(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/get_device"))
            .respond_with(ok(device_list()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/connect_device"))
            .respond_with(ok(json!({"status": "success"})))
            .expect(0)
            .mount(&server)
            .await;

        let err = panel
            .run(Command::Devices(DeviceCommand::Connect {
                device: "Phone".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "device `Phone` not found");
    }

    #[test]
    fn should_render_device_lines() {
        let devices: Vec<Device> =
            serde_json::from_value(device_list()["devices"].clone()).unwrap();
        let output = render_devices(&devices);
        assert!(output.starts_with("Emulator"));
        assert!(output.ends_with("adb: /usr/bin/adb"));
        assert_eq!(render_devices(&[]), "no devices");
    }
}

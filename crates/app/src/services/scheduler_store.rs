//! Scheduler store — scheduled tasks, execution history and operation status.
//!
//! Every action registers its own [`OperationStatus`] under a fresh
//! [`OperationId`], so concurrent actions never overwrite each other's
//! pending flag or failure message. `loading` and `error` are derived views
//! over those statuses.
//!
//! Local lists only change when the backend confirms an action; a failed
//! action leaves them untouched.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::sync::RwLock;

use autopanel_domain::error::PanelError;
use autopanel_domain::id::{OperationId, ScheduledTaskId};
use autopanel_domain::scheduler::{
    ScheduledTask, ScheduledTaskCreate, ScheduledTaskUpdate, TaskExecution,
};

use crate::ports::SchedulerGateway;

/// Size of the [`SchedulerStore::recent_executions`] view.
pub const RECENT_EXECUTIONS: usize = 50;

/// Finished operations kept for inspection.
const OPERATION_HISTORY: usize = 64;

/// What an operation does; also selects its fallback failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    FetchTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
    PauseTask,
    ResumeTask,
    FetchExecutions,
}

impl OperationKind {
    /// Shown when the backend rejects the call without a message.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::FetchTasks => "failed to fetch scheduled tasks",
            Self::CreateTask => "failed to create scheduled task",
            Self::UpdateTask => "failed to update scheduled task",
            Self::DeleteTask => "failed to delete scheduled task",
            Self::PauseTask => "failed to pause scheduled task",
            Self::ResumeTask => "failed to resume scheduled task",
            Self::FetchExecutions => "failed to fetch execution history",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FetchTasks => "fetch_tasks",
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::DeleteTask => "delete_task",
            Self::PauseTask => "pause_task",
            Self::ResumeTask => "resume_task",
            Self::FetchExecutions => "fetch_executions",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    Pending,
    Succeeded,
    /// Failed with the message to show the user.
    Failed(String),
}

/// Status of one store action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub kind: OperationKind,
    pub state: OperationState,
    /// Start order across all operations of the store, from 1.
    pub sequence: u64,
}

impl OperationStatus {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, OperationState::Pending)
    }
}

#[derive(Debug, Default)]
struct SchedulerState {
    tasks: Vec<ScheduledTask>,
    executions: Vec<TaskExecution>,
    operations: HashMap<OperationId, OperationStatus>,
    last_sequence: u64,
    error_cleared_through: u64,
}

impl SchedulerState {
    fn task_mut(&mut self, id: &ScheduledTaskId) -> Option<&mut ScheduledTask> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    fn latest_operation(&self) -> Option<&OperationStatus> {
        self.operations.values().max_by_key(|status| status.sequence)
    }

    fn prune(&mut self) {
        while self.operations.len() > OPERATION_HISTORY {
            let oldest = self
                .operations
                .iter()
                .filter(|(_, status)| !status.is_pending())
                .min_by_key(|(_, status)| status.sequence)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    self.operations.remove(&id);
                }
                None => break,
            }
        }
    }
}

/// Session-scoped store over the backend scheduler.
pub struct SchedulerStore<G> {
    gateway: G,
    state: RwLock<SchedulerState>,
}

impl<G: SchedulerGateway> SchedulerStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: RwLock::new(SchedulerState::default()),
        }
    }

    /// Register, await and settle one operation.
    ///
    /// `apply` runs under the state lock, only when `call` succeeded.
    async fn track<T, F, A>(&self, kind: OperationKind, call: F, apply: A) -> Result<T, PanelError>
    where
        F: Future<Output = Result<T, PanelError>>,
        A: FnOnce(&mut SchedulerState, &T),
    {
        let id = OperationId::new();
        {
            let mut state = self.state.write().await;
            state.last_sequence += 1;
            let sequence = state.last_sequence;
            state.operations.insert(
                id,
                OperationStatus {
                    kind,
                    state: OperationState::Pending,
                    sequence,
                },
            );
        }

        let result = call.await;

        let mut state = self.state.write().await;
        let settled = match &result {
            Ok(value) => {
                apply(&mut *state, value);
                OperationState::Succeeded
            }
            Err(err) => {
                let message = err.user_message(kind.fallback_message());
                tracing::warn!(operation = %kind, error = %err, %message, "scheduler operation failed");
                OperationState::Failed(message)
            }
        };
        if let Some(status) = state.operations.get_mut(&id) {
            status.state = settled;
        }
        state.prune();
        result
    }

    /// Replace the task list with the backend's.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the list is left unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_tasks(&self) -> Result<Vec<ScheduledTask>, PanelError> {
        self.track(
            OperationKind::FetchTasks,
            self.gateway.list_tasks(),
            |state, tasks: &Vec<ScheduledTask>| state.tasks.clone_from(tasks),
        )
        .await
    }

    /// Create a scheduled task and append it to the list.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] for an invalid request (the backend
    /// is not called), or the gateway error.
    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_task(
        &self,
        request: ScheduledTaskCreate,
    ) -> Result<ScheduledTask, PanelError> {
        let call = async {
            match request.validate() {
                Ok(()) => self.gateway.create_task(request).await,
                Err(err) => Err(err.into()),
            }
        };
        self.track(OperationKind::CreateTask, call, |state, task: &ScheduledTask| {
            state.tasks.push(task.clone());
        })
        .await
    }

    /// Update a scheduled task and replace the entry with the requested id.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] for an invalid patch, or the
    /// gateway error.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_task(
        &self,
        id: ScheduledTaskId,
        patch: ScheduledTaskUpdate,
    ) -> Result<ScheduledTask, PanelError> {
        let target = id.clone();
        let call = async {
            match patch.validate() {
                Ok(()) => self.gateway.update_task(id, patch).await,
                Err(err) => Err(err.into()),
            }
        };
        self.track(OperationKind::UpdateTask, call, move |state, task: &ScheduledTask| {
            if let Some(slot) = state.task_mut(&target) {
                *slot = task.clone();
            }
        })
        .await
    }

    /// Delete a scheduled task and drop it from the list.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the list is left unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: ScheduledTaskId) -> Result<(), PanelError> {
        let removed = id.clone();
        self.track(
            OperationKind::DeleteTask,
            self.gateway.delete_task(id),
            move |state, _: &()| state.tasks.retain(|task| task.id != removed),
        )
        .await
    }

    /// Resume (`enabled = true`) or pause a scheduled task.
    ///
    /// Only the local `enabled` flag changes; `next_run_time` is refreshed
    /// by the next [`fetch_tasks`](Self::fetch_tasks).
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the list is left unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_task(&self, id: ScheduledTaskId, enabled: bool) -> Result<(), PanelError> {
        let target = id.clone();
        let apply = move |state: &mut SchedulerState, _: &()| {
            if let Some(task) = state.task_mut(&target) {
                task.enabled = enabled;
            }
        };
        if enabled {
            self.track(OperationKind::ResumeTask, self.gateway.resume_task(id), apply)
                .await
        } else {
            self.track(OperationKind::PauseTask, self.gateway.pause_task(id), apply)
                .await
        }
    }

    /// Replace the execution history with the backend's latest `limit` records.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the history is left unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_executions(&self, limit: usize) -> Result<Vec<TaskExecution>, PanelError> {
        self.track(
            OperationKind::FetchExecutions,
            self.gateway.list_executions(limit),
            |state, executions: &Vec<TaskExecution>| state.executions.clone_from(executions),
        )
        .await
    }

    pub async fn tasks(&self) -> Vec<ScheduledTask> {
        self.state.read().await.tasks.clone()
    }

    pub async fn enabled_tasks(&self) -> Vec<ScheduledTask> {
        self.filter_tasks(true).await
    }

    pub async fn disabled_tasks(&self) -> Vec<ScheduledTask> {
        self.filter_tasks(false).await
    }

    async fn filter_tasks(&self, enabled: bool) -> Vec<ScheduledTask> {
        self.state
            .read()
            .await
            .tasks
            .iter()
            .filter(|task| task.enabled == enabled)
            .cloned()
            .collect()
    }

    pub async fn task_by_id(&self, id: &ScheduledTaskId) -> Option<ScheduledTask> {
        self.state
            .read()
            .await
            .tasks
            .iter()
            .find(|task| &task.id == id)
            .cloned()
    }

    pub async fn executions(&self) -> Vec<TaskExecution> {
        self.state.read().await.executions.clone()
    }

    /// The first [`RECENT_EXECUTIONS`] records, in backend order.
    pub async fn recent_executions(&self) -> Vec<TaskExecution> {
        let state = self.state.read().await;
        state
            .executions
            .iter()
            .take(RECENT_EXECUTIONS)
            .cloned()
            .collect()
    }

    /// Whether any operation is still in flight.
    pub async fn loading(&self) -> bool {
        self.state
            .read()
            .await
            .operations
            .values()
            .any(OperationStatus::is_pending)
    }

    pub async fn is_pending(&self, kind: OperationKind) -> bool {
        self.state
            .read()
            .await
            .operations
            .values()
            .any(|status| status.kind == kind && status.is_pending())
    }

    pub async fn operation(&self, id: OperationId) -> Option<OperationStatus> {
        self.state.read().await.operations.get(&id).cloned()
    }

    /// Tracked operations, oldest first.
    pub async fn operations(&self) -> Vec<(OperationId, OperationStatus)> {
        let state = self.state.read().await;
        let mut operations: Vec<_> = state
            .operations
            .iter()
            .map(|(id, status)| (*id, status.clone()))
            .collect();
        operations.sort_by_key(|(_, status)| status.sequence);
        operations
    }

    /// Failure message of the most recently started operation.
    ///
    /// A newer operation, pending or successful, masks older failures.
    pub async fn error(&self) -> Option<String> {
        let state = self.state.read().await;
        let latest = state.latest_operation()?;
        match &latest.state {
            OperationState::Failed(message) if latest.sequence > state.error_cleared_through => {
                Some(message.clone())
            }
            _ => None,
        }
    }

    /// Dismiss the current error.
    pub async fn clear_error(&self) {
        let mut state = self.state.write().await;
        state.error_cleared_through = state.last_sequence;
    }
}

//! Scheduler gateway port — scheduled task CRUD, lifecycle and run history.

use std::future::Future;
use std::sync::Arc;

use autopanel_domain::error::PanelError;
use autopanel_domain::id::ScheduledTaskId;
use autopanel_domain::scheduler::{
    ScheduledTask, ScheduledTaskCreate, ScheduledTaskUpdate, TaskExecution,
};

/// Backend calls of the scheduler.
pub trait SchedulerGateway {
    /// List every scheduled task.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<ScheduledTask>, PanelError>> + Send;

    /// Create a scheduled task, returning it as stored by the backend.
    fn create_task(
        &self,
        request: ScheduledTaskCreate,
    ) -> impl Future<Output = Result<ScheduledTask, PanelError>> + Send;

    /// Apply a sparse update, returning the updated task.
    fn update_task(
        &self,
        id: ScheduledTaskId,
        patch: ScheduledTaskUpdate,
    ) -> impl Future<Output = Result<ScheduledTask, PanelError>> + Send;

    /// Delete a scheduled task.
    fn delete_task(&self, id: ScheduledTaskId)
    -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Stop firing a scheduled task.
    fn pause_task(&self, id: ScheduledTaskId) -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Resume firing a paused task.
    fn resume_task(&self, id: ScheduledTaskId)
    -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Most recent execution records; ordering and limiting happen server-side.
    fn list_executions(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TaskExecution>, PanelError>> + Send;
}

impl<T: SchedulerGateway + Send + Sync> SchedulerGateway for Arc<T> {
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<ScheduledTask>, PanelError>> + Send {
        (**self).list_tasks()
    }

    fn create_task(
        &self,
        request: ScheduledTaskCreate,
    ) -> impl Future<Output = Result<ScheduledTask, PanelError>> + Send {
        (**self).create_task(request)
    }

    fn update_task(
        &self,
        id: ScheduledTaskId,
        patch: ScheduledTaskUpdate,
    ) -> impl Future<Output = Result<ScheduledTask, PanelError>> + Send {
        (**self).update_task(id, patch)
    }

    fn delete_task(
        &self,
        id: ScheduledTaskId,
    ) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).delete_task(id)
    }

    fn pause_task(&self, id: ScheduledTaskId) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).pause_task(id)
    }

    fn resume_task(
        &self,
        id: ScheduledTaskId,
    ) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).resume_task(id)
    }

    fn list_executions(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TaskExecution>, PanelError>> + Send {
        (**self).list_executions(limit)
    }
}

//! Scheduler — tasks the backend runs on a trigger, and their run history.
//!
//! A [`ScheduledTask`] pairs a [`TriggerConfig`] with the task entries and
//! option values to submit when it fires. The backend owns the schedule:
//! it computes `next_run_time` and records a [`TaskExecution`] per run.

mod execution;
mod trigger;

pub use execution::{ExecutionStatus, TaskExecution};
pub use trigger::{IntervalTrigger, TriggerConfig, TriggerType};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ScheduledTaskId;
use crate::schema::OptionValueMap;
use crate::time::{Timestamp, iso8601};

/// A task definition the backend runs whenever its trigger fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: ScheduledTaskId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    pub trigger_type: TriggerType,
    pub trigger_config: TriggerConfig,
    pub task_list: Vec<String>,
    #[serde(default)]
    pub task_options: OptionValueMap,
    #[serde(
        default,
        with = "iso8601::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_run_time: Option<Timestamp>,
    #[serde(with = "iso8601")]
    pub created_at: Timestamp,
    #[serde(with = "iso8601")]
    pub updated_at: Timestamp,
}

impl ScheduledTask {
    /// Apply a successful update locally.
    pub fn apply(&mut self, patch: &ScheduledTaskUpdate) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(trigger) = &patch.trigger_config {
            self.trigger_type = trigger.trigger_type();
            self.trigger_config = trigger.clone();
        }
        if let Some(task_list) = &patch.task_list {
            self.task_list.clone_from(task_list);
        }
        if let Some(task_options) = &patch.task_options {
            self.task_options.clone_from(task_options);
        }
    }
}

/// Body of the create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTaskCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    pub trigger_type: TriggerType,
    pub trigger_config: TriggerConfig,
    pub task_list: Vec<String>,
    pub task_options: OptionValueMap,
}

impl ScheduledTaskCreate {
    #[must_use]
    pub fn builder() -> ScheduledTaskCreateBuilder {
        ScheduledTaskCreateBuilder::default()
    }

    /// Check the request can be submitted.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] when `name` is blank
    /// - [`ValidationError::EmptyTaskList`] when no task entry is given
    /// - any error from [`TriggerConfig::validate`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.task_list.is_empty() {
            return Err(ValidationError::EmptyTaskList);
        }
        self.trigger_config.validate()
    }
}

/// Step-by-step builder for [`ScheduledTaskCreate`].
#[derive(Debug, Default)]
pub struct ScheduledTaskCreateBuilder {
    name: Option<String>,
    description: Option<String>,
    enabled: Option<bool>,
    trigger: Option<TriggerConfig>,
    task_list: Vec<String>,
    task_options: OptionValueMap,
}

impl ScheduledTaskCreateBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: TriggerConfig) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn task(mut self, entry: impl Into<String>) -> Self {
        self.task_list.push(entry.into());
        self
    }

    #[must_use]
    pub fn tasks<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task_list.extend(entries.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.task_options.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn options(mut self, values: OptionValueMap) -> Self {
        self.task_options.extend(values);
        self
    }

    /// Consume the builder, validate, and return the create request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a required field is missing or empty,
    /// [`ValidationError::MissingTrigger`] when no trigger was set.
    pub fn build(self) -> Result<ScheduledTaskCreate, ValidationError> {
        let trigger_config = self.trigger.ok_or(ValidationError::MissingTrigger)?;
        let request = ScheduledTaskCreate {
            name: self.name.unwrap_or_default(),
            description: self.description,
            enabled: self.enabled.unwrap_or(true),
            trigger_type: trigger_config.trigger_type(),
            trigger_config,
            task_list: self.task_list,
            task_options: self.task_options,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Sparse patch for the update call; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_config: Option<TriggerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_options: Option<OptionValueMap>,
}

impl ScheduledTaskUpdate {
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Replace the trigger; sets the matching `trigger_type` too.
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerConfig) -> Self {
        self.trigger_type = Some(trigger.trigger_type());
        self.trigger_config = Some(trigger);
        self
    }

    #[must_use]
    pub fn with_task_list<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task_list = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_task_options(mut self, values: OptionValueMap) -> Self {
        self.task_options = Some(values);
        self
    }

    /// Check the fields that are present.
    ///
    /// # Errors
    ///
    /// Same rules as [`ScheduledTaskCreate::validate`], applied only to the
    /// fields being changed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyName);
        }
        if self.task_list.as_ref().is_some_and(Vec::is_empty) {
            return Err(ValidationError::EmptyTaskList);
        }
        if let Some(trigger) = &self.trigger_config {
            trigger.validate()?;
        }
        Ok(())
    }
}

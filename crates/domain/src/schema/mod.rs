//! Interface schema — the declarative description of what a session can run.
//!
//! The backend publishes the tasks it can execute, the options each task
//! exposes, and the controllers/resources it drives. Several wire versions
//! exist; [`InterfaceDocument`] accepts all of them and
//! [`normalize`](InterfaceDocument::normalize)s into the canonical
//! [`InterfaceSchema`] used everywhere else.

mod document;
mod option;

pub use document::InterfaceDocument;
pub use option::{
    InputCase, InputOption, OptionCase, OptionDef, PipelineType, SelectOption, SwitchOption,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::NotFoundError;

/// Free-form per-node pipeline parameters forwarded to the backend untouched.
pub type PipelineOverride = serde_json::Map<String, serde_json::Value>;

/// Runtime option values.
///
/// `select`/`switch` options are keyed by option name, `input` options by
/// `{option}_{input}` (see [`InputOption::value_key`]).
pub type OptionValueMap = BTreeMap<String, String>;

/// Canonical interface schema for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceSchema {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, rename = "task")]
    pub tasks: Vec<Task>,
    #[serde(default, rename = "option")]
    pub options: BTreeMap<String, OptionDef>,
    #[serde(default, rename = "controller")]
    pub controllers: Vec<Controller>,
    #[serde(default, rename = "resource")]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
}

impl InterfaceSchema {
    /// Flattened task view in schema order.
    ///
    /// Recomputed on every call; `checked` is left `false` because selection
    /// state belongs to the session, not to the schema.
    pub fn task_list(&self) -> impl Iterator<Item = TaskListItem> + '_ {
        self.tasks.iter().enumerate().map(|(order, task)| TaskListItem {
            id: task.entry.clone(),
            name: task.name.clone(),
            order,
            checked: false,
        })
    }

    /// First task whose `entry` matches.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no task has this entry.
    pub fn task(&self, entry: &str) -> Result<&Task, NotFoundError> {
        self.tasks
            .iter()
            .find(|task| task.entry == entry)
            .ok_or_else(|| NotFoundError {
                entity: "Task",
                id: entry.to_string(),
            })
    }

    #[must_use]
    pub fn option(&self, name: &str) -> Option<&OptionDef> {
        self.options.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.options.is_empty()
    }
}

/// A runnable unit; `entry` is its execution key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub entry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub default_check: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controller: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_override: Option<PipelineOverride>,
}

impl Task {
    #[must_use]
    pub fn new(name: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: entry.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Row of the flattened task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListItem {
    /// The task entry.
    pub id: String,
    pub name: String,
    /// Position in the schema.
    pub order: usize,
    pub checked: bool,
}

/// Kind of device controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    Adb,
    Win32,
    PlayCover,
    Gamepad,
    #[serde(other)]
    Other,
}

impl ControllerKind {
    /// Lenient mapping used for legacy documents where the kind is free text.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "adb" => Self::Adb,
            "win32" => Self::Win32,
            "playcover" => Self::PlayCover,
            "gamepad" => Self::Gamepad,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ControllerKind,
    /// Controller-specific sections (`adb`, `win32`, display sizing, …).
    #[serde(flatten)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controller: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option: Vec<String>,
}

/// External helper process launched alongside the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub child_exec: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

//! Schema store — the loaded interface schema and the user's selection.
//!
//! One store lives for the whole session. It owns the schema, the option
//! value map seeded from it, and the set of checked task entries. A reload
//! replaces all three at once.

use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::RwLock;

use autopanel_domain::builder::{StartRequest, build_start_request};
use autopanel_domain::defaults::seed_values;
use autopanel_domain::error::PanelError;
use autopanel_domain::resolver::{ResolvedOptionMap, active_option_names, resolve_options};
use autopanel_domain::schema::{InterfaceSchema, OptionValueMap, Task, TaskListItem};
use autopanel_domain::user_config::UserConfig;

use crate::ports::InterfaceGateway;

#[derive(Debug, Default)]
struct Session {
    schema: InterfaceSchema,
    values: OptionValueMap,
    checked: BTreeSet<String>,
    task_order: Option<Vec<String>>,
}

impl Session {
    fn from_schema(schema: InterfaceSchema) -> Self {
        let values = seed_values(&schema);
        let checked = schema
            .tasks
            .iter()
            .filter(|task| task.default_check)
            .map(|task| task.entry.clone())
            .collect();
        Self {
            schema,
            values,
            checked,
            task_order: None,
        }
    }

    fn entries(&self) -> impl Iterator<Item = &str> {
        let mut seen = BTreeSet::new();
        self.schema
            .tasks
            .iter()
            .map(|task| task.entry.as_str())
            .filter(move |entry| seen.insert(*entry))
    }
}

/// Session-scoped holder of the interface schema and the current selection.
pub struct SchemaStore<G> {
    gateway: G,
    session: RwLock<Session>,
}

impl<G: InterfaceGateway> SchemaStore<G> {
    /// Create an empty store; call [`load`](Self::load) to fetch the schema.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            session: RwLock::new(Session::default()),
        }
    }

    /// Fetch the schema and replace the session with it.
    ///
    /// Option values are reseeded from their defaults and checked entries
    /// reset to each task's `default_check`.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the previous schema stays in place.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<(), PanelError> {
        let schema = match self.gateway.fetch_interface().await {
            Ok(schema) => schema,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load interface schema, keeping previous one");
                return Err(err);
            }
        };
        tracing::info!(
            tasks = schema.tasks.len(),
            options = schema.options.len(),
            "interface schema loaded"
        );
        *self.session.write().await = Session::from_schema(schema);
        Ok(())
    }

    /// Snapshot of the current schema (empty before the first load).
    pub async fn schema(&self) -> InterfaceSchema {
        self.session.read().await.schema.clone()
    }

    /// Every task in schema order, with its checked flag.
    pub async fn task_list(&self) -> Vec<TaskListItem> {
        let session = self.session.read().await;
        session
            .schema
            .task_list()
            .map(|item| TaskListItem {
                checked: session.checked.contains(&item.id),
                ..item
            })
            .collect()
    }

    /// Look up a task by entry.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotFound`] when no task has this entry.
    pub async fn task(&self, entry: &str) -> Result<Task, PanelError> {
        let session = self.session.read().await;
        Ok(session.schema.task(entry)?.clone())
    }

    /// Every option reachable from the task entry, through any case.
    pub async fn option_list(&self, entry: &str) -> ResolvedOptionMap {
        resolve_options(&self.session.read().await.schema, entry)
    }

    /// Names of the options live under the currently selected cases.
    pub async fn active_options(&self, entry: &str) -> Vec<String> {
        let session = self.session.read().await;
        active_option_names(&session.schema, entry, &session.values)
    }

    pub async fn values(&self) -> OptionValueMap {
        self.session.read().await.values.clone()
    }

    /// Set one value-map entry (an option name, or `{option}_{input}`).
    pub async fn set_value(&self, key: impl Into<String>, value: impl Into<String>) {
        self.session
            .write()
            .await
            .values
            .insert(key.into(), value.into());
    }

    /// Check or uncheck a task entry.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotFound`] when no task has this entry.
    pub async fn set_checked(&self, entry: &str, checked: bool) -> Result<(), PanelError> {
        let mut session = self.session.write().await;
        session.schema.task(entry)?;
        if checked {
            session.checked.insert(entry.to_string());
        } else {
            session.checked.remove(entry);
        }
        Ok(())
    }

    /// Checked entries, in schema order.
    pub async fn checked_entries(&self) -> Vec<String> {
        let session = self.session.read().await;
        session
            .entries()
            .filter(|entry| session.checked.contains(*entry))
            .map(str::to_string)
            .collect()
    }

    /// Build the start payload for the checked entries.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] when nothing is checked or an
    /// input value is invalid.
    pub async fn start_request(&self) -> Result<StartRequest, PanelError> {
        let session = self.session.read().await;
        let entries = session
            .entries()
            .filter(|entry| session.checked.contains(*entry));
        Ok(build_start_request(&session.schema, entries, &session.values)?)
    }

    /// Restore a saved selection on top of the loaded schema.
    ///
    /// Checked flags are applied to known entries only, and values only to
    /// keys the schema seeded.
    pub async fn apply_user_config(&self, config: &UserConfig) {
        let mut session = self.session.write().await;
        let session = &mut *session;
        if let Some(task_checked) = &config.task_checked {
            for (entry, checked) in task_checked {
                if session.schema.task(entry).is_err() {
                    tracing::debug!(%entry, "ignoring saved flag for unknown task");
                    continue;
                }
                if *checked {
                    session.checked.insert(entry.clone());
                } else {
                    session.checked.remove(entry);
                }
            }
        }
        if let Some(task_options) = &config.task_options {
            for (key, value) in task_options {
                if let Some(slot) = session.values.get_mut(key) {
                    slot.clone_from(value);
                }
            }
        }
        if let Some(order) = &config.task_order {
            session.task_order = Some(order.clone());
        }
    }

    /// Snapshot the session as a [`UserConfig`] ready to be saved.
    pub async fn user_config(&self) -> UserConfig {
        let session = self.session.read().await;
        let task_order = session
            .task_order
            .clone()
            .unwrap_or_else(|| session.entries().map(str::to_string).collect());
        let task_checked: BTreeMap<String, bool> = session
            .entries()
            .map(|entry| (entry.to_string(), session.checked.contains(entry)))
            .collect();
        UserConfig {
            task_order: Some(task_order),
            task_checked: Some(task_checked),
            task_options: Some(session.values.clone()),
        }
    }
}

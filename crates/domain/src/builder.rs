//! Task configuration — the payload submitted with a run request.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::defaults::value_keys;
use crate::error::ValidationError;
use crate::resolver::{ResolvedOptionMap, active_option_names, resolve_options_for};
use crate::schema::{InterfaceSchema, OptionValueMap};
use crate::validation::validate_values;

/// Body of the start call: the task entries to run and their option values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub tasks: Vec<String>,
    pub options: OptionValueMap,
}

/// Keep only the values owned by the resolved options.
///
/// `input` options own every `{option}_{input}` key; keys missing from
/// `values` are left out.
#[must_use]
pub fn project_values(resolved: &ResolvedOptionMap, values: &OptionValueMap) -> OptionValueMap {
    resolved
        .iter()
        .flat_map(|(name, option)| value_keys(name, option))
        .filter_map(|key| values.get(&key).map(|value| (key, value.clone())))
        .collect()
}

/// Build the start payload for the checked `entries`.
///
/// The options of every entry are resolved, merged by name, and the live
/// values are projected onto them. Entries keep their given order.
///
/// Only inputs under the selected cases are validated; values of options
/// behind unselected cases are still sent as-is.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTaskList`] when `entries` is empty and
/// [`ValidationError::InvalidInput`] when a projected input value is invalid.
pub fn build_start_request<'a, I>(
    schema: &InterfaceSchema,
    entries: I,
    values: &OptionValueMap,
) -> Result<StartRequest, ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let tasks: Vec<String> = entries.into_iter().map(str::to_string).collect();
    if tasks.is_empty() {
        return Err(ValidationError::EmptyTaskList);
    }
    let resolved = resolve_options_for(schema, tasks.iter().map(String::as_str));
    let active: HashSet<String> = tasks
        .iter()
        .flat_map(|entry| active_option_names(schema, entry, values))
        .collect();
    let mut live = resolved.clone();
    live.retain(|name| active.contains(name));
    validate_values(&live, values)?;
    Ok(StartRequest {
        options: project_values(&resolved, values),
        tasks,
    })
}

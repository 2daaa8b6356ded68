//! Saved session preferences — checked tasks, their order and option values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::OptionValueMap;

/// Persisted user configuration, exchanged with the backend in camelCase.
///
/// Every field is optional: an absent field means "nothing saved".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_order: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_checked: Option<BTreeMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_options: Option<OptionValueMap>,
}

impl UserConfig {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_order.is_none() && self.task_checked.is_none() && self.task_options.is_none()
    }
}

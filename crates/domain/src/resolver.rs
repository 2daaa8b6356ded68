//! Option resolution — which options a task entry lets the user configure.
//!
//! Resolution is an over-approximation: every option reachable through *any*
//! case of an ancestor is returned, not only those behind the currently
//! selected case. Deciding which nested options are live is left to callers
//! (see [`active_option_names`]).

use std::collections::{BTreeMap, HashSet};

use crate::schema::{InterfaceSchema, OptionDef, OptionValueMap};

/// Options resolved for one or more task entries, keyed by option name.
///
/// Keys are unique; iteration follows discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptionMap {
    entries: Vec<(String, OptionDef)>,
}

impl ResolvedOptionMap {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionDef> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, option)| option)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionDef)> {
        self.entries
            .iter()
            .map(|(name, option)| (name.as_str(), option))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add every option of `other` not already present.
    pub fn merge(&mut self, other: Self) {
        for (name, option) in other.entries {
            if !self.contains(&name) {
                self.entries.push((name, option));
            }
        }
    }

    /// Keep only the options whose name satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|(name, _)| keep(name));
    }

    fn push(&mut self, name: String, option: OptionDef) {
        self.entries.push((name, option));
    }
}

impl IntoIterator for ResolvedOptionMap {
    type Item = (String, OptionDef);
    type IntoIter = std::vec::IntoIter<(String, OptionDef)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<ResolvedOptionMap> for BTreeMap<String, OptionDef> {
    fn from(map: ResolvedOptionMap) -> Self {
        map.entries.into_iter().collect()
    }
}

/// Collect every option reachable from the tasks whose `entry` matches.
///
/// Unknown option names are skipped. Terminates on cyclic case graphs: a
/// name is marked visited before its cases are followed and never
/// processed twice.
#[must_use]
pub fn resolve_options(schema: &InterfaceSchema, entry: &str) -> ResolvedOptionMap {
    let mut resolved = ResolvedOptionMap::default();
    let mut visited = HashSet::new();
    for task in schema.tasks.iter().filter(|task| task.entry == entry) {
        collect(schema, &task.option, &mut visited, &mut resolved);
    }
    resolved
}

/// Union of [`resolve_options`] over several entries, deduplicated by name.
#[must_use]
pub fn resolve_options_for<'a, I>(schema: &InterfaceSchema, entries: I) -> ResolvedOptionMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut union = ResolvedOptionMap::default();
    for entry in entries {
        union.merge(resolve_options(schema, entry));
    }
    union
}

fn collect(
    schema: &InterfaceSchema,
    names: &[String],
    visited: &mut HashSet<String>,
    resolved: &mut ResolvedOptionMap,
) {
    for name in names {
        if visited.contains(name) {
            continue;
        }
        let Some(option) = schema.options.get(name) else {
            continue;
        };
        visited.insert(name.clone());
        resolved.push(name.clone(), option.clone());
        for case in option.cases() {
            if !case.option.is_empty() {
                collect(schema, &case.option, visited, resolved);
            }
        }
    }
}

/// Names of the options that are live for `entry` given the current values.
///
/// Unlike [`resolve_options`], a `select`/`switch` only contributes the
/// nested options of its selected case. A missing value falls back to the
/// option's default case.
#[must_use]
pub fn active_option_names(
    schema: &InterfaceSchema,
    entry: &str,
    values: &OptionValueMap,
) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut active = Vec::new();
    let mut pending: Vec<&String> = schema
        .tasks
        .iter()
        .filter(|task| task.entry == entry)
        .flat_map(|task| task.option.iter())
        .rev()
        .collect();

    while let Some(name) = pending.pop() {
        if visited.contains(name.as_str()) {
            continue;
        }
        let Some(option) = schema.options.get(name) else {
            continue;
        };
        visited.insert(name.as_str());
        active.push(name.clone());

        let selected = values
            .get(name)
            .cloned()
            .or_else(|| crate::defaults::default_case(option));
        if let Some(case) = selected.and_then(|selected| option.case(&selected)) {
            pending.extend(case.option.iter().rev());
        }
    }
    active
}

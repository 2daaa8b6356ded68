//! Default assignment — the initial value of every option.

use crate::schema::{InputOption, InterfaceSchema, OptionDef, OptionValueMap};

/// Default selected case of a `select`/`switch` option.
///
/// `select` prefers `default_case`, then its first case; `switch` always
/// starts on its first case. `input` options have no case.
#[must_use]
pub fn default_case(option: &OptionDef) -> Option<String> {
    match option {
        OptionDef::Select(select) => select
            .default_case
            .clone()
            .or_else(|| select.cases.first().map(|case| case.name.clone())),
        OptionDef::Switch(switch) => Some(switch.cases[0].name.clone()),
        OptionDef::Input(_) => None,
    }
}

/// Seed entries contributed by the option named `name`.
///
/// A `select` without any case seeds an empty string.
#[must_use]
pub fn default_values(name: &str, option: &OptionDef) -> Vec<(String, String)> {
    match option {
        OptionDef::Select(_) | OptionDef::Switch(_) => {
            vec![(name.to_string(), default_case(option).unwrap_or_default())]
        }
        OptionDef::Input(input) => input
            .inputs
            .iter()
            .map(|case| {
                (
                    InputOption::value_key(name, &case.name),
                    case.default.clone().unwrap_or_default(),
                )
            })
            .collect(),
    }
}

/// Value-map keys owned by the option named `name`.
#[must_use]
pub fn value_keys(name: &str, option: &OptionDef) -> Vec<String> {
    match option {
        OptionDef::Select(_) | OptionDef::Switch(_) => vec![name.to_string()],
        OptionDef::Input(input) => input
            .inputs
            .iter()
            .map(|case| InputOption::value_key(name, &case.name))
            .collect(),
    }
}

/// Initial value map for every option of the schema.
#[must_use]
pub fn seed_values(schema: &InterfaceSchema) -> OptionValueMap {
    schema
        .options
        .iter()
        .flat_map(|(name, option)| default_values(name, option))
        .collect()
}

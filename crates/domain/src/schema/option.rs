//! Option definitions — the configurable knobs a task exposes.

use serde::{Deserialize, Serialize};

use super::PipelineOverride;

/// One configurable option, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionDef {
    /// Pick one case out of many.
    Select(SelectOption),
    /// Free-text values, one per [`InputCase`].
    Input(InputOption),
    /// Binary choice between exactly two cases.
    Switch(SwitchOption),
}

impl OptionDef {
    /// The cases of a `select`/`switch` option; `input` options have none.
    #[must_use]
    pub fn cases(&self) -> &[OptionCase] {
        match self {
            Self::Select(select) => &select.cases,
            Self::Switch(switch) => &switch.cases,
            Self::Input(_) => &[],
        }
    }

    /// Find a case by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&OptionCase> {
        self.cases().iter().find(|case| case.name == name)
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Input(_) => "input",
            Self::Switch(_) => "switch",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub cases: Vec<OptionCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_override: Option<PipelineOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_override: Option<PipelineOverride>,
}

impl InputOption {
    /// Value-map key for one input of the option named `option_name`.
    #[must_use]
    pub fn value_key(option_name: &str, input_name: &str) -> String {
        format!("{option_name}_{input_name}")
    }
}

/// The first case is the default; there is no `default_case`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cases: [OptionCase; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_override: Option<PipelineOverride>,
}

/// One branch of a `select`/`switch` option.
///
/// `option` lists further options activated when this case is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionCase {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_override: Option<PipelineOverride>,
}

impl OptionCase {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
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

/// How the backend interprets an input value.
///
/// Unknown type names load as [`PipelineType::Other`] and are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineType {
    #[serde(alias = "str")]
    String,
    Int,
    Float,
    Bool,
    #[serde(other)]
    Other,
}

/// One independently keyed and defaulted field of an `input` option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputCase {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_type: Option<PipelineType>,
    /// Regular expression the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_msg: Option<String>,
}

impl InputCase {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

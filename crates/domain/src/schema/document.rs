//! Wire documents for every accepted interface version.
//!
//! Version 2 documents carry `interface_version: 2` and typed options.
//! Legacy documents have no version marker and only select-like options.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::{
    Agent, Controller, ControllerKind, InputCase, InputOption, InterfaceSchema, OptionCase,
    OptionDef, PipelineOverride, Resource, SelectOption, SwitchOption, Task,
};
use crate::error::ValidationError;

const CURRENT_VERSION: u64 = 2;

/// An interface document in one of the accepted versions.
#[derive(Debug, Clone)]
pub enum InterfaceDocument {
    V1(LegacyDocument),
    V2(DocumentV2),
}

impl InterfaceDocument {
    /// Parse a JSON document, dispatching on `interface_version`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedSchema`] for unparsable input and
    /// [`ValidationError::UnsupportedSchemaVersion`] for unknown versions.
    pub fn from_json(text: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(text).map_err(malformed)?;
        Self::from_value(value)
    }

    /// Same as [`from_json`](Self::from_json) for an already decoded value.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json).
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let version = match value.get("interface_version") {
            None | Some(Value::Null) => 1,
            Some(raw) => raw.as_u64().ok_or_else(|| {
                ValidationError::MalformedSchema("interface_version must be an integer".into())
            })?,
        };
        match version {
            1 => serde_json::from_value(value).map(Self::V1).map_err(malformed),
            CURRENT_VERSION => serde_json::from_value(value).map(Self::V2).map_err(malformed),
            other => Err(ValidationError::UnsupportedSchemaVersion(other)),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        match self {
            Self::V1(_) => 1,
            Self::V2(_) => CURRENT_VERSION,
        }
    }

    /// Convert into the canonical schema.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SwitchCaseCount`] when a `switch` option
    /// does not have exactly two cases.
    pub fn normalize(self) -> Result<InterfaceSchema, ValidationError> {
        let mut schema = match self {
            Self::V1(doc) => doc.into_schema(),
            Self::V2(doc) => doc.into_schema()?,
        };
        if schema.label.is_none() && !schema.name.is_empty() {
            schema.label = Some(schema.name.clone());
        }
        if schema.title.is_none() {
            schema.title = schema
                .label
                .as_ref()
                .zip(schema.version.as_ref())
                .map(|(label, version)| format!("{label} {version}"));
        }
        Ok(schema)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn malformed(err: serde_json::Error) -> ValidationError {
    ValidationError::MalformedSchema(err.to_string())
}

// ---------------------------------------------------------------------------
// Version 2
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentV2 {
    #[serde(default)]
    name: String,
    label: Option<String>,
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    welcome: Option<String>,
    github: Option<String>,
    contact: Option<String>,
    license: Option<String>,
    #[serde(default)]
    controller: Vec<Controller>,
    #[serde(default)]
    resource: Vec<Resource>,
    agent: Option<Agent>,
    #[serde(default)]
    task: Vec<Task>,
    #[serde(default)]
    option: BTreeMap<String, OptionDocument>,
}

impl DocumentV2 {
    fn into_schema(self) -> Result<InterfaceSchema, ValidationError> {
        let options = self
            .option
            .into_iter()
            .map(|(name, raw)| raw.into_option(&name).map(|option| (name, option)))
            .collect::<Result<_, _>>()?;
        Ok(InterfaceSchema {
            name: self.name,
            label: self.label,
            title: self.title,
            version: self.version,
            description: self.description,
            welcome: self.welcome,
            github: self.github,
            contact: self.contact,
            license: self.license,
            tasks: self.task,
            options,
            controllers: self.controller,
            resources: self.resource,
            agent: self.agent,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OptionKind {
    #[default]
    Select,
    Input,
    Switch,
}

/// Option as written on the wire; `type` defaults to `select` and the case
/// arrays may be missing.
#[derive(Debug, Clone, Deserialize)]
struct OptionDocument {
    #[serde(rename = "type", default)]
    kind: OptionKind,
    label: Option<String>,
    description: Option<String>,
    #[serde(default)]
    cases: Vec<OptionCase>,
    #[serde(default)]
    inputs: Vec<InputCase>,
    default_case: Option<String>,
    pipeline_override: Option<PipelineOverride>,
}

impl OptionDocument {
    fn into_option(self, name: &str) -> Result<OptionDef, ValidationError> {
        Ok(match self.kind {
            OptionKind::Select => OptionDef::Select(SelectOption {
                label: self.label,
                description: self.description,
                cases: self.cases,
                default_case: self.default_case,
                pipeline_override: self.pipeline_override,
            }),
            OptionKind::Input => OptionDef::Input(InputOption {
                label: self.label,
                description: self.description,
                inputs: self.inputs,
                pipeline_override: self.pipeline_override,
            }),
            OptionKind::Switch => {
                let cases = <[OptionCase; 2]>::try_from(self.cases).map_err(|cases| {
                    ValidationError::SwitchCaseCount {
                        option: name.to_string(),
                        found: cases.len(),
                    }
                })?;
                OptionDef::Switch(SwitchOption {
                    label: self.label,
                    description: self.description,
                    cases,
                    pipeline_override: self.pipeline_override,
                })
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Legacy (version 1)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyDocument {
    #[serde(default)]
    name: String,
    url: Option<String>,
    version: Option<String>,
    #[serde(default)]
    controller: Vec<LegacyController>,
    #[serde(default)]
    resource: Vec<LegacyResource>,
    agent: Option<Agent>,
    #[serde(default)]
    task: Vec<LegacyTask>,
    #[serde(default)]
    option: BTreeMap<String, LegacyOption>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyController {
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyResource {
    name: String,
    #[serde(default)]
    path: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyTask {
    name: String,
    entry: String,
    #[serde(default)]
    option: Vec<String>,
    pipeline_override: Option<PipelineOverride>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyCase {
    name: String,
    pipeline_override: Option<PipelineOverride>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyOption {
    default_case: Option<String>,
    #[serde(default)]
    cases: Vec<LegacyCase>,
}

impl LegacyDocument {
    fn into_schema(self) -> InterfaceSchema {
        InterfaceSchema {
            name: self.name,
            version: self.version,
            github: self.url,
            tasks: self
                .task
                .into_iter()
                .map(|task| Task {
                    name: task.name,
                    entry: task.entry,
                    option: task.option,
                    pipeline_override: task.pipeline_override,
                    ..Task::default()
                })
                .collect(),
            options: self
                .option
                .into_iter()
                .map(|(name, option)| {
                    let cases = option
                        .cases
                        .into_iter()
                        .map(|case| OptionCase {
                            name: case.name,
                            pipeline_override: case.pipeline_override,
                            ..OptionCase::default()
                        })
                        .collect();
                    let select = SelectOption {
                        cases,
                        default_case: option.default_case,
                        ..SelectOption::default()
                    };
                    (name, OptionDef::Select(select))
                })
                .collect(),
            controllers: self
                .controller
                .into_iter()
                .map(|controller| Controller {
                    kind: ControllerKind::from_name(&controller.kind),
                    name: controller.name,
                    label: None,
                    description: None,
                    settings: BTreeMap::new(),
                })
                .collect(),
            resources: self
                .resource
                .into_iter()
                .map(|resource| Resource {
                    name: resource.name,
                    path: resource.path,
                    ..Resource::default()
                })
                .collect(),
            agent: self.agent,
            ..InterfaceSchema::default()
        }
    }
}

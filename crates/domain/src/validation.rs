//! Input value checks applied before a run is submitted.

use regex::Regex;

use crate::error::ValidationError;
use crate::resolver::ResolvedOptionMap;
use crate::schema::{InputCase, InputOption, OptionDef, OptionValueMap, PipelineType};

/// Check one input value against its type and `verify` pattern.
///
/// # Errors
///
/// An empty value is unset: its type is not checked, only `verify` applies.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidInput`] naming `key`; the message is the
/// case's `pattern_msg` when the pattern does not match and one is provided.
pub fn validate_input(key: &str, case: &InputCase, value: &str) -> Result<(), ValidationError> {
    let invalid = |message: String| ValidationError::InvalidInput {
        key: key.to_string(),
        message,
    };

    let trimmed = value.trim();
    if !trimmed.is_empty() {
        match case.pipeline_type {
            Some(PipelineType::Int) if trimmed.parse::<i64>().is_err() => {
                return Err(invalid(format!("`{value}` is not an integer")));
            }
            Some(PipelineType::Float) if trimmed.parse::<f64>().is_err() => {
                return Err(invalid(format!("`{value}` is not a number")));
            }
            Some(PipelineType::Bool) if !matches!(trimmed, "true" | "false") => {
                return Err(invalid(format!("`{value}` is not `true` or `false`")));
            }
            _ => {}
        }
    }

    if let Some(pattern) = &case.verify {
        let regex =
            Regex::new(pattern).map_err(|err| invalid(format!("invalid pattern: {err}")))?;
        if !regex.is_match(value) {
            return Err(invalid(case.pattern_msg.clone().unwrap_or_else(|| {
                format!("`{value}` does not match `{pattern}`")
            })));
        }
    }
    Ok(())
}

/// Check every `input` value owned by the resolved options.
///
/// Keys absent from `values` are not checked.
///
/// # Errors
///
/// Returns the first [`ValidationError::InvalidInput`] found.
pub fn validate_values(
    resolved: &ResolvedOptionMap,
    values: &OptionValueMap,
) -> Result<(), ValidationError> {
    for (name, option) in resolved.iter() {
        let OptionDef::Input(input) = option else {
            continue;
        };
        for case in &input.inputs {
            let key = InputOption::value_key(name, &case.name);
            if let Some(value) = values.get(&key) {
                validate_input(&key, case, value)?;
            }
        }
    }
    Ok(())
}

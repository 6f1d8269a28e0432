//! Parameter list merging for `+parameters`.
//!
//! A child connection extends its parent's parameters instead of replacing them by
//! listing additions under `+parameters`. Each overlay entry evicts any parent entry
//! in the same slot (same `airflow_param_name` and `is_in_extra`) and is appended to
//! the end, so an overridden parameter moves to the end of the list.

use std::fmt;
use thiserror::Error;
use tracing::trace;

use crate::core::Parameter;

/// Which list a malformed parameter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterList {
    /// The inherited (base) list
    Inherited,
    /// The `+parameters` (overlay) list
    Supplemental,
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inherited => write!(f, "inherited"),
            Self::Supplemental => write!(f, "+parameters"),
        }
    }
}

/// A parameter without `airflow_param_name` was found while computing slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{list} parameter at position {position} has no airflow_param_name")]
pub struct MalformedParameter {
    pub list: ParameterList,
    pub position: usize,
}

/// Merge `overlay` onto `base`.
///
/// Surviving base entries keep their relative order; overlay entries follow in
/// their own order with `example` normalized to a string. Callers must not rely on
/// an overridden parameter keeping its base position.
pub fn merge_parameters(
    base: &[Parameter],
    overlay: &[Parameter],
) -> Result<Vec<Parameter>, MalformedParameter> {
    if overlay.is_empty() {
        return Ok(base.to_vec());
    }

    if let Some(position) = base.iter().position(|p| p.slot().is_none()) {
        return Err(MalformedParameter {
            list: ParameterList::Inherited,
            position,
        });
    }

    let mut merged = base.to_vec();
    for (position, entry) in overlay.iter().enumerate() {
        let mut parameter = entry.clone();
        parameter.normalize_example();

        let slot = parameter.slot().ok_or(MalformedParameter {
            list: ParameterList::Supplemental,
            position,
        })?;

        let before = merged.len();
        merged.retain(|existing| existing.slot() != Some(slot));
        if merged.len() != before {
            trace!("Overriding parameter {} (in extra: {})", slot.name, slot.in_extra);
        } else {
            trace!("Adding parameter {} (in extra: {})", slot.name, slot.in_extra);
        }

        merged.push(parameter);
    }

    Ok(merged)
}

//! Chain validation logic.

use crate::schema::{ChainDef, Operand};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Structural checks: version, unique non-empty names, and every reference
/// resolving to an input or an earlier step. Numeric finiteness is checked
/// when the chain is evaluated.
pub fn validate_chain(chain: &ChainDef) -> Result<(), ValidationError> {
    if chain.version == 0 || chain.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: chain.version,
        });
    }

    let mut defined: HashSet<&str> = HashSet::new();
    for name in chain.inputs.keys() {
        check_name(name, "inputs")?;
        defined.insert(name);
    }

    for step in &chain.steps {
        check_name(&step.name, "steps")?;
        for operand in [&step.lhs, &step.rhs] {
            if let Operand::Name(name) = operand {
                if !defined.contains(name.as_str()) {
                    return Err(ValidationError::MissingReference {
                        name: name.clone(),
                        context: format!("step {}", step.name),
                    });
                }
            }
        }
        if !defined.insert(&step.name) {
            return Err(ValidationError::DuplicateName {
                name: step.name.clone(),
                context: "steps".to_string(),
            });
        }
    }

    if !defined.contains(chain.result.as_str()) {
        return Err(ValidationError::MissingReference {
            name: chain.result.clone(),
            context: "result".to_string(),
        });
    }

    Ok(())
}

fn check_name(name: &str, context: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} name"),
            value: format!("{name:?}"),
            reason: "name must not be empty".to_string(),
        });
    }
    Ok(())
}

//! Chain evaluation over error-tracked scalars.

use std::collections::HashMap;

use pb_core::{BoundedF64, Sign};
use serde::Serialize;
use tracing::{debug, warn};

use crate::ChainResult;
use crate::schema::{ChainDef, OpKind, Operand};
use crate::validate::{ValidationError, validate_chain};

/// Value and bound after one step.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepRecord {
    pub name: String,
    pub op: OpKind,
    pub value: f64,
    pub error_bound: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Evaluation {
    pub name: String,
    pub result: BoundedF64,
    pub certain_sign: Option<Sign>,
    pub steps: Vec<StepRecord>,
}

impl Evaluation {
    pub fn verdict(&self) -> &'static str {
        match self.certain_sign {
            Some(Sign::Positive) => "certain positive",
            Some(Sign::Negative) => "certain negative",
            Some(Sign::Zero) | None => "uncertain",
        }
    }
}

/// Evaluate `chain` in step order.
///
/// A literal right-hand operand uses the plain-number operation (`add_f64`,
/// ...); a named one uses the tracked operation (`add_bounded`, ...). A
/// literal left-hand operand is taken as exact.
pub fn evaluate(chain: &ChainDef) -> ChainResult<Evaluation> {
    validate_chain(chain)?;

    let mut table: HashMap<&str, BoundedF64> =
        HashMap::with_capacity(chain.inputs.len() + chain.steps.len());
    for (name, &v) in &chain.inputs {
        table.insert(name, BoundedF64::try_new(v)?);
    }

    let mut steps = Vec::with_capacity(chain.steps.len());
    for step in &chain.steps {
        let lhs = match &step.lhs {
            Operand::Literal(v) => BoundedF64::try_new(*v)?,
            Operand::Name(n) => lookup(&table, n, &step.name)?,
        };
        let out = match &step.rhs {
            Operand::Literal(v) => {
                let f = pb_core::ensure_finite(*v, "step literal")?;
                match step.op {
                    OpKind::Add => lhs.add_f64(f),
                    OpKind::Sub => lhs.sub_f64(f),
                    OpKind::Mul => lhs.mul_f64(f),
                }
            }
            Operand::Name(n) => {
                let rhs = lookup(&table, n, &step.name)?;
                match step.op {
                    OpKind::Add => lhs.add_bounded(rhs),
                    OpKind::Sub => lhs.sub_bounded(rhs),
                    OpKind::Mul => lhs.mul_bounded(rhs),
                }
            }
        };
        debug!(
            step = %step.name,
            op = %step.op,
            value = out.value(),
            bound = out.error_bound(),
            "evaluated step"
        );
        table.insert(&step.name, out);
        steps.push(StepRecord {
            name: step.name.clone(),
            op: step.op,
            value: out.value(),
            error_bound: out.error_bound(),
        });
    }

    let result = lookup(&table, &chain.result, "result")?;
    let certain_sign = result.certain_sign();
    if certain_sign.is_none() {
        warn!(
            chain = %chain.name,
            value = result.value(),
            bound = result.error_bound(),
            "result sign is not certain"
        );
    }

    Ok(Evaluation {
        name: chain.name.clone(),
        result,
        certain_sign,
        steps,
    })
}

fn lookup(
    table: &HashMap<&str, BoundedF64>,
    name: &str,
    context: &str,
) -> Result<BoundedF64, ValidationError> {
    table
        .get(name)
        .copied()
        .ok_or_else(|| ValidationError::MissingReference {
            name: name.to_string(),
            context: context.to_string(),
        })
}

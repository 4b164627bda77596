//! Chain file schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named sequence of tracked operations over a set of exact inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainDef {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, f64>,
    #[serde(default)]
    pub steps: Vec<StepDef>,
    pub result: String,
}

/// `name = lhs <op> rhs`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepDef {
    pub name: String,
    pub op: OpKind,
    pub lhs: Operand,
    pub rhs: Operand,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Sub,
    Mul,
}

/// A literal is taken as an exact plain number; a name refers to an input or
/// an earlier step and carries its tracked bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Operand {
    Literal(f64),
    Name(String),
}

impl Operand {
    pub fn name(&self) -> Option<&str> {
        match self {
            Operand::Name(n) => Some(n),
            Operand::Literal(_) => None,
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::Mul => "mul",
        };
        f.write_str(s)
    }
}

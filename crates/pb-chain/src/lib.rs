//! pb-chain: chain files of error-tracked operations.
//!
//! A chain file names a set of exact inputs and a sequence of add/sub/mul
//! steps over them. Loading validates the structure; evaluation replays the
//! steps through `pb-core` and reports the final value, its bound, and
//! whether its sign is certain.

pub mod eval;
pub mod schema;
pub mod validate;

pub use eval::{Evaluation, StepRecord, evaluate};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_chain};

use tracing::info;

pub type ChainResult<T> = Result<T, ChainError>;

#[derive(thiserror::Error, Debug)]
pub enum ChainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Numeric error: {0}")]
    Core(#[from] pb_core::PbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ChainResult<ChainDef> {
    let chain: ChainDef = serde_yaml::from_str(content)?;
    validate_chain(&chain)?;
    Ok(chain)
}

pub fn load_yaml(path: &std::path::Path) -> ChainResult<ChainDef> {
    let content = std::fs::read_to_string(path)?;
    let chain = from_yaml_str(&content)?;
    info!(
        path = %path.display(),
        name = %chain.name,
        steps = chain.steps.len(),
        "loaded chain"
    );
    Ok(chain)
}

pub fn save_yaml(path: &std::path::Path, chain: &ChainDef) -> ChainResult<()> {
    validate_chain(chain)?;
    let content = serde_yaml::to_string(chain)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn evaluation_to_json(eval: &Evaluation) -> ChainResult<String> {
    Ok(serde_json::to_string_pretty(eval)?)
}

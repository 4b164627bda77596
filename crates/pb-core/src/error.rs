use thiserror::Error;

pub type PbResult<T> = Result<T, PbError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PbError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Sign is not certain: |{value}| does not exceed error bound {bound}")]
    UncertainSign { value: f64, bound: f64 },

    #[error("Invalid error bound {bound} for value {value}")]
    InvalidBound { value: f64, bound: f64 },
}

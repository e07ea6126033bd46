use thiserror::Error;

pub type DhResult<T> = Result<T, DhError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DhError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative value for {what}: {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

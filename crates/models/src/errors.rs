use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl ModelError {
    pub fn required(field: &str) -> Self { Self::Validation(format!("{} is required", field)) }
}

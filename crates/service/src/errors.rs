use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid patch: {0}")]
    InvalidPatch(String),
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
    #[error("slot '{slot}' holds undecodable data: {reason}")]
    CorruptSlot { slot: String, reason: String },
    #[error("slot '{slot}' is already bound to {bound}")]
    SlotConflict { slot: String, bound: String },
    #[error("could not generate a unique id: {0}")]
    IdGeneration(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialize(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn corrupt(slot: &str, reason: impl ToString) -> Self {
        Self::CorruptSlot { slot: slot.to_string(), reason: reason.to_string() }
    }
}

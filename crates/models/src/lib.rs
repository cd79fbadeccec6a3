//! Entity definitions persisted by the service layer.
//! - `Record<T>` pairs a store-assigned identifier with an entity payload.
//! - `Entity` is implemented by every payload type that gets its own slot.

pub mod errors;
pub mod record;
pub mod member;
pub mod product;

pub use record::{Entity, Record};

#[cfg(test)]
mod tests;

//! Service layer providing a generic entity store and per-entity services on top of models.
//! - `EntityStore<T>` keeps one collection per named slot in an injected `SlotStorage`.
//! - Every operation goes through a simulated latency so callers treat it like a remote API.
//! - `MemberService` / `ProductService` bind the store to their slots and seed them.

pub mod errors;
pub mod storage;
pub mod latency;
pub mod ids;
pub mod entity_store;
pub mod entity_service;
pub mod members;
pub mod products;
pub mod runtime;

pub use entity_service::EntityService;
pub use entity_store::EntityStore;
pub use errors::ServiceError;
pub use latency::{Latency, OpKind};

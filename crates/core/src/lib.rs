//! `gala-core` — domain building blocks shared by the gala-ops crates.
//!
//! This crate contains **pure domain** primitives (no IO, no UI concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CatalogItemId, LineItemId, QuotationId};
pub use money::{BPS_SCALE, Money};
pub use value_object::ValueObject;

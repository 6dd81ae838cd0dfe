//! Catalog domain module.
//!
//! Catalog items, quality ranks, and the tiered pricing rule every view
//! prices through. Pure domain logic: no IO beyond the embedded sample data.

pub mod catalog;
pub mod config;
pub mod item;
pub mod pricing;
pub mod rank;
pub mod sample;
pub mod store;

pub use catalog::{
    AddItem, AdjustStock, Catalog, CatalogCommand, CatalogEvent, RemoveItem, UpdateItem,
};
pub use config::PricingConfig;
pub use item::CatalogItem;
pub use pricing::{PriceQuote, PriceTier, PricingInput, quote, resolve_unit_price};
pub use rank::{Rank, RankTable};
pub use store::{CatalogStore, InMemoryCatalogStore};

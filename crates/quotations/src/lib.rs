//! Quotations domain module.
//!
//! Quotations for event customers: lines priced from the catalog, per-line
//! discounts, VAT, and the draft → sent → approved/rejected lifecycle.

pub mod builder;
pub mod line;
pub mod quotation;

pub use builder::QuotationBuilder;
pub use line::{LineChanges, LineItem, PriceType};
pub use quotation::{
    CreateQuotation, Customer, Quotation, QuotationCommand, QuotationEvent, QuotationNumber,
    QuotationStatus, QuotationTotals,
};

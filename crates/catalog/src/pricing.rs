//! Tiered pricing: quantity + stock + rank → unit price.
//!
//! This is the single implementation every view prices through (catalog
//! cards, detail view, quotation builder). It is pure and total: whatever
//! the input, a price comes back.

use serde::{Deserialize, Serialize};

use gala_core::{Money, ValueObject};

use crate::rank::{Rank, RankTable};

/// The fields of a catalog item that pricing looks at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInput {
    pub retail_price: Money,
    pub wholesale_price: Money,
    pub current_stock: u32,
    pub wholesale_min_quantity: u32,
    pub rank: Rank,
}

/// Which branch of the pricing rule produced a price.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Quantity below the wholesale minimum, or not enough stock for wholesale.
    Retail,
    /// Wholesale price with the rank multiplier applied.
    Wholesale,
    /// Requested more than is in stock; always retail.
    RetailStockShortfall,
}

/// A resolved unit price plus the line total for the requested quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub quantity: u32,
    pub tier: PriceTier,
    pub unit_price: Money,
    pub line_total: Money,
}

impl ValueObject for PriceQuote {}

fn tier_for(input: &PricingInput, quantity: u32) -> PriceTier {
    if quantity > input.current_stock {
        // Retail even when the quantity also meets the wholesale minimum.
        PriceTier::RetailStockShortfall
    } else if quantity >= input.wholesale_min_quantity
        && input.current_stock >= input.wholesale_min_quantity
    {
        PriceTier::Wholesale
    } else {
        PriceTier::Retail
    }
}

/// Unit price to charge for `quantity` units.
pub fn resolve_unit_price(input: &PricingInput, quantity: u32, table: &RankTable) -> Money {
    match tier_for(input, quantity) {
        PriceTier::Wholesale => input
            .wholesale_price
            .scale_bps(table.multiplier_bps(input.rank)),
        PriceTier::Retail | PriceTier::RetailStockShortfall => input.retail_price,
    }
}

/// Same decision as [`resolve_unit_price`], reporting the tier and line total.
pub fn quote(input: &PricingInput, quantity: u32, table: &RankTable) -> PriceQuote {
    let unit_price = resolve_unit_price(input, quantity, table);
    PriceQuote {
        quantity,
        tier: tier_for(input, quantity),
        unit_price,
        line_total: unit_price.times(quantity),
    }
}

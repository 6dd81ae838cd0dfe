//! Prints the price sheet of the sample catalog.
//!
//! For every item: retail price, plain wholesale price, and the rank-adjusted
//! wholesale price at the wholesale minimum quantity.

use anyhow::Context;

use gala_catalog::{CatalogItem, PriceTier, PricingConfig, RankTable, quote, sample};

fn price_line(item: &CatalogItem, table: &RankTable) -> String {
    let at_minimum = quote(&item.pricing_input(), item.wholesale_min_quantity, table);
    let tiered = match at_minimum.tier {
        PriceTier::Wholesale => format!(
            "{} (rank {}, -{}%)",
            at_minimum.unit_price,
            item.rank,
            table.discount_percent(item.rank)
        ),
        PriceTier::Retail | PriceTier::RetailStockShortfall => format!(
            "unavailable: {} {} in stock, wholesale needs {}",
            item.current_stock, item.unit, item.wholesale_min_quantity
        ),
    };

    format!(
        "{name}\n  retail (1-{below}): {retail}/{unit}\n  \
         wholesale (>= {min}): {wholesale}/{unit}\n  \
         wholesale + rank: {tiered}",
        name = item.name,
        below = item.wholesale_min_quantity.saturating_sub(1),
        retail = item.retail_price,
        unit = item.unit,
        min = item.wholesale_min_quantity,
        wholesale = item.wholesale_price,
    )
}

fn main() -> anyhow::Result<()> {
    gala_observability::init();

    let config = PricingConfig::from_env();
    config.validate().context("invalid pricing configuration")?;

    let catalog = sample::catalog().context("failed to load sample catalog")?;
    tracing::info!(
        items = catalog.len(),
        rank_table_version = config.rank_table.version,
        "loaded sample catalog"
    );

    for item in catalog.items() {
        println!("{}", price_line(item, &config.rank_table));
    }

    Ok(())
}

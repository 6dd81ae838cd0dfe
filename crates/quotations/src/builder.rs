//! Glue between the catalog store and a quotation draft.

use gala_catalog::{CatalogStore, PricingConfig};
use gala_core::{Aggregate, CatalogItemId, DomainError, DomainResult, LineItemId};

use crate::line::{LineItem, PriceType};
use crate::quotation::{
    CreateQuotation, Quotation, QuotationCommand, QuotationEvent, QuotationTotals,
};

/// Builds quotation lines from whatever catalog store it is given.
pub struct QuotationBuilder<S> {
    store: S,
    config: PricingConfig,
}

impl<S: CatalogStore> QuotationBuilder<S> {
    pub fn new(store: S, config: PricingConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Start a draft whose tiered lines are re-priced with this builder's
    /// rank table.
    pub fn open(&self, mut cmd: CreateQuotation) -> DomainResult<Quotation> {
        cmd.rank_table = self.config.rank_table;
        let mut quotation = Quotation::empty(cmd.quotation_id);
        quotation.execute(&QuotationCommand::Create(cmd))?;
        Ok(quotation)
    }

    /// Look up `item_id` and price it into a new line.
    pub fn line_for(
        &self,
        item_id: CatalogItemId,
        quantity: u32,
        price_type: PriceType,
    ) -> DomainResult<LineItem> {
        let item = self.store.get(item_id).ok_or_else(DomainError::not_found)?;
        Ok(LineItem::from_catalog(
            LineItemId::new(),
            &item,
            quantity,
            price_type,
            &self.config.rank_table,
        ))
    }

    /// Add a catalog item to a draft quotation.
    pub fn add_item(
        &self,
        quotation: &mut Quotation,
        item_id: CatalogItemId,
        quantity: u32,
        price_type: PriceType,
    ) -> DomainResult<Vec<QuotationEvent>> {
        let line = self.line_for(item_id, quantity, price_type)?;
        quotation.execute(&QuotationCommand::AddLine(line))
    }

    pub fn totals(&self, quotation: &Quotation) -> QuotationTotals {
        quotation.totals(self.config.vat_rate_bps)
    }
}

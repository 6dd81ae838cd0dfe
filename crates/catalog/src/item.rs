use serde::{Deserialize, Serialize};

use gala_core::{CatalogItemId, DomainError, DomainResult, Entity, Money};

use crate::pricing::PricingInput;
use crate::rank::Rank;

/// A product or rentable piece of equipment offered for events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub name: String,
    pub category: String,
    pub retail_price: Money,
    pub wholesale_price: Money,
    pub unit: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supplier: String,
    pub current_stock: u32,
    pub min_quantity: u32,
    pub wholesale_min_quantity: u32,
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl Entity for CatalogItem {
    type Id = CatalogItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl CatalogItem {
    pub fn is_in_stock(&self) -> bool {
        self.current_stock > 0
    }

    /// Whether there is enough stock for the wholesale tier at all.
    pub fn wholesale_available(&self) -> bool {
        self.current_stock >= self.wholesale_min_quantity
    }

    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            retail_price: self.retail_price,
            wholesale_price: self.wholesale_price,
            current_stock: self.current_stock,
            wholesale_min_quantity: self.wholesale_min_quantity,
            rank: self.rank,
        }
    }

    /// Required fields and the min-quantity ordering.
    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if self.unit.trim().is_empty() {
            return Err(DomainError::validation("unit cannot be empty"));
        }
        if self.min_quantity > self.wholesale_min_quantity {
            return Err(DomainError::invariant(format!(
                "retail minimum ({}) exceeds wholesale minimum ({})",
                self.min_quantity, self.wholesale_min_quantity
            )));
        }
        Ok(())
    }

    /// Guard used before an item goes into a cart or a quotation.
    pub fn check_orderable(&self, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity < self.min_quantity {
            return Err(DomainError::validation(format!(
                "minimum order is {} {}",
                self.min_quantity, self.unit
            )));
        }
        if quantity > self.current_stock {
            return Err(DomainError::invariant(format!(
                "only {} {} left in stock",
                self.current_stock, self.unit
            )));
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use gala_catalog::{CatalogItem, PricingInput, RankTable, resolve_unit_price};
use gala_core::{CatalogItemId, DomainError, DomainResult, Entity, LineItemId, Money};

/// How the unit price of a line was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// The item's retail price, whatever the quantity.
    Retail,
    /// The item's plain wholesale price, without rank multiplier.
    Wholesale,
    /// The tiered pricing rule (stock, wholesale minimum, rank).
    Tiered,
}

/// A product line on a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub product_id: CatalogItemId,
    pub product_name: String,
    pub category: String,
    pub supplier: String,
    pub unit: String,
    pub quantity: u32,
    /// Prices, stock and rank of the item when it was added.
    pub pricing: PricingInput,
    pub price_type: PriceType,
    pub selected_price: Money,
    pub discount_percent: u8,
    pub notes: String,
}

impl Entity for LineItem {
    type Id = LineItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl LineItem {
    /// Snapshot a catalog item into a new line. Later catalog edits do not
    /// change lines already on a quotation.
    pub fn from_catalog(
        id: LineItemId,
        item: &CatalogItem,
        quantity: u32,
        price_type: PriceType,
        table: &RankTable,
    ) -> Self {
        let pricing = item.pricing_input();
        Self {
            id,
            product_id: item.id,
            product_name: item.name.clone(),
            category: item.category.clone(),
            supplier: item.supplier.clone(),
            unit: item.unit.clone(),
            quantity,
            pricing,
            price_type,
            selected_price: unit_price(&pricing, price_type, quantity, table),
            discount_percent: 0,
            notes: String::new(),
        }
    }

    pub fn retail_price(&self) -> Money {
        self.pricing.retail_price
    }

    pub fn wholesale_price(&self) -> Money {
        self.pricing.wholesale_price
    }

    /// `selected × quantity × (100 − discount) / 100`, rounded half-up.
    pub fn line_total(&self) -> Money {
        self.selected_price
            .times(self.quantity)
            .less_percent(self.discount_percent)
    }

    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.discount_percent > 100 {
            return Err(DomainError::validation(format!(
                "discount must be within 0..=100%, got {}%",
                self.discount_percent
            )));
        }
        Ok(())
    }
}

fn unit_price(
    pricing: &PricingInput,
    price_type: PriceType,
    quantity: u32,
    table: &RankTable,
) -> Money {
    match price_type {
        PriceType::Retail => pricing.retail_price,
        PriceType::Wholesale => pricing.wholesale_price,
        PriceType::Tiered => resolve_unit_price(pricing, quantity, table),
    }
}

/// Partial edit of a line; `None` leaves the field alone.
///
/// Changing the price type, or the quantity of a tiered line, re-prices the
/// line unless `selected_price` is given explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChanges {
    pub quantity: Option<u32>,
    pub price_type: Option<PriceType>,
    pub selected_price: Option<Money>,
    pub discount_percent: Option<u8>,
    pub notes: Option<String>,
}

impl LineChanges {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none()
            && self.price_type.is_none()
            && self.selected_price.is_none()
            && self.discount_percent.is_none()
            && self.notes.is_none()
    }

    pub(crate) fn applied_to(&self, line: &LineItem, table: &RankTable) -> LineItem {
        let mut updated = line.clone();
        if let Some(q) = self.quantity {
            updated.quantity = q;
        }
        if let Some(t) = self.price_type {
            updated.price_type = t;
        }
        if let Some(d) = self.discount_percent {
            updated.discount_percent = d;
        }
        if let Some(n) = &self.notes {
            updated.notes = n.clone();
        }

        let type_changed = updated.price_type != line.price_type;
        let tiered_quantity_changed =
            updated.price_type == PriceType::Tiered && updated.quantity != line.quantity;

        updated.selected_price = match self.selected_price {
            Some(p) => p,
            None if type_changed || tiered_quantity_changed => unit_price(
                &updated.pricing,
                updated.price_type,
                updated.quantity,
                table,
            ),
            None => line.selected_price,
        };
        updated
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use gala_catalog::Rank;

    pub(crate) fn stage_light() -> CatalogItem {
        CatalogItem {
            id: CatalogItemId::new(),
            name: "Đèn LED Sân Khấu 200W".to_string(),
            category: "lighting".to_string(),
            retail_price: Money::vnd(500_000),
            wholesale_price: Money::vnd(450_000),
            unit: "cái".to_string(),
            description: String::new(),
            supplier: "Công ty Ánh Sáng ABC".to_string(),
            current_stock: 25,
            min_quantity: 1,
            wholesale_min_quantity: 5,
            rank: Rank::A,
            specifications: None,
            warranty: None,
            origin: None,
        }
    }

    fn line(price_type: PriceType, quantity: u32) -> LineItem {
        LineItem::from_catalog(
            LineItemId::new(),
            &stage_light(),
            quantity,
            price_type,
            &RankTable::default(),
        )
    }

    #[test]
    fn selected_price_follows_price_type() {
        assert_eq!(line(PriceType::Retail, 10).selected_price, Money::vnd(500_000));
        assert_eq!(line(PriceType::Wholesale, 10).selected_price, Money::vnd(450_000));
        assert_eq!(line(PriceType::Tiered, 10).selected_price, Money::vnd(382_500));
        assert_eq!(line(PriceType::Tiered, 2).selected_price, Money::vnd(500_000));
    }

    #[test]
    fn line_total_applies_discount() {
        let mut l = line(PriceType::Retail, 3);
        assert_eq!(l.line_total(), Money::vnd(1_500_000));
        l.discount_percent = 10;
        assert_eq!(l.line_total(), Money::vnd(1_350_000));
        l.discount_percent = 100;
        assert_eq!(l.line_total(), Money::ZERO);
    }

    #[test]
    fn validate_rejects_zero_quantity_and_large_discount() {
        let mut l = line(PriceType::Retail, 0);
        assert!(matches!(l.validate(), Err(DomainError::Validation(_))));
        l.quantity = 1;
        l.discount_percent = 101;
        assert!(matches!(l.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn changes_only_touch_given_fields() {
        let l = line(PriceType::Retail, 3);
        let changes = LineChanges {
            discount_percent: Some(5),
            ..LineChanges::default()
        };
        let updated = changes.applied_to(&l, &RankTable::default());
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.discount_percent, 5);
        assert_eq!(updated.selected_price, Money::vnd(500_000));
        assert!(!changes.is_empty());
        assert!(LineChanges::default().is_empty());

        let type_only = LineChanges {
            price_type: Some(PriceType::Wholesale),
            ..LineChanges::default()
        };
        assert!(!type_only.is_empty());
    }

    #[test]
    fn tiered_line_reprices_when_quantity_changes() {
        let table = RankTable::default();
        let l = line(PriceType::Tiered, 2);
        assert_eq!(l.selected_price, Money::vnd(500_000));

        let grown = LineChanges {
            quantity: Some(10),
            ..LineChanges::default()
        }
        .applied_to(&l, &table);
        assert_eq!(grown.selected_price, resolve_unit_price(&l.pricing, 10, &table));
        assert_eq!(grown.selected_price, Money::vnd(382_500));

        let beyond_stock = LineChanges {
            quantity: Some(30),
            ..LineChanges::default()
        }
        .applied_to(&grown, &table);
        assert_eq!(beyond_stock.selected_price, Money::vnd(500_000));
    }

    #[test]
    fn fixed_price_types_keep_price_when_quantity_changes() {
        let l = line(PriceType::Wholesale, 2);
        let updated = LineChanges {
            quantity: Some(10),
            ..LineChanges::default()
        }
        .applied_to(&l, &RankTable::default());
        assert_eq!(updated.selected_price, Money::vnd(450_000));
    }

    #[test]
    fn switching_price_type_picks_matching_price() {
        let table = RankTable::default();
        let l = line(PriceType::Retail, 10);

        let wholesale = LineChanges {
            price_type: Some(PriceType::Wholesale),
            ..LineChanges::default()
        }
        .applied_to(&l, &table);
        assert_eq!(wholesale.price_type, PriceType::Wholesale);
        assert_eq!(wholesale.selected_price, l.wholesale_price());

        let tiered = LineChanges {
            price_type: Some(PriceType::Tiered),
            ..LineChanges::default()
        }
        .applied_to(&wholesale, &table);
        assert_eq!(tiered.selected_price, Money::vnd(382_500));

        let back_to_retail = LineChanges {
            price_type: Some(PriceType::Retail),
            ..LineChanges::default()
        }
        .applied_to(&tiered, &table);
        assert_eq!(back_to_retail.selected_price, l.retail_price());
    }

    #[test]
    fn explicit_price_wins_over_repricing() {
        let l = line(PriceType::Tiered, 2);
        let updated = LineChanges {
            quantity: Some(10),
            price_type: Some(PriceType::Wholesale),
            selected_price: Some(Money::vnd(400_000)),
            ..LineChanges::default()
        }
        .applied_to(&l, &RankTable::default());
        assert_eq!(updated.selected_price, Money::vnd(400_000));
        assert_eq!(updated.price_type, PriceType::Wholesale);
    }
}

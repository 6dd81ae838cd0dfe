//! Catalog state container (reducer style).
//!
//! UI callbacks become [`CatalogCommand`]s; `handle` decides, `apply` evolves.
//! Items keep insertion order, matching how the list views render them.

use serde::{Deserialize, Serialize};

use gala_core::{Aggregate, AggregateRoot, CatalogItemId, DomainError, DomainResult};

use crate::item::CatalogItem;
use crate::pricing::{self, PriceQuote};
use crate::rank::RankTable;

/// Command: add a new item (the caller picks the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item: CatalogItem,
}

/// Command: replace an existing item wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub item: CatalogItem,
}

/// Command: delete an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub item_id: CatalogItemId,
}

/// Command: set the current stock of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub item_id: CatalogItemId,
    pub current_stock: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogCommand {
    AddItem(AddItem),
    UpdateItem(UpdateItem),
    RemoveItem(RemoveItem),
    AdjustStock(AdjustStock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ItemAdded(CatalogItem),
    ItemUpdated(CatalogItem),
    ItemRemoved {
        item_id: CatalogItemId,
    },
    StockAdjusted {
        item_id: CatalogItemId,
        current_stock: u32,
    },
}

impl CatalogEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ItemAdded(_) => "catalog.item.added",
            CatalogEvent::ItemUpdated(_) => "catalog.item.updated",
            CatalogEvent::ItemRemoved { .. } => "catalog.item.removed",
            CatalogEvent::StockAdjusted { .. } => "catalog.item.stock_adjusted",
        }
    }
}

/// The catalog a screen works on. There is exactly one per store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    version: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from seed data, running every item through `AddItem`.
    pub fn seeded(items: impl IntoIterator<Item = CatalogItem>) -> DomainResult<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.execute(&CatalogCommand::AddItem(AddItem { item }))?;
        }
        Ok(catalog)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_id: CatalogItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Case-insensitive substring match on name or description. An empty
    /// term matches everything.
    pub fn search(&self, term: &str) -> Vec<&CatalogItem> {
        self.filter(term, None)
    }

    pub fn in_category(&self, category: &str) -> Vec<&CatalogItem> {
        self.filter("", Some(category))
    }

    /// Category filter (when given) combined with the text search.
    pub fn filter(&self, term: &str, category: Option<&str>) -> Vec<&CatalogItem> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|i| category.is_none_or(|c| i.category.eq_ignore_ascii_case(c)))
            .filter(|i| {
                needle.is_empty()
                    || i.name.to_lowercase().contains(&needle)
                    || i.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Price `quantity` units of an item. Only the lookup can fail.
    pub fn quote(
        &self,
        item_id: CatalogItemId,
        quantity: u32,
        table: &RankTable,
    ) -> DomainResult<PriceQuote> {
        let item = self.get(item_id).ok_or_else(DomainError::not_found)?;
        Ok(pricing::quote(&item.pricing_input(), quantity, table))
    }

    pub fn check_orderable(&self, item_id: CatalogItemId, quantity: u32) -> DomainResult<()> {
        self.get(item_id)
            .ok_or_else(DomainError::not_found)?
            .check_orderable(quantity)
    }

    fn ensure_exists(&self, item_id: CatalogItemId) -> DomainResult<()> {
        if self.get(item_id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn warn_on_inverted_prices(item: &CatalogItem) {
        if item.wholesale_price > item.retail_price {
            tracing::warn!(
                item_id = %item.id,
                retail = item.retail_price.amount(),
                wholesale = item.wholesale_price.amount(),
                "wholesale price exceeds retail price"
            );
        }
    }

    fn handle_add(&self, cmd: &AddItem) -> DomainResult<Vec<CatalogEvent>> {
        if self.get(cmd.item.id).is_some() {
            return Err(DomainError::conflict(format!("item {} already exists", cmd.item.id)));
        }
        cmd.item.validate()?;
        Self::warn_on_inverted_prices(&cmd.item);
        Ok(vec![CatalogEvent::ItemAdded(cmd.item.clone())])
    }

    fn handle_update(&self, cmd: &UpdateItem) -> DomainResult<Vec<CatalogEvent>> {
        self.ensure_exists(cmd.item.id)?;
        cmd.item.validate()?;
        Self::warn_on_inverted_prices(&cmd.item);
        Ok(vec![CatalogEvent::ItemUpdated(cmd.item.clone())])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> DomainResult<Vec<CatalogEvent>> {
        self.ensure_exists(cmd.item_id)?;
        Ok(vec![CatalogEvent::ItemRemoved {
            item_id: cmd.item_id,
        }])
    }

    fn handle_adjust_stock(&self, cmd: &AdjustStock) -> DomainResult<Vec<CatalogEvent>> {
        self.ensure_exists(cmd.item_id)?;
        Ok(vec![CatalogEvent::StockAdjusted {
            item_id: cmd.item_id,
            current_stock: cmd.current_stock,
        }])
    }
}

impl AggregateRoot for Catalog {
    type Id = ();

    fn id(&self) -> &Self::Id {
        &()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ItemAdded(item) => self.items.push(item.clone()),
            CatalogEvent::ItemUpdated(item) => {
                if let Some(slot) = self.items.iter_mut().find(|i| i.id == item.id) {
                    *slot = item.clone();
                }
            }
            CatalogEvent::ItemRemoved { item_id } => self.items.retain(|i| i.id != *item_id),
            CatalogEvent::StockAdjusted {
                item_id,
                current_stock,
            } => {
                if let Some(item) = self.items.iter_mut().find(|i| i.id == *item_id) {
                    item.current_stock = *current_stock;
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::AddItem(cmd) => self.handle_add(cmd),
            CatalogCommand::UpdateItem(cmd) => self.handle_update(cmd),
            CatalogCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            CatalogCommand::AdjustStock(cmd) => self.handle_adjust_stock(cmd),
        }
    }
}

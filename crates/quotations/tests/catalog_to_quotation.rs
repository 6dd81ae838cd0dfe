//! End-to-end: sample catalog → store → quotation builder → totals.

use std::sync::Arc;

use chrono::NaiveDate;

use gala_catalog::{
    AdjustStock, CatalogCommand, CatalogStore, InMemoryCatalogStore, PricingConfig, RankTable,
    sample,
};
use gala_core::{Aggregate, CatalogItemId, DomainError, ExpectedVersion, Money, QuotationId};
use gala_quotations::{
    CreateQuotation, Customer, LineChanges, PriceType, Quotation, QuotationBuilder,
    QuotationCommand, QuotationNumber, QuotationStatus,
};

fn stage_light_id() -> CatalogItemId {
    "0190a1c2-0000-7000-8000-000000000001".parse().unwrap()
}

fn create_cmd() -> CreateQuotation {
    CreateQuotation {
        quotation_id: QuotationId::new(),
        number: QuotationNumber::new(2024, 2),
        customer: Customer {
            name: "Khách sạn XYZ".to_string(),
            email: "events@xyz.com".to_string(),
            phone: "0987654321".to_string(),
            address: "456 Đường XYZ, Quận 3, TP.HCM".to_string(),
        },
        created_on: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        valid_until: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
        notes: String::new(),
        rank_table: RankTable::default(),
    }
}

fn draft_quotation() -> Quotation {
    let cmd = create_cmd();
    let mut quotation = Quotation::empty(cmd.quotation_id);
    quotation.execute(&QuotationCommand::Create(cmd)).unwrap();
    quotation
}

fn sample_store() -> Arc<InMemoryCatalogStore> {
    Arc::new(InMemoryCatalogStore::with_catalog(sample::catalog().unwrap()))
}

#[test]
fn tiered_line_uses_rank_discount() {
    let store = sample_store();
    let builder = QuotationBuilder::new(store.clone(), PricingConfig::default());
    let mut quotation = draft_quotation();

    builder
        .add_item(&mut quotation, stage_light_id(), 5, PriceType::Tiered)
        .unwrap();

    let line = &quotation.items()[0];
    assert_eq!(line.selected_price, Money::vnd(382_500));
    assert_eq!(line.line_total(), Money::vnd(1_912_500));

    let totals = builder.totals(&quotation);
    assert_eq!(totals.tax, Money::vnd(191_250));
    assert_eq!(totals.total, Money::vnd(2_103_750));
    assert_eq!(totals.total.to_string(), "2.103.750\u{a0}₫");
}

#[test]
fn stock_change_in_store_changes_new_quotes_only() {
    let store = sample_store();
    let builder = QuotationBuilder::new(store.clone(), PricingConfig::default());
    let mut quotation = draft_quotation();

    builder
        .add_item(&mut quotation, stage_light_id(), 5, PriceType::Tiered)
        .unwrap();

    store
        .dispatch(
            CatalogCommand::AdjustStock(AdjustStock {
                item_id: stage_light_id(),
                current_stock: 4,
            }),
            ExpectedVersion::Exact(store.version()),
        )
        .unwrap();

    builder
        .add_item(&mut quotation, stage_light_id(), 5, PriceType::Tiered)
        .unwrap();

    assert_eq!(quotation.items()[0].selected_price, Money::vnd(382_500));
    assert_eq!(quotation.items()[1].selected_price, Money::vnd(500_000));
}

#[test]
fn custom_rank_table_from_config() {
    let config = PricingConfig::from_json(
        r#"{
            "rank_table": {
                "version": 2, "a_bps": 8000, "b_bps": 9000, "c_bps": 9500, "d_bps": 10000
            },
            "vat_rate_bps": 800
        }"#,
    )
    .unwrap();
    let builder = QuotationBuilder::new(sample_store(), config);
    let line = builder.line_for(stage_light_id(), 5, PriceType::Tiered).unwrap();
    assert_eq!(line.selected_price, Money::vnd(360_000));
    assert_eq!(builder.config().vat_rate_bps, 800);

    let mut quotation = builder.open(create_cmd()).unwrap();
    assert_eq!(quotation.rank_table().a_bps, 8_000);
    builder
        .add_item(&mut quotation, stage_light_id(), 2, PriceType::Tiered)
        .unwrap();
    let line_id = quotation.items()[0].id;
    quotation
        .execute(&QuotationCommand::UpdateLine {
            line_id,
            changes: LineChanges {
                quantity: Some(5),
                ..LineChanges::default()
            },
        })
        .unwrap();
    assert_eq!(quotation.items()[0].selected_price, Money::vnd(360_000));
}

#[test]
fn raising_tiered_quantity_reaches_wholesale_tier() {
    let builder = QuotationBuilder::new(sample_store(), PricingConfig::default());
    let mut quotation = draft_quotation();
    builder
        .add_item(&mut quotation, stage_light_id(), 2, PriceType::Tiered)
        .unwrap();
    let line_id = quotation.items()[0].id;
    assert_eq!(quotation.items()[0].selected_price, Money::vnd(500_000));

    quotation
        .execute(&QuotationCommand::UpdateLine {
            line_id,
            changes: LineChanges {
                quantity: Some(5),
                ..LineChanges::default()
            },
        })
        .unwrap();

    assert_eq!(quotation.items()[0].selected_price, Money::vnd(382_500));
    assert_eq!(quotation.subtotal(), Money::vnd(1_912_500));
}

#[test]
fn unknown_item_is_not_found() {
    let builder = QuotationBuilder::new(sample_store(), PricingConfig::default());
    let mut quotation = draft_quotation();
    let err = builder
        .add_item(&mut quotation, CatalogItemId::new(), 1, PriceType::Retail)
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);
    assert!(quotation.items().is_empty());
}

#[test]
fn full_lifecycle() {
    let builder = QuotationBuilder::new(sample_store(), PricingConfig::default());
    let mut quotation = draft_quotation();
    builder
        .add_item(&mut quotation, stage_light_id(), 2, PriceType::Wholesale)
        .unwrap();
    quotation.execute(&QuotationCommand::Send).unwrap();
    quotation.execute(&QuotationCommand::Approve).unwrap();

    assert_eq!(quotation.status(), QuotationStatus::Approved);
    assert_eq!(quotation.subtotal(), Money::vnd(900_000));
}

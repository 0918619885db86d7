//! Browsing, pricing and the outbound quote request end to end.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use confeitaria_core::{CurrencyCode, DeliveryDateError, Price};
use confeitaria_integration_tests::TestContext;
use confeitaria_storefront::catalog::{Catalog, Category, CategoryFilter, Product};
use confeitaria_storefront::order;
use confeitaria_storefront::quote::Quote;

fn brl(cents: i64) -> Price {
    Price::from_cents(cents, CurrencyCode::BRL)
}

fn small_catalog() -> Catalog {
    Catalog::new(
        vec![Category::new("brigadeiros", "Brigadeiros & Trufas")],
        vec![
            Product::new("1", "Brigadeiro", brl(320), "brigadeiros"),
            Product::new("2", "Beijinho", brl(350), "brigadeiros"),
        ],
    )
    .unwrap()
}

#[test]
fn test_selected_items_and_total() {
    let ctx = TestContext::with_catalog(small_catalog(), Duration::ZERO).unwrap();
    let mut session = ctx.session();
    session.set_quantity("1", 2);

    let items = session.order().selected_items(ctx.state.catalog());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product.name, "Brigadeiro");
    assert_eq!(items[0].quantity.get(), 2);
    assert_eq!(order::total(&items, CurrencyCode::BRL), brl(640));
    assert_eq!(order::total(&items, CurrencyCode::BRL).display(), "R$ 6,40");
}

#[test]
fn test_quantity_is_clamped() {
    let ctx = TestContext::new().unwrap();
    let mut session = ctx.session();
    assert_eq!(session.set_quantity("1", 1500).get(), 999);
    assert_eq!(session.set_quantity("1", -5).get(), 0);
    assert!(session.order().is_empty());
}

#[test]
fn test_search_finds_beijinho() {
    let ctx = TestContext::new().unwrap();
    let catalog = ctx.state.catalog();
    let found = catalog.filter("beiji", &CategoryFilter::All);
    let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Beijinho"]);
}

#[test]
fn test_category_filter_and_search_combine() {
    let ctx = TestContext::new().unwrap();
    let catalog = ctx.state.catalog();
    let tortas = CategoryFilter::parse("tortas");
    let found = catalog.filter("limão", &tortas);
    assert!(!found.is_empty());
    assert!(found.iter().all(|p| p.category.as_str() == "tortas"));
    assert!(found.iter().all(|p| p.name.to_lowercase().contains("limão")));
}

#[test]
fn test_past_date_is_rejected() {
    let ctx = TestContext::new().unwrap();
    let mut session = ctx.session();
    session.set_delivery_date("2026-12-25").unwrap();

    let err = session.set_delivery_date("2026-10-18").unwrap_err();
    assert!(matches!(err, DeliveryDateError::InPast { .. }));
    assert_eq!(session.order().delivery_date().unwrap().to_iso(), "2026-12-25");

    session.set_delivery_date("2026-10-19").unwrap();
}

#[test]
fn test_full_quote_message() {
    let ctx = TestContext::with_catalog(small_catalog(), Duration::ZERO).unwrap();
    let mut session = ctx.session();
    session.set_quantity("2", 3);
    session.set_quantity("1", 2);
    session.set_delivery_date("2026-12-25").unwrap();

    let quote = Quote::new(session.order(), ctx.state.catalog());
    assert_eq!(
        quote.message().unwrap().unwrap(),
        "Olá! Gostaria de solicitar um orçamento para os seguintes doces:\n\n\
         • Brigadeiro - Qtd: 2 - R$ 6,40\n\
         • Beijinho - Qtd: 3 - R$ 10,50\n\n\
         Total: R$ 16,90 para o dia 25/12/2026.\n\n\
         Obrigado(a)!"
    );

    let link = quote.whatsapp_link(None).unwrap().unwrap();
    let text = link
        .query_pairs()
        .find(|(k, _)| k == "text")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert_eq!(text, quote.message().unwrap().unwrap());
}

#[test]
fn test_empty_order_has_no_quote() {
    let ctx = TestContext::new().unwrap();
    let session = ctx.session();
    let quote = Quote::new(session.order(), ctx.state.catalog());
    assert!(quote.is_empty());
    assert_eq!(quote.message().unwrap(), None);
}

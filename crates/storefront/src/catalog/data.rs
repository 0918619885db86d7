//! Built-in confectionery catalog.

use confeitaria_core::{CurrencyCode, Price};

use super::{Catalog, CatalogError, Category, Product};

fn brl(cents: i64) -> Price {
    Price::from_cents(cents, CurrencyCode::BRL)
}

/// The shop's fixed product list, in display order.
///
/// # Errors
///
/// Fails only if the static data itself is inconsistent.
pub fn builtin() -> Result<Catalog, CatalogError> {
    let categories = vec![
        Category::new("brigadeiros", "Brigadeiros & Trufas"),
        Category::new("tradicionais", "Doces Tradicionais"),
        Category::new("bolos", "Bolos & Cupcakes"),
        Category::new("tortas", "Tortas & Sobremesas"),
    ];

    let products = vec![
        Product::new("1", "Brigadeiro", brl(350), "brigadeiros"),
        Product::new("2", "Beijinho", brl(350), "brigadeiros"),
        Product::new("3", "Casadinho", brl(400), "brigadeiros"),
        Product::new("4", "Trufa de Chocolate", brl(500), "brigadeiros"),
        Product::new("5", "Trufa de Morango", brl(550), "brigadeiros"),
        Product::new("6", "Trufa de Maracujá", brl(550), "brigadeiros"),
        Product::new("7", "Brigadeiro Gourmet", brl(450), "brigadeiros"),
        Product::new("8", "Olho de Sogra", brl(450), "tradicionais"),
        Product::new("9", "Bem Casado", brl(600), "tradicionais"),
        Product::new("10", "Cajuzinho", brl(380), "tradicionais"),
        Product::new("11", "Quindim", brl(700), "tradicionais"),
        Product::new("12", "Cocada", brl(420), "tradicionais"),
        Product::new("13", "Doce de Leite", brl(480), "tradicionais"),
        Product::new("14", "Paçoca", brl(320), "tradicionais"),
        Product::new("15", "Pé de Moleque", brl(380), "tradicionais"),
        Product::new("16", "Brownie", brl(850), "bolos"),
        Product::new("17", "Cupcake de Chocolate", brl(900), "bolos"),
        Product::new("18", "Cupcake de Baunilha", brl(850), "bolos"),
        Product::new("19", "Cupcake Red Velvet", brl(1000), "bolos"),
        Product::new("20", "Mini Bolo de Cenoura", brl(750), "bolos"),
        Product::new("21", "Mini Bolo de Chocolate", brl(800), "bolos"),
        Product::new("22", "Torta de Limão", brl(1200), "tortas"),
        Product::new("23", "Torta de Chocolate", brl(1400), "tortas"),
        Product::new("24", "Mousse de Maracujá", brl(850), "tortas"),
        Product::new("25", "Pudim", brl(900), "tortas"),
        Product::new("26", "Tiramisu", brl(1500), "tortas"),
        Product::new("27", "Pavê de Chocolate", brl(1150), "tortas"),
    ];

    Catalog::new(categories, products)
}

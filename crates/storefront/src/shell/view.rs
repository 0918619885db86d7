//! Plain-text rendering of the catalog page and the order summary.

use crate::catalog::{self, Catalog, CategoryFilter, Product};
use crate::order::Order;
use crate::quote::Quote;

pub const TITLE: &str = "Lorena Felicio Confeitaria";
pub const SUBTITLE: &str = "Doces & Sobremesas Artesanais";

/// Page header.
#[must_use]
pub fn header() -> String {
    [
        TITLE,
        SUBTITLE,
        "",
        "Selecione a quantidade desejada de cada doce para gerar seu orçamento",
    ]
    .join("\n")
}

/// The product list under the current search and category.
#[must_use]
pub fn catalog_page(catalog: &Catalog, order: &Order, search: &str, filter: &CategoryFilter) -> String {
    let filtered = catalog.filter(search, filter);
    let mut lines = vec![catalog::count_caption(filtered.len(), catalog.len())];

    if filtered.is_empty() {
        lines.push(String::new());
        lines.push("Nenhum doce encontrado".to_owned());
        lines.push("Tente ajustar sua busca ou filtros".to_owned());
    } else if catalog::show_grouped(search, filter) {
        for group in catalog.group(&filtered) {
            lines.push(String::new());
            lines.push(format!(
                "== {} ({} itens) ==",
                group.category.label,
                group.products.len()
            ));
            lines.extend(group.products.iter().map(|p| product_line(p, order)));
        }
    } else {
        lines.push(String::new());
        lines.extend(filtered.iter().map(|p| product_line(p, order)));
    }

    lines.join("\n")
}

fn product_line(product: &Product, order: &Order) -> String {
    let quantity = order.quantity(product.id.as_str());
    let selected = if quantity.is_zero() {
        String::new()
    } else {
        format!("  x{quantity}")
    };
    format!(
        "  [{:>2}] {:<24} {}{selected}",
        product.id,
        product.name,
        product.price.display()
    )
}

/// The order summary panel.
#[must_use]
pub fn summary(quote: &Quote<'_>) -> String {
    if quote.is_empty() {
        return "Selecione alguns doces para gerar seu orçamento".to_owned();
    }

    let mut lines = vec![format!("Resumo do Pedido ({})", quote.item_count_caption())];
    for item in quote.items() {
        lines.push(format!(
            "  {:<24} Qtd: {:>3} • {}  {}",
            item.product.name,
            item.quantity,
            item.product.price.display(),
            item.subtotal().display()
        ));
    }
    lines.push(format!("Total: {}", quote.total().display()));
    if let Some(date) = quote.delivery_date() {
        lines.push(format!("Data do evento/entrega: {}", date.to_pt_br()));
    }
    lines.join("\n")
}

/// One-line running total shown after edits; empty when nothing is selected.
#[must_use]
pub fn status_bar(quote: &Quote<'_>) -> String {
    if quote.is_empty() {
        return String::new();
    }
    format!(
        "Itens: {} | Total: {}",
        quote.total_quantity(),
        quote.total().display()
    )
}

/// Category keys the user can filter by.
#[must_use]
pub fn categories(catalog: &Catalog) -> String {
    let keys: Vec<_> = catalog
        .categories()
        .iter()
        .map(|c| format!("{} ({})", c.key, c.label))
        .collect();
    format!("Categorias: all, {}", keys.join(", "))
}

#[must_use]
pub fn help(catalog: &Catalog, development: bool) -> String {
    let mut lines = vec![
        "Comandos:".to_owned(),
        "  list                      mostrar os doces".to_owned(),
        "  search <texto>            buscar pelo nome (vazio limpa a busca)".to_owned(),
        "  category <chave|all>      filtrar por categoria".to_owned(),
        "  set <id> <qtd>            definir a quantidade (0 a 999)".to_owned(),
        "  add <id> / remove <id>    mais um / menos um".to_owned(),
        "  date <AAAA-MM-DD|none>    data do evento/entrega".to_owned(),
        "  summary                   resumo do pedido".to_owned(),
        "  message                   mensagem para copiar".to_owned(),
        "  whatsapp                  link para enviar pelo WhatsApp".to_owned(),
        "  clear                     limpar o pedido".to_owned(),
        "  quit                      sair".to_owned(),
    ];
    if development {
        lines.push("  debug                     estado interno".to_owned());
    }
    lines.push(String::new());
    lines.push(categories(catalog));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use confeitaria_core::{CurrencyCode, Price};

    use super::*;
    use crate::catalog::Category;

    fn brl(cents: i64) -> Price {
        Price::from_cents(cents, CurrencyCode::BRL)
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Category::new("brigadeiros", "Brigadeiros & Trufas"),
                Category::new("bolos", "Bolos & Cupcakes"),
            ],
            vec![
                Product::new("1", "Brigadeiro", brl(320), "brigadeiros"),
                Product::new("2", "Brownie", brl(850), "bolos"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_catalog_grouped_when_unfiltered() {
        let catalog = catalog();
        let page = catalog_page(&catalog, &Order::new(), "", &CategoryFilter::All);
        assert!(page.starts_with("2 doces"));
        assert!(page.contains("== Brigadeiros & Trufas (1 itens) =="));
        assert!(page.contains("== Bolos & Cupcakes (1 itens) =="));
    }

    #[test]
    fn test_catalog_flat_when_searching() {
        let catalog = catalog();
        let page = catalog_page(&catalog, &Order::new(), "brow", &CategoryFilter::All);
        assert!(page.starts_with("1 de 2 doces"));
        assert!(!page.contains("=="));
        assert!(page.contains("Brownie"));
        assert!(!page.contains("Brigadeiro"));
    }

    #[test]
    fn test_catalog_no_results() {
        let catalog = catalog();
        let page = catalog_page(&catalog, &Order::new(), "pizza", &CategoryFilter::All);
        assert!(page.contains("Nenhum doce encontrado"));
    }

    #[test]
    fn test_catalog_marks_selected_quantity() {
        let catalog = catalog();
        let mut order = Order::new();
        order.set_quantity("2", 7);
        let page = catalog_page(&catalog, &order, "", &CategoryFilter::All);
        let line = page.lines().find(|l| l.contains("Brownie")).unwrap();
        assert!(line.ends_with("x7"));
    }

    #[test]
    fn test_summary_and_status_bar() {
        let catalog = catalog();
        let mut order = Order::new();
        assert_eq!(status_bar(&Quote::new(&order, &catalog)), "");
        assert!(summary(&Quote::new(&order, &catalog)).starts_with("Selecione"));

        order.set_quantity("1", 2);
        let quote = Quote::new(&order, &catalog);
        let text = summary(&quote);
        assert!(text.starts_with("Resumo do Pedido (1 item)"));
        assert!(text.contains("Total: R$ 6,40"));
        assert_eq!(status_bar(&quote), "Itens: 2 | Total: R$ 6,40");
    }

    #[test]
    fn test_help_hides_debug_in_production() {
        let catalog = catalog();
        assert!(!help(&catalog, false).contains("debug"));
        assert!(help(&catalog, true).contains("debug"));
    }
}

//! Static product catalog and the views derived from it.
//!
//! The catalog is immutable application data: products and categories are
//! defined once and never created or destroyed at runtime. Filtering and
//! grouping always preserve catalog order.

mod data;

use std::collections::HashSet;

use confeitaria_core::{CategoryKey, Price, ProductId};
use thiserror::Error;

pub use data::builtin;

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    #[error("duplicate category key: {0}")]
    DuplicateCategory(CategoryKey),
    #[error("product {product} references unknown category {category}")]
    UnknownCategory {
        product: ProductId,
        category: CategoryKey,
    },
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// A sellable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: CategoryKey,
    /// Path or URL of the product photo, if there is one.
    pub image: Option<String>,
}

impl Product {
    /// Create a product without an image.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        category: impl Into<CategoryKey>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            image: None,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A display grouping for products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: CategoryKey,
    pub label: String,
}

impl Category {
    #[must_use]
    pub fn new(key: impl Into<CategoryKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Category predicate used when filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category matches.
    #[default]
    All,
    /// Only products with exactly this category key match.
    Only(CategoryKey),
}

impl CategoryFilter {
    /// Interpret user input: empty or `all` (any case) means every category.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(CategoryKey::new(input))
        }
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: &CategoryKey) -> bool {
        match self {
            Self::All => true,
            Self::Only(key) => key == category,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Products sharing one category, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGroup<'a> {
    pub category: &'a Category,
    pub products: Vec<&'a Product>,
}

/// The validated, ordered product list plus its categories.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Assemble a catalog, validating references between products and
    /// categories.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate ids or keys, products pointing at
    /// unknown categories, or negative prices.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut keys = HashSet::new();
        for category in &categories {
            if !keys.insert(&category.key) {
                return Err(CatalogError::DuplicateCategory(category.key.clone()));
            }
        }

        let mut ids = HashSet::new();
        for product in &products {
            if !ids.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            if !keys.contains(&product.category) {
                return Err(CatalogError::UnknownCategory {
                    product: product.id.clone(),
                    category: product.category.clone(),
                });
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
        }

        Ok(Self {
            categories,
            products,
        })
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Look up a category by key.
    #[must_use]
    pub fn category(&self, key: &CategoryKey) -> Option<&Category> {
        self.categories.iter().find(|c| &c.key == key)
    }

    /// Human label for a category key, falling back to the key itself.
    #[must_use]
    pub fn category_label<'a>(&'a self, key: &'a CategoryKey) -> &'a str {
        self.category(key).map_or(key.as_str(), |c| c.label.as_str())
    }

    /// Products whose name contains `search` (case-insensitive) and whose
    /// category passes `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, search: &str, filter: &CategoryFilter) -> Vec<&Product> {
        let needle = search.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle) && filter.matches(&p.category))
            .collect()
    }

    /// Partition `products` by category, keeping first-seen category order
    /// and the given product order within each group.
    #[must_use]
    pub fn group<'a>(&'a self, products: &[&'a Product]) -> Vec<ProductGroup<'a>> {
        let mut groups: Vec<ProductGroup<'a>> = Vec::new();
        for &product in products {
            if let Some(group) = groups
                .iter_mut()
                .find(|g| g.category.key == product.category)
            {
                group.products.push(product);
                continue;
            }
            // Validation guarantees the category exists.
            if let Some(category) = self.category(&product.category) {
                groups.push(ProductGroup {
                    category,
                    products: vec![product],
                });
            }
        }
        groups
    }
}

/// Whether the page shows products grouped by category: only when nothing is
/// being searched and every category is visible.
#[must_use]
pub fn show_grouped(search: &str, filter: &CategoryFilter) -> bool {
    search.is_empty() && filter.is_all()
}

/// Result-count caption, e.g. `27 doces` or `3 de 27 doces`.
#[must_use]
pub fn count_caption(filtered: usize, total: usize) -> String {
    if filtered == total {
        format!("{total} doces")
    } else {
        format!("{filtered} de {total} doces")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use confeitaria_core::CurrencyCode;

    use super::*;

    fn brl(cents: i64) -> Price {
        Price::from_cents(cents, CurrencyCode::BRL)
    }

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                Category::new("brigadeiros", "Brigadeiros & Trufas"),
                Category::new("bolos", "Bolos & Cupcakes"),
            ],
            vec![
                Product::new("1", "Brigadeiro", brl(320), "brigadeiros"),
                Product::new("2", "Beijinho", brl(350), "brigadeiros"),
                Product::new("3", "Brownie", brl(850), "bolos"),
                Product::new("4", "Bolo de Beijinho", brl(900), "bolos"),
            ],
        )
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_rejects_duplicate_product() {
        let err = Catalog::new(
            vec![Category::new("bolos", "Bolos")],
            vec![
                Product::new("1", "A", brl(100), "bolos"),
                Product::new("1", "B", brl(100), "bolos"),
            ],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateProduct(ProductId::new("1")));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let err = Catalog::new(
            vec![Category::new("bolos", "Bolos"), Category::new("bolos", "Again")],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCategory(CategoryKey::new("bolos")));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let err = Catalog::new(
            vec![Category::new("bolos", "Bolos")],
            vec![Product::new("1", "Pudim", brl(900), "tortas")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { .. }));
    }

    #[test]
    fn test_rejects_negative_price() {
        let err = Catalog::new(
            vec![Category::new("bolos", "Bolos")],
            vec![Product::new("1", "Pudim", brl(-1), "bolos")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::NegativePrice(ProductId::new("1")));
    }

    #[test]
    fn test_filter_search_is_case_insensitive_substring() {
        let catalog = sample();
        let found = catalog.filter("BEIJI", &CategoryFilter::All);
        assert_eq!(ids(&found), ["2", "4"]);
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = sample();
        let found = catalog.filter("", &CategoryFilter::parse("bolos"));
        assert_eq!(ids(&found), ["3", "4"]);
    }

    #[test]
    fn test_filter_combines_predicates() {
        let catalog = sample();
        let found = catalog.filter("beiji", &CategoryFilter::parse("brigadeiros"));
        assert_eq!(ids(&found), ["2"]);
    }

    #[test]
    fn test_filter_empty_returns_everything_in_order() {
        let catalog = sample();
        assert_eq!(ids(&catalog.filter("", &CategoryFilter::All)), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_filter_no_match() {
        let catalog = sample();
        assert!(catalog.filter("pizza", &CategoryFilter::All).is_empty());
        assert!(catalog.filter("", &CategoryFilter::parse("salgados")).is_empty());
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(" bolos "),
            CategoryFilter::Only(CategoryKey::new("bolos"))
        );
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let catalog = sample();
        let products = catalog.products();
        let shuffled = vec![&products[2], &products[0], &products[3], &products[1]];
        let groups = catalog.group(&shuffled);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category.key.as_str(), "bolos");
        assert_eq!(ids(&groups[0].products), ["3", "4"]);
        assert_eq!(groups[1].category.key.as_str(), "brigadeiros");
        assert_eq!(ids(&groups[1].products), ["1", "2"]);
    }

    #[test]
    fn test_group_of_filtered() {
        let catalog = sample();
        let filtered = catalog.filter("beiji", &CategoryFilter::All);
        let groups = catalog.group(&filtered);
        let keys: Vec<_> = groups.iter().map(|g| g.category.key.as_str()).collect();
        assert_eq!(keys, ["brigadeiros", "bolos"]);
    }

    #[test]
    fn test_show_grouped() {
        assert!(show_grouped("", &CategoryFilter::All));
        assert!(!show_grouped("bri", &CategoryFilter::All));
        assert!(!show_grouped("", &CategoryFilter::parse("bolos")));
    }

    #[test]
    fn test_count_caption() {
        assert_eq!(count_caption(27, 27), "27 doces");
        assert_eq!(count_caption(3, 27), "3 de 27 doces");
    }

    #[test]
    fn test_product_image_is_optional() {
        let plain = Product::new("1", "Brigadeiro", brl(350), "brigadeiros");
        assert_eq!(plain.image, None);

        let pictured = plain.clone().with_image("images/brigadeiro.jpg");
        assert_eq!(pictured.image.as_deref(), Some("images/brigadeiro.jpg"));
        assert_eq!(pictured.id, plain.id);
    }

    #[test]
    fn test_category_label_fallback() {
        let catalog = sample();
        assert_eq!(catalog.category_label(&CategoryKey::new("bolos")), "Bolos & Cupcakes");
        let unknown = CategoryKey::new("salgados");
        assert_eq!(catalog.category_label(&unknown), "salgados");
    }
}

//! Catalog listing.

use confeitaria_storefront::catalog::CategoryFilter;
use confeitaria_storefront::shell::view;
use confeitaria_storefront::state::AppState;

/// The catalog page, with the saved order's quantities marked.
#[must_use]
pub fn list(state: &AppState, search: &str, category: &str) -> String {
    let filter = CategoryFilter::parse(category);
    let session = state.open_session();
    view::catalog_page(state.catalog(), session.order(), search, &filter)
}

/// Known category keys.
#[must_use]
pub fn categories(state: &AppState) -> String {
    view::categories(state.catalog())
}

//! One-shot order edits and quote output.
//!
//! Every edit loads the saved order, applies the change and saves at once
//! instead of waiting on the debounce.

use confeitaria_storefront::error::{AppError, Result};
use confeitaria_storefront::quote::Quote;
use confeitaria_storefront::session::OrderSession;
use confeitaria_storefront::shell::view;
use confeitaria_storefront::state::AppState;

/// Set a product's quantity.
///
/// # Errors
///
/// Returns [`AppError::UnknownProduct`] if the catalog has no such product.
pub fn set(state: &AppState, product_id: &str, quantity: i64) -> Result<String> {
    edit(state, product_id, |session| {
        session.set_quantity(product_id, quantity);
    })
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns [`AppError::UnknownProduct`] if the catalog has no such product.
pub fn add(state: &AppState, product_id: &str) -> Result<String> {
    edit(state, product_id, |session| {
        session.increment(product_id);
    })
}

/// Remove one unit of a product.
///
/// # Errors
///
/// Returns [`AppError::UnknownProduct`] if the catalog has no such product.
pub fn remove(state: &AppState, product_id: &str) -> Result<String> {
    edit(state, product_id, |session| {
        session.decrement(product_id);
    })
}

fn edit(state: &AppState, product_id: &str, apply: impl FnOnce(&mut OrderSession)) -> Result<String> {
    let product = state
        .catalog()
        .product(product_id)
        .ok_or_else(|| AppError::UnknownProduct(product_id.to_owned()))?;

    let mut session = state.open_session();
    apply(&mut session);
    session.persist();

    let quantity = session.order().quantity(product_id);
    let status = view::status_bar(&Quote::new(session.order(), state.catalog()));
    Ok(if status.is_empty() {
        format!("{}: {quantity}", product.name)
    } else {
        format!("{}: {quantity}\n{status}", product.name)
    })
}

/// Set the delivery date, or clear it when `input` is `None`.
///
/// # Errors
///
/// Returns [`AppError::DeliveryDate`] for malformed or past dates.
pub fn date(state: &AppState, input: Option<&str>) -> Result<String> {
    let mut session = state.open_session();
    session.set_delivery_date(input.unwrap_or_default())?;
    session.persist();
    Ok(session.order().delivery_date().map_or_else(
        || "Data do evento/entrega removida.".to_owned(),
        |date| format!("Data do evento/entrega: {}", date.to_pt_br()),
    ))
}

/// Empty the order and delete the saved record.
#[must_use]
pub fn clear(state: &AppState) -> String {
    let mut session = state.open_session();
    session.clear_order();
    "Pedido limpo.".to_owned()
}

#[must_use]
pub fn summary(state: &AppState) -> String {
    let session = state.open_session();
    view::summary(&Quote::new(session.order(), state.catalog()))
}

/// The quote request text.
///
/// # Errors
///
/// Returns [`AppError::Quote`] if the message cannot be rendered.
pub fn message(state: &AppState) -> Result<String> {
    let session = state.open_session();
    let quote = Quote::new(session.order(), state.catalog());
    Ok(quote.message()?.unwrap_or_else(|| view::summary(&quote)))
}

/// The WhatsApp link carrying the quote request.
///
/// `phone` overrides the configured number.
///
/// # Errors
///
/// Returns [`AppError::Quote`] if the message or link cannot be built.
pub fn whatsapp(state: &AppState, phone: Option<&str>) -> Result<String> {
    let session = state.open_session();
    let quote = Quote::new(session.order(), state.catalog());
    let phone = phone.or(state.config().whatsapp_phone.as_deref());
    Ok(quote
        .whatsapp_link(phone)?
        .map_or_else(|| view::summary(&quote), String::from))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use confeitaria_storefront::catalog;
    use confeitaria_storefront::config::AppConfig;
    use confeitaria_storefront::session::DEFAULT_STORAGE_KEY;
    use confeitaria_storefront::storage::{MemoryStore, OrderStore};

    use super::*;

    fn state(store: &Arc<MemoryStore>) -> AppState {
        AppState::with_store(
            AppConfig::default(),
            catalog::builtin().unwrap(),
            Arc::clone(store) as Arc<dyn OrderStore>,
        )
    }

    fn saved(store: &MemoryStore) -> Option<String> {
        store.read(DEFAULT_STORAGE_KEY).unwrap()
    }

    #[tokio::test]
    async fn test_set_saves_immediately() {
        let store = Arc::new(MemoryStore::new());
        let state = state(&store);
        let out = set(&state, "2", 3).unwrap();
        assert_eq!(out, "Beijinho: 3\nItens: 3 | Total: R$ 10,50");
        assert_eq!(
            saved(&store).as_deref(),
            Some(r#"{"quantities":{"2":3},"deliveryDate":""}"#)
        );
    }

    #[test]
    fn test_edits_accumulate_across_runs() {
        let store = Arc::new(MemoryStore::new());
        let state = state(&store);
        add(&state, "1").unwrap();
        add(&state, "1").unwrap();
        remove(&state, "1").unwrap();
        set(&state, "3", 5000).unwrap();
        assert_eq!(
            saved(&store).as_deref(),
            Some(r#"{"quantities":{"1":1,"3":999},"deliveryDate":""}"#)
        );
    }

    #[test]
    fn test_unknown_product() {
        let store = Arc::new(MemoryStore::new());
        assert!(matches!(
            set(&state(&store), "42", 1),
            Err(AppError::UnknownProduct(id)) if id == "42"
        ));
        assert_eq!(saved(&store), None);
    }

    #[test]
    fn test_date_set_reject_clear() {
        let store = Arc::new(MemoryStore::new());
        let state = state(&store);
        assert_eq!(
            date(&state, Some("2099-12-31")).unwrap(),
            "Data do evento/entrega: 31/12/2099"
        );
        assert!(matches!(
            date(&state, Some("2000-01-01")),
            Err(AppError::DeliveryDate(_))
        ));
        assert!(matches!(
            date(&state, Some("amanhã")),
            Err(AppError::DeliveryDate(_))
        ));
        assert_eq!(date(&state, None).unwrap(), "Data do evento/entrega removida.");
        assert_eq!(saved(&store), None);
    }

    #[test]
    fn test_clear_and_quote_output() {
        let store = Arc::new(MemoryStore::new());
        let state = state(&store);
        assert!(message(&state).unwrap().starts_with("Selecione"));

        set(&state, "1", 2).unwrap();
        assert!(summary(&state).contains("Total: R$ 7,00"));
        assert!(message(&state).unwrap().contains("Total: R$ 7,00."));
        assert!(
            whatsapp(&state, Some("5511999998888"))
                .unwrap()
                .starts_with("https://wa.me/5511999998888?text=")
        );

        assert_eq!(clear(&state), "Pedido limpo.");
        assert_eq!(saved(&store), None);
    }
}

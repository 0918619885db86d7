//! Order summary and the outbound quote request.
//!
//! The summary is the list of selected items with subtotals and a total.
//! The outbound message is rendered from `templates/quote/message.txt` and can
//! be printed for copying or packed into a WhatsApp deep link.

use askama::Template;
use confeitaria_core::{CurrencyCode, DeliveryDate, Price, Quantity};
use thiserror::Error;
use url::Url;

use crate::catalog::Catalog;
use crate::order::{self, Order, SelectedItem};

/// Base URL of WhatsApp click-to-chat links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Errors building the outbound message or link.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("failed to render quote message: {0}")]
    Render(#[from] askama::Error),
    #[error("invalid deep link: {0}")]
    Link(#[from] url::ParseError),
    #[error("phone number must contain only digits, got {0:?}")]
    InvalidPhone(String),
}

/// Derived summary of an order against the catalog.
#[derive(Debug, Clone)]
pub struct Quote<'a> {
    items: Vec<SelectedItem<'a>>,
    currency: CurrencyCode,
    delivery_date: Option<DeliveryDate>,
}

impl<'a> Quote<'a> {
    /// Summarize `order` using prices from `catalog`.
    #[must_use]
    pub fn new(order: &Order, catalog: &'a Catalog) -> Self {
        let items = order.selected_items(catalog);
        let currency = catalog
            .products()
            .first()
            .map_or_else(CurrencyCode::default, |p| p.price.currency_code);
        Self {
            items,
            currency,
            delivery_date: order.delivery_date(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[SelectedItem<'a>] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        order::total(&self.items, self.currency)
    }

    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        order::total_quantity(&self.items)
    }

    #[must_use]
    pub const fn delivery_date(&self) -> Option<DeliveryDate> {
        self.delivery_date
    }

    /// `1 item` / `3 itens`.
    #[must_use]
    pub fn item_count_caption(&self) -> String {
        match self.items.len() {
            1 => "1 item".to_owned(),
            n => format!("{n} itens"),
        }
    }

    /// The quote request text, or `None` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Render`] if the template fails to render.
    pub fn message(&self) -> Result<Option<String>, QuoteError> {
        if self.is_empty() {
            return Ok(None);
        }
        let template = MessageTemplate {
            lines: self
                .items
                .iter()
                .map(|item| MessageLine {
                    name: &item.product.name,
                    quantity: item.quantity,
                    subtotal: item.subtotal().display(),
                })
                .collect(),
            total: self.total().display(),
            date_suffix: self
                .delivery_date
                .map(|d| format!(" para o dia {}", d.to_pt_br()))
                .unwrap_or_default(),
        };
        Ok(Some(template.render()?.trim_end().to_owned()))
    }

    /// WhatsApp link carrying the quote request, or `None` when nothing is
    /// selected.
    ///
    /// # Errors
    ///
    /// See [`Quote::message`] and [`whatsapp_link`].
    pub fn whatsapp_link(&self, phone: Option<&str>) -> Result<Option<Url>, QuoteError> {
        match self.message()? {
            Some(message) => Ok(Some(whatsapp_link(&message, phone)?)),
            None => Ok(None),
        }
    }
}

#[derive(Template)]
#[template(path = "quote/message.txt", escape = "none")]
struct MessageTemplate<'a> {
    lines: Vec<MessageLine<'a>>,
    total: String,
    date_suffix: String,
}

struct MessageLine<'a> {
    name: &'a str,
    quantity: Quantity,
    subtotal: String,
}

/// Build a click-to-chat link with `message` as the prefilled text.
///
/// With a phone number the chat opens directly with that contact; without
/// one the user picks the contact.
///
/// # Errors
///
/// Returns [`QuoteError::InvalidPhone`] if `phone` has non-digit characters.
pub fn whatsapp_link(message: &str, phone: Option<&str>) -> Result<Url, QuoteError> {
    let phone = phone.unwrap_or_default();
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(QuoteError::InvalidPhone(phone.to_owned()));
    }
    let link = format!(
        "{WHATSAPP_BASE_URL}{phone}?text={}",
        urlencoding::encode(message)
    );
    Ok(Url::parse(&link)?)
}

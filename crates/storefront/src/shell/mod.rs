//! Interactive terminal front end.
//!
//! One line in, one reply out. The shell owns the [`OrderSession`] for the
//! run; every edit goes through it so saves stay debounced and gated on the
//! initial load.

mod command;
pub mod view;

pub use command::{Command, ParseError};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::catalog::CategoryFilter;
use crate::error::{AppError, Result};
use crate::order::PersistedOrder;
use crate::quote::Quote;
use crate::session::OrderSession;
use crate::state::AppState;

const PROMPT: &str = "doces> ";

/// Output of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            text: "Até logo!".to_owned(),
            quit: true,
        }
    }
}

/// Browsing state plus the order session.
pub struct Shell {
    state: AppState,
    session: OrderSession,
    search: String,
    filter: CategoryFilter,
}

impl Shell {
    /// Open the order session and start with no search or filter.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let session = state.open_session();
        Self::with_session(state, session)
    }

    #[must_use]
    pub fn with_session(state: AppState, session: OrderSession) -> Self {
        Self {
            state,
            session,
            search: String::new(),
            filter: CategoryFilter::All,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &OrderSession {
        &self.session
    }

    /// Parse and run one input line.
    ///
    /// Input mistakes come back as reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote message or link cannot be built.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return Ok(Reply::text("")),
            Err(e) => return Ok(Reply::text(e.to_string())),
        };
        match self.handle(command) {
            Err(e @ AppError::UnknownProduct(_)) => Ok(Reply::text(format!(
                "{e}. Use `list` para ver os códigos."
            ))),
            other => other,
        }
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownProduct`] for ids not in the catalog, and
    /// [`AppError::Quote`] if the message or link cannot be built.
    pub fn handle(&mut self, command: Command) -> Result<Reply> {
        let reply = match command {
            Command::List => Reply::text(self.catalog_page()),
            Command::Search(search) => {
                self.search = search;
                Reply::text(self.catalog_page())
            }
            Command::Category(filter) => {
                if let CategoryFilter::Only(key) = &filter
                    && self.state.catalog().category(key).is_none()
                {
                    return Ok(Reply::text(format!(
                        "Categoria desconhecida: {key}\n{}",
                        view::categories(self.state.catalog())
                    )));
                }
                self.filter = filter;
                Reply::text(self.catalog_page())
            }
            Command::Set {
                product_id,
                quantity,
            } => {
                self.require_product(&product_id)?;
                self.session.set_quantity(&product_id, quantity);
                Reply::text(self.item_status(&product_id))
            }
            Command::Add(product_id) => {
                self.require_product(&product_id)?;
                self.session.increment(&product_id);
                Reply::text(self.item_status(&product_id))
            }
            Command::Remove(product_id) => {
                self.require_product(&product_id)?;
                self.session.decrement(&product_id);
                Reply::text(self.item_status(&product_id))
            }
            Command::Date(input) => match self.session.set_delivery_date(&input) {
                Ok(()) => Reply::text(self.session.order().delivery_date().map_or_else(
                    || "Data do evento/entrega removida.".to_owned(),
                    |date| format!("Data do evento/entrega: {}", date.to_pt_br()),
                )),
                Err(e) => Reply::text(format!("Data inválida: {e}")),
            },
            Command::Clear => {
                self.session.clear_order();
                Reply::text("Pedido limpo.")
            }
            Command::Summary => Reply::text(view::summary(&self.quote())),
            Command::Message => Reply::text(
                self.quote()
                    .message()?
                    .unwrap_or_else(|| view::summary(&self.quote())),
            ),
            Command::WhatsApp => {
                let phone = self.state.config().whatsapp_phone.as_deref();
                Reply::text(
                    self.quote()
                        .whatsapp_link(phone)?
                        .map_or_else(|| view::summary(&self.quote()), String::from),
                )
            }
            Command::Debug => Reply::text(self.debug_dump()),
            Command::Help => Reply::text(view::help(
                self.state.catalog(),
                self.state.config().environment.is_development(),
            )),
            Command::Quit => Reply::quit(),
        };
        Ok(reply)
    }

    /// Write out a save that is still waiting on its debounce.
    pub fn finish(&mut self) {
        if self.session.has_pending_save() {
            self.session.persist();
        }
    }

    fn quote(&self) -> Quote<'_> {
        Quote::new(self.session.order(), self.state.catalog())
    }

    fn catalog_page(&self) -> String {
        view::catalog_page(
            self.state.catalog(),
            self.session.order(),
            &self.search,
            &self.filter,
        )
    }

    fn require_product(&self, product_id: &str) -> Result<()> {
        if self.state.catalog().product(product_id).is_none() {
            return Err(AppError::UnknownProduct(product_id.to_owned()));
        }
        Ok(())
    }

    fn item_status(&self, product_id: &str) -> String {
        let name = self
            .state
            .catalog()
            .product(product_id)
            .map_or(product_id, |p| p.name.as_str());
        let quantity = self.session.order().quantity(product_id);
        let status = view::status_bar(&self.quote());
        if status.is_empty() {
            format!("{name}: {quantity}")
        } else {
            format!("{name}: {quantity}\n{status}")
        }
    }

    fn debug_dump(&self) -> String {
        if !self.state.config().environment.is_development() {
            return "`debug` só está disponível em desenvolvimento.".to_owned();
        }
        let record = serde_json::to_string_pretty(&PersistedOrder::from(self.session.order()))
            .unwrap_or_else(|e| format!("<unserializable: {e}>"));
        format!(
            "key: {}\nloaded: {}\npending save: {}\nsearch: {:?}\nfilter: {:?}\nrecord: {record}",
            self.session.key(),
            self.session.is_loaded(),
            self.session.has_pending_save(),
            self.search,
            self.filter,
        )
    }
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<R, W>(state: AppState, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut shell = Shell::new(state);
    write_block(&mut output, &view::header()).await?;
    write_block(&mut output, &shell.catalog_page()).await?;
    write_block(&mut output, "Digite `help` para ver os comandos.").await?;

    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let reply = shell.handle_line(&line)?;
        if !reply.text.is_empty() {
            write_block(&mut output, &reply.text).await?;
        }
        if reply.quit {
            break;
        }
    }

    shell.finish();
    output.flush().await?;
    Ok(())
}

async fn write_block<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    Ok(())
}

//! Parsing of shell input lines.

use thiserror::Error;

use crate::catalog::CategoryFilter;

/// Reasons an input line is not a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("type a command, or `help` to see them all")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` is not a whole number")]
    InvalidQuantity(String),
}

/// One thing the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the catalog with the current search and category.
    List,
    /// Change the search term (empty clears it) and show the catalog.
    Search(String),
    /// Change the category filter and show the catalog.
    Category(CategoryFilter),
    /// Set a product's quantity.
    Set { product_id: String, quantity: i64 },
    /// One more unit of a product.
    Add(String),
    /// One less unit of a product.
    Remove(String),
    /// Set the delivery date; empty clears it.
    Date(String),
    /// Empty the order.
    Clear,
    /// Show the order summary.
    Summary,
    /// Print the quote request text.
    Message,
    /// Print the WhatsApp link.
    WhatsApp,
    /// Dump internal state (development only).
    Debug,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for blank lines, unknown commands, missing
    /// arguments and non-numeric quantities.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        match name.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "list" | "ls" => Ok(Self::List),
            "search" | "buscar" => Ok(Self::Search(rest.to_owned())),
            "category" | "categoria" => Ok(Self::Category(CategoryFilter::parse(rest))),
            "set" => {
                let mut args = rest.split_whitespace();
                let product_id = args.next().ok_or(ParseError::MissingArgument {
                    command: "set",
                    argument: "a product id and a quantity",
                })?;
                let quantity = args.next().ok_or(ParseError::MissingArgument {
                    command: "set",
                    argument: "a quantity",
                })?;
                Ok(Self::Set {
                    product_id: product_id.to_owned(),
                    quantity: parse_quantity(quantity)?,
                })
            }
            "add" | "+" => Ok(Self::Add(required(rest, "add", "a product id")?)),
            "remove" | "rm" | "-" => Ok(Self::Remove(required(rest, "remove", "a product id")?)),
            "date" | "data" => {
                let rest = if matches!(rest.to_ascii_lowercase().as_str(), "none" | "clear") {
                    ""
                } else {
                    rest
                };
                Ok(Self::Date(rest.to_owned()))
            }
            "clear" | "limpar" => Ok(Self::Clear),
            "summary" | "resumo" => Ok(Self::Summary),
            "message" | "mensagem" | "copy" => Ok(Self::Message),
            "whatsapp" | "wa" => Ok(Self::WhatsApp),
            "debug" => Ok(Self::Debug),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_owned())),
        }
    }
}

fn required(rest: &str, command: &'static str, argument: &'static str) -> Result<String, ParseError> {
    rest.split_whitespace()
        .next()
        .map(str::to_owned)
        .ok_or(ParseError::MissingArgument { command, argument })
}

/// Parse a whole number, saturating values too large for `i64`.
///
/// Range clamping to a valid quantity happens in the order itself.
fn parse_quantity(input: &str) -> Result<i64, ParseError> {
    if let Ok(value) = input.parse::<i64>() {
        return Ok(value);
    }
    let (negative, digits) = input
        .strip_prefix('-')
        .map_or((false, input), |digits| (true, digits));
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(if negative { i64::MIN } else { i64::MAX });
    }
    Err(ParseError::InvalidQuantity(input.to_owned()))
}

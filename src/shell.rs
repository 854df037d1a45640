//! Order shell
//!
//! Line-oriented front end over an [`OrderSession`]. Each input line is one command;
//! domain errors are reported inline and the shell keeps reading.

use std::{
    fmt::Write as _,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use tracing::debug;

use crate::{
    Error,
    clock::Clock,
    menu::Menu,
    prices::format_price,
    receipt::{DEFAULT_RESTAURANT, Receipt},
    session::OrderSession,
};

const HELP: &str = "\
commands:
  menu                 show the menu
  add <item> <qty>     add an item to the order
  discount <percent>   apply a discount between 0 and 100
  total                show the order total
  order                show the order lines
  bill                 print and save the bill
  clear                start a new order
  help                 show this help
  quit                 leave the shell";

/// Errors that end a shell run.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("terminal IO failed: {0}")]
    Io(#[from] io::Error),
}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'l> {
    Menu,
    Add { name: &'l str, quantity: &'l str },
    Discount(&'l str),
    Total,
    Order,
    Bill,
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(&'l str),
}

impl<'l> Command<'l> {
    fn parse(line: &'l str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word {
            "" => Command::Empty,
            "menu" => Command::Menu,
            "add" => {
                let (name, quantity) = rest
                    .rsplit_once(char::is_whitespace)
                    .map_or((rest, ""), |(name, quantity)| (name.trim_end(), quantity));

                Command::Add { name, quantity }
            }
            "discount" => Command::Discount(rest),
            "total" => Command::Total,
            "order" => Command::Order,
            "bill" => Command::Bill,
            "clear" => Command::Clear,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other),
        }
    }
}

/// What the shell should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Show this text and keep reading.
    Text(String),

    /// Stop reading input.
    Quit,
}

/// Interactive order taking over any line reader and writer.
#[derive(Debug)]
pub struct Shell<'a, C: Clock> {
    menu: &'a Menu,
    session: OrderSession,
    clock: C,
    receipt_dir: PathBuf,
    restaurant: String,
}

impl<'a, C: Clock> Shell<'a, C> {
    /// Create a shell ordering from `menu`, saving receipts in `receipt_dir`.
    pub fn new(menu: &'a Menu, clock: C, receipt_dir: impl Into<PathBuf>) -> Self {
        Self {
            menu,
            session: OrderSession::new(),
            clock,
            receipt_dir: receipt_dir.into(),
            restaurant: DEFAULT_RESTAURANT.to_string(),
        }
    }

    /// Print `restaurant` in receipt titles.
    #[must_use]
    pub fn with_restaurant(mut self, restaurant: impl Into<String>) -> Self {
        self.restaurant = restaurant.into();
        self
    }

    /// The session being edited.
    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    /// Read commands from `input` until it ends or `quit` is entered.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] if reading input or writing output fails.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<(), ShellError> {
        writeln!(out, "Type `help` for commands.")?;

        for line in input.lines() {
            let line = line?;

            match self.execute(&line) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Text(text)) if text.is_empty() => {}
                Ok(Reply::Text(text)) => writeln!(out, "{text}")?,
                Err(error) => writeln!(out, "Error: {error}")?,
            }
        }

        out.flush()?;

        Ok(())
    }

    /// Run a single command line against the session.
    ///
    /// # Errors
    ///
    /// Returns the domain [`Error`] the command failed with; the session is left unchanged.
    pub fn execute(&mut self, line: &str) -> Result<Reply, Error> {
        let command = Command::parse(line);

        debug!(?command, "shell command");

        let text = match command {
            Command::Empty => String::new(),
            Command::Menu => self.menu.table(),
            Command::Add { name, quantity } => {
                let line = self.session.add_item(self.menu, name, quantity)?;

                format!("{line}\n{}", self.total_line()?)
            }
            Command::Discount(percentage) => {
                self.session.set_discount(percentage)?;
                self.total_line()?
            }
            Command::Total => self.total_line()?,
            Command::Order => self.order_lines(),
            Command::Bill => self.bill()?,
            Command::Clear => {
                self.session.clear();
                self.total_line()?
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
            Command::Unknown(word) => format!("unknown command {word:?}; type `help`"),
        };

        Ok(Reply::Text(text))
    }

    fn total_line(&self) -> Result<String, Error> {
        let bill = self.session.bill()?;

        Ok(format!("Total: {}", format_price(bill.total())))
    }

    fn order_lines(&self) -> String {
        let ledger = self.session.ledger();

        if ledger.is_empty() {
            return "order is empty".to_string();
        }

        let mut text = String::new();

        for line in ledger.iter() {
            _ = writeln!(text, "{line}");
        }

        text.trim_end().to_string()
    }

    fn bill(&self) -> Result<String, Error> {
        let receipt = Receipt::new(
            self.session.ledger(),
            self.session.discount(),
            self.clock.now(),
        )?
        .with_restaurant(&self.restaurant);

        let path = receipt.persist(&self.receipt_dir)?;

        Ok(format!("{receipt}Bill saved as {}", path.display()))
    }
}

//! Till command line

use std::{
    io::{self, Write},
    process::ExitCode,
};

use till::{
    Error,
    clock::{Clock, SystemClock},
    menu::{Menu, MenuStore},
    prices::format_price,
    receipt::Receipt,
    session::OrderSession,
    shell::Shell,
};
use tracing::{error, info};

use crate::config::{BillArgs, Command, Config, StoreConfig};

mod config;
mod observability;

#[expect(clippy::print_stderr, reason = "errors before logging is available")]
fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            _ = error.print();
            return ExitCode::from(config::exit_status(&error));
        }
    };

    if let Err(error) = observability::init(&config.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Error> {
    let menu = MenuStore::new(&config.store.menu_path).load()?;

    info!(
        path = %config.store.menu_path.display(),
        entries = menu.len(),
        "menu ready"
    );

    match &config.command {
        Command::Menu => {
            writeln!(io::stdout().lock(), "{}", menu.table()).map_err(shell_io)?;
        }
        Command::Bill(args) => bill(&menu, &config.store, args)?,
        Command::Shell => {
            Shell::new(&menu, SystemClock, &config.store.receipt_dir)
                .with_restaurant(&config.store.restaurant)
                .run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

fn bill(menu: &Menu, store: &StoreConfig, args: &BillArgs) -> Result<(), Error> {
    let mut session = OrderSession::new();

    for line in &args.items {
        session.add_item(menu, &line.name, &line.quantity)?;
    }

    if let Some(discount) = args.discount.as_deref() {
        session.set_discount(discount)?;
    }

    let receipt = Receipt::new(session.ledger(), session.discount(), SystemClock.now())?
        .with_restaurant(&store.restaurant);

    write!(io::stdout().lock(), "{receipt}").map_err(shell_io)?;

    let path = receipt.persist(&store.receipt_dir)?;

    info!(path = %path.display(), total = %format_price(receipt.bill().total()), "bill saved");

    Ok(())
}

fn shell_io(error: io::Error) -> Error {
    till::shell::ShellError::from(error).into()
}

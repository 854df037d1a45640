//! Menu
//!
//! The menu is kept in a two-column CSV file (`Item,Price`). A missing file is not an
//! error: the built-in menu is returned and written out so the next load reads it back.

use std::{
    fs::File,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Writer};
use rustc_hash::FxHashSet;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::prices::{Price, format_price, from_cents, parse_price, to_decimal};

/// Menu header row, as written to and expected in the menu file.
pub const MENU_HEADER: [&str; 2] = ["Item", "Price"];

/// Built-in menu used when no menu file exists yet (name, price in cents).
const DEFAULT_MENU: [(&str, i64); 5] = [
    ("Burger", 899),
    ("Pizza", 1299),
    ("Salad", 699),
    ("Pasta", 1099),
    ("Soda", 299),
];

/// Menu loading and saving errors
#[derive(Debug, Error)]
pub enum MenuError {
    /// The menu file exists but could not be opened, created or written.
    #[error("failed to access menu file: {0}")]
    Io(#[from] io::Error),

    /// The menu file could not be read or written as CSV.
    #[error("failed to process menu CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A price cell was not a non-negative decimal number.
    #[error("invalid price {value:?} on line {line} of the menu file")]
    InvalidPrice {
        /// Line number in the menu file
        line: u64,
        /// Raw price text
        value: String,
    },
}

/// A named item with a price.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuEntry {
    name: String,
    price: Price,
}

impl MenuEntry {
    /// Creates a new menu entry.
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Item name, unique within a menu
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item price
    pub fn price(&self) -> &Price {
        &self.price
    }
}

/// Snapshot of the menu items available for ordering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Build a menu from entries, keeping the first entry for any repeated name.
    pub fn new(entries: impl IntoIterator<Item = MenuEntry>) -> Self {
        let mut seen = FxHashSet::default();

        let entries = entries
            .into_iter()
            .filter(|entry| {
                let fresh = seen.insert(entry.name.clone());

                if !fresh {
                    warn!(item = %entry.name, "duplicate menu entry skipped");
                }

                fresh
            })
            .collect();

        Self { entries }
    }

    /// The built-in five item menu.
    pub fn defaults() -> Self {
        Self::new(
            DEFAULT_MENU
                .iter()
                .map(|(name, cents)| MenuEntry::new(*name, from_cents(*cents))),
        )
    }

    /// Find an entry by exact name.
    pub fn find(&self, name: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Iterate over the entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the menu as a two column table.
    pub fn table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(MENU_HEADER);

        for entry in &self.entries {
            builder.push_record([entry.name.clone(), format_price(&entry.price)]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..2), Alignment::right());

        table.to_string()
    }
}

/// Flat-file storage for the menu.
#[derive(Clone, Debug)]
pub struct MenuStore {
    path: PathBuf,
}

impl MenuStore {
    /// Create a store backed by the CSV file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the menu, bootstrapping the default menu if the file does not exist.
    ///
    /// Rows with fewer than two columns are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the file cannot be read, if a price is invalid, or if
    /// the default menu cannot be written during bootstrap.
    pub fn load(&self) -> Result<Menu, MenuError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => return self.bootstrap(),
            Err(error) => return Err(error.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut entries = Vec::new();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);

            let (Some(name), Some(price_text)) = (record.get(0), record.get(1)) else {
                debug!(line, "skipping menu row with fewer than two columns");
                continue;
            };

            let price = parse_price(price_text)
                .filter(|price| price.to_minor_units() >= 0)
                .ok_or_else(|| MenuError::InvalidPrice {
                    line,
                    value: price_text.to_string(),
                })?;

            entries.push(MenuEntry::new(name, price));
        }

        let menu = Menu::new(entries);

        debug!(path = %self.path.display(), entries = menu.len(), "menu loaded");

        Ok(menu)
    }

    /// Overwrite the backing file with `menu`.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the file cannot be created or written.
    pub fn save(&self, menu: &Menu) -> Result<(), MenuError> {
        let mut writer = Writer::from_writer(File::create(&self.path)?);

        writer.write_record(MENU_HEADER)?;

        for entry in menu.iter() {
            let price = to_decimal(entry.price()).to_string();

            writer.write_record([entry.name(), price.as_str()])?;
        }

        writer.flush()?;

        debug!(path = %self.path.display(), entries = menu.len(), "menu saved");

        Ok(())
    }

    fn bootstrap(&self) -> Result<Menu, MenuError> {
        let menu = Menu::defaults();

        info!(path = %self.path.display(), "menu file not found, writing default menu");

        self.save(&menu)?;

        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn store_in(dir: &TempDir) -> MenuStore {
        MenuStore::new(dir.path().join("menu.csv"))
    }

    #[test]
    fn defaults_has_five_entries() {
        let menu = Menu::defaults();
        let names: Vec<_> = menu.iter().map(MenuEntry::name).collect();

        assert_eq!(names, ["Burger", "Pizza", "Salad", "Pasta", "Soda"]);
        assert_eq!(
            menu.find("Pasta").map(MenuEntry::price),
            Some(&from_cents(1099))
        );
    }

    #[test]
    fn find_is_exact_match() {
        let menu = Menu::defaults();

        assert!(menu.find("Burger").is_some());
        assert!(menu.find("burger").is_none());
        assert!(menu.find("Burger ").is_none());
    }

    #[test]
    fn new_keeps_first_duplicate() {
        let menu = Menu::new([
            MenuEntry::new("Soda", from_cents(299)),
            MenuEntry::new("Soda", from_cents(150)),
        ]);

        assert_eq!(menu.len(), 1);
        assert_eq!(menu.find("Soda").map(MenuEntry::price), Some(&from_cents(299)));
    }

    #[test]
    fn load_bootstraps_missing_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        let menu = store.load()?;

        assert_eq!(menu, Menu::defaults());
        assert!(store.path().exists());

        Ok(())
    }

    #[test]
    fn save_writes_header_and_plain_prices() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        store.save(&Menu::new([
            MenuEntry::new("Burger", from_cents(899)),
            MenuEntry::new("Tea", from_cents(200)),
        ]))?;

        let contents = fs::read_to_string(store.path())?;

        assert_eq!(contents, "Item,Price\nBurger,8.99\nTea,2.00\n");

        Ok(())
    }

    #[test]
    fn load_skips_short_rows() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        fs::write(
            store.path(),
            "Item,Price\nBurger,8.99\nBroken\nSoda,2.99,extra\n",
        )?;

        let menu = store.load()?;
        let names: Vec<_> = menu.iter().map(MenuEntry::name).collect();

        assert_eq!(names, ["Burger", "Soda"]);
        assert_eq!(menu.find("Soda").map(MenuEntry::price), Some(&from_cents(299)));

        Ok(())
    }

    #[test]
    fn load_rejects_invalid_price() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        fs::write(store.path(), "Item,Price\nBurger,free\n")?;

        let result = store.load();

        assert!(
            matches!(&result, Err(MenuError::InvalidPrice { line: 2, value }) if value == "free"),
            "expected InvalidPrice, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn load_rejects_negative_price() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        fs::write(store.path(), "Item,Price\nRefund,-1.00\n")?;

        assert!(matches!(store.load(), Err(MenuError::InvalidPrice { .. })));

        Ok(())
    }

    #[test]
    fn load_of_directory_is_an_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = MenuStore::new(dir.path());

        assert!(matches!(
            store.load(),
            Err(MenuError::Io(_) | MenuError::Csv(_))
        ));

        Ok(())
    }

    #[test]
    fn table_lists_every_entry() {
        let table = Menu::defaults().table();

        for name in ["Item", "Price", "Burger", "$8.99", "Soda", "$2.99"] {
            assert!(table.contains(name), "table should contain {name}");
        }
    }
}

//! # API Facade
//!
//! A thin layer over [`crate::commands`]: every UI goes through [`DrillApi`].
//! It turns loosely-typed user input (strings from the command line) into
//! records through the normalizer, then dispatches to the command that does
//! the work. It holds no business logic and does no I/O of its own.
//!
//! `DrillApi` is generic over the inventory and library stores, so tests run
//! it against [`crate::store::memory::InMemoryStore`] while the CLI uses
//! [`crate::store::json::JsonFileStore`].

use crate::commands::{self, CmdResult, DrillPaths};
use crate::config::DrillConfig;
use crate::error::Result;
use crate::model::{Book, Product, Record};
use crate::store::json::JsonFileStore;
use crate::store::lines::LineStore;
use crate::store::DataStore;
use serde_json::json;
use std::path::{Path, PathBuf};

pub struct DrillApi<P: DataStore<Product>, B: DataStore<Book>> {
    inventory: P,
    library: B,
    tasks: LineStore,
    paths: DrillPaths,
}

/// The file-backed API used by the CLI.
pub type FileApi = DrillApi<JsonFileStore<Product>, JsonFileStore<Book>>;

impl FileApi {
    pub fn open(paths: DrillPaths) -> Self {
        DrillApi::new(
            JsonFileStore::new(paths.inventory()),
            JsonFileStore::new(paths.library()),
            paths,
        )
    }
}

impl<P: DataStore<Product>, B: DataStore<Book>> DrillApi<P, B> {
    pub fn new(inventory: P, library: B, paths: DrillPaths) -> Self {
        let tasks = LineStore::new(paths.tasks());
        Self {
            inventory,
            library,
            tasks,
            paths,
        }
    }

    pub fn paths(&self) -> &DrillPaths {
        &self.paths
    }

    pub fn config(&self) -> Result<DrillConfig> {
        DrillConfig::load(&self.paths.data_dir)
    }

    // --- inventory ---

    pub fn list_products(&self, available_only: bool) -> Result<CmdResult> {
        commands::inventory::list(&self.inventory, available_only)
    }

    /// Price and stock are taken as typed and coerced by the normalizer.
    pub fn add_product(&mut self, name: &str, price: &str, stock: &str) -> Result<CmdResult> {
        let product = Product::from_raw(&json!({
            "name": name,
            "price": price,
            "stock": stock,
        }))?;
        commands::inventory::add(&mut self.inventory, product)
    }

    pub fn sell(&mut self, name: &str, quantity: i64) -> Result<CmdResult> {
        commands::inventory::sell(&mut self.inventory, name, quantity)
    }

    pub fn search_products(&self, query: &str) -> Result<CmdResult> {
        commands::inventory::search(&self.inventory, query)
    }

    // --- library ---

    pub fn list_books(&self, on_loan_only: bool) -> Result<CmdResult> {
        commands::library::list(&self.library, on_loan_only)
    }

    pub fn add_book(&mut self, id: &str, title: &str) -> Result<CmdResult> {
        let book = Book::from_raw(&json!({
            "id": id,
            "title": title,
            "borrowed_by": null,
        }))?;
        commands::library::add(&mut self.library, book)
    }

    pub fn borrow_book(&mut self, id: &str, borrower: &str) -> Result<CmdResult> {
        commands::library::borrow(&mut self.library, id, borrower)
    }

    pub fn return_book(&mut self, id: &str) -> Result<CmdResult> {
        commands::library::return_book(&mut self.library, id)
    }

    pub fn search_books(&self, query: &str) -> Result<CmdResult> {
        commands::library::search(&self.library, query)
    }

    // --- tasks ---

    pub fn add_task(&mut self, text: &str) -> Result<CmdResult> {
        commands::tasks::add(&mut self.tasks, text)
    }

    pub fn list_tasks(&self) -> Result<CmdResult> {
        commands::tasks::list(&self.tasks)
    }

    // --- files ---

    pub fn analyze(&self, csv: &Path, column: &str) -> Result<CmdResult> {
        commands::analyze::run(&self.paths, csv, column)
    }

    pub fn report(
        &self,
        students: &Path,
        courses: &Path,
        out: Option<PathBuf>,
        print_only: bool,
    ) -> Result<CmdResult> {
        commands::report::run(&self.paths, students, courses, out, print_only)
    }

    pub fn config_action(&self, action: commands::config::ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillError;
    use crate::store::memory::InMemoryStore;
    use tempfile::{tempdir, TempDir};

    fn api() -> (TempDir, DrillApi<InMemoryStore<Product>, InMemoryStore<Book>>) {
        let temp = tempdir().unwrap();
        let api = DrillApi::new(
            InMemoryStore::new(),
            InMemoryStore::new(),
            DrillPaths::new(temp.path()),
        );
        (temp, api)
    }

    #[test]
    fn add_product_coerces_typed_strings() {
        let (_temp, mut api) = api();
        let result = api.add_product(" Blue  Shirt ", "49,90", "3").unwrap();
        assert_eq!(result.products[0].name, "Blue Shirt");
        assert_eq!(result.products[0].price, 49.9);
        assert_eq!(result.products[0].stock, 3);
    }

    #[test]
    fn add_product_reports_normalizer_errors() {
        let (_temp, mut api) = api();
        assert!(matches!(
            api.add_product("Shirt", "cheap", "1"),
            Err(DrillError::Type(_))
        ));
        assert!(matches!(
            api.add_product("Shirt", "10", "-1"),
            Err(DrillError::Validation(_))
        ));
        assert!(api.list_products(false).unwrap().products.is_empty());
    }

    #[test]
    fn library_round_trip_through_api() {
        let (_temp, mut api) = api();
        api.add_book("A1", "Rayuela").unwrap();
        api.borrow_book("a1", "Ana").unwrap();
        assert_eq!(api.list_books(true).unwrap().books.len(), 1);
        api.return_book("A1").unwrap();
        assert!(api.list_books(true).unwrap().books.is_empty());
    }

    #[test]
    fn tasks_live_in_the_data_dir() {
        let (temp, mut api) = api();
        api.add_task("write tests").unwrap();
        assert!(temp.path().join("tasks.txt").exists());
        assert_eq!(api.list_tasks().unwrap().tasks, vec!["write tests"]);
    }
}

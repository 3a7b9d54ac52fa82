use super::helpers::{position_of, search as search_records, upsert, Upserted};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DrillError, Result};
use crate::filter::{filter, in_stock};
use crate::model::Product;
use crate::store::DataStore;
use tracing::debug;

pub fn list<S: DataStore<Product>>(store: &S, available_only: bool) -> Result<CmdResult> {
    let products = store.load()?;
    let products = if available_only {
        filter(&products, in_stock)
    } else {
        products
    };
    let mut result = CmdResult::default();
    if products.is_empty() {
        result.add_message(CmdMessage::info("No products."));
    }
    Ok(result.with_products(products))
}

/// Adds a product, or tops up the one with the same name.
pub fn add<S: DataStore<Product>>(store: &mut S, product: Product) -> Result<CmdResult> {
    let (stored, outcome) = upsert(store, product)?;
    let mut result = CmdResult::default();
    let verb = match outcome {
        Upserted::Added => "Product added",
        Upserted::Merged => "Product updated",
    };
    result.add_message(CmdMessage::success(format!(
        "{}: {} (stock {})",
        verb, stored.name, stored.stock
    )));
    Ok(result.with_products(vec![stored]))
}

/// Takes `quantity` units out of stock.
pub fn sell<S: DataStore<Product>>(store: &mut S, name: &str, quantity: i64) -> Result<CmdResult> {
    if quantity <= 0 {
        return Err(DrillError::InvalidArgument(
            "quantity must be greater than 0".to_string(),
        ));
    }
    let mut products = store.load()?;
    let index = position_of(&products, name)
        .ok_or_else(|| DrillError::NotFound(format!("product '{}'", name.trim())))?;

    let product = &mut products[index];
    if quantity > product.stock {
        return Err(DrillError::InsufficientResource {
            requested: quantity,
            available: product.stock,
        });
    }
    product.stock -= quantity;
    let sold = product.clone();
    store.save(&products)?;
    debug!(name = %sold.name, quantity, remaining = sold.stock, "sold");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Sold {} x {}. Remaining stock: {}",
        quantity, sold.name, sold.stock
    )));
    if sold.stock == 0 {
        result.add_message(CmdMessage::warning(format!("{} is now out of stock", sold.name)));
    }
    Ok(result.with_products(vec![sold]))
}

pub fn search<S: DataStore<Product>>(store: &S, query: &str) -> Result<CmdResult> {
    let found = search_records(&store.load()?, query);
    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No products match '{}'.", query.trim())));
    }
    Ok(result.with_products(found))
}

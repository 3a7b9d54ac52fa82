//! Predicate filtering.
//!
//! [`filter`] is the one generic shape behind every "show me only the ..."
//! view in drillbox: available stock, books on loan, valid e-mails, numbers
//! above a threshold, known course ids. The predicates below plug into it.

use crate::model::{Book, Product};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Returns the elements for which `predicate` holds, in their original order.
/// The input is never modified.
pub fn filter<T, P>(items: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| predicate(item)).cloned().collect()
}

pub fn is_valid_email(address: &str) -> bool {
    let text = address.trim();
    if text.is_empty() || text.contains(' ') {
        return false;
    }
    EMAIL_PATTERN.is_match(text)
}

pub fn greater_than(threshold: i64) -> impl Fn(&i64) -> bool {
    move |n| *n > threshold
}

pub fn in_stock(product: &Product) -> bool {
    product.stock > 0
}

pub fn on_loan(book: &Book) -> bool {
    book.loan
        .borrower()
        .is_some_and(|name| !name.trim().is_empty())
}

pub fn known_course(lookup: &HashMap<String, String>) -> impl Fn(&String) -> bool + '_ {
    move |id| lookup.contains_key(id)
}

use super::helpers::{position_of, search as search_records, upsert, Upserted};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DrillError, Result};
use crate::filter::{filter, on_loan};
use crate::model::Book;
use crate::store::DataStore;

pub fn list<S: DataStore<Book>>(store: &S, on_loan_only: bool) -> Result<CmdResult> {
    let books = store.load()?;
    let books = if on_loan_only {
        filter(&books, on_loan)
    } else {
        books
    };
    let mut result = CmdResult::default();
    if books.is_empty() {
        result.add_message(CmdMessage::info("No books."));
    }
    Ok(result.with_books(books))
}

/// Registers a book, or retitles the one with the same id.
pub fn add<S: DataStore<Book>>(store: &mut S, book: Book) -> Result<CmdResult> {
    let (stored, outcome) = upsert(store, book)?;
    let mut result = CmdResult::default();
    let verb = match outcome {
        Upserted::Added => "Book added",
        Upserted::Merged => "Book updated",
    };
    result.add_message(CmdMessage::success(format!(
        "{}: [{}] {}",
        verb, stored.id, stored.title
    )));
    Ok(result.with_books(vec![stored]))
}

pub fn borrow<S: DataStore<Book>>(store: &mut S, id: &str, borrower: &str) -> Result<CmdResult> {
    transition(store, id, |book| book.loan.borrow(borrower), |book| {
        format!(
            "[{}] {} lent to {}",
            book.id,
            book.title,
            book.loan.borrower().unwrap_or_default()
        )
    })
}

pub fn return_book<S: DataStore<Book>>(store: &mut S, id: &str) -> Result<CmdResult> {
    transition(store, id, |book| book.loan.give_back(), |book| {
        format!("[{}] {} returned", book.id, book.title)
    })
}

fn transition<S, F, M>(store: &mut S, id: &str, apply: F, describe: M) -> Result<CmdResult>
where
    S: DataStore<Book>,
    F: FnOnce(&mut Book) -> Result<()>,
    M: FnOnce(&Book) -> String,
{
    let mut books = store.load()?;
    let index = position_of(&books, id)
        .ok_or_else(|| DrillError::NotFound(format!("book '{}'", id.trim())))?;
    let book = &mut books[index];
    apply(&mut *book).map_err(|e| match e {
        DrillError::InvalidState(msg) => {
            DrillError::InvalidState(format!("book '{}' is {}", book.id, msg))
        }
        other => other,
    })?;
    let changed = book.clone();
    store.save(&books)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(describe(&changed)));
    Ok(result.with_books(vec![changed]))
}

pub fn search<S: DataStore<Book>>(store: &S, query: &str) -> Result<CmdResult> {
    let found = search_records(&store.load()?, query);
    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No books match '{}'.", query.trim())));
    }
    Ok(result.with_books(found))
}

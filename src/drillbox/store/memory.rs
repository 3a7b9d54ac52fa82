use super::{decode_records, encode_records, DataStore};
use crate::error::Result;
use crate::model::Record;
use std::marker::PhantomData;

/// In-memory storage for testing. Holds the serialized snapshot, so loads and
/// saves exercise the same normalization rules as the file store.
pub struct InMemoryStore<R> {
    document: Option<String>,
    _record: PhantomData<R>,
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self {
            document: None,
            _record: PhantomData,
        }
    }
}

impl<R: Record> InMemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw document text, as if read from a file.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            _record: PhantomData,
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl<R: Record> DataStore<R> for InMemoryStore<R> {
    fn load(&self) -> Result<Vec<R>> {
        Ok(self
            .document
            .as_deref()
            .map(decode_records::<R>)
            .unwrap_or_default())
    }

    fn save(&mut self, records: &[R]) -> Result<()> {
        self.document = Some(encode_records(records)?);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Book, LoanState, Product};

    pub struct InventoryFixture {
        pub store: InMemoryStore<Product>,
        products: Vec<Product>,
    }

    impl Default for InventoryFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl InventoryFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                products: Vec::new(),
            }
        }

        pub fn with_product(mut self, name: &str, price: f64, stock: i64) -> Self {
            self.products.push(Product::new(name, price, stock).unwrap());
            self.store.save(&self.products).unwrap();
            self
        }
    }

    pub struct LibraryFixture {
        pub store: InMemoryStore<Book>,
        books: Vec<Book>,
    }

    impl Default for LibraryFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LibraryFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                books: Vec::new(),
            }
        }

        pub fn with_book(mut self, id: &str, title: &str) -> Self {
            self.books.push(Book::new(id, title).unwrap());
            self.store.save(&self.books).unwrap();
            self
        }

        pub fn with_loaned_book(mut self, id: &str, title: &str, borrower: &str) -> Self {
            let mut book = Book::new(id, title).unwrap();
            book.loan = LoanState::OnLoan(borrower.to_string());
            self.books.push(book);
            self.store.save(&self.books).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::model::Product;

    #[test]
    fn empty_store_loads_empty() {
        let store: InMemoryStore<Product> = InMemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert!(store.document().is_none());
    }

    #[test]
    fn seeded_corrupt_document_loads_empty() {
        let store: InMemoryStore<Product> = InMemoryStore::with_document("nope");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn fixture_persists_through_document() {
        let fixture = InventoryFixture::new()
            .with_product("A", 1.0, 0)
            .with_product("B", 2.0, 3);
        let loaded = fixture.store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(fixture.store.document().unwrap().contains("\"B\""));
    }
}

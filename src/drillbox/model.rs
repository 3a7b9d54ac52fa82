use crate::error::{DrillError, Result};
use crate::normalize;
use serde::Serialize;
use serde_json::Value;

/// A validated, identifiable unit of persisted data.
///
/// `from_raw` is the normalizer: it is the only way loosely-typed input becomes
/// a record. Stores call `normalized` again before writing so that a record
/// mutated through its public fields cannot be persisted in a broken state.
pub trait Record: Clone + Serialize {
    /// Human label used in messages ("product", "book").
    const KIND: &'static str;

    fn key(&self) -> &str;

    fn from_raw(raw: &Value) -> Result<Self>;

    fn normalized(self) -> Result<Self>;

    /// Folds an incoming record with the same key into `self`. On error
    /// `self` is left as it was.
    fn merge(&mut self, incoming: Self) -> Result<()>;

    /// Text matched by `find`.
    fn search_text(&self) -> &str;
}

/// An inventory line. The name doubles as the identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    pub fn new(name: &str, price: f64, stock: i64) -> Result<Self> {
        Self {
            name: name.to_string(),
            price,
            stock,
        }
        .normalized()
    }

    pub fn value(&self) -> f64 {
        normalize::round2(self.price * self.stock as f64)
    }
}

impl Record for Product {
    const KIND: &'static str = "product";

    fn key(&self) -> &str {
        &self.name
    }

    fn from_raw(raw: &Value) -> Result<Self> {
        let map = normalize::as_object(Self::KIND, raw)?;
        let name = normalize::text_field(map, "name")?;
        let price = normalize::to_f64("price", normalize::required(map, "price")?)?;
        let stock = normalize::to_i64("stock", normalize::required(map, "stock")?)?;
        Ok(Self {
            name,
            price: normalize::non_negative_f64("price", price)?,
            stock: normalize::non_negative_i64("stock", stock)?,
        })
    }

    fn normalized(self) -> Result<Self> {
        Ok(Self {
            name: normalize::text("name", &self.name)?,
            price: normalize::non_negative_f64("price", self.price)?,
            stock: normalize::non_negative_i64("stock", self.stock)?,
        })
    }

    /// Restocking: the new price wins, stock is topped up. Casing of the
    /// stored name is kept.
    fn merge(&mut self, incoming: Self) -> Result<()> {
        self.stock = self
            .stock
            .checked_add(incoming.stock)
            .ok_or_else(|| DrillError::Validation("stock: value too large".to_string()))?;
        self.price = incoming.price;
        Ok(())
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

/// Loan flag of a book. Serialized as the nullable `borrowed_by` field;
/// reading it back goes through [`Book::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "Option<String>")]
pub enum LoanState {
    #[default]
    Available,
    OnLoan(String),
}

impl From<LoanState> for Option<String> {
    fn from(value: LoanState) -> Self {
        match value {
            LoanState::Available => None,
            LoanState::OnLoan(name) => Some(name),
        }
    }
}

impl LoanState {
    pub fn borrower(&self) -> Option<&str> {
        match self {
            LoanState::Available => None,
            LoanState::OnLoan(name) => Some(name),
        }
    }

    pub fn is_on_loan(&self) -> bool {
        matches!(self, LoanState::OnLoan(_))
    }

    pub fn borrow(&mut self, borrower: &str) -> Result<()> {
        let borrower = normalize::text("borrower", borrower)?;
        match self {
            LoanState::OnLoan(current) => Err(DrillError::InvalidState(format!(
                "already on loan to {}",
                current
            ))),
            LoanState::Available => {
                *self = LoanState::OnLoan(borrower);
                Ok(())
            }
        }
    }

    pub fn give_back(&mut self) -> Result<()> {
        match self {
            LoanState::Available => Err(DrillError::InvalidState("not on loan".to_string())),
            LoanState::OnLoan(_) => {
                *self = LoanState::Available;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(rename = "borrowed_by")]
    pub loan: LoanState,
}

impl Book {
    pub fn new(id: &str, title: &str) -> Result<Self> {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            loan: LoanState::Available,
        }
        .normalized()
    }
}

impl Record for Book {
    const KIND: &'static str = "book";

    fn key(&self) -> &str {
        &self.id
    }

    fn from_raw(raw: &Value) -> Result<Self> {
        let map = normalize::as_object(Self::KIND, raw)?;
        let id = normalize::text_field(map, "id")?;
        let title = normalize::text_field(map, "title")?;
        let loan = match normalize::optional_text_field(map, "borrowed_by")? {
            Some(name) => LoanState::OnLoan(name),
            None => LoanState::Available,
        };
        Ok(Self { id, title, loan })
    }

    fn normalized(self) -> Result<Self> {
        let loan = match self.loan {
            LoanState::Available => LoanState::Available,
            LoanState::OnLoan(name) => LoanState::OnLoan(normalize::text("borrowed_by", &name)?),
        };
        Ok(Self {
            id: normalize::text("id", &self.id)?,
            title: normalize::text("title", &self.title)?,
            loan,
        })
    }

    /// Re-adding a book updates its title; the loan is untouched.
    fn merge(&mut self, incoming: Self) -> Result<()> {
        self.title = incoming.title;
        Ok(())
    }

    fn search_text(&self) -> &str {
        &self.title
    }
}

/// A single line in the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task(String);

impl Task {
    pub fn parse(text: &str) -> Result<Self> {
        normalize::text("task", text).map(Task)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

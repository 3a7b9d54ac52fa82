use crate::error::Result;
use crate::filter::filter;
use crate::model::Record;
use crate::normalize::{collapse_whitespace, same_key};
use crate::store::DataStore;

/// Position of the record whose key matches `key`, case-insensitively.
pub fn position_of<R: Record>(records: &[R], key: &str) -> Option<usize> {
    records.iter().position(|r| same_key(r.key(), key))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Added,
    Merged,
}

/// Appends `incoming` or merges it into the record with the same key, then
/// persists the whole collection. A failed merge leaves the store untouched.
/// Returns the stored record.
pub fn upsert<R: Record, S: DataStore<R>>(store: &mut S, incoming: R) -> Result<(R, Upserted)> {
    let mut records = store.load()?;
    let (stored, outcome) = match position_of(&records, incoming.key()) {
        Some(index) => {
            records[index].merge(incoming)?;
            (records[index].clone(), Upserted::Merged)
        }
        None => {
            records.push(incoming.clone());
            (incoming, Upserted::Added)
        }
    };
    store.save(&records)?;
    Ok((stored, outcome))
}

/// Records whose search text contains `query`, ignoring case and extra
/// whitespace. A blank query matches nothing.
pub fn search<R: Record>(records: &[R], query: &str) -> Vec<R> {
    let needle = collapse_whitespace(query).to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    filter(records, |r| {
        collapse_whitespace(r.search_text())
            .to_lowercase()
            .contains(&needle)
    })
}

//! User profile card.
//!
//! Name and age are checked strictly and fail the whole card. Hobbies and
//! social handles are cleaned instead: entries that break a rule are left out
//! and reported back so the caller can warn about them.

use crate::error::{DrillError, Result};
use crate::normalize::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::RangeInclusive;

pub const NAME_LENGTH: RangeInclusive<usize> = 2..=60;
pub const MAX_AGE: u8 = 120;
pub const MAX_HOBBY_LENGTH: usize = 30;
pub const MAX_HANDLE_LENGTH: usize = 50;

/// Networks whose handles are shown with a leading `@`.
const AT_HANDLES: [&str; 3] = ["twitter", "instagram", "tiktok"];

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ' -]+$").expect("name pattern is valid")
});

static HOBBY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ0-9' _-]+$").expect("hobby pattern is valid")
});

static NETWORK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]{1,29}$").expect("network pattern is valid"));

pub fn validate_name(name: &str) -> Result<String> {
    let clean = collapse_whitespace(name);
    if clean.is_empty() {
        return Err(DrillError::Validation("name: empty field".to_string()));
    }
    if !NAME_PATTERN.is_match(&clean) {
        return Err(DrillError::Validation(
            "name: only letters, spaces, hyphens and apostrophes are allowed".to_string(),
        ));
    }
    if !NAME_LENGTH.contains(&clean.chars().count()) {
        return Err(DrillError::Validation(format!(
            "name: must be {} to {} characters long",
            NAME_LENGTH.start(),
            NAME_LENGTH.end()
        )));
    }
    Ok(clean)
}

pub fn validate_age(age: i64) -> Result<u8> {
    u8::try_from(age)
        .ok()
        .filter(|age| *age <= MAX_AGE)
        .ok_or_else(|| DrillError::Validation(format!("age: must be between 0 and {}", MAX_AGE)))
}

/// Result of a cleaning pass: what survived, and what was left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cleaned<T> {
    pub kept: T,
    pub dropped: Vec<String>,
}

/// Trims hobbies and keeps the first spelling of each, ignoring case.
/// Blank entries vanish; overlong or oddly-charactered ones are dropped.
pub fn clean_hobbies<S: AsRef<str>>(hobbies: &[S]) -> Cleaned<Vec<String>> {
    let mut seen = HashSet::new();
    let mut cleaned: Cleaned<Vec<String>> = Cleaned::default();
    for hobby in hobbies {
        let item = hobby.as_ref().trim();
        if item.is_empty() {
            continue;
        }
        if item.chars().count() > MAX_HOBBY_LENGTH || !HOBBY_PATTERN.is_match(item) {
            cleaned.dropped.push(item.to_string());
            continue;
        }
        if seen.insert(item.to_lowercase()) {
            cleaned.kept.push(item.to_string());
        }
    }
    cleaned
}

/// Normalizes `network=handle` pairs. Keys are lower-cased with spaces
/// removed; a later pair for the same network replaces an earlier one.
pub fn clean_networks(pairs: &[(String, String)]) -> Cleaned<BTreeMap<String, String>> {
    let mut cleaned: Cleaned<BTreeMap<String, String>> = Cleaned::default();
    for (key, handle) in pairs {
        let key = key.trim();
        let handle = handle.trim();
        if key.is_empty() || handle.is_empty() {
            if !key.is_empty() || !handle.is_empty() {
                cleaned.dropped.push(format!("{}={}", key, handle));
            }
            continue;
        }

        let network = key.to_lowercase().replace(' ', "");
        if !NETWORK_PATTERN.is_match(&network) {
            cleaned.dropped.push(format!("{}={}", key, handle));
            continue;
        }
        let handle = if AT_HANDLES.contains(&network.as_str()) && !handle.starts_with('@') {
            format!("@{}", handle)
        } else {
            handle.to_string()
        };
        if handle.chars().count() > MAX_HANDLE_LENGTH {
            cleaned.dropped.push(format!("{}={}", key, handle));
            continue;
        }
        cleaned.kept.insert(network, handle);
    }
    cleaned
}

/// Splits a `network=handle` token as typed on the command line.
pub fn parse_network(token: &str) -> Result<(String, String)> {
    token
        .split_once('=')
        .map(|(key, handle)| (key.to_string(), handle.to_string()))
        .ok_or_else(|| {
            DrillError::Validation(format!(
                "malformed entry '{}', expected network=handle",
                token
            ))
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub hobbies: Vec<String>,
    /// Keyed by network, so the card lists them sorted.
    pub networks: BTreeMap<String, String>,
}

impl Profile {
    /// Builds a card. Returns it with the hobby and network entries that
    /// were left out.
    pub fn build<S: AsRef<str>>(
        name: &str,
        age: i64,
        hobbies: &[S],
        networks: &[(String, String)],
    ) -> Result<(Self, Vec<String>)> {
        let name = validate_name(name)?;
        let age = validate_age(age)?;
        let hobbies = clean_hobbies(hobbies);
        let networks = clean_networks(networks);

        let mut dropped = hobbies.dropped;
        dropped.extend(networks.dropped);
        let profile = Self {
            name,
            age,
            hobbies: hobbies.kept,
            networks: networks.kept,
        };
        Ok((profile, dropped))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hobbies = if self.hobbies.is_empty() {
            "none".to_string()
        } else {
            self.hobbies.join(", ")
        };
        let networks = if self.networks.is_empty() {
            "none".to_string()
        } else {
            self.networks
                .iter()
                .map(|(network, handle)| format!("{}={}", network, handle))
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(f, "User profile")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Hobbies: {}", hobbies)?;
        write!(f, "Social networks: {}", networks)
    }
}

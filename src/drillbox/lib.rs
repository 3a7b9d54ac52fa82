//! # Drillbox Architecture
//!
//! Drillbox is a **UI-agnostic library of small data drills**: a JSON-backed
//! inventory, a lending library, a task list, a CSV column analyzer, a course
//! report generator and a handful of functional one-liners. The binary is one
//! client of that library, nothing more.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, owns stdout/stderr     │
//! │  - Initialises logging, maps errors to exit codes           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, generic over the stores       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Read, validate, mutate, persist. Returns CmdResult       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: JsonFileStore, InMemoryStore            │
//! │  - LineStore for newline-delimited task files               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load leniency, save strictness
//!
//! Every record passes through [`model::Record::from_raw`] on its way in.
//! Loading is forgiving: a missing or corrupt file is an empty store and a
//! record that fails normalization is dropped, so a hand-edited file never
//! locks the user out. Saving is strict: one invalid record fails the whole
//! save and the file on disk is left as it was. Both halves live in
//! [`store::decode_records`] and [`store::encode_records`].
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never prints and never exits. Errors are
//! [`error::DrillError`] values; user-facing notes travel as
//! [`commands::CmdMessage`]s inside a [`commands::CmdResult`].
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by the CLI
//! - [`commands`]: business logic per drill
//! - [`store`]: persistence
//! - [`model`]: records and the loan state machine
//! - [`normalize`]: whitespace and numeric coercion helpers
//! - [`filter`]: the generic predicate filter and stock predicates
//! - [`drills`]: standalone calculations (BMI, VAT, folds, ...)
//! - [`config`]: `config.json` handling
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod drills;
pub mod error;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod store;

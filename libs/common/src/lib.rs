//! Common library for the planner application
//!
//! This crate provides shared functionality used by the planner services,
//! including the file-backed record store and error handling.

pub mod error;
pub mod store;


/// Example usage of the store module
///
/// ```rust,no_run
/// use common::store::{JsonStore, Record};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Entry {
///     name: String,
/// }
///
/// impl Record for Entry {
///     fn key(&self) -> &str {
///         &self.name
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let store: JsonStore<Entry> = JsonStore::new("data/entries.json");
///     let entries = store.load_all().await;
///     println!("{} entries", entries.len());
/// }
/// ```
pub fn example_usage() {}

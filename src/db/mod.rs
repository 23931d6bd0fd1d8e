//! Storage layer (JSON files).

pub mod json_store;

pub use json_store::JsonStore;

/// File names inside the data directory.
pub mod files {
    pub const TOKENS: &str = "tokens.json";
    pub const EXPENSES: &str = "expenses.json";
}

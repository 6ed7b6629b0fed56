//! # Recipe finder
//!
//! Browse a small recipe catalog: text search with suggestions, cuisine and
//! diet filters, favorites and a shopping list that survive restarts.
//!
//! The crate is the core a front end drives. [app::AppState] owns all state;
//! front ends call into it and re-render from what it returns.

/*--- Modules ------------------------------------------------------------------------------------*/

pub mod app;
pub mod catalog;
pub mod config;
pub mod data_store;
pub mod error;
pub mod filter;
pub mod recipe;
pub mod remote;
pub mod text_suggest;

/*--- Re-exports ---------------------------------------------------------------------------------*/

pub use app::{AppState, Notice, VoiceInput};
pub use catalog::Catalog;
pub use config::Config;
pub use data_store::{FileStore, KeyValueStore, MemoryStore, PersistedSet};
pub use error::{Error, Result};
pub use filter::{filter, FilterState, ALL_CUISINES};
pub use recipe::Recipe;
pub use text_suggest::{suggest, Suggestion};

/*--------------------------------------------- EOF ----------------------------------------------*/

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::storage::LocalStorage;
pub use config::Settings;
pub use core::store::{InventoryStore, RemoveOutcome, DEFAULT_LOW_STOCK_THRESHOLD};
pub use domain::model::{Inventory, LoadOutcome, Quantity};
pub use utils::error::{InventoryError, Result};

pub mod codec;
pub mod store;

pub use crate::domain::model::{Inventory, LoadOutcome, Quantity};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;

use crate::domain::model::Quantity;
use crate::utils::error::{InventoryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Checks the arguments shared by every stock mutation.
pub fn validate_stock_input(item: &str, quantity: Quantity) -> Result<()> {
    validate_item_name(item)?;
    if !quantity.is_finite() {
        return Err(InventoryError::validation(format!(
            "quantity for '{}' must be a finite number, got {}",
            item, quantity
        )));
    }
    Ok(())
}

pub fn validate_item_name(item: &str) -> Result<()> {
    if item.is_empty() {
        return Err(InventoryError::validation("item name cannot be empty"));
    }
    Ok(())
}

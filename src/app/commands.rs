use crate::config::Settings;
use crate::core::store::{InventoryStore, RemoveOutcome};
use crate::domain::model::Quantity;
use crate::utils::error::{InventoryError, Result};
use std::io::Write;

/// Opens the configured data file. A missing file is a fresh, empty
/// inventory; a damaged one is an error so it never gets overwritten.
pub fn open_store(settings: &Settings) -> Result<InventoryStore> {
    match InventoryStore::try_load(&settings.data_file) {
        Ok(inventory) => Ok(InventoryStore::from_inventory(inventory)),
        Err(InventoryError::NotFound { .. }) => {
            tracing::info!("Starting a new inventory at {}", settings.data_file);
            Ok(InventoryStore::new())
        }
        Err(e) => Err(e),
    }
}

/// The fixed walkthrough: seed, remove, query, save, reload and report.
pub fn run_demo<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    let mut store = InventoryStore::new();
    store.add("apple", 10)?;
    store.add("banana", 2)?;
    store.add("grape", 0)?;
    store.remove("apple", 3)?;
    store.remove("orange", 1)?;

    writeln!(out, "Apple stock: {}", store.get_quantity("apple"))?;
    writeln!(
        out,
        "Low items: {:?}",
        store.list_low_stock(settings.low_stock_threshold)
    )?;

    if store.save(&settings.data_file).is_err() {
        writeln!(out, "Could not save inventory to {}", settings.data_file)?;
    }
    store.reload(&settings.data_file);
    store.write_report(out)?;

    tracing::info!("Demonstration finished");
    Ok(())
}

pub fn run_add<W: Write>(settings: &Settings, item: &str, quantity: Quantity, out: &mut W) -> Result<()> {
    let mut store = open_store(settings)?;
    store.add(item, quantity)?;
    store.save(&settings.data_file)?;
    writeln!(out, "{}: {}", item, store.get_quantity(item))?;
    Ok(())
}

pub fn run_remove<W: Write>(
    settings: &Settings,
    item: &str,
    quantity: Quantity,
    out: &mut W,
) -> Result<()> {
    let mut store = open_store(settings)?;
    match store.remove(item, quantity)? {
        RemoveOutcome::Decreased(remaining) => {
            store.save(&settings.data_file)?;
            writeln!(out, "{}: {}", item, remaining)?;
        }
        RemoveOutcome::Removed => {
            store.save(&settings.data_file)?;
            writeln!(out, "{}: removed", item)?;
        }
        RemoveOutcome::NotFound => {
            writeln!(out, "{}: not in inventory", item)?;
        }
    }
    Ok(())
}

pub fn run_get<W: Write>(settings: &Settings, item: &str, out: &mut W) -> Result<()> {
    let store = open_store(settings)?;
    writeln!(out, "{}", store.get_quantity(item))?;
    Ok(())
}

pub fn run_low_stock<W: Write>(
    settings: &Settings,
    threshold: Option<Quantity>,
    out: &mut W,
) -> Result<()> {
    let store = open_store(settings)?;
    let threshold = threshold.unwrap_or(settings.low_stock_threshold);
    for item in store.list_low_stock(threshold) {
        writeln!(out, "{}: {}", item, store.get_quantity(&item))?;
    }
    Ok(())
}

pub fn run_report<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    let store = open_store(settings)?;
    store.write_report(out)?;
    Ok(())
}

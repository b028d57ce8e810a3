use crate::adapters::storage::LocalStorage;
use crate::core::codec;
use crate::domain::model::{Inventory, LoadOutcome, Quantity};
use crate::domain::ports::Storage;
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{validate_item_name, validate_stock_input};
use chrono::Local;
use std::io::{self, Write};

pub const DEFAULT_LOW_STOCK_THRESHOLD: Quantity = Quantity::Int(5);
pub const DEFAULT_DATA_FILE: &str = "inventory.json";

pub const REPORT_BANNER: &str = "=== Inventory Report ===";

/// What `remove` did to the stored entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoveOutcome {
    Decreased(Quantity),
    Removed,
    NotFound,
}

/// Owns one inventory. Independent stores never share state.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    inventory: Inventory,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_inventory(inventory: Inventory) -> Self {
        Self { inventory }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn replace(&mut self, inventory: Inventory) {
        self.inventory = inventory;
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    pub fn add(&mut self, item: &str, quantity: impl Into<Quantity>) -> Result<()> {
        self.add_entry(item, quantity.into(), None)
    }

    /// Like [`add`](Self::add), and on success appends a timestamped
    /// human-readable line to `log`.
    pub fn add_with_log(
        &mut self,
        item: &str,
        quantity: impl Into<Quantity>,
        log: &mut Vec<String>,
    ) -> Result<()> {
        self.add_entry(item, quantity.into(), Some(log))
    }

    fn add_entry(
        &mut self,
        item: &str,
        quantity: Quantity,
        log: Option<&mut Vec<String>>,
    ) -> Result<()> {
        if let Err(e) = validate_stock_input(item, quantity) {
            tracing::warn!("Invalid input for add: item={:?}, quantity={}", item, quantity);
            return Err(e);
        }

        let current = self.inventory.get(item).unwrap_or(Quantity::ZERO);
        let updated = current + quantity;
        if !updated.is_finite() {
            tracing::warn!("Adding {} to '{}' overflows its quantity", quantity, item);
            return Err(InventoryError::validation(format!(
                "adding {} to '{}' overflows its quantity",
                quantity, item
            )));
        }

        self.inventory.set(item, updated)?;
        if let Some(log) = log {
            log.push(format!("{}: Added {} of {}", Local::now(), quantity, item));
        }
        tracing::info!("Added {} of {}", quantity, item);
        Ok(())
    }

    /// Decreases an item, deleting it once its quantity reaches zero or below.
    pub fn remove(&mut self, item: &str, quantity: impl Into<Quantity>) -> Result<RemoveOutcome> {
        let quantity = quantity.into();
        if let Err(e) = validate_stock_input(item, quantity) {
            tracing::warn!("Invalid input for remove: item={:?}, quantity={}", item, quantity);
            return Err(e);
        }

        let Some(current) = self.inventory.get(item) else {
            tracing::warn!("Attempted to remove non-existent item '{}'", item);
            return Ok(RemoveOutcome::NotFound);
        };

        let remaining = current - quantity;
        if remaining.is_depleted() {
            self.inventory.remove(item);
            tracing::info!("Removed item '{}' from inventory", item);
            return Ok(RemoveOutcome::Removed);
        }

        if !remaining.is_finite() {
            tracing::warn!("Removing {} from '{}' overflows its quantity", quantity, item);
            return Err(InventoryError::validation(format!(
                "removing {} from '{}' overflows its quantity",
                quantity, item
            )));
        }

        self.inventory.set(item, remaining)?;
        tracing::info!("Decreased '{}' by {} units", item, quantity);
        Ok(RemoveOutcome::Decreased(remaining))
    }

    /// Stored quantity, or zero when the item is absent or the name invalid.
    pub fn get_quantity(&self, item: &str) -> Quantity {
        if validate_item_name(item).is_err() {
            tracing::warn!("Invalid item name for get_quantity: {:?}", item);
            return Quantity::ZERO;
        }
        self.inventory.get(item).unwrap_or(Quantity::ZERO)
    }

    /// Items strictly below `threshold`, in insertion order.
    pub fn list_low_stock(&self, threshold: impl Into<Quantity>) -> Vec<String> {
        let threshold = threshold.into();
        if !threshold.is_finite() {
            tracing::warn!("Invalid low-stock threshold: {}", threshold);
            return Vec::new();
        }

        let low_items: Vec<String> = self
            .inventory
            .iter()
            .filter(|(_, quantity)| *quantity < threshold)
            .map(|(item, _)| item.to_string())
            .collect();

        if !low_items.is_empty() {
            tracing::info!("Items below threshold {}: {:?}", threshold, low_items);
        }
        low_items
    }

    /// Reads an inventory file, degrading every failure to an empty
    /// inventory. Never touches the store itself.
    pub fn load(path: &str) -> Inventory {
        Self::load_from(&LocalStorage::default(), path)
    }

    pub fn load_from<S: Storage>(storage: &S, path: &str) -> Inventory {
        Self::load_outcome_from(storage, path).into_inventory()
    }

    pub fn load_outcome(path: &str) -> LoadOutcome {
        Self::load_outcome_from(&LocalStorage::default(), path)
    }

    pub fn load_outcome_from<S: Storage>(storage: &S, path: &str) -> LoadOutcome {
        match Self::try_load_from(storage, path) {
            Ok(inventory) => LoadOutcome::Loaded(inventory),
            Err(InventoryError::NotFound { .. }) => LoadOutcome::Missing,
            Err(InventoryError::MalformedJson { message, .. }) => LoadOutcome::Malformed(message),
            Err(e) => LoadOutcome::Failed(e.to_string()),
        }
    }

    pub fn try_load(path: &str) -> Result<Inventory> {
        Self::try_load_from(&LocalStorage::default(), path)
    }

    pub fn try_load_from<S: Storage>(storage: &S, path: &str) -> Result<Inventory> {
        let data = match storage.read_file(path) {
            Ok(data) => data,
            Err(InventoryError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("Inventory file not found: {}", path);
                return Err(InventoryError::NotFound {
                    path: path.to_string(),
                });
            }
            Err(e) => {
                tracing::error!("Error loading file {}: {}", path, e);
                return Err(e);
            }
        };

        let (inventory, rejected) = match codec::decode(&data, path) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::error!("{}", e);
                return Err(e);
            }
        };

        for item in &rejected {
            tracing::warn!("Skipping '{}' in {}: quantity is not a number", item, path);
        }
        tracing::info!("Inventory data loaded from {} ({} items)", path, inventory.len());
        Ok(inventory)
    }

    /// Loads `path` and adopts the result only if it is non-empty.
    /// Returns whether the store was replaced.
    pub fn reload(&mut self, path: &str) -> bool {
        self.reload_from(&LocalStorage::default(), path)
    }

    pub fn reload_from<S: Storage>(&mut self, storage: &S, path: &str) -> bool {
        let loaded = Self::load_from(storage, path);
        if loaded.is_empty() {
            return false;
        }
        self.inventory = loaded;
        true
    }

    /// Overwrites `path` with the pretty-printed inventory. Failures are
    /// logged and handed back.
    pub fn save(&self, path: &str) -> Result<()> {
        self.save_to(&LocalStorage::default(), path)
    }

    pub fn save_to<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let result = codec::encode(&self.inventory).and_then(|data| storage.write_file(path, &data));
        match &result {
            Ok(()) => tracing::info!("Inventory data saved to {}", path),
            Err(e) => tracing::error!("Error saving inventory data to {}: {}", path, e),
        }
        result
    }

    pub fn report(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_report(&mut handle)?;
        Ok(())
    }

    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        tracing::info!("Printing inventory report ({} items)", self.inventory.len());
        writeln!(out)?;
        writeln!(out, "{}", REPORT_BANNER)?;
        for (item, quantity) in self.inventory.iter() {
            writeln!(out, "{}: {}", item, quantity)?;
        }
        Ok(())
    }
}

impl From<Inventory> for InventoryStore {
    fn from(inventory: Inventory) -> Self {
        Self::from_inventory(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
        fail_writes: bool,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let storage = Self::default();
            storage.files.borrow_mut().insert(path.to_string(), data.to_vec());
            storage
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                InventoryError::IoError(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail_writes {
                return Err(InventoryError::IoError(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "read-only storage",
                )));
            }
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn seeded() -> InventoryStore {
        let mut store = InventoryStore::new();
        store.add("a", 3).unwrap();
        store.add("b", 10).unwrap();
        store.add("c", 4).unwrap();
        store
    }

    #[test]
    fn test_add_accumulates() {
        let mut store = InventoryStore::new();
        store.add("apple", 10).unwrap();
        store.add("apple", 2.5).unwrap();
        assert_eq!(store.get_quantity("apple"), Quantity::Float(12.5));
    }

    #[test]
    fn test_add_zero_makes_item_present() {
        let mut store = InventoryStore::new();
        let before = store.get_quantity("grape");

        store.add("grape", 0).unwrap();

        assert_eq!(store.get_quantity("grape"), before);
        assert!(store.contains("grape"));
    }

    #[test]
    fn test_add_rejects_invalid_input_without_mutation() {
        let mut store = InventoryStore::new();
        assert!(matches!(
            store.add("", 3),
            Err(InventoryError::ValidationError { .. })
        ));
        assert!(store.add("apple", f64::NAN).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_overflow_is_rejected() {
        let mut store = InventoryStore::new();
        store.add("apple", f64::MAX).unwrap();
        assert!(store.add("apple", f64::MAX).is_err());
        assert_eq!(store.get_quantity("apple"), Quantity::Float(f64::MAX));
    }

    #[test]
    fn test_add_with_log_appends_entry() {
        let mut store = InventoryStore::new();
        let mut log = Vec::new();

        store.add_with_log("apple", 4, &mut log).unwrap();
        assert!(store.add_with_log("", 4, &mut log).is_err());

        assert_eq!(log.len(), 1);
        assert!(log[0].ends_with(": Added 4 of apple"));
    }

    #[test]
    fn test_remove_decreases() {
        let mut store = seeded();
        assert_eq!(store.remove("b", 4).unwrap(), RemoveOutcome::Decreased(Quantity::Int(6)));
        assert_eq!(store.get_quantity("b"), Quantity::Int(6));
    }

    #[test]
    fn test_remove_exact_and_excess_deletes() {
        let mut store = seeded();
        assert_eq!(store.remove("a", 3).unwrap(), RemoveOutcome::Removed);
        assert_eq!(store.remove("c", 5).unwrap(), RemoveOutcome::Removed);

        assert!(!store.contains("a"));
        assert!(!store.contains("c"));
        assert_eq!(store.get_quantity("c"), Quantity::ZERO);
        assert!(store.list_low_stock(1000).iter().all(|item| item == "b"));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = InventoryStore::new();
        assert_eq!(store.remove("unknown", 5).unwrap(), RemoveOutcome::NotFound);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_rejects_invalid_input() {
        let mut store = seeded();
        assert!(store.remove("", 1).is_err());
        assert!(store.remove("a", f64::INFINITY).is_err());
        assert_eq!(store.get_quantity("a"), Quantity::Int(3));
    }

    #[test]
    fn test_whitespace_names_are_ordinary_items() {
        let mut store = InventoryStore::new();
        store.add(" ", 3).unwrap();
        store.add("\t", 1.5).unwrap();

        assert_eq!(store.get_quantity(" "), Quantity::Int(3));
        assert_eq!(store.remove("\t", 1).unwrap(), RemoveOutcome::Decreased(Quantity::Float(0.5)));
        assert_eq!(store.inventory().item_names(), vec![" ", "\t"]);
    }

    #[test]
    fn test_get_quantity_invalid_name_is_zero() {
        let store = seeded();
        assert_eq!(store.get_quantity(""), Quantity::ZERO);
    }

    #[test]
    fn test_list_low_stock_threshold() {
        let store = seeded();
        assert_eq!(store.list_low_stock(DEFAULT_LOW_STOCK_THRESHOLD), vec!["a", "c"]);
        assert!(store.list_low_stock(3).is_empty());
        assert!(store.list_low_stock(f64::NAN).is_empty());
    }

    #[test]
    fn test_save_and_load_through_storage() {
        let storage = MockStorage::default();
        let store = seeded();

        store.save_to(&storage, "inv.json").unwrap();
        let loaded = InventoryStore::load_from(&storage, "inv.json");

        assert_eq!(&loaded, store.inventory());
        assert_eq!(loaded.item_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_finite_entries_never_reach_the_file() {
        let storage = MockStorage::default();
        let store = InventoryStore::from_inventory(
            [("x", Quantity::Float(f64::NAN)), ("y", Quantity::Int(1))]
                .into_iter()
                .collect(),
        );

        assert!(!store.contains("x"));
        assert_eq!(store.list_low_stock(5), vec!["y"]);
        store.save_to(&storage, "inv.json").unwrap();
        assert_eq!(storage.get_file("inv.json").unwrap(), b"{\n    \"y\": 1\n}");
    }

    #[test]
    fn test_save_failure_is_returned() {
        let storage = MockStorage::failing();
        let err = seeded().save_to(&storage, "inv.json").unwrap_err();
        assert!(matches!(err, InventoryError::IoError(_)));
        assert!(storage.get_file("inv.json").is_none());
    }

    #[test]
    fn test_load_outcomes_are_distinguishable() {
        let storage = MockStorage::with_file("bad.json", b"not json");

        assert_eq!(InventoryStore::load_outcome_from(&storage, "none.json"), LoadOutcome::Missing);
        assert!(matches!(
            InventoryStore::load_outcome_from(&storage, "bad.json"),
            LoadOutcome::Malformed(_)
        ));
        assert!(InventoryStore::load_from(&storage, "bad.json").is_empty());
        assert!(matches!(
            InventoryStore::try_load_from(&storage, "none.json"),
            Err(InventoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_reload_adopts_only_non_empty() {
        let storage = MockStorage::with_file("empty.json", b"{}");
        let mut store = seeded();

        assert!(!store.reload_from(&storage, "empty.json"));
        assert!(!store.reload_from(&storage, "missing.json"));
        assert_eq!(store.len(), 3);

        InventoryStore::from_inventory([("z", Quantity::Int(1))].into_iter().collect())
            .save_to(&storage, "one.json")
            .unwrap();
        assert!(store.reload_from(&storage, "one.json"));
        assert_eq!(store.inventory().item_names(), vec!["z"]);
    }

    #[test]
    fn test_write_report() {
        let mut store = InventoryStore::new();
        store.add("apple", 7).unwrap();
        store.add("banana", 2.5).unwrap();

        let mut out = Vec::new();
        store.write_report(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n=== Inventory Report ===\napple: 7\nbanana: 2.5\n"
        );
        assert!(store.report().is_ok());
    }
}

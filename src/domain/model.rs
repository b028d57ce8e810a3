use crate::utils::error::InventoryError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A stock count. Integers stay integers until they meet a float.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Int(i64),
    Float(f64),
}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            Quantity::Int(n) => n as f64,
            Quantity::Float(f) => f,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Quantity::Int(_) => true,
            Quantity::Float(f) => f.is_finite(),
        }
    }

    pub fn is_depleted(self) -> bool {
        self <= Quantity::ZERO
    }

    /// Integers outside the `i64` range (large unsigned values) come back as
    /// `Float`, so they lose precision on a load/save round trip.
    pub fn from_number(number: &Number) -> Option<Self> {
        if let Some(n) = number.as_i64() {
            return Some(Quantity::Int(n));
        }
        number.as_f64().map(Quantity::Float)
    }

    /// Only `None` for non-finite floats, which never reach an inventory.
    pub fn to_number(self) -> Option<Number> {
        match self {
            Quantity::Int(n) => Some(Number::from(n)),
            Quantity::Float(f) => Number::from_f64(f),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ZERO
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Quantity::Int(n)
    }
}

impl From<i32> for Quantity {
    fn from(n: i32) -> Self {
        Quantity::Int(n.into())
    }
}

impl From<f64> for Quantity {
    fn from(f: f64) -> Self {
        Quantity::Float(f)
    }
}

impl std::ops::Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        match (self, rhs) {
            (Quantity::Int(a), Quantity::Int(b)) => a
                .checked_add(b)
                .map(Quantity::Int)
                .unwrap_or(Quantity::Float(a as f64 + b as f64)),
            (a, b) => Quantity::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl std::ops::Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        match (self, rhs) {
            (Quantity::Int(a), Quantity::Int(b)) => a
                .checked_sub(b)
                .map(Quantity::Int)
                .unwrap_or(Quantity::Float(a as f64 - b as f64)),
            (a, b) => Quantity::Float(a.as_f64() - b.as_f64()),
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Quantity::Int(a), Quantity::Int(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Int(n) => write!(f, "{}", n),
            // keep a decimal point on whole floats so "3.0" never reads as an int
            Quantity::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Quantity::Float(x) => write!(f, "{}", x),
        }
    }
}

impl FromStr for Quantity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Quantity::Int(n));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Quantity::Float(f)),
            _ => Err(format!("'{}' is not a finite number", s)),
        }
    }
}

/// Item name to quantity, in insertion order. Absent means zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: Map<String, Value>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from a decoded JSON object. Entries whose value
    /// is not a number are returned separately instead of being stored.
    pub fn from_json_object(object: Map<String, Value>) -> (Self, Vec<String>) {
        let mut inventory = Inventory::new();
        let mut rejected = Vec::new();
        for (item, value) in object {
            let stored = value
                .as_number()
                .and_then(Quantity::from_number)
                .is_some_and(|quantity| inventory.set(&item, quantity).is_ok());
            if !stored {
                rejected.push(item);
            }
        }
        (inventory, rejected)
    }

    pub fn as_json_object(&self) -> &Map<String, Value> {
        &self.items
    }

    pub fn get(&self, item: &str) -> Option<Quantity> {
        self.items
            .get(item)
            .and_then(Value::as_number)
            .and_then(Quantity::from_number)
    }

    /// Updates in place for existing items, appends otherwise. Non-finite
    /// quantities have no JSON number form and are refused.
    pub fn set(&mut self, item: &str, quantity: Quantity) -> Result<(), InventoryError> {
        let Some(number) = quantity.to_number() else {
            return Err(InventoryError::validation(format!(
                "quantity for '{}' must be a finite number, got {}",
                item, quantity
            )));
        };
        let value = Value::Number(number);
        if let Some(slot) = self.items.get_mut(item) {
            *slot = value;
        } else {
            self.items.insert(item.to_string(), value);
        }
        Ok(())
    }

    pub fn remove(&mut self, item: &str) -> Option<Quantity> {
        self.items
            .shift_remove(item)
            .and_then(|v| v.as_number().and_then(Quantity::from_number))
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> + '_ {
        self.items.iter().filter_map(|(item, value)| {
            value
                .as_number()
                .and_then(Quantity::from_number)
                .map(|q| (item.as_str(), q))
        })
    }

    pub fn item_names(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Quantity)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (S, Quantity)>>(iter: T) -> Self {
        let mut inventory = Inventory::new();
        for (item, quantity) in iter {
            let item: String = item.into();
            if let Err(e) = inventory.set(&item, quantity) {
                tracing::warn!("Skipping '{}': {}", item, e);
            }
        }
        inventory
    }
}

/// Result of reading an inventory file, keeping the failure kinds apart.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Inventory),
    Missing,
    Malformed(String),
    Failed(String),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    pub fn into_inventory(self) -> Inventory {
        match self {
            LoadOutcome::Loaded(inventory) => inventory,
            _ => Inventory::new(),
        }
    }
}

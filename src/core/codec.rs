use crate::domain::model::Inventory;
use crate::utils::error::{InventoryError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

const INDENT: &[u8] = b"    ";

/// Pretty-prints the inventory as a JSON object, four spaces per level,
/// keys in insertion order.
pub fn encode(inventory: &Inventory) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    inventory.as_json_object().serialize(&mut serializer)?;
    Ok(buffer)
}

/// Parses a JSON object of item names to numbers. Returns the inventory and
/// the names of entries skipped because their value was not a number.
pub fn decode(data: &[u8], path: &str) -> Result<(Inventory, Vec<String>)> {
    let value: Value =
        serde_json::from_slice(data).map_err(|e| InventoryError::MalformedJson {
            path: path.to_string(),
            message: e.to_string(),
        })?;

    match value {
        Value::Object(object) => Ok(Inventory::from_json_object(object)),
        other => Err(InventoryError::MalformedJson {
            path: path.to_string(),
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Quantity;

    #[test]
    fn test_encode_uses_four_space_indent_and_insertion_order() {
        let inventory: Inventory = [("zucchini", Quantity::Int(3)), ("apple", Quantity::Float(1.5))]
            .into_iter()
            .collect();

        let text = String::from_utf8(encode(&inventory).unwrap()).unwrap();

        assert_eq!(text, "{\n    \"zucchini\": 3,\n    \"apple\": 1.5\n}");
    }

    #[test]
    fn test_encode_empty() {
        let text = String::from_utf8(encode(&Inventory::new()).unwrap()).unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = decode(b"[1, 2, 3]", "inv.json").unwrap_err();
        match err {
            InventoryError::MalformedJson { path, message } => {
                assert_eq!(path, "inv.json");
                assert!(message.contains("an array"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode(b"{\"apple\": ", "inv.json").unwrap_err();
        assert!(matches!(err, InventoryError::MalformedJson { .. }));
    }

    #[test]
    fn test_decode_keeps_whole_floats_as_floats() {
        let (inventory, rejected) = decode(b"{\"apple\": 3.0, \"pear\": 2}", "inv.json").unwrap();
        assert!(rejected.is_empty());
        assert!(matches!(inventory.get("apple"), Some(Quantity::Float(_))));
        assert!(matches!(inventory.get("pear"), Some(Quantity::Int(2))));
    }
}

//! Boundary loading of the menu and order stores.
//!
//! Both stores are JSON arrays of loosely shaped records. Records are checked
//! here and converted to the typed structs in [`crate::types`]; anything that
//! cannot be converted is skipped with a warning so one bad record never hides
//! the rest of the catalog.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{CatalogItem, HistoryOrder, ItemId, OrderLine};

pub fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::NotFound(format!("catalog file {}", path.display())))
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    parse_catalog(&raw)
}

/// A missing order store is an empty history.
pub fn load_history(path: &Path) -> Result<Vec<HistoryOrder>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no order history file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    parse_history(&raw)
}

pub fn parse_catalog(json: &str) -> Result<Vec<CatalogItem>> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match catalog_item(record) {
            Ok(item) => {
                if !seen.insert(item.id.clone()) {
                    warn!(position, id = %item.id, "skipping catalog record with duplicate id");
                    continue;
                }
                items.push(item);
            }
            Err(e) => warn!(position, error = %e, "skipping catalog record"),
        }
    }
    Ok(items)
}

pub fn parse_history(json: &str) -> Result<Vec<HistoryOrder>> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    let mut orders = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match history_order(record) {
            Ok(order) => orders.push(order),
            Err(e) => warn!(position, error = %e, "skipping order record"),
        }
    }
    Ok(orders)
}

fn catalog_item(record: &Value) -> Result<CatalogItem> {
    let obj = as_object(record)?;
    let id = obj
        .get("id")
        .and_then(item_id)
        .ok_or_else(|| Error::InvalidRecord("missing or non-scalar id".to_string()))?;
    let name = required_text(obj, "name")?;
    let category = required_text(obj, "category")?;
    let price = obj
        .get("price")
        .and_then(number)
        .filter(|p| p.is_finite())
        .ok_or_else(|| Error::InvalidRecord(format!("item {id}: price is not a number")))?;
    let veg = obj.get("veg").and_then(Value::as_bool).unwrap_or(false);

    Ok(CatalogItem {
        id,
        name,
        category,
        veg,
        price,
        image: optional_text(obj, "image"),
        notes: optional_text(obj, "notes"),
    })
}

fn history_order(record: &Value) -> Result<HistoryOrder> {
    let obj = as_object(record)?;
    let items = match obj.get("items") {
        Some(Value::Array(lines)) => lines.iter().filter_map(order_line).collect(),
        _ => Vec::new(),
    };
    Ok(HistoryOrder {
        id: obj.get("id").and_then(item_id).map(|id| id.to_string()),
        items,
        total: obj.get("total").and_then(number),
        created_at: obj.get("createdAt").and_then(timestamp),
    })
}

fn order_line(value: &Value) -> Option<OrderLine> {
    let obj = value.as_object()?;
    let Some(id) = obj.get("id").and_then(item_id) else {
        debug!("dropping order line without id");
        return None;
    };
    Some(OrderLine {
        id,
        name: optional_text(obj, "name"),
        qty: obj.get("qty").and_then(Value::as_u64).and_then(|q| u32::try_from(q).ok()),
        price: obj.get("price").and_then(number),
        veg: obj.get("veg").and_then(Value::as_bool),
    })
}

fn as_object(record: &Value) -> Result<&Map<String, Value>> {
    record
        .as_object()
        .ok_or_else(|| Error::InvalidRecord("record is not an object".to_string()))
}

fn item_id(value: &Value) -> Option<ItemId> {
    match value {
        Value::Number(n) => n.as_i64().map(ItemId::Int),
        Value::String(s) if !s.is_empty() => Some(ItemId::Text(s.clone())),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn required_text(obj: &Map<String, Value>, key: &str) -> Result<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidRecord(format!("missing {key}")))
}

fn optional_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// ISO-8601 strings (what the order forms write) or epoch milliseconds.
fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_price_is_accepted() {
        let items = parse_catalog(r#"[{"id":"dish_1","name":"Dal","category":"Curry","veg":true,"price":"80"}]"#)
            .expect("parse");
        assert_eq!(items[0].price, 80.0);
    }

    #[test]
    fn empty_image_is_none() {
        let items = parse_catalog(r#"[{"id":1,"name":"Dal","category":"Curry","price":80,"image":""}]"#)
            .expect("parse");
        assert_eq!(items[0].image, None);
        assert!(!items[0].veg, "veg defaults to false");
    }

    #[test]
    fn timestamps_parse_both_forms() {
        let iso = timestamp(&Value::String("2024-03-01T12:00:00.000Z".into())).expect("iso");
        let ms = timestamp(&Value::from(iso.timestamp_millis())).expect("ms");
        assert_eq!(iso, ms);
    }
}

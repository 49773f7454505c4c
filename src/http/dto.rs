//! Request body parsing.
//!
//! Bodies are read as raw JSON and checked field by field. Numbers must be JSON integers in
//! range: numeric strings, floats and negative values are rejected rather than coerced.

use serde_json::{Map, Value};

use crate::model::{ProductCreate, ProductUpdate};
use crate::product_actor::{ProductError, Quantity};

/// Parses a request body. An empty body is `Null`.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ProductError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|_| ProductError::validation("Malformed JSON body"))
}

fn as_object(body: &Value) -> Result<Option<&Map<String, Value>>, ProductError> {
    match body {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(ProductError::validation("Request body must be a JSON object")),
    }
}

/// Reads an optional non-negative `u32` field. Absent and `null` are both `None`.
fn u32_field(map: &Map<String, Value>, key: &str) -> Result<Option<u32>, ()> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or(()),
    }
}

fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, ()> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(()),
    }
}

/// `{ "quantity": n }` for the stock endpoints. A missing body or field means the default.
pub fn quantity(body: &Value) -> Result<Option<Quantity>, ProductError> {
    let Some(map) = as_object(body)? else {
        return Ok(None);
    };
    u32_field(map, "quantity")
        .map(|q| q.map(Quantity::new))
        .map_err(|_| ProductError::validation("Invalid quantity"))
}

/// One product or an array of products, for the create endpoint.
///
/// Errors name the offending entry by its 1-based position.
pub fn product_batch(
    body: &Value,
    default_threshold: u32,
) -> Result<Vec<ProductCreate>, ProductError> {
    let entries: Vec<&Value> = match body {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![body],
        _ => {
            return Err(ProductError::validation(
                "Request body must be a product object or an array of products",
            ))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            product_create(entry, default_threshold)
                .map_err(|msg| ProductError::Validation(format!("Product {}: {}", i + 1, msg)))
        })
        .collect()
}

fn product_create(entry: &Value, default_threshold: u32) -> Result<ProductCreate, String> {
    let Value::Object(map) = entry else {
        return Err("Expected a product object".to_string());
    };
    let required = "Name and description are required";
    let name = string_field(map, "name").map_err(|_| required.to_string())?;
    let description = string_field(map, "description").map_err(|_| required.to_string())?;
    let (Some(name), Some(description)) = (name, description) else {
        return Err(required.to_string());
    };

    let stock = u32_field(map, "stock_quantity").map_err(|_| "Invalid stock quantity".to_string())?;
    let threshold = u32_field(map, "low_stock_threshold")
        .map_err(|_| "Invalid low_stock_threshold".to_string())?;

    let params = ProductCreate::new(name, description)
        .with_stock(stock.unwrap_or(0))
        .with_threshold(threshold.unwrap_or(default_threshold));
    params.validate()?;
    Ok(params)
}

/// Field update. Fields other than name, description and threshold are ignored.
pub fn product_update(body: &Value) -> Result<ProductUpdate, ProductError> {
    let Some(map) = as_object(body)? else {
        return Err(ProductError::validation("No fields to update"));
    };
    let name = string_field(map, "name").map_err(|_| ProductError::validation("Invalid name"))?;
    let description = string_field(map, "description")
        .map_err(|_| ProductError::validation("Invalid description"))?;
    let low_stock_threshold = u32_field(map, "low_stock_threshold")
        .map_err(|_| ProductError::validation("Invalid low_stock_threshold"))?;

    Ok(ProductUpdate {
        name: name.map(str::to_string),
        description: description.map(str::to_string),
        low_stock_threshold,
    })
}

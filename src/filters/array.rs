//! List filters - slicing and category filtering

use std::collections::HashMap;

use tera::Value;

/// Take a sub-range of a list, with JavaScript `Array.slice` semantics.
///
/// `start` and `end` are keyword arguments; negative indices count back
/// from the end and out-of-range values clamp instead of erroring. A
/// non-list input yields an empty list.
pub fn slice(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let Some(items) = value.as_array() else {
        return Ok(Value::Array(Vec::new()));
    };

    let len = items.len();
    let start = resolve_index(args.get("start").and_then(Value::as_i64), len, 0);
    let end = resolve_index(args.get("end").and_then(Value::as_i64), len, len);

    if start >= end {
        return Ok(Value::Array(Vec::new()));
    }
    Ok(Value::Array(items[start..end].to_vec()))
}

/// Clamp a signed slice bound into `0..=len`
fn resolve_index(index: Option<i64>, len: usize, default: usize) -> usize {
    match index {
        None => default,
        Some(i) if i < 0 => len.saturating_sub(i.unsigned_abs() as usize),
        Some(i) => (i as usize).min(len),
    }
}

/// Keep only the items tagged with the given category.
///
/// Items expose their tags through a `categories` list field; items
/// without one are excluded rather than erroring. Matching is exact,
/// case included, and input order is preserved.
pub fn filter_by_category(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let Some(items) = value.as_array() else {
        return Ok(Value::Array(Vec::new()));
    };
    let Some(category) = args.get("category").and_then(Value::as_str) else {
        return Ok(Value::Array(Vec::new()));
    };

    let matched = items
        .iter()
        .filter(|item| has_category(item, category))
        .cloned()
        .collect();
    Ok(Value::Array(matched))
}

fn has_category(item: &Value, category: &str) -> bool {
    item.get("categories")
        .and_then(Value::as_array)
        .map(|cats| cats.iter().any(|c| c.as_str() == Some(category)))
        .unwrap_or(false)
}

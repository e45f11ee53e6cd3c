//! Post navigation filters
//!
//! These filters walk the newest-first posts list by position, so
//! "previous" points at the chronologically newer neighbor and "next" at
//! the older one, mirroring how the list itself reads top to bottom.

use std::collections::HashMap;

use tera::Value;

/// The entry one position before the current page in the list.
///
/// Takes the current page through the `page` keyword argument and locates
/// it by url. Returns null at the head of the list or when the page is
/// not in it.
pub fn get_previous(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let neighbor = find_position(value, args).and_then(|(items, index)| {
        if index > 0 {
            items.get(index - 1)
        } else {
            None
        }
    });
    Ok(neighbor.cloned().unwrap_or(Value::Null))
}

/// The entry one position after the current page in the list.
///
/// Returns null at the tail of the list or when the page is not in it.
pub fn get_next(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let neighbor = find_position(value, args).and_then(|(items, index)| items.get(index + 1));
    Ok(neighbor.cloned().unwrap_or(Value::Null))
}

/// Locate the current page in the list by url, first match wins
fn find_position<'a>(
    value: &'a Value,
    args: &HashMap<String, Value>,
) -> Option<(&'a Vec<Value>, usize)> {
    let items = value.as_array()?;
    let url = args.get("page")?.get("url")?.as_str()?;
    let index = items
        .iter()
        .position(|item| item.get("url").and_then(Value::as_str) == Some(url))?;
    Some((items, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_args(url: &str) -> HashMap<String, Value> {
        let mut args = HashMap::new();
        args.insert("page".to_string(), json!({ "url": url }));
        args
    }

    fn posts() -> Value {
        // Newest first, as the posts collection serializes them
        json!([
            {"url": "/a/", "title": "Newest"},
            {"url": "/b/", "title": "Middle"},
            {"url": "/c/", "title": "Oldest"},
        ])
    }

    #[test]
    fn test_previous_returns_the_newer_neighbor() {
        let result = get_previous(&posts(), &page_args("/b/")).unwrap();
        assert_eq!(result["url"], "/a/");
    }

    #[test]
    fn test_next_returns_the_older_neighbor() {
        let result = get_next(&posts(), &page_args("/b/")).unwrap();
        assert_eq!(result["url"], "/c/");
    }

    #[test]
    fn test_boundaries_yield_null() {
        assert_eq!(get_previous(&posts(), &page_args("/a/")).unwrap(), json!(null));
        assert_eq!(get_next(&posts(), &page_args("/c/")).unwrap(), json!(null));
    }

    #[test]
    fn test_unknown_page_yields_null() {
        assert_eq!(
            get_previous(&posts(), &page_args("/missing/")).unwrap(),
            json!(null)
        );
        assert_eq!(
            get_next(&posts(), &page_args("/missing/")).unwrap(),
            json!(null)
        );
    }

    #[test]
    fn test_degenerate_inputs_yield_null() {
        assert_eq!(
            get_previous(&json!("nope"), &page_args("/a/")).unwrap(),
            json!(null)
        );
        assert_eq!(get_next(&posts(), &HashMap::new()).unwrap(), json!(null));
        assert_eq!(
            get_next(&posts(), &{
                let mut args = HashMap::new();
                args.insert("page".to_string(), json!({"title": "no url"}));
                args
            })
            .unwrap(),
            json!(null)
        );
    }

    #[test]
    fn test_duplicate_urls_anchor_at_first_match() {
        let posts = json!([
            {"url": "/top/"},
            {"url": "/dup/", "title": "first"},
            {"url": "/dup/", "title": "second"},
        ]);
        let prev = get_previous(&posts, &page_args("/dup/")).unwrap();
        assert_eq!(prev["url"], "/top/");
        let next = get_next(&posts, &page_args("/dup/")).unwrap();
        assert_eq!(next["title"], "second");
    }
}

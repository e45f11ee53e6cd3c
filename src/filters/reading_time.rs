//! Reading time estimation filter

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tera::Value;

/// Average adult reading speed used for the estimate
const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    // Matches HTML tags, including one left unclosed at end of input
    static ref TAG_RE: Regex = Regex::new(r"</?[^>]+(>|$)").unwrap();
}

/// Estimate reading time from rendered content.
///
/// Markup is stripped before counting words and the minute count rounds
/// up, so any prose at all reads as at least one minute. Empty or missing
/// content reads as `"0 min read"`.
pub fn reading_time(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value.as_str().unwrap_or("");
    let stripped = TAG_RE.replace_all(text, "");
    let words = stripped.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    Ok(Value::String(format!("{} min read", minutes)))
}

//! Date formatting filter

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use tera::Value;

use crate::content::parse_date_string;

/// Format a date value using a Luxon-compatible format string.
///
/// Accepts the `format` and `zone` keyword arguments; defaults are
/// `"MMM d, yyyy"` and `"utc"`. Missing, null or unparseable dates render
/// as empty text so templates never fail on a post without one.
pub fn date(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let Some(date) = parse_input(value) else {
        return Ok(Value::String(String::new()));
    };

    let format = args
        .get("format")
        .and_then(Value::as_str)
        .unwrap_or("MMM d, yyyy");
    let zone = args.get("zone").and_then(Value::as_str).unwrap_or("utc");

    let chrono_format = luxon_to_chrono_format(format);

    // Unknown zone names fall back to UTC rather than erroring the render
    let formatted = if zone.eq_ignore_ascii_case("utc") {
        date.format(&chrono_format).to_string()
    } else if let Ok(tz) = zone.parse::<chrono_tz::Tz>() {
        date.with_timezone(&tz).format(&chrono_format).to_string()
    } else {
        tracing::debug!("Unknown time zone {:?}, formatting in UTC", zone);
        date.format(&chrono_format).to_string()
    };

    Ok(Value::String(formatted))
}

/// Read a date out of a template value.
/// Strings use the front-matter formats; integers are Unix seconds.
fn parse_input(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_string(s),
        Value::Number(n) => Utc.timestamp_opt(n.as_i64()?, 0).single(),
        _ => None,
    }
}

/// Convert a Luxon format string to chrono format
///
/// Tokens are matched longest-first at each position so `dd` never
/// degenerates into two bare `d`s. Text in single quotes passes through
/// untouched, as Luxon treats it.
fn luxon_to_chrono_format(format: &str) -> String {
    const TOKENS: &[(&str, &str)] = &[
        // Year
        ("yyyy", "%Y"),
        ("yy", "%y"),
        // Month, format and standalone flavors
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("LLLL", "%B"),
        ("LLL", "%b"),
        ("LL", "%m"),
        ("L", "%-m"),
        // Day of month
        ("dd", "%d"),
        ("d", "%-d"),
        // Ordinal day of year
        ("ooo", "%j"),
        // Weekday
        ("EEEE", "%A"),
        ("EEE", "%a"),
        ("cccc", "%A"),
        ("ccc", "%a"),
        // Hour, 24h then 12h
        ("HH", "%H"),
        ("H", "%-H"),
        ("hh", "%I"),
        ("h", "%-I"),
        // Minute and second
        ("mm", "%M"),
        ("m", "%-M"),
        ("ss", "%S"),
        ("s", "%-S"),
        // Fractional seconds
        ("SSS", "%3f"),
        // Zone offset and name
        ("ZZZZ", "%Z"),
        ("ZZZ", "%z"),
        ("ZZ", "%:z"),
        ("Z", "%:z"),
        // Meridiem
        ("a", "%p"),
        // Quarter has no chrono equivalent worth faking
    ];

    let mut result = String::with_capacity(format.len());
    let mut rest = format;

    'outer: while !rest.is_empty() {
        // Quoted literal: copy verbatim up to the closing quote
        if let Some(quoted) = rest.strip_prefix('\'') {
            let end = quoted.find('\'').unwrap_or(quoted.len());
            push_literal(&mut result, &quoted[..end]);
            rest = quoted.get(end + 1..).unwrap_or("");
            continue;
        }

        for (token, replacement) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                result.push_str(replacement);
                rest = after;
                continue 'outer;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            push_literal_char(&mut result, c);
        }
        rest = chars.as_str();
    }

    result
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        push_literal_char(out, c);
    }
}

fn push_literal_char(out: &mut String, c: char) {
    // '%' starts a chrono specifier, so literal ones need doubling
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

//! HTML escaping of outgoing JSON values

use serde_json::Value;

/// Escape `& < > " '` for safe embedding in HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape every string value in `value`, recursively. Object keys, numbers
/// and booleans are left alone.
pub fn escape_value(value: &mut Value) {
    match value {
        Value::String(s) => *s = escape_html(s),
        Value::Array(items) => items.iter_mut().for_each(escape_value),
        Value::Object(map) => map.values_mut().for_each(escape_value),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("https://cdn.example.com/a/b.jpg"), "https://cdn.example.com/a/b.jpg");
    }

    #[test]
    fn test_escape_nested_values() {
        let mut value = json!({
            "<key>": "<b>",
            "total": 3,
            "ok": true,
            "hits": [{"tags": "cat & dog", "id": 7}, null]
        });
        escape_value(&mut value);
        assert_eq!(
            value,
            json!({
                "<key>": "&lt;b&gt;",
                "total": 3,
                "ok": true,
                "hits": [{"tags": "cat &amp; dog", "id": 7}, null]
            })
        );
    }
}

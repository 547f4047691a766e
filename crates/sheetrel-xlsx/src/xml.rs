/// Append `value` to `out` escaped for use inside a double-quoted XML attribute.
///
/// `'` is left alone so quoted sheet names in `location` stay as Excel writes them.
pub(crate) fn push_escaped_attr(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

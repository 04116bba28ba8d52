//! Quote-aware splitting of a single CSV line.

/// Splits one CSV line into trimmed fields.
///
/// Commas inside a `"`-quoted span do not split, and `""` inside a quoted span
/// yields a literal `"`. An unterminated quote is not an error: everything up
/// to the end of the line lands in the last field.
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            },
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            },
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Quotes a field so that [`tokenize_line`] reads it back unchanged.
#[must_use]
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

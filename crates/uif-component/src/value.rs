//! Member values and literal argument lists

use serde_json::Value;

/// Coerce a member value to the text substituted into markup
///
/// Strings are inserted verbatim, `null` becomes empty, everything else
/// is written as JSON.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse a literal argument list such as `3, 'Amy', [1, 2]`
///
/// Accepts JSON literals plus single-quoted strings. An empty list is valid.
pub fn parse_literal_list(text: &str) -> Result<Vec<Value>, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let json = format!("[{}]", requote(text));
    serde_json::from_str(&json)
}

/// Rewrite single-quoted strings as JSON strings
fn requote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push('"');
                while let Some(c) = chars.next() {
                    out.push(c);
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                out.push(escaped);
                            }
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '\'' => {
                out.push('"');
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some('\'') => out.push('\''),
                            Some(escaped) => {
                                out.push('\\');
                                out.push(escaped);
                            }
                            None => {}
                        },
                        '"' => out.push_str("\\\""),
                        '\'' => break,
                        _ => out.push(c),
                    }
                }
                out.push('"');
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&json!("X")), "X");
        assert_eq!(to_text(&Value::Null), "");
        assert_eq!(to_text(&json!(3)), "3");
        assert_eq!(to_text(&json!(true)), "true");
        assert_eq!(to_text(&json!([1, "a"])), r#"[1,"a"]"#);
    }

    #[test]
    fn test_parse_mixed_quotes() {
        let args = parse_literal_list(r#"3, 'Amy', "Bo", null"#).unwrap();
        assert_eq!(args, vec![json!(3), json!("Amy"), json!("Bo"), Value::Null]);
    }

    #[test]
    fn test_parse_quotes_inside_single() {
        let args = parse_literal_list(r#"'say "hi"', 'it\'s'"#).unwrap();
        assert_eq!(args, vec![json!("say \"hi\""), json!("it's")]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_literal_list("").unwrap().is_empty());
        assert!(parse_literal_list("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_expressions() {
        assert!(parse_literal_list("a + 1").is_err());
        assert!(parse_literal_list("foo()").is_err());
    }
}

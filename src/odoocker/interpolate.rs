// Field-path interpolation of `{key}` and `{key[sub]}` placeholders against a
// JSON view of the context being built.

use serde_json::Value;

use super::error::{Error, Result};

pub fn interpolate(template: &str, scope: &Value) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    field.push(c);
                }
                if !closed {
                    return Err(bad(template, "unterminated placeholder"));
                }
                out.push_str(&resolve(&field, template, scope)?);
            }
            '}' => return Err(bad(template, "single '}' outside a placeholder")),
            c => out.push(c),
        }
    }
    Ok(out)
}

fn bad(template: &str, reason: &'static str) -> Error {
    Error::BadPlaceholder {
        template: template.to_string(),
        reason,
    }
}

fn resolve(field: &str, template: &str, scope: &Value) -> Result<String> {
    let path = field_path(field).ok_or_else(|| bad(template, "invalid field path"))?;
    let missing = || Error::MissingKey {
        key: field.to_string(),
        template: template.to_string(),
    };

    let mut value = scope;
    for segment in path {
        value = match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(missing)?;
    }

    match value {
        Value::Null => Err(missing()),
        Value::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

// "odoo[version]" -> ["odoo", "version"]
fn field_path(field: &str) -> Option<Vec<&str>> {
    let (head, mut rest) = match field.find('[') {
        Some(idx) => (&field[..idx], &field[idx..]),
        None => (field, ""),
    };
    if head.is_empty() {
        return None;
    }
    let mut path = vec![head];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let end = inner.find(']')?;
        if end == 0 {
            return None;
        }
        path.push(&inner[..end]);
        rest = &inner[end + 1..];
    }
    Some(path)
}

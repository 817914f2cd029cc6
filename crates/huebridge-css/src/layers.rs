//! Parenthesis-aware scanning of CSS background values
//!
//! A background may stack several comma-separated layers, each of which can
//! itself contain commas inside function arguments (`rgba(0, 0, 0, 0.5)`).
//! Only commas at nesting depth zero separate layers.

/// Split a stacked background into its layers, back-to-front as written
///
/// Each layer is trimmed; empty layers are dropped.
pub fn split_gradient_layers(value: &str) -> Vec<String> {
    let mut layers = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for ch in value.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                push_layer(&mut layers, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_layer(&mut layers, &current);

    layers
}

fn push_layer(layers: &mut Vec<String>, token: &str) {
    let token = token.trim();
    if !token.is_empty() {
        layers.push(token.to_string());
    }
}

/// Return the argument text of the first `name(...)` call in `value`
///
/// The match on `name` is ASCII case-insensitive. Returns `None` when the
/// call is absent or its closing parenthesis is missing.
pub fn function_body<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}(", name.to_ascii_lowercase());
    let start = value.to_ascii_lowercase().find(&needle)? + needle.len();

    let mut depth: usize = 1;
    for (offset, ch) in value[start..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&value[start..start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

//! Case conversion between snake_case table names and camelCase wire keys.

/// Convert a single identifier from snake_case to camelCase.
/// e.g. "question_choice" -> "questionChoice"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

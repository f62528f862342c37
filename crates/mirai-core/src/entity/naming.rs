//! Field name conversion between Rust fields (`snake_case`) and the wire (`camelCase`).
//!
//! The conversion is lexical. It round-trips identifiers made of lowercase
//! alphabetic words; digits and runs of capitals (acronyms) may split
//! differently on the way back.

/// Rust-side name of the wire field `from`.
pub const FROM_FIELD: &str = "from_";
const FROM_WIRE: &str = "from";

/// `snake_case` -> `camelCase`, e.g. `my_name` -> `myName`.
pub fn to_wire(name: &str) -> String {
    if name == FROM_FIELD {
        return FROM_WIRE.to_owned();
    }
    let mut words = name.split('_');
    let mut out = String::with_capacity(name.len());
    if let Some(head) = words.next() {
        out.push_str(head);
    }
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `camelCase` -> `snake_case`, e.g. `myName` -> `my_name`.
///
/// A word begins before an uppercase letter that is followed by a lowercase
/// letter or preceded by one.
pub fn to_internal(name: &str) -> String {
    if name == FROM_WIRE {
        return FROM_FIELD.to_owned();
    }
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let prev_lower = i > 0 && chars.get(i - 1).is_some_and(|c| c.is_lowercase());
            if (next_lower || prev_lower) && !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
        }
        word.push(ch);
    }
    if !word.is_empty() {
        words.push(word);
    }

    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

//! Identifier helpers shared by the scanner and the synthesizer.

/// Whether a declaration name is exported: its first character is uppercase.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Converts a type name into a lower camel case variable name.
///
/// Non-alphanumeric characters separate words (`t.Alice` -> `tAlice`,
/// `*strings.Builder` -> `stringsBuilder`). A leading all-caps word is
/// lowered entirely (`ID` -> `id`).
pub fn to_lower_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        if out.is_empty() {
            if word.chars().all(|c| !c.is_lowercase()) {
                out.push_str(&word.to_lowercase());
            } else {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_lowercase());
                    out.push_str(chars.as_str());
                }
            }
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

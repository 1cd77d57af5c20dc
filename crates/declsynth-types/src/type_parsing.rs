//! Type string utilities.
//!
//! Canonical type strings are the formatter's output (`[]int`,
//! `map[string]*people.Person`, `...string`). These helpers compare and
//! split them without parsing them back into a tree.

/// Types that accept any value; argument checks are skipped for them.
pub const DYNAMIC_TYPES: &[&str] = &["interface{}", "any"];

pub const VARIADIC_PREFIX: &str = "...";

pub fn is_dynamic(ty: &str) -> bool {
    DYNAMIC_TYPES.contains(&ty)
}

pub fn is_variadic(ty: &str) -> bool {
    ty.starts_with(VARIADIC_PREFIX)
}

pub fn strip_variadic(ty: &str) -> &str {
    ty.strip_prefix(VARIADIC_PREFIX).unwrap_or(ty)
}

/// Qualification depth: the number of `.` separators in the type string.
pub fn qualification_depth(ty: &str) -> usize {
    ty.matches('.').count()
}

/// Final unqualified segment (`foo.bar` -> `bar`).
pub fn final_segment(ty: &str) -> &str {
    ty.rsplit('.').next().unwrap_or(ty)
}

/// Structural compatibility of an argument's type with a parameter's type.
///
/// Equal qualification depth requires exact equality. Differing depth
/// compares only the final segments, so `foo.bar` matches `bar` but not
/// `test.bar`.
pub fn check_args_type(actual: &str, expected: &str) -> bool {
    if qualification_depth(actual) == qualification_depth(expected) {
        return actual == expected;
    }
    final_segment(actual) == final_segment(expected)
}

/// Split a comma separated type list at top level, ignoring commas nested
/// inside `()`, `[]` or `{}`.
///
/// # Examples
///
/// ```
/// use declsynth_types::type_parsing::split_type_list;
///
/// assert_eq!(split_type_list("int, map[string]int"), vec!["int", "map[string]int"]);
/// assert_eq!(split_type_list("func(a, b) c, d"), vec!["func(a, b) c", "d"]);
/// ```
pub fn split_type_list(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                result.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        result.push(s[start..].trim());
    }

    result.retain(|part| !part.is_empty());
    result
}

/// Split a canonical function type (`func(a,b) (c,d)` or `func(a) c`) into
/// its parameter and result type lists.
pub fn parse_func_type(ty: &str) -> Option<(Vec<&str>, Vec<&str>)> {
    let rest = ty.trim().strip_prefix("func(")?;
    let close = matching_paren(rest)?;
    let params = split_type_list(&rest[..close]);
    let tail = rest[close + 1..].trim();
    let results = match tail.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => split_type_list(inner),
        None if tail.is_empty() => Vec::new(),
        None => vec![tail],
    };
    Some((params, results))
}

/// Byte offset of the `)` closing an already opened `(`.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

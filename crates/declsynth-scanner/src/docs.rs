//! Doc comment extraction.

/// Joins raw comment lines into one doc string.
///
/// Comment markers and one following space are stripped and lines are joined
/// with a space. A blank comment line becomes a newline.
pub fn parse_comment<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    let mut delimiter = "";
    for line in lines {
        out.push_str(delimiter);
        let text = strip_markers(line.as_ref());
        if text.is_empty() {
            out.push('\n');
            continue;
        }
        out.push_str(text);
        delimiter = " ";
    }
    out
}

fn strip_markers(line: &str) -> &str {
    let line = line.trim_end();
    let text = if let Some(rest) = line.strip_prefix("//") {
        rest
    } else if let Some(rest) = line.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else {
        line
    };
    let text = text.strip_prefix(' ').unwrap_or(text);
    text.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comment_joins_lines() {
        assert_eq!(parse_comment(&["test", "hello"]), "test hello");
        assert_eq!(
            parse_comment(&["// Person is a member.", "// It has a name."]),
            "Person is a member. It has a name."
        );
    }

    #[test]
    fn test_parse_comment_blank_line_becomes_newline() {
        assert_eq!(parse_comment(&["// a", "//", "// b"]), "a \n b");
    }

    #[test]
    fn test_parse_comment_block() {
        assert_eq!(parse_comment(&["/* block doc */"]), "block doc");
        assert_eq!(parse_comment::<&str>(&[]), "");
    }
}

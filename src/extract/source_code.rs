/// Extract human-language text from source files: line comments (`//` and
/// `#` styles) and single-line quoted string literals.
pub fn extract(content: &str) -> Vec<String> {
    let mut constants = Vec::new();
    for line in content.lines() {
        if let Some(idx) = line.find("//") {
            constants.push(line[idx + 2..].trim().to_string());
        } else if let Some(idx) = find_hash_comment(line) {
            constants.push(line[idx + 1..].trim().to_string());
        }
        constants.extend(string_literals(line));
    }
    constants.retain(|s| !s.is_empty());
    constants
}

/// A `#` only opens a comment when it is not inside a string literal.
fn find_hash_comment(line: &str) -> Option<usize> {
    let idx = line.find('#')?;
    let before = &line[..idx];
    let quotes = before.matches('"').count() + before.matches('\'').count();
    (quotes % 2 == 0).then_some(idx)
}

fn string_literals(line: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch == '"' || ch == '\'' {
            let quote = ch;
            let mut literal = String::new();
            let mut escaped = false;
            let mut closed = false;
            for c in chars.by_ref() {
                if escaped {
                    literal.push(c);
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    closed = true;
                    break;
                } else {
                    literal.push(c);
                }
            }
            if closed && !literal.trim().is_empty() {
                found.push(literal);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_text_from_line_comments() {
        let content = "let x = 1; // счётчик запросов\n";
        assert_eq!(extract(content), vec!["счётчик запросов"]);
    }

    #[test]
    fn pulls_text_from_hash_comments() {
        let content = "x = 1  # счётчик запросов\n";
        assert_eq!(extract(content), vec!["счётчик запросов"]);
    }

    #[test]
    fn hash_inside_string_is_not_a_comment() {
        let content = "s = \"value # not a comment\"\n";
        assert_eq!(extract(content), vec!["value # not a comment"]);
    }

    #[test]
    fn pulls_string_literals_with_escapes() {
        let content = r#"print("она сказала \"привет\"")"#;
        let strings = extract(content);
        assert_eq!(strings, vec![r#"она сказала "привет""#]);
    }

    #[test]
    fn unterminated_literal_is_dropped() {
        let content = "let s = \"oops\n";
        assert!(extract(content).is_empty());
    }
}

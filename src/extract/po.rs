use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap();
}

/// Extract translatable text from gettext catalogs: the quoted payloads of
/// `msgid`/`msgstr` lines and their bare-string continuations.
pub fn extract(content: &str) -> Vec<String> {
    let mut texts = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("msgid") || line.starts_with("msgstr") || line.starts_with('"') {
            for capture in QUOTED.captures_iter(line) {
                if let Some(text) = capture.get(1) {
                    if !text.as_str().is_empty() {
                        texts.push(text.as_str().to_string());
                    }
                }
            }
        }
    }
    texts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_msgid_and_msgstr_payloads() {
        let content = r#"
#: src/main.py:10
msgid "Hello, world"
msgstr "Привет, мир"
"#;
        assert_eq!(extract(content), vec!["Hello, world", "Привет, мир"]);
    }

    #[test]
    fn pulls_continuation_lines() {
        let content = "msgid \"\"\n\"первая строка \"\n\"вторая строка\"\n";
        assert_eq!(extract(content), vec!["первая строка ", "вторая строка"]);
    }

    #[test]
    fn comment_lines_are_ignored() {
        let content = "# translator note: проверить\n#: src/app.py:3\n";
        assert!(extract(content).is_empty());
    }
}

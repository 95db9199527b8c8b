use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Extract prose from markdown, skipping fenced/indented code blocks and
/// inline code spans.
pub fn extract(content: &str) -> Vec<String> {
    let mut texts = Vec::new();
    let mut in_code_block = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block => texts.push(text.to_string()),
            _ => {}
        }
    }

    texts
}

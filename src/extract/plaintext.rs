/// Plain text is taken wholesale, one raw string per non-blank line.
pub fn extract(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

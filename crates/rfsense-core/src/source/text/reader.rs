/// Strip comments and surrounding whitespace from an input line.
///
/// Returns `None` when nothing but a comment or whitespace remains.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use rfsense_core::source::text::reader::capture_text;
///
/// assert_eq!(capture_text("  {8}aa  # note"), Some("{8}aa"));
/// assert_eq!(capture_text("# only a comment"), None);
/// ```
pub fn capture_text(line: &str) -> Option<&str> {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let trimmed = content.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

#[cfg(test)]
mod tests {
    use super::capture_text;

    #[test]
    fn keeps_capture_text() {
        assert_eq!(capture_text("{240}aaaadead"), Some("{240}aaaadead"));
    }

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(capture_text("  {8}aa  # note"), Some("{8}aa"));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(capture_text(""), None);
        assert_eq!(capture_text("   \t"), None);
        assert_eq!(capture_text("# only a comment"), None);
    }
}

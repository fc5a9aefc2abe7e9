/// Splits `line` into maximal runs of ASCII lowercase letters.
///
/// Any other character, including uppercase and non-ASCII, acts as a
/// separator. Callers are expected to lowercase the line first.
#[inline]
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens { rest: line }
}

/// Lazy iterator over the tokens of one line. A clone resumes from the
/// same position.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.rest.as_bytes();
        let start = bytes.iter().position(u8::is_ascii_lowercase)?;
        let len = bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_lowercase())
            .unwrap_or(bytes.len() - start);
        // ASCII boundaries are always char boundaries
        let token = &self.rest[start..start + len];
        self.rest = &self.rest[start + len..];
        Some(token)
    }
}

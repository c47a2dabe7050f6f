use std::fmt;

/// Renders at most `width` escaped characters of a window between bars,
/// padded to `width + 2`, for trace output.
pub fn formatter_bytes(b: &[u8], width: usize) -> String {
    let s = b[..b.len().min(width)].escape_ascii().to_string();
    let s = &s[..s.len().min(width)];
    format!("{:<w$}", "|".to_string() + s + "|", w = width + 2)
}

/// Debug-prints a byte as an escaped character literal, e.g. `'{'`.
#[derive(Clone, Copy)]
pub(crate) struct Escaped(pub u8);

impl fmt::Debug for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}'", self.0.escape_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_formatter_bytes() {
        assert_eq!(formatter_bytes(b"ab\n", 33).trim_end(), "|ab\\n|");
        assert_eq!(formatter_bytes(&[b'x'; 40], 33).len(), 35);
        assert_eq!(formatter_bytes(b"abcdef", 4), "|abcd|");
        assert_eq!(format!("{:?}", Escaped(b'\t')), "'\\t'");
    }
}

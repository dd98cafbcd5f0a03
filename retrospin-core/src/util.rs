/// Decode a fixed header window as ASCII.
///
/// Bytes outside the 7-bit ASCII range are dropped rather than treated as
/// errors, then surrounding whitespace and NUL padding are trimmed. Header
/// fields on Sega discs are space padded, but blank or damaged discs come
/// back zero filled.
pub fn decode_ascii_window(buf: &[u8]) -> String {
    let s: String = buf
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect();
    s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii_window() {
        assert_eq!(decode_ascii_window(b"MK-81051  "), "MK-81051");
        assert_eq!(decode_ascii_window(b"\0\0\0\0"), "");
        assert_eq!(decode_ascii_window(b"T-\xFF12705"), "T-12705");
        assert_eq!(decode_ascii_window(b"  GM T-93185 -00\0"), "GM T-93185 -00");
    }
}

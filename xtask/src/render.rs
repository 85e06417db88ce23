//! Text rendering of raw serial output.

/// Render UART bytes for comparison with an expected file.
///
/// Carriage returns are shown as a literal `\r`, so a correctly translated
/// line reads `text\r` and a bare line feed shows up as a missing `\r`.
/// Bytes outside printable ASCII are shown as `\xNN`.
pub fn render_serial(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\r' => out.push_str("\\r"),
            b'\n' => out.push('\n'),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(char::from(b)),
            _ => out.push_str(&format!("\\x{b:02x}")),
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn crlf_lines() {
        assert_eq!(render_serial(b"a\r\nb\r\n"), "a\\r\nb\\r\n");
    }

    #[test]
    fn bare_line_feed_has_no_marker() {
        assert_eq!(render_serial(b"raw\n"), "raw\n");
    }

    #[test]
    fn binary_is_escaped() {
        assert_eq!(render_serial(b"\x00\\\xff"), "\\x00\\\\\\xff");
    }
}

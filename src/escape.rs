//! Escaping of captured process output
//!
//! Output recorded from a test may contain arbitrary bytes. Valid UTF-8 text
//! is kept as is, while bytes that cannot be represented in the report are
//! replaced by C-style escapes: `\f`, `\v`, `\r` and `\0` symbolically, any
//! other offending byte as a three-digit octal escape (`\001`).

use std::fmt::Write;

/// Escapes raw output bytes into a printable string.
pub fn escape_output(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len());
    let mut rest = data;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                escape_text(&mut result, text);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                if let Ok(text) = std::str::from_utf8(valid) {
                    escape_text(&mut result, text);
                }
                match err.error_len() {
                    Some(_) => {
                        // Invalid sequence: escape one byte and try to resync.
                        escape_byte(&mut result, after[0]);
                        rest = &after[1..];
                    }
                    None => {
                        // Incomplete sequence at the end of the buffer.
                        for &byte in after {
                            escape_byte(&mut result, byte);
                        }
                        break;
                    }
                }
            }
        }
    }

    result
}

fn escape_text(result: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\n' | '\t' => result.push(c),
            '\u{0c}' | '\u{0b}' | '\r' | '\0' => escape_byte(result, c as u8),
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for &byte in c.encode_utf8(&mut buf).as_bytes() {
                    escape_byte(result, byte);
                }
            }
            c => result.push(c),
        }
    }
}

fn escape_byte(result: &mut String, byte: u8) {
    match byte {
        0x0c => result.push_str("\\f"),
        0x0b => result.push_str("\\v"),
        b'\r' => result.push_str("\\r"),
        0 => result.push_str("\\0"),
        byte => {
            let _ = write!(result, "\\{:03o}", byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_byte_octal() {
        assert_eq!(escape_output(b"A\x01B"), "A\\001B");
    }

    #[test]
    fn test_valid_utf8_unchanged() {
        let text = "grüße, 世界\n\tdone";
        assert_eq!(escape_output(text.as_bytes()), text);
    }

    #[test]
    fn test_symbolic_escapes() {
        assert_eq!(escape_output(b"a\x0cb\x0bc\rd\0e"), "a\\fb\\vc\\rd\\0e");
    }

    #[test]
    fn test_invalid_byte_resyncs() {
        assert_eq!(escape_output(b"ok\xffok"), "ok\\377ok");
        assert_eq!(escape_output(b"\xc3(x"), "\\303(x");
    }

    #[test]
    fn test_incomplete_trailing_sequence() {
        // First two bytes of a three-byte sequence.
        assert_eq!(escape_output(b"end\xe4\xb8"), "end\\344\\270");
    }

    #[test]
    fn test_escape_is_idempotent_on_output() {
        let once = escape_output(b"x\x7fy");
        assert_eq!(once, "x\\177y");
        assert_eq!(escape_output(once.as_bytes()), once);
    }
}

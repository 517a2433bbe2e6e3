/// Write a JavaScript string literal delimited by double quotes, escaping
/// characters that would otherwise terminate or change the meaning of the
/// literal. Non-ASCII characters are preserved as UTF-8 except for the Unicode
/// line separators U+2028/U+2029, which must always be escaped.
pub fn write_string_literal(out: &mut String, value: &str) {
  out.push('"');

  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\0' => {
        let next_is_digit = chars.peek().map(|c| c.is_ascii_digit()).unwrap_or(false);
        if next_is_digit {
          out.push_str("\\x00");
        } else {
          out.push_str("\\0");
        }
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch < '\u{20}' => {
        // Other control characters are emitted as fixed-width hex escapes for
        // determinism.
        out.push_str(&format!("\\x{:02X}", ch as u32));
      }
      ch => out.push(ch),
    }
  }

  out.push('"');
}

/// Convenience wrapper returning the escaped literal as an owned string.
pub fn string_literal(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  write_string_literal(&mut out, value);
  out
}

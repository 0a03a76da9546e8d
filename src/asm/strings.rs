//! ZX Spectrum string semantics.
//!
//! String and character literals carry Spectrum-specific escape sequences
//! that map to the machine's control codes rather than to ASCII ones
//! (`\i` inverse video, `\p` paper, and so on). The tokenizer keeps literal
//! text verbatim; this conversion runs when a literal's value is
//! materialized.

/// Decodes the escape sequences of a string or character literal body.
///
/// The input is the text between the quotes, with escapes still encoded.
pub fn convert_spectrum_string(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        let Some(esc) = chars.next() else {
            // A trailing backslash cannot come out of the tokenizer, but
            // keep the conversion total anyway.
            result.push('\\');
            break;
        };
        match esc {
            'i' => result.push('\u{10}'),
            'p' => result.push('\u{11}'),
            'f' => result.push('\u{12}'),
            'b' => result.push('\u{13}'),
            'I' => result.push('\u{14}'),
            'o' => result.push('\u{15}'),
            'a' => result.push('\u{16}'),
            't' => result.push('\u{17}'),
            'P' => result.push('\u{60}'),
            'C' => result.push('\u{7f}'),
            '0' => result.push('\u{0}'),
            'x' => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 {
                    match chars.clone().next().and_then(|c| c.to_digit(16)) {
                        Some(digit) => {
                            chars.next();
                            value = value * 16 + digit;
                            digits += 1;
                        }
                        None => break,
                    }
                }
                if digits == 0 {
                    result.push('x');
                } else if let Some(decoded) = char::from_u32(value) {
                    result.push(decoded);
                }
            }
            other => result.push(other),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(convert_spectrum_string("hello"), "hello");
    }

    #[test]
    fn spectrum_control_escapes() {
        assert_eq!(convert_spectrum_string(r"\i\p\f\b"), "\u{10}\u{11}\u{12}\u{13}");
        assert_eq!(convert_spectrum_string(r"\I\o\a\t"), "\u{14}\u{15}\u{16}\u{17}");
        assert_eq!(convert_spectrum_string(r"\P"), "\u{60}");
        assert_eq!(convert_spectrum_string(r"\C"), "\u{7f}");
        assert_eq!(convert_spectrum_string(r"\0"), "\u{0}");
    }

    #[test]
    fn quote_and_backslash_escapes() {
        assert_eq!(convert_spectrum_string(r#"\'\"\\"#), "'\"\\");
    }

    #[test]
    fn hex_escapes() {
        assert_eq!(convert_spectrum_string(r"\x41\x42"), "AB");
        assert_eq!(convert_spectrum_string(r"\x7fx"), "\u{7f}x");
    }
}

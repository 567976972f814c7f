//! Mojibake repair.
//!
//! UTF-8 text that was decoded once too often as Windows-1252/Latin-1 shows
//! up as sequences like `â€™` (a curly apostrophe) or `Ã©` (`é`). When every
//! character of a string maps back to a single cp1252 byte and those bytes
//! form valid UTF-8, the re-decoded form is the intended text. Anything that
//! does not round-trip cleanly is left untouched.

/// Maximum number of re-decode passes; doubly mangled text is rare but real.
const MAX_PASSES: usize = 3;

/// Repair cp1252/Latin-1 mojibake in `text`, returning the input unchanged
/// when no clean re-decode exists.
#[must_use]
pub fn repair_mojibake(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_PASSES {
        match reinterpret_once(&current) {
            Some(fixed) if fixed != current => current = fixed,
            _ => break,
        }
    }
    current
}

/// One re-decode pass: map every char back to its cp1252 byte and decode
/// the byte string as UTF-8. `None` when any char has no byte form or the
/// bytes are not valid UTF-8.
fn reinterpret_once(s: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(s.len());
    for c in s.chars() {
        let cp = c as u32;
        if cp <= 0xFF {
            #[allow(clippy::cast_possible_truncation)]
            bytes.push(cp as u8);
        } else if let Some(b) = cp1252_byte(c) {
            bytes.push(b);
        } else {
            return None;
        }
    }
    String::from_utf8(bytes).ok()
}

/// The 0x80–0x9F range of Windows-1252, where it diverges from Latin-1.
fn cp1252_byte(c: char) -> Option<u8> {
    let b = match c {
        '\u{20AC}' => 0x80, // €
        '\u{201A}' => 0x82, // ‚
        '\u{0192}' => 0x83, // ƒ
        '\u{201E}' => 0x84, // „
        '\u{2026}' => 0x85, // …
        '\u{2020}' => 0x86, // †
        '\u{2021}' => 0x87, // ‡
        '\u{02C6}' => 0x88, // ˆ
        '\u{2030}' => 0x89, // ‰
        '\u{0160}' => 0x8A, // Š
        '\u{2039}' => 0x8B, // ‹
        '\u{0152}' => 0x8C, // Œ
        '\u{017D}' => 0x8E, // Ž
        '\u{2018}' => 0x91, // '
        '\u{2019}' => 0x92, // '
        '\u{201C}' => 0x93, // "
        '\u{201D}' => 0x94, // "
        '\u{2022}' => 0x95, // •
        '\u{2013}' => 0x96, // –
        '\u{2014}' => 0x97, // —
        '\u{02DC}' => 0x98, // ˜
        '\u{2122}' => 0x99, // ™
        '\u{0161}' => 0x9A, // š
        '\u{203A}' => 0x9B, // ›
        '\u{0153}' => 0x9C, // œ
        '\u{017E}' => 0x9E, // ž
        '\u{0178}' => 0x9F, // Ÿ
        _ => return None,
    };
    Some(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_unchanged() {
        assert_eq!(repair_mojibake("plain ascii text"), "plain ascii text");
    }

    #[test]
    fn correct_accents_are_unchanged() {
        // "café" is already valid; its bytes would not re-decode.
        assert_eq!(repair_mojibake("café"), "café");
    }

    #[test]
    fn latin1_double_decode_is_repaired() {
        assert_eq!(repair_mojibake("cafÃ©"), "café");
    }

    #[test]
    fn cp1252_apostrophe_is_repaired() {
        assert_eq!(repair_mojibake("donâ€™t"), "don’t");
    }

    #[test]
    fn mangled_emoji_is_repaired() {
        // 📈 (U+1F4C8) read back through cp1252.
        assert_eq!(repair_mojibake("ðŸ“ˆ"), "📈");
    }

    #[test]
    fn genuine_emoji_is_unchanged() {
        assert_eq!(repair_mojibake("to the moon 🚀"), "to the moon 🚀");
    }

    #[test]
    fn empty_string_is_unchanged() {
        assert_eq!(repair_mojibake(""), "");
    }

    #[test]
    fn repair_is_idempotent() {
        let repaired = repair_mojibake("donâ€™t");
        assert_eq!(repair_mojibake(&repaired), repaired);
    }
}

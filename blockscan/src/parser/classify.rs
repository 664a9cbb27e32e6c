//! Character classes the block scanner reasons about.
//!
//! Classification is pure: the same input always yields the same class, and
//! every byte sequence maps to exactly one class.

/// Semantic class of the character at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// The zero byte. Stored as U+FFFD, never as a raw null.
    Nul,
    /// ASCII space and tab, plus the Unicode space separators.
    Space,
    /// ASCII punctuation (`#`, `-`, `*`, `_`, brackets, ...).
    Punct,
    /// Anything else that belongs to the line, including non-ASCII letters
    /// and bytes that are not valid UTF-8.
    LineChar,
    /// Line feed or carriage return.
    Eol,
}

/// The character stored in place of a null byte.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Classify a decoded scalar value.
pub fn classify_char(c: char) -> CharClass {
    match c {
        '\0' => CharClass::Nul,
        '\n' | '\r' => CharClass::Eol,
        ' ' | '\t' => CharClass::Space,
        c if c.is_ascii_punctuation() => CharClass::Punct,
        c if is_unicode_space(c) => CharClass::Space,
        _ => CharClass::LineChar,
    }
}

/// Classify the character starting at the front of `bytes`.
///
/// Returns the class and the number of bytes the character occupies. Invalid
/// UTF-8 is consumed one byte at a time as [`CharClass::LineChar`]; an empty
/// slice has nothing to consume and reports `(Eol, 0)`, the synthetic
/// end-of-input terminator.
pub fn classify(bytes: &[u8]) -> (CharClass, usize) {
    let Some(&first) = bytes.first() else {
        return (CharClass::Eol, 0);
    };
    if first.is_ascii() {
        return (classify_char(first as char), 1);
    }
    match bstr::decode_utf8(bytes) {
        (Some(c), width) => (classify_char(c), width),
        (None, _) => (CharClass::LineChar, 1),
    }
}

/// Space separators from the Zs category outside ASCII.
fn is_unicode_space(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

/// Spaces that leave a line blank or separate a heading marker from its text.
/// Indentation and padding use the wider [`CharClass::Space`].
pub(crate) fn is_blank_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

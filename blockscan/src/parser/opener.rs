use crate::document::NodeType;
use crate::parser::classify::{self, CharClass};

/// Maximum indentation tolerated in front of a block opener.
const MAX_INDENT: usize = 3;

/// Minimum number of symbols in a thematic break.
const MIN_BREAK_SYMBOLS: usize = 3;

/// What a single physical line opens, decided before any content is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Only spaces and tabs.
    Blank,
    /// ATX heading; `content` is already stripped of markers and padding.
    Heading { kind: NodeType, content: &'a [u8] },
    /// Thematic break drawn with `symbol`.
    ThematicBreak(u8),
    /// Everything else: paragraph text.
    Text,
}

/// Detect the block opener on `line` (terminator excluded).
///
/// Headings win over thematic breaks, which win over paragraph text. A line
/// that fails every opener is [`LineKind::Text`], never an error.
pub(crate) fn detect(line: &[u8]) -> LineKind<'_> {
    if line.iter().all(|&b| classify::is_blank_space(b)) {
        return LineKind::Blank;
    }

    let rest = skip_indent(line);

    if let Some(heading) = atx_heading(rest) {
        return heading;
    }
    if let Some(symbol) = thematic_break(rest) {
        return LineKind::ThematicBreak(symbol);
    }
    LineKind::Text
}

fn atx_heading(rest: &[u8]) -> Option<LineKind<'_>> {
    let markers = rest.iter().take_while(|&&b| b == b'#').count();
    let kind = NodeType::heading(u8::try_from(markers).ok()?)?;

    let after = &rest[markers..];
    if let Some(&b) = after.first() {
        if !classify::is_blank_space(b) {
            return None;
        }
    }

    let content = strip_closing_sequence(trim_space(after));
    if content.is_empty() {
        // Nothing left to title the heading with; the line stays text.
        return None;
    }
    Some(LineKind::Heading { kind, content })
}

/// Drop an optional trailing run of `#`. The run only counts as a closing
/// sequence when it stands alone or follows a space.
fn strip_closing_sequence(content: &[u8]) -> &[u8] {
    let kept = content.len() - content.iter().rev().take_while(|&&b| b == b'#').count();
    if kept == content.len() {
        return content;
    }
    let before = &content[..kept];
    let trimmed = trim_end_space(before);
    if trimmed.len() == before.len() && !before.is_empty() {
        return content;
    }
    trimmed
}

/// Skip up to [`MAX_INDENT`] leading `Space` characters.
fn skip_indent(line: &[u8]) -> &[u8] {
    let mut rest = line;
    for _ in 0..MAX_INDENT {
        match classify::classify(rest) {
            (CharClass::Space, width) => rest = &rest[width..],
            _ => break,
        }
    }
    rest
}

fn thematic_break(rest: &[u8]) -> Option<u8> {
    let symbol = *rest.first()?;
    if !matches!(symbol, b'-' | b'*' | b'_') {
        return None;
    }

    let mut count = 0;
    let mut cursor = rest;
    while !cursor.is_empty() {
        match classify::classify(cursor) {
            (CharClass::Punct, 1) if cursor[0] == symbol => {
                count += 1;
                cursor = &cursor[1..];
            }
            (CharClass::Space, width) => cursor = &cursor[width..],
            _ => return None,
        }
    }
    (count >= MIN_BREAK_SYMBOLS).then_some(symbol)
}

fn trim_space(bytes: &[u8]) -> &[u8] {
    let mut rest = bytes;
    while let (CharClass::Space, width) = classify::classify(rest) {
        rest = &rest[width..];
    }
    trim_end_space(rest)
}

fn trim_end_space(bytes: &[u8]) -> &[u8] {
    let mut rest = bytes;
    while let (Some(c), width) = bstr::decode_last_utf8(rest) {
        if classify::classify_char(c) != CharClass::Space {
            break;
        }
        rest = &rest[..rest.len() - width];
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(kind: NodeType, content: &str) -> LineKind<'_> {
        LineKind::Heading {
            kind,
            content: content.as_bytes(),
        }
    }

    #[test]
    fn blank_lines() {
        assert_eq!(detect(b""), LineKind::Blank);
        assert_eq!(detect(b"   \t "), LineKind::Blank);
        assert_eq!(detect("\u{2000}".as_bytes()), LineKind::Text);
    }

    #[test]
    fn headings_strip_markers_and_padding() {
        assert_eq!(detect(b"# a"), heading(NodeType::Heading1, "a"));
        assert_eq!(detect(b"   #####  a-b  "), heading(NodeType::Heading5, "a-b"));
        assert_eq!(detect(b"## a ##"), heading(NodeType::Heading2, "a"));
        assert_eq!(detect(b"## a#"), heading(NodeType::Heading2, "a#"));
        assert_eq!(detect(b"###\ta ###   "), heading(NodeType::Heading3, "a"));
    }

    #[test]
    fn rejected_headings() {
        assert_eq!(detect(b"####### a"), LineKind::Text);
        assert_eq!(detect(b"#a"), LineKind::Text);
        assert_eq!(detect(b"    # a"), LineKind::Text);
        assert_eq!(detect(b" \t  # a"), LineKind::Text);
        assert_eq!(detect(b"#"), LineKind::Text);
        assert_eq!(detect(b"## ###"), LineKind::Text);
    }

    #[test]
    fn any_space_class_indents() {
        assert_eq!(detect(b"\t# a"), heading(NodeType::Heading1, "a"));
        assert_eq!(
            detect(" \u{2003}### b".as_bytes()),
            heading(NodeType::Heading3, "b")
        );
        assert_eq!(
            detect("\u{00A0}---".as_bytes()),
            LineKind::ThematicBreak(b'-')
        );
    }

    #[test]
    fn unicode_spaces_trimmed_from_headings() {
        assert_eq!(
            detect("# a\u{00A0}".as_bytes()),
            heading(NodeType::Heading1, "a")
        );
        assert_eq!(
            detect("## a\u{2002}##\u{3000}".as_bytes()),
            heading(NodeType::Heading2, "a")
        );
        assert_eq!(
            detect("## a\u{00A0}#".as_bytes()),
            heading(NodeType::Heading2, "a")
        );
    }

    #[test]
    fn thematic_breaks() {
        assert_eq!(detect(b" ---"), LineKind::ThematicBreak(b'-'));
        assert_eq!(detect(b"  * * * *"), LineKind::ThematicBreak(b'*'));
        assert_eq!(detect(b"___\t"), LineKind::ThematicBreak(b'_'));
        assert_eq!(
            detect("-\u{00A0}-\u{2003}-".as_bytes()),
            LineKind::ThematicBreak(b'-')
        );
    }

    #[test]
    fn rejected_breaks() {
        assert_eq!(detect(b"   _*-*__"), LineKind::Text);
        assert_eq!(detect(b"--"), LineKind::Text);
        assert_eq!(detect(b"---a"), LineKind::Text);
        assert_eq!(detect(b"    ---"), LineKind::Text);
    }
}

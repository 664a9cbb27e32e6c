use blockscan::{Document, Node, NodeType, ParseError, parse};

fn nodes(source: &str) -> Vec<Node> {
    parse(source.as_bytes()).expect("parse failed").children
}

fn single(source: &str) -> (NodeType, String) {
    let nodes = nodes(source);
    assert_eq!(nodes.len(), 1, "expected one node for {:?}, got {:?}", source, nodes);
    let node = &nodes[0];
    assert!(node.children.is_empty());
    (node.node_type, String::from_utf8(node.content.clone()).unwrap())
}

fn kinds(source: &str) -> Vec<NodeType> {
    nodes(source).iter().map(|n| n.node_type).collect()
}

#[test]
fn empty_input_is_an_error() {
    assert_eq!(parse(b""), Err(ParseError::EmptyInput));
}

#[test]
fn blank_only_input_has_no_blocks() {
    assert_eq!(parse(b"\n"), Err(ParseError::EmptyInput));
    assert_eq!(parse(b"  \t\r\n\n"), Err(ParseError::EmptyInput));
}

#[test]
fn plain_text() {
    assert_eq!(single("some text"), (NodeType::Paragraph, "some text".into()));
}

#[test]
fn null_byte_is_replaced() {
    assert_eq!(single("\0"), (NodeType::Paragraph, "\u{FFFD}".into()));
    assert_eq!(
        single("# a\0b\n"),
        (NodeType::Heading1, "a\u{FFFD}b".into())
    );
}

#[test]
fn unicode_spaces_alone_are_content() {
    for space in ["\u{00A0}", "\u{2000}", "\u{2001}", "\u{200A}"] {
        assert_eq!(single(space), (NodeType::Paragraph, space.to_string()));
    }
}

#[test]
fn non_ascii_letters_pass_through() {
    assert_eq!(
        single("𐍈ᏚᎢᎵᎬᎢᎬᏒăîțș"),
        (NodeType::Paragraph, "𐍈ᏚᎢᎵᎬᎢᎬᏒăîțș".into())
    );
}

#[test]
fn links_stay_paragraph_text() {
    assert_eq!(
        single("some text before [test 123](https://littr.me)\n"),
        (
            NodeType::Paragraph,
            "some text before [test 123](https://littr.me)".into()
        )
    );
}

#[test]
fn heading_levels() {
    for level in 1..=6u8 {
        let source = format!("{} ana are mere\n", "#".repeat(level as usize));
        assert_eq!(
            single(&source),
            (NodeType::heading(level).unwrap(), "ana are mere".into())
        );
    }
}

#[test]
fn indented_headings() {
    assert_eq!(single(" # ana are mere\n"), (NodeType::Heading1, "ana are mere".into()));
    assert_eq!(single("  ### ana are mere\n"), (NodeType::Heading3, "ana are mere".into()));
    assert_eq!(single("   #####  ana-are-mere\n"), (NodeType::Heading5, "ana-are-mere".into()));
    assert_eq!(single(" ###### ana-are-mere\n"), (NodeType::Heading6, "ana-are-mere".into()));
}

#[test]
fn heading_closing_sequence() {
    assert_eq!(single("## title ##\n"), (NodeType::Heading2, "title".into()));
    assert_eq!(single("## title#\n"), (NodeType::Heading2, "title#".into()));
    assert_eq!(single("# title   \n"), (NodeType::Heading1, "title".into()));
}

#[test]
fn over_long_marker_is_paragraph() {
    assert_eq!(
        single("####### ana are mere\n"),
        (NodeType::Paragraph, "####### ana are mere".into())
    );
}

#[test]
fn empty_heading_degrades_to_paragraph() {
    assert_eq!(single("#\n"), (NodeType::Paragraph, "#".into()));
    assert_eq!(single("  ## ##"), (NodeType::Paragraph, "  ## ##".into()));
}

#[test]
fn marker_without_space_is_paragraph() {
    assert_eq!(single("#hashtag"), (NodeType::Paragraph, "#hashtag".into()));
}

#[test]
fn thematic_break_symbols() {
    assert_eq!(single(" ---\n"), (NodeType::ThematicBreak, "-".into()));
    assert_eq!(single("  ***\n"), (NodeType::ThematicBreak, "*".into()));
    assert_eq!(single("  * * * *\n"), (NodeType::ThematicBreak, "*".into()));
    assert_eq!(single("   ___\r"), (NodeType::ThematicBreak, "_".into()));
}

#[test]
fn mixed_symbols_are_paragraph() {
    assert_eq!(single("   _*-*__"), (NodeType::Paragraph, "   _*-*__".into()));
    assert_eq!(single("--\n"), (NodeType::Paragraph, "--".into()));
}

#[test]
fn deep_indentation_is_plain_text() {
    assert_eq!(single("    # not a heading"), (NodeType::Paragraph, "    # not a heading".into()));
    assert_eq!(single("    ---"), (NodeType::Paragraph, "    ---".into()));
}

#[test]
fn tab_and_unicode_space_indentation() {
    assert_eq!(single("\t# a\n"), (NodeType::Heading1, "a".into()));
    assert_eq!(single("\u{00A0}---\n"), (NodeType::ThematicBreak, "-".into()));
    assert_eq!(single(" \u{2003}### b\n"), (NodeType::Heading3, "b".into()));
}

#[test]
fn heading_text_drops_unicode_padding() {
    assert_eq!(single("# a\u{00A0}\n"), (NodeType::Heading1, "a".into()));
}

#[test]
fn consecutive_lines_join() {
    assert_eq!(
        single("first line\nsecond line\n"),
        (NodeType::Paragraph, "first line\nsecond line".into())
    );
    assert_eq!(
        single("first\r\n  second"),
        (NodeType::Paragraph, "first\n  second".into())
    );
}

#[test]
fn blank_line_splits_paragraphs() {
    let nodes = nodes("first\n\nsecond\n");
    assert_eq!(
        nodes,
        vec![
            Node::new(NodeType::Paragraph, "first"),
            Node::new(NodeType::Paragraph, "second"),
        ]
    );
}

#[test]
fn openers_interrupt_paragraphs() {
    assert_eq!(
        kinds("text\n# title\nmore\n***\nend"),
        vec![
            NodeType::Paragraph,
            NodeType::Heading1,
            NodeType::Paragraph,
            NodeType::ThematicBreak,
            NodeType::Paragraph,
        ]
    );
}

#[test]
fn readme_like_document() {
    let source = "# Ragel playground\n\
                  ---\n\
                  A small repository to learn ragel \n\
                  \n\
                  Using the [0.27](http://spec.commonmark.org/0.27/) version.\n";
    let expected = Document::new(vec![
        Node::new(NodeType::Heading1, "Ragel playground"),
        Node::new(NodeType::ThematicBreak, "-"),
        Node::new(NodeType::Paragraph, "A small repository to learn ragel "),
        Node::new(
            NodeType::Paragraph,
            "Using the [0.27](http://spec.commonmark.org/0.27/) version.",
        ),
    ]);
    let actual = parse(source.as_bytes()).unwrap();
    assert_eq!(actual.diff(&expected), None);
    assert_eq!(actual, expected);
}

#[test]
fn invalid_utf8_is_kept_verbatim() {
    let doc = parse(&[b'a', 0xFF, b'b']).unwrap();
    assert_eq!(doc.children, vec![Node::new(NodeType::Paragraph, vec![b'a', 0xFF, b'b'])]);
}

#[test]
fn parsing_is_repeatable() {
    let source = b"# h\n\npara\ngraph\n\n- - -\n";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn diff_reports_first_mismatch() {
    let actual = Document::new(vec![Node::new(NodeType::Heading1, "a")]);

    let wrong_type = Document::new(vec![Node::new(NodeType::Heading2, "a")]);
    assert_eq!(
        actual.diff(&wrong_type).unwrap(),
        "[0] node type: expected Heading2, got Heading1"
    );

    let wrong_content = Document::new(vec![Node::new(NodeType::Heading1, "b")]);
    assert_eq!(
        actual.diff(&wrong_content).unwrap(),
        "[0] node content: expected \"b\", got \"a\""
    );

    let wrong_len = Document::new(Vec::new());
    assert_eq!(
        actual.diff(&wrong_len).unwrap(),
        "children length: expected 0, got 1"
    );
}

#[test]
fn display_dump() {
    let doc = parse(b"# Title\n---\nline one\nline two\n").unwrap();
    assert_eq!(
        doc.to_string(),
        "Document\n  Heading1 \"Title\"\n  ThematicBreak \"-\"\n  Paragraph \"line one\\nline two\"\n"
    );
}

#[test]
fn node_type_names_round_trip() {
    for kind in NodeType::ALL {
        assert_eq!(kind.name().parse::<NodeType>(), Ok(kind));
    }
    assert!("Heading7".parse::<NodeType>().is_err());
    assert_eq!(NodeType::Heading4.heading_level(), Some(4));
    assert_eq!(NodeType::ThematicBreak.heading_level(), None);
    assert_eq!(NodeType::heading(0), None);
    assert_eq!(NodeType::heading(7), None);
}

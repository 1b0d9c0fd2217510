use lib_pairalign::AlignmentColumn;

use crate::error::Error;

use super::PlainTextRenderer;

fn render_char(c: Option<&char>) -> String {
    c.map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}

fn columns(reference: &str, query: &str) -> Vec<AlignmentColumn<char>> {
    reference
        .chars()
        .zip(query.chars())
        .map(|(reference, query)| {
            (
                (reference != '-').then_some(reference),
                (query != '-').then_some(query),
            )
        })
        .collect()
}

#[test]
fn test_simple_alignment() {
    let renderer = PlainTextRenderer::default();
    let output = renderer
        .render_to_string(&columns("A-C", "AGC"), render_char, char::eq)
        .unwrap();

    assert_eq!(output, "A-C\n| |\nAGC\n\n");
}

#[test]
fn test_mismatch_is_not_marked() {
    let renderer = PlainTextRenderer::default();
    let output = renderer
        .render_to_string(&columns("ACGT", "AGGT"), render_char, char::eq)
        .unwrap();

    assert_eq!(output, "ACGT\n| ||\nAGGT\n\n");
}

#[test]
fn test_padding() {
    let alignment: Vec<AlignmentColumn<&str>> = vec![
        (Some("if"), Some("while")),
        (None, Some("not")),
        (Some("x"), Some("x")),
    ];
    let output = PlainTextRenderer::default()
        .render_to_string(
            &alignment,
            |word| format!("{} ", word.copied().unwrap_or("-")),
            |a, b| a == b,
        )
        .unwrap();

    assert_eq!(output, "if    -   x\n          |\nwhile not x\n\n");
}

#[test]
fn test_wrapping() {
    let renderer = PlainTextRenderer::new(4).unwrap();
    let output = renderer
        .render_to_string(&columns("ABCDEFGHIJ", "ABCDEFGHIJ"), render_char, char::eq)
        .unwrap();

    assert_eq!(
        output,
        "ABCD\n||||\nABCD\n\nEFGH\n||||\nEFGH\n\nIJ\n||\nIJ\n\n"
    );
}

#[test]
fn test_wide_column() {
    let alignment: Vec<AlignmentColumn<&str>> =
        vec![(Some("a"), Some("a")), (Some("long"), None), (Some("b"), Some("b"))];
    let output = PlainTextRenderer::with_match_marker(3, None)
        .unwrap()
        .render_to_string(
            &alignment,
            |word| word.copied().unwrap_or("").to_string(),
            |a, b| a == b,
        )
        .unwrap();

    assert_eq!(output, "a\na\n\nlong\n\n\nb\nb\n\n");
}

#[test]
fn test_empty_alignment() {
    let output = PlainTextRenderer::default()
        .render_to_string(&columns("", ""), render_char, char::eq)
        .unwrap();
    assert_eq!(output, "");
}

#[test]
fn test_zero_line_width() {
    assert!(matches!(
        PlainTextRenderer::new(0),
        Err(Error::ZeroLineWidth)
    ));
}

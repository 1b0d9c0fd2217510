use crate::token::{Token, TokenKind, TokenizationError, Tokenizer};

use super::SourceTokenizer;

use TokenKind::*;

fn tokenize(source: &str) -> Vec<Token> {
    SourceTokenizer::default().tokenize(source).unwrap()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|token| token.kind).collect()
}

fn texts(source: &str, kind: TokenKind) -> Vec<std::string::String> {
    tokenize(source)
        .into_iter()
        .filter(|token| token.kind == kind)
        .map(|token| token.text().to_string())
        .collect()
}

#[test]
fn simple_statement() {
    assert_eq!(
        kinds("x = 1\n"),
        vec![Name, Operator, Number, Newline, EndMarker]
    );
    assert_eq!(kinds(""), vec![EndMarker]);
}

#[test]
fn missing_final_newline() {
    let tokens = tokenize("x = 1");
    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![Name, Operator, Number, Newline, EndMarker]
    );
    assert_eq!(tokens[3].text, None);

    assert_eq!(
        kinds("if x:\n  y"),
        vec![Name, Name, Colon, Newline, Indent, Name, Newline, Dedent, EndMarker]
    );
}

#[test]
fn indentation() {
    assert_eq!(
        kinds("if x:\n    y = 2\nz\n"),
        vec![
            Name, Name, Colon, Newline, Indent, Name, Operator, Number, Newline, Dedent, Name,
            Newline, EndMarker
        ]
    );
    assert_eq!(
        kinds("def f():\n  if x:\n    return\n"),
        vec![
            Name,
            Name,
            OpenBracket,
            CloseBracket,
            Colon,
            Newline,
            Indent,
            Name,
            Name,
            Colon,
            Newline,
            Indent,
            Name,
            Newline,
            Dedent,
            Dedent,
            EndMarker
        ]
    );
}

#[test]
fn tab_size() {
    let source = "if x:\n\ty\n        z\n";
    assert_eq!(
        kinds(source),
        vec![
            Name, Name, Colon, Newline, Indent, Name, Newline, Name, Newline, Dedent, EndMarker
        ]
    );

    let tokens = SourceTokenizer::new(4).tokenize(source).unwrap();
    assert_eq!(
        tokens.iter().filter(|token| token.kind == Indent).count(),
        2
    );
    assert_eq!(
        tokens.iter().filter(|token| token.kind == Dedent).count(),
        2
    );
}

#[test]
fn blank_and_comment_lines() {
    assert_eq!(
        kinds("# header\n\nx  # trailing\n   \n"),
        vec![
            Comment, LineBreak, LineBreak, Name, Comment, Newline, LineBreak, EndMarker
        ]
    );
    assert_eq!(texts("# header\nx\n", Comment), vec!["# header"]);
}

#[test]
fn comment_lines_do_not_change_indentation() {
    assert_eq!(
        kinds("if x:\n    y\n# done\n    z\n"),
        vec![
            Name, Name, Colon, Newline, Indent, Name, Newline, Comment, LineBreak, Name, Newline,
            Dedent, EndMarker
        ]
    );
}

#[test]
fn implicit_line_joining() {
    assert_eq!(
        kinds("f(a,\n  b)\n"),
        vec![
            Name,
            OpenBracket,
            Name,
            Comma,
            LineBreak,
            Name,
            CloseBracket,
            Newline,
            EndMarker
        ]
    );
}

#[test]
fn explicit_line_joining() {
    assert_eq!(
        kinds("x = 1 + \\\n    2\n"),
        vec![Name, Operator, Number, Operator, Number, Newline, EndMarker]
    );
}

#[test]
fn strings() {
    let source = "s = r'a\\'b' + \"\"\"x\ny\"\"\" + b\"c\" + ''\n";
    assert_eq!(
        texts(source, String),
        vec!["r'a\\'b'", "\"\"\"x\ny\"\"\"", "b\"c\"", "''"]
    );

    let tokens = tokenize(source);
    let last_string = tokens
        .iter()
        .filter(|token| token.kind == String)
        .last()
        .unwrap();
    assert_eq!((last_string.line, last_string.column), (2, 15));
}

#[test]
fn numbers() {
    assert_eq!(
        texts("0x1F 1_000 3.14 .5 1e-3 2j 7.", Number),
        vec!["0x1F", "1_000", "3.14", ".5", "1e-3", "2j", "7."]
    );
}

#[test]
fn operators() {
    let source = "a **= b // c -> d := e ... f.g";
    assert_eq!(texts(source, Operator), vec!["**=", "//", "->", ":=", "..."]);
    assert_eq!(texts(source, Dot), vec!["."]);
}

#[test]
fn positions() {
    let tokens = tokenize("x = 1\n  \nyy(z)\n");
    let yy = tokens.iter().find(|token| token.text() == "yy").unwrap();
    assert_eq!((yy.line, yy.column), (3, 1));
    let z = tokens.iter().find(|token| token.text() == "z").unwrap();
    assert_eq!((z.line, z.column), (3, 4));
}

#[test]
fn errors() {
    let tokenizer = SourceTokenizer::default();

    assert!(matches!(
        tokenizer.tokenize("x\ny = 'abc\n"),
        Err(TokenizationError::UnterminatedString { line: 2, column: 5 })
    ));
    assert!(matches!(
        tokenizer.tokenize("'''never closed"),
        Err(TokenizationError::UnterminatedString { line: 1, column: 1 })
    ));
    assert!(matches!(
        tokenizer.tokenize("x = $"),
        Err(TokenizationError::UnexpectedCharacter {
            character: '$',
            line: 1,
            column: 5
        })
    ));
    assert!(matches!(
        tokenizer.tokenize("a)"),
        Err(TokenizationError::UnbalancedBracket {
            bracket: ')',
            line: 1,
            column: 2
        })
    ));
    assert!(matches!(
        tokenizer.tokenize("(a]"),
        Err(TokenizationError::UnbalancedBracket { bracket: ']', .. })
    ));
    assert!(matches!(
        tokenizer.tokenize("(a\n"),
        Err(TokenizationError::UnclosedBracket {
            bracket: '(',
            line: 1,
            column: 1
        })
    ));
    assert!(matches!(
        tokenizer.tokenize("if x:\n    a\n  b\n"),
        Err(TokenizationError::InconsistentDedent { line: 3, column: 3 })
    ));
}

#[test]
#[should_panic(expected = "tab size must be positive")]
fn zero_tab_size() {
    SourceTokenizer::new(0);
}

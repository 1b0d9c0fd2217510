use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

pub mod code_alignment;
pub mod glyph;
pub mod source_tokenizer;

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TokenKind {
    Name,
    Number,
    String,
    Comment,
    Operator,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    Dot,
    /// The end of a logical line.
    Newline,
    /// A line break that does not end a logical line, e.g. after a blank line or inside brackets.
    LineBreak,
    Indent,
    Dedent,
    EndMarker,
}

/// A lexical token of a source text.
///
/// Lines and columns are 1-based, columns are counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token, if it has any.
    pub text: Option<String>,
    pub line: usize,
    pub column: usize,
}

/// Turns a source text into an ordered sequence of tokens.
pub trait Tokenizer {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, TokenizationError>;
}

#[derive(Debug, Error)]
pub enum TokenizationError {
    #[error("unterminated string starting at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unexpected character {character:?} at line {line}, column {column}")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },

    #[error("unbalanced closing bracket {bracket:?} at line {line}, column {column}")]
    UnbalancedBracket {
        bracket: char,
        line: usize,
        column: usize,
    },

    #[error("bracket {bracket:?} opened at line {line}, column {column} is never closed")]
    UnclosedBracket {
        bracket: char,
        line: usize,
        column: usize,
    },

    #[error("dedent at line {line}, column {column} does not match any outer indentation level")]
    InconsistentDedent { line: usize, column: usize },

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TokenKind {
    pub const ALL: [Self; 15] = [
        Self::Name,
        Self::Number,
        Self::String,
        Self::Comment,
        Self::Operator,
        Self::OpenBracket,
        Self::CloseBracket,
        Self::Comma,
        Self::Colon,
        Self::Dot,
        Self::Newline,
        Self::LineBreak,
        Self::Indent,
        Self::Dedent,
        Self::EndMarker,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::String => "string",
            Self::Comment => "comment",
            Self::Operator => "operator",
            Self::OpenBracket => "open_bracket",
            Self::CloseBracket => "close_bracket",
            Self::Comma => "comma",
            Self::Colon => "colon",
            Self::Dot => "dot",
            Self::Newline => "newline",
            Self::LineBreak => "line_break",
            Self::Indent => "indent",
            Self::Dedent => "dedent",
            Self::EndMarker => "end_marker",
        }
    }
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            line,
            column,
        }
    }

    pub fn without_text(kind: TokenKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: None,
            line,
            column,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.kind)?;
        if let Some(text) = &self.text {
            write!(f, " {text:?}")?;
        }
        write!(f, " at {}:{}", self.line, self.column)
    }
}

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while_m_n, take_while1},
    character::complete::{char, one_of, satisfy},
    combinator::{opt, recognize},
    error::{Error as NomError, ErrorKind},
    sequence::{pair, tuple},
};

use crate::io::{
    comment, indentation_width, is_any_line_break, line_break, line_continuation, whitespace,
};

use super::{Token, TokenKind, TokenizationError, Tokenizer};

#[cfg(test)]
mod tests;

/// Operators that are not brackets or separators, longest first.
const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "!=", "%=", "&=", "**", "*=", "+=", "-=", "->", "//", "/=",
    ":=", "<<", "<=", "==", ">=", ">>", "@=", "^=", "|=", "%", "&", "*", "+", "-", "/", "<", "=",
    ">", "@", "^", "|", "~", "!",
];

/// A tokenizer for Python-like source text.
///
/// Logical lines end with [`TokenKind::Newline`], while blank lines, comment-only lines and line breaks inside brackets produce [`TokenKind::LineBreak`].
/// A backslash at the end of a line joins it with the next line without producing a token.
/// Changes of the indentation of logical lines produce [`TokenKind::Indent`] and [`TokenKind::Dedent`] tokens.
/// The token sequence always ends with a [`TokenKind::Newline`] (unless the source has no logical line), the remaining dedents and a [`TokenKind::EndMarker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTokenizer {
    tab_size: usize,
}

struct TokenizerState<'source> {
    cursor: Cursor<'source>,
    tab_size: usize,
    tokens: Vec<Token>,
    indents: Vec<usize>,
    brackets: Vec<(char, usize, usize)>,
    at_line_start: bool,
}

#[derive(Debug, Clone, Copy)]
struct Cursor<'source> {
    remaining: &'source str,
    line: usize,
    column: usize,
}

type TokenizationResult<T> = Result<T, TokenizationError>;

impl SourceTokenizer {
    pub const DEFAULT_TAB_SIZE: usize = 8;

    /// Creates a tokenizer with the given tab size, which must not be zero.
    pub fn new(tab_size: usize) -> Self {
        assert!(tab_size > 0, "tab size must be positive");
        Self { tab_size }
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }
}

impl Default for SourceTokenizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAB_SIZE)
    }
}

impl Tokenizer for SourceTokenizer {
    fn tokenize(&self, source: &str) -> TokenizationResult<Vec<Token>> {
        let mut state = TokenizerState {
            cursor: Cursor::new(source),
            tab_size: self.tab_size,
            tokens: Vec::new(),
            indents: Vec::new(),
            brackets: Vec::new(),
            at_line_start: true,
        };

        while !state.cursor.is_empty() {
            if state.at_line_start && state.brackets.is_empty() {
                state.start_line()?;
            } else {
                state.next_token()?;
            }
        }
        state.finish()?;

        Ok(state.tokens)
    }
}

impl<'source> TokenizerState<'source> {
    fn push(&mut self, kind: TokenKind, text: Option<&str>, (line, column): (usize, usize)) {
        self.tokens.push(Token {
            kind,
            text: text.map(ToString::to_string),
            line,
            column,
        });
    }

    /// Handles the indentation of a physical line outside of brackets.
    /// Blank and comment-only lines are consumed entirely.
    fn start_line(&mut self) -> TokenizationResult<()> {
        let indentation = self.cursor.lex(whitespace).unwrap_or_default();
        if self.cursor.is_empty() {
            return Ok(());
        }

        let position = self.cursor.position();
        if let Some(text) = self.cursor.lex(comment) {
            self.push(TokenKind::Comment, Some(text), position);
        }
        let line_break_position = self.cursor.position();
        if let Some(text) = self.cursor.lex(line_break) {
            self.push(TokenKind::LineBreak, Some(text), line_break_position);
            return Ok(());
        }
        if self.cursor.is_empty() {
            return Ok(());
        }

        self.indent(indentation, position)?;
        self.at_line_start = false;
        Ok(())
    }

    fn indent(&mut self, indentation: &str, position: (usize, usize)) -> TokenizationResult<()> {
        let width = indentation_width(indentation, self.tab_size);
        let current = self.indents.last().copied().unwrap_or(0);

        if width > current {
            self.indents.push(width);
            self.push(TokenKind::Indent, Some(indentation), (position.0, 1));
        } else {
            while width < self.indents.last().copied().unwrap_or(0) {
                self.indents.pop();
                self.push(TokenKind::Dedent, None, position);
            }

            if width != self.indents.last().copied().unwrap_or(0) {
                return Err(TokenizationError::InconsistentDedent {
                    line: position.0,
                    column: position.1,
                });
            }
        }

        Ok(())
    }

    fn next_token(&mut self) -> TokenizationResult<()> {
        self.cursor.lex(whitespace);
        if self.cursor.is_empty() {
            return Ok(());
        }

        let position = self.cursor.position();
        let (line, column) = position;

        if let Some(text) = self.cursor.lex(line_break) {
            let kind = if self.brackets.is_empty() {
                TokenKind::Newline
            } else {
                TokenKind::LineBreak
            };
            self.push(kind, Some(text), position);
            self.at_line_start = true;
            return Ok(());
        }
        self.at_line_start = false;

        if let Some(text) = self.cursor.lex(comment) {
            self.push(TokenKind::Comment, Some(text), position);
        } else if self.cursor.lex(line_continuation).is_some() {
            // Joined with the next line.
        } else if let Ok((_, (prefix, quote))) = string_start(self.cursor.remaining) {
            let start_length = prefix.len() + quote.len();
            let body_length = string_body_length(&self.cursor.remaining[start_length..], quote)
                .ok_or(TokenizationError::UnterminatedString { line, column })?;
            let text = self.cursor.advance(start_length + body_length);
            self.push(TokenKind::String, Some(text), position);
        } else if let Some(text) = self.cursor.lex(name) {
            self.push(TokenKind::Name, Some(text), position);
        } else if let Some(text) = self.cursor.lex(number) {
            self.push(TokenKind::Number, Some(text), position);
        } else if let Some(text) = self.cursor.lex(operator) {
            self.push(TokenKind::Operator, Some(text), position);
        } else if let Some(text) = self.cursor.lex(single_character) {
            let kind = self.punctuation(text, position)?;
            self.push(kind, Some(text), position);
        }

        Ok(())
    }

    fn punctuation(&mut self, text: &str, (line, column): (usize, usize)) -> TokenizationResult<TokenKind> {
        let character = text.chars().next().unwrap_or_default();

        Ok(match character {
            '(' | '[' | '{' => {
                self.brackets.push((character, line, column));
                TokenKind::OpenBracket
            }
            ')' | ']' | '}' => {
                let expected = match character {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match self.brackets.pop() {
                    Some((open, _, _)) if open == expected => TokenKind::CloseBracket,
                    _ => {
                        return Err(TokenizationError::UnbalancedBracket {
                            bracket: character,
                            line,
                            column,
                        });
                    }
                }
            }
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            _ => {
                return Err(TokenizationError::UnexpectedCharacter {
                    character,
                    line,
                    column,
                });
            }
        })
    }

    fn finish(&mut self) -> TokenizationResult<()> {
        if let Some(&(bracket, line, column)) = self.brackets.last() {
            return Err(TokenizationError::UnclosedBracket {
                bracket,
                line,
                column,
            });
        }

        let position = self.cursor.position();
        if !self.at_line_start {
            self.push(TokenKind::Newline, None, position);
        }
        while self.indents.pop().is_some() {
            self.push(TokenKind::Dedent, None, position);
        }
        self.push(TokenKind::EndMarker, None, position);

        Ok(())
    }
}

impl<'source> Cursor<'source> {
    fn new(source: &'source str) -> Self {
        Self {
            remaining: source,
            line: 1,
            column: 1,
        }
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Consumes the prefix recognised by the parser, if it matches.
    fn lex(
        &mut self,
        mut parser: impl FnMut(&'source str) -> IResult<&'source str, &'source str>,
    ) -> Option<&'source str> {
        let (_, lexeme) = parser(self.remaining).ok()?;
        Some(self.advance(lexeme.len()))
    }

    fn advance(&mut self, length: usize) -> &'source str {
        let (consumed, remaining) = self.remaining.split_at(length);
        self.remaining = remaining;

        let mut characters = consumed.chars().peekable();
        while let Some(c) = characters.next() {
            if c == '\n' || (c == '\r' && characters.peek() != Some(&'\n')) {
                self.line += 1;
                self.column = 1;
            } else if c != '\r' {
                self.column += 1;
            }
        }

        consumed
    }
}

fn name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c == '_' || c.is_alphabetic()),
        take_while(|c: char| c == '_' || c.is_alphanumeric()),
    ))(input)
}

fn digits(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_digit()),
        take_while(|c: char| c.is_ascii_digit() || c == '_'),
    ))(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    let radix_number = recognize(alt((
        pair(
            tag_no_case("0x"),
            take_while1(|c: char| c.is_ascii_hexdigit() || c == '_'),
        ),
        pair(
            tag_no_case("0o"),
            take_while1(|c: char| ('0'..='7').contains(&c) || c == '_'),
        ),
        pair(
            tag_no_case("0b"),
            take_while1(|c: char| c == '0' || c == '1' || c == '_'),
        ),
    )));
    let exponent = recognize(tuple((one_of("eE"), opt(one_of("+-")), digits)));
    let decimal_number = recognize(tuple((
        alt((
            recognize(pair(digits, opt(pair(char('.'), opt(digits))))),
            recognize(pair(char('.'), digits)),
        )),
        opt(exponent),
        opt(one_of("jJ")),
    )));

    alt((radix_number, decimal_number))(input)
}

fn operator(input: &str) -> IResult<&str, &str> {
    OPERATORS
        .iter()
        .find_map(|operator| tag::<_, _, NomError<&str>>(*operator)(input).ok())
        .ok_or(nom::Err::Error(NomError::new(input, ErrorKind::Tag)))
}

fn single_character(input: &str) -> IResult<&str, &str> {
    recognize(satisfy(|_| true))(input)
}

/// The prefix and the opening quote of a string literal.
fn string_start(input: &str) -> IResult<&str, (&str, &str)> {
    pair(
        take_while_m_n(0, 2, |c: char| "rRbBfFuU".contains(c)),
        alt((tag("\"\"\""), tag("'''"), tag("\""), tag("'"))),
    )(input)
}

/// The length of a string literal's body including the closing quote.
/// Returns `None` if the string is not terminated.
fn string_body_length(input: &str, quote: &str) -> Option<usize> {
    let multiline = quote.len() == 3;
    let mut characters = input.char_indices().peekable();

    while let Some((offset, c)) = characters.next() {
        if c == '\\' {
            // Escaped character, which may be a line break.
            if let Some((_, '\r')) = characters.next() {
                characters.next_if(|(_, c)| *c == '\n');
            }
        } else if input[offset..].starts_with(quote) {
            return Some(offset + quote.len());
        } else if !multiline && is_any_line_break(c) {
            return None;
        }
    }

    None
}

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till, take_while},
    character::complete::char,
    combinator::recognize,
    sequence::pair,
};

/// Whitespace within a line, possibly empty.
pub fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(is_whitespace)(input)
}

pub fn line_break(input: &str) -> IResult<&str, &str> {
    alt((tag("\r\n"), tag("\n"), tag("\r")))(input)
}

/// A `#` comment up to, but excluding, the next line break.
pub fn comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('#'), take_till(is_any_line_break)))(input)
}

/// A backslash directly followed by a line break.
pub fn line_continuation(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), line_break))(input)
}

/// The display width of leading whitespace.
///
/// Tabs advance to the next multiple of `tab_size`, and form feeds reset the width.
pub fn indentation_width(indentation: &str, tab_size: usize) -> usize {
    indentation.chars().fold(0, |width, c| match c {
        '\t' => (width / tab_size + 1) * tab_size,
        '\x0c' => 0,
        _ => width + 1,
    })
}

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_any_line_break(c)
}

pub fn is_any_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

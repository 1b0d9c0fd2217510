use std::io::Write;

use itertools::Itertools;
use lib_pairalign::AlignmentColumn;
use log::{debug, trace};

use crate::error::{Error, Result};

#[cfg(test)]
mod tests;

/// Renders pairwise alignments as plain text.
///
/// Each block of output consists of the reference line, an optional marker line that marks matching columns, the query line and an empty line.
/// Blocks are wrapped such that no line exceeds the line width, unless a single column is wider than the line width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainTextRenderer {
    line_width: usize,
    match_marker: Option<char>,
}

#[derive(Debug, Clone)]
struct RenderedColumn {
    reference: String,
    query: String,
    is_match: bool,
    width: usize,
}

impl PlainTextRenderer {
    pub const DEFAULT_LINE_WIDTH: usize = 80;
    pub const DEFAULT_MATCH_MARKER: char = '|';

    pub fn new(line_width: usize) -> Result<Self> {
        Self::with_match_marker(line_width, Some(Self::DEFAULT_MATCH_MARKER))
    }

    /// Creates a renderer that marks matching columns with the given marker, or that omits the marker line if it is `None`.
    pub fn with_match_marker(line_width: usize, match_marker: Option<char>) -> Result<Self> {
        if line_width == 0 {
            return Err(Error::ZeroLineWidth);
        }

        Ok(Self {
            line_width,
            match_marker,
        })
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub fn match_marker(&self) -> Option<char> {
        self.match_marker
    }

    /// Renders the alignment into `output`.
    ///
    /// `render_element` renders a single side of a column, receiving `None` for gaps.
    /// `is_match` decides which columns receive a match marker.
    pub fn render<T>(
        &self,
        mut output: impl Write,
        alignment: &[AlignmentColumn<T>],
        mut render_element: impl FnMut(Option<&T>) -> String,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> Result<()> {
        debug!(
            "Rendering alignment with {} columns into lines of width {}",
            alignment.len(),
            self.line_width
        );

        let mut block = Vec::new();
        let mut block_width = 0;

        for (reference, query) in alignment {
            let column = RenderedColumn::new(
                render_element(reference.as_ref()),
                render_element(query.as_ref()),
                matches!((reference, query), (Some(reference), Some(query)) if is_match(reference, query)),
            );

            if block_width > 0 && block_width + column.width > self.line_width {
                self.write_block(&mut output, &block)?;
                block.clear();
                block_width = 0;
            }

            block_width += column.width;
            block.push(column);
        }

        if !block.is_empty() {
            self.write_block(&mut output, &block)?;
        }

        Ok(())
    }

    pub fn render_to_string<T>(
        &self,
        alignment: &[AlignmentColumn<T>],
        render_element: impl FnMut(Option<&T>) -> String,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> Result<String> {
        let mut output = Vec::new();
        self.render(&mut output, alignment, render_element, is_match)?;
        Ok(String::from_utf8(output)?)
    }

    fn write_block(&self, mut output: impl Write, block: &[RenderedColumn]) -> Result<()> {
        trace!("Writing block of {} columns", block.len());

        let reference = block.iter().map(|column| &column.reference).join("");
        writeln!(output, "{}", reference.trim_end())?;

        if let Some(match_marker) = self.match_marker {
            let markers = block
                .iter()
                .map(|column| {
                    let marker = if column.is_match { match_marker } else { ' ' };
                    format!("{marker:<width$}", width = column.width)
                })
                .join("");
            writeln!(output, "{}", markers.trim_end())?;
        }

        let query = block.iter().map(|column| &column.query).join("");
        writeln!(output, "{}", query.trim_end())?;
        writeln!(output)?;

        Ok(())
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self {
            line_width: Self::DEFAULT_LINE_WIDTH,
            match_marker: Some(Self::DEFAULT_MATCH_MARKER),
        }
    }
}

impl RenderedColumn {
    /// Pads both sides to the same number of characters.
    fn new(reference: String, query: String, is_match: bool) -> Self {
        let width = reference.chars().count().max(query.chars().count());

        Self {
            reference: format!("{reference:<width$}"),
            query: format!("{query:<width$}"),
            is_match,
            width,
        }
    }
}

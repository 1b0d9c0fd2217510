use std::{collections::BTreeMap, str::FromStr};

use crate::error::{Error, Result};

use super::TokenKind;

/// How a token kind is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphEntry {
    Glyph(char),
    /// Display the kind with the fallback glyph of the table.
    Fallback,
}

/// Maps every token kind to a single display character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    entries: BTreeMap<TokenKind, GlyphEntry>,
    fallback: char,
    gap: char,
}

impl GlyphTable {
    pub const DEFAULT_FALLBACK: char = ' ';
    pub const DEFAULT_GAP: char = '-';

    /// Creates a glyph table, failing if any token kind has no entry.
    pub fn new(
        entries: impl IntoIterator<Item = (TokenKind, GlyphEntry)>,
        fallback: char,
        gap: char,
    ) -> Result<Self> {
        let entries: BTreeMap<_, _> = entries.into_iter().collect();

        if let Some(kind) = TokenKind::ALL
            .iter()
            .find(|kind| !entries.contains_key(*kind))
        {
            return Err(Error::MissingGlyph(*kind));
        }

        Ok(Self {
            entries,
            fallback,
            gap,
        })
    }

    pub fn default_entry(kind: TokenKind) -> GlyphEntry {
        use GlyphEntry::{Fallback, Glyph};

        match kind {
            TokenKind::Name => Glyph('N'),
            TokenKind::Number => Glyph('0'),
            TokenKind::String => Glyph('S'),
            TokenKind::Comment => Glyph('#'),
            TokenKind::Operator => Glyph('+'),
            TokenKind::OpenBracket => Glyph('('),
            TokenKind::CloseBracket => Glyph(')'),
            TokenKind::Comma => Glyph(','),
            TokenKind::Colon => Glyph(':'),
            TokenKind::Dot => Glyph('.'),
            TokenKind::Newline => Glyph('$'),
            TokenKind::LineBreak => Fallback,
            TokenKind::Indent => Glyph('>'),
            TokenKind::Dedent => Glyph('<'),
            TokenKind::EndMarker => Fallback,
        }
    }

    pub fn entry(&self, kind: TokenKind) -> GlyphEntry {
        self.entries
            .get(&kind)
            .copied()
            .unwrap_or(GlyphEntry::Fallback)
    }

    pub fn kind_glyph(&self, kind: TokenKind) -> char {
        match self.entry(kind) {
            GlyphEntry::Glyph(glyph) => glyph,
            GlyphEntry::Fallback => self.fallback,
        }
    }

    /// The glyph of a token kind, or the gap glyph for `None`.
    pub fn glyph(&self, kind: Option<TokenKind>) -> char {
        kind.map(|kind| self.kind_glyph(kind)).unwrap_or(self.gap)
    }

    pub fn fallback(&self) -> char {
        self.fallback
    }

    pub fn gap(&self) -> char {
        self.gap
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self {
            entries: TokenKind::ALL
                .into_iter()
                .map(|kind| (kind, Self::default_entry(kind)))
                .collect(),
            fallback: Self::DEFAULT_FALLBACK,
            gap: Self::DEFAULT_GAP,
        }
    }
}

impl FromStr for GlyphEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "fallback" {
            return Ok(Self::Fallback);
        }

        let mut characters = s.chars();
        match (characters.next(), characters.next()) {
            (Some(glyph), None) => Ok(Self::Glyph(glyph)),
            _ => Err(Error::InvalidGlyph(s.to_string())),
        }
    }
}

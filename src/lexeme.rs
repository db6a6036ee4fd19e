//! Lexeme representation.
//!
//! A [`Lexeme`] is one token candidate produced during a pass over the
//! analysis buffer: a position, a length, and a semantic type. Its text
//! is materialized lazily from the buffer just before it is handed to
//! the caller.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// The semantic type of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LexemeType {
    /// Unrecognized.
    #[default]
    Unknown,
    /// Latin-letter word.
    Letter,
    /// Arabic-digit number.
    Arabic,
    /// Mixed letters/digits/connectors.
    Alphanum,
    /// Chinese dictionary word.
    CnWord,
    /// Single Chinese character (fallback).
    CnChar,
    /// Single character from another CJK script (fallback).
    OtherCjk,
    /// Chinese numeral run.
    CnNum,
    /// Chinese quantifier (classifier).
    CnQuant,
    /// Merged numeral + quantifier compound.
    CnNumQuant,
}

impl LexemeType {
    /// String form used in display output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LexemeType::Unknown => "UNKNOWN",
            LexemeType::Letter => "LETTER",
            LexemeType::Arabic => "ARABIC",
            LexemeType::Alphanum => "ALPHANUM",
            LexemeType::CnWord => "CN_WORD",
            LexemeType::CnChar => "CN_CHAR",
            LexemeType::OtherCjk => "OTHER_CJK",
            LexemeType::CnNum => "CN_NUM",
            LexemeType::CnQuant => "CN_QUANT",
            LexemeType::CnNumQuant => "CN_NUM_QUANT",
        }
    }
}

/// A single token candidate.
///
/// Positions are kept relative to the buffer that produced the lexeme:
/// `offset` is the absolute stream position of that buffer's start and
/// `begin` the position within it. [`Lexeme::start`] / [`Lexeme::stop`]
/// give the absolute character span.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexeme {
    /// Absolute stream position of the owning buffer's start.
    offset: usize,
    /// Start position relative to the buffer.
    begin: usize,
    /// Length in characters.
    length: usize,
    /// Semantic type.
    lexeme_type: LexemeType,
    /// Materialized text; empty until filled in at output time.
    text: String,
}

impl Lexeme {
    /// Create a lexeme.
    pub fn new(offset: usize, begin: usize, length: usize, lexeme_type: LexemeType) -> Self {
        Lexeme {
            offset,
            begin,
            length,
            lexeme_type,
            text: String::new(),
        }
    }

    /// Start position relative to the owning buffer.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Length in characters.
    pub fn length(&self) -> usize {
        self.length
    }

    /// End position relative to the owning buffer (exclusive).
    pub fn end(&self) -> usize {
        self.begin + self.length
    }

    /// Absolute start position in the stream (inclusive).
    pub fn start(&self) -> usize {
        self.offset + self.begin
    }

    /// Absolute stop position in the stream (exclusive).
    pub fn stop(&self) -> usize {
        self.offset + self.begin + self.length
    }

    /// The semantic type.
    pub fn lexeme_type(&self) -> LexemeType {
        self.lexeme_type
    }

    pub fn set_lexeme_type(&mut self, t: LexemeType) {
        self.lexeme_type = t;
    }

    /// The materialized text. Empty until the lexeme has been emitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fill in the text from the buffer span this lexeme covers.
    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Absorb `other` into `self` if it starts exactly where `self`
    /// stops, taking on the given type. Returns whether the merge
    /// happened; on `false`, `self` is untouched.
    pub fn merge(&mut self, other: &Lexeme, merged_type: LexemeType) -> bool {
        if self.stop() == other.start() {
            self.length += other.length;
            self.lexeme_type = merged_type;
            true
        } else {
            false
        }
    }
}

/// Lexemes at the same offset are identical when they cover the same
/// span; the type does not participate.
impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.begin == other.begin && self.length == other.length
    }
}

impl Eq for Lexeme {}

/// Pool order: earlier buffer first, then earlier begin; at the same
/// begin, longer first. The leading offset key keeps `cmp` consistent
/// with `eq` (all members of one pool share an offset, so within a
/// pass it never discriminates).
impl Ord for Lexeme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset
            .cmp(&other.offset)
            .then_with(|| self.begin.cmp(&other.begin))
            .then_with(|| other.length.cmp(&self.length))
    }
}

impl PartialOrd for Lexeme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} : {} : {}",
            self.start(),
            self.stop(),
            self.text,
            self.lexeme_type.as_str()
        )
    }
}

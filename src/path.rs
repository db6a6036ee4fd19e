//! Candidate segmentation paths.
//!
//! A [`LexemePath`] is an ordered chain of lexemes covering one
//! contended region of the buffer. During arbitration many candidate
//! paths compete; the total order implemented here decides the winner.

use std::cmp::Ordering;

use crate::lexeme::Lexeme;
use crate::sort_set::SortSet;

/// An ordered chain of lexemes over one region of the buffer.
#[derive(Debug, Clone, Default)]
pub struct LexemePath {
    lexemes: SortSet<Lexeme>,
    /// Region start; meaningful only while the path is non-empty.
    begin: usize,
    /// Region end (exclusive); meaningful only while non-empty.
    end: usize,
    /// Characters actually covered by members. Differs from the span
    /// when accepted members leave gaps.
    covered: usize,
}

impl LexemePath {
    /// Create an empty path.
    pub fn new() -> Self {
        LexemePath::default()
    }

    /// Number of member lexemes.
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    /// Whether the path has no members.
    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    /// Region start position (relative to the buffer).
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Region end position (exclusive, relative to the buffer).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Characters covered by the members.
    pub fn covered_length(&self) -> usize {
        self.covered
    }

    /// Distance between the first and last covered position.
    pub fn span(&self) -> usize {
        self.end - self.begin
    }

    /// Grow the region with a lexeme that overlaps it (or seed an
    /// empty path). Returns `false` when the lexeme lies outside the
    /// region, leaving the path untouched.
    pub fn expand_overlapping(&mut self, lex: &Lexeme) -> bool {
        if self.is_empty() {
            self.seed(lex);
            true
        } else if self.check_overlap(lex) {
            self.lexemes.insert(lex.clone());
            self.end = self.end.max(lex.end());
            self.covered = self.end - self.begin;
            true
        } else {
            false
        }
    }

    /// Accept a lexeme that must not overlap any member (or seed an
    /// empty path). Returns whether the lexeme was accepted.
    pub fn expand_disjoint(&mut self, lex: &Lexeme) -> bool {
        if self.is_empty() {
            self.seed(lex);
            true
        } else if self.check_overlap(lex) {
            false
        } else {
            self.lexemes.insert(lex.clone());
            self.covered += lex.length();
            // Both ends can move: insertion order is by position.
            if let Some(first) = self.lexemes.peek_first() {
                self.begin = first.begin();
            }
            if let Some(last) = self.lexemes.peek_last() {
                self.end = last.end();
            }
            true
        }
    }

    fn seed(&mut self, lex: &Lexeme) {
        self.begin = lex.begin();
        self.end = lex.end();
        self.covered = lex.length();
        self.lexemes.insert(lex.clone());
    }

    /// Whether a lexeme overlaps the region either way round.
    pub fn check_overlap(&self, lex: &Lexeme) -> bool {
        if self.is_empty() {
            return false;
        }
        (lex.begin() >= self.begin && lex.begin() < self.end)
            || (self.begin >= lex.begin() && self.begin < lex.end())
    }

    /// Remove and return the largest member, shrinking the region.
    pub fn remove_tail(&mut self) -> Option<Lexeme> {
        let tail = self.lexemes.poll_last()?;
        match self.lexemes.peek_last() {
            None => {
                self.begin = 0;
                self.end = 0;
                self.covered = 0;
            }
            Some(new_tail) => {
                self.end = new_tail.end();
                if tail.begin() > new_tail.begin() {
                    if tail.begin() >= self.end {
                        // Tail sat entirely past the remaining chain.
                        self.covered -= tail.length();
                    } else {
                        self.covered = self.end - self.begin;
                    }
                }
                // Otherwise the tail shared its begin with a longer
                // member and never contributed to the end.
            }
        }
        Some(tail)
    }

    /// Remove and return the first member.
    pub fn poll_first(&mut self) -> Option<Lexeme> {
        self.lexemes.poll_first()
    }

    /// Iterate members in order.
    pub fn iter(&self) -> impl Iterator<Item = &Lexeme> {
        self.lexemes.iter()
    }

    /// Product of member lengths; larger means more even sizing.
    fn x_weight(&self) -> u64 {
        self.lexemes
            .iter()
            .map(|l| l.length() as u64)
            .product()
    }

    /// Position-weighted length sum (1-based position times length).
    fn p_weight(&self) -> u64 {
        self.lexemes
            .iter()
            .enumerate()
            .map(|(i, l)| (i as u64 + 1) * l.length() as u64)
            .sum()
    }
}

/// Path ranking: the *smallest* path under this order is the best
/// candidate. Keys, in order: larger covered length, fewer members,
/// larger span, larger end (reverse segmentation favored), larger
/// length product (even sizing favored), larger position-weighted sum.
impl Ord for LexemePath {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .covered
            .cmp(&self.covered)
            .then_with(|| self.len().cmp(&other.len()))
            .then_with(|| other.span().cmp(&self.span()))
            .then_with(|| other.end.cmp(&self.end))
            .then_with(|| other.x_weight().cmp(&self.x_weight()))
            .then_with(|| other.p_weight().cmp(&self.p_weight()))
    }
}

impl PartialOrd for LexemePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LexemePath {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LexemePath {}

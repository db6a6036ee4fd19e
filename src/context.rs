//! Shared per-pass analysis state.
//!
//! The context owns the sliding character buffer, the scanner lock
//! set, the raw candidate pool, the arbitrated path table and the
//! outgoing result queue. Scanners and the arbitrator all communicate
//! through it; the segmenter drives it.

use std::collections::{HashMap, VecDeque};

use crate::char_util::{self, CharClass};
use crate::dict::Dictionary;
use crate::lexeme::{Lexeme, LexemeType};
use crate::path::LexemePath;
use crate::scanners::{ScannerId, SCANNER_COUNT};
use crate::sort_set::SortSet;
use crate::source::CharSource;

/// Default character capacity of the sliding buffer.
pub(crate) const BUFF_SIZE: usize = 4096;

/// A full buffer is considered exhausted once the cursor enters this
/// tail margin, so multi-character matches near the edge can finish
/// after a refill instead of being severed.
pub(crate) const EXHAUST_MARGIN: usize = 100;

pub(crate) struct AnalyzeContext {
    /// Normalized characters; only `..buff_size` is meaningful.
    buffer: Vec<char>,
    /// Class of each buffered character, aligned with `buffer`.
    classes: Vec<CharClass>,
    capacity: usize,
    /// Count of valid characters in the buffer.
    buff_size: usize,
    /// Current read position within the buffer.
    cursor: usize,
    /// Absolute position of `buffer[0]` in the whole stream.
    offset: usize,
    /// One slot per scanner identity.
    locks: [bool; SCANNER_COUNT],
    /// Candidate lexemes produced by the scanners this pass.
    raw: SortSet<Lexeme>,
    /// Arbitrated paths keyed by region start position.
    paths: HashMap<usize, LexemePath>,
    /// Ordered lexemes ready to be pulled.
    results: VecDeque<Lexeme>,
    smart: bool,
}

impl AnalyzeContext {
    pub(crate) fn new(capacity: usize, smart: bool) -> Self {
        AnalyzeContext {
            buffer: vec!['\0'; capacity],
            classes: vec![CharClass::Useless; capacity],
            capacity,
            buff_size: 0,
            cursor: 0,
            offset: 0,
            locks: [false; SCANNER_COUNT],
            raw: SortSet::new(),
            paths: HashMap::new(),
            results: VecDeque::new(),
            smart,
        }
    }

    /// Fill the buffer from the source. On the first call the whole
    /// buffer is read; afterwards the unread tail past the cursor is
    /// kept and the freed space refilled. Returns the number of valid
    /// characters now buffered.
    pub(crate) fn fill(&mut self, source: &mut dyn CharSource) -> std::io::Result<usize> {
        if self.offset == 0 && self.buff_size == 0 {
            let read = source.read_chars(&mut self.buffer)?;
            self.buff_size = read;
        } else {
            let consumed = self.cursor + 1;
            let residue = self.buff_size - consumed;
            if residue > 0 {
                self.buffer.copy_within(consumed..self.buff_size, 0);
                self.classes.copy_within(consumed..self.buff_size, 0);
            }
            self.offset += consumed;
            let read = source.read_chars(&mut self.buffer[residue..])?;
            self.buff_size = residue + read;
        }
        Ok(self.buff_size)
    }

    /// Rewind the cursor to the buffer start and normalize the first
    /// character.
    pub(crate) fn init_cursor(&mut self) {
        self.cursor = 0;
        self.normalize_current();
    }

    /// Advance the cursor one character, normalizing it. Returns
    /// `false` at the end of the valid buffer.
    pub(crate) fn move_cursor(&mut self) -> bool {
        if self.cursor + 1 < self.buff_size {
            self.cursor += 1;
            self.normalize_current();
            true
        } else {
            false
        }
    }

    fn normalize_current(&mut self) {
        let c = char_util::normalize(self.buffer[self.cursor]);
        self.buffer[self.cursor] = c;
        self.classes[self.cursor] = char_util::classify(c);
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn current_char(&self) -> char {
        self.buffer[self.cursor]
    }

    pub(crate) fn current_class(&self) -> CharClass {
        self.classes[self.cursor]
    }

    /// The valid portion of the buffer.
    pub(crate) fn buffer(&self) -> &[char] {
        &self.buffer[..self.buff_size]
    }

    /// Whether the cursor sits on the last valid character.
    pub(crate) fn is_buffer_consumed(&self) -> bool {
        self.buff_size > 0 && self.cursor == self.buff_size - 1
    }

    /// Whether the pass should stop early and refill: the buffer was
    /// read full, the cursor has entered the tail margin, and no
    /// scanner holds a lock.
    pub(crate) fn needs_refill(&self) -> bool {
        self.buff_size == self.capacity
            && self.cursor + 1 < self.buff_size
            && self.cursor + EXHAUST_MARGIN > self.buff_size
            && !self.is_locked()
    }

    pub(crate) fn lock(&mut self, id: ScannerId) {
        self.locks[id.index()] = true;
    }

    pub(crate) fn unlock(&mut self, id: ScannerId) {
        self.locks[id.index()] = false;
    }

    fn is_locked(&self) -> bool {
        self.locks.iter().any(|&l| l)
    }

    /// Insert a candidate into the raw pool. Duplicates (same offset,
    /// begin and length) are dropped.
    pub(crate) fn add_lexeme(&mut self, lexeme: Lexeme) {
        self.raw.insert(lexeme);
    }

    /// The positionally last candidate in the raw pool.
    pub(crate) fn last_raw(&self) -> Option<&Lexeme> {
        self.raw.peek_last()
    }

    pub(crate) fn raw_mut(&mut self) -> &mut SortSet<Lexeme> {
        &mut self.raw
    }

    /// Store the arbitrated paths of this pass, keyed by region start.
    pub(crate) fn record_paths(&mut self, paths: Vec<LexemePath>) {
        for path in paths {
            self.paths.insert(path.begin(), path);
        }
    }

    /// Walk the consumed part of the buffer and move arbitrated
    /// lexemes, plus single-character fill for uncovered positions,
    /// into the result queue in buffer order.
    pub(crate) fn synthesize(&mut self) {
        let mut index = 0;
        while index <= self.cursor {
            if self.classes[index] == CharClass::Useless {
                index += 1;
                continue;
            }
            if let Some(mut path) = self.paths.remove(&index) {
                let path_end = path.end();
                while let Some(lex) = path.poll_first() {
                    // Single-character fill for gaps inside the path.
                    while index < lex.begin() {
                        self.push_single(index);
                        index += 1;
                    }
                    index = lex.end();
                    self.results.push_back(lex);
                }
                while index < path_end {
                    self.push_single(index);
                    index += 1;
                }
            } else {
                self.push_single(index);
                index += 1;
            }
        }
        self.paths.clear();
    }

    fn push_single(&mut self, index: usize) {
        let lexeme_type = match self.classes[index] {
            CharClass::Useless => return,
            CharClass::Chinese => LexemeType::CnChar,
            CharClass::OtherCjk => LexemeType::OtherCjk,
            // Latin and Arabic runs always reach the raw pool, so a
            // stray position of either class means a run lexeme
            // already covers it.
            CharClass::Latin | CharClass::Arabic => return,
        };
        self.results
            .push_back(Lexeme::new(self.offset, index, 1, lexeme_type));
    }

    /// Pull the next result. In smart mode adjacent numeral and
    /// quantifier results are first merged, and stopwords are skipped.
    /// The lexeme text is materialized from the buffer on the way out.
    pub(crate) fn next_lexeme(&mut self, dict: &Dictionary) -> Option<Lexeme> {
        while let Some(mut lexeme) = self.results.pop_front() {
            if self.smart {
                self.compound(&mut lexeme);
            }
            let begin = lexeme.begin();
            let end = lexeme.end().min(self.buff_size);
            if dict.is_stopword(&self.buffer[..self.buff_size], begin, end - begin) {
                continue;
            }
            let text: String = self.buffer[begin..end].iter().collect();
            lexeme.set_text(text);
            return Some(lexeme);
        }
        None
    }

    /// Merge the head of the result queue into `lexeme` when the pair
    /// forms a numeral-quantifier compound.
    fn compound(&mut self, lexeme: &mut Lexeme) {
        if self.results.is_empty() {
            return;
        }
        if lexeme.lexeme_type() == LexemeType::Arabic {
            let merge_type = match self.results.front().map(Lexeme::lexeme_type) {
                Some(LexemeType::CnNum) => Some(LexemeType::CnNum),
                Some(LexemeType::CnQuant) => Some(LexemeType::CnNumQuant),
                _ => None,
            };
            if let Some(t) = merge_type {
                let next = self.results.front().cloned();
                if let Some(next) = next {
                    if lexeme.merge(&next, t) {
                        self.results.pop_front();
                    }
                }
            }
        }
        // The (possibly merged) numeral can still absorb a quantifier.
        if lexeme.lexeme_type() == LexemeType::CnNum && !self.results.is_empty() {
            if self.results.front().map(Lexeme::lexeme_type) == Some(LexemeType::CnQuant) {
                let next = self.results.front().cloned();
                if let Some(next) = next {
                    if lexeme.merge(&next, LexemeType::CnNumQuant) {
                        self.results.pop_front();
                    }
                }
            }
        }
    }

    /// Clear all per-stream state for reuse on a new source.
    pub(crate) fn reset(&mut self) {
        self.buff_size = 0;
        self.cursor = 0;
        self.offset = 0;
        self.locks = [false; SCANNER_COUNT];
        self.raw.clear();
        self.paths.clear();
        self.results.clear();
    }

    /// Load a complete string as the buffer contents.
    #[cfg(test)]
    pub(crate) fn load_for_test(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        assert!(chars.len() <= self.capacity);
        self.buffer[..chars.len()].copy_from_slice(&chars);
        self.buff_size = chars.len();
        self.init_cursor();
    }
}

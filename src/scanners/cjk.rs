//! CJK dictionary-word scanner.
//!
//! Longest-match search over the main dictionary: every in-flight hit
//! is advanced one character per call, emitting a Chinese-word lexeme
//! for each completion while prefixes stay in flight, and a fresh
//! single-character match is attempted at the cursor.

use std::sync::Arc;

use crate::context::AnalyzeContext;
use crate::dict::Dictionary;
use crate::lexeme::{Lexeme, LexemeType};
use crate::trie::Hit;

use super::{Scanner, ScannerId};

pub(crate) struct CjkScanner {
    dict: Arc<Dictionary>,
    /// Partial matches still open at the previous cursor position.
    hits: Vec<Hit>,
}

impl CjkScanner {
    pub(crate) fn new(dict: Arc<Dictionary>) -> Self {
        CjkScanner {
            dict,
            hits: Vec::new(),
        }
    }

    /// Keep a hit in flight if it can still grow; emit a lexeme if it
    /// completed at the cursor.
    fn fold_hit(&mut self, hit: Hit, ctx: &mut AnalyzeContext) {
        if hit.is_complete() {
            let length = ctx.cursor() - hit.begin() + 1;
            ctx.add_lexeme(Lexeme::new(
                ctx.offset(),
                hit.begin(),
                length,
                LexemeType::CnWord,
            ));
        }
        if hit.is_prefix() {
            self.hits.push(hit);
        }
    }
}

impl Scanner for CjkScanner {
    fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        if ctx.current_class() != crate::char_util::CharClass::Useless {
            if !self.hits.is_empty() {
                let pending = std::mem::take(&mut self.hits);
                for hit in &pending {
                    let advanced = self.dict.match_main_with_hit(ctx.buffer(), ctx.cursor(), hit);
                    self.fold_hit(advanced, ctx);
                }
            }
            let single = self.dict.match_main(ctx.buffer(), ctx.cursor(), 1);
            self.fold_hit(single, ctx);
        } else {
            // Nothing spans a useless character.
            self.hits.clear();
        }

        if ctx.is_buffer_consumed() {
            // In-flight matches cannot continue past the buffer; the
            // refill margin is what keeps this from severing words.
            self.hits.clear();
        }
        if self.hits.is_empty() {
            ctx.unlock(ScannerId::Cjk);
        } else {
            ctx.lock(ScannerId::Cjk);
        }
    }

    fn reset(&mut self) {
        self.hits.clear();
    }
}

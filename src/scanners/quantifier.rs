//! Chinese numeral and quantifier scanner.
//!
//! Two cooperating sub-scans: a contiguous run over the fixed numeral
//! glyph set, and a longest-match search over the quantifier
//! dictionary. The quantifier scan only runs where a quantifier can
//! actually follow: during a numeral run, while quantifier hits are
//! pending, or directly after a numeral lexeme ending at the cursor.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::char_util::CharClass;
use crate::context::AnalyzeContext;
use crate::dict::Dictionary;
use crate::lexeme::{Lexeme, LexemeType};
use crate::trie::Hit;

use super::{RunState, Scanner, ScannerId};

/// Chinese numeral glyphs, including financial forms.
static CN_NUMERALS: Lazy<HashSet<char>> = Lazy::new(|| {
    "○〇一二三四五六七八九十百千万亿零壹贰叁肆伍陆柒捌玖拾佰仟萬億兆卅廿"
        .chars()
        .collect()
});

pub(crate) struct QuantifierScanner {
    dict: Arc<Dictionary>,
    /// Current Chinese-numeral run.
    num_run: RunState,
    /// Quantifier matches still open at the previous cursor position.
    hits: Vec<Hit>,
}

impl QuantifierScanner {
    pub(crate) fn new(dict: Arc<Dictionary>) -> Self {
        QuantifierScanner {
            dict,
            num_run: RunState::Idle,
            hits: Vec::new(),
        }
    }

    fn is_numeral(ctx: &AnalyzeContext) -> bool {
        ctx.current_class() == CharClass::Chinese && CN_NUMERALS.contains(&ctx.current_char())
    }

    fn process_numerals(&mut self, ctx: &mut AnalyzeContext) {
        match self.num_run {
            RunState::Idle => {
                if Self::is_numeral(ctx) {
                    self.num_run = RunState::Open {
                        start: ctx.cursor(),
                        end: ctx.cursor(),
                    };
                }
            }
            RunState::Open { start, .. } => {
                if Self::is_numeral(ctx) {
                    self.num_run = RunState::Open {
                        start,
                        end: ctx.cursor(),
                    };
                } else {
                    self.close_numeral_run(ctx);
                }
            }
        }
        if ctx.is_buffer_consumed() {
            self.close_numeral_run(ctx);
        }
    }

    fn close_numeral_run(&mut self, ctx: &mut AnalyzeContext) {
        if let RunState::Open { start, end } = self.num_run {
            ctx.add_lexeme(Lexeme::new(
                ctx.offset(),
                start,
                end - start + 1,
                LexemeType::CnNum,
            ));
            self.num_run = RunState::Idle;
        }
    }

    /// Whether a quantifier could legally start or continue at the
    /// cursor.
    fn wants_quantifier(&self, ctx: &AnalyzeContext) -> bool {
        if self.num_run.is_open() || !self.hits.is_empty() {
            return true;
        }
        // A numeral lexeme ending exactly at the cursor (no gap) also
        // admits a quantifier.
        match ctx.last_raw() {
            Some(lex)
                if matches!(
                    lex.lexeme_type(),
                    LexemeType::CnNum | LexemeType::Arabic
                ) =>
            {
                lex.end() == ctx.cursor()
            }
            _ => false,
        }
    }

    fn process_quantifiers(&mut self, ctx: &mut AnalyzeContext) {
        if !self.wants_quantifier(ctx) {
            return;
        }

        if ctx.current_class() == CharClass::Chinese {
            if !self.hits.is_empty() {
                let pending = std::mem::take(&mut self.hits);
                for hit in &pending {
                    let advanced =
                        self.dict
                            .match_quantifier_with_hit(ctx.buffer(), ctx.cursor(), hit);
                    self.fold_hit(advanced, ctx);
                }
            }
            let single = self.dict.match_quantifier(ctx.buffer(), ctx.cursor(), 1);
            self.fold_hit(single, ctx);
        } else {
            // A quantifier cannot span a non-Chinese character.
            self.hits.clear();
        }

        if ctx.is_buffer_consumed() {
            self.hits.clear();
        }
    }

    fn fold_hit(&mut self, hit: Hit, ctx: &mut AnalyzeContext) {
        if hit.is_complete() {
            let length = ctx.cursor() - hit.begin() + 1;
            ctx.add_lexeme(Lexeme::new(
                ctx.offset(),
                hit.begin(),
                length,
                LexemeType::CnQuant,
            ));
        }
        if hit.is_prefix() {
            self.hits.push(hit);
        }
    }
}

impl Scanner for QuantifierScanner {
    fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        self.process_numerals(ctx);
        self.process_quantifiers(ctx);

        if self.num_run.is_open() || !self.hits.is_empty() {
            ctx.lock(ScannerId::Quantifier);
        } else {
            ctx.unlock(ScannerId::Quantifier);
        }
    }

    fn reset(&mut self) {
        self.num_run = RunState::Idle;
        self.hits.clear();
    }
}

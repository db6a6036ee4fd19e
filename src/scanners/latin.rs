//! Latin-letter, Arabic-numeral and mixed-alphanumeric scanner.
//!
//! Three independent run sub-scans over the same cursor stream. The
//! mixed scan tolerates connector punctuation inside a run and the
//! digit scan tolerates numeric separators, so `wi-fi`, `user@host`
//! and `1,234.5` each come out whole. Pure letter and pure digit runs
//! are scanned first, so where a run is both (no connectors involved)
//! the typed lexeme wins the duplicate rejection in the raw pool.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::char_util::CharClass;
use crate::context::AnalyzeContext;
use crate::lexeme::{Lexeme, LexemeType};

use super::{RunState, Scanner, ScannerId};

/// Punctuation allowed inside a mixed alphanumeric run.
static CONNECTORS: Lazy<HashSet<char>> =
    Lazy::new(|| "#&+-.@_".chars().collect());

/// Punctuation allowed inside a numeric run.
static NUM_SEPARATORS: Lazy<HashSet<char>> = Lazy::new(|| ",.".chars().collect());

#[derive(Default)]
pub(crate) struct LatinScanner {
    letters: RunState,
    digits: RunState,
    mixed: RunState,
}

impl LatinScanner {
    pub(crate) fn new() -> Self {
        LatinScanner::default()
    }

    fn process_letters(&mut self, ctx: &mut AnalyzeContext) {
        let accept = ctx.current_class() == CharClass::Latin;
        self.letters = step_run(self.letters, accept, false, ctx, LexemeType::Letter);
    }

    fn process_digits(&mut self, ctx: &mut AnalyzeContext) {
        let class = ctx.current_class();
        let accept = class == CharClass::Arabic;
        // Separators keep the run open without extending it; a run
        // never ends on a trailing separator.
        let tolerate = class == CharClass::Useless
            && self.digits.is_open()
            && NUM_SEPARATORS.contains(&ctx.current_char());
        self.digits = step_run(self.digits, accept, tolerate, ctx, LexemeType::Arabic);
    }

    fn process_mixed(&mut self, ctx: &mut AnalyzeContext) {
        let class = ctx.current_class();
        let accept = matches!(class, CharClass::Arabic | CharClass::Latin);
        let tolerate = class == CharClass::Useless
            && self.mixed.is_open()
            && CONNECTORS.contains(&ctx.current_char());
        // Connectors extend the mixed run; `wi-fi` is one lexeme.
        if tolerate {
            if let RunState::Open { start, .. } = self.mixed {
                self.mixed = RunState::Open {
                    start,
                    end: ctx.cursor(),
                };
            }
            if ctx.is_buffer_consumed() {
                self.mixed = close_run(self.mixed, ctx, LexemeType::Alphanum);
            }
            return;
        }
        self.mixed = step_run(self.mixed, accept, false, ctx, LexemeType::Alphanum);
    }
}

/// Advance one run sub-scan by a single character.
fn step_run(
    run: RunState,
    accept: bool,
    tolerate: bool,
    ctx: &mut AnalyzeContext,
    lexeme_type: LexemeType,
) -> RunState {
    let mut run = match run {
        RunState::Idle => {
            if accept {
                RunState::Open {
                    start: ctx.cursor(),
                    end: ctx.cursor(),
                }
            } else {
                RunState::Idle
            }
        }
        RunState::Open { start, end } => {
            if accept {
                RunState::Open {
                    start,
                    end: ctx.cursor(),
                }
            } else if tolerate {
                RunState::Open { start, end }
            } else {
                close_run(RunState::Open { start, end }, ctx, lexeme_type)
            }
        }
    };
    if ctx.is_buffer_consumed() {
        run = close_run(run, ctx, lexeme_type);
    }
    run
}

fn close_run(run: RunState, ctx: &mut AnalyzeContext, lexeme_type: LexemeType) -> RunState {
    if let RunState::Open { start, end } = run {
        ctx.add_lexeme(Lexeme::new(ctx.offset(), start, end - start + 1, lexeme_type));
    }
    RunState::Idle
}

impl Scanner for LatinScanner {
    fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        self.process_letters(ctx);
        self.process_digits(ctx);
        self.process_mixed(ctx);

        if self.letters.is_open() || self.digits.is_open() || self.mixed.is_open() {
            ctx.lock(ScannerId::Latin);
        } else {
            ctx.unlock(ScannerId::Latin);
        }
    }

    fn reset(&mut self) {
        self.letters = RunState::Idle;
        self.digits = RunState::Idle;
        self.mixed = RunState::Idle;
    }
}

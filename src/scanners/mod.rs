//! Character-class scanners.
//!
//! Each scanner inspects one buffered character per call, carrying its
//! partial state across calls, and emits candidate lexemes into the
//! context's raw pool. A scanner with unresolved in-flight state locks
//! the buffer under its identity so a refill cannot sever its match.

mod cjk;
mod latin;
mod quantifier;

pub(crate) use cjk::CjkScanner;
pub(crate) use latin::LatinScanner;
pub(crate) use quantifier::QuantifierScanner;

use crate::context::AnalyzeContext;

/// The closed set of scanner identities, used to index the context's
/// lock array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScannerId {
    Latin = 0,
    Quantifier = 1,
    Cjk = 2,
}

/// Number of scanner identities; sizes the lock array.
pub(crate) const SCANNER_COUNT: usize = 3;

impl ScannerId {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// The per-pass scanning contract.
pub(crate) trait Scanner {
    /// Inspect the character at the context cursor, update carried
    /// state, emit any finished lexemes, and set or release this
    /// scanner's buffer lock.
    fn analyze(&mut self, ctx: &mut AnalyzeContext);

    /// Drop all carried state (between passes and on stream reset).
    fn reset(&mut self);
}

/// State of one contiguous-run sub-scan.
///
/// `start`/`end` are inclusive cursor positions of the first and last
/// accepted character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum RunState {
    /// No run in progress.
    #[default]
    Idle,
    /// A run is accumulating.
    Open { start: usize, end: usize },
}

impl RunState {
    pub(crate) fn is_open(self) -> bool {
        matches!(self, RunState::Open { .. })
    }
}

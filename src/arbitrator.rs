//! Ambiguity arbitration.
//!
//! After a pass, the raw pool holds every candidate lexeme the
//! scanners produced, including overlapping ones. The arbitrator
//! groups them into contended regions and, in smart mode, picks one
//! winning non-overlapping path per region by bounded backtracking.

use crate::lexeme::Lexeme;
use crate::path::LexemePath;
use crate::sort_set::SortSet;

/// Resolves each contended region of raw lexemes to a single path.
#[derive(Debug, Default)]
pub struct Arbitrator;

impl Arbitrator {
    pub fn new() -> Self {
        Arbitrator
    }

    /// Drain the raw pool and produce one resolved path per region.
    ///
    /// With `smart` off, or for single-lexeme regions, the region is
    /// passed through unchanged (all candidates surface).
    pub fn process(&self, raw: &mut SortSet<Lexeme>, smart: bool) -> Vec<LexemePath> {
        let mut resolved = Vec::new();
        let mut region = LexemePath::new();
        while let Some(lex) = raw.poll_first() {
            if !region.expand_overlapping(&lex) {
                // The lexeme lies past the region: close it out.
                self.resolve(region, smart, &mut resolved);
                region = LexemePath::new();
                region.expand_overlapping(&lex);
            }
        }
        self.resolve(region, smart, &mut resolved);
        resolved
    }

    fn resolve(&self, region: LexemePath, smart: bool, out: &mut Vec<LexemePath>) {
        if region.is_empty() {
            return;
        }
        if region.len() == 1 || !smart {
            out.push(region);
        } else {
            let members: Vec<Lexeme> = region.iter().cloned().collect();
            out.push(self.judge(&members));
        }
    }

    /// Pick the best non-overlapping path through one contended
    /// region.
    ///
    /// A greedy forward scan accepts what fits and stacks what
    /// conflicts; then, most-recently-stacked first, the accepted path
    /// is rolled back until the stacked lexeme fits and the forward
    /// scan redone from there. Every reachable maximal path becomes a
    /// candidate; the path order picks the winner.
    fn judge(&self, members: &[Lexeme]) -> LexemePath {
        let mut option = LexemePath::new();
        let mut conflicts = forward_path(members, 0, &mut option);
        let mut best = option.clone();

        while let Some(idx) = conflicts.pop() {
            back_path(&members[idx], &mut option);
            // Conflicts met on a re-scan are alternatives already
            // reachable from the initial stack; they are not pushed.
            forward_path(members, idx, &mut option);
            if option < best {
                best = option.clone();
            }
        }
        best
    }
}

/// Greedily accept members from `from` onward; return the indexes of
/// those rejected for overlapping the path, oldest first.
fn forward_path(members: &[Lexeme], from: usize, path: &mut LexemePath) -> Vec<usize> {
    let mut conflicts = Vec::new();
    for (idx, lex) in members.iter().enumerate().skip(from) {
        if !path.expand_disjoint(lex) {
            conflicts.push(idx);
        }
    }
    conflicts
}

/// Roll the path back until it no longer conflicts with `lex`.
fn back_path(lex: &Lexeme, path: &mut LexemePath) {
    while path.check_overlap(lex) {
        path.remove_tail();
    }
}

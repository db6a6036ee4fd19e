//! The segmentation driver.
//!
//! A [`Segmenter`] owns the character source, the analysis context,
//! the scanner chain and the arbitrator, and exposes a pull interface:
//! each call to [`Segmenter::next_lexeme`] returns the next finished
//! lexeme, running a buffer pass whenever the result queue drains.

use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::arbitrator::Arbitrator;
use crate::context::{AnalyzeContext, BUFF_SIZE, EXHAUST_MARGIN};
use crate::dict::Dictionary;
use crate::lexeme::Lexeme;
use crate::scanners::{CjkScanner, LatinScanner, QuantifierScanner, Scanner};
use crate::source::{CharSource, StrSource};

/// A pull-based lexical segmenter over one character source.
pub struct Segmenter<S: CharSource> {
    source: S,
    dict: Arc<Dictionary>,
    context: AnalyzeContext,
    scanners: Vec<Box<dyn Scanner>>,
    arbitrator: Arbitrator,
    smart: bool,
}

impl Segmenter<StrSource> {
    /// Segment an in-memory string.
    pub fn from_str(text: &str, dict: Arc<Dictionary>, smart: bool) -> Self {
        Segmenter::new(StrSource::new(text), dict, smart)
    }
}

impl<S: CharSource> Segmenter<S> {
    /// Create a segmenter with the default buffer size.
    pub fn new(source: S, dict: Arc<Dictionary>, smart: bool) -> Self {
        Segmenter::with_buffer_size(source, dict, smart, BUFF_SIZE)
    }

    /// Create a segmenter with an explicit buffer capacity. Capacities
    /// smaller than the refill margin are raised to it.
    pub fn with_buffer_size(source: S, dict: Arc<Dictionary>, smart: bool, capacity: usize) -> Self {
        let capacity = capacity.max(EXHAUST_MARGIN + 1);
        let scanners: Vec<Box<dyn Scanner>> = vec![
            Box::new(LatinScanner::new()),
            Box::new(QuantifierScanner::new(Arc::clone(&dict))),
            Box::new(CjkScanner::new(Arc::clone(&dict))),
        ];
        Segmenter {
            source,
            dict,
            context: AnalyzeContext::new(capacity, smart),
            scanners,
            arbitrator: Arbitrator::new(),
            smart,
        }
    }

    /// Pull the next lexeme, or `None` at end of input.
    pub fn next_lexeme(&mut self) -> io::Result<Option<Lexeme>> {
        loop {
            if let Some(lexeme) = self.context.next_lexeme(&self.dict) {
                return Ok(Some(lexeme));
            }

            let available = self.context.fill(&mut self.source)?;
            if available == 0 {
                self.context.reset();
                for scanner in &mut self.scanners {
                    scanner.reset();
                }
                return Ok(None);
            }

            self.context.init_cursor();
            loop {
                for scanner in &mut self.scanners {
                    scanner.analyze(&mut self.context);
                }
                if self.context.needs_refill() {
                    break;
                }
                if !self.context.move_cursor() {
                    break;
                }
            }
            // Carried scanner state never survives a pass boundary.
            for scanner in &mut self.scanners {
                scanner.reset();
            }

            let paths = self
                .arbitrator
                .process(self.context.raw_mut(), self.smart);
            debug!(regions = paths.len(), "pass arbitrated");
            self.context.record_paths(paths);
            self.context.synthesize();
        }
    }

    /// Collect every remaining lexeme.
    pub fn collect_lexemes(&mut self) -> io::Result<Vec<Lexeme>> {
        let mut out = Vec::new();
        while let Some(lexeme) = self.next_lexeme()? {
            out.push(lexeme);
        }
        Ok(out)
    }

    /// Rewind onto a new source, dropping all carried state.
    pub fn reset(&mut self, source: S) {
        debug!("segmenter reset");
        self.source = source;
        self.context.reset();
        for scanner in &mut self.scanners {
            scanner.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Arc<Dictionary> {
        let mut d = Dictionary::new();
        d.add_main_words(["中国", "中国人", "国人"]);
        d.add_quant_words(["个"]);
        Arc::new(d)
    }

    fn texts(segmenter: &mut Segmenter<StrSource>) -> Vec<String> {
        segmenter
            .collect_lexemes()
            .unwrap()
            .into_iter()
            .map(|l| l.text().to_string())
            .collect()
    }

    #[test]
    fn test_smart_segmentation() {
        let mut seg = Segmenter::from_str("中国人", dict(), true);
        assert_eq!(texts(&mut seg), vec!["中国人"]);
    }

    #[test]
    fn test_full_segmentation_surfaces_all_candidates() {
        let mut seg = Segmenter::from_str("中国人", dict(), false);
        let out = texts(&mut seg);
        assert!(out.contains(&"中国".to_string()));
        assert!(out.contains(&"中国人".to_string()));
        assert!(out.contains(&"国人".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let mut seg = Segmenter::from_str("", dict(), true);
        assert!(seg.next_lexeme().unwrap().is_none());
    }

    #[test]
    fn test_reset_reuses_segmenter() {
        let mut seg = Segmenter::from_str("中国", dict(), true);
        assert_eq!(texts(&mut seg), vec!["中国"]);
        seg.reset(StrSource::new("3个"));
        assert_eq!(texts(&mut seg), vec!["3个"]);
    }

    #[test]
    fn test_offsets_track_stream_position() {
        let d = dict();
        let mut seg = Segmenter::with_buffer_size(
            StrSource::new(&"啊".repeat(150)),
            d,
            true,
            EXHAUST_MARGIN + 1,
        );
        let lexemes = seg.collect_lexemes().unwrap();
        assert_eq!(lexemes.len(), 150);
        for (i, lex) in lexemes.iter().enumerate() {
            assert_eq!(lex.start(), i);
        }
    }
}

//! Chinese lexical segmentation with dictionary-driven longest-match
//! scanning and ambiguity arbitration.
//!
//! Text is read through a sliding character buffer and scanned by
//! three character-class scanners (CJK dictionary words, Chinese
//! numerals and quantifiers, Latin letters and Arabic digits). The
//! candidates they produce are arbitrated per contended region and
//! pulled out as [`Lexeme`] values. Smart mode keeps one best
//! segmentation per region, merges numeral-quantifier compounds and
//! drops stopwords; full mode surfaces every candidate.
//!
//! ```
//! use std::sync::Arc;
//! use hanseg::{Dictionary, Segmenter};
//!
//! let mut dict = Dictionary::new();
//! dict.add_main_words(["中华人民共和国", "中华", "人民", "共和国"]);
//!
//! let mut seg = Segmenter::from_str("中华人民共和国", Arc::new(dict), true);
//! let mut words = Vec::new();
//! while let Some(lexeme) = seg.next_lexeme().unwrap() {
//!     words.push(lexeme.text().to_string());
//! }
//! assert_eq!(words, vec!["中华人民共和国"]);
//! ```

mod arbitrator;
pub mod char_util;
mod context;
pub mod dict;
pub mod lexeme;
mod path;
mod scanners;
pub mod segmenter;
mod sort_set;
pub mod source;
pub mod trie;

pub use dict::{DictError, Dictionary};
pub use lexeme::{Lexeme, LexemeType};
pub use segmenter::Segmenter;
pub use source::{CharSource, StrSource, Utf8Reader};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

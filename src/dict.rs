//! Dictionary loading and management.
//!
//! A [`Dictionary`] bundles the three tries the engine consults: the
//! main word dictionary, the stopword dictionary, and the quantifier
//! dictionary. It is built once (from files or in-memory word lists),
//! then shared read-only across sessions behind an `Arc`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::trie::{DictTrie, Hit};

/// Errors raised while loading dictionary files.
///
/// A failing file is fatal for that load; there is no fallback.
#[derive(Debug, Error)]
pub enum DictError {
    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The dictionary set consulted during segmentation.
///
/// Mutation (loading, runtime add/remove) takes `&mut self`; once the
/// dictionary is wrapped in an `Arc` and handed to sessions it is
/// read-only. Embedders that need live updates keep it behind their
/// own lock or rebuild and swap the `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    main: DictTrie,
    stopwords: DictTrie,
    quantifiers: DictTrie,
}

impl Dictionary {
    /// Create an empty dictionary set.
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Build from the three standard word-list files, plus optional
    /// extension lists merged into the main and stopword tries.
    pub fn load_from_files(
        main: &Path,
        quantifiers: &Path,
        stopwords: &[&Path],
        extensions: &[&Path],
    ) -> Result<Arc<Self>, DictError> {
        let mut dict = Dictionary::new();
        dict.load_word_file(main, WordKind::Main)?;
        dict.load_word_file(quantifiers, WordKind::Quantifier)?;
        for path in stopwords {
            dict.load_word_file(path, WordKind::Stopword)?;
        }
        for path in extensions {
            dict.load_word_file(path, WordKind::Main)?;
        }
        Ok(Arc::new(dict))
    }

    fn load_word_file(&mut self, path: &Path, kind: WordKind) -> Result<(), DictError> {
        let content = fs::read_to_string(path).map_err(|source| DictError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let trie = self.trie_mut(kind);
        let before = trie.len();
        load_lines(trie, &content);
        debug!(
            path = %path.display(),
            kind = kind.as_str(),
            entries = trie.len() - before,
            "loaded dictionary file"
        );
        Ok(())
    }

    fn trie_mut(&mut self, kind: WordKind) -> &mut DictTrie {
        match kind {
            WordKind::Main => &mut self.main,
            WordKind::Stopword => &mut self.stopwords,
            WordKind::Quantifier => &mut self.quantifiers,
        }
    }

    /// Add entries to the main dictionary from an in-memory word list
    /// (one entry per item; trimmed and lowercased, blanks skipped).
    pub fn add_main_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        insert_words(&mut self.main, words);
    }

    /// Add stopword entries.
    pub fn add_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        insert_words(&mut self.stopwords, words);
    }

    /// Add quantifier entries.
    pub fn add_quant_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        insert_words(&mut self.quantifiers, words);
    }

    /// Runtime administration: add words to the main dictionary.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_main_words(words);
    }

    /// Runtime administration: remove (disable) main-dictionary words.
    /// Disabled entries stop completing but longer entries through
    /// them keep matching.
    pub fn remove_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = normalize_entry(word.as_ref());
            if !word.is_empty() {
                self.main.disable(&word);
            }
        }
    }

    /// Match a span of the buffer against the main dictionary.
    pub fn match_main(&self, buf: &[char], begin: usize, length: usize) -> Hit {
        self.main.match_in(buf, begin, length)
    }

    /// Match a span of the buffer against the quantifier dictionary.
    pub fn match_quantifier(&self, buf: &[char], begin: usize, length: usize) -> Hit {
        self.quantifiers.match_in(buf, begin, length)
    }

    /// Resume a main-dictionary prefix match one character forward.
    pub fn match_main_with_hit(&self, buf: &[char], cursor: usize, hit: &Hit) -> Hit {
        self.main.match_with_hit(buf, cursor, hit)
    }

    /// Resume a quantifier-dictionary prefix match one character forward.
    pub fn match_quantifier_with_hit(&self, buf: &[char], cursor: usize, hit: &Hit) -> Hit {
        self.quantifiers.match_with_hit(buf, cursor, hit)
    }

    /// Whether the exact span is a stopword.
    pub fn is_stopword(&self, buf: &[char], begin: usize, length: usize) -> bool {
        self.stopwords.contains(buf, begin, length)
    }

    /// Entry counts (main, stopwords, quantifiers), mostly for tests
    /// and diagnostics.
    pub fn entry_counts(&self) -> (usize, usize, usize) {
        (self.main.len(), self.stopwords.len(), self.quantifiers.len())
    }
}

#[derive(Debug, Clone, Copy)]
enum WordKind {
    Main,
    Stopword,
    Quantifier,
}

impl WordKind {
    fn as_str(&self) -> &'static str {
        match self {
            WordKind::Main => "main",
            WordKind::Stopword => "stopword",
            WordKind::Quantifier => "quantifier",
        }
    }
}

fn normalize_entry(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn insert_words<I, S>(trie: &mut DictTrie, words: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for word in words {
        let word = normalize_entry(word.as_ref());
        if !word.is_empty() {
            trie.insert(&word);
        }
    }
}

fn load_lines(trie: &mut DictTrie, content: &str) {
    insert_words(trie, content.lines());
}

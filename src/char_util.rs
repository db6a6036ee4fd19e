//! Character classification and normalization.
//!
//! Every character that enters the analysis buffer is first normalized
//! (full-width forms folded to half-width, uppercase Latin folded to
//! lowercase) and then classified into one of a handful of coarse
//! classes that drive the scanners.

/// Coarse character classes used by the scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharClass {
    /// Characters no scanner cares about (punctuation, whitespace,
    /// unrecognized scripts).
    #[default]
    Useless,
    /// ASCII digit `0`-`9`.
    Arabic,
    /// ASCII letter `a`-`z` / `A`-`Z`.
    Latin,
    /// Chinese ideograph (CJK Unified Ideographs).
    Chinese,
    /// Other CJK scripts (kana, hangul, CJK symbols, ...).
    OtherCjk,
}

impl CharClass {
    /// String form used in debug output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CharClass::Useless => "USELESS",
            CharClass::Arabic => "ARABIC",
            CharClass::Latin => "LATIN",
            CharClass::Chinese => "CHINESE",
            CharClass::OtherCjk => "OTHER_CJK",
        }
    }
}

/// Classify a single character.
///
/// Total over all of `char`; anything outside the recognized ranges is
/// [`CharClass::Useless`].
pub fn classify(c: char) -> CharClass {
    if c.is_ascii_digit() {
        return CharClass::Arabic;
    }
    if c.is_ascii_alphabetic() {
        return CharClass::Latin;
    }
    if ('\u{4E00}'..='\u{9FA5}').contains(&c) {
        return CharClass::Chinese;
    }
    // Kana, bopomofo, CJK symbols and the like below the unified block,
    // plus the hangul syllable block.
    if ('\u{0800}'..'\u{4E00}').contains(&c) || ('\u{AC00}'..='\u{D7FF}').contains(&c) {
        return CharClass::OtherCjk;
    }
    CharClass::Useless
}

/// Normalize a single character.
///
/// Folds the ideographic space and the full-width ASCII block down to
/// their half-width forms, lowercases ASCII letters, and maps a few
/// common full-width bracket pairs to their ASCII counterparts.
pub fn normalize(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => {
            // Full-width ASCII: shift down, then lowercase if a letter.
            let folded = char::from_u32(c as u32 - 0xFEE0).unwrap_or(c);
            folded.to_ascii_lowercase()
        }
        'A'..='Z' => c.to_ascii_lowercase(),
        '（' => '(',
        '）' => ')',
        '【' => '[',
        '】' => ']',
        _ => c,
    }
}

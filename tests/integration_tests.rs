//! Integration tests for the segmentation pipeline.
//!
//! These exercise the public API end to end: character normalization
//! and classification, dictionary matching, arbitration in both modes,
//! compounding, stopwords, and buffer-refill transparency.

use std::sync::Arc;

use hanseg::char_util::{self, CharClass};
use hanseg::{Dictionary, Lexeme, LexemeType, Segmenter, StrSource, Utf8Reader};

fn sample_dict() -> Arc<Dictionary> {
    let mut dict = Dictionary::new();
    dict.add_main_words([
        "中华人民共和国",
        "中华",
        "华人",
        "人民",
        "人民共和国",
        "共和",
        "共和国",
        "中国",
        "中国人",
        "国人",
        "信号",
    ]);
    dict.add_quant_words(["个", "只", "公斤"]);
    dict.add_stop_words(["的", "了"]);
    Arc::new(dict)
}

fn segment(text: &str, dict: Arc<Dictionary>, smart: bool) -> Vec<Lexeme> {
    let mut seg = Segmenter::from_str(text, dict, smart);
    seg.collect_lexemes().unwrap()
}

fn texts(lexemes: &[Lexeme]) -> Vec<&str> {
    lexemes.iter().map(|l| l.text()).collect()
}

// =============================================================================
// Character Normalization and Classification
// =============================================================================

#[test]
fn test_classify_basic_ranges() {
    assert_eq!(char_util::classify('中'), CharClass::Chinese);
    assert_eq!(char_util::classify('7'), CharClass::Arabic);
    assert_eq!(char_util::classify('q'), CharClass::Latin);
    assert_eq!(char_util::classify('한'), CharClass::OtherCjk);
    assert_eq!(char_util::classify('，'), CharClass::Useless);
    assert_eq!(char_util::classify(' '), CharClass::Useless);
}

#[test]
fn test_normalize_fullwidth_and_case() {
    assert_eq!(char_util::normalize('Ａ'), 'a');
    assert_eq!(char_util::normalize('３'), '3');
    assert_eq!(char_util::normalize('Q'), 'q');
    assert_eq!(char_util::normalize('\u{3000}'), ' ');
    assert_eq!(char_util::normalize('（'), '(');
    assert_eq!(char_util::normalize('】'), ']');
}

#[test]
fn test_normalize_is_idempotent() {
    for c in "Ａ３Ｑz中（【，。 \u{3000}".chars() {
        let once = char_util::normalize(c);
        assert_eq!(char_util::normalize(once), once);
    }
}

#[test]
fn test_fullwidth_input_matches_halfwidth_entries() {
    let mut dict = Dictionary::new();
    dict.add_main_words(["wifi"]);
    let out = segment("ＷｉＦｉ", Arc::new(dict), true);
    assert_eq!(texts(&out), vec!["wifi"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::Letter);
}

// =============================================================================
// Coverage and Fallback
// =============================================================================

#[test]
fn test_every_meaningful_char_is_covered() {
    // No dictionary at all: every Chinese character surfaces as a
    // single-character fallback, punctuation is dropped. Note the
    // ideographic full stop sits in the other-CJK range and is kept,
    // unlike the full-width comma and bang, which fold to ASCII
    // punctuation.
    let out = segment("你好，世界！", Arc::new(Dictionary::new()), true);
    assert_eq!(texts(&out), vec!["你", "好", "世", "界"]);
    assert!(out
        .iter()
        .all(|l| l.lexeme_type() == LexemeType::CnChar));

    let out = segment("你好。", Arc::new(Dictionary::new()), true);
    assert_eq!(texts(&out), vec!["你", "好", "。"]);
    assert_eq!(out[2].lexeme_type(), LexemeType::OtherCjk);
}

#[test]
fn test_other_cjk_fallback() {
    let out = segment("한글とかな", Arc::new(Dictionary::new()), true);
    assert_eq!(out.len(), 5);
    assert!(out
        .iter()
        .all(|l| l.lexeme_type() == LexemeType::OtherCjk));
}

#[test]
fn test_absolute_positions() {
    let out = segment("，中国人", sample_dict(), true);
    assert_eq!(texts(&out), vec!["中国人"]);
    assert_eq!(out[0].start(), 1);
    assert_eq!(out[0].stop(), 4);
}

// =============================================================================
// Dictionary Matching and Arbitration
// =============================================================================

#[test]
fn test_smart_prefers_longest_match() {
    let out = segment("中国人", sample_dict(), true);
    assert_eq!(texts(&out), vec!["中国人"]);
}

#[test]
fn test_full_mode_surfaces_all_candidates() {
    let out = segment("中华人民共和国", sample_dict(), false);
    let words = texts(&out);
    assert!(words.contains(&"中华人民共和国"));
    assert!(words.contains(&"中华"));
    assert!(words.contains(&"华人"));
    assert!(words.contains(&"人民共和国"));
    assert!(words.contains(&"共和国"));
}

#[test]
fn test_smart_resolves_whole_span() {
    let out = segment("中华人民共和国", sample_dict(), true);
    assert_eq!(texts(&out), vec!["中华人民共和国"]);
}

#[test]
fn test_arbitration_is_deterministic() {
    let dict = sample_dict();
    let first = texts(&segment("中华人民共和国中国人信号", Arc::clone(&dict), true))
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    for _ in 0..10 {
        let again = segment("中华人民共和国中国人信号", Arc::clone(&dict), true);
        assert_eq!(texts(&again), first);
    }
}

#[test]
fn test_disabled_word_no_longer_completes() {
    let mut dict = Dictionary::new();
    dict.add_main_words(["中国", "中国人"]);
    dict.remove_words(["中国"]);
    let out = segment("中国人", Arc::new(dict), true);
    // The longer entry passing through the disabled node still works.
    assert_eq!(texts(&out), vec!["中国人"]);
}

// =============================================================================
// Stopwords
// =============================================================================

#[test]
fn test_stopwords_suppressed() {
    let out = segment("我的中国人了", sample_dict(), true);
    assert_eq!(texts(&out), vec!["我", "中国人"]);
}

#[test]
fn test_stopwords_also_suppressed_in_full_mode() {
    let out = segment("的中国", sample_dict(), false);
    assert!(!texts(&out).contains(&"的"));
    assert!(texts(&out).contains(&"中国"));
}

// =============================================================================
// Numerals, Quantifiers and Compounding
// =============================================================================

#[test]
fn test_chinese_numeral_run() {
    let out = segment("三百五十", sample_dict(), true);
    assert_eq!(texts(&out), vec!["三百五十"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::CnNum);
}

#[test]
fn test_smart_compounds_numeral_and_quantifier() {
    let out = segment("三个", sample_dict(), true);
    assert_eq!(texts(&out), vec!["三个"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::CnNumQuant);
}

#[test]
fn test_smart_compounds_arabic_and_quantifier() {
    let out = segment("3个", sample_dict(), true);
    assert_eq!(texts(&out), vec!["3个"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::CnNumQuant);
}

#[test]
fn test_arabic_merges_into_numeral_at_input_end() {
    // When the numeral run is closed by the end of input, it closes
    // before the quantifier dictionary is consulted at that position,
    // so the glyph surfaces as a numeral and the merged lexeme stays
    // a plain number rather than a numeral-quantifier compound.
    let out = segment("3十", sample_dict(), true);
    assert_eq!(texts(&out), vec!["3十"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::CnNum);
}

#[test]
fn test_full_mode_keeps_compound_parts() {
    let out = segment("三个", sample_dict(), false);
    let words = texts(&out);
    assert!(words.contains(&"三"));
    assert!(words.contains(&"个"));
}

#[test]
fn test_multi_char_quantifier_compound() {
    let out = segment("五公斤", sample_dict(), true);
    assert_eq!(texts(&out), vec!["五公斤"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::CnNumQuant);
}

// =============================================================================
// Latin, Digit and Mixed Runs
// =============================================================================

#[test]
fn test_letter_run() {
    let out = segment("hello中国", sample_dict(), true);
    assert_eq!(texts(&out), vec!["hello", "中国"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::Letter);
}

#[test]
fn test_mixed_run_with_connector() {
    let out = segment("wi-fi信号", sample_dict(), true);
    assert_eq!(texts(&out), vec!["wi-fi", "信号"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::Alphanum);
}

#[test]
fn test_email_address_stays_whole() {
    let out = segment("邮箱user@host哦", sample_dict(), true);
    assert!(texts(&out).contains(&"user@host"));
}

#[test]
fn test_decimal_number_with_separators() {
    let out = segment("价格1,234.56元", sample_dict(), true);
    let words = texts(&out);
    assert!(words.contains(&"1,234.56"), "{words:?}");
}

#[test]
fn test_year_number() {
    let out = segment("2024年", sample_dict(), true);
    assert_eq!(texts(&out), vec!["2024", "年"]);
    assert_eq!(out[0].lexeme_type(), LexemeType::Arabic);
}

// =============================================================================
// Buffer Refill Transparency
// =============================================================================

#[test]
fn test_small_buffer_output_matches_large_buffer() {
    let dict = sample_dict();
    // Long input so a small buffer refills many times, with words
    // positioned to straddle refill boundaries.
    let text = "中华人民共和国的人民hello中国人三个".repeat(40);

    let mut big = Segmenter::from_str(&text, Arc::clone(&dict), true);
    let expected = big.collect_lexemes().unwrap();

    let mut small = Segmenter::with_buffer_size(
        StrSource::new(&text),
        Arc::clone(&dict),
        true,
        128,
    );
    let got = small.collect_lexemes().unwrap();

    assert_eq!(got.len(), expected.len());
    for (a, b) in got.iter().zip(expected.iter()) {
        assert_eq!(a.text(), b.text());
        assert_eq!(a.start(), b.start());
        assert_eq!(a.lexeme_type(), b.lexeme_type());
    }
}

#[test]
fn test_reader_source_matches_str_source() {
    let dict = sample_dict();
    let text = "中华人民共和国wi-fi信号2024年";

    let from_str = segment(text, Arc::clone(&dict), true);
    let mut from_reader =
        Segmenter::new(Utf8Reader::new(text.as_bytes()), Arc::clone(&dict), true);
    let got = from_reader.collect_lexemes().unwrap();

    assert_eq!(texts(&got), texts(&from_str));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_lexeme_serializes_to_json() {
    let out = segment("中国人", sample_dict(), true);
    let json = serde_json::to_string(&out[0]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["text"], "中国人");
    assert_eq!(value["length"], 3);
    assert_eq!(value["lexeme_type"], "CnWord");
}

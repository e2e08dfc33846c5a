//! End-to-end behaviour through the public API.

use pretty_assertions::assert_eq;
use test_case::test_case;
use unisegment::matcher::{high_surrogate, low_surrogate};
use unisegment::{CompiledMatcher, ConstructionError, Segmenter, SegmenterConfig, TextCursor, UNICODE_16};

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn segmenter() -> &'static Segmenter {
    Segmenter::shared().unwrap()
}

/// Texts covering the awkward cases: empty, marks, pairs, flags and every
/// kind of unpaired surrogate.
fn awkward_texts() -> Vec<Vec<u16>> {
    vec![
        vec![],
        utf16("The quick brown fox"),
        utf16("c\u{300}\u{327}\r\n\u{10308}\u{302}"),
        utf16("\u{1F1EB}\u{1F1F7}\u{1F1E9}"),
        utf16("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}"),
        utf16("\u{915}\u{94D}\u{937}\u{93F}"),
        vec![0xD800],
        vec![0xDC00],
        vec![0xDC00, 0xD800],
        vec![0x61, 0xD800, 0x301, 0x62],
        vec![0xD83D, 0xDE00, 0xDE00, 0x20, 0xD83D],
        vec![0x200D, 0x200D, 0x301],
    ]
}

#[test]
fn test_word_boundaries_of_sentence() {
    let text = utf16("The quick brown fox");
    let word = segmenter().word();
    let cursor = TextCursor::new(&text);
    let breaks: Vec<usize> = (0..=text.len() + 1).filter(|&pos| word.is_break(&cursor, pos)).collect();
    assert_eq!(breaks, vec![0, 3, 4, 9, 10, 15, 16, 19, 20]);
    assert_eq!(word.breaks(&text), vec![0, 3, 4, 9, 10, 15, 16, 19]);
}

#[test]
fn test_grapheme_clusters_of_mixed_text() {
    let parts = [
        "a",
        "c\u{0300}\u{0327}",
        "\u{10308}",
        "\u{10308}\u{0302}",
        "\r\n",
        "\u{1F1EC}\u{1F1E7}",
        "\u{1F1EF}\u{1F1F5}",
    ];
    let text = utf16(&parts.concat());
    let clusters: Vec<String> = segmenter()
        .split_clusters(&text)
        .into_iter()
        .map(String::from_utf16_lossy)
        .collect();
    assert_eq!(clusters, parts);
}

#[test]
fn test_matcher_straddling_the_bmp() {
    let matcher = CompiledMatcher::compile([(0xFF00, 0x10401)]).unwrap();
    for unit in 0xFF00..=0xFFFF {
        assert!(matcher.matches(&[unit]), "{unit:04X}");
    }
    assert!(!matcher.matches(&[0xFEFF]));
    for low in 0xDC00..=0xDFFF {
        assert!(matcher.matches(&[0xD800, low]), "D800 {low:04X}");
    }
    assert!(matcher.matches(&[0xD801, 0xDC00]));
    assert!(matcher.matches(&[0xD801, 0xDC01]));
    assert!(!matcher.matches(&[0xD801, 0xDC02]));
    assert!(!matcher.matches(&[0xD802, 0xDC00]));
    assert!(!matcher.matches(&[0xD800]));
}

#[test_case(0xD800, 0xDFFF ; "whole surrogate block")]
#[test_case(0xD7FF, 0xD800 ; "touching high surrogates")]
#[test_case(0xDFFF, 0xE000 ; "touching low surrogates")]
fn test_surrogate_ranges_are_rejected(min: u32, max: u32) {
    assert_eq!(
        CompiledMatcher::compile([(min, max)]),
        Err(ConstructionError::SurrogateRange { min, max })
    );
}

#[test]
fn test_alphanumeric_search_skips_punctuation() {
    let text = utf16("Hello, ... world!? 42 times");
    let segmenter = segmenter();
    // From inside ", ... " the next stop is the end of "world".
    assert_eq!(segmenter.next_word_break(&text, 6, true), 16);
    assert_eq!(segmenter.next_word_break(&text, 6, false), 7);
    // From inside "!? " the next stop is the end of "42".
    assert_eq!(segmenter.next_word_break(&text, 17, true), 21);
    // Backwards, the caret stops at the start of the word just passed.
    assert_eq!(segmenter.prev_word_break(&text, 19, true), 11);
    assert_eq!(segmenter.prev_word_break(&text, 5, true), 0);
    // Nothing alphanumeric ahead: run to the end.
    let tail = utf16("word ...");
    assert_eq!(segmenter.next_word_break(&tail, 4, true), tail.len());
}

#[test]
fn test_clusters_reproduce_text() {
    for text in awkward_texts() {
        let clusters = segmenter().split_clusters(&text);
        assert_eq!(clusters.concat(), text);
        assert!(clusters.iter().all(|cluster| !cluster.is_empty()));
    }
}

#[test]
fn test_ends_are_always_boundaries() {
    let segmenter = segmenter();
    for text in awkward_texts() {
        assert!(segmenter.is_word_break(&text, 0));
        assert!(segmenter.is_word_break(&text, text.len()));
        assert!(segmenter.is_grapheme_break(&text, 0));
        assert!(segmenter.is_grapheme_break(&text, text.len()));
    }
}

#[test]
fn test_never_break_inside_a_pair() {
    let segmenter = segmenter();
    for text in awkward_texts() {
        let cursor = TextCursor::new(&text);
        for pos in 0..=text.len() {
            if cursor.is_mid_surrogate(pos) {
                assert!(!segmenter.is_word_break(&text, pos), "{text:04X?} at {pos}");
                assert!(!segmenter.is_grapheme_break(&text, pos), "{text:04X?} at {pos}");
            }
        }
    }
}

#[test]
fn test_compiling_twice_accepts_the_same_units() {
    let ranges = [(0x41, 0x5A), (0x3040, 0x309F), (0x1F300, 0x1F5FF), (0x10000, 0x1000F), (0xE0000, 0x10FFFF)];
    let first = CompiledMatcher::compile(ranges).unwrap();
    let second = CompiledMatcher::compile(ranges).unwrap();
    assert_eq!(first, second);

    for unit in (0..=0xFFFFu16).step_by(61) {
        assert_eq!(first.matches(&[unit]), second.matches(&[unit]));
    }
    for high in 0xD800..=0xDBFF {
        for low in (0xDC00..=0xDFFFu16).step_by(127) {
            assert_eq!(first.matches(&[high, low]), second.matches(&[high, low]));
        }
    }
}

#[test]
fn test_singleton_matchers_accept_only_their_pair() {
    let scalars = (0x10000..=0x10FFFFu32).step_by(4093).chain([0x10000, 0x103FF, 0x10400, 0x10FFFF]);
    for scalar in scalars {
        let matcher = CompiledMatcher::compile([(scalar, scalar)]).unwrap();
        let (high, low) = (high_surrogate(scalar), low_surrogate(scalar));
        assert!(matcher.matches(&[high, low]), "U+{scalar:X}");
        assert!(!matcher.matches(&[high]), "U+{scalar:X}");
        assert!(!matcher.matches(&[low]), "U+{scalar:X}");
        assert!(!matcher.matches(&[low, high]), "U+{scalar:X}");
        for other_low in [0xDC00, 0xDDFF, 0xDFFF] {
            assert_eq!(matcher.matches(&[high, other_low]), other_low == low, "U+{scalar:X}");
        }
        for other_high in [0xD800, 0xDA00, 0xDBFF] {
            assert_eq!(matcher.matches(&[other_high, low]), other_high == high, "U+{scalar:X}");
        }
    }
}

#[test_case(1 ; "one")]
#[test_case(2 ; "two")]
#[test_case(3 ; "three")]
#[test_case(4 ; "four")]
#[test_case(7 ; "seven")]
fn test_flag_parity(k: usize) {
    let segmenter = segmenter();
    let indicators: String = (0..k)
        .map(|i| char::from_u32(0x1F1E6 + (i as u32 % 26)).unwrap_or('\u{1F1E6}'))
        .collect();
    let text = utf16(&format!("x{indicators}y"));
    let run = 1..text.len() - 1;

    let word_breaks = run.clone().filter(|&pos| segmenter.is_word_break(&text, pos)).count();
    let grapheme_breaks = run.filter(|&pos| segmenter.is_grapheme_break(&text, pos)).count();
    assert_eq!(word_breaks, k.div_ceil(2));
    assert_eq!(grapheme_breaks, k.div_ceil(2));
}

#[test]
fn test_configured_segmenter() {
    let config = SegmenterConfig::new().with_transparent_run_limit(4);
    let segmenter = Segmenter::with_config(&UNICODE_16, config).unwrap();
    assert_eq!(segmenter.config(), config);

    // Short runs still follow the default rules.
    let text = utf16("a\u{301}\u{301}b");
    assert!(!segmenter.is_word_break(&text, 3));
    assert_eq!(segmenter.split_clusters(&text).len(), 2);
}

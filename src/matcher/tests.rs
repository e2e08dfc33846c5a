use super::*;
use crate::ConstructionError;
use pretty_assertions::assert_eq;

fn compile(ranges: &[(u32, u32)]) -> CompiledMatcher {
    CompiledMatcher::compile(ranges.iter().copied()).unwrap()
}

fn single(scalar: u32) -> (u32, u32) {
    (scalar, scalar)
}

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn test_render_single_characters() {
    assert_eq!(compile(&[single(0x40)]).to_string(), "\\u0040");
    assert_eq!(compile(&[single(0xFFFF)]).to_string(), "\\uffff");
    assert_eq!(compile(&[single(0xD7FF)]).to_string(), "\\ud7ff");
    assert_eq!(compile(&[single(0xE000)]).to_string(), "\\ue000");
    assert_eq!(compile(&[single(0x10000)]).to_string(), "\\ud800\\udc00");
    assert_eq!(compile(&[single(0x10001)]).to_string(), "\\ud800\\udc01");
    assert_eq!(compile(&[single(0x103FF)]).to_string(), "\\ud800\\udfff");
    assert_eq!(compile(&[single(0x10400)]).to_string(), "\\ud801\\udc00");
}

#[test]
fn test_render_bmp_class() {
    let matcher = compile(&[
        single(0x5F),
        (0x203F, 0x2040),
        single(0x2054),
        (0xFE33, 0xFE34),
        (0xFE4D, 0xFE4F),
        single(0xFF3F),
    ]);
    assert_eq!(
        matcher.to_string(),
        "[\\u005f\\u203f-\\u2040\\u2054\\ufe33-\\ufe34\\ufe4d-\\ufe4f\\uff3f]"
    );
    assert_eq!(compile(&[(0xFF00, 0xFFFF)]).to_string(), "[\\uff00-\\uffff]");
}

#[test]
fn test_render_mixed_planes() {
    let cases: &[(&[(u32, u32)], &str)] = &[
        (&[(0xFF00, 0x10000)], "[\\uff00-\\uffff]|\\ud800\\udc00"),
        (
            &[single(0xFFFF), single(0x10000), single(0x10002)],
            "\\uffff|\\ud800\\udc00|\\ud800\\udc02",
        ),
        (&[(0x300, 0x400), single(0x10FFFF)], "[\\u0300-\\u0400]|\\udbff\\udfff"),
        (&[(0xFF00, 0x103FF)], "[\\uff00-\\uffff]|\\ud800[\\udc00-\\udfff]"),
        (
            &[(0xFF00, 0x10400)],
            "[\\uff00-\\uffff]|\\ud800[\\udc00-\\udfff]|\\ud801\\udc00",
        ),
        (
            &[(0xFF00, 0x10401)],
            "[\\uff00-\\uffff]|\\ud800[\\udc00-\\udfff]|\\ud801[\\udc00-\\udc01]",
        ),
        (
            &[(0xFF00, 0x15555)],
            "[\\uff00-\\uffff]|[\\ud800-\\ud814][\\udc00-\\udfff]|\\ud815[\\udc00-\\udd55]",
        ),
        (
            &[(0x10454, 0x10997)],
            "\\ud801[\\udc54-\\udfff]|\\ud802[\\udc00-\\udd97]",
        ),
        (
            &[(0x20222, 0x29999)],
            "\\ud840[\\ude22-\\udfff]|[\\ud841-\\ud865][\\udc00-\\udfff]|\\ud866[\\udc00-\\udd99]",
        ),
        (
            &[(0x0, 0xD7FF), (0xE000, 0xFFFF), (0x10000, 0x10FFFF)],
            "[\\u0000-\\ud7ff\\ue000-\\uffff]|[\\ud800-\\udbff][\\udc00-\\udfff]",
        ),
    ];
    for (ranges, expected) in cases {
        assert_eq!(compile(ranges).to_string(), *expected, "ranges {:X?}", ranges);
    }
}

#[test]
fn test_render_format_property() {
    let matcher = compile(&[
        single(0xAD),
        (0x600, 0x604),
        single(0x6DD),
        single(0x70F),
        (0x200E, 0x200F),
        (0x202A, 0x202E),
        (0x2060, 0x2064),
        (0x206A, 0x206F),
        single(0xFEFF),
        (0xFFF9, 0xFFFB),
        single(0x110BD),
        (0x1D173, 0x1D17A),
        single(0xE0001),
        (0xE0020, 0xE007F),
    ]);
    assert_eq!(
        matcher.to_string(),
        concat!(
            "[\\u00ad\\u0600-\\u0604\\u06dd\\u070f",
            "\\u200e-\\u200f\\u202a-\\u202e\\u2060-\\u2064",
            "\\u206a-\\u206f\\ufeff\\ufff9-\\ufffb]",
            "|\\ud804\\udcbd|\\ud834[\\udd73-\\udd7a]|\\udb40\\udc01",
            "|\\udb40[\\udc20-\\udc7f]"
        )
    );
}

#[test]
fn test_compile_rejects_malformed_ranges() {
    let cases: &[(u32, u32)] = &[
        single(0xD800),
        single(0xDFFF),
        single(0x110000),
        (0xCCCC, 0xDDDD),
        (0xDDDD, 0xEEEE),
        (0xDDDD, 0xEEEEE),
        (0xCCCC, 0xEEEE),
        (0x2, 0x1),
        (0x10FFFF, 0x110000),
    ];
    for &range in cases {
        assert!(CompiledMatcher::compile([range]).is_err(), "range {:X?}", range);
    }
    assert_eq!(
        CompiledMatcher::compile([(0x41, 0x5A), (0xD800, 0xDFFF)]),
        Err(ConstructionError::SurrogateRange { min: 0xD800, max: 0xDFFF })
    );
}

#[test]
fn test_matches_straddling_range() {
    let matcher = compile(&[(0xFF00, 0x10401)]);

    assert!(matcher.matches(&[0xFF00]));
    assert!(matcher.matches(&[0xFFFF]));
    assert!(!matcher.matches(&[0xFEFF]));

    assert!(matcher.matches(&[0xD800, 0xDC00]));
    assert!(matcher.matches(&[0xD800, 0xDFFF]));
    assert!(matcher.matches(&[0xD801, 0xDC00]));
    assert!(matcher.matches(&[0xD801, 0xDC01]));
    assert!(!matcher.matches(&[0xD801, 0xDC02]));
    assert!(!matcher.matches(&[0xD802, 0xDC00]));

    // Unpaired, reordered and truncated encodings
    assert!(!matcher.matches(&[0xD800]));
    assert!(!matcher.matches(&[0xDC00]));
    assert!(!matcher.matches(&[0xDC00, 0xD800]));
    assert!(!matcher.matches(&[0xFF00, 0xFF01]));
    assert!(!matcher.matches(&[]));
    assert!(!matcher.matches(&[0xD800, 0xDC00, 0xFF00]));
}

#[test]
fn test_shared_high_surrogate_rows() {
    let matcher = compile(&[single(0xE0001), (0xE0020, 0xE007F)]);
    assert_eq!(matcher.boxes().len(), 2);
    assert!(matcher.matches(&units("\u{E0001}")));
    assert!(matcher.matches(&units("\u{E0020}")));
    assert!(matcher.matches(&units("\u{E007F}")));
    assert!(!matcher.matches(&units("\u{E0002}")));
    assert!(!matcher.matches(&units("\u{E0080}")));
}

#[test]
fn test_supplementary_round_trip() {
    let mut scalar = 0x10000;
    while scalar <= 0x10FFFF {
        let matcher = compile(&[single(scalar)]);
        let (high, low) = (high_surrogate(scalar), low_surrogate(scalar));

        assert!(matcher.matches(&[high, low]), "U+{:X}", scalar);
        assert!(!matcher.matches(&[high]), "U+{:X} truncated", scalar);
        assert!(!matcher.matches(&[low]), "U+{:X} trail only", scalar);
        if low < TRAIL_MAX {
            assert!(!matcher.matches(&[high, low + 1]));
        }
        if low > TRAIL_MIN {
            assert!(!matcher.matches(&[high, low - 1]));
        }
        if high < LEAD_MAX {
            assert!(!matcher.matches(&[high + 1, low]));
        }
        if high > LEAD_MIN {
            assert!(!matcher.matches(&[high - 1, low]));
        }

        scalar += 0x3FF7;
    }
}

#[test]
fn test_compiling_twice_is_identical() {
    let ranges = [(0x300, 0x36F), (0x1AB0, 0x1AFF), (0x1F3FB, 0x1F3FF), (0xE0020, 0xE007F)];
    let first = compile(&ranges);
    let second = compile(&ranges);
    assert_eq!(first, second);

    let reordered = CompiledMatcher::compile(ranges.iter().rev().copied()).unwrap();
    assert_eq!(first, reordered);
}

#[test]
fn test_contains_scalar() {
    let matcher = compile(&[(0x41, 0x5A), (0x61, 0x7A), single(0x1F600)]);
    assert!(matcher.contains_scalar(0x41));
    assert!(matcher.contains_scalar(0x7A));
    assert!(matcher.contains_scalar(0x1F600));
    assert!(!matcher.contains_scalar(0x5B));
    assert!(!matcher.contains_scalar(0x1F601));
    assert!(!matcher.contains_scalar(0xD800));
}

#[test]
fn test_match_at_and_find() {
    let matcher = compile(&[single(0x1F600), (0x30, 0x39)]);
    let text = units("ab\u{1F600}7");

    assert_eq!(matcher.match_at(&text, 0), None);
    assert_eq!(matcher.match_at(&text, 2), Some(2));
    assert_eq!(matcher.match_at(&text, 3), None);
    assert_eq!(matcher.match_at(&text, 4), Some(1));
    assert_eq!(matcher.match_at(&text, 5), None);
    assert_eq!(matcher.find(&text), Some(2..4));
    assert_eq!(matcher.find(&units("xyz")), None);

    // A lone high surrogate before a digit does not hide the digit
    assert_eq!(matcher.find(&[0xD83D, 0x37]), Some(1..2));
}

#[test]
fn test_empty_matcher() {
    let matcher = compile(&[]);
    assert!(matcher.is_empty());
    assert!(!matcher.matches(&[0x41]));
    assert!(!matcher.matches(&[0xD800, 0xDC00]));
    assert_eq!(matcher.to_string(), "");
}

#[test]
fn test_range_table_backs_unit_lookup() {
    let table = RangeTable::with_mappings(0x10000, false, [(0xFF00, 0xFFFF, true)]);
    assert_eq!(table.step(0xFEFF), Some(&false));
    assert_eq!(table.step(0xFF00), Some(&true));
    assert_eq!(table.step(0x10000), None);
}

//! Default word boundaries (UAX #29, section 4).
//!
//! Every decision is recomputed from the text around the position: the
//! properties of the codepoints on either side, and where the rules need it
//! the next property further out after skipping Format, Extend and ZWJ.
//! Nothing is cached between calls.
//!
//! - `is_break`: the boundary predicate (WB1 to WB999)
//! - `move_break_offset`: caret movement to the next boundary in a direction,
//!   optionally only stopping after letters and digits

use strum::{Display, EnumString};

use crate::classifier::{ClassifierBuilder, PropertyClassifier};
use crate::config::SegmenterConfig;
use crate::cursor::{Codepoint, TextCursor};
use crate::matcher::CompiledMatcher;
use crate::tables::UnicodeData;
use crate::ConstructionError;

/// Word_Break property values, plus the emoji properties the rules consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display)]
pub enum WordBreakProperty {
    CR,
    LF,
    Newline,
    Extend,
    #[strum(serialize = "ZWJ")]
    Zwj,
    #[strum(serialize = "Regional_Indicator")]
    RegionalIndicator,
    Format,
    Katakana,
    #[strum(serialize = "Hebrew_Letter")]
    HebrewLetter,
    ALetter,
    #[strum(serialize = "Single_Quote")]
    SingleQuote,
    #[strum(serialize = "Double_Quote")]
    DoubleQuote,
    MidNumLet,
    MidLetter,
    MidNum,
    Numeric,
    ExtendNumLet,
    WSegSpace,
    #[strum(serialize = "Extended_Pictographic")]
    ExtendedPictographic,
    #[strum(serialize = "Emoji_Modifier_Base")]
    EBase,
    #[strum(serialize = "E_Base_GAZ")]
    EBaseGaz,
    #[strum(serialize = "Emoji_Modifier")]
    EModifier,
}

use WordBreakProperty::*;

impl WordBreakProperty {
    /// Format, Extend and ZWJ attach to whatever precedes them (WB4).
    #[inline]
    pub fn is_transparent(self) -> bool {
        matches!(self, Format | Extend | Zwj)
    }

    /// AHLetter.
    #[inline]
    fn is_letter(self) -> bool {
        matches!(self, ALetter | HebrewLetter)
    }

    /// MidNumLetQ.
    #[inline]
    fn is_mid_num_let_q(self) -> bool {
        matches!(self, MidNumLet | SingleQuote)
    }

    /// Properties that make up the words themselves.
    #[inline]
    pub fn is_alphanumeric(self) -> bool {
        matches!(self, ALetter | Numeric | Katakana | HebrewLetter)
    }
}

#[inline]
fn is_transparent(property: Option<WordBreakProperty>) -> bool {
    property.is_some_and(WordBreakProperty::is_transparent)
}

#[inline]
fn is(property: Option<WordBreakProperty>, test: fn(WordBreakProperty) -> bool) -> bool {
    property.is_some_and(test)
}

/// Direction of caret movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Properties around a candidate boundary.
///
/// `left` and `right` are the immediate neighbours (left after WB4
/// collapsing); `second_left` and `second_right` are the next non-transparent
/// properties further out, filled in only when the rules need them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct WordContext {
    left: Option<WordBreakProperty>,
    right: Option<WordBreakProperty>,
    second_left: Option<WordBreakProperty>,
    second_right: Option<WordBreakProperty>,
}

impl WordContext {
    /// WB6 to WB14: the rules that keep the two sides together.
    fn holds_together(&self) -> bool {
        let WordContext {
            left,
            right,
            second_left,
            second_right,
        } = *self;
        let letter = |p: Option<WordBreakProperty>| is(p, WordBreakProperty::is_letter);
        let mid_q = |p: Option<WordBreakProperty>| is(p, WordBreakProperty::is_mid_num_let_q);

        // WB6: AHLetter × (MidLetter | MidNumLetQ) AHLetter
        (letter(left) && (right == Some(MidLetter) || mid_q(right)) && letter(second_right))
            // WB7: AHLetter (MidLetter | MidNumLetQ) × AHLetter
            || (letter(second_left) && (left == Some(MidLetter) || mid_q(left)) && letter(right))
            // WB7a: Hebrew_Letter × Single_Quote
            || (left == Some(HebrewLetter) && right == Some(SingleQuote))
            // WB7b: Hebrew_Letter × Double_Quote Hebrew_Letter
            || (left == Some(HebrewLetter) && right == Some(DoubleQuote) && second_right == Some(HebrewLetter))
            // WB7c: Hebrew_Letter Double_Quote × Hebrew_Letter
            || (second_left == Some(HebrewLetter) && left == Some(DoubleQuote) && right == Some(HebrewLetter))
            // WB8: Numeric × Numeric
            || (left == Some(Numeric) && right == Some(Numeric))
            // WB9: AHLetter × Numeric
            || (letter(left) && right == Some(Numeric))
            // WB10: Numeric × AHLetter
            || (left == Some(Numeric) && letter(right))
            // WB11: Numeric (MidNum | MidNumLetQ) × Numeric
            || (second_left == Some(Numeric) && (left == Some(MidNum) || mid_q(left)) && right == Some(Numeric))
            // WB12: Numeric × (MidNum | MidNumLetQ) Numeric
            || (left == Some(Numeric) && (right == Some(MidNum) || mid_q(right)) && second_right == Some(Numeric))
            // WB13: Katakana × Katakana
            || (left == Some(Katakana) && right == Some(Katakana))
            // WB13a: (AHLetter | Numeric | Katakana | ExtendNumLet) × ExtendNumLet
            || (right == Some(ExtendNumLet)
                && (letter(left) || matches!(left, Some(Numeric | Katakana | ExtendNumLet))))
            // WB13b: ExtendNumLet × (AHLetter | Numeric | Katakana)
            || (left == Some(ExtendNumLet) && (letter(right) || matches!(right, Some(Numeric | Katakana))))
            // WB14: (E_Base | EBG) × E_Modifier
            || (matches!(left, Some(EBase | EBaseGaz)) && right == Some(EModifier))
    }
}

/// Word boundary evaluator for one set of Unicode tables.
#[derive(Clone, Debug)]
pub struct WordBreak {
    classifier: PropertyClassifier<WordBreakProperty>,
    extended_pictographic: CompiledMatcher,
    config: SegmenterConfig,
}

impl WordBreak {
    pub fn new(data: &UnicodeData) -> Result<Self, ConstructionError> {
        Self::with_config(data, SegmenterConfig::default())
    }

    /// Compile the Word_Break table followed by the emoji table; word
    /// properties take priority.
    pub fn with_config(data: &UnicodeData, config: SegmenterConfig) -> Result<Self, ConstructionError> {
        let classifier = ClassifierBuilder::new()
            .table(data.word_break)?
            .table(data.emoji)?
            .build();
        let extended_pictographic = classifier
            .matcher(ExtendedPictographic)
            .cloned()
            .ok_or_else(|| ConstructionError::UnknownProperty {
                table: data.emoji.name,
                property: ExtendedPictographic.to_string(),
            })?;
        tracing::debug!(version = %data.version, "built word break evaluator");
        Ok(WordBreak {
            classifier,
            extended_pictographic,
            config,
        })
    }

    pub fn classifier(&self) -> &PropertyClassifier<WordBreakProperty> {
        &self.classifier
    }

    /// Word property of a codepoint; lone surrogates have none.
    #[inline]
    pub fn property_of(&self, codepoint: Codepoint) -> Option<WordBreakProperty> {
        self.classifier.classify_codepoint(codepoint)
    }

    /// First non-transparent property at or after `pos`.
    fn next_significant(&self, text: &TextCursor<'_>, mut pos: usize) -> Option<WordBreakProperty> {
        let mut skipped = 0;
        loop {
            let codepoint = text.next_codepoint(pos)?;
            pos += codepoint.len_utf16();
            let property = self.property_of(codepoint);
            if !is_transparent(property) {
                return property;
            }
            skipped += 1;
            if !self.config.allows_skip(skipped) {
                return None;
            }
        }
    }

    /// First non-transparent property ending at or before `pos`.
    fn prev_significant(&self, text: &TextCursor<'_>, mut pos: usize) -> Option<WordBreakProperty> {
        let mut skipped = 0;
        loop {
            let codepoint = text.prev_codepoint(pos)?;
            pos -= codepoint.len_utf16();
            let property = self.property_of(codepoint);
            if !is_transparent(property) {
                return property;
            }
            skipped += 1;
            if !self.config.allows_skip(skipped) {
                return None;
            }
        }
    }

    /// Whether an odd number of regional indicators precede `pos`, ignoring
    /// transparent properties between them.
    fn odd_regional_indicators_before(&self, text: &TextCursor<'_>, mut pos: usize) -> bool {
        let mut regional = 0usize;
        let mut walked = 0usize;
        while let Some(codepoint) = text.prev_codepoint(pos) {
            pos -= codepoint.len_utf16();
            match self.property_of(codepoint) {
                Some(RegionalIndicator) => regional += 1,
                property if is_transparent(property) => {}
                _ => break,
            }
            walked += 1;
            if !self.config.allows_skip(walked) {
                break;
            }
        }
        regional % 2 == 1
    }

    /// Whether `pos` is a word boundary in `text`.
    ///
    /// Positions at or beyond either end are boundaries; positions inside a
    /// surrogate pair never are.
    pub fn is_break(&self, text: &TextCursor<'_>, pos: usize) -> bool {
        // WB1: sot ÷ Any
        // WB2: Any ÷ eot
        let (Some(prev), Some(next)) = (text.prev_codepoint(pos), text.next_codepoint(pos)) else {
            return true;
        };
        if text.is_mid_surrogate(pos) {
            return false;
        }

        let mut ctx = WordContext {
            left: self.property_of(prev),
            right: self.property_of(next),
            ..WordContext::default()
        };
        let mut left_edge = pos - prev.len_utf16();
        let right_edge = pos + next.len_utf16();

        match (ctx.left, ctx.right) {
            // WB3: CR × LF
            (Some(CR), Some(LF)) => return false,
            // WB3a: (Newline | CR | LF) ÷
            // WB3b: ÷ (Newline | CR | LF)
            (Some(Newline | CR | LF), _) | (_, Some(Newline | CR | LF)) => return true,
            // WB3d: WSegSpace × WSegSpace
            (Some(WSegSpace), Some(WSegSpace)) => return false,
            _ => {}
        }
        // WB3c: ZWJ × \p{Extended_Pictographic}
        if ctx.left == Some(Zwj) && self.extended_pictographic.matches_codepoint(next) {
            return false;
        }

        // WB4: X (Extend | Format | ZWJ)* → X
        if is_transparent(ctx.right) {
            return false;
        }
        let mut skipped = 0;
        while is_transparent(ctx.left) {
            // A run reaching the start of text (or the skip limit) has no X.
            let Some(codepoint) = text.prev_codepoint(left_edge).filter(|_| self.config.allows_skip(skipped)) else {
                return true;
            };
            left_edge -= codepoint.len_utf16();
            ctx.left = self.property_of(codepoint);
            skipped += 1;
        }

        // WB5: AHLetter × AHLetter
        if is(ctx.left, WordBreakProperty::is_letter) && is(ctx.right, WordBreakProperty::is_letter) {
            return false;
        }

        ctx.second_right = self.next_significant(text, right_edge);
        ctx.second_left = self.prev_significant(text, left_edge);
        if ctx.holds_together() {
            return false;
        }

        // WB15: sot (RI RI)* RI × RI
        // WB16: [^RI] (RI RI)* RI × RI
        if ctx.left == Some(RegionalIndicator)
            && ctx.right == Some(RegionalIndicator)
            && self.odd_regional_indicators_before(text, pos)
        {
            return false;
        }

        // WB999: Any ÷ Any
        true
    }

    /// Move from `pos` one codepoint at a time in `direction` until a word
    /// boundary is crossed into.
    ///
    /// With `only_alphanumeric`, a boundary only counts when the codepoint
    /// just crossed is a letter or digit, so the caret skips over spaces and
    /// punctuation. Stops at the ends of the text.
    pub fn move_break_offset(
        &self,
        direction: Direction,
        text: &TextCursor<'_>,
        mut pos: usize,
        only_alphanumeric: bool,
    ) -> usize {
        loop {
            let crossed = match direction {
                Direction::Forward => text.next_codepoint(pos),
                Direction::Backward => text.prev_codepoint(pos),
            };
            let Some(codepoint) = crossed else {
                return pos;
            };
            pos = match direction {
                Direction::Forward => pos + codepoint.len_utf16(),
                Direction::Backward => pos - codepoint.len_utf16(),
            };
            if !self.is_break(text, pos) {
                continue;
            }
            if only_alphanumeric && !is(self.property_of(codepoint), WordBreakProperty::is_alphanumeric) {
                continue;
            }
            return pos;
        }
    }

    pub fn next_break_offset(&self, text: &TextCursor<'_>, pos: usize, only_alphanumeric: bool) -> usize {
        self.move_break_offset(Direction::Forward, text, pos, only_alphanumeric)
    }

    pub fn prev_break_offset(&self, text: &TextCursor<'_>, pos: usize, only_alphanumeric: bool) -> usize {
        self.move_break_offset(Direction::Backward, text, pos, only_alphanumeric)
    }

    /// All word boundaries of `text`, in order, including 0 and the length.
    pub fn breaks(&self, text: &[u16]) -> Vec<usize> {
        let cursor = TextCursor::new(text);
        let mut breaks = vec![0];
        let mut pos = 0;
        while pos < cursor.len() {
            pos = self.next_break_offset(&cursor, pos, false);
            breaks.push(pos);
        }
        breaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::UNICODE_16;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn word_break() -> WordBreak {
        WordBreak::new(&UNICODE_16).unwrap()
    }

    fn breaks(s: &str) -> Vec<usize> {
        word_break().breaks(&units(s))
    }

    #[test]
    fn test_property_names_round_trip() {
        assert_eq!("Hebrew_Letter".parse::<WordBreakProperty>(), Ok(HebrewLetter));
        assert_eq!(Zwj.to_string(), "ZWJ");
        assert_eq!(RegionalIndicator.to_string(), "Regional_Indicator");
        assert_eq!(
            "Hebrew Letter".parse::<WordBreakProperty>(),
            Err(strum::ParseError::VariantNotFound)
        );
    }

    #[test]
    fn test_classification_priority() {
        let wb = word_break();
        let classify = |c: char| wb.property_of(Codepoint::from_char(c));
        assert_eq!(classify('a'), Some(ALetter));
        assert_eq!(classify('7'), Some(Numeric));
        assert_eq!(classify('\''), Some(SingleQuote));
        assert_eq!(classify('\u{05D0}'), Some(HebrewLetter));
        assert_eq!(classify('\u{30A2}'), Some(Katakana));
        assert_eq!(classify('\u{200D}'), Some(Zwj));
        // Emoji modifiers are Word_Break=Extend, which outranks the emoji table
        assert_eq!(classify('\u{1F3FB}'), Some(Extend));
        assert_eq!(classify('\u{1F600}'), Some(ExtendedPictographic));
        assert_eq!(classify('\u{3042}'), None);
        assert_eq!(wb.property_of(Codepoint::single(0xD800)), None);
    }

    #[test]
    fn test_quick_brown_fox_forward_and_back() {
        let wb = word_break();
        let text = units("The quick brown fox");
        let cursor = TextCursor::new(&text);

        let mut offset = 0;
        let mut forward = Vec::new();
        for _ in 0..8 {
            offset = wb.next_break_offset(&cursor, offset, false);
            forward.push(offset);
        }
        assert_eq!(forward, vec![3, 4, 9, 10, 15, 16, 19, 19]);

        let mut backward = Vec::new();
        for _ in 0..8 {
            offset = wb.prev_break_offset(&cursor, offset, false);
            backward.push(offset);
        }
        assert_eq!(backward, vec![16, 15, 10, 9, 4, 3, 0, 0]);
    }

    #[test]
    fn test_alphanumeric_movement_skips_punctuation() {
        let wb = word_break();
        let text = units("   The quick  brown ..fox jumps... 3.14159 すどくスドク עברית  ");
        let cursor = TextCursor::new(&text);

        let mut offset = 0;
        let mut forward = Vec::new();
        for _ in 0..9 {
            offset = wb.next_break_offset(&cursor, offset, true);
            forward.push(offset);
        }
        assert_eq!(forward, vec![6, 12, 19, 25, 31, 42, 49, 55, 57]);

        let mut backward = Vec::new();
        for _ in 0..9 {
            offset = wb.prev_break_offset(&cursor, offset, true);
            backward.push(offset);
        }
        assert_eq!(backward, vec![50, 46, 35, 26, 22, 14, 7, 3, 0]);
    }

    #[test_case("can't stop", &[0, 5, 6, 10] ; "apostrophe inside a word")]
    #[test_case("3.14 1,000", &[0, 4, 5, 10] ; "numbers with separators")]
    #[test_case("a1_b2", &[0, 5] ; "extenders join letters and digits")]
    #[test_case("\r\n\n", &[0, 2, 3] ; "crlf stays together")]
    #[test_case("a  b", &[0, 1, 3, 4] ; "horizontal whitespace stays together")]
    #[test_case("カタカナ", &[0, 4] ; "katakana run")]
    #[test_case("e\u{301}x", &[0, 3] ; "extend is absorbed")]
    #[test_case("\u{301}a", &[0, 1, 2] ; "leading extend breaks after start")]
    fn test_boundaries(text: &str, expected: &[usize]) {
        assert_eq!(breaks(text), expected);
    }

    #[test]
    fn test_hebrew_quotes() {
        assert_eq!(breaks("\u{05D0}\"\u{05D1}"), vec![0, 3]);
        assert_eq!(breaks("\u{05D0}'"), vec![0, 2]);
    }

    #[test]
    fn test_regional_indicator_pairs() {
        let flags = "\u{1F1E6}\u{1F1E8}\u{1F1E9}\u{1F1EA}\u{1F1EB}";
        assert_eq!(breaks(flags), vec![0, 4, 8, 10]);
    }

    #[test]
    fn test_zwj_before_pictograph() {
        let wb = word_break();
        let text = units("\u{1F468}\u{200D}\u{1F469}");
        let cursor = TextCursor::new(&text);
        assert!(!wb.is_break(&cursor, 2));
        assert!(!wb.is_break(&cursor, 3));
        assert_eq!(wb.breaks(&text), vec![0, 5]);
    }

    #[test]
    fn test_ends_and_mid_surrogate() {
        let wb = word_break();
        let text = units("a\u{1D538}b");
        let cursor = TextCursor::new(&text);
        assert!(wb.is_break(&cursor, 0));
        assert!(!wb.is_break(&cursor, 2));
        assert!(wb.is_break(&cursor, text.len()));
        assert!(wb.is_break(&cursor, text.len() + 3));
        assert!(wb.is_break(&TextCursor::new(&[]), 0));
    }

    #[test]
    fn test_lone_surrogates_break_like_unclassified() {
        let wb = word_break();
        let text = [0x61, 0xD800, 0x62];
        assert_eq!(wb.breaks(&text), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_transparent_run_limit() {
        let text = units("a\u{301}\u{301}\u{301}b");
        let unbounded = word_break();
        assert_eq!(unbounded.breaks(&text), vec![0, 5]);

        let capped = WordBreak::with_config(&UNICODE_16, SegmenterConfig::new().with_transparent_run_limit(2)).unwrap();
        assert_eq!(capped.breaks(&text), vec![0, 4, 5]);
    }
}

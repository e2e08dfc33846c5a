//! Extended grapheme cluster boundaries (UAX #29, section 3).
//!
//! `is_break` decides a single position from the properties on either side,
//! scanning left only for the rules that need history: conjunct linking
//! (GB9c), emoji ZWJ sequences (GB11) and regional-indicator parity
//! (GB12/GB13). Splitting walks the text one codepoint at a time, so a
//! surrogate pair is never cut and a lone surrogate ends up in a cluster of
//! its own.

use std::iter::FusedIterator;

use strum::{Display, EnumString};

use crate::classifier::{ClassifierBuilder, PropertyClassifier};
use crate::config::SegmenterConfig;
use crate::cursor::{Codepoint, TextCursor};
use crate::matcher::CompiledMatcher;
use crate::tables::UnicodeData;
use crate::ConstructionError;

/// Grapheme_Cluster_Break property values, plus Extended_Pictographic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display)]
pub enum GraphemeBreakProperty {
    CR,
    LF,
    Control,
    Extend,
    #[strum(serialize = "ZWJ")]
    Zwj,
    #[strum(serialize = "Regional_Indicator")]
    RegionalIndicator,
    Prepend,
    SpacingMark,
    L,
    V,
    T,
    LV,
    LVT,
    #[strum(serialize = "Extended_Pictographic")]
    ExtendedPictographic,
}

/// Indic_Conjunct_Break property values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display)]
pub enum ConjunctBreakProperty {
    Linker,
    Consonant,
    Extend,
}

use GraphemeBreakProperty::*;

/// Grapheme cluster boundary evaluator for one set of Unicode tables.
#[derive(Clone, Debug)]
pub struct GraphemeBreak {
    classifier: PropertyClassifier<GraphemeBreakProperty>,
    conjunct: PropertyClassifier<ConjunctBreakProperty>,
    extended_pictographic: CompiledMatcher,
    config: SegmenterConfig,
}

impl GraphemeBreak {
    pub fn new(data: &UnicodeData) -> Result<Self, ConstructionError> {
        Self::with_config(data, SegmenterConfig::default())
    }

    pub fn with_config(data: &UnicodeData, config: SegmenterConfig) -> Result<Self, ConstructionError> {
        let classifier = ClassifierBuilder::new()
            .table(data.grapheme_break)?
            .entry(data.emoji, "Extended_Pictographic")?
            .build();
        let conjunct = ClassifierBuilder::new().table(data.conjunct_break)?.build();
        let extended_pictographic = classifier
            .matcher(ExtendedPictographic)
            .cloned()
            .ok_or_else(|| ConstructionError::UnknownProperty {
                table: data.emoji.name,
                property: ExtendedPictographic.to_string(),
            })?;
        tracing::debug!(version = %data.version, "built grapheme break evaluator");
        Ok(GraphemeBreak {
            classifier,
            conjunct,
            extended_pictographic,
            config,
        })
    }

    pub fn classifier(&self) -> &PropertyClassifier<GraphemeBreakProperty> {
        &self.classifier
    }

    /// Grapheme property of a codepoint.
    ///
    /// Unpaired surrogates are Control, their Grapheme_Cluster_Break value.
    #[inline]
    pub fn property_of(&self, codepoint: Codepoint) -> Option<GraphemeBreakProperty> {
        if codepoint.is_lone_surrogate() {
            return Some(Control);
        }
        self.classifier.classify_codepoint(codepoint)
    }

    #[inline]
    fn is_pictographic(&self, codepoint: Codepoint) -> bool {
        self.extended_pictographic.matches_codepoint(codepoint)
    }

    /// GB9c: Consonant [Extend Linker]* Linker [Extend Linker]* × Consonant
    fn links_conjunct(&self, text: &TextCursor<'_>, mut pos: usize, next: Codepoint) -> bool {
        if self.conjunct.classify_codepoint(next) != Some(ConjunctBreakProperty::Consonant) {
            return false;
        }
        let mut linked = false;
        let mut skipped = 0;
        while let Some(codepoint) = text.prev_codepoint(pos) {
            pos -= codepoint.len_utf16();
            match self.conjunct.classify_codepoint(codepoint) {
                Some(ConjunctBreakProperty::Consonant) => return linked,
                Some(ConjunctBreakProperty::Linker) => linked = true,
                Some(ConjunctBreakProperty::Extend) => {}
                None => return false,
            }
            skipped += 1;
            if !self.config.allows_skip(skipped) {
                return false;
            }
        }
        false
    }

    /// GB11 context: whether an Extended_Pictographic precedes `pos` with
    /// only Extend in between.
    fn follows_pictographic(&self, text: &TextCursor<'_>, mut pos: usize) -> bool {
        let mut skipped = 0;
        while let Some(codepoint) = text.prev_codepoint(pos) {
            pos -= codepoint.len_utf16();
            if self.is_pictographic(codepoint) {
                return true;
            }
            if self.property_of(codepoint) != Some(Extend) {
                return false;
            }
            skipped += 1;
            if !self.config.allows_skip(skipped) {
                return false;
            }
        }
        false
    }

    /// Whether an odd number of consecutive regional indicators end at `pos`.
    fn odd_regional_indicators_before(&self, text: &TextCursor<'_>, mut pos: usize) -> bool {
        let mut count = 0usize;
        while let Some(codepoint) = text.prev_codepoint(pos) {
            if self.property_of(codepoint) != Some(RegionalIndicator) {
                break;
            }
            pos -= codepoint.len_utf16();
            count += 1;
            if !self.config.allows_skip(count) {
                break;
            }
        }
        count % 2 == 1
    }

    /// Whether `pos` is an extended grapheme cluster boundary in `text`.
    pub fn is_break(&self, text: &TextCursor<'_>, pos: usize) -> bool {
        // GB1: sot ÷ Any
        // GB2: Any ÷ eot
        let (Some(prev), Some(next)) = (text.prev_codepoint(pos), text.next_codepoint(pos)) else {
            return true;
        };
        if text.is_mid_surrogate(pos) {
            return false;
        }

        let left = self.property_of(prev);
        let right = self.property_of(next);

        match (left, right) {
            // GB3: CR × LF
            (Some(CR), Some(LF)) => return false,
            // GB4: (Control | CR | LF) ÷
            // GB5: ÷ (Control | CR | LF)
            (Some(Control | CR | LF), _) | (_, Some(Control | CR | LF)) => return true,
            // GB6: L × (L | V | LV | LVT)
            // GB7: (LV | V) × (V | T)
            // GB8: (LVT | T) × T
            (Some(L), Some(L | V | LV | LVT)) | (Some(LV | V), Some(V | T)) | (Some(LVT | T), Some(T)) => {
                return false
            }
            // GB9: × (Extend | ZWJ)
            // GB9a: × SpacingMark
            // GB9b: Prepend ×
            (_, Some(Extend | Zwj | SpacingMark)) | (Some(Prepend), _) => return false,
            _ => {}
        }

        if self.links_conjunct(text, pos, next) {
            return false;
        }

        // GB11: ExtPict Extend* ZWJ × ExtPict
        if left == Some(Zwj)
            && self.is_pictographic(next)
            && self.follows_pictographic(text, pos - prev.len_utf16())
        {
            return false;
        }

        // GB12: sot (RI RI)* RI × RI
        // GB13: [^RI] (RI RI)* RI × RI
        if left == Some(RegionalIndicator)
            && right == Some(RegionalIndicator)
            && self.odd_regional_indicators_before(text, pos)
        {
            return false;
        }

        // GB999: Any ÷ Any
        true
    }

    /// The first cluster boundary after `pos`, or `pos` at the end of text.
    pub fn next_break_offset(&self, text: &TextCursor<'_>, mut pos: usize) -> usize {
        while let Some(codepoint) = text.next_codepoint(pos) {
            pos += codepoint.len_utf16();
            if self.is_break(text, pos) {
                break;
            }
        }
        pos
    }

    /// The last cluster boundary before `pos`, or `pos` at the start of text.
    pub fn prev_break_offset(&self, text: &TextCursor<'_>, mut pos: usize) -> usize {
        while let Some(codepoint) = text.prev_codepoint(pos) {
            pos -= codepoint.len_utf16();
            if self.is_break(text, pos) {
                break;
            }
        }
        pos
    }

    /// Iterate the clusters of `text` lazily.
    pub fn clusters<'a>(&self, text: &'a [u16]) -> GraphemeClusters<'a, '_> {
        GraphemeClusters {
            breaker: self,
            cursor: TextCursor::new(text),
            pos: 0,
        }
    }

    /// Partition `text` into clusters. Concatenating them gives back `text`.
    pub fn split_clusters<'a>(&self, text: &'a [u16]) -> Vec<&'a [u16]> {
        self.clusters(text).collect()
    }
}

/// Iterator over the grapheme clusters of a text, front to back.
///
/// Each step resumes from the previous boundary, so dropping the iterator
/// early costs nothing further.
#[derive(Clone, Debug)]
pub struct GraphemeClusters<'a, 'b> {
    breaker: &'b GraphemeBreak,
    cursor: TextCursor<'a>,
    pos: usize,
}

impl GraphemeClusters<'_, '_> {
    /// Code-unit offset where the next cluster starts.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for GraphemeClusters<'a, '_> {
    type Item = &'a [u16];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.cursor.len() {
            return None;
        }
        let start = self.pos;
        self.pos = self.breaker.next_break_offset(&self.cursor, start);
        self.cursor.text().get(start..self.pos)
    }
}

impl FusedIterator for GraphemeClusters<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::UNICODE_16;
    use pretty_assertions::assert_eq;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn grapheme_break() -> GraphemeBreak {
        GraphemeBreak::new(&UNICODE_16).unwrap()
    }

    fn split(s: &str) -> Vec<String> {
        let text = units(s);
        grapheme_break()
            .split_clusters(&text)
            .into_iter()
            .map(String::from_utf16_lossy)
            .collect()
    }

    #[test]
    fn test_split_clusters() {
        let expected = [
            "a",
            " ",
            " ",
            "b",
            "カ",
            "タ",
            "カ",
            "ナ",
            "c\u{0300}\u{0327}",
            "\u{10308}",
            "\u{10308}\u{0302}",
            "\r\n",
            "\n",
            "\u{1104}\u{1173}",
            "\u{1105}\u{1161}\u{11A8}",
            "\u{1F1ED}\u{1F1F0}",
        ];
        assert_eq!(split(&expected.concat()), expected);
    }

    #[test]
    fn test_property_names() {
        assert_eq!("Regional_Indicator".parse::<GraphemeBreakProperty>(), Ok(RegionalIndicator));
        assert_eq!(LVT.to_string(), "LVT");
        assert_eq!("Linker".parse::<ConjunctBreakProperty>(), Ok(ConjunctBreakProperty::Linker));
        assert_eq!("Virama".parse::<ConjunctBreakProperty>(), Err(strum::ParseError::VariantNotFound));
    }

    #[test]
    fn test_conjunct_cluster() {
        // KA + VIRAMA + SSA, and with a nukta between
        assert_eq!(split("\u{0915}\u{094D}\u{0937}"), vec!["\u{0915}\u{094D}\u{0937}"]);
        assert_eq!(split("\u{0915}\u{093C}\u{094D}\u{0937}"), vec!["\u{0915}\u{093C}\u{094D}\u{0937}"]);
        // No linker: the second consonant starts a new cluster
        assert_eq!(split("\u{0915}\u{093C}\u{0937}"), vec!["\u{0915}\u{093C}", "\u{0937}"]);
    }

    #[test]
    fn test_marks_and_prepend() {
        assert_eq!(split("\u{0915}\u{093E}"), vec!["\u{0915}\u{093E}"]);
        assert_eq!(split("\u{0600}1"), vec!["\u{0600}1"]);
        assert_eq!(split("\u{1100}\u{1161}\u{11A8}x"), vec!["\u{1100}\u{1161}\u{11A8}", "x"]);
    }

    #[test]
    fn test_emoji_zwj_sequence() {
        let family = "\u{1F468}\u{1F3FB}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(split(family), vec![family]);
        // ZWJ without a preceding pictograph does not glue
        assert_eq!(split("a\u{200D}\u{1F469}"), vec!["a\u{200D}", "\u{1F469}"]);
    }

    #[test]
    fn test_regional_indicator_parity() {
        let flags = "\u{1F1E6}\u{1F1E8}\u{1F1E9}\u{1F1EA}\u{1F1EB}";
        assert_eq!(split(flags), vec!["\u{1F1E6}\u{1F1E8}", "\u{1F1E9}\u{1F1EA}", "\u{1F1EB}"]);
    }

    #[test]
    fn test_lone_surrogates_are_control() {
        let gb = grapheme_break();
        assert_eq!(gb.property_of(Codepoint::single(0xDC00)), Some(Control));

        let text = [0x61, 0xD800, 0x0301, 0xDC00];
        let clusters = gb.split_clusters(&text);
        assert_eq!(clusters, vec![&[0x61][..], &[0xD800], &[0x0301], &[0xDC00]]);
    }

    #[test]
    fn test_empty_and_ends() {
        let gb = grapheme_break();
        assert!(gb.split_clusters(&[]).is_empty());
        assert!(gb.is_break(&TextCursor::new(&[]), 0));

        let text = units("\u{1F600}");
        let cursor = TextCursor::new(&text);
        assert!(gb.is_break(&cursor, 0));
        assert!(!gb.is_break(&cursor, 1));
        assert!(gb.is_break(&cursor, 2));
    }

    #[test]
    fn test_caret_movement() {
        let gb = grapheme_break();
        let text = units("e\u{301}\u{1F1E6}\u{1F1E8}x");
        let cursor = TextCursor::new(&text);
        assert_eq!(gb.next_break_offset(&cursor, 0), 2);
        assert_eq!(gb.next_break_offset(&cursor, 2), 6);
        assert_eq!(gb.next_break_offset(&cursor, 6), 7);
        assert_eq!(gb.next_break_offset(&cursor, 7), 7);
        assert_eq!(gb.prev_break_offset(&cursor, 7), 6);
        assert_eq!(gb.prev_break_offset(&cursor, 6), 2);
        assert_eq!(gb.prev_break_offset(&cursor, 2), 0);
        assert_eq!(gb.prev_break_offset(&cursor, 0), 0);
    }

    #[test]
    fn test_clusters_iterator_offsets() {
        let gb = grapheme_break();
        let text = units("ab\r\n");
        let mut clusters = gb.clusters(&text);
        assert_eq!(clusters.next(), Some(&text[0..1]));
        assert_eq!(clusters.offset(), 1);
        assert_eq!(clusters.next(), Some(&text[1..2]));
        assert_eq!(clusters.next(), Some(&text[2..4]));
        assert_eq!(clusters.next(), None);
        assert_eq!(clusters.next(), None);
    }

    #[test]
    fn test_transparent_run_limit() {
        let text = units("\u{1F468}\u{301}\u{301}\u{301}\u{200D}\u{1F469}");
        assert_eq!(grapheme_break().split_clusters(&text).len(), 1);

        let capped =
            GraphemeBreak::with_config(&UNICODE_16, SegmenterConfig::new().with_transparent_run_limit(2)).unwrap();
        let clusters = capped.split_clusters(&text);
        assert_eq!(clusters, vec![&text[..6], &text[6..]]);
    }
}

//! Matchers compiled from scalar-value ranges.

use std::fmt;
use std::ops::Range;

use rustc_hash::FxHashMap;

use super::range_table::RangeTable;
use super::surrogate::{is_lead, is_trail, surrogate_boxes, CodeUnitSpan, SurrogateBox};
use crate::cursor::{Codepoint, TextCursor};
use crate::ranges::{normalize_ranges, validate_ranges, ScalarRange, BMP_MAX};
use crate::ConstructionError;

/// Exclusive ceiling for single code-unit keys.
const UNIT_CEILING: u32 = BMP_MAX + 1;

/// Accepts exactly the UTF-16 encodings of a set of scalar ranges.
///
/// BMP scalars are one code unit and are looked up in a unit table.
/// Supplementary scalars are pairs: the high surrogate selects one of a few
/// interned low-surrogate tables, built from the surrogate boxes of the
/// ranges. Unpaired or reordered surrogates are never accepted.
///
/// `Display` renders the equivalent ECMAScript regular-expression source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledMatcher {
    ranges: Vec<ScalarRange>,
    units: RangeTable<bool>,
    boxes: Vec<SurrogateBox>,
    high: RangeTable<Option<usize>>,
    low_sets: Vec<RangeTable<bool>>,
}

impl CompiledMatcher {
    /// Compile raw inclusive `(min, max)` ranges.
    ///
    /// Fails on the first range that is inverted, exceeds U+10FFFF or
    /// touches the surrogate block.
    pub fn compile<I>(ranges: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        Ok(Self::from_ranges(validate_ranges(ranges)?))
    }

    /// Build from already validated ranges, in any order.
    pub fn from_ranges(ranges: Vec<ScalarRange>) -> Self {
        let ranges = normalize_ranges(ranges);

        let units = RangeTable::with_mappings(
            UNIT_CEILING,
            false,
            ranges
                .iter()
                .filter_map(|range| range.split_at_bmp().0)
                .map(|bmp| (bmp.start(), bmp.end(), true)),
        );

        let boxes: Vec<SurrogateBox> = ranges.iter().flat_map(|&range| surrogate_boxes(range)).collect();
        let (high, low_sets) = build_pair_tables(&boxes);

        tracing::trace!(
            ranges = ranges.len(),
            unit_ranges = units.len(),
            boxes = boxes.len(),
            low_sets = low_sets.len(),
            "compiled matcher"
        );

        CompiledMatcher {
            ranges,
            units,
            boxes,
            high,
            low_sets,
        }
    }

    /// The normalized (sorted, merged) ranges this matcher accepts.
    pub fn ranges(&self) -> &[ScalarRange] {
        &self.ranges
    }

    /// Surrogate boxes covering the supplementary part of the ranges.
    pub fn boxes(&self) -> &[SurrogateBox] {
        &self.boxes
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains_scalar(&self, scalar: u32) -> bool {
        let index = self.ranges.partition_point(|range| range.end() < scalar);
        self.ranges.get(index).is_some_and(|range| range.contains(scalar))
    }

    #[inline]
    fn accepts_unit(&self, unit: u16) -> bool {
        self.units.step(unit as u32).copied().unwrap_or(false)
    }

    #[inline]
    fn accepts_pair(&self, high: u16, low: u16) -> bool {
        match self.high.step(high as u32) {
            Some(Some(index)) => self.low_sets[*index].step(low as u32).copied().unwrap_or(false),
            _ => false,
        }
    }

    /// Whether `units` is exactly one encoded codepoint the matcher accepts.
    pub fn matches(&self, units: &[u16]) -> bool {
        match *units {
            [unit] => self.accepts_unit(unit),
            [high, low] => is_lead(high) && is_trail(low) && self.accepts_pair(high, low),
            _ => false,
        }
    }

    #[inline]
    pub fn matches_codepoint(&self, codepoint: Codepoint) -> bool {
        self.matches(codepoint.units())
    }

    /// Length in code units of the accepted codepoint starting at `pos`.
    pub fn match_at(&self, text: &[u16], pos: usize) -> Option<usize> {
        let codepoint = TextCursor::new(text).next_codepoint(pos)?;
        self.matches_codepoint(codepoint).then(|| codepoint.len_utf16())
    }

    /// Code-unit range of the first accepted codepoint in `text`.
    pub fn find(&self, text: &[u16]) -> Option<Range<usize>> {
        TextCursor::new(text)
            .codepoints()
            .find(|&(_, codepoint)| self.matches_codepoint(codepoint))
            .map(|(pos, codepoint)| pos..pos + codepoint.len_utf16())
    }
}

/// Build the high-surrogate dispatch table and its interned low tables.
fn build_pair_tables(boxes: &[SurrogateBox]) -> (RangeTable<Option<usize>>, Vec<RangeTable<bool>>) {
    let mut cuts: Vec<u32> = boxes
        .iter()
        .flat_map(|b| [b.high.min as u32, b.high.max as u32 + 1])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut low_sets: Vec<RangeTable<bool>> = Vec::new();
    let mut interned: FxHashMap<Vec<CodeUnitSpan>, usize> = FxHashMap::default();
    let mut mappings = Vec::new();

    for window in cuts.windows(2) {
        let (lo, hi) = (window[0], window[1] - 1);
        let mut spans: Vec<CodeUnitSpan> = boxes
            .iter()
            .filter(|b| b.high.min as u32 <= lo && hi <= b.high.max as u32)
            .map(|b| b.low)
            .collect();
        if spans.is_empty() {
            continue;
        }
        spans.sort_unstable();

        let index = match interned.get(&spans) {
            Some(&index) => index,
            None => {
                let table = RangeTable::with_mappings(
                    UNIT_CEILING,
                    false,
                    spans.iter().map(|s| (s.min as u32, s.max as u32, true)),
                );
                low_sets.push(table);
                interned.insert(spans, low_sets.len() - 1);
                low_sets.len() - 1
            }
        };
        mappings.push((lo, hi, Some(index)));
    }

    (RangeTable::with_mappings(UNIT_CEILING, None, mappings), low_sets)
}

struct Escaped(u16);

impl fmt::Display for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\u{:04x}", self.0)
    }
}

struct Span {
    span: CodeUnitSpan,
    bracketed: bool,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CodeUnitSpan { min, max } = self.span;
        if min == max {
            write!(f, "{}", Escaped(min))
        } else if self.bracketed {
            write!(f, "[{}-{}]", Escaped(min), Escaped(max))
        } else {
            write!(f, "{}-{}", Escaped(min), Escaped(max))
        }
    }
}

impl fmt::Display for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class: Vec<CodeUnitSpan> = self
            .ranges
            .iter()
            .filter_map(|range| range.split_at_bmp().0)
            .map(|bmp| CodeUnitSpan::new(bmp.start() as u16, bmp.end() as u16))
            .collect();

        let mut first = true;
        let mut separator = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !std::mem::take(&mut first) {
                f.write_str("|")?;
            }
            Ok(())
        };

        match class.as_slice() {
            [] => {}
            [single] if single.is_single() => {
                separator(f)?;
                write!(f, "{}", Escaped(single.min))?;
            }
            spans => {
                separator(f)?;
                f.write_str("[")?;
                for &span in spans {
                    write!(f, "{}", Span { span, bracketed: false })?;
                }
                f.write_str("]")?;
            }
        }

        for b in &self.boxes {
            separator(f)?;
            write!(
                f,
                "{}{}",
                Span { span: b.high, bracketed: true },
                Span { span: b.low, bracketed: true }
            )?;
        }
        Ok(())
    }
}

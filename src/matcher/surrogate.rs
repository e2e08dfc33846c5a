//! UTF-16 surrogate arithmetic and surrogate-box decomposition.
//!
//! A supplementary-plane scalar `s` encodes as the pair
//! `(0xD800 + ((s - 0x10000) >> 10), 0xDC00 + ((s - 0x10000) & 0x3FF))`.
//! A contiguous run of such scalars therefore covers a "staircase" in
//! (high, low) space, which splits into at most three rectangles: the tail of
//! the first high surrogate's row, the full rows in between, and the head of
//! the last row.

use smallvec::SmallVec;

use crate::ranges::{ScalarRange, BMP_MAX};

pub const LEAD_MIN: u16 = 0xD800;
pub const LEAD_MAX: u16 = 0xDBFF;
pub const TRAIL_MIN: u16 = 0xDC00;
pub const TRAIL_MAX: u16 = 0xDFFF;

const SUPPLEMENTARY_BASE: u32 = BMP_MAX + 1;

#[inline]
pub fn is_lead(unit: u16) -> bool {
    (LEAD_MIN..=LEAD_MAX).contains(&unit)
}

#[inline]
pub fn is_trail(unit: u16) -> bool {
    (TRAIL_MIN..=TRAIL_MAX).contains(&unit)
}

#[inline]
pub fn is_surrogate(unit: u16) -> bool {
    (LEAD_MIN..=TRAIL_MAX).contains(&unit)
}

/// High (lead) surrogate of a supplementary scalar.
#[inline]
pub fn high_surrogate(scalar: u32) -> u16 {
    debug_assert!(scalar > BMP_MAX);
    LEAD_MIN + ((scalar - SUPPLEMENTARY_BASE) >> 10) as u16
}

/// Low (trail) surrogate of a supplementary scalar.
#[inline]
pub fn low_surrogate(scalar: u32) -> u16 {
    debug_assert!(scalar > BMP_MAX);
    TRAIL_MIN + ((scalar - SUPPLEMENTARY_BASE) & 0x3FF) as u16
}

/// Scalar value of a well-formed surrogate pair.
#[inline]
pub fn decode_pair(high: u16, low: u16) -> u32 {
    SUPPLEMENTARY_BASE + (((high - LEAD_MIN) as u32) << 10) + (low - TRAIL_MIN) as u32
}

/// An inclusive span of code units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeUnitSpan {
    pub min: u16,
    pub max: u16,
}

impl CodeUnitSpan {
    pub fn new(min: u16, max: u16) -> Self {
        debug_assert!(min <= max);
        CodeUnitSpan { min, max }
    }

    #[inline]
    pub fn contains(&self, unit: u16) -> bool {
        self.min <= unit && unit <= self.max
    }

    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

/// A rectangle of surrogate pairs: every high in `high` combined with every
/// low in `low`.
///
/// Boxes produced by [`surrogate_boxes`] always cover one contiguous run of
/// scalar values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurrogateBox {
    pub high: CodeUnitSpan,
    pub low: CodeUnitSpan,
}

impl SurrogateBox {
    #[inline]
    pub fn contains(&self, high: u16, low: u16) -> bool {
        self.high.contains(high) && self.low.contains(low)
    }

    /// First and last scalar covered by the box.
    pub fn scalars(&self) -> (u32, u32) {
        (
            decode_pair(self.high.min, self.low.min),
            decode_pair(self.high.max, self.low.max),
        )
    }
}

/// Decompose the supplementary part of `range` into surrogate boxes.
///
/// Returns no boxes for a BMP-only range, one box when both ends share a
/// high surrogate, and otherwise up to three: a partial row under the first
/// high surrogate, full rows strictly between, and a partial row under the
/// last one. Rows that an endpoint covers completely are folded into the
/// full-row box.
pub fn surrogate_boxes(range: ScalarRange) -> SmallVec<[SurrogateBox; 3]> {
    let mut boxes = SmallVec::new();
    let Some(supplementary) = range.split_at_bmp().1 else {
        return boxes;
    };
    let (first, last) = (supplementary.start(), supplementary.end());

    let (high_first, low_first) = (high_surrogate(first), low_surrogate(first));
    let (high_last, low_last) = (high_surrogate(last), low_surrogate(last));

    if high_first == high_last {
        boxes.push(SurrogateBox {
            high: CodeUnitSpan::new(high_first, high_last),
            low: CodeUnitSpan::new(low_first, low_last),
        });
        return boxes;
    }

    // Smallest high surrogate whose whole row lies at or above `first`, and
    // largest whose whole row lies at or below `last`.
    let full_rows_min = LEAD_MIN + ((first - SUPPLEMENTARY_BASE + 0x3FF) >> 10) as u16;
    let full_rows_max = LEAD_MIN + ((last - SUPPLEMENTARY_BASE - 0x3FF) >> 10) as u16;

    if high_first < full_rows_min {
        boxes.push(SurrogateBox {
            high: CodeUnitSpan::new(high_first, high_first),
            low: CodeUnitSpan::new(low_first, TRAIL_MAX),
        });
    }
    if full_rows_min <= full_rows_max {
        boxes.push(SurrogateBox {
            high: CodeUnitSpan::new(full_rows_min, full_rows_max),
            low: CodeUnitSpan::new(TRAIL_MIN, TRAIL_MAX),
        });
    }
    if full_rows_max < high_last {
        boxes.push(SurrogateBox {
            high: CodeUnitSpan::new(high_last, high_last),
            low: CodeUnitSpan::new(TRAIL_MIN, low_last),
        });
    }
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes(min: u32, max: u32) -> Vec<(u16, u16, u16, u16)> {
        surrogate_boxes(ScalarRange::new(min, max).unwrap())
            .iter()
            .map(|b| (b.high.min, b.high.max, b.low.min, b.low.max))
            .collect()
    }

    #[test]
    fn test_encode_decode() {
        assert_eq!((high_surrogate(0x10000), low_surrogate(0x10000)), (0xD800, 0xDC00));
        assert_eq!((high_surrogate(0x1F600), low_surrogate(0x1F600)), (0xD83D, 0xDE00));
        assert_eq!((high_surrogate(0x10FFFF), low_surrogate(0x10FFFF)), (0xDBFF, 0xDFFF));
        assert_eq!(decode_pair(0xD83D, 0xDE00), 0x1F600);
        for scalar in [0x10000, 0x10400, 0x1D538, 0x282E2, 0x10FFFF] {
            assert_eq!(decode_pair(high_surrogate(scalar), low_surrogate(scalar)), scalar);
        }
    }

    #[test]
    fn test_classify_units() {
        assert!(is_lead(0xD800) && is_lead(0xDBFF) && !is_lead(0xDC00));
        assert!(is_trail(0xDC00) && is_trail(0xDFFF) && !is_trail(0xDBFF));
        assert!(is_surrogate(0xD800) && is_surrogate(0xDFFF));
        assert!(!is_surrogate(0xD7FF) && !is_surrogate(0xE000));
    }

    #[test]
    fn test_bmp_range_has_no_boxes() {
        assert!(boxes(0x41, 0xD7FF).is_empty());
        assert!(boxes(0xE000, 0xFFFF).is_empty());
        assert!(boxes(0, 0).is_empty());
    }

    #[test]
    fn test_single_row() {
        assert_eq!(boxes(0x10000, 0x10000), vec![(0xD800, 0xD800, 0xDC00, 0xDC00)]);
        assert_eq!(boxes(0x10400, 0x10401), vec![(0xD801, 0xD801, 0xDC00, 0xDC01)]);
    }

    #[test]
    fn test_partial_rows_without_full_rows() {
        assert_eq!(
            boxes(0x10454, 0x10997),
            vec![(0xD801, 0xD801, 0xDC54, 0xDFFF), (0xD802, 0xD802, 0xDC00, 0xDD97)]
        );
    }

    #[test]
    fn test_three_boxes() {
        assert_eq!(
            boxes(0x20222, 0x29999),
            vec![
                (0xD840, 0xD840, 0xDE22, 0xDFFF),
                (0xD841, 0xD865, 0xDC00, 0xDFFF),
                (0xD866, 0xD866, 0xDC00, 0xDD99),
            ]
        );
    }

    #[test]
    fn test_aligned_ends_fold_into_full_rows() {
        assert_eq!(boxes(0x10000, 0x10FFFF), vec![(0xD800, 0xDBFF, 0xDC00, 0xDFFF)]);
        assert_eq!(
            boxes(0x10000, 0x15555),
            vec![(0xD800, 0xD814, 0xDC00, 0xDFFF), (0xD815, 0xD815, 0xDC00, 0xDD55)]
        );
        assert_eq!(
            boxes(0x10001, 0x107FF),
            vec![(0xD800, 0xD800, 0xDC01, 0xDFFF), (0xD801, 0xD801, 0xDC00, 0xDFFF)]
        );
    }

    #[test]
    fn test_straddling_range_uses_supplementary_part() {
        assert_eq!(
            boxes(0xFF00, 0x10401),
            vec![(0xD800, 0xD800, 0xDC00, 0xDFFF), (0xD801, 0xD801, 0xDC00, 0xDC01)]
        );
    }

    #[test]
    fn test_boxes_cover_exactly_the_range() {
        for (min, max) in [(0x10454, 0x10997), (0x20222, 0x29999), (0x1F000, 0x1FAFF), (0x10FFFE, 0x10FFFF)] {
            let found = surrogate_boxes(ScalarRange::new(min, max).unwrap());
            let mut next = min;
            for b in &found {
                let (first, last) = b.scalars();
                assert_eq!(first, next);
                assert!(last >= first);
                next = last + 1;
            }
            assert_eq!(next, max + 1);
        }
    }
}

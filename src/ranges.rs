//! Inclusive ranges of Unicode scalar values.

use crate::ConstructionError;

/// Largest Unicode scalar value.
pub const SCALAR_MAX: u32 = 0x10FFFF;
/// Last scalar value encoded by a single UTF-16 code unit.
pub const BMP_MAX: u32 = 0xFFFF;
pub const SURROGATE_MIN: u32 = 0xD800;
pub const SURROGATE_MAX: u32 = 0xDFFF;

/// An inclusive range `[min, max]` of scalar values.
///
/// Construction rejects inverted bounds, values above U+10FFFF and any
/// intersection with the surrogate block, so a `ScalarRange` always encodes to
/// well-formed UTF-16.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScalarRange {
    min: u32,
    max: u32,
}

impl ScalarRange {
    pub fn new(min: u32, max: u32) -> Result<Self, ConstructionError> {
        if min > max {
            return Err(ConstructionError::InvertedRange { min, max });
        }
        if max > SCALAR_MAX {
            return Err(ConstructionError::OutOfRange { min, max });
        }
        if min <= SURROGATE_MAX && max >= SURROGATE_MIN {
            return Err(ConstructionError::SurrogateRange { min, max });
        }
        Ok(ScalarRange { min, max })
    }

    pub fn single(scalar: u32) -> Result<Self, ConstructionError> {
        Self::new(scalar, scalar)
    }

    /// First scalar in the range.
    #[inline]
    pub fn start(&self) -> u32 {
        self.min
    }

    /// Last scalar in the range, inclusive.
    #[inline]
    pub fn end(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn contains(&self, scalar: u32) -> bool {
        self.min <= scalar && scalar <= self.max
    }

    /// Number of scalar values in the range.
    pub fn count(&self) -> u32 {
        self.max - self.min + 1
    }

    /// Split at the BMP edge into the part encoded by single code units and
    /// the part encoded by surrogate pairs.
    pub fn split_at_bmp(&self) -> (Option<ScalarRange>, Option<ScalarRange>) {
        if self.max <= BMP_MAX {
            (Some(*self), None)
        } else if self.min > BMP_MAX {
            (None, Some(*self))
        } else {
            (
                Some(ScalarRange { min: self.min, max: BMP_MAX }),
                Some(ScalarRange { min: BMP_MAX + 1, max: self.max }),
            )
        }
    }
}

impl TryFrom<(u32, u32)> for ScalarRange {
    type Error = ConstructionError;

    fn try_from((min, max): (u32, u32)) -> Result<Self, Self::Error> {
        ScalarRange::new(min, max)
    }
}

impl TryFrom<u32> for ScalarRange {
    type Error = ConstructionError;

    fn try_from(scalar: u32) -> Result<Self, Self::Error> {
        ScalarRange::single(scalar)
    }
}

/// Validate raw `(min, max)` pairs, stopping at the first malformed one.
pub fn validate_ranges<I>(ranges: I) -> Result<Vec<ScalarRange>, ConstructionError>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    ranges.into_iter().map(ScalarRange::try_from).collect()
}

/// Sort ranges and merge the ones that overlap or touch.
pub fn normalize_ranges(mut ranges: Vec<ScalarRange>) -> Vec<ScalarRange> {
    if ranges.is_empty() {
        return ranges;
    }

    ranges.sort_unstable();

    let mut out = Vec::with_capacity(ranges.len());
    let mut current = ranges[0];

    for next in ranges.iter().skip(1).copied() {
        if next.min > current.max + 1 {
            out.push(current);
            current = next;
            continue;
        }
        if next.max <= current.max {
            continue;
        }
        current.max = next.max;
    }
    out.push(current);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0xD800, 0xD800 ; "lone high surrogate")]
    #[test_case(0xDFFF, 0xDFFF ; "lone low surrogate")]
    #[test_case(0xCCCC, 0xDDDD ; "ends in surrogates")]
    #[test_case(0xDDDD, 0xEEEE ; "starts in surrogates")]
    #[test_case(0xDDDD, 0xEEEEE ; "starts in surrogates and leaves the bmp")]
    #[test_case(0xCCCC, 0xEEEE ; "spans the surrogate block")]
    fn test_surrogate_ranges_rejected(min: u32, max: u32) {
        assert_eq!(
            ScalarRange::new(min, max),
            Err(ConstructionError::SurrogateRange { min, max })
        );
    }

    #[test]
    fn test_malformed_bounds_rejected() {
        assert_eq!(
            ScalarRange::new(2, 1),
            Err(ConstructionError::InvertedRange { min: 2, max: 1 })
        );
        assert_eq!(
            ScalarRange::single(0x110000),
            Err(ConstructionError::OutOfRange { min: 0x110000, max: 0x110000 })
        );
        assert_eq!(
            ScalarRange::new(0x10FFFF, 0x110000),
            Err(ConstructionError::OutOfRange { min: 0x10FFFF, max: 0x110000 })
        );
    }

    #[test]
    fn test_edges_of_the_surrogate_block_allowed() {
        assert!(ScalarRange::new(0, 0xD7FF).is_ok());
        assert!(ScalarRange::new(0xE000, SCALAR_MAX).is_ok());
        assert_eq!(ScalarRange::new(0x41, 0x5A).unwrap().count(), 26);
    }

    #[test]
    fn test_split_at_bmp() {
        let range = ScalarRange::new(0xFF00, 0x10401).unwrap();
        let (bmp, supplementary) = range.split_at_bmp();
        assert_eq!(bmp, Some(ScalarRange::new(0xFF00, 0xFFFF).unwrap()));
        assert_eq!(supplementary, Some(ScalarRange::new(0x10000, 0x10401).unwrap()));

        let range = ScalarRange::new(0x41, 0x5A).unwrap();
        assert_eq!(range.split_at_bmp(), (Some(range), None));

        let range = ScalarRange::single(0x10000).unwrap();
        assert_eq!(range.split_at_bmp(), (None, Some(range)));
    }

    #[test]
    fn test_bounds_of_owned_ranges() {
        let range = ScalarRange::new(0xFF00, 0x10401).unwrap();
        let (bmp, supplementary) = range.split_at_bmp();
        assert_eq!(bmp.map(|r| (r.start(), r.end())), Some((0xFF00, 0xFFFF)));
        assert_eq!(supplementary.map(|r| (r.start(), r.end())), Some((0x10000, 0x10401)));
        assert_eq!((range.start(), range.end()), (0xFF00, 0x10401));
        assert_eq!(range.end() - range.start() + 1, range.count());
    }

    #[test]
    fn test_normalize_ranges() {
        let ranges = validate_ranges([(0x61, 0x63), (0x30, 0x39), (0x62, 0x7A), (0x3A, 0x3A), (0x100, 0x100)]).unwrap();
        let normalized = normalize_ranges(ranges);
        assert_eq!(
            normalized,
            validate_ranges([(0x30, 0x3A), (0x61, 0x7A), (0x100, 0x100)]).unwrap()
        );
        assert!(normalize_ranges(Vec::new()).is_empty());
    }

    #[test]
    fn test_validate_ranges_stops_at_first_error() {
        let err = validate_ranges([(0x41, 0x5A), (0xD800, 0xD800), (3, 1)]).unwrap_err();
        assert_eq!(err, ConstructionError::SurrogateRange { min: 0xD800, max: 0xD800 });
    }
}

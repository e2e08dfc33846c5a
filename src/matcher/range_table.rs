//! A compact lookup table mapping `u32` key ranges to values.

/// Sorted ceilings/steps table.
///
/// Each ceiling is the exclusive upper bound of a key range that maps to the
/// step at the same index; the first range starts at 0. Adjacent ranges with
/// equal steps are coalesced, so the table stays as small as the data allows.
///
/// Example: mapping 0x41..=0x5A to `true` under ceiling 0x80:
/// ```text
/// ceilings: [0x41, 0x5B, 0x80]
/// steps:    [false, true, false]
/// ```
///
/// `step()` binary-searches the ceilings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeTable<T> {
    ceilings: Vec<u32>,
    steps: Vec<T>,
}

impl<T: Clone + PartialEq> RangeTable<T> {
    /// A table mapping every key below `ceiling` to `default`.
    pub fn new(ceiling: u32, default: T) -> Self {
        Self {
            ceilings: vec![ceiling],
            steps: vec![default],
        }
    }

    /// A table with specific inclusive `(lo, hi, step)` mappings over a
    /// default.
    ///
    /// Mappings must be sorted, non-overlapping and below `ceiling`.
    pub fn with_mappings<I>(ceiling: u32, default: T, mappings: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32, T)>,
    {
        let mut table = Self {
            ceilings: Vec::new(),
            steps: Vec::new(),
        };

        let mut last = 0u32;
        for (lo, hi, step) in mappings {
            debug_assert!(lo >= last && lo <= hi && hi < ceiling);
            if lo > last {
                table.push(lo, default.clone());
            }
            table.push(hi + 1, step);
            last = hi + 1;
        }

        if last < ceiling || table.ceilings.is_empty() {
            table.push(ceiling, default);
        }
        table
    }

    fn push(&mut self, ceiling: u32, step: T) {
        if self.steps.last() == Some(&step) {
            if let Some(last) = self.ceilings.last_mut() {
                *last = ceiling;
                return;
            }
        }
        self.ceilings.push(ceiling);
        self.steps.push(step);
    }

    /// The step for `key`, or `None` at or above the ceiling.
    #[inline]
    pub fn step(&self, key: u32) -> Option<&T> {
        let index = self.ceilings.partition_point(|&ceiling| ceiling <= key);
        self.steps.get(index)
    }

    /// Exclusive upper bound of the keys the table covers.
    pub fn ceiling(&self) -> u32 {
        self.ceilings.last().copied().unwrap_or(0)
    }

    /// Number of distinct ranges.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate the ranges as inclusive `(lo, hi, step)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        let starts = std::iter::once(0).chain(self.ceilings.iter().copied());
        starts
            .zip(self.ceilings.iter().copied())
            .zip(self.steps.iter())
            .map(|((lo, ceiling), step)| (lo, ceiling - 1, step))
    }
}

impl RangeTable<bool> {
    /// The inclusive ranges mapped to `true`.
    pub fn true_ranges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.iter().filter(|&(_, _, step)| *step).map(|(lo, hi, _)| (lo, hi))
    }
}

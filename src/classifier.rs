//! Codepoint to boundary-property classification.
//!
//! A classifier is assembled from property-table entries in priority order:
//! when entries overlap, the one added first wins. Every entry is compiled
//! to a [`CompiledMatcher`] and kept, and the priority resolution is done once
//! at build time into a single range lookup, so classifying a codepoint is a
//! binary search rather than a scan over the entries.

use std::fmt;
use std::str::FromStr;

use crate::cursor::Codepoint;
use crate::matcher::{CompiledMatcher, RangeTable};
use crate::ranges::SCALAR_MAX;
use crate::tables::PropertyTable;
use crate::ConstructionError;

/// Collects table entries, in priority order, for a [`PropertyClassifier`].
pub struct ClassifierBuilder<P> {
    entries: Vec<(P, CompiledMatcher)>,
}

impl<P> Default for ClassifierBuilder<P> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<P> ClassifierBuilder<P>
where
    P: Copy + Eq + FromStr + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every entry of `table`, in declaration order.
    pub fn table(mut self, table: &PropertyTable) -> Result<Self, ConstructionError> {
        for &(name, ranges) in table.entries {
            self.push(table, name, ranges)?;
        }
        Ok(self)
    }

    /// Add the single entry of `table` called `property`.
    pub fn entry(mut self, table: &PropertyTable, property: &str) -> Result<Self, ConstructionError> {
        let ranges = table.entry(property).ok_or_else(|| ConstructionError::UnknownProperty {
            table: table.name,
            property: property.to_string(),
        })?;
        self.push(table, property, ranges)?;
        Ok(self)
    }

    fn push(&mut self, table: &PropertyTable, name: &str, ranges: &[(u32, u32)]) -> Result<(), ConstructionError> {
        let property = name.parse::<P>().map_err(|_| ConstructionError::UnknownProperty {
            table: table.name,
            property: name.to_string(),
        })?;
        let matcher = CompiledMatcher::compile(ranges.iter().copied())
            .map_err(|source| ConstructionError::in_property(table.name, name, source))?;
        tracing::trace!(table = table.name, property = name, ranges = matcher.ranges().len(), "classifier entry");
        self.entries.push((property, matcher));
        Ok(())
    }

    /// Resolve priorities into the final lookup.
    pub fn build(self) -> PropertyClassifier<P> {
        // Every range boundary is a cut; between two cuts coverage is uniform.
        let mut cuts: Vec<u32> = self
            .entries
            .iter()
            .flat_map(|(_, matcher)| matcher.ranges())
            .flat_map(|range| [range.start(), range.end() + 1])
            .collect();
        cuts.sort_unstable();
        cuts.dedup();

        let mappings: Vec<(u32, u32, Option<P>)> = cuts
            .windows(2)
            .filter_map(|window| {
                let (lo, hi) = (window[0], window[1] - 1);
                self.entries
                    .iter()
                    .find(|(_, matcher)| matcher.contains_scalar(lo))
                    .map(|&(property, _)| (lo, hi, Some(property)))
            })
            .collect();

        let lookup = RangeTable::with_mappings(SCALAR_MAX + 1, None, mappings);
        tracing::debug!(entries = self.entries.len(), ranges = lookup.len(), "built classifier");

        PropertyClassifier {
            entries: self.entries,
            lookup,
        }
    }
}

/// Maps codepoints to the highest-priority property that contains them.
#[derive(Clone, Debug)]
pub struct PropertyClassifier<P> {
    entries: Vec<(P, CompiledMatcher)>,
    lookup: RangeTable<Option<P>>,
}

impl<P> PropertyClassifier<P>
where
    P: Copy + Eq + FromStr + fmt::Debug,
{
    pub fn builder() -> ClassifierBuilder<P> {
        ClassifierBuilder::new()
    }

    /// Property of a scalar value; `None` when no entry contains it.
    ///
    /// Surrogate values are never contained in an entry.
    #[inline]
    pub fn classify(&self, scalar: u32) -> Option<P> {
        self.lookup.step(scalar).copied().flatten()
    }

    #[inline]
    pub fn classify_codepoint(&self, codepoint: Codepoint) -> Option<P> {
        self.classify(codepoint.value())
    }

    /// The compiled matcher of `property`, if it was added.
    pub fn matcher(&self, property: P) -> Option<&CompiledMatcher> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, matcher)| matcher)
    }

    /// Properties in priority order.
    pub fn properties(&self) -> impl Iterator<Item = P> + '_ {
        self.entries.iter().map(|&(property, _)| property)
    }
}

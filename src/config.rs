//! Segmenter configuration.

/// Tuning shared by both boundary evaluators.
///
/// The default follows UAX #29 exactly. Setting a transparent-run limit caps
/// how far the evaluators walk over Extend/Format/ZWJ runs and regional
/// indicator runs when looking for context; past the limit the context is
/// treated as the start of the text. This bounds the cost of a single
/// boundary query on adversarial input at the price of conformance on runs
/// longer than the limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmenterConfig {
    pub transparent_run_limit: Option<usize>,
}

impl SegmenterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transparent_run_limit(mut self, limit: usize) -> Self {
        self.transparent_run_limit = Some(limit);
        self
    }

    /// Whether a walk that has already skipped `skipped` codepoints may skip
    /// another.
    #[inline]
    pub(crate) fn allows_skip(&self, skipped: usize) -> bool {
        self.transparent_run_limit.map_or(true, |limit| skipped < limit)
    }
}

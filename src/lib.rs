//! unisegment: Unicode text segmentation over UTF-16 code units
//!
//! Implements the default grapheme-cluster and word boundary algorithms of
//! UAX #29 on `&[u16]` text, together with the machinery they sit on:
//!
//! - `matcher`: compiles scalar-value ranges into matchers over code units,
//!   splitting supplementary-plane ranges into surrogate boxes
//! - `classifier`: maps a codepoint to its boundary property, honouring the
//!   declaration order of the property table
//! - `cursor`: codepoint-granularity reads over possibly ill-formed UTF-16
//! - `wordbreak` / `graphemebreak`: the boundary evaluators
//! - `characterclass`: the composite "word character" matcher
//!
//! Text is never validated: unpaired surrogates are ordinary one-unit
//! codepoints and every query returns a value.
//!
//! ```
//! use unisegment::Segmenter;
//!
//! let segmenter = Segmenter::shared().unwrap();
//! let text: Vec<u16> = "e\u{301}\r\n".encode_utf16().collect();
//! let clusters = segmenter.split_clusters(&text);
//! assert_eq!(clusters.len(), 2);
//! ```

pub mod characterclass;
pub mod classifier;
pub mod config;
pub mod cursor;
pub mod graphemebreak;
pub mod matcher;
pub mod ranges;
pub mod tables;
pub mod wordbreak;

use std::sync::OnceLock;

pub use classifier::{ClassifierBuilder, PropertyClassifier};
pub use config::SegmenterConfig;
pub use cursor::{Codepoint, TextCursor};
pub use graphemebreak::{ConjunctBreakProperty, GraphemeBreak, GraphemeBreakProperty, GraphemeClusters};
pub use matcher::{CompiledMatcher, SurrogateBox};
pub use ranges::ScalarRange;
pub use tables::{PropertyTable, UnicodeData, UnicodeVersion, UNICODE_16};
pub use wordbreak::{Direction, WordBreak, WordBreakProperty};

/// Errors raised while compiling property tables.
///
/// Queries never fail; only building matchers and evaluators does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("range {min:#06X}..={max:#06X} intersects the surrogate block")]
    SurrogateRange { min: u32, max: u32 },
    #[error("range {min:#06X}..={max:#06X} is inverted")]
    InvertedRange { min: u32, max: u32 },
    #[error("range {min:#06X}..={max:#06X} exceeds U+10FFFF")]
    OutOfRange { min: u32, max: u32 },
    #[error("table {table} has no property named {property:?}")]
    UnknownProperty { table: &'static str, property: String },
    #[error("property {property} of table {table}: {source}")]
    InProperty {
        table: &'static str,
        property: String,
        #[source]
        source: Box<ConstructionError>,
    },
}

impl ConstructionError {
    pub(crate) fn in_property(table: &'static str, property: &str, source: ConstructionError) -> Self {
        ConstructionError::InProperty {
            table,
            property: property.to_string(),
            source: Box::new(source),
        }
    }
}

/// Both boundary evaluators and the word-character matcher for one Unicode
/// version.
///
/// Built once and then only read, so it can be shared freely between threads:
/// ```
/// # use unisegment::{Segmenter, UNICODE_16};
/// use std::sync::Arc;
///
/// let segmenter = Arc::new(Segmenter::new(&UNICODE_16).unwrap());
/// let worker = Arc::clone(&segmenter);
/// std::thread::spawn(move || {
///     let text: Vec<u16> = "hi".encode_utf16().collect();
///     assert!(worker.is_word_break(&text, 0));
/// })
/// .join()
/// .unwrap();
/// ```
pub struct Segmenter {
    version: UnicodeVersion,
    config: SegmenterConfig,
    word: WordBreak,
    grapheme: GraphemeBreak,
    word_character: CompiledMatcher,
}

impl Segmenter {
    /// Compile every table of `data` with the default configuration.
    pub fn new(data: &UnicodeData) -> Result<Self, ConstructionError> {
        Self::with_config(data, SegmenterConfig::default())
    }

    pub fn with_config(data: &UnicodeData, config: SegmenterConfig) -> Result<Self, ConstructionError> {
        let word = WordBreak::with_config(data, config)?;
        let grapheme = GraphemeBreak::with_config(data, config)?;
        let word_character = characterclass::word_character_matcher(data.character_class)?;
        tracing::debug!(
            version = %data.version,
            transparent_run_limit = ?config.transparent_run_limit,
            "built segmenter"
        );
        Ok(Segmenter {
            version: data.version,
            config,
            word,
            grapheme,
            word_character,
        })
    }

    /// The process-wide segmenter over the bundled Unicode 16 tables.
    ///
    /// Compiled on first use.
    pub fn shared() -> Result<&'static Segmenter, ConstructionError> {
        static SHARED: OnceLock<Result<Segmenter, ConstructionError>> = OnceLock::new();
        SHARED
            .get_or_init(|| Segmenter::new(&UNICODE_16))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn version(&self) -> UnicodeVersion {
        self.version
    }

    pub fn config(&self) -> SegmenterConfig {
        self.config
    }

    pub fn word(&self) -> &WordBreak {
        &self.word
    }

    pub fn grapheme(&self) -> &GraphemeBreak {
        &self.grapheme
    }

    /// Matcher for Alphabetic, Mark, ASCII digits, Connector_Punctuation and
    /// Join_Control.
    pub fn word_character(&self) -> &CompiledMatcher {
        &self.word_character
    }

    pub fn is_word_break(&self, text: &[u16], pos: usize) -> bool {
        self.word.is_break(&TextCursor::new(text), pos)
    }

    pub fn is_grapheme_break(&self, text: &[u16], pos: usize) -> bool {
        self.grapheme.is_break(&TextCursor::new(text), pos)
    }

    pub fn next_word_break(&self, text: &[u16], pos: usize, only_alphanumeric: bool) -> usize {
        self.word.next_break_offset(&TextCursor::new(text), pos, only_alphanumeric)
    }

    pub fn prev_word_break(&self, text: &[u16], pos: usize, only_alphanumeric: bool) -> usize {
        self.word.prev_break_offset(&TextCursor::new(text), pos, only_alphanumeric)
    }

    /// Partition `text` into extended grapheme clusters.
    pub fn split_clusters<'a>(&self, text: &'a [u16]) -> Vec<&'a [u16]> {
        self.grapheme.split_clusters(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_shared_segmenter_is_unicode_16() {
        let segmenter = Segmenter::shared().unwrap();
        assert_eq!(segmenter.version().to_string(), "16.0.0");
        assert_eq!(segmenter.config(), SegmenterConfig::default());
        assert!(std::ptr::eq(segmenter, Segmenter::shared().unwrap()));
    }

    #[test]
    fn test_segmenter_queries() {
        let segmenter = Segmenter::new(&UNICODE_16).unwrap();
        let text = utf16("ab cd");
        assert!(segmenter.is_word_break(&text, 2));
        assert!(!segmenter.is_word_break(&text, 1));
        assert_eq!(segmenter.next_word_break(&text, 0, false), 2);
        assert_eq!(segmenter.prev_word_break(&text, 5, false), 3);
        assert!(segmenter.is_grapheme_break(&text, 1));
        assert_eq!(segmenter.split_clusters(&text).len(), 5);
        assert!(segmenter.word_character().matches(&utf16("a")));
        assert!(!segmenter.word_character().matches(&utf16(" ")));
    }

    #[test]
    fn test_error_messages() {
        let err = ConstructionError::SurrogateRange { min: 0xD800, max: 0xDFFF };
        assert_eq!(err.to_string(), "range 0xD800..=0xDFFF intersects the surrogate block");

        let err = ConstructionError::in_property("Word_Break", "ALetter", err);
        assert_eq!(
            err.to_string(),
            "property ALetter of table Word_Break: range 0xD800..=0xDFFF intersects the surrogate block"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}

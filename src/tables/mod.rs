//! Versioned Unicode property data.
//!
//! Each table is a list of named properties, each an ordered list of
//! inclusive scalar ranges. The data modules are generated from the Unicode
//! Character Database; `UnicodeData` bundles the tables the segmenters need
//! for one Unicode version so that several versions can be loaded side by
//! side.

mod character_class;
mod conjunct_break;
mod emoji;
mod grapheme_break;
mod word_break;

use std::fmt;

/// A Unicode version number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnicodeVersion {
    pub major: u8,
    pub minor: u8,
    pub update: u8,
}

impl fmt::Display for UnicodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.update)
    }
}

/// Version of the bundled tables.
pub const UNICODE_VERSION: UnicodeVersion = UnicodeVersion {
    major: 16,
    minor: 0,
    update: 0,
};

/// Named property ranges, in declaration order.
#[derive(Debug)]
pub struct PropertyTable {
    pub name: &'static str,
    pub version: UnicodeVersion,
    pub entries: &'static [(&'static str, &'static [(u32, u32)])],
}

impl PropertyTable {
    /// Ranges of the property called `property`.
    pub fn entry(&self, property: &str) -> Option<&'static [(u32, u32)]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == property)
            .map(|&(_, ranges)| ranges)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(name, _)| name)
    }
}

/// The property tables of one Unicode version.
#[derive(Clone, Copy, Debug)]
pub struct UnicodeData {
    pub version: UnicodeVersion,
    /// Word_Break values.
    pub word_break: &'static PropertyTable,
    /// Grapheme_Cluster_Break values.
    pub grapheme_break: &'static PropertyTable,
    /// Extended_Pictographic and the emoji modifier properties.
    pub emoji: &'static PropertyTable,
    /// Indic_Conjunct_Break values.
    pub conjunct_break: &'static PropertyTable,
    /// Properties united into the word-character class.
    pub character_class: &'static PropertyTable,
}

/// Unicode 16.0.0.
pub static UNICODE_16: UnicodeData = UnicodeData {
    version: UNICODE_VERSION,
    word_break: &word_break::TABLE,
    grapheme_break: &grapheme_break::TABLE,
    emoji: &emoji::TABLE,
    conjunct_break: &conjunct_break::TABLE,
    character_class: &character_class::TABLE,
};

impl UnicodeData {
    pub fn tables(&self) -> [&'static PropertyTable; 5] {
        [
            self.word_break,
            self.grapheme_break,
            self.emoji,
            self.conjunct_break,
            self.character_class,
        ]
    }
}

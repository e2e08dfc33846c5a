//! Range matcher compiler
//!
//! Turns inclusive scalar-value ranges into matchers over UTF-16 code units.
//! The key components are:
//!
//! - `RangeTable`: a compact ceilings/steps lookup over `u32` keys
//! - `SurrogateBox`: a rectangle of (high, low) surrogate pairs
//! - `CompiledMatcher`: the matcher for one property's ranges
//!
//! # Module Organization
//!
//! - `range_table`: the lookup table shared by matchers and classifiers
//! - `surrogate`: surrogate arithmetic and box decomposition
//! - `compiled`: matcher construction, queries and regex rendering

mod compiled;
mod range_table;
mod surrogate;

pub use compiled::CompiledMatcher;
pub use range_table::RangeTable;
pub use surrogate::{
    decode_pair, high_surrogate, is_lead, is_surrogate, is_trail, low_surrogate, surrogate_boxes,
    CodeUnitSpan, SurrogateBox, LEAD_MAX, LEAD_MIN, TRAIL_MAX, TRAIL_MIN,
};

#[cfg(test)]
mod tests;

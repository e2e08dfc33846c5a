//! The Unicode "word character" class of UTS #18: Alphabetic, marks, ASCII
//! digits, connector punctuation and the join controls.

use crate::matcher::CompiledMatcher;
use crate::ranges::validate_ranges;
use crate::tables::PropertyTable;
use crate::ConstructionError;

/// Compile the union of every entry of `table` into one matcher.
pub fn word_character_matcher(table: &PropertyTable) -> Result<CompiledMatcher, ConstructionError> {
    let mut ranges = Vec::new();
    for &(name, entry) in table.entries {
        let valid = validate_ranges(entry.iter().copied())
            .map_err(|source| ConstructionError::in_property(table.name, name, source))?;
        ranges.extend(valid);
    }
    Ok(CompiledMatcher::from_ranges(ranges))
}

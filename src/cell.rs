//! Splitting a cell into name segments and putting it back together

use crate::names::{NameSource, SubstitutionTable};

/// Characters that separate name segments. They are copied to the output as-is.
pub const SPLITTING_CHARS: [char; 5] = [' ', '-', '\u{2013}', '\u{2014}', ','];

/// How much of a cell is treated as one name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstitutionMode {
    /// Split on [`SPLITTING_CHARS`] and substitute each segment
    #[default]
    Segment,
    /// Substitute the whole cell as a single name.
    ///
    /// Cells holding several names ("Last, First") get one substitute for
    /// the combination, which will not line up with single-name cells.
    WholeCell,
}

impl SubstitutionMode {
    pub fn from_whole_cell_flag(whole_cell: bool) -> Self {
        if whole_cell {
            SubstitutionMode::WholeCell
        } else {
            SubstitutionMode::Segment
        }
    }

    pub fn is_whole_cell(&self) -> bool {
        matches!(self, SubstitutionMode::WholeCell)
    }
}

pub fn is_splitting_char(c: char) -> bool {
    SPLITTING_CHARS.contains(&c)
}

/// Replace the names in `value`, keeping every splitting character in place.
pub fn transform_cell<S: NameSource>(
    table: &mut SubstitutionTable<S>,
    value: &str,
    mode: SubstitutionMode,
) -> String {
    if mode.is_whole_cell() {
        return table.get_safe_name(value);
    }

    let mut built = String::with_capacity(value.len());
    let mut pending = String::new();

    for c in value.chars() {
        if is_splitting_char(c) {
            built.push_str(&table.get_safe_name(&pending));
            built.push(c);
            pending.clear();
        } else {
            pending.push(c);
        }
    }

    if !pending.is_empty() {
        built.push_str(&table.get_safe_name(&pending));
    }

    built
}

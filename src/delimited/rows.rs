use crate::cell::{transform_cell, SubstitutionMode};
use crate::names::{NameSource, SubstitutionTable};
use std::collections::HashSet;

/// Indices of `headers` naming one of `columns`, compared case-insensitively.
///
/// Only case is ignored; "First  Name" does not match "first name".
pub fn detect_target_columns(headers: &[String], columns: &[String]) -> Vec<usize> {
    let wanted: HashSet<String> = columns.iter().map(|c| c.to_lowercase()).collect();
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| wanted.contains(&h.to_lowercase()))
        .map(|(i, _)| i)
        .collect()
}

/// Applies name substitution to the target cells of each row
#[derive(Debug, Clone)]
pub struct RowTransformer {
    targets: Vec<usize>,
    mode: SubstitutionMode,
}

impl RowTransformer {
    pub fn new(targets: Vec<usize>, mode: SubstitutionMode) -> Self {
        Self { targets, mode }
    }

    pub fn for_headers(headers: &[String], columns: &[String], mode: SubstitutionMode) -> Self {
        Self::new(detect_target_columns(headers, columns), mode)
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Rewrite the non-empty target cells of `row`. Missing cells are skipped.
    pub fn apply<S: NameSource>(&self, table: &mut SubstitutionTable<S>, row: &mut [String]) {
        for &idx in &self.targets {
            if let Some(cell) = row.get_mut(idx) {
                if !cell.is_empty() {
                    *cell = transform_cell(table, cell, self.mode);
                }
            }
        }
    }
}

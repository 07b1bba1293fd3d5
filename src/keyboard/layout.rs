use std::collections::HashSet;

use thiserror::Error;

use crate::keyboard::label::SPACE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("keyboard layout has no rows")]
    NoRows,
    #[error("keyboard row {0} has no keys")]
    EmptyRow(usize),
    #[error("keyboard row {row} has an empty label at column {col}")]
    EmptyLabel { row: usize, col: usize },
    #[error("key label {0:?} appears more than once")]
    DuplicateLabel(String),
}

/// Rows of key labels, top to bottom. Fixed once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardLayout {
    rows: Vec<Vec<String>>,
}

impl KeyboardLayout {
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self, LayoutError> {
        if rows.is_empty() {
            return Err(LayoutError::NoRows);
        }

        {
            let mut seen = HashSet::new();
            for (row_idx, row) in rows.iter().enumerate() {
                if row.is_empty() {
                    return Err(LayoutError::EmptyRow(row_idx));
                }
                for (col_idx, label) in row.iter().enumerate() {
                    if label.is_empty() {
                        return Err(LayoutError::EmptyLabel {
                            row: row_idx,
                            col: col_idx,
                        });
                    }
                    if !seen.insert(label.as_str()) {
                        return Err(LayoutError::DuplicateLabel(label.clone()));
                    }
                }
            }
        }

        Ok(Self { rows })
    }

    pub fn qwerty() -> Self {
        let rows: &[&[&str]] = &[
            &["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "="],
            &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "[", "]"],
            &["A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "'"],
            &["Z", "X", "C", "V", "B", "N", "M", ",", ".", "/"],
            &[SPACE],
        ];
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Every label in row-major order.
    pub fn available_keys(&self) -> Vec<String> {
        self.rows.iter().flatten().cloned().collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.rows.iter().flatten().any(|l| l == label)
    }
}

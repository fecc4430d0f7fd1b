//! In-memory spreadsheet that report layouts write into before encoding.

use std::collections::BTreeMap;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Plain-text rendering used by CSV output.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.is_finite() => n.to_string(),
            Self::Number(_) | Self::Empty => String::new(),
            Self::Integer(i) => i.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Sink for `(row, column, value)` triples.
pub trait TableWriter {
    fn set_cell(&mut self, row: u32, column: u32, value: CellValue);
}

/// A single named worksheet. Cells are sparse; unset cells read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub title: String,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn get(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    /// Number of rows up to and including the last written one.
    pub fn row_count(&self) -> u32 {
        self.cells.keys().map(|(r, _)| r + 1).max().unwrap_or(0)
    }

    /// Number of columns up to and including the right-most written one.
    pub fn column_count(&self) -> u32 {
        self.cells.keys().map(|(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Written cells of one row in column order.
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, &CellValue)> {
        self.cells
            .range((row, 0)..=(row, u32::MAX))
            .map(|((_, c), v)| (*c, v))
    }

    /// Dense rows padded with [`CellValue::Empty`] to the sheet width.
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        let width = self.column_count() as usize;
        (0..self.row_count())
            .map(|r| {
                let mut cells = vec![CellValue::Empty; width];
                for (c, value) in self.row(r) {
                    cells[c as usize] = value.clone();
                }
                cells
            })
            .collect()
    }
}

impl TableWriter for Sheet {
    fn set_cell(&mut self, row: u32, column: u32, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_cells_read_back_unchanged() {
        let mut sheet = Sheet::new("Harvest summary");
        for row in 0..5u32 {
            sheet.set_cell(4 + row, 0, format!("Product {row}").into());
            sheet.set_cell(4 + row, 1, i64::from(row * 10).into());
            sheet.set_cell(4 + row, 2, (f64::from(row) * 1.5).into());
        }

        for row in 0..5u32 {
            assert_eq!(
                sheet.get(4 + row, 0),
                Some(&CellValue::Text(format!("Product {row}")))
            );
            assert_eq!(sheet.get(4 + row, 1), Some(&CellValue::Integer(i64::from(row * 10))));
            assert_eq!(sheet.get(4 + row, 2), Some(&CellValue::Number(f64::from(row) * 1.5)));
        }
        assert_eq!(sheet.row_count(), 9);
        assert_eq!(sheet.column_count(), 3);
    }

    #[test]
    fn dense_rows_pad_gaps_with_empty() {
        let mut sheet = Sheet::new("t");
        sheet.set_cell(0, 0, "title".into());
        sheet.set_cell(2, 2, 5i64.into());

        let rows = sheet.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![CellValue::Empty; 3]);
        assert_eq!(rows[2][2], CellValue::Integer(5));
    }

    #[test]
    fn writing_empty_clears_cell() {
        let mut sheet = Sheet::new("t");
        sheet.set_cell(1, 1, "x".into());
        sheet.set_cell(1, 1, CellValue::from(None::<f64>));
        assert_eq!(sheet.get(1, 1), None);
        assert_eq!(sheet.row_count(), 0);
    }
}

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use super::{TableReader, TabularError, TabularFormat, TabularRow};

/// Reads the first worksheet of `.xlsx`, `.xls` and `.ods` workbooks. The
/// first row holds the column names.
pub struct SpreadsheetReader;

impl SpreadsheetReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpreadsheetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReader for SpreadsheetReader {
    fn read(&self, path: &Path) -> Result<Vec<TabularRow>, TabularError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| TabularError::Spreadsheet(e.to_string()))?;

        let range = match workbook.worksheet_range_at(0) {
            Some(result) => result.map_err(|e| TabularError::Spreadsheet(e.to_string()))?,
            None => return Ok(Vec::new()),
        };

        Ok(rows_from_range(&range))
    }

    fn supports(&self, format: TabularFormat) -> bool {
        matches!(
            format,
            TabularFormat::Xlsx | TabularFormat::Xls | TabularFormat::Ods
        )
    }
}

/// Converts a sheet range into named rows, using the first row as headers.
/// Columns with a blank header are ignored.
pub fn rows_from_range(range: &Range<Data>) -> Vec<TabularRow> {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| cell_text(c).trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    rows.map(|cells| {
        headers
            .iter()
            .zip(cells.iter())
            .filter(|(h, _)| !h.is_empty())
            .map(|(h, c)| (h.clone(), cell_text(c)))
            .collect()
    })
    .collect()
}

/// Renders a cell as text. Whole-number floats lose their fractional part,
/// since spreadsheet apps store a typed `2005` as `2005.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

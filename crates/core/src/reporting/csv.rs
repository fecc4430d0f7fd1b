//! CSV encoding of a [`Sheet`].

use super::sheet::Sheet;

/// Escape a value for CSV output.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render every row of the sheet, padding short rows to the sheet width.
pub fn build_csv(sheet: &Sheet) -> String {
    let mut lines: Vec<String> = sheet
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| csv_escape(&cell.to_text()))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    lines.push(String::new());
    lines.join("\n")
}

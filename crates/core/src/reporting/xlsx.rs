//! Minimal Office Open XML (`.xlsx`) encoder.
//!
//! Writes a single-worksheet workbook with inline strings and numeric
//! cells. No shared string table or styles part is emitted; spreadsheet
//! applications accept the package without them.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::sheet::{CellValue, Sheet};
use crate::error::ReportError;

/// Worksheet names are limited to this many characters.
const MAX_SHEET_NAME_LEN: usize = 31;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Encode the sheet as an `.xlsx` package.
pub fn build_xlsx(sheet: &Sheet) -> Result<Vec<u8>, ReportError> {
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml(&sheet.title)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", worksheet_xml(sheet)),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in parts {
        zip.start_file(name, options).map_err(generation_error)?;
        zip.write_all(content.as_bytes()).map_err(generation_error)?;
    }

    let cursor = zip.finish().map_err(generation_error)?;
    Ok(cursor.into_inner())
}

fn generation_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Generation(format!("Failed to write xlsx package: {err}"))
}

fn workbook_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(&sheet_name(title))
    )
}

fn worksheet_xml(sheet: &Sheet) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for row in 0..sheet.row_count() {
        let mut cells = sheet.row(row).peekable();
        if cells.peek().is_none() {
            continue;
        }

        // Row numbers are 1-based in SpreadsheetML.
        xml.push_str(&format!(r#"<row r="{}">"#, row + 1));
        for (column, value) in cells {
            let reference = format!("{}{}", column_name(column), row + 1);
            match value {
                CellValue::Text(text) => {
                    xml.push_str(&format!(
                        r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        escape_xml(text)
                    ));
                }
                CellValue::Integer(i) => {
                    xml.push_str(&format!(r#"<c r="{reference}"><v>{i}</v></c>"#));
                }
                CellValue::Number(n) if n.is_finite() => {
                    xml.push_str(&format!(r#"<c r="{reference}"><v>{n}</v></c>"#));
                }
                CellValue::Number(_) | CellValue::Empty => {}
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Spreadsheet column letters: 0 → `A`, 25 → `Z`, 26 → `AA`.
pub fn column_name(column: u32) -> String {
    let mut n = column + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Strip characters worksheet names may not contain and cap the length.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if cleaned.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::sheet::TableWriter;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn column_names_roll_over_after_z() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(10), "K");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn sheet_names_are_sanitized() {
        assert_eq!(sheet_name("Packed / harvested [%]"), "Packed  harvested %");
        assert_eq!(sheet_name("???"), "Sheet1");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn package_contains_cells() {
        let mut sheet = Sheet::new("Harvest summary");
        sheet.set_cell(0, 0, "Harvest summary".into());
        sheet.set_cell(4, 0, "Salad & <herbs>".into());
        sheet.set_cell(4, 1, 50i64.into());
        sheet.set_cell(4, 2, 60.5.into());

        let bytes = build_xlsx(&sheet).unwrap();

        let worksheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(worksheet.contains(r#"<c r="A5" t="inlineStr"><is><t xml:space="preserve">Salad &amp; &lt;herbs&gt;</t></is></c>"#));
        assert!(worksheet.contains(r#"<c r="B5"><v>50</v></c>"#));
        assert!(worksheet.contains(r#"<c r="C5"><v>60.5</v></c>"#));
        assert!(!worksheet.contains(r#"<row r="2">"#));

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="Harvest summary""#));
        assert!(read_part(&bytes, "[Content_Types].xml").contains("worksheet+xml"));
    }

    #[test]
    fn worksheet_rows_in_order_and_skips_non_finite_numbers() {
        let mut sheet = Sheet::new("t");
        sheet.set_cell(0, 0, "Title".into());
        sheet.set_cell(2, 1, f64::NAN.into());
        sheet.set_cell(3, 0, 7i64.into());

        let xml = worksheet_xml(&sheet);
        let body = xml.split("<sheetData>").nth(1).unwrap();
        assert_eq!(
            body,
            concat!(
                r#"<row r="1"><c r="A1" t="inlineStr"><is><t xml:space="preserve">Title</t></is></c></row>"#,
                r#"<row r="3"></row>"#,
                r#"<row r="4"><c r="A4"><v>7</v></c></row>"#,
                "</sheetData></worksheet>"
            )
        );
    }
}

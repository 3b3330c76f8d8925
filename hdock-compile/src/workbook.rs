//! Single-sheet workbook layout.
//!
//! Each job becomes a block of rows:
//!
//! ```text
//! <complex_id>
//! Rank               | 1       | 2       | ...
//! Docking Score      | -250.13 | -240.02 | ...
//! ...                                          (wide table rows, no header line)
//! All results package | =HYPERLINK(".../all_results.tar.gz","all_results.tar.gz")
//! <blank>
//! ```

use std::path::Path;

use rust_xlsxwriter::{Formula, Workbook, XlsxError};

use crate::compile::ResultBlock;

pub const ARCHIVE_NAME: &str = "all_results.tar.gz";
pub const ARCHIVE_LABEL: &str = "All results package";

/// One cell as it will be written.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Empty,
    Text(String),
    Number(f64),
    Formula(String),
}

impl SheetCell {
    /// Numeric-looking text becomes a number so the sheet sorts and
    /// formats like the source tables.
    fn from_value(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SheetCell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => SheetCell::Number(n),
            _ => SheetCell::Text(raw.to_string()),
        }
    }
}

/// Lay out every block, in order, as sheet rows.
pub fn layout(blocks: &[ResultBlock]) -> Vec<Vec<SheetCell>> {
    let mut rows = Vec::new();
    for block in blocks {
        rows.push(vec![SheetCell::Text(block.complex_id.clone())]);
        rows.extend(
            block
                .table
                .rows()
                .iter()
                .map(|row| row.iter().map(|v| SheetCell::from_value(v)).collect()),
        );
        rows.push(vec![
            SheetCell::Text(ARCHIVE_LABEL.to_string()),
            SheetCell::Formula(archive_formula(&block.base_url)),
        ]);
        rows.push(Vec::new());
    }
    rows
}

/// `=HYPERLINK("<base_url>all_results.tar.gz","all_results.tar.gz")`.
fn archive_formula(base_url: &url::Url) -> String {
    let link = base_url
        .join(ARCHIVE_NAME)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| format!("{base_url}{ARCHIVE_NAME}"));
    // Formula string literals escape quotes by doubling them.
    format!(
        "=HYPERLINK(\"{}\",\"{ARCHIVE_NAME}\")",
        link.replace('"', "\"\"")
    )
}

/// Write `blocks` to a fresh workbook at `path` with a single sheet.
pub fn write_workbook(path: &Path, sheet_name: &str, blocks: &[ResultBlock]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (r, cells) in layout(blocks).iter().enumerate() {
        let row = u32::try_from(r).unwrap_or(u32::MAX);
        for (c, cell) in cells.iter().enumerate() {
            // Out-of-range indices are left for the writer to reject.
            let col = u16::try_from(c).unwrap_or(u16::MAX);
            match cell {
                SheetCell::Empty => {}
                SheetCell::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                SheetCell::Number(n) => {
                    sheet.write_number(row, col, *n)?;
                }
                SheetCell::Formula(f) => {
                    sheet.write_formula(row, col, Formula::new(f))?;
                }
            }
        }
    }

    workbook.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdock_scrape::WideTable;
    use url::Url;

    fn block(id: &str, base: &str) -> ResultBlock {
        let table = WideTable::new(
            vec!["Metric".into(), "1".into(), "2".into()],
            vec![
                vec!["Rank".into(), "1".into(), "2".into()],
                vec!["Docking Score".into(), "-250.13".into(), "-240.02".into()],
                vec!["Interface residues".into(), "model_1".into(), "model_2".into()],
            ],
        );
        ResultBlock {
            complex_id: id.into(),
            base_url: Url::parse(base).unwrap(),
            table,
        }
    }

    #[test]
    fn block_layout_is_header_rows_link_blank() {
        let rows = layout(&[block("1ab2", "http://h.example/data/1ab2/")]);
        assert_eq!(rows.len(), 1 + 3 + 1 + 1);
        assert_eq!(rows[0], vec![SheetCell::Text("1ab2".into())]);
        assert_eq!(
            rows[2],
            vec![
                SheetCell::Text("Docking Score".into()),
                SheetCell::Number(-250.13),
                SheetCell::Number(-240.02),
            ]
        );
        assert_eq!(rows[3][1], SheetCell::Text("model_1".into()));
        assert_eq!(
            rows[4],
            vec![
                SheetCell::Text("All results package".into()),
                SheetCell::Formula(
                    "=HYPERLINK(\"http://h.example/data/1ab2/all_results.tar.gz\",\"all_results.tar.gz\")"
                        .into()
                ),
            ]
        );
        assert!(rows[5].is_empty());
    }

    #[test]
    fn blocks_keep_input_order() {
        let rows = layout(&[
            block("first", "http://h.example/a/"),
            block("second", "http://h.example/b/"),
        ]);
        assert_eq!(rows[0], vec![SheetCell::Text("first".into())]);
        assert_eq!(rows[6], vec![SheetCell::Text("second".into())]);
    }

    #[test]
    fn non_finite_and_blank_values_are_not_numbers() {
        assert_eq!(SheetCell::from_value("NaN"), SheetCell::Text("NaN".into()));
        assert_eq!(SheetCell::from_value("  "), SheetCell::Empty);
        assert_eq!(SheetCell::from_value("1"), SheetCell::Number(1.0));
    }

    #[test]
    fn workbook_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        write_workbook(&path, "Summary", &[block("1ab2", "http://h.example/1ab2/")]).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }
}

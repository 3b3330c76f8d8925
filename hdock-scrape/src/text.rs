//! Ranked-poses text files: one pose per line, whitespace-separated
//! `rank docking confidence rmsd`.

use crate::table::{TidyTable, whole_number};

/// Column names given to every payload. Files carry no header of their own,
/// so every non-empty line is read as a pose.
const SYNTHETIC_HEADER: [&str; 4] = ["rank", "dock", "conf", "rmsd"];

/// Parse a ranked-poses payload into at most ten rows.
///
/// Returns `None` for an empty payload, for one whose lines carry more
/// fields than there are columns, and for one whose ranks are not whole
/// numbers; the caller moves on to the next candidate. A single leading
/// line with a non-numeric rank is taken as a column caption and skipped.
///
/// ```
/// use hdock_scrape::parse_ranked_text;
///
/// let t = parse_ranked_text("1 -250.13 0.8911 45.21\n2 -240.02 0.8702 50.10\n").unwrap();
/// assert_eq!(t.len(), 2);
/// assert_eq!(t.rows()[1].docking_score, "-240.02");
///
/// assert!(parse_ranked_text("<html>\n<body>\nFile not found\n</body>\n</html>\n").is_none());
/// ```
pub fn parse_ranked_text(text: &str) -> Option<TidyTable> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let captioned = lines
        .first()
        .and_then(|l| l.split_whitespace().next())
        .is_some_and(|rank| whole_number(rank).is_none());
    if captioned {
        lines.remove(0);
    }
    if lines.is_empty() {
        return None;
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if fields.len() > SYNTHETIC_HEADER.len() {
            tracing::debug!(
                line = idx + 1,
                fields = fields.len(),
                "scrape.text.too_many_fields"
            );
            return None;
        }
        rows.push(fields);
    }

    let table = TidyTable::from_columns(&SYNTHETIC_HEADER, &rows)?;
    if !table.has_whole_ranks() {
        tracing::debug!("scrape.text.non_numeric_rank");
        return None;
    }
    Some(table)
}

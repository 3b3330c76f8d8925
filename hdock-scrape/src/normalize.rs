//! Tidy → wide conversion for workbook output.

use crate::table::{Extracted, Metric, TidyTable, WideTable, whole_number};

/// Row labels of a wide table built from a ranking, in output order.
pub const WIDE_ROW_LABELS: [&str; 5] = [
    "Rank",
    "Docking Score",
    "Confidence Score",
    "Ligand rmsd (Å)",
    "Interface residues",
];

/// Bring any parsed table to the wide layout.
///
/// Wide input is returned unchanged, so the function is idempotent.
/// The interface-residue row holds `model_<n>` placeholders; neither source
/// format publishes the residues themselves.
///
/// ```
/// use hdock_scrape::{to_wide, PoseRow, TidyTable};
///
/// let tidy = TidyTable::from_rows(vec![PoseRow {
///     rank: "1".into(),
///     docking_score: "-250.13".into(),
///     confidence_score: "0.8911".into(),
///     ligand_rmsd: "45.21".into(),
/// }]);
/// let wide = to_wide(tidy.into());
/// assert_eq!(wide.header(), &["Metric", "1"]);
/// assert_eq!(wide.row("Interface residues").unwrap(), &["model_1"]);
/// ```
pub fn to_wide(table: Extracted) -> WideTable {
    match table {
        Extracted::Wide(wide) => wide,
        Extracted::Tidy(tidy) => transpose(&tidy),
    }
}

fn transpose(tidy: &TidyTable) -> WideTable {
    let ranks: Vec<String> = tidy
        .column(Metric::Rank)
        .into_iter()
        .map(rank_label)
        .collect();

    let mut header = Vec::with_capacity(ranks.len() + 1);
    header.push(WideTable::LABEL_COLUMN.to_string());
    header.extend(ranks.iter().cloned());

    let labelled = |label: &str, values: Vec<String>| {
        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(label.to_string());
        row.extend(values);
        row
    };
    let owned = |metric: Metric| -> Vec<String> {
        tidy.column(metric).into_iter().map(str::to_string).collect()
    };
    let placeholders: Vec<String> = (1..=tidy.len()).map(|i| format!("model_{i}")).collect();

    let [rank, docking, confidence, rmsd, interface] = WIDE_ROW_LABELS;
    let rows = vec![
        labelled(rank, ranks),
        labelled(docking, owned(Metric::DockingScore)),
        labelled(confidence, owned(Metric::ConfidenceScore)),
        labelled(rmsd, owned(Metric::LigandRmsd)),
        labelled(interface, placeholders),
    ];
    WideTable::new(header, rows)
}

/// Whole-number ranks render without a fraction (`"1.0"` → `"1"`); anything
/// else is kept as written.
fn rank_label(raw: &str) -> String {
    match whole_number(raw) {
        Some(n) => n.to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PoseRow;

    fn tidy_of(values: &[(&str, &str, &str, &str)]) -> TidyTable {
        TidyTable::from_rows(
            values
                .iter()
                .map(|(r, d, c, l)| PoseRow {
                    rank: r.to_string(),
                    docking_score: d.to_string(),
                    confidence_score: c.to_string(),
                    ligand_rmsd: l.to_string(),
                })
                .collect(),
        )
    }

    fn three_poses() -> TidyTable {
        tidy_of(&[
            ("1", "1.0", "0.9", "1.1"),
            ("2", "2.0", "0.8", "2.2"),
            ("3", "3.0", "0.7", "3.3"),
        ])
    }

    #[test]
    fn builds_five_metric_rows() {
        let wide = to_wide(three_poses().into());
        assert_eq!(wide.header(), &["Metric", "1", "2", "3"]);
        assert_eq!(wide.rows().len(), 5);
        let labels: Vec<&str> = wide.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(labels, WIDE_ROW_LABELS);
        assert_eq!(wide.row("Rank").unwrap(), &["1", "2", "3"]);
        assert_eq!(wide.row("Docking Score").unwrap(), &["1.0", "2.0", "3.0"]);
        assert_eq!(wide.row("Confidence Score").unwrap(), &["0.9", "0.8", "0.7"]);
        assert_eq!(wide.row("Ligand rmsd (Å)").unwrap(), &["1.1", "2.2", "3.3"]);
        assert_eq!(
            wide.row("Interface residues").unwrap(),
            &["model_1", "model_2", "model_3"]
        );
    }

    #[test]
    fn idempotent_on_wide_input() {
        let once = to_wide(three_poses().into());
        let twice = to_wide(once.clone().into());
        assert_eq!(once, twice);
    }

    #[test]
    fn wide_input_passes_through_untouched() {
        let odd = WideTable::new(
            vec!["Metric".into(), "1".into()],
            vec![vec!["Something else".into(), "x".into()]],
        );
        assert_eq!(to_wide(odd.clone().into()), odd);
    }

    #[test]
    fn rank_labels_drop_integral_fractions() {
        assert_eq!(rank_label("1.0"), "1");
        assert_eq!(rank_label(" 7 "), "7");
        assert_eq!(rank_label("2.5"), "2.5");
        assert_eq!(rank_label("rank"), "rank");
    }

    #[test]
    fn empty_ranking_still_has_all_labels() {
        let wide = to_wide(TidyTable::default().into());
        assert_eq!(wide.header(), &["Metric"]);
        assert!(wide.rows().iter().all(|r| r.len() == 1));
    }
}

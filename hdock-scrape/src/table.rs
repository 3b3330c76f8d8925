//! Table shapes shared by the parsers and the normalizer.

/// Rows kept from any ranking; the rest are dropped silently.
pub const MAX_POSES: usize = 10;

/// The four per-pose values every source must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Rank,
    DockingScore,
    ConfidenceScore,
    LigandRmsd,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Rank,
        Metric::DockingScore,
        Metric::ConfidenceScore,
        Metric::LigandRmsd,
    ];

    /// Canonical tidy column name.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Rank => "Rank",
            Metric::DockingScore => "Docking Score",
            Metric::ConfidenceScore => "Confidence Score",
            Metric::LigandRmsd => "Ligand RMSD (Å)",
        }
    }

    /// Map a source column name onto a metric.
    ///
    /// Case-insensitive and checked in priority order, so `"rank_dock"`
    /// is a rank column, not a docking one.
    ///
    /// ```
    /// use hdock_scrape::Metric;
    ///
    /// assert_eq!(Metric::classify("#"), Some(Metric::Rank));
    /// assert_eq!(Metric::classify("Docking Score"), Some(Metric::DockingScore));
    /// assert_eq!(Metric::classify("conf."), Some(Metric::ConfidenceScore));
    /// assert_eq!(Metric::classify("Ligand rmsd (Å)"), Some(Metric::LigandRmsd));
    /// assert_eq!(Metric::classify("Interface residues"), None);
    /// ```
    pub fn classify(name: &str) -> Option<Metric> {
        let lower = name.trim().to_lowercase();
        if lower.starts_with("rank") || lower == "#" {
            Some(Metric::Rank)
        } else if lower.contains("dock") {
            Some(Metric::DockingScore)
        } else if lower.contains("conf") {
            Some(Metric::ConfidenceScore)
        } else if lower.contains("rmsd") {
            Some(Metric::LigandRmsd)
        } else {
            None
        }
    }
}

/// One ranked pose, values kept as the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoseRow {
    pub rank: String,
    pub docking_score: String,
    pub confidence_score: String,
    pub ligand_rmsd: String,
}

impl PoseRow {
    pub fn get(&self, metric: Metric) -> &str {
        match metric {
            Metric::Rank => &self.rank,
            Metric::DockingScore => &self.docking_score,
            Metric::ConfidenceScore => &self.confidence_score,
            Metric::LigandRmsd => &self.ligand_rmsd,
        }
    }

    fn set(&mut self, metric: Metric, value: String) {
        match metric {
            Metric::Rank => self.rank = value,
            Metric::DockingScore => self.docking_score = value,
            Metric::ConfidenceScore => self.confidence_score = value,
            Metric::LigandRmsd => self.ligand_rmsd = value,
        }
    }
}

/// `"3"`, `" 3 "` and `"3.0"` are the whole number 3; anything else is not.
pub(crate) fn whole_number(raw: &str) -> Option<i64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
        _ => None,
    }
}

/// One row per rank, at most [`MAX_POSES`] rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TidyTable {
    rows: Vec<PoseRow>,
}

impl TidyTable {
    /// Build from named columns, or `None` unless every [`Metric`] is
    /// matched by some column name.
    ///
    /// The first column matching a metric wins. Short rows read as empty
    /// cells. Rows beyond [`MAX_POSES`] are dropped.
    pub fn from_columns<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> Option<Self> {
        let mut positions: Vec<(Metric, usize)> = Vec::with_capacity(Metric::ALL.len());
        for (idx, name) in header.iter().enumerate() {
            if let Some(metric) = Metric::classify(name.as_ref()) {
                if !positions.iter().any(|(m, _)| *m == metric) {
                    positions.push((metric, idx));
                }
            }
        }
        if positions.len() < Metric::ALL.len() {
            return None;
        }

        let rows = rows
            .iter()
            .take(MAX_POSES)
            .map(|cells| {
                let mut row = PoseRow::default();
                for &(metric, idx) in &positions {
                    row.set(metric, cells.get(idx).cloned().unwrap_or_default());
                }
                row
            })
            .collect();
        Some(Self { rows })
    }

    pub fn from_rows(mut rows: Vec<PoseRow>) -> Self {
        rows.truncate(MAX_POSES);
        Self { rows }
    }

    pub fn rows(&self) -> &[PoseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether every rank cell reads as a whole number.
    ///
    /// Error pages served with a success status often split into four or
    /// fewer words per line; their "ranks" never pass this check.
    pub fn has_whole_ranks(&self) -> bool {
        self.rows.iter().all(|r| whole_number(&r.rank).is_some())
    }

    /// All values of one metric, in rank order.
    pub fn column(&self, metric: Metric) -> Vec<&str> {
        self.rows.iter().map(|r| r.get(metric)).collect()
    }
}

/// One row per metric, one column per rank, led by a `Metric` label column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl WideTable {
    /// Name of the leading label column.
    pub const LABEL_COLUMN: &'static str = "Metric";

    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Values of the row whose label cell equals `label`, without the label.
    pub fn row(&self, label: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|r| r.first().is_some_and(|c| c == label))
            .map(|r| &r[1..])
    }
}

/// What a page parser hands back: a ranking still to be transposed, or a
/// table the source already laid out one metric per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Tidy(TidyTable),
    Wide(WideTable),
}

impl From<TidyTable> for Extracted {
    fn from(t: TidyTable) -> Self {
        Extracted::Tidy(t)
    }
}

impl From<WideTable> for Extracted {
    fn from(w: WideTable) -> Self {
        Extracted::Wide(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn classification_follows_priority() {
        assert_eq!(Metric::classify("RANKING"), Some(Metric::Rank));
        assert_eq!(Metric::classify("rank_dock"), Some(Metric::Rank));
        assert_eq!(Metric::classify("dock_conf"), Some(Metric::DockingScore));
        assert_eq!(Metric::classify("conf_rmsd"), Some(Metric::ConfidenceScore));
        assert_eq!(Metric::classify("score"), None);
    }

    #[test]
    fn missing_metric_rejects_columns() {
        let header = ["rank", "dock", "conf"];
        assert!(TidyTable::from_columns(&header, &[strings(&["1", "2", "3"])]).is_none());
    }

    #[test]
    fn columns_are_matched_by_name_not_position() {
        let header = ["rmsd", "conf", "#", "docking"];
        let rows = vec![strings(&["9.9", "0.5", "1", "-200"])];
        let t = TidyTable::from_columns(&header, &rows).unwrap();
        assert_eq!(
            t.rows()[0],
            PoseRow {
                rank: "1".into(),
                docking_score: "-200".into(),
                confidence_score: "0.5".into(),
                ligand_rmsd: "9.9".into(),
            }
        );
    }

    #[test]
    fn rows_are_capped_and_short_rows_padded() {
        let header = ["rank", "dock", "conf", "rmsd"];
        let mut rows: Vec<Vec<String>> = (1..=12)
            .map(|i| strings(&[&i.to_string(), "-1", "0.1", "2"]))
            .collect();
        rows[0] = strings(&["1", "-1"]);
        let t = TidyTable::from_columns(&header, &rows).unwrap();
        assert_eq!(t.len(), MAX_POSES);
        assert_eq!(t.rows()[0].confidence_score, "");
        assert_eq!(t.column(Metric::Rank).last(), Some(&"10"));
    }

    #[test]
    fn wide_row_lookup_skips_label() {
        let w = WideTable::new(
            strings(&["Metric", "1"]),
            vec![strings(&["Docking Score", "-250.1"])],
        );
        assert_eq!(w.row("Docking Score"), Some(&strings(&["-250.1"])[..]));
        assert_eq!(w.row("Rank"), None);
    }

    #[test]
    fn whole_ranks_accept_integral_floats_only() {
        assert_eq!(whole_number(" 3 "), Some(3));
        assert_eq!(whole_number("3.0"), Some(3));
        assert_eq!(whole_number("2.5"), None);
        assert_eq!(whole_number("<body>"), None);
        assert_eq!(whole_number("inf"), None);

        let header = ["rank", "dock", "conf", "rmsd"];
        let good = TidyTable::from_columns(&header, &[strings(&["1", "-1", "0.1", "2"])]).unwrap();
        assert!(good.has_whole_ranks());
        let bad = TidyTable::from_columns(&header, &[strings(&["File", "not", "found"])]).unwrap();
        assert!(!bad.has_whole_ranks());
    }
}

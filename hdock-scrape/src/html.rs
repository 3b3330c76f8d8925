//! Result pages that embed the top-10 table in HTML.
//!
//! Two layouts exist in the wild. Older pages publish one row per metric
//! with `Rank` as the first header cell; those are taken as already wide.
//! Others publish one row per pose under a secondary header row whose first
//! cell reads `rank`; those become a [`TidyTable`].

use scraper::{ElementRef, Html};

use crate::table::{Extracted, Metric, TidyTable, WideTable};

const LABEL_TAGS: [&str; 8] = ["strong", "b", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Header and body cells of one `<table>`, text only.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Grid {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Find the top-10 table in `html` and read it.
///
/// ```
/// use hdock_scrape::{parse_html_table, Extracted};
///
/// let page = r#"
///   <h3>Summary of the Top 10 Models</h3>
///   <table>
///     <tr><th>Rank</th><th>1</th><th>2</th></tr>
///     <tr><td>Docking Score</td><td>-250.13</td><td>-240.02</td></tr>
///   </table>"#;
/// match parse_html_table(page) {
///     Some(Extracted::Wide(w)) => assert_eq!(w.header()[0], "Metric"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub fn parse_html_table(html: &str) -> Option<Extracted> {
    let doc = Html::parse_document(html);
    let Some(table) = find_top10_table(&doc) else {
        tracing::debug!("scrape.html.no_table");
        return None;
    };
    let grid = read_grid(table);

    // Already one row per metric: trusted as-is, rows are not inspected.
    if grid
        .header
        .first()
        .is_some_and(|h| h.eq_ignore_ascii_case("rank"))
    {
        let Grid { mut header, rows } = grid;
        header[0] = WideTable::LABEL_COLUMN.to_string();
        return Some(Extracted::Wide(WideTable::new(header, rows)));
    }

    let (sub_header, body) = grid.rows.split_first()?;
    if !sub_header
        .first()
        .is_some_and(|c| c.eq_ignore_ascii_case("rank"))
    {
        tracing::debug!(first_header = ?grid.header.first(), "scrape.html.unknown_layout");
        return None;
    }

    let width = sub_header.len().max(grid.header.len());
    let names: Vec<&str> = (0..width)
        .map(|i| {
            let sub = sub_header.get(i).map(String::as_str).unwrap_or("");
            if Metric::classify(sub).is_some() {
                sub
            } else {
                grid.header.get(i).map(String::as_str).unwrap_or("")
            }
        })
        .collect();
    TidyTable::from_columns(&names, body)
        .filter(TidyTable::has_whole_ranks)
        .map(Extracted::Tidy)
}

fn find_top10_table<'a>(doc: &'a Html) -> Option<ElementRef<'a>> {
    table_after_label(doc).or_else(|| table_with_rank_header(doc))
}

/// First `<table>` after the first bold or heading element mentioning
/// "top" and "10".
fn table_after_label<'a>(doc: &'a Html) -> Option<ElementRef<'a>> {
    let mut past_label = false;
    for el in elements(doc.root_element()) {
        if past_label {
            if el.value().name() == "table" {
                return Some(el);
            }
        } else if is_top10_label(el) {
            past_label = true;
        }
    }
    None
}

fn is_top10_label(el: ElementRef<'_>) -> bool {
    if !LABEL_TAGS.contains(&el.value().name()) {
        return false;
    }
    let text = element_text(el).to_lowercase();
    text.contains("top") && text.contains("10")
}

/// First `<table>` whose first `<th>` reads `rank` and that mentions docking
/// or confidence anywhere.
fn table_with_rank_header<'a>(doc: &'a Html) -> Option<ElementRef<'a>> {
    elements(doc.root_element())
        .filter(|el| el.value().name() == "table")
        .find(|table| {
            let first_th = elements(*table).find(|el| el.value().name() == "th");
            let rank_first = first_th.is_some_and(|th| element_text(th).eq_ignore_ascii_case("rank"));
            if !rank_first {
                return false;
            }
            let text = element_text(*table).to_lowercase();
            text.contains("docking") || text.contains("confidence")
        })
}

/// Header is the first leading row in `<thead>` or made only of `<th>`
/// cells; without one, columns are named by position.
fn read_grid(table: ElementRef<'_>) -> Grid {
    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for tr in elements(table).filter(|el| el.value().name() == "tr") {
        let cells: Vec<ElementRef<'_>> = tr
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|c| matches!(c.value().name(), "td" | "th"))
            .collect();
        if cells.is_empty() {
            continue;
        }
        let texts: Vec<String> = cells.iter().map(|c| element_text(*c)).collect();

        let leading = rows.is_empty();
        let all_th = cells.iter().all(|c| c.value().name() == "th");
        if leading && (all_th || in_thead(tr, table)) {
            // Extra header rows are dropped; only the first names columns.
            header.get_or_insert(texts);
            continue;
        }
        rows.push(texts);
    }

    let header = header.unwrap_or_else(|| {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..width).map(|i| i.to_string()).collect()
    });
    Grid { header, rows }
}

fn in_thead(tr: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    tr.ancestors()
        .take_while(|n| n.id() != table.id())
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "thead")
}

/// Every element under `root` (inclusive) in document order.
fn elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().filter_map(ElementRef::wrap)
}

/// Text content with runs of whitespace collapsed to one space.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
